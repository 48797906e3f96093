mod common;

use {
    common::*,
    std::{collections::HashMap, path::PathBuf, sync::Arc},
    videoio::{config::*, *},
};

fn config_from(vars: &[(&str, &str)]) -> BackendConfig {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    BackendConfig::from_lookup(|name| vars.get(name).cloned())
}

#[test]
fn test_config_defaults() {
    let config = BackendConfig::default();
    assert_eq!(config.source, BackendSource::Plugin);
    assert_eq!(config.plugin_path, None);
    assert_eq!(config.plugin_candidates().len(), DEFAULT_PLUGIN_NAMES.len());
}

#[test]
fn test_config_from_variables() {
    let config = config_from(&[(PLUGIN_ENV, "/opt/ffmpeg/wrapper.so"), (LINKED_ENV, "1")]);
    assert_eq!(config.source, BackendSource::Linked);
    assert_eq!(config.plugin_path, Some(PathBuf::from("/opt/ffmpeg/wrapper.so")));

    let config = config_from(&[(PLUGIN_ENV, "  "), (LINKED_ENV, "0")]);
    assert_eq!(config, BackendConfig::default());
}

#[test]
fn test_config_builder() {
    let config = BackendConfig::default()
        .with_source(BackendSource::Linked)
        .with_plugin_path("/tmp/wrapper.so");
    assert_eq!(config.source, BackendSource::Linked);
    assert_eq!(config.plugin_candidates(), vec![PathBuf::from("/tmp/wrapper.so")]);
}

#[test]
fn test_default_candidates_use_platform_names() {
    let candidates = BackendConfig::default().plugin_candidates();
    let first = candidates[0].to_string_lossy().into_owned();
    assert!(first.contains("opencv_videoio_ffmpeg"));
}

#[test]
fn test_injected_backend_is_initialised() {
    let backend = fake_backend();
    let first = Arc::clone(backend.init().unwrap());
    let second = Arc::clone(backend.init().unwrap());
    assert!(Arc::ptr_eq(&first, &second));
    assert!(!first.is_plugin());
    assert_eq!(first.table().resolved_count(), 9);
}

#[test]
fn test_unloadable_plugin_leaves_backend_unavailable() {
    let config = BackendConfig::default().with_plugin_path("/nonexistent/libwrapper.so");
    let backend = FfmpegBackend::new(config);
    assert!(!backend.is_available());
    // the failed result is kept
    assert!(backend.init().is_none());
    assert!(create_file_capture(&backend, "anything.avi").is_none());
}

#[test]
fn test_load_reports_missing_library() {
    let result = FfmpegApi::load("/nonexistent/libwrapper.so");
    assert!(matches!(&result, Err(VideoError::Load(msg)) if msg.contains("/nonexistent/libwrapper.so")));
}

#[cfg(not(feature = "linked"))]
#[test]
fn test_linked_source_without_feature_is_unavailable() {
    let backend = FfmpegBackend::new(BackendConfig::default().with_source(BackendSource::Linked));
    assert!(!backend.is_available());
}

#[test]
fn test_capture_api_tags() {
    assert_eq!(VideoCaptureApi::Ffmpeg.id(), 1900);
    assert_eq!(VideoCaptureApi::from_id(1900), Some(VideoCaptureApi::Ffmpeg));
    assert_eq!(VideoCaptureApi::from_id(-5), None);
    assert_eq!(VideoCaptureApi::Ffmpeg.to_string(), "FFMPEG");
}

#[test]
fn test_function_table_counts() {
    assert_eq!(FunctionTable::EMPTY.resolved_count(), 0);
    let table = FunctionTable {
        write_frame: None,
        ..fake_table()
    };
    assert_eq!(table.resolved_count(), 8);
}
