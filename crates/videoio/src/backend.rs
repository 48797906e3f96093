use {
    crate::*,
    std::sync::{Arc, OnceLock},
};

/// One-time resolution of the FFmpeg function table.
///
/// The table is resolved on the first call to [`FfmpegBackend::init`]; later
/// calls return the same result, including a failed one. Create one backend at
/// startup and hand it to the factory functions.
pub struct FfmpegBackend {
    config: BackendConfig,
    api: OnceLock<Option<Arc<FfmpegApi>>>,
}

impl Default for FfmpegBackend {
    fn default() -> Self {
        Self::new(BackendConfig::default())
    }
}

impl FfmpegBackend {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            api: OnceLock::new(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(BackendConfig::from_env())
    }

    /// A backend that is already initialised with `api`.
    pub fn with_api(api: FfmpegApi) -> Self {
        Self {
            config: BackendConfig::default(),
            api: OnceLock::from(Some(Arc::new(api))),
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Resolves the table if that has not happened yet. `None` means the
    /// backend is unavailable in this process.
    pub fn init(&self) -> Option<&Arc<FfmpegApi>> {
        self.api.get_or_init(|| resolve(&self.config)).as_ref()
    }

    pub fn is_available(&self) -> bool {
        self.init().is_some()
    }
}

fn resolve(config: &BackendConfig) -> Option<Arc<FfmpegApi>> {
    match config.source {
        BackendSource::Linked => resolve_linked(),
        BackendSource::Plugin => {
            for candidate in config.plugin_candidates() {
                match FfmpegApi::load(&candidate) {
                    Ok(api) => {
                        log::info!(
                            "ffmpeg backend: loaded {} ({} of 9 entry points)",
                            candidate.display(),
                            api.table().resolved_count()
                        );
                        return Some(Arc::new(api));
                    }
                    Err(error) => log::debug!("ffmpeg backend: {error}"),
                }
            }
            log::warn!("ffmpeg backend: no plugin could be loaded, backend disabled");
            None
        }
    }
}

#[cfg(feature = "linked")]
fn resolve_linked() -> Option<Arc<FfmpegApi>> {
    log::info!("ffmpeg backend: using linked entry points");
    Some(Arc::new(FfmpegApi::linked()))
}

#[cfg(not(feature = "linked"))]
fn resolve_linked() -> Option<Arc<FfmpegApi>> {
    log::warn!("ffmpeg backend: linked entry points requested but the `linked` feature is off");
    None
}
