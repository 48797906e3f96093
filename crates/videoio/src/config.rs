use std::path::PathBuf;

/// Explicit plugin path.
pub const PLUGIN_ENV: &str = "VIDEOIO_FFMPEG_PLUGIN";

/// Set to `1` (or `true`) to use the statically linked entry points.
pub const LINKED_ENV: &str = "VIDEOIO_FFMPEG_LINKED";

/// Library base names tried when no plugin path is configured.
pub const DEFAULT_PLUGIN_NAMES: [&str; 2] = ["opencv_videoio_ffmpeg", "opencv_videoio_ffmpeg_64"];

/// Where the FFmpeg entry points come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendSource {
    /// Shared library loaded at runtime.
    #[default]
    Plugin,
    /// Symbols linked into the binary (requires the `linked` feature).
    Linked,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BackendConfig {
    pub source: BackendSource,
    pub plugin_path: Option<PathBuf>,
}

impl BackendConfig {
    /// Reads `VIDEOIO_FFMPEG_PLUGIN` and `VIDEOIO_FFMPEG_LINKED`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like `from_env`, with variables supplied by `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let linked = lookup(LINKED_ENV)
            .map(|value| matches!(value.trim(), "1" | "true" | "TRUE" | "yes"))
            .unwrap_or(false);
        let plugin_path = lookup(PLUGIN_ENV)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        Self {
            source: if linked {
                BackendSource::Linked
            } else {
                BackendSource::Plugin
            },
            plugin_path,
        }
    }

    pub fn with_source(mut self, source: BackendSource) -> Self {
        self.source = source;
        self
    }

    pub fn with_plugin_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.plugin_path = Some(path.into());
        self
    }

    /// Libraries to try, in order. An explicit path replaces the defaults.
    pub fn plugin_candidates(&self) -> Vec<PathBuf> {
        match &self.plugin_path {
            Some(path) => vec![path.clone()],
            None => DEFAULT_PLUGIN_NAMES
                .iter()
                .map(|name| PathBuf::from(libloading::library_filename(name)))
                .collect(),
        }
    }
}
