use {
    crate::*,
    base::Vec2,
    std::sync::Arc,
};

/// Opens `path` for reading, or `None` if the backend is unavailable or cannot open it.
pub fn create_file_capture(backend: &FfmpegBackend, path: &str) -> Option<Box<dyn VideoCapture>> {
    let api = backend.init()?;
    if api.table().create_file_capture.is_none() {
        log::debug!("ffmpeg capture: backend has no cvCreateFileCapture_FFMPEG");
        return None;
    }

    let mut capture = FfmpegCapture::new(Arc::clone(api));
    if let Err(error) = capture.open(path) {
        log::debug!("ffmpeg capture: {error}");
        return None;
    }
    if !capture.is_opened() {
        return None;
    }
    Some(Box::new(capture))
}

/// Opens `path` for writing, or `None` if the backend is unavailable or refuses
/// the parameters.
pub fn create_video_writer(
    backend: &FfmpegBackend,
    path: &str,
    fourcc: i32,
    fps: f64,
    frame_size: Vec2<usize>,
    is_color: bool,
) -> Option<Box<dyn VideoWriter>> {
    let api = backend.init()?;
    if api.table().create_video_writer.is_none() {
        log::debug!("ffmpeg writer: backend has no cvCreateVideoWriter_FFMPEG");
        return None;
    }

    let mut writer = FfmpegWriter::new(Arc::clone(api));
    if let Err(error) = writer.open(path, fourcc, fps, frame_size, is_color) {
        log::debug!("ffmpeg writer: {error}");
        return None;
    }
    if !writer.is_opened() {
        return None;
    }
    Some(Box::new(writer))
}
