use {
    crate::{handle::Handle, *},
    base::Vec2,
    image::Image,
    libc::c_int,
    std::{ffi::CString, sync::Arc},
};

/// Writer proxy over one FFmpeg encoder session.
pub struct FfmpegWriter {
    api: Arc<FfmpegApi>,
    handle: Handle<WriterHandle>,
}

impl FfmpegWriter {
    pub fn new(api: Arc<FfmpegApi>) -> Self {
        let release = api.table().release_video_writer;
        Self {
            api,
            handle: Handle::null("writer", release),
        }
    }

    /// Closes any open session, then asks the backend for an encoder writing
    /// `path` with codec `fourcc` at `fps`, frames of `frame_size` (width x height).
    pub fn open(
        &mut self,
        path: &str,
        fourcc: i32,
        fps: f64,
        frame_size: Vec2<usize>,
        is_color: bool,
    ) -> Result<(), VideoError> {
        self.close();

        let create = self
            .api
            .table()
            .create_video_writer
            .ok_or(VideoError::Unavailable("cvCreateVideoWriter_FFMPEG"))?;
        let (Ok(width), Ok(height)) = (c_int::try_from(frame_size.x), c_int::try_from(frame_size.y))
        else {
            return Err(VideoError::InvalidSize(frame_size));
        };
        let c_path = CString::new(path)?;

        // Safety: c_path outlives the call.
        let writer = unsafe {
            create(
                c_path.as_ptr(),
                fourcc,
                fps,
                width,
                height,
                c_int::from(is_color),
            )
        };
        if writer.is_null() {
            return Err(VideoError::Open(path.to_string()));
        }
        self.handle.reset(writer);
        log::debug!(
            "ffmpeg writer: opened {path} ({}, {fps} fps, {frame_size})",
            image::fourcc_to_string(fourcc)
        );
        Ok(())
    }

    /// Finalises and releases the session. Does nothing when already closed.
    pub fn close(&mut self) {
        if !self.handle.is_null() {
            log::debug!("ffmpeg writer: closing");
        }
        self.handle.release();
    }
}

impl VideoWriter for FfmpegWriter {
    // writer properties are not supported through this proxy
    fn get_property(&self, _property_id: i32) -> f64 {
        0.0
    }

    fn set_property(&mut self, _property_id: i32, _value: f64) -> bool {
        false
    }

    /// Hands the frame to the encoder without copying it.
    ///
    /// Frames written to a closed writer are dropped silently. Frames that are not
    /// `[height, width, channels]` are dropped with a warning.
    ///
    /// # Panics
    ///
    /// If the writer is open and `image` does not have 8-bit samples.
    fn write(&mut self, image: &Image) {
        if self.handle.is_null() {
            return;
        }
        let Some(data) = image.as_u8() else {
            log::error!("ffmpeg writer: {:?} samples given, only 8-bit is accepted", image.depth());
            panic!("ffmpeg writer accepts 8-bit images only, got {:?}", image.depth());
        };
        let Some(write_frame) = self.api.table().write_frame else {
            log::warn!("ffmpeg writer: cvWriteFrame_FFMPEG unavailable, frame dropped");
            return;
        };
        if image.shape().len() != 3 {
            log::warn!("ffmpeg writer: image shape {:?} is not HWC, frame dropped", image.shape());
            return;
        }
        let geometry = (
            c_int::try_from(image.step()),
            c_int::try_from(image.width()),
            c_int::try_from(image.height()),
            c_int::try_from(image.channels()),
        );
        let (Ok(step), Ok(width), Ok(height), Ok(cn)) = geometry else {
            log::warn!("ffmpeg writer: image {} too large, frame dropped", image.size());
            return;
        };

        // Safety: data holds height rows of step bytes and outlives the call;
        // the encoder does not keep the pointer.
        let written =
            unsafe { write_frame(self.handle.as_ptr(), data.as_ptr(), step, width, height, cn, 0) };
        if written == 0 {
            log::debug!("ffmpeg writer: backend rejected a {}x{cn} frame", image.size());
        }
    }

    fn is_opened(&self) -> bool {
        !self.handle.is_null()
    }

    fn capture_domain(&self) -> VideoCaptureApi {
        VideoCaptureApi::Ffmpeg
    }
}

impl Drop for FfmpegWriter {
    fn drop(&mut self) {
        self.close();
    }
}
