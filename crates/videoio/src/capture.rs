use {
    crate::{handle::Handle, *},
    image::Image,
    libc::{c_int, c_uchar},
    std::{ffi::CString, ptr, sync::Arc},
};

/// Decoded frame as described by the backend. Only valid until the next call on
/// the same handle.
struct FrameView {
    data: *const u8,
    step: usize,
    width: usize,
    height: usize,
    channels: usize,
}

impl FrameView {
    // rejects null data, non-positive geometry and rows longer than the stride
    fn new(data: *const u8, step: c_int, width: c_int, height: c_int, cn: c_int) -> Option<Self> {
        if data.is_null() || width <= 0 || height <= 0 || cn <= 0 || step <= 0 {
            return None;
        }
        let view = Self {
            data,
            step: step as usize,
            width: width as usize,
            height: height as usize,
            channels: cn as usize,
        };
        let row_len = view.width.checked_mul(view.channels)?;
        if view.step < row_len {
            return None;
        }
        Some(view)
    }

    // the last row need not be padded out to the stride
    fn byte_len(&self) -> Option<usize> {
        self.step
            .checked_mul(self.height - 1)?
            .checked_add(self.width * self.channels)
    }
}

/// Capture proxy over one FFmpeg decoder session.
pub struct FfmpegCapture {
    api: Arc<FfmpegApi>,
    handle: Handle<CaptureHandle>,
}

impl FfmpegCapture {
    pub fn new(api: Arc<FfmpegApi>) -> Self {
        let release = api.table().release_capture;
        Self {
            api,
            handle: Handle::null("capture", release),
        }
    }

    /// Closes any open session, then asks the backend to open `path`.
    pub fn open(&mut self, path: &str) -> Result<(), VideoError> {
        self.close();

        let create = self
            .api
            .table()
            .create_file_capture
            .ok_or(VideoError::Unavailable("cvCreateFileCapture_FFMPEG"))?;
        let c_path = CString::new(path)?;

        // Safety: c_path outlives the call.
        let capture = unsafe { create(c_path.as_ptr()) };
        if capture.is_null() {
            return Err(VideoError::Open(path.to_string()));
        }
        self.handle.reset(capture);
        log::debug!("ffmpeg capture: opened {path}");
        Ok(())
    }

    /// Releases the session. Does nothing when already closed.
    pub fn close(&mut self) {
        if !self.handle.is_null() {
            log::debug!("ffmpeg capture: closing");
        }
        self.handle.release();
    }
}

impl VideoCapture for FfmpegCapture {
    fn get_property(&self, property_id: i32) -> f64 {
        match self.api.table().get_capture_property {
            Some(get) if !self.handle.is_null() => unsafe { get(self.handle.as_ptr(), property_id) },
            _ => 0.0,
        }
    }

    fn set_property(&mut self, property_id: i32, value: f64) -> bool {
        match self.api.table().set_capture_property {
            Some(set) if !self.handle.is_null() => unsafe {
                set(self.handle.as_ptr(), property_id, value) != 0
            },
            _ => false,
        }
    }

    fn grab_frame(&mut self) -> bool {
        match self.api.table().grab_frame {
            Some(grab) if !self.handle.is_null() => unsafe { grab(self.handle.as_ptr()) != 0 },
            _ => false,
        }
    }

    /// Only a single stream is supported; `stream_index` is not passed on.
    fn retrieve_frame(&mut self, _stream_index: i32, frame: &mut Image) -> bool {
        let retrieve = match self.api.table().retrieve_frame {
            Some(retrieve) if !self.handle.is_null() => retrieve,
            _ => return false,
        };

        let mut data: *mut c_uchar = ptr::null_mut();
        let (mut step, mut width, mut height, mut cn): (c_int, c_int, c_int, c_int) = (0, 0, 0, 0);
        // Safety: the handle is live and every out-pointer refers to a local.
        let ok = unsafe {
            retrieve(
                self.handle.as_ptr(),
                &mut data,
                &mut step,
                &mut width,
                &mut height,
                &mut cn,
            )
        };
        if ok == 0 {
            return false;
        }
        let Some((view, len)) = FrameView::new(data, step, width, height, cn)
            .and_then(|view| view.byte_len().map(|len| (view, len)))
        else {
            log::debug!(
                "ffmpeg capture: unusable frame view {width}x{height}x{cn}, step {step}"
            );
            return false;
        };

        // Safety: the backend guarantees `height` rows of `step` bytes at `data`
        // until the next call on this handle; the slice ends before this returns.
        let src = unsafe { std::slice::from_raw_parts(view.data, len) };
        match frame.copy_from_strided(src, view.step, view.width, view.height, view.channels) {
            Ok(()) => true,
            Err(error) => {
                log::warn!("ffmpeg capture: cannot copy frame: {error}");
                false
            }
        }
    }

    fn is_opened(&self) -> bool {
        !self.handle.is_null()
    }

    fn capture_domain(&self) -> VideoCaptureApi {
        VideoCaptureApi::Ffmpeg
    }
}

impl Drop for FfmpegCapture {
    fn drop(&mut self) {
        self.close();
    }
}
