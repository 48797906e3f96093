use {image::Image, std::fmt};

/// Identifies the backend behind a capture or writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoCaptureApi {
    Any,
    V4l2,
    Gstreamer,
    Ffmpeg,
    Images,
}

impl VideoCaptureApi {
    pub fn id(&self) -> i32 {
        match self {
            VideoCaptureApi::Any => 0,
            VideoCaptureApi::V4l2 => 200,
            VideoCaptureApi::Gstreamer => 1800,
            VideoCaptureApi::Ffmpeg => 1900,
            VideoCaptureApi::Images => 2000,
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            0 => Some(VideoCaptureApi::Any),
            200 => Some(VideoCaptureApi::V4l2),
            1800 => Some(VideoCaptureApi::Gstreamer),
            1900 => Some(VideoCaptureApi::Ffmpeg),
            2000 => Some(VideoCaptureApi::Images),
            _ => None,
        }
    }
}

impl fmt::Display for VideoCaptureApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VideoCaptureApi::Any => "ANY",
            VideoCaptureApi::V4l2 => "V4L2",
            VideoCaptureApi::Gstreamer => "GSTREAMER",
            VideoCaptureApi::Ffmpeg => "FFMPEG",
            VideoCaptureApi::Images => "IMAGES",
        };
        f.write_str(name)
    }
}

/// Frame source as seen by the framework.
///
/// All calls block until the backend returns. Failures are reported as `false`
/// (or `0.0` for properties); the caller decides whether to retry, stop, or
/// fall back to another backend.
pub trait VideoCapture: Send {
    fn get_property(&self, property_id: i32) -> f64;
    fn set_property(&mut self, property_id: i32, value: f64) -> bool;

    /// Advances to the next frame.
    fn grab_frame(&mut self) -> bool;

    /// Copies the most recently grabbed frame into `frame`.
    ///
    /// On failure `frame` is left untouched.
    fn retrieve_frame(&mut self, stream_index: i32, frame: &mut Image) -> bool;

    fn is_opened(&self) -> bool;
    fn capture_domain(&self) -> VideoCaptureApi;

    /// Grab followed by retrieve of stream 0.
    fn read(&mut self, frame: &mut Image) -> bool {
        self.grab_frame() && self.retrieve_frame(0, frame)
    }
}

/// Frame sink as seen by the framework.
pub trait VideoWriter: Send {
    fn get_property(&self, property_id: i32) -> f64;
    fn set_property(&mut self, property_id: i32, value: f64) -> bool;
    fn write(&mut self, image: &Image);
    fn is_opened(&self) -> bool;
    fn capture_domain(&self) -> VideoCaptureApi;
}
