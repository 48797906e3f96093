//! The C ABI of the external FFmpeg wrapper library.
//!
//! Every entry point is optional: a plugin built against an older interface may
//! lack some of them, and callers check before use.

use {
    crate::*,
    libc::{c_char, c_double, c_int, c_uchar},
    libloading::Library,
    std::{ffi::OsStr, path::Path},
};

/// Opaque decoder session owned by the external library.
#[repr(C)]
pub struct CaptureHandle {
    _private: [u8; 0],
}

/// Opaque encoder session owned by the external library.
#[repr(C)]
pub struct WriterHandle {
    _private: [u8; 0],
}

pub type CreateFileCaptureFn = unsafe extern "C" fn(filename: *const c_char) -> *mut CaptureHandle;
pub type ReleaseCaptureFn = unsafe extern "C" fn(capture: *mut *mut CaptureHandle);
pub type GrabFrameFn = unsafe extern "C" fn(capture: *mut CaptureHandle) -> c_int;
pub type RetrieveFrameFn = unsafe extern "C" fn(
    capture: *mut CaptureHandle,
    data: *mut *mut c_uchar,
    step: *mut c_int,
    width: *mut c_int,
    height: *mut c_int,
    cn: *mut c_int,
) -> c_int;
pub type SetCapturePropertyFn =
    unsafe extern "C" fn(capture: *mut CaptureHandle, prop: c_int, value: c_double) -> c_int;
pub type GetCapturePropertyFn =
    unsafe extern "C" fn(capture: *mut CaptureHandle, prop: c_int) -> c_double;
pub type CreateVideoWriterFn = unsafe extern "C" fn(
    filename: *const c_char,
    fourcc: c_int,
    fps: c_double,
    width: c_int,
    height: c_int,
    is_color: c_int,
) -> *mut WriterHandle;
pub type ReleaseVideoWriterFn = unsafe extern "C" fn(writer: *mut *mut WriterHandle);
pub type WriteFrameFn = unsafe extern "C" fn(
    writer: *mut WriterHandle,
    data: *const c_uchar,
    step: c_int,
    width: c_int,
    height: c_int,
    cn: c_int,
    origin: c_int,
) -> c_int;

/// Entry points of the external library.
///
/// Both release functions must set `*handle` to null before returning.
#[derive(Debug, Clone, Copy)]
pub struct FunctionTable {
    pub create_file_capture: Option<CreateFileCaptureFn>,
    pub release_capture: Option<ReleaseCaptureFn>,
    pub grab_frame: Option<GrabFrameFn>,
    pub retrieve_frame: Option<RetrieveFrameFn>,
    pub set_capture_property: Option<SetCapturePropertyFn>,
    pub get_capture_property: Option<GetCapturePropertyFn>,
    pub create_video_writer: Option<CreateVideoWriterFn>,
    pub release_video_writer: Option<ReleaseVideoWriterFn>,
    pub write_frame: Option<WriteFrameFn>,
}

impl FunctionTable {
    pub const EMPTY: FunctionTable = FunctionTable {
        create_file_capture: None,
        release_capture: None,
        grab_frame: None,
        retrieve_frame: None,
        set_capture_property: None,
        get_capture_property: None,
        create_video_writer: None,
        release_video_writer: None,
        write_frame: None,
    };

    /// Number of entry points present.
    pub fn resolved_count(&self) -> usize {
        [
            self.create_file_capture.is_some(),
            self.release_capture.is_some(),
            self.grab_frame.is_some(),
            self.retrieve_frame.is_some(),
            self.set_capture_property.is_some(),
            self.get_capture_property.is_some(),
            self.create_video_writer.is_some(),
            self.release_video_writer.is_some(),
            self.write_frame.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }
}

/// A resolved function table together with the library that provides it.
///
/// Proxies hold this behind an `Arc`, so a plugin stays loaded while any of its
/// handles are alive.
pub struct FfmpegApi {
    table: FunctionTable,
    library: Option<Library>,
}

impl std::fmt::Debug for FfmpegApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FfmpegApi")
            .field("resolved", &self.table.resolved_count())
            .field("plugin", &self.library.is_some())
            .finish()
    }
}

// Copies a symbol out of the library, or None if it is not exported.
//
// Safety: `T` must be the function pointer type matching the symbol's C signature.
unsafe fn symbol<T: Copy>(library: &Library, name: &str) -> Option<T> {
    match unsafe { library.get::<T>(name.as_bytes()) } {
        Ok(symbol) => Some(*symbol),
        Err(error) => {
            log::debug!("ffmpeg plugin: {name} not exported: {error}");
            None
        }
    }
}

impl FfmpegApi {
    /// Wraps a caller-supplied table. Used to plug in alternative implementations.
    pub fn from_table(table: FunctionTable) -> Self {
        Self {
            table,
            library: None,
        }
    }

    pub fn table(&self) -> &FunctionTable {
        &self.table
    }

    pub fn is_plugin(&self) -> bool {
        self.library.is_some()
    }

    /// Loads a plugin shared library and resolves the entry points it exports.
    ///
    /// Missing entry points are left empty; failing to load the library at all is
    /// an error.
    pub fn load(path: impl AsRef<OsStr>) -> Result<Self, VideoError> {
        let path = path.as_ref();
        log::debug!("ffmpeg plugin: loading {}", Path::new(path).display());

        // Safety: loading runs the library's initialisers; the plugin is trusted
        // to be an FFmpeg wrapper built for this ABI.
        let library = unsafe { Library::new(path) }.map_err(|error| {
            VideoError::Load(format!("{}: {error}", Path::new(path).display()))
        })?;

        // Safety: the type aliases mirror the wrapper's exported prototypes.
        let table = unsafe {
            FunctionTable {
                create_file_capture: symbol(&library, "cvCreateFileCapture_FFMPEG"),
                release_capture: symbol(&library, "cvReleaseCapture_FFMPEG"),
                grab_frame: symbol(&library, "cvGrabFrame_FFMPEG"),
                retrieve_frame: symbol(&library, "cvRetrieveFrame_FFMPEG"),
                set_capture_property: symbol(&library, "cvSetCaptureProperty_FFMPEG"),
                get_capture_property: symbol(&library, "cvGetCaptureProperty_FFMPEG"),
                create_video_writer: symbol(&library, "cvCreateVideoWriter_FFMPEG"),
                release_video_writer: symbol(&library, "cvReleaseVideoWriter_FFMPEG"),
                write_frame: symbol(&library, "cvWriteFrame_FFMPEG"),
            }
        };

        Ok(Self {
            table,
            library: Some(library),
        })
    }

    /// Table over the statically linked wrapper library.
    #[cfg(feature = "linked")]
    pub fn linked() -> Self {
        Self::from_table(FunctionTable {
            create_file_capture: Some(linked::cvCreateFileCapture_FFMPEG),
            release_capture: Some(linked::cvReleaseCapture_FFMPEG),
            grab_frame: Some(linked::cvGrabFrame_FFMPEG),
            retrieve_frame: Some(linked::cvRetrieveFrame_FFMPEG),
            set_capture_property: Some(linked::cvSetCaptureProperty_FFMPEG),
            get_capture_property: Some(linked::cvGetCaptureProperty_FFMPEG),
            create_video_writer: Some(linked::cvCreateVideoWriter_FFMPEG),
            release_video_writer: Some(linked::cvReleaseVideoWriter_FFMPEG),
            write_frame: Some(linked::cvWriteFrame_FFMPEG),
        })
    }
}

#[cfg(feature = "linked")]
#[allow(non_snake_case)]
mod linked {
    use super::*;

    #[link(name = "opencv_videoio_ffmpeg")]
    unsafe extern "C" {
        pub fn cvCreateFileCapture_FFMPEG(filename: *const c_char) -> *mut CaptureHandle;
        pub fn cvReleaseCapture_FFMPEG(capture: *mut *mut CaptureHandle);
        pub fn cvGrabFrame_FFMPEG(capture: *mut CaptureHandle) -> c_int;
        pub fn cvRetrieveFrame_FFMPEG(
            capture: *mut CaptureHandle,
            data: *mut *mut c_uchar,
            step: *mut c_int,
            width: *mut c_int,
            height: *mut c_int,
            cn: *mut c_int,
        ) -> c_int;
        pub fn cvSetCaptureProperty_FFMPEG(
            capture: *mut CaptureHandle,
            prop: c_int,
            value: c_double,
        ) -> c_int;
        pub fn cvGetCaptureProperty_FFMPEG(capture: *mut CaptureHandle, prop: c_int) -> c_double;
        pub fn cvCreateVideoWriter_FFMPEG(
            filename: *const c_char,
            fourcc: c_int,
            fps: c_double,
            width: c_int,
            height: c_int,
            is_color: c_int,
        ) -> *mut WriterHandle;
        pub fn cvReleaseVideoWriter_FFMPEG(writer: *mut *mut WriterHandle);
        pub fn cvWriteFrame_FFMPEG(
            writer: *mut WriterHandle,
            data: *const c_uchar,
            step: c_int,
            width: c_int,
            height: c_int,
            cn: c_int,
            origin: c_int,
        ) -> c_int;
    }
}
