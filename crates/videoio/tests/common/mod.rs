//! In-process stand-in for the FFmpeg wrapper library.
//!
//! Clips live in a process-wide registry keyed by path. Captures read from the
//! registry; writers add to it when released. Tests use distinct paths so they
//! can run in parallel.

#![allow(dead_code)]

use {
    libc::{c_char, c_double, c_int, c_uchar},
    std::{
        collections::HashMap,
        ffi::CStr,
        ptr,
        sync::{Mutex, MutexGuard},
    },
    videoio::*,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    /// Row stride in bytes, at least `width * channels`.
    pub stride: usize,
    pub fps: f64,
    pub fourcc: i32,
    pub frames: Vec<Vec<u8>>,
}

impl Clip {
    /// `count` frames where every byte of frame `i` equals `i`, rows padded by `padding` bytes.
    pub fn synthetic(
        count: usize,
        width: usize,
        height: usize,
        channels: usize,
        padding: usize,
    ) -> Self {
        let stride = width * channels + padding;
        Self {
            width,
            height,
            channels,
            stride,
            fps: 30.0,
            fourcc: image::FOURCC_MJPG,
            frames: (0..count).map(|i| vec![i as u8; stride * height]).collect(),
        }
    }
}

static CLIPS: Mutex<Option<HashMap<String, Clip>>> = Mutex::new(None);
static RELEASES: Mutex<Option<HashMap<String, usize>>> = Mutex::new(None);

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

pub fn register_clip(path: &str, clip: Clip) {
    lock(&CLIPS)
        .get_or_insert_with(HashMap::new)
        .insert(path.to_string(), clip);
}

pub fn clip(path: &str) -> Option<Clip> {
    lock(&CLIPS).as_ref().and_then(|clips| clips.get(path).cloned())
}

/// How many times a handle opened on `path` was released.
pub fn releases(path: &str) -> usize {
    lock(&RELEASES)
        .as_ref()
        .and_then(|releases| releases.get(path).copied())
        .unwrap_or(0)
}

fn count_release(path: &str) {
    *lock(&RELEASES)
        .get_or_insert_with(HashMap::new)
        .entry(path.to_string())
        .or_insert(0) += 1;
}

unsafe fn path_from(filename: *const c_char) -> Option<String> {
    if filename.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(filename) }
        .to_str()
        .ok()
        .map(str::to_string)
}

struct FakeCapture {
    path: String,
    clip: Clip,
    next: usize,
    current: Option<usize>,
    properties: HashMap<c_int, c_double>,
}

struct FakeWriter {
    path: String,
    clip: Clip,
}

unsafe extern "C" fn create_file_capture(filename: *const c_char) -> *mut CaptureHandle {
    let Some(path) = (unsafe { path_from(filename) }) else {
        return ptr::null_mut();
    };
    let Some(clip) = clip(&path) else {
        return ptr::null_mut();
    };
    Box::into_raw(Box::new(FakeCapture {
        path,
        clip,
        next: 0,
        current: None,
        properties: HashMap::new(),
    })) as *mut CaptureHandle
}

unsafe extern "C" fn release_capture(capture: *mut *mut CaptureHandle) {
    unsafe {
        if capture.is_null() || (*capture).is_null() {
            return;
        }
        let fake = Box::from_raw(*capture as *mut FakeCapture);
        count_release(&fake.path);
        *capture = ptr::null_mut();
    }
}

unsafe extern "C" fn grab_frame(capture: *mut CaptureHandle) -> c_int {
    let fake = unsafe { &mut *(capture as *mut FakeCapture) };
    if fake.next < fake.clip.frames.len() {
        fake.current = Some(fake.next);
        fake.next += 1;
        1
    } else {
        fake.current = None;
        0
    }
}

unsafe extern "C" fn retrieve_frame(
    capture: *mut CaptureHandle,
    data: *mut *mut c_uchar,
    step: *mut c_int,
    width: *mut c_int,
    height: *mut c_int,
    cn: *mut c_int,
) -> c_int {
    let fake = unsafe { &mut *(capture as *mut FakeCapture) };
    let Some(index) = fake.current else {
        return 0;
    };
    unsafe {
        *data = fake.clip.frames[index].as_mut_ptr();
        *step = fake.clip.stride as c_int;
        *width = fake.clip.width as c_int;
        *height = fake.clip.height as c_int;
        *cn = fake.clip.channels as c_int;
    }
    1
}

unsafe extern "C" fn get_capture_property(capture: *mut CaptureHandle, prop: c_int) -> c_double {
    let fake = unsafe { &*(capture as *mut FakeCapture) };
    match prop {
        CAP_PROP_POS_FRAMES => fake.next as c_double,
        CAP_PROP_FRAME_WIDTH => fake.clip.width as c_double,
        CAP_PROP_FRAME_HEIGHT => fake.clip.height as c_double,
        CAP_PROP_FPS => fake.clip.fps,
        CAP_PROP_FOURCC => fake.clip.fourcc as c_double,
        CAP_PROP_FRAME_COUNT => fake.clip.frames.len() as c_double,
        _ => fake.properties.get(&prop).copied().unwrap_or(0.0),
    }
}

unsafe extern "C" fn set_capture_property(
    capture: *mut CaptureHandle,
    prop: c_int,
    value: c_double,
) -> c_int {
    let fake = unsafe { &mut *(capture as *mut FakeCapture) };
    match prop {
        CAP_PROP_POS_FRAMES if value >= 0.0 => {
            fake.next = (value as usize).min(fake.clip.frames.len());
            fake.current = None;
            1
        }
        p if p < 0 => 0,
        p => {
            fake.properties.insert(p, value);
            1
        }
    }
}

unsafe extern "C" fn create_video_writer(
    filename: *const c_char,
    fourcc: c_int,
    fps: c_double,
    width: c_int,
    height: c_int,
    is_color: c_int,
) -> *mut WriterHandle {
    let Some(path) = (unsafe { path_from(filename) }) else {
        return ptr::null_mut();
    };
    if path.starts_with("unwritable/") || width <= 0 || height <= 0 || fps <= 0.0 {
        return ptr::null_mut();
    }
    let channels = if is_color != 0 { 3 } else { 1 };
    Box::into_raw(Box::new(FakeWriter {
        path,
        clip: Clip {
            width: width as usize,
            height: height as usize,
            channels,
            stride: width as usize * channels,
            fps,
            fourcc,
            frames: Vec::new(),
        },
    })) as *mut WriterHandle
}

unsafe extern "C" fn release_video_writer(writer: *mut *mut WriterHandle) {
    unsafe {
        if writer.is_null() || (*writer).is_null() {
            return;
        }
        let FakeWriter { path, clip } = *Box::from_raw(*writer as *mut FakeWriter);
        count_release(&path);
        register_clip(&path, clip);
        *writer = ptr::null_mut();
    }
}

unsafe extern "C" fn write_frame(
    writer: *mut WriterHandle,
    data: *const c_uchar,
    step: c_int,
    width: c_int,
    height: c_int,
    cn: c_int,
    _origin: c_int,
) -> c_int {
    let fake = unsafe { &mut *(writer as *mut FakeWriter) };
    let clip = &mut fake.clip;
    if width as usize != clip.width || height as usize != clip.height || cn as usize != clip.channels
    {
        return 0;
    }
    let row_len = clip.width * clip.channels;
    let mut frame = Vec::with_capacity(row_len * clip.height);
    for row in 0..clip.height {
        let src = unsafe { std::slice::from_raw_parts(data.add(row * step as usize), row_len) };
        frame.extend_from_slice(src);
    }
    clip.frames.push(frame);
    1
}

pub fn fake_table() -> FunctionTable {
    FunctionTable {
        create_file_capture: Some(create_file_capture),
        release_capture: Some(release_capture),
        grab_frame: Some(grab_frame),
        retrieve_frame: Some(retrieve_frame),
        set_capture_property: Some(set_capture_property),
        get_capture_property: Some(get_capture_property),
        create_video_writer: Some(create_video_writer),
        release_video_writer: Some(release_video_writer),
        write_frame: Some(write_frame),
    }
}

pub fn fake_backend() -> FfmpegBackend {
    FfmpegBackend::with_api(FfmpegApi::from_table(fake_table()))
}

pub fn backend_with(table: FunctionTable) -> FfmpegBackend {
    FfmpegBackend::with_api(FfmpegApi::from_table(table))
}

/// Release that forgets to clear the handle. The session is leaked.
pub unsafe extern "C" fn forgetful_release_capture(_capture: *mut *mut CaptureHandle) {}

pub unsafe extern "C" fn forgetful_release_writer(_writer: *mut *mut WriterHandle) {}
