//! FFmpeg capture and writer proxies for the videoio workspace.
//!
//! The decoding and encoding work happens in an external library exposing the
//! `cv*_FFMPEG` C ABI. This crate owns the handles that library hands out,
//! forwards calls to it, and copies decoded frames into [`image::Image`].
//!
//! The entry points are gathered in a [`FunctionTable`], either resolved from
//! a plugin loaded at runtime or, with the `linked` feature, from symbols linked
//! into the binary. An [`FfmpegBackend`] resolves the table once and is passed to
//! [`create_file_capture`] and [`create_video_writer`].

pub mod backend;
pub mod capture;
pub mod config;
pub mod error;
pub mod factory;
pub mod ffi;
mod handle;
pub mod props;
pub mod traits;
pub mod writer;

pub use backend::FfmpegBackend;
pub use capture::FfmpegCapture;
pub use config::{BackendConfig, BackendSource};
pub use error::VideoError;
pub use factory::{create_file_capture, create_video_writer};
pub use ffi::{CaptureHandle, FfmpegApi, FunctionTable, WriterHandle};
pub use props::*;
pub use traits::{VideoCapture, VideoCaptureApi, VideoWriter};
pub use writer::FfmpegWriter;
