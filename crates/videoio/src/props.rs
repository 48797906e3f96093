// Capture property identifiers understood by the FFmpeg backend. They are passed
// through unchanged; the backend decides what each one means.

pub const CAP_PROP_POS_MSEC: i32 = 0;
pub const CAP_PROP_POS_FRAMES: i32 = 1;
pub const CAP_PROP_POS_AVI_RATIO: i32 = 2;
pub const CAP_PROP_FRAME_WIDTH: i32 = 3;
pub const CAP_PROP_FRAME_HEIGHT: i32 = 4;
pub const CAP_PROP_FPS: i32 = 5;
pub const CAP_PROP_FOURCC: i32 = 6;
pub const CAP_PROP_FRAME_COUNT: i32 = 7;
pub const CAP_PROP_FORMAT: i32 = 8;
pub const CAP_PROP_CONVERT_RGB: i32 = 16;
