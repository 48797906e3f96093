// Four-character codes are packed little-endian, first character in the low byte.

pub const FOURCC_MJPG: i32 = fourcc(b"MJPG");
pub const FOURCC_XVID: i32 = fourcc(b"XVID");
pub const FOURCC_MP4V: i32 = fourcc(b"mp4v");
pub const FOURCC_H264: i32 = fourcc(b"H264");
pub const FOURCC_FFV1: i32 = fourcc(b"FFV1");

/// Packs a four-character codec code into the integer form used by the C ABI.
pub const fn fourcc(code: &[u8; 4]) -> i32 {
    i32::from_le_bytes(*code)
}

/// Parses a four-character string such as `"MJPG"`.
pub fn parse_fourcc(code: &str) -> Option<i32> {
    let bytes: &[u8; 4] = code.as_bytes().try_into().ok()?;
    Some(fourcc(bytes))
}

/// Convert a fourcc code to a readable 4-character string.
pub fn fourcc_to_string(code: i32) -> String {
    String::from_utf8_lossy(&code.to_le_bytes()).into_owned()
}
