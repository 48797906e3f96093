use {base::Vec2, std::fmt};

#[derive(Debug)]
pub enum VideoError {
    InvalidPath(String),
    InvalidSize(Vec2<usize>),
    Unavailable(&'static str),
    Open(String),
    Load(String),
}

impl fmt::Display for VideoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoError::InvalidPath(msg) => write!(f, "invalid path: {msg}"),
            VideoError::InvalidSize(size) => write!(f, "frame size {size} out of range"),
            VideoError::Unavailable(symbol) => write!(f, "backend entry point {symbol} unavailable"),
            VideoError::Open(path) => write!(f, "backend could not open {path}"),
            VideoError::Load(msg) => write!(f, "load error: {msg}"),
        }
    }
}

impl std::error::Error for VideoError {}

impl From<std::ffi::NulError> for VideoError {
    fn from(err: std::ffi::NulError) -> Self {
        VideoError::InvalidPath(err.to_string())
    }
}
