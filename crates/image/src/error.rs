use std::fmt;

#[derive(Debug, PartialEq)]
pub enum ImageError {
    Tensor(base::TensorError),
    Geometry(String),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Tensor(err) => write!(f, "tensor error: {err}"),
            ImageError::Geometry(msg) => write!(f, "geometry error: {msg}"),
        }
    }
}

impl std::error::Error for ImageError {}

impl From<base::TensorError> for ImageError {
    fn from(err: base::TensorError) -> Self {
        ImageError::Tensor(err)
    }
}
