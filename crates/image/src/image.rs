use {
    crate::ImageError,
    base::{Tensor, Vec2},
};

/// Sample type of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    U8,
    U16,
    F32,
}

impl Depth {
    pub fn bytes(&self) -> usize {
        match self {
            Depth::U8 => 1,
            Depth::U16 => 2,
            Depth::F32 => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Image {
    U8(Tensor<u8>),
    U16(Tensor<u16>),
    F32(Tensor<f32>),
}

impl Default for Image {
    /// An empty 8-bit image, `[0, 0, 0]`.
    fn default() -> Self {
        Image::U8(Tensor {
            shape: vec![0, 0, 0],
            data: Vec::new(),
        })
    }
}

impl Image {
    /// Zero-filled 8-bit image.
    pub fn new_u8(height: usize, width: usize, channels: usize) -> Result<Self, ImageError> {
        Ok(Image::U8(Tensor::zeros(vec![height, width, channels])?))
    }

    pub fn from_u8(
        height: usize,
        width: usize,
        channels: usize,
        data: Vec<u8>,
    ) -> Result<Self, ImageError> {
        Ok(Image::U8(Tensor::new(vec![height, width, channels], data)?))
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            Image::U8(t) => &t.shape,
            Image::U16(t) => &t.shape,
            Image::F32(t) => &t.shape,
        }
    }

    pub fn height(&self) -> usize {
        self.shape()[0]
    }

    pub fn width(&self) -> usize {
        self.shape()[1]
    }

    pub fn channels(&self) -> usize {
        self.shape()[2]
    }

    /// `(width, height)`
    pub fn size(&self) -> Vec2<usize> {
        Vec2::new(self.width(), self.height())
    }

    pub fn depth(&self) -> Depth {
        match self {
            Image::U8(_) => Depth::U8,
            Image::U16(_) => Depth::U16,
            Image::F32(_) => Depth::F32,
        }
    }

    /// Row length in bytes.
    pub fn step(&self) -> usize {
        self.width() * self.channels() * self.depth().bytes()
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Image::U8(t) => t.is_empty(),
            Image::U16(t) => t.is_empty(),
            Image::F32(t) => t.is_empty(),
        }
    }

    pub fn as_u8(&self) -> Option<&[u8]> {
        match self {
            Image::U8(t) => Some(&t.data),
            _ => None,
        }
    }

    /// Copies an 8-bit pixel view with an arbitrary row stride into this image.
    ///
    /// The image becomes an 8-bit image of exactly `[height, width, channels]`,
    /// reusing its allocation where possible. Bytes between the end of a row and
    /// the next stride boundary are not copied. The geometry is validated against
    /// `src` first; on error the image is left as it was.
    pub fn copy_from_strided(
        &mut self,
        src: &[u8],
        stride: usize,
        width: usize,
        height: usize,
        channels: usize,
    ) -> Result<(), ImageError> {
        let row_len = width
            .checked_mul(channels)
            .ok_or_else(|| ImageError::Geometry(format!("{width}x{channels} row overflows")))?;
        if height > 0 && stride < row_len {
            return Err(ImageError::Geometry(format!(
                "stride {stride} shorter than row of {row_len} bytes"
            )));
        }
        let required = match height {
            0 => 0,
            _ => stride
                .checked_mul(height - 1)
                .and_then(|n| n.checked_add(row_len))
                .ok_or_else(|| ImageError::Geometry("view size overflows".to_string()))?,
        };
        if src.len() < required {
            return Err(ImageError::Geometry(format!(
                "view holds {} bytes, {required} needed",
                src.len()
            )));
        }

        let shape = [height, width, channels];
        base::element_count(&shape)?;
        if !matches!(self, Image::U8(_)) {
            *self = Image::default();
        }
        let Image::U8(tensor) = self else {
            unreachable!()
        };
        tensor.reshape_to(&shape)?;

        if row_len == 0 || height == 0 {
            return Ok(());
        }
        for (dst, row) in tensor.data.chunks_exact_mut(row_len).zip(src.chunks(stride)) {
            dst.copy_from_slice(&row[..row_len]);
        }
        Ok(())
    }
}
