use {crate::*, mirror_base::Vec2};

/// One frame. `data` is laid out row-major according to `format`; for
/// `Jpeg` it holds the compressed stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub size: Vec2<usize>,
    pub data: Vec<u8>,
    pub format: PixelFormat,
}

impl Image {
    /// Wrap raw frame bytes, checking the length for uncompressed formats.
    pub fn new(size: Vec2<usize>, data: Vec<u8>, format: PixelFormat) -> Result<Self, ImageError> {
        if let Some(expected) = format.frame_len(size.x, size.y) {
            if expected != data.len() {
                return Err(ImageError::Size {
                    expected,
                    got: data.len(),
                });
            }
        }
        Ok(Self { size, data, format })
    }

    pub fn width(&self) -> usize {
        self.size.x
    }

    pub fn height(&self) -> usize {
        self.size.y
    }

    /// Convert to `Rgb8`. Already-RGB images are cloned; JPEG data is
    /// decoded on the calling thread.
    pub fn to_rgb(&self) -> Result<Image, ImageError> {
        match self.format {
            PixelFormat::Rgb8 => Ok(self.clone()),
            PixelFormat::Rgba8 => Image::new(self.size, rgba_to_rgb(&self.data), PixelFormat::Rgb8),
            PixelFormat::Yuyv => Image::new(
                self.size,
                yuyv_to_rgb(self.size, &self.data),
                PixelFormat::Rgb8,
            ),
            PixelFormat::Jpeg => {
                let decoded = decode_image_blocking(&self.data)?;
                if decoded.size != self.size {
                    log::debug!(
                        "JPEG frame is {}x{}, expected {}x{}",
                        decoded.size.x,
                        decoded.size.y,
                        self.size.x,
                        self.size.y
                    );
                }
                Ok(decoded)
            }
        }
    }

    /// RGB triple at (x, y). Only meaningful for `Rgb8` images.
    pub fn rgb_at(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if self.format != PixelFormat::Rgb8 || x >= self.size.x || y >= self.size.y {
            return None;
        }
        let i = (y * self.size.x + x) * 3;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }
}
