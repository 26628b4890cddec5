// fourcc codes as reported by V4L2
const FOURCC_RGB3: [u8; 4] = *b"RGB3";
const FOURCC_YUYV: [u8; 4] = *b"YUYV";
const FOURCC_MJPG: [u8; 4] = *b"MJPG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb8,
    Rgba8,
    Yuyv,
    Jpeg,
}

impl PixelFormat {
    /// Map a V4L2 fourcc to a format, `None` if the pipeline can't use it.
    pub fn from_fourcc(fourcc: [u8; 4]) -> Option<Self> {
        match fourcc {
            FOURCC_RGB3 => Some(PixelFormat::Rgb8),
            FOURCC_YUYV => Some(PixelFormat::Yuyv),
            FOURCC_MJPG => Some(PixelFormat::Jpeg),
            _ => None,
        }
    }

    /// Exact byte length of a `width`×`height` frame, `None` for compressed
    /// formats.
    pub fn frame_len(&self, width: usize, height: usize) -> Option<usize> {
        let pixels = width.checked_mul(height)?;
        match self {
            PixelFormat::Rgb8 => pixels.checked_mul(3),
            PixelFormat::Rgba8 => pixels.checked_mul(4),
            PixelFormat::Yuyv => pixels.checked_mul(2),
            PixelFormat::Jpeg => None,
        }
    }
}

// BT.601 YUV-to-RGB conversion for a single pixel (fixed-point, shift 8)
pub(crate) fn yuv_to_rgb(y: u8, u: u8, v: u8) -> (u8, u8, u8) {
    let y = y as i32;
    let u = u as i32 - 128;
    let v = v as i32 - 128;
    let r = (y + ((359 * v) >> 8)).clamp(0, 255) as u8;
    let g = (y - ((88 * u + 183 * v) >> 8)).clamp(0, 255) as u8;
    let b = (y + ((454 * u) >> 8)).clamp(0, 255) as u8;
    (r, g, b)
}
