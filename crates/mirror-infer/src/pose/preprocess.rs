use {
    crate::InferError,
    mirror_base::Tensor,
    mirror_image::{Image, PixelFormat},
};

/// How an image was fitted into the square model input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterboxInfo {
    pub scale: f32,
    pub pad_x: f32,
    pub pad_y: f32,
}

impl LetterboxInfo {
    /// Map a point in model-input pixels back to source-image pixels.
    pub fn unmap(&self, x: f32, y: f32) -> (f32, f32) {
        ((x - self.pad_x) / self.scale, (y - self.pad_y) / self.scale)
    }
}

/// Letterbox an `Rgb8` image into a `[1, size, size, 3]` NHWC tensor with
/// values in [0, 1] and zero padding.
///
/// Resizing is nearest-neighbour; the image is centred.
pub fn preprocess(image: &Image, size: usize) -> Result<(Tensor<f32>, LetterboxInfo), InferError> {
    if image.format != PixelFormat::Rgb8 {
        return Err(InferError::Shape {
            expected: "Rgb8 image".to_string(),
            got: format!("{:?}", image.format),
        });
    }
    let (w, h) = (image.width(), image.height());
    if w == 0 || h == 0 || size == 0 {
        return Err(InferError::Shape {
            expected: "non-empty image".to_string(),
            got: format!("{w}x{h} into {size}x{size}"),
        });
    }

    let scale = (size as f32 / w as f32).min(size as f32 / h as f32);
    let new_w = ((w as f32 * scale) as usize).clamp(1, size);
    let new_h = ((h as f32 * scale) as usize).clamp(1, size);
    let pad_x = (size - new_w) / 2;
    let pad_y = (size - new_h) / 2;

    let mut data = vec![0.0f32; size * size * 3];
    for out_y in 0..new_h {
        let src_y = ((out_y as f32 / scale) as usize).min(h - 1);
        for out_x in 0..new_w {
            let src_x = ((out_x as f32 / scale) as usize).min(w - 1);
            let src = (src_y * w + src_x) * 3;
            let dst = ((out_y + pad_y) * size + out_x + pad_x) * 3;
            for ch in 0..3 {
                data[dst + ch] = image.data[src + ch] as f32 / 255.0;
            }
        }
    }

    let tensor = Tensor::new(vec![1, size, size, 3], data)?;
    Ok((
        tensor,
        LetterboxInfo {
            scale,
            pad_x: pad_x as f32,
            pad_y: pad_y as f32,
        },
    ))
}
