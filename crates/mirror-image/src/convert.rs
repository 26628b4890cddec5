use {crate::*, mirror_base::Vec2};

/// Packed YUYV (4 bytes per 2 pixels) to RGB8.
pub fn yuyv_to_rgb(size: Vec2<usize>, data: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(size.area() * 3);
    for chunk in data.chunks_exact(4) {
        let (r0, g0, b0) = yuv_to_rgb(chunk[0], chunk[1], chunk[3]);
        let (r1, g1, b1) = yuv_to_rgb(chunk[2], chunk[1], chunk[3]);
        rgb.extend_from_slice(&[r0, g0, b0, r1, g1, b1]);
    }
    rgb
}

/// Drop row padding from a frame whose rows are `stride` bytes apart but
/// carry only `row_bytes` of pixels. Bytes past the last row are ignored.
///
/// # Errors
///
/// `ImageError::Size` when `data` is too short for `height` rows.
pub fn unpad_rows(
    data: &[u8],
    row_bytes: usize,
    stride: usize,
    height: usize,
) -> Result<Vec<u8>, ImageError> {
    let stride = stride.max(row_bytes);
    let needed = match height {
        0 => 0,
        _ => stride * (height - 1) + row_bytes,
    };
    if data.len() < needed {
        return Err(ImageError::Size {
            expected: needed,
            got: data.len(),
        });
    }
    if stride == row_bytes {
        return Ok(data[..needed].to_vec());
    }

    let mut packed = Vec::with_capacity(row_bytes * height);
    for row in data.chunks(stride).take(height) {
        packed.extend_from_slice(&row[..row_bytes]);
    }
    Ok(packed)
}

pub fn rgba_to_rgb(data: &[u8]) -> Vec<u8> {
    data.chunks_exact(4)
        .flat_map(|c| [c[0], c[1], c[2]])
        .collect()
}

/// RGB8 bytes to packed `0x00RRGGBB` words, the layout minifb expects.
pub fn rgb_to_argb(data: &[u8]) -> Vec<u32> {
    data.chunks_exact(3)
        .map(|c| (c[0] as u32) << 16 | (c[1] as u32) << 8 | c[2] as u32)
        .collect()
}
