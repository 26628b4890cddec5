use {crate::*, mirror_base::Vec2};

/// Decode a still image or MJPEG frame into `Rgb8`. Alpha is dropped.
pub fn decode_image_blocking(data: &[u8]) -> Result<Image, ImageError> {
    let rgb = crates_image::load_from_memory(data)?.into_rgb8();
    let (width, height) = rgb.dimensions();
    Image::new(
        Vec2::new(width as usize, height as usize),
        rgb.into_raw(),
        PixelFormat::Rgb8,
    )
}

/// Decode on tokio's blocking pool.
pub async fn decode_image(data: Vec<u8>) -> Result<Image, ImageError> {
    tokio::task::spawn_blocking(move || decode_image_blocking(&data))
        .await
        .map_err(|e| ImageError::Decode(e.to_string()))?
}
