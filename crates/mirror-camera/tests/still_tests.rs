use crates_image::ImageEncoder;
use mirror_base::Vec2;
use mirror_camera::{Camera, CameraConfig, CameraError, StillCamera};
use mirror_image::{Image, PixelFormat};
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_still_camera_paces_frames() {
    let frame = Image::new(Vec2::new(1, 1), vec![9, 8, 7], PixelFormat::Rgb8).unwrap();
    let config = CameraConfig::default().with_fps(10);
    let mut camera = StillCamera::new(frame.clone(), &config).unwrap();

    let start = tokio::time::Instant::now();
    assert_eq!(camera.recv().await.unwrap(), frame);
    camera.recv().await.unwrap();
    camera.recv().await.unwrap();

    assert_eq!(camera.frames_sent(), 3);
    assert_eq!(start.elapsed(), Duration::from_millis(200));
}

#[tokio::test]
async fn test_still_camera_converts_to_rgb() {
    let frame = Image::new(Vec2::new(1, 1), vec![1, 2, 3, 4], PixelFormat::Rgba8).unwrap();
    let mut camera = StillCamera::new(frame, &CameraConfig::default()).unwrap();
    let rgb = camera.recv().await.unwrap();
    assert_eq!(rgb.format, PixelFormat::Rgb8);
    assert_eq!(rgb.data, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_still_camera_open_file() {
    let path = std::env::temp_dir().join(format!("mirror-still-{}.png", std::process::id()));
    let img = crates_image::RgbImage::from_fn(4, 3, |_, _| crates_image::Rgb([10, 20, 30]));
    let mut buffer = Vec::new();
    crates_image::codecs::png::PngEncoder::new(&mut buffer)
        .write_image(img.as_raw(), 4, 3, crates_image::ExtendedColorType::Rgb8)
        .unwrap();
    std::fs::write(&path, buffer).unwrap();

    let mut camera = StillCamera::open(&path, &CameraConfig::default()).await.unwrap();
    let frame = camera.recv().await.unwrap();
    assert_eq!(frame.size, Vec2::new(4, 3));
    assert_eq!(frame.rgb_at(3, 2), Some([10, 20, 30]));

    std::fs::remove_file(&path).ok();
}

#[tokio::test]
async fn test_still_camera_missing_file() {
    let result = StillCamera::open("/nonexistent/mirror.png", &CameraConfig::default()).await;
    assert!(matches!(result, Err(CameraError::Device(_))));
}
