use {
    mirror_camera::{Camera, CameraConfig},
    mirror_image::PixelFormat,
    mirror_infer::Preloader,
    pose_viewer::{CameraSource, ViewerConfig, source::is_image_path, start_pipeline},
    std::{
        path::PathBuf,
        sync::{
            Arc,
            atomic::{AtomicBool, Ordering},
        },
    },
};

fn temp_png(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pose-viewer-{}-{name}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("frame.png");
    crates_image::RgbImage::from_pixel(4, 3, crates_image::Rgb([10, 20, 30]))
        .save(&path)
        .unwrap();
    path
}

#[test]
fn test_image_paths() {
    assert!(is_image_path("person.png"));
    assert!(is_image_path("/tmp/shot.JPG"));
    assert!(is_image_path("frame.jpeg"));
    assert!(!is_image_path("/dev/video0"));
    assert!(!is_image_path("notes.txt"));
}

#[tokio::test]
async fn test_image_file_opens_still_camera() {
    let path = temp_png("still");
    let config = CameraConfig::default().with_device(path.to_string_lossy());
    let mut camera = CameraSource::open(config).await.unwrap();
    assert_eq!(camera.kind(), "still");

    let frame = camera.recv().await.unwrap();
    assert_eq!((frame.width(), frame.height()), (4, 3));
    assert_eq!(frame.format, PixelFormat::Rgb8);
    assert_eq!(frame.rgb_at(0, 0), Some([10, 20, 30]));

    std::fs::remove_dir_all(path.parent().unwrap()).ok();
}

#[tokio::test]
async fn test_missing_image_file_fails() {
    let config = CameraConfig::default().with_device("/nonexistent/frame.png");
    assert!(CameraSource::open(config).await.is_err());
}

#[tokio::test]
async fn test_start_reports_model_failure() {
    let path = temp_png("pipeline");
    let config = ViewerConfig::from_vars(
        |name| match name {
            "MIRROR_FALLBACK_MODEL_PATH" => Some("/nonexistent/model.onnx".to_string()),
            _ => None,
        },
        vec![path.to_string_lossy().into_owned()].into_iter(),
    )
    .unwrap();

    let loading_model = Arc::new(AtomicBool::new(true));
    let error = start_pipeline(Preloader::new(), config, Arc::clone(&loading_model))
        .await
        .err()
        .unwrap();
    assert!(error.starts_with("pose model:"), "{error}");
    assert!(!loading_model.load(Ordering::Acquire));

    std::fs::remove_dir_all(path.parent().unwrap()).ok();
}
