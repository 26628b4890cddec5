use {
    crate::{CameraSource, ViewerConfig},
    mirror_infer::{
        Device, InferError, ModelSource, OnnxBackend, PoseLandmarker, PoseLandmarkerOptions,
        Preloader,
    },
    std::{
        path::PathBuf,
        sync::{
            Arc,
            atomic::{AtomicBool, Ordering},
        },
    },
    tokio::sync::Mutex,
};

/// A running camera plus the model that consumes its frames.
pub struct Pipeline {
    pub camera: CameraSource,
    pub landmarker: Arc<Mutex<PoseLandmarker>>,
}

/// Blocking loader for a pose landmarker on `device`.
pub fn landmarker_loader(
    path: PathBuf,
    device: Device,
) -> impl FnOnce() -> Result<PoseLandmarker, InferError> + Send + 'static {
    move || {
        log::info!("Loading pose model {} on {device}", path.display());
        let backend = OnnxBackend::new(device);
        PoseLandmarker::load(
            ModelSource::File(path),
            &backend,
            PoseLandmarkerOptions::default(),
        )
    }
}

/// Acquire the model and open the camera concurrently.
///
/// `loading_model` is cleared once a model is in hand, whether it was the
/// preloaded one or the fallback loaded here.
///
/// # Errors
///
/// Errors come back as display strings, ready for the status line.
pub async fn start_pipeline(
    preloader: Preloader<PoseLandmarker>,
    config: ViewerConfig,
    loading_model: Arc<AtomicBool>,
) -> Result<Pipeline, String> {
    let fallback = landmarker_loader(config.fallback_model_path.clone(), config.device.clone());
    let acquire = async {
        loading_model.store(true, Ordering::Release);
        let landmarker = preloader.acquire(fallback).await;
        loading_model.store(false, Ordering::Release);
        landmarker
    };
    let (landmarker, camera) = tokio::join!(acquire, CameraSource::open(config.camera_config()));
    let landmarker = landmarker.map_err(|e| format!("pose model: {e}"))?;
    let camera = camera.map_err(|e| format!("camera {}: {e}", config.camera))?;

    // stale smoothing and timestamps from a previous run
    landmarker.lock().await.reset();
    log::info!("Pipeline started with {} camera", camera.kind());
    Ok(Pipeline { camera, landmarker })
}
