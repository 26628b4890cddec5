#![allow(dead_code)]

use {
    mirror_base::Tensor,
    mirror_infer::{InferError, PoseLandmarker, PoseLandmarkerOptions, Session},
    pose_viewer::ViewerConfig,
    std::{collections::HashMap, path::PathBuf},
};

/// Session reporting a full-confidence pose with every landmark at the
/// centre of the model input.
pub struct CentredPose {
    input_names: Vec<String>,
    output_names: Vec<String>,
}

impl Default for CentredPose {
    fn default() -> Self {
        Self {
            input_names: vec!["input_1".to_string()],
            output_names: vec!["Identity".to_string(), "Identity_1".to_string()],
        }
    }
}

impl Session for CentredPose {
    fn run(
        &mut self,
        _inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError> {
        let landmarks: Vec<f32> = (0..39)
            .flat_map(|_| [128.0, 128.0, 0.0, 5.0, 5.0])
            .collect();
        let mut outputs = HashMap::new();
        outputs.insert(
            "Identity".to_string(),
            Tensor::new(vec![1, landmarks.len()], landmarks)?,
        );
        outputs.insert("Identity_1".to_string(), Tensor::new(vec![1, 1], vec![0.9])?);
        Ok(outputs)
    }

    fn input_names(&self) -> &[String] {
        &self.input_names
    }

    fn output_names(&self) -> &[String] {
        &self.output_names
    }
}

pub fn fake_landmarker() -> Result<PoseLandmarker, InferError> {
    Ok(PoseLandmarker::new(
        Box::new(CentredPose::default()),
        PoseLandmarkerOptions::default(),
    ))
}

/// Write a small PNG into a fresh temp directory and return its path.
pub fn temp_png(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pose-viewer-{}-{name}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("frame.png");
    crates_image::RgbImage::from_pixel(64, 48, crates_image::Rgb([10, 20, 30]))
        .save(&path)
        .unwrap();
    path
}

pub fn remove_temp(path: &PathBuf) {
    if let Some(dir) = path.parent() {
        std::fs::remove_dir_all(dir).ok();
    }
}

/// Viewer config reading frames from `camera`, with no usable model files.
pub fn config_for(camera: &str) -> ViewerConfig {
    ViewerConfig::from_vars(
        |name| match name {
            "MIRROR_MODEL_PATH" | "MIRROR_FALLBACK_MODEL_PATH" => {
                Some("/nonexistent/model.onnx".to_string())
            }
            _ => None,
        },
        vec![camera.to_string()].into_iter(),
    )
    .unwrap()
}
