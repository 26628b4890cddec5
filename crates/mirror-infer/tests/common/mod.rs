use mirror_base::{Tensor, Vec2};
use mirror_image::{Image, PixelFormat};
use mirror_infer::{InferError, Session};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

/// Outputs the fake session will report on its next run. Shared so tests
/// can move the pose between frames.
#[derive(Clone)]
pub struct FakeScript(Arc<Mutex<(Vec<f32>, f32)>>);

impl FakeScript {
    pub fn set(&self, at: (f32, f32, f32), visibility_logit: f32, presence: f32) {
        *self.0.lock().unwrap() = (uniform_landmarks(at, visibility_logit), presence);
    }
}

fn uniform_landmarks(at: (f32, f32, f32), visibility_logit: f32) -> Vec<f32> {
    (0..39)
        .flat_map(|_| [at.0, at.1, at.2, visibility_logit, 5.0])
        .collect()
}

/// Session that answers every run with scripted landmark/presence outputs.
pub struct FakeSession {
    pub input_names: Vec<String>,
    pub output_names: Vec<String>,
    pub script: FakeScript,
    pub last_input_shape: Arc<Mutex<Option<Vec<usize>>>>,
}

impl FakeSession {
    /// 39 landmarks, all at model-input pixel `at` with the given logits.
    pub fn uniform(at: (f32, f32, f32), visibility_logit: f32, presence: f32) -> Self {
        Self {
            input_names: vec!["input_1".to_string()],
            output_names: vec![
                "Identity".to_string(),
                "Identity_1".to_string(),
                "Identity_4".to_string(),
            ],
            script: FakeScript(Arc::new(Mutex::new((
                uniform_landmarks(at, visibility_logit),
                presence,
            )))),
            last_input_shape: Arc::new(Mutex::new(None)),
        }
    }
}

impl Session for FakeSession {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError> {
        let (name, input) = &inputs[0];
        if !self.input_names.iter().any(|n| n == name) {
            return Err(InferError::InvalidInput {
                name: name.to_string(),
                expected_names: self.input_names.clone(),
            });
        }
        *self.last_input_shape.lock().unwrap() = Some(input.shape.clone());

        let (landmarks, presence) = self.script.0.lock().unwrap().clone();
        let mut outputs = HashMap::new();
        outputs.insert(
            "Identity".to_string(),
            Tensor::new(vec![1, landmarks.len()], landmarks)?,
        );
        outputs.insert(
            "Identity_1".to_string(),
            Tensor::new(vec![1, 1], vec![presence])?,
        );
        // world landmarks, 3 per point, must not be mistaken for the main output
        outputs.insert("Identity_4".to_string(), Tensor::zeros(vec![1, 117])?);
        Ok(outputs)
    }

    fn input_names(&self) -> &[String] {
        &self.input_names
    }

    fn output_names(&self) -> &[String] {
        &self.output_names
    }
}

pub fn rgb_image(width: usize, height: usize) -> Image {
    Image::new(
        Vec2::new(width, height),
        vec![128; width * height * 3],
        PixelFormat::Rgb8,
    )
    .unwrap()
}
