use {
    super::{Landmark, PoseData, decode_landmarks, preprocess, sigmoid, smooth_landmarks},
    crate::{Backend, InferError, ModelSource, Session},
    mirror_base::Tensor,
    mirror_image::{Image, PixelFormat},
    std::{collections::HashMap, time::Duration},
};

/// Tuning for `PoseLandmarker`. Defaults: 256px input, presence 0.5,
/// smoothing 0.5.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseLandmarkerOptions {
    input_size: usize,
    min_pose_presence: f32,
    smoothing: f32,
}

impl Default for PoseLandmarkerOptions {
    fn default() -> Self {
        Self {
            input_size: 256,
            min_pose_presence: 0.5,
            smoothing: 0.5,
        }
    }
}

impl PoseLandmarkerOptions {
    /// Side of the square model input in pixels.
    pub fn with_input_size(mut self, input_size: usize) -> Self {
        self.input_size = input_size;
        self
    }

    /// Frames whose pose presence is below this report no pose.
    pub fn with_min_pose_presence(mut self, min_pose_presence: f32) -> Self {
        self.min_pose_presence = min_pose_presence;
        self
    }

    /// Weight of the previous frame in video mode, in [0, 1). 0 disables.
    pub fn with_smoothing(mut self, smoothing: f32) -> Self {
        self.smoothing = smoothing.clamp(0.0, 1.0);
        self
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn min_pose_presence(&self) -> f32 {
        self.min_pose_presence
    }

    pub fn smoothing(&self) -> f32 {
        self.smoothing
    }
}

/// Single-pose landmark model.
///
/// `detect` treats every image independently. `detect_for_video` expects
/// frames of one stream with strictly increasing timestamps and smooths
/// landmarks between consecutive detections.
pub struct PoseLandmarker {
    session: Box<dyn Session>,
    options: PoseLandmarkerOptions,
    last_timestamp: Option<Duration>,
    previous: Option<Vec<Landmark>>,
}

impl PoseLandmarker {
    /// Wrap an already loaded session.
    pub fn new(session: Box<dyn Session>, options: PoseLandmarkerOptions) -> Self {
        Self {
            session,
            options,
            last_timestamp: None,
            previous: None,
        }
    }

    /// Load `model` through `backend`.
    ///
    /// # Errors
    ///
    /// Whatever the backend reports, usually `InferError::ModelLoad` for a
    /// missing or malformed model file.
    pub fn load(
        model: ModelSource,
        backend: &dyn Backend,
        options: PoseLandmarkerOptions,
    ) -> Result<Self, InferError> {
        let session = backend.load_model(model)?;
        log::info!(
            "Pose landmarker ready on {} backend ({}px input)",
            backend.name(),
            options.input_size
        );
        Ok(Self::new(session, options))
    }

    pub fn options(&self) -> &PoseLandmarkerOptions {
        &self.options
    }

    /// Detect the pose in a single image. No smoothing, no timestamp.
    ///
    /// Returns `Ok(None)` when pose presence is below the threshold.
    ///
    /// # Errors
    ///
    /// `InferError::Image` for images that cannot be converted to RGB, and
    /// `InferError::Shape` when the model produces no landmark output.
    pub fn detect(&mut self, image: &Image) -> Result<Option<PoseData>, InferError> {
        Ok(self
            .infer(image)?
            .map(|landmarks| PoseData::new(landmarks, None)))
    }

    /// Detect the pose in the next frame of a stream, `timestamp` after the
    /// stream started.
    ///
    /// # Errors
    ///
    /// `InferError::Timestamp` when `timestamp` is not after the previous
    /// one, otherwise as [`PoseLandmarker::detect`].
    pub fn detect_for_video(
        &mut self,
        image: &Image,
        timestamp: Duration,
    ) -> Result<Option<PoseData>, InferError> {
        if let Some(previous) = self.last_timestamp {
            if timestamp <= previous {
                return Err(InferError::Timestamp {
                    previous,
                    got: timestamp,
                });
            }
        }
        self.last_timestamp = Some(timestamp);

        // a lost pose ends the smoothing run
        let Some(mut landmarks) = self.infer(image)? else {
            self.previous = None;
            return Ok(None);
        };
        if let Some(previous) = &self.previous {
            smooth_landmarks(previous, &mut landmarks, self.options.smoothing);
        }
        self.previous = Some(landmarks.clone());

        Ok(Some(PoseData::new(
            landmarks,
            Some(timestamp.as_secs_f64() * 1000.0),
        )))
    }

    /// Forget the video stream state, so timestamps may start over.
    pub fn reset(&mut self) {
        self.last_timestamp = None;
        self.previous = None;
    }

    fn infer(&mut self, image: &Image) -> Result<Option<Vec<Landmark>>, InferError> {
        let converted;
        let image = if image.format == PixelFormat::Rgb8 {
            image
        } else {
            converted = image.to_rgb()?;
            &converted
        };

        // letterbox into the square input, then run
        let (input, letterbox) = preprocess(image, self.options.input_size)?;
        let input_name = self
            .session
            .input_names()
            .first()
            .cloned()
            .ok_or_else(|| InferError::Backend("model has no inputs".to_string()))?;
        let outputs = self.session.run(&[(input_name.as_str(), input)])?;

        let (landmarks, presence) = split_outputs(&outputs)?;
        if presence < self.options.min_pose_presence {
            log::trace!("Pose presence {presence:.2} below threshold");
            return Ok(None);
        }
        // back to normalized coordinates of the original image
        decode_landmarks(&landmarks.data, &letterbox, image.size).map(Some)
    }
}

// Outputs are told apart by size: the landmark tensor is [1, 5·K] with
// K >= 33, the presence flag has a single element. Presence is a probability
// unless it falls outside [0, 1], in which case it is treated as a logit.
fn split_outputs(outputs: &HashMap<String, Tensor<f32>>) -> Result<(&Tensor<f32>, f32), InferError> {
    let landmarks = outputs
        .values()
        .filter(|t| t.ndim() == 2 && t.shape[0] == 1 && t.len() % 5 == 0 && t.len() >= 5 * 33)
        .min_by_key(|t| t.len())
        .ok_or_else(|| InferError::Shape {
            expected: "landmark output [1, 5*K] with K >= 33".to_string(),
            got: format!(
                "{:?}",
                outputs.iter().map(|(n, t)| (n, &t.shape)).collect::<Vec<_>>()
            ),
        })?;

    let presence = outputs
        .values()
        .find(|t| t.len() == 1)
        .map(|t| t.data[0])
        .map(|p| if (0.0..=1.0).contains(&p) { p } else { sigmoid(p) })
        .unwrap_or(1.0);

    Ok((landmarks, presence))
}
