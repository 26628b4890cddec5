use {
    super::{LANDMARK_COUNT, Landmark, LetterboxInfo},
    crate::InferError,
    mirror_base::Vec2,
};

// x, y, z, visibility logit, presence logit
const VALUES_PER_LANDMARK: usize = 5;

pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Turn the raw `[1, 5·K]` landmark output into the first 33 landmarks,
/// normalized to the source image.
///
/// Model coordinates are in input pixels; they are un-letterboxed and
/// divided by the source width (x, z) or height (y).
pub fn decode_landmarks(
    raw: &[f32],
    letterbox: &LetterboxInfo,
    image_size: Vec2<usize>,
) -> Result<Vec<Landmark>, InferError> {
    if raw.len() < LANDMARK_COUNT * VALUES_PER_LANDMARK {
        return Err(InferError::Shape {
            expected: format!("at least {} values", LANDMARK_COUNT * VALUES_PER_LANDMARK),
            got: format!("{}", raw.len()),
        });
    }
    let (width, height) = (image_size.x as f32, image_size.y as f32);

    Ok(raw
        .chunks_exact(VALUES_PER_LANDMARK)
        .take(LANDMARK_COUNT)
        .enumerate()
        .map(|(id, values)| {
            let (x, y) = letterbox.unmap(values[0], values[1]);
            Landmark {
                id,
                x: x / width,
                y: y / height,
                z: values[2] / letterbox.scale / width,
                visibility: sigmoid(values[3]),
            }
        })
        .collect())
}

/// Exponential smoothing of positions toward the previous frame.
///
/// `weight` is the share of the previous frame, 0 keeps `current` as is.
/// Visibility is never smoothed.
pub fn smooth_landmarks(previous: &[Landmark], current: &mut [Landmark], weight: f32) {
    let weight = weight.clamp(0.0, 1.0);
    if weight == 0.0 {
        return;
    }
    for (cur, prev) in current.iter_mut().zip(previous) {
        cur.x = prev.x * weight + cur.x * (1.0 - weight);
        cur.y = prev.y * weight + cur.y * (1.0 - weight);
        cur.z = prev.z * weight + cur.z * (1.0 - weight);
    }
}
