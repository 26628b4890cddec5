use {mirror_infer::JointAngles, std::fmt};

/// What the viewer is doing, shown in the window title.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Preparing,
    LoadingModel,
    StartingCamera,
    Connected,
    Stopped,
    Error(String),
}

impl Status {
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            Status::Preparing | Status::LoadingModel | Status::StartingCamera
        )
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Preparing => write!(f, "Preparing..."),
            Status::LoadingModel => write!(f, "Loading pose model..."),
            Status::StartingCamera => write!(f, "Starting camera..."),
            Status::Connected => write!(f, "Connected"),
            Status::Stopped => write!(f, "Stopped (Space to start)"),
            Status::Error(msg) => write!(f, "Error: {msg} (R to retry)"),
        }
    }
}

pub fn window_title(status: &Status, angles: Option<&JointAngles>) -> String {
    let mut title = format!("Pose Mirror - {status}");
    if let Some(angles) = angles {
        for (label, degrees) in angles.entries() {
            title.push_str(&format!(" | {label} {degrees}\u{b0}"));
        }
    }
    title
}
