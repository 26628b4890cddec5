use {crate::InferError, std::fmt, std::str::FromStr};

#[derive(Debug, Clone, PartialEq)]
pub enum Device {
    Cpu,
    Cuda { device_id: i32 },
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "CPU"),
            Device::Cuda { device_id } => write!(f, "CUDA(device_id={device_id})"),
        }
    }
}

/// Parses `cpu`, `cuda` or `cuda:N`.
impl FromStr for Device {
    type Err = InferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.split_once(':') {
            None if lower == "cpu" => Ok(Device::Cpu),
            None if lower == "cuda" => Ok(Device::Cuda { device_id: 0 }),
            Some(("cuda", id)) => id
                .parse()
                .map(|device_id| Device::Cuda { device_id })
                .map_err(|_| InferError::Backend(format!("invalid CUDA device id: {id}"))),
            _ => Err(InferError::Backend(format!("unknown device: {s}"))),
        }
    }
}
