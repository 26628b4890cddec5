use {
    crate::{Backend, Device, InferError, ModelSource, Session},
    mirror_base::Tensor,
    ndarray::{ArrayD, ArrayViewD},
    ort::{session::Session as OrtSession, value::TensorRef},
    std::collections::HashMap,
};

/// ONNX Runtime backend pinned to one execution device.
pub struct OnnxBackend {
    device: Device,
}

impl OnnxBackend {
    pub fn new(device: Device) -> Self {
        Self { device }
    }

    pub fn device(&self) -> &Device {
        &self.device
    }
}

impl Backend for OnnxBackend {
    fn name(&self) -> &str {
        "onnx"
    }

    fn load_model(&self, model: ModelSource) -> Result<Box<dyn Session>, InferError> {
        let device = &self.device;
        let mut builder = OrtSession::builder()
            .map_err(|e| InferError::Backend(format!("failed to create session builder: {e}")))?;

        builder = match device {
            Device::Cpu => {
                log::info!("Using CPU execution provider");
                builder
            }
            #[cfg(feature = "cuda")]
            Device::Cuda { device_id } => {
                use ort::execution_providers::{CUDAExecutionProvider, ExecutionProvider};
                let ep = CUDAExecutionProvider::default().with_device_id(*device_id);
                let available = ep.is_available().unwrap_or(false);
                log::info!("CUDA EP requested (device_id={device_id}), available: {available}");
                builder
                    .with_execution_providers([ep.build()])
                    .map_err(|_| InferError::UnsupportedDevice(device.clone()))?
            }
            #[cfg(not(feature = "cuda"))]
            Device::Cuda { .. } => {
                return Err(InferError::UnsupportedDevice(device.clone()));
            }
        };

        log::debug!("Loading model {model:?}");
        let session = match model {
            ModelSource::File(path) => builder.commit_from_file(&path).map_err(|e| {
                InferError::ModelLoad(format!("failed to load {}: {e}", path.display()))
            })?,
            ModelSource::Memory(bytes) => builder.commit_from_memory(&bytes).map_err(|e| {
                InferError::ModelLoad(format!("failed to load model from memory: {e}"))
            })?,
        };

        let input_names: Vec<String> = session.inputs.iter().map(|i| i.name.clone()).collect();
        let output_names: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();
        log::debug!("Model inputs {input_names:?}, outputs {output_names:?}");

        Ok(Box::new(OnnxSession {
            session,
            input_names,
            output_names,
        }))
    }
}

pub struct OnnxSession {
    session: OrtSession,
    input_names: Vec<String>,
    output_names: Vec<String>,
}

impl Session for OnnxSession {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError> {
        for (name, _) in inputs {
            if !self.input_names.iter().any(|n| n == name) {
                return Err(InferError::InvalidInput {
                    name: name.to_string(),
                    expected_names: self.input_names.clone(),
                });
            }
        }

        let arrays = inputs
            .iter()
            .map(|(_, tensor)| tensor_to_ndarray(tensor.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        let mut session_inputs = Vec::with_capacity(arrays.len());
        for ((name, _), array) in inputs.iter().zip(&arrays) {
            let tensor_ref = TensorRef::from_array_view(array.view()).map_err(|e| {
                InferError::Backend(format!("failed to create tensor ref for '{name}': {e}"))
            })?;
            session_inputs.push((*name, tensor_ref));
        }

        let outputs = self
            .session
            .run(session_inputs)
            .map_err(|e| InferError::Backend(format!("inference failed: {e}")))?;

        let mut result = HashMap::new();
        for output_name in &self.output_names {
            let value = outputs
                .get(output_name.as_str())
                .ok_or_else(|| InferError::Backend(format!("missing output '{output_name}'")))?;
            let array = value.try_extract_array::<f32>().map_err(|e| {
                InferError::Backend(format!("output '{output_name}' is not f32: {e}"))
            })?;
            result.insert(output_name.clone(), ndarray_to_tensor(array)?);
        }

        Ok(result)
    }

    fn input_names(&self) -> &[String] {
        &self.input_names
    }

    fn output_names(&self) -> &[String] {
        &self.output_names
    }
}

pub fn tensor_to_ndarray(tensor: Tensor<f32>) -> Result<ArrayD<f32>, InferError> {
    ArrayD::from_shape_vec(tensor.shape, tensor.data)
        .map_err(|e| InferError::Backend(format!("failed to create ndarray from tensor: {e}")))
}

pub fn ndarray_to_tensor(array: ArrayViewD<'_, f32>) -> Result<Tensor<f32>, InferError> {
    let shape = array.shape().to_vec();
    let data = array.iter().copied().collect();
    Ok(Tensor::new(shape, data)?)
}
