use {crate::InferError, mirror_base::Tensor, std::collections::HashMap};

/// A loaded model. Sessions move onto the blocking pool, hence `Send`.
pub trait Session: Send {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError>;
    fn input_names(&self) -> &[String];
    fn output_names(&self) -> &[String];
}
