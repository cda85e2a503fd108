// Generator trait for the external text-generation capability
use crate::domain::advice::{AdvicePrompt, AdviceResponse};
use crate::domain::error::AdviceError;
use async_trait::async_trait;

#[async_trait]
pub trait AdviceGenerator: Send + Sync {
    /// Model name used for generation
    fn model_name(&self) -> &str;

    /// Send the prompt as the sole user turn and return the first completion
    async fn generate(&self, prompt: AdvicePrompt) -> Result<AdviceResponse, AdviceError>;
}
