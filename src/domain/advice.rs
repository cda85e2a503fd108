// Prompt and advice text passed between the synthesizer and the advice client
use super::insights::Insights;
use super::usage::{FaucetUsage, HourlyUsage};
use serde::Serialize;

/// Fully rendered prompt. Consumed by a single generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvicePrompt(String);

impl AdvicePrompt {
    pub fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Text returned by the generation service, unvalidated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AdviceResponse(String);

impl AdviceResponse {
    pub fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Drop markdown emphasis characters (`_`, `*`) and surrounding whitespace.
    pub fn strip_emphasis(self) -> Self {
        let cleaned: String = self.0.chars().filter(|c| !matches!(c, '_' | '*')).collect();
        Self(cleaned.trim().to_string())
    }
}

/// Everything the faucet analysis flow hands back to the shell.
#[derive(Debug, Clone, Serialize)]
pub struct FaucetReport {
    pub faucet_totals: Vec<FaucetUsage>,
    pub hourly_totals: Vec<HourlyUsage>,
    pub insights: Insights,
    pub advice: AdviceResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_emphasis() {
        let response = AdviceResponse::new(
            "\n**Install** low_flow heads to save *$12* a month.\n".to_string(),
        );
        assert_eq!(
            response.strip_emphasis().as_str(),
            "Install lowflow heads to save $12 a month."
        );
    }

    #[test]
    fn test_empty_response_is_kept() {
        let response = AdviceResponse::new(String::new());
        assert_eq!(response.strip_emphasis().as_str(), "");
    }
}
