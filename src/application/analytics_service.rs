// Analytics service - Faucet usage analysis and follow-up questions
use crate::application::advice_generator::AdviceGenerator;
use crate::application::prompt_synthesizer::{PromptContext, TemplateKind, synthesize};
use crate::application::usage_source::UsageSource;
use crate::domain::advice::{AdviceResponse, FaucetReport};
use crate::domain::error::AdviceError;
use crate::domain::insights::Insights;
use crate::domain::profile::FollowupQuestion;
use crate::domain::usage::{UsageAggregates, UsageRecord};
use std::sync::Arc;

#[derive(Clone)]
pub struct AnalyticsService {
    source: Arc<dyn UsageSource>,
    generator: Arc<dyn AdviceGenerator>,
}

impl AnalyticsService {
    pub fn new(source: Arc<dyn UsageSource>, generator: Arc<dyn AdviceGenerator>) -> Self {
        Self { source, generator }
    }

    /// Run the whole pipeline: ingest, aggregate, extract insights, ask for advice.
    /// Nothing is cached, so every call re-reads the data and re-issues the request.
    pub async fn analyze(&self) -> Result<FaucetReport, AdviceError> {
        let records = self.load_records().await?;
        tracing::debug!(records = records.len(), "Loaded usage records");

        let aggregates = UsageAggregates::from_records(&records);
        let insights = Insights::extract(&aggregates.faucets, &aggregates.hourly)?;
        tracing::debug!(
            max_faucet = %insights.max_faucet,
            peak_hour = %insights.peak_hour,
            total_usage = insights.total_usage,
            "Extracted usage insights"
        );

        let prompt = synthesize(
            TemplateKind::FaucetAnalysis,
            &PromptContext::from_insights(&insights),
        )?;
        let advice = self.generator.generate(prompt).await?;

        tracing::info!(
            faucets = aggregates.faucets.len(),
            hours = aggregates.hourly.len(),
            "Faucet analysis completed"
        );

        Ok(FaucetReport {
            faucet_totals: aggregates.faucets.to_chart(),
            hourly_totals: aggregates.hourly.to_chart(),
            insights,
            advice,
        })
    }

    /// Answer a free-form question. Blank text is rejected before any prompt is built.
    pub async fn ask(&self, question: &str) -> Result<AdviceResponse, AdviceError> {
        let question = FollowupQuestion::parse(question)?;
        let prompt = synthesize(
            TemplateKind::FollowupQuestion,
            &PromptContext::from_question(&question),
        )?;
        self.generator.generate(prompt).await
    }

    async fn load_records(&self) -> Result<Vec<UsageRecord>, AdviceError> {
        // CSV reads are blocking
        let source = self.source.clone();
        tokio::task::spawn_blocking(move || source.load())
            .await
            .map_err(|e| AdviceError::DataSource(format!("usage loader stopped: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::advice_generator::fake::FakeGenerator;
    use crate::domain::usage::record;

    struct MemorySource(Result<Vec<UsageRecord>, String>);

    impl UsageSource for MemorySource {
        fn load(&self) -> Result<Vec<UsageRecord>, AdviceError> {
            self.0.clone().map_err(AdviceError::DataSource)
        }
    }

    fn scenario() -> Vec<UsageRecord> {
        vec![
            record("Kitchen", "2024-05-01 08:00:00", 5.0),
            record("Kitchen", "2024-05-01 08:30:00", 3.0),
            record("Shower_1", "2024-05-01 19:00:00", 20.0),
        ]
    }

    fn service(
        records: Result<Vec<UsageRecord>, String>,
        generator: Arc<FakeGenerator>,
    ) -> AnalyticsService {
        AnalyticsService::new(Arc::new(MemorySource(records)), generator)
    }

    #[tokio::test]
    async fn test_analyze_builds_report() {
        let generator = Arc::new(FakeGenerator::replying("Take shorter showers."));
        let report = service(Ok(scenario()), generator.clone())
            .analyze()
            .await
            .unwrap();

        assert_eq!(report.insights.max_faucet, "Shower_1");
        assert_eq!(report.insights.peak_hour, "7 PM");
        assert_eq!(report.faucet_totals.len(), 2);
        assert_eq!(report.faucet_totals[0].label, "Kitchen Sink");
        assert_eq!(report.hourly_totals.len(), 2);
        assert_eq!(report.advice.as_str(), "Take shorter showers.");

        assert_eq!(generator.calls(), 1);
        assert!(generator.last_prompt().contains("Total water usage: 28.00 liters."));
    }

    #[tokio::test]
    async fn test_analyze_recomputes_on_every_call() {
        let generator = Arc::new(FakeGenerator::replying("ok"));
        let service = service(Ok(scenario()), generator.clone());
        service.analyze().await.unwrap();
        service.analyze().await.unwrap();
        assert_eq!(generator.calls(), 2);
    }

    #[tokio::test]
    async fn test_empty_data_never_reaches_generator() {
        let generator = Arc::new(FakeGenerator::replying("unused"));
        let result = service(Ok(vec![]), generator.clone()).analyze().await;
        assert!(matches!(result, Err(AdviceError::InsufficientData(_))));
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_source_failure_is_propagated() {
        let generator = Arc::new(FakeGenerator::replying("unused"));
        let result = service(Err("missing.csv".to_string()), generator.clone())
            .analyze()
            .await;
        assert!(matches!(result, Err(AdviceError::DataSource(_))));
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_generation_failure_is_propagated() {
        let generator = Arc::new(FakeGenerator::failing("quota exceeded"));
        let result = service(Ok(scenario()), generator).analyze().await;
        assert!(matches!(result, Err(AdviceError::GenerationService(_))));
    }

    #[tokio::test]
    async fn test_ask_rejects_blank_question() {
        let generator = Arc::new(FakeGenerator::replying("unused"));
        let result = service(Ok(vec![]), generator.clone()).ask("   ").await;
        assert!(matches!(result, Err(AdviceError::EmptyQuestion)));
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_ask_returns_answer_verbatim() {
        let generator = Arc::new(FakeGenerator::replying("**Yes**, fix the drip."));
        let answer = service(Ok(vec![]), generator.clone())
            .ask("Is a dripping tap a big deal?")
            .await
            .unwrap();
        assert_eq!(answer.as_str(), "**Yes**, fix the drip.");
        assert!(generator.last_prompt().contains("Is a dripping tap a big deal?"));
    }
}
