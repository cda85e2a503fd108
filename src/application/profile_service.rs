// Profile advice service - Residential and farmer questionnaires
use crate::application::advice_generator::AdviceGenerator;
use crate::application::prompt_synthesizer::synthesize_profile;
use crate::domain::advice::AdviceResponse;
use crate::domain::error::AdviceError;
use crate::domain::profile::{FarmerProfile, ResidentialProfile, UserProfile};
use std::sync::Arc;

#[derive(Clone)]
pub struct ProfileAdviceService {
    generator: Arc<dyn AdviceGenerator>,
}

impl ProfileAdviceService {
    pub fn new(generator: Arc<dyn AdviceGenerator>) -> Self {
        Self { generator }
    }

    pub async fn residential_advice(
        &self,
        profile: ResidentialProfile,
    ) -> Result<AdviceResponse, AdviceError> {
        self.advise(UserProfile::Residential(profile)).await
    }

    pub async fn farmer_advice(&self, profile: FarmerProfile) -> Result<AdviceResponse, AdviceError> {
        self.advise(UserProfile::Farmer(profile)).await
    }

    /// Consumes the profile. Residential advice has emphasis markup stripped.
    pub async fn advise(&self, profile: UserProfile) -> Result<AdviceResponse, AdviceError> {
        if let UserProfile::Farmer(farmer) = &profile {
            farmer.validate()?;
        }

        let prompt = synthesize_profile(&profile)?;
        tracing::debug!(
            model = %self.generator.model_name(),
            prompt_length = prompt.as_str().len(),
            "Requesting profile advice"
        );
        let advice = self.generator.generate(prompt).await?;

        Ok(match profile {
            UserProfile::Residential(_) => advice.strip_emphasis(),
            UserProfile::Farmer(_) => advice,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::advice_generator::fake::FakeGenerator;

    fn residential() -> ResidentialProfile {
        ResidentialProfile {
            household_size: "5+".to_string(),
            activity_frequency: "Daily".to_string(),
            practices: vec!["None".to_string()],
            motivation: "Environmental concern".to_string(),
        }
    }

    fn farmer(land_size_acres: f64) -> FarmerProfile {
        FarmerProfile {
            crop_type: "Soybeans".to_string(),
            irrigation_method: "Furrow".to_string(),
            soil_type: "Silty".to_string(),
            land_size_acres,
            water_source: "Rainwater Harvesting".to_string(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_residential_advice_is_stripped() {
        let generator = Arc::new(FakeGenerator::replying("  **Save** _$15_ a month.  "));
        let service = ProfileAdviceService::new(generator.clone());
        let advice = service.residential_advice(residential()).await.unwrap();

        assert_eq!(advice.as_str(), "Save $15 a month.");
        assert!(generator.last_prompt().contains("- Household Size: 5+"));
    }

    #[tokio::test]
    async fn test_farmer_advice_is_verbatim() {
        let generator = Arc::new(FakeGenerator::replying("**Use** drip_lines."));
        let service = ProfileAdviceService::new(generator.clone());
        let advice = service.farmer_advice(farmer(0.0)).await.unwrap();

        assert_eq!(advice.as_str(), "**Use** drip_lines.");
        assert!(generator.last_prompt().contains("- Land Size: 0.0 acres"));
    }

    #[tokio::test]
    async fn test_negative_land_size_is_rejected() {
        let generator = Arc::new(FakeGenerator::replying("unused"));
        let service = ProfileAdviceService::new(generator.clone());
        let result = service.farmer_advice(farmer(-2.0)).await;

        assert!(matches!(result, Err(AdviceError::Schema(_))));
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_generation_failure_is_returned() {
        let generator = Arc::new(FakeGenerator::failing("connection reset"));
        let service = ProfileAdviceService::new(generator);
        let result = service.residential_advice(residential()).await;
        assert!(matches!(result, Err(AdviceError::GenerationService(_))));
    }
}
