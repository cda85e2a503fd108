// Prompt synthesis - Fills fixed advice templates with computed or user-supplied values
use crate::domain::advice::AdvicePrompt;
use crate::domain::error::AdviceError;
use crate::domain::insights::Insights;
use crate::domain::profile::{FarmerProfile, FollowupQuestion, ResidentialProfile, UserProfile};
use std::collections::HashMap;

/// Fixed regional context appended to every farmer prompt.
pub const REGIONAL_RAINFALL: &str = "Average Rainfall in San Jose, California: 15.82 inches annually";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    FaucetAnalysis,
    ResidentialProfile,
    FarmerProfile,
    FollowupQuestion,
}

impl TemplateKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FaucetAnalysis => "faucet_analysis",
            Self::ResidentialProfile => "residential_profile",
            Self::FarmerProfile => "farmer_profile",
            Self::FollowupQuestion => "followup_question",
        }
    }

    fn template(&self) -> &'static str {
        match self {
            Self::FaucetAnalysis => FAUCET_ANALYSIS_PROMPT,
            Self::ResidentialProfile => RESIDENTIAL_PROFILE_PROMPT,
            Self::FarmerProfile => FARMER_PROFILE_PROMPT,
            Self::FollowupQuestion => FOLLOWUP_QUESTION_PROMPT,
        }
    }

    /// Placeholder names in order of first appearance.
    pub fn placeholders(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut rest = self.template();
        while let Some(start) = rest.find("${") {
            let after = &rest[start + 2..];
            let Some(end) = after.find('}') else { break };
            let name = &after[..end];
            if !names.contains(&name) {
                names.push(name);
            }
            rest = &after[end + 1..];
        }
        names
    }
}

/// Named values substituted into a template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromptContext {
    values: HashMap<String, String>,
}

impl PromptContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn from_insights(insights: &Insights) -> Self {
        Self::new()
            .with("total_usage", format!("{:.2}", insights.total_usage))
            .with("max_faucet", insights.max_faucet.clone())
            .with("max_faucet_usage", format!("{:.0}", insights.max_faucet_usage))
            .with("peak_hour", insights.peak_hour.clone())
            .with("peak_hour_usage", format!("{:.0}", insights.peak_hour_usage))
    }

    pub fn from_residential(profile: &ResidentialProfile) -> Self {
        Self::new()
            .with("household_size", profile.household_size.clone())
            .with("activity_frequency", profile.activity_frequency.clone())
            .with("practices", profile.practices_label())
            .with("motivation", profile.motivation.clone())
    }

    pub fn from_farmer(profile: &FarmerProfile) -> Self {
        Self::new()
            .with("crop_type", profile.crop_type.clone())
            .with("irrigation_method", profile.irrigation_method.clone())
            .with("soil_type", profile.soil_type.clone())
            .with("land_size", format!("{:.1}", profile.land_size_acres))
            .with("water_source", profile.water_source.clone())
            .with("notes", profile.notes_label())
            .with("rainfall", REGIONAL_RAINFALL)
    }

    pub fn from_question(question: &FollowupQuestion) -> Self {
        Self::new().with("question", question.as_str())
    }
}

/// Render a template. Fails if any of its placeholders has no value.
pub fn synthesize(kind: TemplateKind, context: &PromptContext) -> Result<AdvicePrompt, AdviceError> {
    let placeholders = kind.placeholders();
    let missing: Vec<String> = placeholders
        .iter()
        .filter(|name| context.get(name).is_none())
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(AdviceError::MissingContext {
            template: kind.name(),
            missing,
        });
    }

    // Single pass, so substituted user text is never itself expanded.
    let template = kind.template();
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            result.push_str(&rest[start..]);
            rest = "";
            break;
        };
        result.push_str(context.get(&after[..end]).unwrap_or_default());
        rest = &after[end + 1..];
    }
    result.push_str(rest);
    Ok(AdvicePrompt::new(result))
}

/// Render the template matching a submitted profile.
pub fn synthesize_profile(profile: &UserProfile) -> Result<AdvicePrompt, AdviceError> {
    match profile {
        UserProfile::Residential(p) => synthesize(
            TemplateKind::ResidentialProfile,
            &PromptContext::from_residential(p),
        ),
        UserProfile::Farmer(p) => {
            synthesize(TemplateKind::FarmerProfile, &PromptContext::from_farmer(p))
        }
    }
}

const FAUCET_ANALYSIS_PROMPT: &str = r#"Based on the user's water usage data:
- Total water usage: ${total_usage} liters.
- The faucet or machine with the highest water usage is '${max_faucet}', using ${max_faucet_usage} liters.
- The peak water usage hour is ${peak_hour}, with around ${peak_hour_usage} liters used.

Please provide actionable advice addressing all water usage areas. Highlight the overuse of '${max_faucet}' but also provide suggestions for improving efficiency across all faucets. The response should be holistic, covering potential overuse, general conservation tips, and addressing peak usage patterns. Avoid overly focusing on a single faucet. Write the advice as a short, conversational paragraph.
"#;

const RESIDENTIAL_PROFILE_PROMPT: &str = r#"User Details:
- Household Size: ${household_size}
- Water-Intensive Activities: ${activity_frequency}
- Water-Saving Practices: ${practices}
- Motivation: ${motivation}

Provide concise, actionable advice tailored to their motivation and water usage. Alongside the advice, give simple statistics showing how much water and money these changes could save, including actual dollar amounts saved on the water bill each month or year. The user may not be technical, so keep it clear and simple. Weave the statistics into the advice instead of putting them in a separate section, and briefly explain what each figure means in everyday terms, since gallons or liters may not mean much to the reader.
"#;

const FARMER_PROFILE_PROMPT: &str = r#"The farmer has provided the following details:
- Crop Type: ${crop_type}
- Irrigation Method: ${irrigation_method}
- Soil Type: ${soil_type}
- Land Size: ${land_size} acres
- Primary Water Source: ${water_source}
- Additional Notes: ${notes}
- ${rainfall}

The user is the farmer, so address the response to them directly.

Based on these details, provide advice on the following:
1. Optimal water usage and irrigation practices tailored to their crop type, soil type, and irrigation method.
2. Expected water requirements for the specified land size.
3. Suggestions to conserve water based on their water source and other provided details.
Ensure that the advice is simple and actionable for a non-technical farmer.
"#;

const FOLLOWUP_QUESTION_PROMPT: &str = r#"The user asked the following question based on their water usage data: ${question}.
Please provide a clear and concise response to address their query. Avoid technical jargon and explain in simple terms.
"#;
