// User profiles submitted through the advice forms
use super::error::AdviceError;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResidentialProfile {
    pub household_size: String,
    pub activity_frequency: String,
    #[serde(default)]
    pub practices: Vec<String>,
    pub motivation: String,
}

impl ResidentialProfile {
    /// Practices joined with ", ", duplicates dropped, first occurrence kept.
    pub fn practices_label(&self) -> String {
        let mut seen: Vec<&str> = Vec::with_capacity(self.practices.len());
        for practice in &self.practices {
            if !seen.contains(&practice.as_str()) {
                seen.push(practice);
            }
        }
        seen.join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FarmerProfile {
    pub crop_type: String,
    pub irrigation_method: String,
    pub soil_type: String,
    pub land_size_acres: f64,
    pub water_source: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl FarmerProfile {
    pub fn validate(&self) -> Result<(), AdviceError> {
        if !self.land_size_acres.is_finite() || self.land_size_acres < 0.0 {
            return Err(AdviceError::Schema(format!(
                "land size must be a non-negative number of acres, got {}",
                self.land_size_acres
            )));
        }
        Ok(())
    }

    /// Notes text, or "None" when absent or blank.
    pub fn notes_label(&self) -> &str {
        match self.notes.as_deref().map(str::trim) {
            Some(notes) if !notes.is_empty() => notes,
            _ => "None",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserProfile {
    Residential(ResidentialProfile),
    Farmer(FarmerProfile),
}

/// A follow-up question that is known to contain text.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowupQuestion(String);

impl FollowupQuestion {
    /// Accepts the question verbatim unless it is blank once trimmed.
    pub fn parse(text: &str) -> Result<Self, AdviceError> {
        if text.trim().is_empty() {
            return Err(AdviceError::EmptyQuestion);
        }
        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn farmer(land_size_acres: f64, notes: Option<&str>) -> FarmerProfile {
        FarmerProfile {
            crop_type: "Corn".to_string(),
            irrigation_method: "Drip".to_string(),
            soil_type: "Loamy".to_string(),
            land_size_acres,
            water_source: "Well".to_string(),
            notes: notes.map(str::to_string),
        }
    }

    #[test]
    fn test_practices_label() {
        let mut profile = ResidentialProfile {
            household_size: "3".to_string(),
            activity_frequency: "Daily".to_string(),
            practices: vec![],
            motivation: "Reducing bills".to_string(),
        };
        assert_eq!(profile.practices_label(), "");

        profile.practices = vec![
            "Faucet aerators".to_string(),
            "Reusing water".to_string(),
            "Faucet aerators".to_string(),
        ];
        assert_eq!(profile.practices_label(), "Faucet aerators, Reusing water");
    }

    #[test]
    fn test_farmer_land_size_bounds() {
        assert!(farmer(0.0, None).validate().is_ok());
        assert!(farmer(12.5, None).validate().is_ok());
        assert!(matches!(
            farmer(-1.0, None).validate(),
            Err(AdviceError::Schema(_))
        ));
        assert!(farmer(f64::NAN, None).validate().is_err());
    }

    #[test]
    fn test_notes_label() {
        assert_eq!(farmer(1.0, None).notes_label(), "None");
        assert_eq!(farmer(1.0, Some("  ")).notes_label(), "None");
        assert_eq!(farmer(1.0, Some("gophers")).notes_label(), "gophers");
    }

    #[test]
    fn test_followup_question_rejects_blank_text() {
        assert!(matches!(
            FollowupQuestion::parse(""),
            Err(AdviceError::EmptyQuestion)
        ));
        assert!(matches!(
            FollowupQuestion::parse(" \t\n "),
            Err(AdviceError::EmptyQuestion)
        ));

        let question = FollowupQuestion::parse("  Why is my shower so thirsty? ").unwrap();
        assert_eq!(question.as_str(), "  Why is my shower so thirsty? ");
    }

    #[test]
    fn test_profile_deserializes_without_optional_fields() {
        let json = r#"{"household_size":"2","activity_frequency":"Weekly","motivation":"Water scarcity"}"#;
        let profile: ResidentialProfile = serde_json::from_str(json).unwrap();
        assert!(profile.practices.is_empty());

        let json = r#"{"crop_type":"Rice","irrigation_method":"Flood","soil_type":"Clay","land_size_acres":0.0,"water_source":"River"}"#;
        let profile: FarmerProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.notes, None);
    }
}
