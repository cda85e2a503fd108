// Page navigation owned by the shell. The core only ever sees the active flow.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Home,
    ResidentialAdvice,
    AnalyzeFaucetData,
    FarmerWaterUsage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    EverydayWaterUser,
    AgriculturalProducer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NavAction {
    /// Role picked on the home page
    SubmitRole { role: Role },
    Back,
    /// Direct jump from the sidebar
    Select { page: Page },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flow {
    Residential,
    FaucetAnalysis,
    Farmer,
}

impl Page {
    pub fn apply(self, action: NavAction) -> Page {
        match (self, action) {
            (Page::Home, NavAction::SubmitRole { role }) => match role {
                Role::EverydayWaterUser => Page::ResidentialAdvice,
                Role::AgriculturalProducer => Page::FarmerWaterUsage,
            },
            // Role choice only exists on the home page
            (page, NavAction::SubmitRole { .. }) => page,
            (_, NavAction::Back) => Page::Home,
            (_, NavAction::Select { page }) => page,
        }
    }

    pub fn flow(self) -> Option<Flow> {
        match self {
            Page::Home => None,
            Page::ResidentialAdvice => Some(Flow::Residential),
            Page::AnalyzeFaucetData => Some(Flow::FaucetAnalysis),
            Page::FarmerWaterUsage => Some(Flow::Farmer),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::ResidentialAdvice => "Residential Advice",
            Page::AnalyzeFaucetData => "Analyze Faucet Data",
            Page::FarmerWaterUsage => "Farmer's Water Usage",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_submit_from_home() {
        let page = Page::Home.apply(NavAction::SubmitRole {
            role: Role::EverydayWaterUser,
        });
        assert_eq!(page, Page::ResidentialAdvice);
        assert_eq!(page.flow(), Some(Flow::Residential));

        let page = Page::Home.apply(NavAction::SubmitRole {
            role: Role::AgriculturalProducer,
        });
        assert_eq!(page, Page::FarmerWaterUsage);
        assert_eq!(page.flow(), Some(Flow::Farmer));
    }

    #[test]
    fn test_role_submit_elsewhere_is_ignored() {
        let page = Page::AnalyzeFaucetData.apply(NavAction::SubmitRole {
            role: Role::AgriculturalProducer,
        });
        assert_eq!(page, Page::AnalyzeFaucetData);
    }

    #[test]
    fn test_back_and_select() {
        assert_eq!(Page::FarmerWaterUsage.apply(NavAction::Back), Page::Home);
        assert_eq!(Page::Home.flow(), None);

        let page = Page::ResidentialAdvice.apply(NavAction::Select {
            page: Page::AnalyzeFaucetData,
        });
        assert_eq!(page.flow(), Some(Flow::FaucetAnalysis));
        assert_eq!(page.title(), "Analyze Faucet Data");
    }

    #[test]
    fn test_action_json() {
        let action: NavAction =
            serde_json::from_str(r#"{"type":"submit_role","role":"agricultural_producer"}"#).unwrap();
        assert_eq!(
            action,
            NavAction::SubmitRole {
                role: Role::AgriculturalProducer
            }
        );
        let action: NavAction = serde_json::from_str(r#"{"type":"back"}"#).unwrap();
        assert_eq!(action, NavAction::Back);
    }
}
