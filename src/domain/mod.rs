// Domain layer - Usage data, insights, profiles and advice text
pub mod advice;
pub mod error;
pub mod insights;
pub mod profile;
pub mod usage;
