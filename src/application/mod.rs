// Application layer - Use cases and the seams to external collaborators
pub mod advice_generator;
pub mod analytics_service;
pub mod profile_service;
pub mod prompt_synthesizer;
pub mod usage_source;
