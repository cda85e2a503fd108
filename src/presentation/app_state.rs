// Application state for HTTP handlers
use crate::application::analytics_service::AnalyticsService;
use crate::application::profile_service::ProfileAdviceService;

#[derive(Clone)]
pub struct AppState {
    pub analytics_service: AnalyticsService,
    pub profile_service: ProfileAdviceService,
}
