pub mod engagement_service;
pub mod overview_service;
pub mod trial_filter_service;
pub mod trial_status_service;
