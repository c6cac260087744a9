pub mod application_service;
pub mod candidate_service;
pub mod client_service;
pub mod export_service;
pub mod user_service;
