pub mod application_routes;
pub mod auth;
pub mod candidate_routes;
pub mod client_routes;
pub mod export;
pub mod health;
pub mod upload;
pub mod user_routes;
