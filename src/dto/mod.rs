pub mod application_dto;
pub mod auth_dto;
pub mod candidate_dto;
pub mod client_dto;
pub mod user_dto;
