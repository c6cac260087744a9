pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod mapper;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    application_service::ApplicationService, candidate_service::CandidateService,
    client_service::ClientService, user_service::UserService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub user_service: UserService,
    pub client_service: ClientService,
    pub candidate_service: CandidateService,
    pub application_service: ApplicationService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let user_service = UserService::new(pool.clone());
        let client_service = ClientService::new(pool.clone());
        let candidate_service = CandidateService::new(pool.clone());
        let application_service = ApplicationService::new(pool.clone());

        Self {
            pool,
            user_service,
            client_service,
            candidate_service,
            application_service,
        }
    }
}
