use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::service::{
    auth::{blacklist::TokenBlacklist, TokenKeys},
    image::ImageStorage,
};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub tokens: Arc<TokenKeys>,
    pub blacklist: Arc<dyn TokenBlacklist>,
    pub images: Arc<dyn ImageStorage>,
}
