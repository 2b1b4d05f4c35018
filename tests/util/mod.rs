//! Helpers for building application state and caller identities in integration tests

use std::sync::Arc;

use orrery::server::{
    model::{app::AppState, auth::Identity, db::UserModel},
    service::{
        auth::{blacklist::MemoryTokenBlacklist, AuthService, TokenKeys},
        image::LocalImageStorage,
    },
};
use orrery_test_utils::TestContext;

pub static TEST_JWT_SECRET: &[u8] = b"orrery-test-secret";
pub static TEST_IMAGE_BASE_URL: &str = "/images";
pub const TEST_JWT_TTL_SECONDS: i64 = 600;

/// Extension trait for TestContext to create AppState backed by in-process services
pub trait TestContextExt {
    fn into_app_state(&self) -> AppState;
}

impl TestContextExt for TestContext {
    fn into_app_state(&self) -> AppState {
        AppState {
            db: self.db.clone(),
            tokens: Arc::new(TokenKeys::new(TEST_JWT_SECRET, TEST_JWT_TTL_SECONDS)),
            blacklist: Arc::new(MemoryTokenBlacklist::default()),
            images: Arc::new(LocalImageStorage::new(&self.image_dir, TEST_IMAGE_BASE_URL)),
        }
    }
}

/// Issues a token for the user and returns it as a header value
pub fn bearer(state: &AppState, user: &UserModel) -> String {
    let (token, _) = state.tokens.issue(user).expect("Failed to issue test token");

    format!("Bearer {}", token)
}

/// Resolves a freshly issued token into the identity the extractor would produce
pub async fn identity(state: &AppState, user: &UserModel) -> Identity {
    AuthService::new(&state.tokens, state.blacklist.as_ref())
        .resolve(Some(&bearer(state, user)))
        .await
        .expect("Failed to resolve test token")
}
