mod form;

use entity::sea_orm_active_enums::{Role, SystemStatus};
use orrery_test_utils::prelude::*;

use super::*;
use crate::server::model::db::UserModel;

/// Identity for a fixture user, as the token extractor would build it
fn identity(user: &UserModel) -> Identity {
    Identity {
        user_id: user.id,
        role: user.role,
        token: String::new(),
        expires_at: 0,
    }
}
