use chrono::Utc;
use entity::sea_orm_active_enums::Role;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, model::UserModel, TestContext};

/// Password hash stored by fixtures; never verifies against any password.
pub static FIXTURE_PASSWORD_HASH: &str = "fixture-password-hash";

impl TestContext {
    pub fn user<'a>(&'a self) -> UserFixtures<'a> {
        UserFixtures { setup: self }
    }
}

pub struct UserFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> UserFixtures<'a> {
    pub async fn insert_user(&self, login: &str, role: Role) -> Result<UserModel, TestError> {
        Ok(
            entity::prelude::AppUser::insert(entity::app_user::ActiveModel {
                login: ActiveValue::Set(login.to_string()),
                password_hash: ActiveValue::Set(FIXTURE_PASSWORD_HASH.to_string()),
                role: ActiveValue::Set(role),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
