use chrono::Utc;
use entity::sea_orm_active_enums::Role;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QuerySelect,
};

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new user
    pub async fn create(
        &self,
        login: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<entity::app_user::Model, DbErr> {
        let user = entity::app_user::ActiveModel {
            login: ActiveValue::Set(login.to_string()),
            password_hash: ActiveValue::Set(password_hash.to_string()),
            role: ActiveValue::Set(role),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        user.insert(self.db).await
    }

    pub async fn get(&self, user_id: i32) -> Result<Option<entity::app_user::Model>, DbErr> {
        entity::prelude::AppUser::find_by_id(user_id)
            .one(self.db)
            .await
    }

    pub async fn find_by_login(
        &self,
        login: &str,
    ) -> Result<Option<entity::app_user::Model>, DbErr> {
        entity::prelude::AppUser::find()
            .filter(entity::app_user::Column::Login.eq(login))
            .one(self.db)
            .await
    }

    /// Fetches the user row with an exclusive row lock held until the transaction ends
    ///
    /// Backends without row locking (SQLite) fall back to a plain read.
    pub async fn lock(&self, user_id: i32) -> Result<Option<entity::app_user::Model>, DbErr> {
        entity::prelude::AppUser::find_by_id(user_id)
            .lock_exclusive()
            .one(self.db)
            .await
    }

    /// Updates the login and/or password hash, returns `None` if the user doesn't exist
    pub async fn update(
        &self,
        user_id: i32,
        login: Option<String>,
        password_hash: Option<String>,
    ) -> Result<Option<entity::app_user::Model>, DbErr> {
        let user = match entity::prelude::AppUser::find_by_id(user_id)
            .one(self.db)
            .await?
        {
            Some(user) => user,
            None => return Ok(None),
        };

        let mut user_am = user.into_active_model();
        if let Some(login) = login {
            user_am.login = ActiveValue::Set(login);
        }
        if let Some(password_hash) = password_hash {
            user_am.password_hash = ActiveValue::Set(password_hash);
        }

        let user = user_am.update(self.db).await?;

        Ok(Some(user))
    }
}
