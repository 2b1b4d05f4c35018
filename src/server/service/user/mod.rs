//! User account service.
//!
//! Handles registration, password login, profile lookups and edits, and the optional startup
//! admin account. Passwords are stored as argon2 PHC strings.

#[cfg(test)]
mod tests;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use entity::sea_orm_active_enums::Role;
use sea_orm::{ActiveEnum, DatabaseConnection, DbErr, SqlErr};

use crate::{
    model::user::{LoginDto, RegisterUserDto, TokenDto, UpdateProfileDto, UserDto},
    server::{
        data::user::UserRepository,
        error::{auth::AuthError, Error},
        model::{auth::Identity, db::UserModel},
        service::auth::TokenKeys,
    },
};

pub(crate) fn user_dto(user: UserModel) -> UserDto {
    UserDto {
        id: user.id,
        login: user.login,
        role: user.role.to_value(),
        created_at: user.created_at,
    }
}

fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::InternalError(format!("Failed to hash password: {}", e)))
}

/// Hashes that fail to parse never verify
fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

fn required(value: &str) -> Result<&str, AuthError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AuthError::MissingCredentials);
    }

    Ok(value)
}

/// Maps a unique constraint violation on the login column to `LoginTaken`
///
/// Covers registrations racing past the lookup that precedes the insert.
fn login_conflict(err: DbErr, login: &str) -> Error {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AuthError::LoginTaken(login.to_string()).into()
        }
        _ => err.into(),
    }
}

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    /// Creates a new instance of [`UserService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a new account.
    ///
    /// Anonymous callers and non-admins can only create `user` accounts.
    ///
    /// # Arguments
    /// - `caller` - Identity of the caller when a valid token was presented
    /// - `input` - Login, password and optional role
    ///
    /// # Returns
    /// - `Ok(UserDto)` - Created account
    /// - `Err(Error::AuthError)` - Missing credentials, unknown role, login taken, or a
    ///   privileged role requested without an admin token
    pub async fn register(
        &self,
        caller: Option<&Identity>,
        input: RegisterUserDto,
    ) -> Result<UserDto, Error> {
        let login = required(&input.login)?;
        let password = required(&input.password)?;

        let role = match input.role.as_deref().map(str::trim) {
            None | Some("") => Role::User,
            Some(role) => Role::try_from_value(&role.to_ascii_lowercase())
                .map_err(|_| AuthError::InvalidRole(role.to_string()))?,
        };

        if role != Role::User {
            match caller {
                Some(identity) => identity.authorize(&[Role::Admin], None)?,
                None => return Err(AuthError::Forbidden.into()),
            }
        }

        let user_repo = UserRepository::new(self.db);
        if user_repo.find_by_login(login).await?.is_some() {
            return Err(AuthError::LoginTaken(login.to_string()).into());
        }

        let user = user_repo
            .create(login, &hash_password(password)?, role)
            .await
            .map_err(|e| login_conflict(e, login))?;

        tracing::info!(user_id = user.id, role = %user.role.to_value(), "Registered user");

        Ok(user_dto(user))
    }

    /// Verifies credentials and issues a bearer token.
    ///
    /// # Returns
    /// - `Ok(TokenDto)` - Signed token, its lifetime in seconds and the user
    /// - `Err(Error::AuthError(AuthError::InvalidCredentials))` - Unknown login or wrong password
    pub async fn login(&self, input: LoginDto, tokens: &TokenKeys) -> Result<TokenDto, Error> {
        let login = required(&input.login)?;

        let user = UserRepository::new(self.db)
            .find_by_login(login)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(&input.password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials.into());
        }

        let (access_token, _) = tokens.issue(&user)?;

        tracing::debug!(user_id = user.id, "Issued bearer token");

        Ok(TokenDto {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: tokens.ttl_seconds(),
            user: user_dto(user),
        })
    }

    /// Fetches a profile; users may only read their own, staff may read any
    pub async fn get_profile(&self, identity: &Identity, user_id: i32) -> Result<UserDto, Error> {
        if !identity.is_staff() {
            identity.authorize(&[], Some(user_id))?;
        }

        let user = UserRepository::new(self.db)
            .get(user_id)
            .await?
            .ok_or(AuthError::UserNotFound(user_id))?;

        Ok(user_dto(user))
    }

    /// Changes the caller's login and/or password
    pub async fn update_profile(
        &self,
        identity: &Identity,
        input: UpdateProfileDto,
    ) -> Result<UserDto, Error> {
        let user_repo = UserRepository::new(self.db);

        let login = match input.new_login.as_deref() {
            Some(login) => {
                let login = required(login)?;
                if let Some(existing) = user_repo.find_by_login(login).await? {
                    if existing.id != identity.user_id {
                        return Err(AuthError::LoginTaken(login.to_string()).into());
                    }
                }
                Some(login.to_string())
            }
            None => None,
        };
        let password_hash = match input.new_password.as_deref() {
            Some(password) => Some(hash_password(required(password)?)?),
            None => None,
        };

        let requested_login = login.clone().unwrap_or_default();
        let user = user_repo
            .update(identity.user_id, login, password_hash)
            .await
            .map_err(|e| login_conflict(e, &requested_login))?
            .ok_or(AuthError::UserNotFound(identity.user_id))?;

        tracing::info!(user_id = user.id, "Updated user profile");

        Ok(user_dto(user))
    }

    /// Creates the configured admin account unless the login already exists.
    ///
    /// # Returns
    /// - `Ok(Some(UserModel))` - Admin account created
    /// - `Ok(None)` - Login already taken, nothing changed
    pub async fn ensure_admin(
        &self,
        login: &str,
        password: &str,
    ) -> Result<Option<UserModel>, Error> {
        let login = required(login)?;
        let password = required(password)?;

        let user_repo = UserRepository::new(self.db);
        if user_repo.find_by_login(login).await?.is_some() {
            tracing::debug!(login = login, "Admin login already exists, skipping bootstrap");
            return Ok(None);
        }

        let user = user_repo
            .create(login, &hash_password(password)?, Role::Admin)
            .await?;

        tracing::info!(user_id = user.id, "Created bootstrap admin account");

        Ok(Some(user))
    }
}
