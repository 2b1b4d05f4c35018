//! Bearer token issuance, verification and revocation.

pub mod blacklist;

use chrono::Utc;
use entity::sea_orm_active_enums::Role;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::ActiveEnum;

use crate::server::{
    error::{auth::AuthError, Error},
    model::{
        auth::{Claims, Identity},
        db::UserModel,
    },
    service::auth::blacklist::TokenBlacklist,
};

/// HS256 signing material and token lifetime
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_seconds: i64,
}

impl TokenKeys {
    pub fn new(secret: &[u8], ttl_seconds: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_seconds,
        }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Signs a token for the provided user.
    ///
    /// # Returns
    /// - `Ok((String, Claims))` - Encoded token and the claims it carries
    /// - `Err(Error::JwtError)` - Token encoding failed
    pub fn issue(&self, user: &UserModel) -> Result<(String, Claims), Error> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id,
            role: user.role.to_value(),
            iat: now,
            exp: now + self.ttl_seconds,
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;

        Ok((token, claims))
    }

    /// Verifies signature and expiry of a token.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

/// Resolves and revokes caller identities.
pub struct AuthService<'a> {
    tokens: &'a TokenKeys,
    blacklist: &'a dyn TokenBlacklist,
}

impl<'a> AuthService<'a> {
    /// Creates a new instance of [`AuthService`]
    pub fn new(tokens: &'a TokenKeys, blacklist: &'a dyn TokenBlacklist) -> Self {
        Self { tokens, blacklist }
    }

    /// Resolves an `Authorization` header value into an [`Identity`].
    ///
    /// # Arguments
    /// - `header` - Raw header value, expected as `Bearer <token>`
    ///
    /// # Returns
    /// - `Ok(Identity)` - Token is valid and not revoked
    /// - `Err(Error::AuthError)` - Header missing or malformed, token invalid, expired or revoked
    /// - `Err(Error::RedisError)` - Revocation list could not be consulted
    pub async fn resolve(&self, header: Option<&str>) -> Result<Identity, Error> {
        let token = header
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let claims = self.tokens.verify(token)?;
        let role = Role::try_from_value(&claims.role)
            .map_err(|_| AuthError::InvalidToken(format!("unknown role {:?}", claims.role)))?;

        if self.blacklist.is_revoked(token).await? {
            return Err(AuthError::TokenRevoked.into());
        }

        Ok(Identity {
            user_id: claims.sub,
            role,
            token: token.to_string(),
            expires_at: claims.exp,
        })
    }

    /// Revokes the identity's token for the rest of its lifetime.
    ///
    /// Already expired tokens are left alone.
    pub async fn revoke(&self, identity: &Identity) -> Result<(), Error> {
        let remaining = identity.expires_at - Utc::now().timestamp();
        if remaining <= 0 {
            return Ok(());
        }

        self.blacklist.revoke(&identity.token, remaining).await?;

        tracing::info!(user_id = identity.user_id, "Revoked bearer token");

        Ok(())
    }
}
