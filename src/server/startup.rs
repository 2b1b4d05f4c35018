use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::{
    config::Config,
    error::Error,
    service::{
        auth::blacklist::{MemoryTokenBlacklist, RedisTokenBlacklist, TokenBlacklist},
        image::{ImageStorage, LocalImageStorage},
        user::UserService,
    },
};

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Connect to Valkey/Redis for the token blacklist, or fall back to an in-process blacklist
pub async fn connect_to_blacklist(config: &Config) -> Result<Arc<dyn TokenBlacklist>, Error> {
    use fred::prelude::*;

    let Some(valkey_url) = &config.valkey_url else {
        tracing::warn!(
            "VALKEY_URL is not set, revoked tokens are kept in memory and lost on restart"
        );

        return Ok(Arc::new(MemoryTokenBlacklist::default()));
    };

    let redis_config = fred::prelude::Config::from_url(valkey_url)?;
    let pool = Pool::new(redis_config, None, None, None, 6)?;

    pool.connect();
    pool.wait_for_connect().await?;

    Ok(Arc::new(RedisTokenBlacklist::new(pool)))
}

/// Create the image directory if needed and build the storage serving it
pub async fn build_image_storage(config: &Config) -> Result<Arc<dyn ImageStorage>, Error> {
    tokio::fs::create_dir_all(&config.image_dir).await?;

    Ok(Arc::new(LocalImageStorage::new(
        &config.image_dir,
        &config.image_base_url,
    )))
}

/// Create the configured admin account when `ADMIN_LOGIN` and `ADMIN_PASSWORD` are set
pub async fn bootstrap_admin(config: &Config, db: &DatabaseConnection) -> Result<(), Error> {
    let (Some(login), Some(password)) = (&config.admin_login, &config.admin_password) else {
        return Ok(());
    };

    UserService::new(db).ensure_admin(login, password).await?;

    Ok(())
}
