//! Planet catalog service.

use sea_orm::DatabaseConnection;

use crate::{
    model::planet::{CreatePlanetDto, PlanetDto, PlanetListDto, UpdatePlanetDto},
    server::{
        data::{
            planet::{PlanetChanges, PlanetRepository},
            planet_system::PlanetSystemRepository,
            temperature_request::TemperatureRequestRepository,
        },
        error::{planet::PlanetError, Error},
        model::{auth::Identity, db::PlanetModel},
        service::image::ImageStorage,
    },
};

pub(crate) fn planet_dto(planet: PlanetModel) -> PlanetDto {
    PlanetDto {
        id: planet.id,
        planet_title: planet.title,
        description: planet.description,
        albedo: planet.albedo,
        image: planet.image,
    }
}

fn validate_title(title: &str) -> Result<String, PlanetError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(PlanetError::EmptyTitle);
    }

    Ok(title.to_string())
}

fn validate_albedo(albedo: f64) -> Result<f64, PlanetError> {
    if !(0.0..=1.0).contains(&albedo) {
        return Err(PlanetError::InvalidAlbedo(albedo));
    }

    Ok(albedo)
}

pub struct PlanetService<'a> {
    db: &'a DatabaseConnection,
    images: &'a dyn ImageStorage,
}

impl<'a> PlanetService<'a> {
    /// Creates a new instance of [`PlanetService`]
    pub fn new(db: &'a DatabaseConnection, images: &'a dyn ImageStorage) -> Self {
        Self { db, images }
    }

    /// Lists catalog planets, optionally filtered by title.
    ///
    /// # Arguments
    /// - `query` - Case-insensitive title fragment
    /// - `caller` - Identified caller, whose draft counters are included when present
    ///
    /// # Returns
    /// - `Ok(PlanetListDto)` - Visible planets ordered by ID
    /// - `Err(Error::DbErr)` - Database operation failed
    pub async fn list(
        &self,
        query: Option<&str>,
        caller: Option<&Identity>,
    ) -> Result<PlanetListDto, Error> {
        let planets = PlanetRepository::new(self.db).list_visible(query).await?;

        let (system_id, planet_count) = match caller {
            Some(identity) => {
                match PlanetSystemRepository::new(self.db)
                    .find_draft(identity.user_id)
                    .await?
                {
                    Some(draft) => {
                        let count = TemperatureRequestRepository::new(self.db)
                            .count_by_system(draft.id)
                            .await?;
                        (Some(draft.id), count)
                    }
                    None => (None, 0),
                }
            }
            None => (None, 0),
        };

        Ok(PlanetListDto {
            planets: planets.into_iter().map(planet_dto).collect(),
            system_id,
            planet_count,
        })
    }

    /// Fetches a planet, soft-deleted planets are reported as not found
    pub async fn get(&self, planet_id: i32) -> Result<PlanetDto, Error> {
        let planet = PlanetRepository::new(self.db)
            .get_visible(planet_id)
            .await?
            .ok_or(PlanetError::NotFound(planet_id))?;

        Ok(planet_dto(planet))
    }

    pub async fn create(&self, input: CreatePlanetDto) -> Result<PlanetDto, Error> {
        let title = validate_title(&input.planet_title)?;
        let albedo = validate_albedo(input.albedo)?;

        let planet = PlanetRepository::new(self.db)
            .create(&title, &input.description, albedo)
            .await?;

        tracing::info!(planet_id = planet.id, "Created planet");

        Ok(planet_dto(planet))
    }

    /// Applies the provided field changes to a visible planet
    pub async fn update(&self, planet_id: i32, input: UpdatePlanetDto) -> Result<PlanetDto, Error> {
        let changes = PlanetChanges {
            title: input.planet_title.as_deref().map(validate_title).transpose()?,
            description: input.description,
            albedo: input.albedo.map(validate_albedo).transpose()?,
        };

        let planet_repo = PlanetRepository::new(self.db);
        let planet = planet_repo
            .get_visible(planet_id)
            .await?
            .ok_or(PlanetError::NotFound(planet_id))?;

        let planet = planet_repo.update(planet, changes).await?;

        Ok(planet_dto(planet))
    }

    /// Soft-deletes a planet and removes its stored image.
    ///
    /// Membership rows referencing the planet are kept.
    ///
    /// # Returns
    /// - `Ok(())` - Planet flagged as deleted
    /// - `Err(Error::PlanetError(PlanetError::NotFound))` - Planet missing or already deleted
    /// - `Err(Error::IoError)` - Stored image could not be removed
    pub async fn delete(&self, planet_id: i32) -> Result<(), Error> {
        let planet_repo = PlanetRepository::new(self.db);
        let planet = planet_repo
            .get_visible(planet_id)
            .await?
            .ok_or(PlanetError::NotFound(planet_id))?;

        let image = planet.image.clone();
        planet_repo.soft_delete(planet).await?;

        if let Some(image) = image {
            self.images.remove(&image).await?;
        }

        tracing::info!(planet_id = planet_id, "Soft-deleted planet");

        Ok(())
    }

    /// Stores a new image for the planet, replacing and removing any previous one
    pub async fn upload_image(
        &self,
        planet_id: i32,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<PlanetDto, Error> {
        let planet_repo = PlanetRepository::new(self.db);
        let planet = planet_repo
            .get_visible(planet_id)
            .await?
            .ok_or(PlanetError::NotFound(planet_id))?;

        let previous = planet.image.clone();
        let url = self.images.store(planet_id, file_name, bytes).await?;
        let planet = planet_repo.set_image(planet, Some(url)).await?;

        if let Some(previous) = previous {
            self.images.remove(&previous).await?;
        }

        Ok(planet_dto(planet))
    }
}

#[cfg(test)]
mod tests {
    use entity::sea_orm_active_enums::{Role, SystemStatus};
    use orrery_test_utils::prelude::*;
    use sea_orm::ConnectionTrait;

    use super::*;
    use crate::server::service::image::LocalImageStorage;

    fn identity(user_id: i32) -> Identity {
        Identity {
            user_id,
            role: Role::User,
            token: String::new(),
            expires_at: 0,
        }
    }

    /// Expect the caller's draft counters alongside the catalog
    #[tokio::test]
    async fn list_includes_caller_draft() -> Result<(), TestError> {
        let test = TestBuilder::new().with_core_tables().build().await?;
        let user = test.user().insert_user("alice", Role::User).await?;
        let planet = test.planet().insert_planet("Mars", 0.25).await?;
        let draft = test.system().insert_system(user.id, SystemStatus::Draft).await?;
        test.system().insert_member(planet.id, draft.id, 0).await?;

        let storage = LocalImageStorage::new(&test.image_dir, "/images");
        let service = PlanetService::new(&test.db, &storage);

        let anonymous = service.list(None, None).await.unwrap();
        assert_eq!(anonymous.planets.len(), 1);
        assert_eq!(anonymous.system_id, None);

        let identified = service.list(None, Some(&identity(user.id))).await.unwrap();
        assert_eq!(identified.system_id, Some(draft.id));
        assert_eq!(identified.planet_count, 1);

        Ok(())
    }

    /// Expect validation errors for blank titles and out of range albedo
    #[tokio::test]
    async fn create_validates_input() -> Result<(), TestError> {
        let test = TestBuilder::new().with_core_tables().build().await?;
        let storage = LocalImageStorage::new(&test.image_dir, "/images");
        let service = PlanetService::new(&test.db, &storage);

        let result = service
            .create(CreatePlanetDto {
                planet_title: "  ".to_string(),
                description: String::new(),
                albedo: 0.3,
            })
            .await;
        assert!(matches!(
            result,
            Err(Error::PlanetError(PlanetError::EmptyTitle))
        ));

        let result = service
            .create(CreatePlanetDto {
                planet_title: "Mars".to_string(),
                description: String::new(),
                albedo: 1.5,
            })
            .await;
        assert!(matches!(
            result,
            Err(Error::PlanetError(PlanetError::InvalidAlbedo(_)))
        ));

        Ok(())
    }

    /// Expect deleted planets to disappear from the catalog and stored images to be removed
    #[tokio::test]
    async fn delete_hides_planet_and_removes_image() -> Result<(), TestError> {
        let test = TestBuilder::new().with_core_tables().build().await?;
        let planet = test.planet().insert_planet("Mars", 0.25).await?;
        let storage = LocalImageStorage::new(&test.image_dir, "/images");
        let service = PlanetService::new(&test.db, &storage);

        let uploaded = service
            .upload_image(planet.id, "mars.png", b"image")
            .await
            .unwrap();
        let url = uploaded.image.unwrap();
        let object = test.image_dir.join(url.trim_start_matches("/images/"));
        assert!(object.exists());

        service.delete(planet.id).await.unwrap();

        assert!(!object.exists());
        assert!(matches!(
            service.get(planet.id).await,
            Err(Error::PlanetError(PlanetError::NotFound(_)))
        ));
        assert!(matches!(
            service.delete(planet.id).await,
            Err(Error::PlanetError(PlanetError::NotFound(_)))
        ));

        Ok(())
    }

    /// Expect the stored image to survive when the soft-delete write fails
    #[tokio::test]
    async fn delete_keeps_image_when_write_fails() -> Result<(), TestError> {
        let test = TestBuilder::new().with_core_tables().build().await?;
        let planet = test.planet().insert_planet("Mars", 0.25).await?;
        let storage = LocalImageStorage::new(&test.image_dir, "/images");
        let service = PlanetService::new(&test.db, &storage);

        let uploaded = service
            .upload_image(planet.id, "mars.png", b"image")
            .await
            .unwrap();
        let url = uploaded.image.unwrap();
        let object = test.image_dir.join(url.trim_start_matches("/images/"));

        test.db
            .execute_unprepared(
                "CREATE TRIGGER block_planet_update BEFORE UPDATE ON planet \
                 BEGIN SELECT RAISE(ABORT, 'planet writes blocked'); END",
            )
            .await?;

        assert!(matches!(service.delete(planet.id).await, Err(Error::DbErr(_))));
        assert!(object.exists());
        assert_eq!(service.get(planet.id).await.unwrap().image, Some(url));

        Ok(())
    }

    /// Expect only provided fields to change
    #[tokio::test]
    async fn update_changes_provided_fields() -> Result<(), TestError> {
        let test = TestBuilder::new().with_core_tables().build().await?;
        let planet = test.planet().insert_planet("Mars", 0.25).await?;
        let storage = LocalImageStorage::new(&test.image_dir, "/images");
        let service = PlanetService::new(&test.db, &storage);

        let updated = service
            .update(
                planet.id,
                UpdatePlanetDto {
                    albedo: Some(0.5),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.planet_title, "Mars");
        assert_eq!(updated.albedo, 0.5);

        Ok(())
    }
}
