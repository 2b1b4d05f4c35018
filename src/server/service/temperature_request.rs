//! Draft membership service.

use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::planet_system::{DraftMembershipDto, SystemMemberDto},
    server::{
        data::{
            planet::PlanetRepository, planet_system::PlanetSystemRepository,
            temperature_request::TemperatureRequestRepository, user::UserRepository,
        },
        error::{auth::AuthError, planet::PlanetError, planet_system::PlanetSystemError, Error},
        model::auth::{Identity, OWNER_ROLES},
        service::{planet::planet_dto, planet_system::lock_owned_draft},
    },
};

pub struct TemperatureRequestService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TemperatureRequestService<'a> {
    /// Creates a new instance of [`TemperatureRequestService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a planet to the caller's draft, creating the draft if the caller has none.
    ///
    /// The caller's user row is locked for the duration of the transaction so that concurrent
    /// first additions end up in the same draft.
    ///
    /// # Returns
    /// - `Ok(DraftMembershipDto)` - Draft ID and its member count after the addition
    /// - `Err(Error::PlanetError)` - Planet missing or soft-deleted
    /// - `Err(Error::PlanetSystemError)` - Planet already part of the draft
    /// - `Err(Error::AuthError)` - Caller is not a user
    pub async fn add_planet(
        &self,
        identity: &Identity,
        planet_id: i32,
    ) -> Result<DraftMembershipDto, Error> {
        identity.authorize(OWNER_ROLES, None)?;

        let txn = self.db.begin().await?;

        UserRepository::new(&txn)
            .lock(identity.user_id)
            .await?
            .ok_or(AuthError::UserNotFound(identity.user_id))?;

        PlanetRepository::new(&txn)
            .get_visible(planet_id)
            .await?
            .ok_or(PlanetError::NotFound(planet_id))?;

        let system_repo = PlanetSystemRepository::new(&txn);
        let draft = match system_repo.find_draft(identity.user_id).await? {
            Some(draft) => draft,
            None => {
                let draft = system_repo
                    .create_draft(identity.user_id, Utc::now().naive_utc())
                    .await?;

                tracing::info!(
                    system_id = draft.id,
                    user_id = identity.user_id,
                    "Created draft planet system"
                );

                draft
            }
        };

        let member_repo = TemperatureRequestRepository::new(&txn);
        if member_repo.get(draft.id, planet_id).await?.is_some() {
            return Err(PlanetSystemError::DuplicateMember {
                planet_id,
                system_id: draft.id,
            }
            .into());
        }

        member_repo.add(planet_id, draft.id).await?;
        let planet_count = member_repo.count_by_system(draft.id).await?;

        txn.commit().await?;

        Ok(DraftMembershipDto {
            system_id: draft.id,
            planet_count,
        })
    }

    /// Removes a planet from the caller's draft
    pub async fn remove_planet(
        &self,
        identity: &Identity,
        system_id: i32,
        planet_id: i32,
    ) -> Result<(), Error> {
        let txn = self.db.begin().await?;
        let system = lock_owned_draft(&txn, identity, system_id).await?;

        let result = TemperatureRequestRepository::new(&txn)
            .remove(system.id, planet_id)
            .await?;

        if result.rows_affected == 0 {
            return Err(PlanetSystemError::MemberNotFound {
                planet_id,
                system_id,
            }
            .into());
        }

        txn.commit().await?;

        Ok(())
    }

    /// Sets the orbital distance of a draft member.
    ///
    /// # Returns
    /// - `Ok(SystemMemberDto)` - Updated member with its planet
    /// - `Err(Error::PlanetSystemError)` - System not an owned draft, distance not positive, or
    ///   the planet is not a member
    pub async fn set_distance(
        &self,
        identity: &Identity,
        system_id: i32,
        planet_id: i32,
        distance: i32,
    ) -> Result<SystemMemberDto, Error> {
        let txn = self.db.begin().await?;
        let system = lock_owned_draft(&txn, identity, system_id).await?;

        if distance <= 0 {
            return Err(PlanetSystemError::DistanceRequired.into());
        }

        let member_repo = TemperatureRequestRepository::new(&txn);
        let member = member_repo
            .get(system.id, planet_id)
            .await?
            .ok_or(PlanetSystemError::MemberNotFound {
                planet_id,
                system_id,
            })?;

        let planet = PlanetRepository::new(&txn)
            .get(planet_id)
            .await?
            .ok_or_else(|| Error::InternalError(format!("Member planet ID {planet_id} missing")))?;

        let member = member_repo.set_distance(member, distance).await?;

        txn.commit().await?;

        Ok(SystemMemberDto {
            planet: planet_dto(planet),
            planet_distance: member.distance,
            temperature: member.temperature,
        })
    }
}
