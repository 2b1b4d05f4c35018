//! Planet system lifecycle service.
//!
//! Owns the status state machine: `Draft` → `Formed` by the owner, `Formed` → `Completed` or
//! `Rejected` by staff, and `Draft` → `Deleted` by the owner. Moderation computes member
//! temperatures inside the same transaction that records the outcome.

#[cfg(test)]
mod tests;

use chrono::Utc;
use entity::sea_orm_active_enums::SystemStatus;
use sea_orm::{ActiveEnum, ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    model::planet_system::{
        DraftSummaryDto, ModerateSystemDto, PlanetSystemDto, SystemListItemDto, SystemListParams,
        SystemMemberDto, UpdateStarDto,
    },
    server::{
        data::{
            planet_system::{PlanetSystemRepository, StarChanges, SystemListFilter},
            temperature_request::TemperatureRequestRepository,
            user::UserRepository,
        },
        error::{planet_system::PlanetSystemError, Error},
        model::{
            auth::{Identity, OWNER_ROLES, STAFF_ROLES},
            db::{PlanetModel, PlanetSystemModel, TemperatureRequestModel},
        },
        service::{planet::planet_dto, temperature::equilibrium_temperature},
        util::time::{parse_date, start_of_day, start_of_next_day},
    },
};

/// Statuses shown by the listing when no status filter is given
static LISTED_STATUSES: &[SystemStatus] = &[
    SystemStatus::Formed,
    SystemStatus::Completed,
    SystemStatus::Rejected,
];

/// Loads a system the caller may edit.
///
/// Checks run in order: the system must exist and not be deleted, the caller must be its
/// owning user, and it must still be a draft.
async fn owned_draft<C: ConnectionTrait>(
    db: &C,
    identity: &Identity,
    system_id: i32,
) -> Result<PlanetSystemModel, Error> {
    let system = visible_system(db, system_id).await?;

    identity.authorize(OWNER_ROLES, Some(system.user_id))?;

    if system.status != SystemStatus::Draft {
        return Err(PlanetSystemError::InvalidStatus {
            id: system.id,
            expected: SystemStatus::Draft,
            actual: system.status,
        }
        .into());
    }

    Ok(system)
}

/// Loads the caller's draft while holding the caller's user row lock.
///
/// Must run inside a transaction. Adding a planet takes the same lock, so membership and star
/// edits cannot interleave with the draft being formed.
pub(crate) async fn lock_owned_draft<C: ConnectionTrait>(
    txn: &C,
    identity: &Identity,
    system_id: i32,
) -> Result<PlanetSystemModel, Error> {
    UserRepository::new(txn).lock(identity.user_id).await?;

    owned_draft(txn, identity, system_id).await
}

fn not_deleted(
    system: Option<PlanetSystemModel>,
    system_id: i32,
) -> Result<PlanetSystemModel, Error> {
    system
        .filter(|system| system.status != SystemStatus::Deleted)
        .ok_or_else(|| PlanetSystemError::NotFound(system_id).into())
}

/// Loads a system that has not been deleted
async fn visible_system<C: ConnectionTrait>(
    db: &C,
    system_id: i32,
) -> Result<PlanetSystemModel, Error> {
    not_deleted(PlanetSystemRepository::new(db).get(system_id).await?, system_id)
}

/// Loads a system that has not been deleted, locking its row until the transaction ends
async fn locked_system<C: ConnectionTrait>(
    txn: &C,
    system_id: i32,
) -> Result<PlanetSystemModel, Error> {
    not_deleted(PlanetSystemRepository::new(txn).lock(system_id).await?, system_id)
}

fn member_dtos(members: Vec<(TemperatureRequestModel, PlanetModel)>) -> Vec<SystemMemberDto> {
    members
        .into_iter()
        .map(|(member, planet)| SystemMemberDto {
            planet: planet_dto(planet),
            planet_distance: member.distance,
            temperature: member.temperature,
        })
        .collect()
}

fn system_dto(
    system: PlanetSystemModel,
    members: Vec<(TemperatureRequestModel, PlanetModel)>,
) -> PlanetSystemDto {
    PlanetSystemDto {
        id: system.id,
        user_id: system.user_id,
        status: system.status.to_value(),
        date_created: system.created_at,
        date_formed: system.formed_at,
        date_ended: system.ended_at,
        moder_id: system.moderator_id,
        star_name: system.star_name,
        star_type: system.star_type,
        star_luminosity: system.star_luminosity,
        planet_count: members.len() as u64,
        planets: member_dtos(members),
    }
}

fn parse_outcome(status: &str) -> Result<SystemStatus, PlanetSystemError> {
    match status.trim().to_ascii_lowercase().as_str() {
        "completed" => Ok(SystemStatus::Completed),
        "rejected" => Ok(SystemStatus::Rejected),
        _ => Err(PlanetSystemError::InvalidModerationStatus(status.to_string())),
    }
}

fn validate_star_field(
    value: Option<String>,
    field: &'static str,
) -> Result<Option<String>, PlanetSystemError> {
    match value {
        Some(value) => {
            let value = value.trim();
            if value.is_empty() {
                return Err(PlanetSystemError::EmptyStarField(field));
            }
            Ok(Some(value.to_string()))
        }
        None => Ok(None),
    }
}

pub struct PlanetSystemService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PlanetSystemService<'a> {
    /// Creates a new instance of [`PlanetSystemService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Summarizes the caller's draft.
    ///
    /// # Returns
    /// - `Ok(DraftSummaryDto)` - Draft ID, star fields and members, or an empty summary
    ///   when the caller has no draft
    /// - `Err(Error::AuthError)` - Caller is not a user
    pub async fn draft_summary(&self, identity: &Identity) -> Result<DraftSummaryDto, Error> {
        identity.authorize(OWNER_ROLES, None)?;

        let Some(draft) = PlanetSystemRepository::new(self.db)
            .find_draft(identity.user_id)
            .await?
        else {
            return Ok(DraftSummaryDto::default());
        };

        let members = TemperatureRequestRepository::new(self.db)
            .members_with_planets(draft.id)
            .await?;

        Ok(DraftSummaryDto {
            system_id: Some(draft.id),
            planet_count: members.len() as u64,
            star_name: draft.star_name,
            star_type: draft.star_type,
            star_luminosity: draft.star_luminosity,
            planets: member_dtos(members),
        })
    }

    /// Fetches a system with its members.
    ///
    /// Users may only see their own systems; staff may see any.
    pub async fn get(
        &self,
        identity: &Identity,
        system_id: i32,
    ) -> Result<PlanetSystemDto, Error> {
        let system = visible_system(self.db, system_id).await?;

        if !identity.is_staff() {
            identity.authorize(&[], Some(system.user_id))?;
        }

        let members = TemperatureRequestRepository::new(self.db)
            .members_with_planets(system.id)
            .await?;

        Ok(system_dto(system, members))
    }

    /// Lists systems visible to the caller.
    ///
    /// # Arguments
    /// - `params` - Optional status (exact match) and inclusive `YYYY-MM-DD` bounds on the
    ///   formation date
    ///
    /// # Returns
    /// - `Ok(Vec<SystemListItemDto>)` - Matching systems ordered by ID, empty when asking for
    ///   drafts or deleted systems
    /// - `Err(Error::PlanetSystemError)` - Unknown status or malformed date
    pub async fn list(
        &self,
        identity: &Identity,
        params: SystemListParams,
    ) -> Result<Vec<SystemListItemDto>, Error> {
        identity.authorize(&[], None)?;

        let statuses = match params
            .system_status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(status) => {
                let status = SystemStatus::try_from_value(&status.to_string())
                    .map_err(|_| PlanetSystemError::InvalidStatusFilter(status.to_string()))?;
                if !LISTED_STATUSES.contains(&status) {
                    return Ok(Vec::new());
                }
                vec![status]
            }
            None => LISTED_STATUSES.to_vec(),
        };

        let formed_from = match params.start_date.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(value) => Some(start_of_day(parse_date(value)?)),
            None => None,
        };
        let formed_before = match params.end_date.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(value) => Some(start_of_next_day(parse_date(value)?)?),
            None => None,
        };

        let rows = PlanetSystemRepository::new(self.db)
            .list(SystemListFilter {
                owner_id: (!identity.is_staff()).then_some(identity.user_id),
                statuses,
                formed_from,
                formed_before,
            })
            .await?;

        let system_ids: Vec<i32> = rows.iter().map(|(system, _)| system.id).collect();
        let counts = TemperatureRequestRepository::new(self.db)
            .count_by_systems(&system_ids)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(system, owner)| {
                let planet_count = counts.get(&system.id).copied().unwrap_or(0);
                let planet_temp_count = if system.status == SystemStatus::Completed {
                    planet_count
                } else {
                    0
                };

                SystemListItemDto {
                    id: system.id,
                    date_created: system.formed_at.unwrap_or(system.created_at).date(),
                    status: system.status.to_value(),
                    user_login: owner.map(|o| o.login).unwrap_or_default(),
                    moder_id: system.moderator_id,
                    star_name: system.star_name,
                    star_type: system.star_type,
                    star_luminosity: system.star_luminosity,
                    planet_count,
                    planet_temp_count,
                }
            })
            .collect())
    }

    /// Edits star parameters of the caller's draft; only provided fields change
    pub async fn update_star(
        &self,
        identity: &Identity,
        system_id: i32,
        input: UpdateStarDto,
    ) -> Result<PlanetSystemDto, Error> {
        let txn = self.db.begin().await?;
        let system = lock_owned_draft(&txn, identity, system_id).await?;

        let luminosity = match input.star_luminosity {
            Some(value) if !value.is_finite() || value < 0.0 => {
                return Err(PlanetSystemError::InvalidLuminosity.into())
            }
            other => other,
        };
        let changes = StarChanges {
            name: validate_star_field(input.star_name, "name")?,
            star_type: validate_star_field(input.star_type, "type")?,
            luminosity,
        };

        let system = PlanetSystemRepository::new(&txn)
            .update_star(system, changes)
            .await?;
        let members = TemperatureRequestRepository::new(&txn)
            .members_with_planets(system.id)
            .await?;

        txn.commit().await?;

        Ok(system_dto(system, members))
    }

    /// Submits the caller's draft for moderation.
    ///
    /// # Returns
    /// - `Ok(PlanetSystemDto)` - System now `Formed`, with `formed_at` set
    /// - `Err(Error::PlanetSystemError)` - Missing, not a draft, or without members
    /// - `Err(Error::AuthError)` - Caller is not the owning user
    pub async fn form(
        &self,
        identity: &Identity,
        system_id: i32,
    ) -> Result<PlanetSystemDto, Error> {
        let txn = self.db.begin().await?;
        let system = lock_owned_draft(&txn, identity, system_id).await?;

        let member_repo = TemperatureRequestRepository::new(&txn);
        if member_repo.count_by_system(system.id).await? == 0 {
            return Err(PlanetSystemError::EmptyDraft(system.id).into());
        }

        let formed_at = Utc::now().naive_utc().max(system.created_at);
        let system = PlanetSystemRepository::new(&txn)
            .mark_formed(system, formed_at)
            .await?;
        let members = member_repo.members_with_planets(system.id).await?;

        txn.commit().await?;

        tracing::info!(
            system_id = system.id,
            user_id = identity.user_id,
            "Formed planet system"
        );

        Ok(system_dto(system, members))
    }

    /// Completes or rejects a formed system.
    ///
    /// The requested outcome is forced to `Rejected` when the star luminosity or any member
    /// distance is unset. On completion every member temperature is computed and stored.
    /// Everything runs in one transaction holding the system row lock; on failure nothing is
    /// written and the system stays `Formed`.
    ///
    /// # Arguments
    /// - `identity` - Moderator or admin performing the moderation
    /// - `system_id` - System to finalize
    /// - `input` - Requested outcome, `completed` or `rejected`
    ///
    /// # Returns
    /// - `Ok(PlanetSystemDto)` - Finalized system with its members
    /// - `Err(Error::AuthError)` - Caller is not staff
    /// - `Err(Error::PlanetSystemError)` - Invalid outcome, missing system, not `Formed`, or a
    ///   member temperature out of range
    /// - `Err(Error::DbErr)` - Database operation failed, the transaction is rolled back
    pub async fn moderate(
        &self,
        identity: &Identity,
        system_id: i32,
        input: ModerateSystemDto,
    ) -> Result<PlanetSystemDto, Error> {
        identity.authorize(STAFF_ROLES, None)?;
        let requested = parse_outcome(&input.status)?;

        let txn = self.db.begin().await?;

        let system = locked_system(&txn, system_id).await?;
        if system.status != SystemStatus::Formed {
            return Err(PlanetSystemError::InvalidStatus {
                id: system.id,
                expected: SystemStatus::Formed,
                actual: system.status,
            }
            .into());
        }

        let member_repo = TemperatureRequestRepository::new(&txn);
        let members = member_repo.members_with_planets(system.id).await?;

        let incomplete = system.star_luminosity == 0.0
            || members.iter().any(|(member, _)| member.distance == 0);
        let outcome = if requested == SystemStatus::Rejected || incomplete {
            SystemStatus::Rejected
        } else {
            SystemStatus::Completed
        };

        let members = if outcome == SystemStatus::Completed {
            let mut computed = Vec::with_capacity(members.len());
            for (member, planet) in members {
                let temperature =
                    equilibrium_temperature(system.star_luminosity, planet.albedo, member.distance)
                        .ok_or(PlanetSystemError::TemperatureOutOfRange {
                            planet_id: planet.id,
                            system_id: system.id,
                        })?;
                let member = member_repo.set_temperature(member, temperature).await?;
                computed.push((member, planet));
            }
            computed
        } else {
            members
        };

        let ended_at = Utc::now().naive_utc();
        let system = PlanetSystemRepository::new(&txn)
            .mark_finalized(system, outcome, identity.user_id, ended_at)
            .await?;

        txn.commit().await?;

        tracing::info!(
            system_id = system.id,
            moderator_id = identity.user_id,
            outcome = %system.status.to_value(),
            "Moderated planet system"
        );

        Ok(system_dto(system, members))
    }

    /// Deletes the caller's draft by moving it to the terminal `Deleted` status
    pub async fn delete_draft(&self, identity: &Identity) -> Result<(), Error> {
        identity.authorize(OWNER_ROLES, None)?;

        let txn = self.db.begin().await?;
        UserRepository::new(&txn).lock(identity.user_id).await?;

        let system_repo = PlanetSystemRepository::new(&txn);
        let draft = system_repo
            .find_draft(identity.user_id)
            .await?
            .ok_or(PlanetSystemError::DraftNotFound(identity.user_id))?;

        let draft = system_repo.mark_deleted(draft).await?;

        txn.commit().await?;

        tracing::info!(
            system_id = draft.id,
            user_id = identity.user_id,
            "Deleted draft planet system"
        );

        Ok(())
    }
}
