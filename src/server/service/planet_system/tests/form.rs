use super::*;
use crate::server::service::temperature_request::TemperatureRequestService;

/// Expect the draft to become Formed with formed_at at or after created_at
#[tokio::test]
async fn forms_draft_with_members() -> Result<(), TestError> {
    let test = TestBuilder::new().with_core_tables().build().await?;
    let user = test.user().insert_user("alice", Role::User).await?;
    let planet = test.planet().insert_planet("Mars", 0.25).await?;
    let draft = test.system().insert_system(user.id, SystemStatus::Draft).await?;
    test.system().insert_member(planet.id, draft.id, 3).await?;

    let service = PlanetSystemService::new(&test.db);
    let formed = service.form(&identity(&user), draft.id).await.unwrap();

    assert_eq!(formed.status, "formed");
    let formed_at = formed.date_formed.unwrap();
    assert!(formed_at >= formed.date_created);
    assert_eq!(formed.planet_count, 1);

    Ok(())
}

/// Expect EmptyDraft when the draft has no members
#[tokio::test]
async fn fails_for_empty_draft() -> Result<(), TestError> {
    let test = TestBuilder::new().with_core_tables().build().await?;
    let user = test.user().insert_user("alice", Role::User).await?;
    let draft = test.system().insert_system(user.id, SystemStatus::Draft).await?;

    let service = PlanetSystemService::new(&test.db);
    let result = service.form(&identity(&user), draft.id).await;

    assert!(matches!(
        result,
        Err(Error::PlanetSystemError(PlanetSystemError::EmptyDraft(_)))
    ));

    Ok(())
}

/// Expect Forbidden when another user submits the draft
#[tokio::test]
async fn fails_for_non_owner() -> Result<(), TestError> {
    let test = TestBuilder::new().with_core_tables().build().await?;
    let alice = test.user().insert_user("alice", Role::User).await?;
    let bob = test.user().insert_user("bob", Role::User).await?;
    let planet = test.planet().insert_planet("Mars", 0.25).await?;
    let draft = test.system().insert_system(alice.id, SystemStatus::Draft).await?;
    test.system().insert_member(planet.id, draft.id, 3).await?;

    let service = PlanetSystemService::new(&test.db);
    let result = service.form(&identity(&bob), draft.id).await;

    assert!(matches!(
        result,
        Err(Error::AuthError(crate::server::error::auth::AuthError::Forbidden))
    ));

    Ok(())
}

/// Expect InvalidStatus when the system was already formed
#[tokio::test]
async fn fails_for_formed_system() -> Result<(), TestError> {
    let test = TestBuilder::new().with_core_tables().build().await?;
    let user = test.user().insert_user("alice", Role::User).await?;
    let system = test.system().insert_system(user.id, SystemStatus::Formed).await?;

    let service = PlanetSystemService::new(&test.db);
    let result = service.form(&identity(&user), system.id).await;

    assert!(matches!(
        result,
        Err(Error::PlanetSystemError(PlanetSystemError::InvalidStatus { .. }))
    ));

    Ok(())
}

/// Expect NotFound for a deleted system
#[tokio::test]
async fn fails_for_deleted_system() -> Result<(), TestError> {
    let test = TestBuilder::new().with_core_tables().build().await?;
    let user = test.user().insert_user("alice", Role::User).await?;
    let system = test.system().insert_system(user.id, SystemStatus::Deleted).await?;

    let service = PlanetSystemService::new(&test.db);
    let result = service.form(&identity(&user), system.id).await;

    assert!(matches!(
        result,
        Err(Error::PlanetSystemError(PlanetSystemError::NotFound(_)))
    ));

    Ok(())
}

/// Expect planets added after forming to start a new draft and leave the formed system alone
#[tokio::test]
async fn additions_after_forming_start_new_draft() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_core_tables()
        .with_draft_index()
        .build()
        .await?;
    let user = test.user().insert_user("alice", Role::User).await?;
    let mars = test.planet().insert_planet("Mars", 0.25).await?;
    let venus = test.planet().insert_planet("Venus", 0.77).await?;

    let members = TemperatureRequestService::new(&test.db);
    let draft = members.add_planet(&identity(&user), mars.id).await.unwrap();

    let service = PlanetSystemService::new(&test.db);
    service.form(&identity(&user), draft.system_id).await.unwrap();

    let next = members.add_planet(&identity(&user), venus.id).await.unwrap();
    assert_ne!(next.system_id, draft.system_id);
    assert_eq!(next.planet_count, 1);

    let formed = service.get(&identity(&user), draft.system_id).await.unwrap();
    assert_eq!(formed.status, "formed");
    assert_eq!(formed.planet_count, 1);

    Ok(())
}
