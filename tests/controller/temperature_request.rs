use orrery::{
    model::planet_system::{SetDistanceDto, SystemMemberDto},
    server::controller::temperature_request::{remove_member, set_member_distance},
};

use super::*;

/// Expect 400 for a zero distance and 200 with the stored distance otherwise
#[tokio::test]
async fn set_distance_validates_value() -> Result<(), TestError> {
    let test = TestBuilder::new().with_core_tables().build().await?;
    let user = test.user().insert_user("alice", Role::User).await?;
    let planet = test.planet().insert_planet("Mars", 0.25).await?;
    let draft = test.system().insert_system(user.id, SystemStatus::Draft).await?;
    test.system().insert_member(planet.id, draft.id, 0).await?;
    let state = test.into_app_state();

    let resp = set_member_distance(
        State(state.clone()),
        identity(&state, &user).await,
        Path((draft.id, planet.id)),
        Json(SetDistanceDto { planet_distance: 0 }),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = set_member_distance(
        State(state.clone()),
        identity(&state, &user).await,
        Path((draft.id, planet.id)),
        Json(SetDistanceDto {
            planet_distance: 150,
        }),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let member: SystemMemberDto = json_body(resp).await;
    assert_eq!(member.planet_distance, 150);

    Ok(())
}

/// Expect 400 when editing members of a formed system
#[tokio::test]
async fn set_distance_requires_draft() -> Result<(), TestError> {
    let test = TestBuilder::new().with_core_tables().build().await?;
    let user = test.user().insert_user("alice", Role::User).await?;
    let planet = test.planet().insert_planet("Mars", 0.25).await?;
    let system = test.system().insert_system(user.id, SystemStatus::Formed).await?;
    test.system().insert_member(planet.id, system.id, 3).await?;
    let state = test.into_app_state();

    let resp = set_member_distance(
        State(state.clone()),
        identity(&state, &user).await,
        Path((system.id, planet.id)),
        Json(SetDistanceDto { planet_distance: 5 }),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect the first removal to succeed and the second to return 404
#[tokio::test]
async fn remove_member_then_not_found() -> Result<(), TestError> {
    let test = TestBuilder::new().with_core_tables().build().await?;
    let user = test.user().insert_user("alice", Role::User).await?;
    let planet = test.planet().insert_planet("Mars", 0.25).await?;
    let draft = test.system().insert_system(user.id, SystemStatus::Draft).await?;
    test.system().insert_member(planet.id, draft.id, 0).await?;
    let state = test.into_app_state();

    let resp = remove_member(
        State(state.clone()),
        identity(&state, &user).await,
        Path((draft.id, planet.id)),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = remove_member(
        State(state.clone()),
        identity(&state, &user).await,
        Path((draft.id, planet.id)),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect 403 when another user removes a member
#[tokio::test]
async fn remove_member_requires_owner() -> Result<(), TestError> {
    let test = TestBuilder::new().with_core_tables().build().await?;
    let alice = test.user().insert_user("alice", Role::User).await?;
    let bob = test.user().insert_user("bob", Role::User).await?;
    let planet = test.planet().insert_planet("Mars", 0.25).await?;
    let draft = test.system().insert_system(alice.id, SystemStatus::Draft).await?;
    test.system().insert_member(planet.id, draft.id, 0).await?;
    let state = test.into_app_state();

    let resp = remove_member(
        State(state.clone()),
        identity(&state, &bob).await,
        Path((draft.id, planet.id)),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}
