use orrery::{
    model::{
        planet::{CreatePlanetDto, PlanetDto, PlanetListDto, PlanetSearchParams},
        planet_system::DraftMembershipDto,
    },
    server::controller::{
        planet::{
            add_planet_to_draft, create_planet, delete_planet, get_planet, list_planets,
        },
        util::identity::MaybeIdentity,
    },
};

use super::*;

fn mars() -> CreatePlanetDto {
    CreatePlanetDto {
        planet_title: "Mars".to_string(),
        description: "The red planet".to_string(),
        albedo: 0.25,
    }
}

/// Expect 201 for staff and 403 for users creating a planet
#[tokio::test]
async fn create_requires_staff() -> Result<(), TestError> {
    let test = TestBuilder::new().with_core_tables().build().await?;
    let user = test.user().insert_user("alice", Role::User).await?;
    let moderator = test.user().insert_user("mod", Role::Moderator).await?;
    let state = test.into_app_state();

    let resp = create_planet(
        State(state.clone()),
        identity(&state, &user).await,
        Json(mars()),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = create_planet(
        State(state.clone()),
        identity(&state, &moderator).await,
        Json(mars()),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let planet: PlanetDto = json_body(resp).await;
    assert_eq!(planet.planet_title, "Mars");

    Ok(())
}

/// Expect 400 for an albedo outside [0, 1]
#[tokio::test]
async fn create_rejects_invalid_albedo() -> Result<(), TestError> {
    let test = TestBuilder::new().with_core_tables().build().await?;
    let admin = test.user().insert_user("root", Role::Admin).await?;
    let state = test.into_app_state();

    let resp = create_planet(
        State(state.clone()),
        identity(&state, &admin).await,
        Json(CreatePlanetDto {
            albedo: -0.1,
            ..mars()
        }),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect draft counters only for identified callers
#[tokio::test]
async fn list_includes_draft_counters_for_identified_caller() -> Result<(), TestError> {
    let test = TestBuilder::new().with_core_tables().build().await?;
    let user = test.user().insert_user("alice", Role::User).await?;
    let planet = test.planet().insert_planet("Mars", 0.25).await?;
    test.planet().insert_planet("Venus", 0.75).await?;
    let draft = test.system().insert_system(user.id, SystemStatus::Draft).await?;
    test.system().insert_member(planet.id, draft.id, 0).await?;
    let state = test.into_app_state();

    let resp = list_planets(
        State(state.clone()),
        MaybeIdentity(None),
        Query(PlanetSearchParams::default()),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let anonymous: PlanetListDto = json_body(resp).await;
    assert_eq!(anonymous.planets.len(), 2);
    assert_eq!(anonymous.system_id, None);

    let resp = list_planets(
        State(state.clone()),
        MaybeIdentity(Some(identity(&state, &user).await)),
        Query(PlanetSearchParams {
            query: Some("MAR".to_string()),
        }),
    )
    .await
    .into_response();
    let identified: PlanetListDto = json_body(resp).await;
    assert_eq!(identified.planets.len(), 1);
    assert_eq!(identified.system_id, Some(draft.id));
    assert_eq!(identified.planet_count, 1);

    Ok(())
}

/// Expect a deleted planet to return 404 on fetch and on a second delete
#[tokio::test]
async fn delete_hides_planet() -> Result<(), TestError> {
    let test = TestBuilder::new().with_core_tables().build().await?;
    let moderator = test.user().insert_user("mod", Role::Moderator).await?;
    let planet = test.planet().insert_planet("Mars", 0.25).await?;
    let state = test.into_app_state();

    let resp = get_planet(State(state.clone()), Path(planet.id))
        .await
        .into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = delete_planet(
        State(state.clone()),
        identity(&state, &moderator).await,
        Path(planet.id),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = get_planet(State(state.clone()), Path(planet.id))
        .await
        .into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = delete_planet(
        State(state.clone()),
        identity(&state, &moderator).await,
        Path(planet.id),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect the first addition to create a draft and a repeated addition to return 400
#[tokio::test]
async fn add_to_draft_creates_draft_and_rejects_duplicates() -> Result<(), TestError> {
    let test = TestBuilder::new().with_core_tables().build().await?;
    let user = test.user().insert_user("alice", Role::User).await?;
    let planet = test.planet().insert_planet("Mars", 0.25).await?;
    let state = test.into_app_state();

    let resp = add_planet_to_draft(
        State(state.clone()),
        identity(&state, &user).await,
        Path(planet.id),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let membership: DraftMembershipDto = json_body(resp).await;
    assert_eq!(membership.planet_count, 1);

    let resp = add_planet_to_draft(
        State(state.clone()),
        identity(&state, &user).await,
        Path(planet.id),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect 404 when adding a soft-deleted planet
#[tokio::test]
async fn add_to_draft_fails_for_deleted_planet() -> Result<(), TestError> {
    let test = TestBuilder::new().with_core_tables().build().await?;
    let user = test.user().insert_user("alice", Role::User).await?;
    let planet = test.planet().insert_deleted_planet("Pluto", 0.5).await?;
    let state = test.into_app_state();

    let resp = add_planet_to_draft(
        State(state.clone()),
        identity(&state, &user).await,
        Path(planet.id),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}
