use orrery::{
    model::planet_system::{
        DraftSummaryDto, ModerateSystemDto, PlanetSystemDto, SystemListItemDto,
        SystemListParams, UpdateStarDto,
    },
    server::controller::planet_system::{
        delete_draft, form_planet_system, get_draft_summary, get_planet_system,
        list_planet_systems, moderate_planet_system, update_planet_system,
    },
};

use super::*;

/// Expect the full draft → formed → completed flow with computed temperatures
#[tokio::test]
async fn draft_is_formed_and_completed() -> Result<(), TestError> {
    let test = TestBuilder::new().with_core_tables().build().await?;
    let user = test.user().insert_user("alice", Role::User).await?;
    let moderator = test.user().insert_user("mod", Role::Moderator).await?;
    let planet = test.planet().insert_planet("Earthlike", 0.3).await?;
    let draft = test.system().insert_system(user.id, SystemStatus::Draft).await?;
    test.system().insert_member(planet.id, draft.id, 1).await?;
    let state = test.into_app_state();

    let resp = form_planet_system(
        State(state.clone()),
        identity(&state, &user).await,
        Path(draft.id),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let formed: PlanetSystemDto = json_body(resp).await;
    assert_eq!(formed.status, "formed");

    let resp = moderate_planet_system(
        State(state.clone()),
        identity(&state, &moderator).await,
        Path(draft.id),
        Json(ModerateSystemDto {
            status: "completed".to_string(),
        }),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let completed: PlanetSystemDto = json_body(resp).await;
    assert_eq!(completed.status, "completed");
    assert_eq!(completed.moder_id, Some(moderator.id));
    assert_eq!(completed.planets[0].temperature, Some(98527));

    Ok(())
}

/// Expect 400 when submitting an empty draft
#[tokio::test]
async fn form_rejects_empty_draft() -> Result<(), TestError> {
    let test = TestBuilder::new().with_core_tables().build().await?;
    let user = test.user().insert_user("alice", Role::User).await?;
    let draft = test.system().insert_system(user.id, SystemStatus::Draft).await?;
    let state = test.into_app_state();

    let resp = form_planet_system(
        State(state.clone()),
        identity(&state, &user).await,
        Path(draft.id),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect 403 when a user moderates and 400 when moderating a draft
#[tokio::test]
async fn moderate_checks_role_then_status() -> Result<(), TestError> {
    let test = TestBuilder::new().with_core_tables().build().await?;
    let user = test.user().insert_user("alice", Role::User).await?;
    let admin = test.user().insert_user("root", Role::Admin).await?;
    let draft = test.system().insert_system(user.id, SystemStatus::Draft).await?;
    let state = test.into_app_state();

    let outcome = || {
        Json(ModerateSystemDto {
            status: "rejected".to_string(),
        })
    };

    let resp = moderate_planet_system(
        State(state.clone()),
        identity(&state, &user).await,
        Path(draft.id),
        outcome(),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = moderate_planet_system(
        State(state.clone()),
        identity(&state, &admin).await,
        Path(draft.id),
        outcome(),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect users to list only their own systems
#[tokio::test]
async fn list_is_scoped_to_owner() -> Result<(), TestError> {
    let test = TestBuilder::new().with_core_tables().build().await?;
    let alice = test.user().insert_user("alice", Role::User).await?;
    let bob = test.user().insert_user("bob", Role::User).await?;
    test.system().insert_system(alice.id, SystemStatus::Formed).await?;
    test.system().insert_system(bob.id, SystemStatus::Completed).await?;
    let state = test.into_app_state();

    let resp = list_planet_systems(
        State(state.clone()),
        identity(&state, &alice).await,
        Query(SystemListParams::default()),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let systems: Vec<SystemListItemDto> = json_body(resp).await;
    assert_eq!(systems.len(), 1);
    assert_eq!(systems[0].user_login, "alice");

    let resp = list_planet_systems(
        State(state.clone()),
        identity(&state, &alice).await,
        Query(SystemListParams {
            system_status: Some("bogus".to_string()),
            ..Default::default()
        }),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect 403 for other users' systems and 404 for deleted systems
#[tokio::test]
async fn get_checks_visibility() -> Result<(), TestError> {
    let test = TestBuilder::new().with_core_tables().build().await?;
    let alice = test.user().insert_user("alice", Role::User).await?;
    let bob = test.user().insert_user("bob", Role::User).await?;
    let formed = test.system().insert_system(alice.id, SystemStatus::Formed).await?;
    let deleted = test.system().insert_system(alice.id, SystemStatus::Deleted).await?;
    let state = test.into_app_state();

    let resp = get_planet_system(
        State(state.clone()),
        identity(&state, &bob).await,
        Path(formed.id),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = get_planet_system(
        State(state.clone()),
        identity(&state, &alice).await,
        Path(deleted.id),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect star edits on a draft, then the draft summary to reflect them and deletion to clear it
#[tokio::test]
async fn draft_is_edited_summarized_and_deleted() -> Result<(), TestError> {
    let test = TestBuilder::new().with_core_tables().build().await?;
    let user = test.user().insert_user("alice", Role::User).await?;
    let draft = test.system().insert_system(user.id, SystemStatus::Draft).await?;
    let state = test.into_app_state();

    let resp = update_planet_system(
        State(state.clone()),
        identity(&state, &user).await,
        Path(draft.id),
        Json(UpdateStarDto {
            star_name: Some("Sirius".to_string()),
            star_luminosity: Some(25.4),
            ..Default::default()
        }),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = get_draft_summary(State(state.clone()), identity(&state, &user).await)
        .await
        .into_response();
    let summary: DraftSummaryDto = json_body(resp).await;
    assert_eq!(summary.system_id, Some(draft.id));
    assert_eq!(summary.star_name, "Sirius");

    let resp = delete_draft(State(state.clone()), identity(&state, &user).await)
        .await
        .into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = get_draft_summary(State(state.clone()), identity(&state, &user).await)
        .await
        .into_response();
    let summary: DraftSummaryDto = json_body(resp).await;
    assert_eq!(summary.system_id, None);

    let resp = delete_draft(State(state.clone()), identity(&state, &user).await)
        .await
        .into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}
