use orrery::{
    model::user::{LoginDto, RegisterUserDto, TokenDto, UpdateProfileDto, UserDto},
    server::{
        controller::{
            user::{get_user, login, logout, register, update_me},
            util::identity::MaybeIdentity,
        },
        error::{auth::AuthError, Error},
        service::auth::AuthService,
    },
};

use super::*;

fn registration(login: &str, role: Option<&str>) -> RegisterUserDto {
    RegisterUserDto {
        login: login.to_string(),
        password: "hunter2".to_string(),
        role: role.map(str::to_string),
    }
}

fn credentials(login: &str, password: &str) -> LoginDto {
    LoginDto {
        login: login.to_string(),
        password: password.to_string(),
    }
}

/// Expect registration then login to return a usable bearer token
#[tokio::test]
async fn register_then_login() -> Result<(), TestError> {
    let test = test_setup_with_tables!(entity::prelude::AppUser)?;
    let state = test.into_app_state();

    let resp = register(
        State(state.clone()),
        MaybeIdentity(None),
        Json(registration("alice", None)),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let user: UserDto = json_body(resp).await;
    assert_eq!(user.role, "user");

    let resp = login(State(state.clone()), Json(credentials("alice", "hunter2")))
        .await
        .into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let token: TokenDto = json_body(resp).await;
    let resolved = AuthService::new(&state.tokens, state.blacklist.as_ref())
        .resolve(Some(&format!("Bearer {}", token.access_token)))
        .await
        .unwrap();
    assert_eq!(resolved.user_id, user.id);

    Ok(())
}

/// Expect 401 for a wrong password
#[tokio::test]
async fn login_fails_for_wrong_password() -> Result<(), TestError> {
    let test = test_setup_with_tables!(entity::prelude::AppUser)?;
    let state = test.into_app_state();

    register(
        State(state.clone()),
        MaybeIdentity(None),
        Json(registration("alice", None)),
    )
    .await
    .into_response();

    let resp = login(State(state.clone()), Json(credentials("alice", "nope")))
        .await
        .into_response();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect 403 for anonymous admin registration and 201 when an admin registers one
#[tokio::test]
async fn privileged_registration_requires_admin() -> Result<(), TestError> {
    let test = test_setup_with_tables!(entity::prelude::AppUser)?;
    let admin = test.user().insert_user("root", Role::Admin).await?;
    let state = test.into_app_state();

    let resp = register(
        State(state.clone()),
        MaybeIdentity(None),
        Json(registration("eve", Some("admin"))),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = register(
        State(state.clone()),
        MaybeIdentity(Some(identity(&state, &admin).await)),
        Json(registration("carol", Some("moderator"))),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let user: UserDto = json_body(resp).await;
    assert_eq!(user.role, "moderator");

    Ok(())
}

/// Expect 400 when the login is already taken
#[tokio::test]
async fn register_fails_for_taken_login() -> Result<(), TestError> {
    let test = test_setup_with_tables!(entity::prelude::AppUser)?;
    test.user().insert_user("alice", Role::User).await?;
    let state = test.into_app_state();

    let resp = register(
        State(state.clone()),
        MaybeIdentity(None),
        Json(registration("alice", None)),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect the token to stop resolving after logout
#[tokio::test]
async fn logout_revokes_token() -> Result<(), TestError> {
    let test = test_setup_with_tables!(entity::prelude::AppUser)?;
    let user = test.user().insert_user("alice", Role::User).await?;
    let state = test.into_app_state();

    let caller = identity(&state, &user).await;
    let header = format!("Bearer {}", caller.token);

    let resp = logout(State(state.clone()), caller).await.into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let result = AuthService::new(&state.tokens, state.blacklist.as_ref())
        .resolve(Some(&header))
        .await;
    assert!(matches!(
        result,
        Err(Error::AuthError(AuthError::TokenRevoked))
    ));

    Ok(())
}

/// Expect users to read their own profile but not someone else's
#[tokio::test]
async fn get_user_checks_ownership() -> Result<(), TestError> {
    let test = test_setup_with_tables!(entity::prelude::AppUser)?;
    let alice = test.user().insert_user("alice", Role::User).await?;
    let bob = test.user().insert_user("bob", Role::User).await?;
    let state = test.into_app_state();

    let resp = get_user(
        State(state.clone()),
        identity(&state, &alice).await,
        Path(alice.id),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = get_user(
        State(state.clone()),
        identity(&state, &alice).await,
        Path(bob.id),
    )
    .await
    .into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect 400 when renaming to a taken login
#[tokio::test]
async fn update_me_enforces_unique_login() -> Result<(), TestError> {
    let test = test_setup_with_tables!(entity::prelude::AppUser)?;
    let alice = test.user().insert_user("alice", Role::User).await?;
    test.user().insert_user("bob", Role::User).await?;
    let state = test.into_app_state();

    let resp = update_me(
        State(state.clone()),
        identity(&state, &alice).await,
        Json(UpdateProfileDto {
            new_login: Some("bob".to_string()),
            new_password: None,
        }),
    )
    .await
    .into_response();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}
