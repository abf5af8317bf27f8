mod common;

use agentdash::handlers::{admin_users, auth, projects, sub_projects, supabase_config, webhook};
use agentdash::models::{
    CreateProjectRequest, CreateSubProjectRequest, CreateUserRequest, LoginRequest,
    SupabaseConfigInput, WebhookMethod, WebhookTestRequest, DEFAULT_PROJECT_COLOR,
};
use agentdash::auth::password;
use testcontainers::clients::Cli;
use uuid::Uuid;
use warp::http::header::SET_COOKIE;
use warp::http::StatusCode;

// Keeps _docker and _container alive for the duration of the test
macro_rules! setup_test {
    ($docker:ident, $container:ident, $state:ident) => {
        let $docker = Cli::default();
        let $container = $docker.run(common::create_postgres_container());
        let host_port = $container.get_host_port_ipv4(common::POSTGRES_PORT);
        let $state = common::app_state(common::connect(host_port).await);
    };
}

fn named(name: &str) -> CreateProjectRequest {
    CreateProjectRequest {
        name: name.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_project_create_requires_supabase() {
    setup_test!(_docker, _container, state);

    let user = common::create_user(&state.db, "nosupa@example.com").await;
    let token = state.user_tokens.issue(user.id).unwrap();

    let response = projects::create_project_handler(state.clone(), Some(token), named("Blocked"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(state.db.list_projects(user.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_project_create_uses_default_color() {
    setup_test!(_docker, _container, state);

    let user = common::create_user(&state.db, "color@example.com").await;
    common::configure_supabase(&state.db, user.id).await;
    let token = state.user_tokens.issue(user.id).unwrap();

    let response = projects::create_project_handler(state.clone(), Some(token), named("  Demo "))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stored = state.db.list_projects(user.id).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "Demo");
    assert_eq!(stored[0].color, DEFAULT_PROJECT_COLOR);
}

#[tokio::test]
async fn test_blank_names_write_nothing() {
    setup_test!(_docker, _container, state);

    let user = common::create_user(&state.db, "blank@example.com").await;
    common::configure_supabase(&state.db, user.id).await;
    let token = state.user_tokens.issue(user.id).unwrap();

    let response = projects::create_project_handler(state.clone(), Some(token.clone()), named(" "))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(state.db.list_projects(user.id).await.unwrap().is_empty());

    let response = projects::create_project_handler(state.clone(), Some(token.clone()), named("Real"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let project_id = state.db.list_projects(user.id).await.unwrap()[0].id;

    let response = sub_projects::create_sub_project_handler(
        project_id,
        state.clone(),
        Some(token),
        CreateSubProjectRequest::default(),
    )
    .await
    .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(state
        .db
        .list_sub_projects(user.id, project_id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_unauthenticated_calls_change_nothing() {
    setup_test!(_docker, _container, state);

    let user = common::create_user(&state.db, "victim@example.com").await;
    common::configure_supabase(&state.db, user.id).await;
    let token = state.user_tokens.issue(user.id).unwrap();
    projects::create_project_handler(state.clone(), Some(token), named("Keep"))
        .await
        .unwrap();
    let project_id = state.db.list_projects(user.id).await.unwrap()[0].id;

    let response = projects::delete_project_handler(project_id, state.clone(), None)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // an admin session is not a user session
    let admin_token = state.admin_tokens.issue(Uuid::new_v4()).unwrap();
    let response = projects::create_project_handler(state.clone(), Some(admin_token), named("Extra"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = admin_users::delete_user_handler(
        user.id,
        state.clone(),
        Some(state.user_tokens.issue(user.id).unwrap()),
    )
    .await
    .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let listed = state.db.list_projects(user.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Keep");
    assert!(state.db.get_user(user.id).await.is_ok());
}

#[tokio::test]
async fn test_other_users_projects_are_not_found() {
    setup_test!(_docker, _container, state);

    let owner = common::create_user(&state.db, "owner@example.com").await;
    let intruder = common::create_user(&state.db, "intruder@example.com").await;
    common::configure_supabase(&state.db, owner.id).await;
    let owner_token = state.user_tokens.issue(owner.id).unwrap();
    projects::create_project_handler(state.clone(), Some(owner_token), named("Private"))
        .await
        .unwrap();
    let project_id = state.db.list_projects(owner.id).await.unwrap()[0].id;

    let intruder_token = state.user_tokens.issue(intruder.id).unwrap();
    let response = projects::get_project_handler(project_id, state.clone(), Some(intruder_token.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = projects::delete_project_handler(project_id, state.clone(), Some(intruder_token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(state.db.list_projects(owner.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_admin_creates_user_who_can_log_in() {
    setup_test!(_docker, _container, state);

    let hash = password::hash_password("admin password").unwrap();
    let admin = state
        .db
        .create_admin("admin@example.com", &hash, "Admin")
        .await
        .unwrap();
    let admin_token = state.admin_tokens.issue(admin.id).unwrap();

    let request = CreateUserRequest {
        email: "New@Example.com".to_string(),
        password: "s3cret-pass".to_string(),
        name: "New User".to_string(),
        is_verified: Some(true),
    };
    let response = admin_users::create_user_handler(state.clone(), Some(admin_token.clone()), request.clone())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = admin_users::create_user_handler(state.clone(), Some(admin_token), request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let login = LoginRequest {
        email: "new@example.com".to_string(),
        password: "s3cret-pass".to_string(),
    };
    let response = auth::login_handler(state.clone(), login).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.starts_with("auth_token="));
    assert!(cookie.contains("HttpOnly"));

    let wrong = LoginRequest {
        email: "new@example.com".to_string(),
        password: "wrong password".to_string(),
    };
    let response = auth::login_handler(state.clone(), wrong).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_webhook_rejects_invalid_url() {
    setup_test!(_docker, _container, state);

    let admin_token = state.admin_tokens.issue(Uuid::new_v4()).unwrap();
    let request = WebhookTestRequest {
        webhook_url: "not-a-url".to_string(),
        method: WebhookMethod::Post,
    };
    let response = webhook::test_webhook_handler(state.clone(), Some(admin_token), request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

fn supabase_at(url: &str, anon_key: Option<&str>, use_service_role: bool) -> SupabaseConfigInput {
    SupabaseConfigInput {
        supabase_url: url.to_string(),
        anon_key: anon_key.map(str::to_string),
        service_role_key: None,
        use_service_role,
    }
}

#[tokio::test]
async fn test_supabase_check_without_config_is_not_found() {
    setup_test!(_docker, _container, state);

    let user = common::create_user(&state.db, "noconfig@example.com").await;
    let admin_token = state.admin_tokens.issue(Uuid::new_v4()).unwrap();

    let response = supabase_config::test_config_handler(user.id, state.clone(), Some(admin_token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_supabase_check_stamps_verified_on_success() {
    setup_test!(_docker, _container, state);

    let user = common::create_user(&state.db, "verified@example.com").await;
    let admin_token = state.admin_tokens.issue(Uuid::new_v4()).unwrap();
    let (url, captured) = common::serve_status("200 OK").await;
    state
        .db
        .upsert_supabase_config(user.id, &supabase_at(&url, Some("anon-key"), false))
        .await
        .unwrap();

    let response = supabase_config::test_config_handler(user.id, state.clone(), Some(admin_token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let sent = captured.await.unwrap();
    assert!(sent.starts_with("GET /rest/v1/ "));
    assert!(sent.to_lowercase().contains("apikey: anon-key"));

    let stored = state.db.get_supabase_config(user.id).await.unwrap().unwrap();
    assert!(stored.last_verified_at.is_some());
}

#[tokio::test]
async fn test_supabase_check_rejected_credentials_are_unprocessable() {
    setup_test!(_docker, _container, state);

    let user = common::create_user(&state.db, "rejected@example.com").await;
    let admin_token = state.admin_tokens.issue(Uuid::new_v4()).unwrap();
    let (url, _captured) = common::serve_status("401 Unauthorized").await;
    state
        .db
        .upsert_supabase_config(user.id, &supabase_at(&url, Some("stale-key"), false))
        .await
        .unwrap();

    let response = supabase_config::test_config_handler(user.id, state.clone(), Some(admin_token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let stored = state.db.get_supabase_config(user.id).await.unwrap().unwrap();
    assert!(stored.last_verified_at.is_none());
}

#[tokio::test]
async fn test_supabase_check_missing_selected_key_is_bad_request() {
    setup_test!(_docker, _container, state);

    let user = common::create_user(&state.db, "nokey@example.com").await;
    let admin_token = state.admin_tokens.issue(Uuid::new_v4()).unwrap();
    let (url, captured) = common::serve_status("200 OK").await;
    state
        .db
        .upsert_supabase_config(user.id, &supabase_at(&url, Some("anon-key"), true))
        .await
        .unwrap();

    let response = supabase_config::test_config_handler(user.id, state.clone(), Some(admin_token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // nothing was sent upstream
    assert!(!captured.is_finished());
    captured.abort();
}
