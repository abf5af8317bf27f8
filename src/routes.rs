// Route definitions and rejection handling

use std::convert::Infallible;

use bytes::{Buf, BufMut, BytesMut};
use futures_util::future;
use futures_util::{Stream, StreamExt};
use serde::de::DeserializeOwned;
use serde_json::json;
use uuid::Uuid;
use warp::filters::BoxedFilter;
use warp::http::StatusCode;
use warp::reject::{InvalidHeader, MethodNotAllowed, Reject};
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

use crate::auth::{ADMIN_COOKIE, LEGACY_ADMIN_COOKIE, USER_COOKIE};
use crate::error::ApiError;
use crate::handlers::{
    admin_auth, admin_users, auth, chat, health, projects, sub_projects, supabase_config, webhook,
};
use crate::state::AppState;

/// Body cap for ordinary JSON requests
const JSON_LIMIT: u64 = 64 * 1024;

/// Chat turns may carry base64 images
const CHAT_LIMIT: u64 = 16 * 1024 * 1024;

/// Reasons a request is turned away before its handler runs
#[derive(Debug)]
enum RequestRejection {
    Unauthenticated,
    BodyTooLarge,
    MalformedBody(String),
}

impl Reject for RequestRejection {}

fn with_state(state: AppState) -> BoxedFilter<(AppState,)> {
    warp::any().map(move || state.clone()).boxed()
}

fn user_token() -> BoxedFilter<(Option<String>,)> {
    warp::cookie::optional(USER_COOKIE)
        .map(|token: Option<String>| token)
        .boxed()
}

/// `admin_session`, falling back to the older `admin_token` cookie
fn admin_token() -> BoxedFilter<(Option<String>,)> {
    warp::cookie::optional(ADMIN_COOKIE)
        .and(warp::cookie::optional(LEGACY_ADMIN_COOKIE))
        .map(|current: Option<String>, legacy: Option<String>| current.or(legacy))
        .boxed()
}

/// User cookie that must verify before the request body is touched
fn user_session(state: &AppState) -> BoxedFilter<(Option<String>,)> {
    let state = state.clone();
    user_token()
        .and_then(move |token: Option<String>| {
            let checked = state
                .require_user(token.as_deref())
                .map(|_| token)
                .map_err(|_| warp::reject::custom(RequestRejection::Unauthenticated));
            future::ready(checked)
        })
        .boxed()
}

/// Admin cookie that must verify before the request body is touched
fn admin_session(state: &AppState) -> BoxedFilter<(Option<String>,)> {
    let state = state.clone();
    admin_token()
        .and_then(move |token: Option<String>| {
            let checked = state
                .require_admin(token.as_deref())
                .map(|_| token)
                .map_err(|_| warp::reject::custom(RequestRejection::Unauthenticated));
            future::ready(checked)
        })
        .boxed()
}

/// JSON body capped at `limit` bytes, with or without a content-length
fn json_body<T: DeserializeOwned + Send + 'static>(limit: u64) -> BoxedFilter<(T,)> {
    warp::header::optional::<u64>("content-length")
        .and(warp::body::stream())
        .and_then(move |declared: Option<u64>, body| read_json::<T, _, _>(declared, body, limit))
        .boxed()
}

async fn read_json<T, S, B>(declared: Option<u64>, body: S, limit: u64) -> Result<T, Rejection>
where
    T: DeserializeOwned,
    S: Stream<Item = Result<B, warp::Error>>,
    B: Buf,
{
    if declared.is_some_and(|len| len > limit) {
        return Err(warp::reject::custom(RequestRejection::BodyTooLarge));
    }

    let mut body = Box::pin(body);
    let mut buf = BytesMut::new();
    while let Some(chunk) = body.next().await {
        let chunk = chunk
            .map_err(|e| warp::reject::custom(RequestRejection::MalformedBody(e.to_string())))?;
        if (buf.len() + chunk.remaining()) as u64 > limit {
            return Err(warp::reject::custom(RequestRejection::BodyTooLarge));
        }
        buf.put(chunk);
    }

    serde_json::from_slice(&buf)
        .map_err(|e| warp::reject::custom(RequestRejection::MalformedBody(e.to_string())))
}

fn auth_routes(state: &AppState) -> BoxedFilter<(Response,)> {
    let base = warp::path("api").and(warp::path("auth"));

    // POST /api/auth/login
    let login = base
        .and(warp::path("login"))
        .and(warp::path::end())
        .and(warp::post())
        .and(with_state(state.clone()))
        .and(json_body(JSON_LIMIT))
        .and_then(auth::login_handler);

    // POST /api/auth/logout
    let logout = base
        .and(warp::path("logout"))
        .and(warp::path::end())
        .and(warp::post())
        .and(with_state(state.clone()))
        .and_then(auth::logout_handler);

    // GET /api/auth/me
    let me = base
        .and(warp::path("me"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state(state.clone()))
        .and(user_token())
        .and_then(auth::me_handler);

    login.or(logout).unify().or(me).unify().boxed()
}

fn admin_auth_routes(state: &AppState) -> BoxedFilter<(Response,)> {
    let base = warp::path("api").and(warp::path("admin")).and(warp::path("auth"));

    // POST /api/admin/auth/login
    let login = base
        .and(warp::path("login"))
        .and(warp::path::end())
        .and(warp::post())
        .and(with_state(state.clone()))
        .and(json_body(JSON_LIMIT))
        .and_then(admin_auth::login_handler);

    // POST /api/admin/auth/logout
    let logout = base
        .and(warp::path("logout"))
        .and(warp::path::end())
        .and(warp::post())
        .and(with_state(state.clone()))
        .and_then(admin_auth::logout_handler);

    // GET /api/admin/auth/verify
    let verify = base
        .and(warp::path("verify"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state(state.clone()))
        .and(admin_token())
        .and_then(admin_auth::verify_handler);

    // GET /api/admin/auth/me
    let me = base
        .and(warp::path("me"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state(state.clone()))
        .and(admin_token())
        .and_then(admin_auth::me_handler);

    login
        .or(logout)
        .unify()
        .or(verify)
        .unify()
        .or(me)
        .unify()
        .boxed()
}

fn admin_user_routes(state: &AppState) -> BoxedFilter<(Response,)> {
    let users = warp::path("api").and(warp::path("admin")).and(warp::path("users"));

    // GET /api/admin/users
    let list = users
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state(state.clone()))
        .and(admin_token())
        .and_then(admin_users::list_users_handler);

    // POST /api/admin/users
    let create = users
        .and(warp::path::end())
        .and(warp::post())
        .and(with_state(state.clone()))
        .and(admin_session(state))
        .and(json_body(JSON_LIMIT))
        .and_then(admin_users::create_user_handler);

    // GET /api/admin/users/{id}
    let get = users
        .and(warp::path::param::<Uuid>())
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state(state.clone()))
        .and(admin_token())
        .and_then(admin_users::get_user_handler);

    // PUT /api/admin/users/{id}
    let update = users
        .and(warp::path::param::<Uuid>())
        .and(warp::path::end())
        .and(warp::put())
        .and(with_state(state.clone()))
        .and(admin_session(state))
        .and(json_body(JSON_LIMIT))
        .and_then(admin_users::update_user_handler);

    // DELETE /api/admin/users/{id}
    let delete = users
        .and(warp::path::param::<Uuid>())
        .and(warp::path::end())
        .and(warp::delete())
        .and(with_state(state.clone()))
        .and(admin_token())
        .and_then(admin_users::delete_user_handler);

    let config = users
        .and(warp::path::param::<Uuid>())
        .and(warp::path("supabase-config"));

    // GET /api/admin/users/{id}/supabase-config
    let get_config = config
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state(state.clone()))
        .and(admin_token())
        .and_then(supabase_config::get_config_handler);

    // PUT /api/admin/users/{id}/supabase-config
    let put_config = config
        .and(warp::path::end())
        .and(warp::put())
        .and(with_state(state.clone()))
        .and(admin_session(state))
        .and(json_body(JSON_LIMIT))
        .and_then(supabase_config::put_config_handler);

    // DELETE /api/admin/users/{id}/supabase-config
    let delete_config = config
        .and(warp::path::end())
        .and(warp::delete())
        .and(with_state(state.clone()))
        .and(admin_token())
        .and_then(supabase_config::delete_config_handler);

    // POST /api/admin/users/{id}/supabase-config/test
    let test_config = config
        .and(warp::path("test"))
        .and(warp::path::end())
        .and(warp::post())
        .and(with_state(state.clone()))
        .and(admin_token())
        .and_then(supabase_config::test_config_handler);

    // POST /api/admin/webhook/test
    let test_webhook = warp::path("api")
        .and(warp::path("admin"))
        .and(warp::path("webhook"))
        .and(warp::path("test"))
        .and(warp::path::end())
        .and(warp::post())
        .and(with_state(state.clone()))
        .and(admin_session(state))
        .and(json_body(JSON_LIMIT))
        .and_then(webhook::test_webhook_handler);

    list.or(create)
        .unify()
        .or(get)
        .unify()
        .or(update)
        .unify()
        .or(delete)
        .unify()
        .or(get_config)
        .unify()
        .or(put_config)
        .unify()
        .or(delete_config)
        .unify()
        .or(test_config)
        .unify()
        .or(test_webhook)
        .unify()
        .boxed()
}

fn project_routes(state: &AppState) -> BoxedFilter<(Response,)> {
    let projects_path = warp::path("api").and(warp::path("user")).and(warp::path("projects"));
    let sub_projects_path = projects_path.and(warp::path("sub-projects"));

    // GET /api/user/projects
    let list = projects_path
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state(state.clone()))
        .and(user_token())
        .and_then(projects::list_projects_handler);

    // POST /api/user/projects
    let create = projects_path
        .and(warp::path::end())
        .and(warp::post())
        .and(with_state(state.clone()))
        .and(user_session(state))
        .and(json_body(JSON_LIMIT))
        .and_then(projects::create_project_handler);

    // GET /api/user/projects/{id}
    let get = projects_path
        .and(warp::path::param::<Uuid>())
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state(state.clone()))
        .and(user_token())
        .and_then(projects::get_project_handler);

    // PUT /api/user/projects/{id}
    let update = projects_path
        .and(warp::path::param::<Uuid>())
        .and(warp::path::end())
        .and(warp::put())
        .and(with_state(state.clone()))
        .and(user_session(state))
        .and(json_body(JSON_LIMIT))
        .and_then(projects::update_project_handler);

    // DELETE /api/user/projects/{id}
    let delete = projects_path
        .and(warp::path::param::<Uuid>())
        .and(warp::path::end())
        .and(warp::delete())
        .and(with_state(state.clone()))
        .and(user_token())
        .and_then(projects::delete_project_handler);

    // GET /api/user/projects/{id}/sub-projects
    let list_subs = projects_path
        .and(warp::path::param::<Uuid>())
        .and(warp::path("sub-projects"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state(state.clone()))
        .and(user_token())
        .and_then(sub_projects::list_sub_projects_handler);

    // POST /api/user/projects/{id}/sub-projects
    let create_sub = projects_path
        .and(warp::path::param::<Uuid>())
        .and(warp::path("sub-projects"))
        .and(warp::path::end())
        .and(warp::post())
        .and(with_state(state.clone()))
        .and(user_session(state))
        .and(json_body(JSON_LIMIT))
        .and_then(sub_projects::create_sub_project_handler);

    // PUT /api/user/projects/sub-projects/{subProjectId}
    let update_sub = sub_projects_path
        .and(warp::path::param::<Uuid>())
        .and(warp::path::end())
        .and(warp::put())
        .and(with_state(state.clone()))
        .and(user_session(state))
        .and(json_body(JSON_LIMIT))
        .and_then(sub_projects::update_sub_project_handler);

    // DELETE /api/user/projects/sub-projects/{subProjectId}
    let delete_sub = sub_projects_path
        .and(warp::path::param::<Uuid>())
        .and(warp::path::end())
        .and(warp::delete())
        .and(with_state(state.clone()))
        .and(user_token())
        .and_then(sub_projects::delete_sub_project_handler);

    // GET /api/user/projects/sub-projects/{subProjectId}/files
    let files = sub_projects_path
        .and(warp::path::param::<Uuid>())
        .and(warp::path("files"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state(state.clone()))
        .and(user_token())
        .and_then(sub_projects::list_files_handler);

    list.or(create)
        .unify()
        .or(get)
        .unify()
        .or(update)
        .unify()
        .or(delete)
        .unify()
        .or(list_subs)
        .unify()
        .or(create_sub)
        .unify()
        .or(update_sub)
        .unify()
        .or(delete_sub)
        .unify()
        .or(files)
        .unify()
        .boxed()
}

fn misc_routes(state: &AppState) -> BoxedFilter<(Response,)> {
    // POST /api/chat
    let chat = warp::path("api")
        .and(warp::path("chat"))
        .and(warp::path::end())
        .and(warp::post())
        .and(with_state(state.clone()))
        .and(user_session(state))
        .and(json_body(CHAT_LIMIT))
        .and_then(chat::chat_handler);

    // GET /api/health
    let health = warp::path("api")
        .and(warp::path("health"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(health::health_handler);

    chat.or(health).unify().boxed()
}

pub fn configure_routes(state: AppState) -> BoxedFilter<(Response,)> {
    auth_routes(&state)
        .or(admin_auth_routes(&state))
        .unify()
        .or(admin_user_routes(&state))
        .unify()
        .or(project_routes(&state))
        .unify()
        .or(misc_routes(&state))
        .unify()
        .boxed()
}

/// Map unmatched requests and body errors to `{"error": ...}` replies
pub async fn handle_rejection(rejection: Rejection) -> Result<Response, Infallible> {
    let (status, message) = if let Some(reason) = rejection.find::<RequestRejection>() {
        match reason {
            RequestRejection::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, ApiError::Unauthorized.to_string())
            }
            RequestRejection::BodyTooLarge => {
                (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large".to_string())
            }
            RequestRejection::MalformedBody(e) => {
                (StatusCode::BAD_REQUEST, format!("Invalid request body: {}", e))
            }
        }
    } else if rejection.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string())
    } else if let Some(e) = rejection.find::<InvalidHeader>() {
        (StatusCode::BAD_REQUEST, e.to_string())
    } else if rejection.find::<MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
    } else {
        tracing::error!(?rejection, "unhandled rejection");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        )
    };

    Ok(warp::reply::with_status(warp::reply::json(&json!({ "error": message })), status)
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::offline_state;
    use crate::upstream::fixture;
    use bytes::Bytes;
    use serde_json::Value;

    fn app(state: AppState) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + 'static {
        configure_routes(state).recover(handle_rejection)
    }

    fn error_of(body: &[u8]) -> String {
        let value: Value = serde_json::from_slice(body).unwrap();
        value["error"].as_str().unwrap().to_string()
    }

    fn chunks(parts: &[&'static str]) -> impl Stream<Item = Result<Bytes, warp::Error>> {
        futures_util::stream::iter(
            parts
                .iter()
                .copied()
                .map(|part| Ok::<_, warp::Error>(Bytes::from_static(part.as_bytes())))
                .collect::<Vec<_>>(),
        )
    }

    #[tokio::test]
    async fn test_not_found_rejection() {
        let response = handle_rejection(warp::reject::not_found()).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let response = warp::test::request()
            .method("GET")
            .path("/api/nothing-here")
            .reply(&app(offline_state(None)))
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unauthenticated_malformed_json_is_unauthorized() {
        let response = warp::test::request()
            .method("POST")
            .path("/api/user/projects")
            .header("content-type", "application/json")
            .body("{not json")
            .reply(&app(offline_state(None)))
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error_of(response.body()), "Unauthorized");
    }

    #[tokio::test]
    async fn test_unauthenticated_non_json_admin_body_is_unauthorized() {
        let response = warp::test::request()
            .method("POST")
            .path("/api/admin/users")
            .header("content-type", "text/plain")
            .body("hello")
            .reply(&app(offline_state(None)))
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unauthenticated_oversized_body_is_unauthorized() {
        let response = warp::test::request()
            .method("PUT")
            .path(&format!("/api/user/projects/{}", Uuid::new_v4()))
            .body(vec![b'x'; JSON_LIMIT as usize + 1])
            .reply(&app(offline_state(None)))
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_user_cookie_does_not_open_admin_routes() {
        let state = offline_state(None);
        let token = state.user_tokens.issue(Uuid::new_v4()).unwrap();
        let response = warp::test::request()
            .method("POST")
            .path("/api/admin/webhook/test")
            .header("cookie", format!("{}={}", USER_COOKIE, token))
            .body(r#"{"webhook_url": "not-a-url"}"#)
            .reply(&app(state))
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_legacy_admin_cookie_is_accepted() {
        let state = offline_state(None);
        let token = state.admin_tokens.issue(Uuid::new_v4()).unwrap();
        let filter = app(state);

        let response = warp::test::request()
            .method("POST")
            .path("/api/admin/webhook/test")
            .header("cookie", format!("{}={}", LEGACY_ADMIN_COOKIE, token))
            .body(r#"{"webhook_url": "not-a-url"}"#)
            .reply(&filter)
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_of(response.body()), "Invalid URL format");

        let response = warp::test::request()
            .method("GET")
            .path("/api/admin/auth/verify")
            .header("cookie", format!("{}={}", LEGACY_ADMIN_COOKIE, token))
            .reply(&filter)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_current_admin_cookie_wins_over_legacy() {
        let state = offline_state(None);
        let token = state.admin_tokens.issue(Uuid::new_v4()).unwrap();
        let response = warp::test::request()
            .method("GET")
            .path("/api/admin/auth/verify")
            .header(
                "cookie",
                format!("{}=garbage; {}={}", ADMIN_COOKIE, LEGACY_ADMIN_COOKIE, token),
            )
            .reply(&app(state))
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_sub_project_paths_are_not_taken_for_project_ids() {
        let state = offline_state(None);
        let token = state.user_tokens.issue(Uuid::new_v4()).unwrap();
        let filter = app(state);
        let cookie = format!("{}={}", USER_COOKIE, token);

        let response = warp::test::request()
            .method("PUT")
            .path(&format!("/api/user/projects/sub-projects/{}", Uuid::new_v4()))
            .header("cookie", &cookie)
            .body(r#"{"name": "   "}"#)
            .reply(&filter)
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_of(response.body()), "name is required");

        // reaches the files handler, which checks the session first
        let response = warp::test::request()
            .method("GET")
            .path(&format!("/api/user/projects/sub-projects/{}/files", Uuid::new_v4()))
            .reply(&filter)
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = warp::test::request()
            .method("PUT")
            .path("/api/user/projects/sub-projects/not-a-uuid")
            .header("cookie", &cookie)
            .body(r#"{"name": "x"}"#)
            .reply(&filter)
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_json_routes_cap_body_at_64_kib() {
        let state = offline_state(None);
        let token = state.user_tokens.issue(Uuid::new_v4()).unwrap();
        let response = warp::test::request()
            .method("POST")
            .path("/api/user/projects")
            .header("cookie", format!("{}={}", USER_COOKIE, token))
            .body(format!(r#"{{"name": "{}"}}"#, "a".repeat(JSON_LIMIT as usize)))
            .reply(&app(state))
            .await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_chat_accepts_bodies_past_the_json_cap() {
        let state = offline_state(None);
        let token = state.user_tokens.issue(Uuid::new_v4()).unwrap();
        let body = format!(r#"{{"input": "{}"}}"#, "a".repeat(JSON_LIMIT as usize * 4));

        let response = warp::test::request()
            .method("POST")
            .path("/api/chat")
            .header("cookie", format!("{}={}", USER_COOKIE, token))
            .body(body)
            .reply(&app(state))
            .await;
        // parsed and validated; fails only because no agent is configured
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_of(response.body()), "Failed to get response from agent");
    }

    #[tokio::test]
    async fn test_chat_streams_agent_reply_through_route() {
        let (url, release) =
            fixture::serve_chunked("text/event-stream", "data: one\n\n", "data: two\n\n").await;
        let state = offline_state(Some(url.as_str()));
        let token = state.user_tokens.issue(Uuid::new_v4()).unwrap();
        release.send(()).unwrap();

        let response = warp::test::request()
            .method("POST")
            .path("/api/chat")
            .header("cookie", format!("{}={}", USER_COOKIE, token))
            .body(r#"{"input": "hello"}"#)
            .reply(&app(state))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "text/event-stream");
        assert_eq!(&response.body()[..], b"data: one\n\ndata: two\n\n");
    }

    #[tokio::test]
    async fn test_read_json_accepts_chunked_body_without_length() {
        let value: Value = read_json(None, chunks(&[r#"{"na"#, r#"me": "#, r#""Atlas"}"#]), JSON_LIMIT)
            .await
            .unwrap();
        assert_eq!(value["name"], "Atlas");
    }

    #[tokio::test]
    async fn test_read_json_caps_chunked_body_while_reading() {
        let rejection = read_json::<Value, _, _>(None, chunks(&["[1,", "2,", "3]"]), 4)
            .await
            .unwrap_err();
        assert!(matches!(
            rejection.find::<RequestRejection>(),
            Some(RequestRejection::BodyTooLarge)
        ));
    }

    #[tokio::test]
    async fn test_read_json_rejects_declared_length_over_cap() {
        let rejection = read_json::<Value, _, _>(Some(10_000), chunks(&["{}"]), 1024)
            .await
            .unwrap_err();
        let response = handle_rejection(rejection).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let rejection = read_json::<Value, _, _>(None, chunks(&["{oops"]), JSON_LIMIT)
            .await
            .unwrap_err();
        let response = handle_rejection(rejection).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
