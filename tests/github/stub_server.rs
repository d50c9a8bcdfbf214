//! Minimal GitHub REST stand-in served on a loopback port.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const OWNER: &str = "octocat";

/// Start the server and return its base URL, e.g. `http://127.0.0.1:40123`.
pub async fn start() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let app = Router::new()
        .route("/users/octocat", get(profile))
        .route("/users/octocat/repos", get(repositories))
        .route("/users/ghost", get(missing_user))
        .route("/users/busy", get(rate_limited))
        .route("/users/hidden", get(forbidden))
        .with_state(base.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    base
}

async fn profile() -> Json<Value> {
    Json(json!({
        "login": OWNER,
        "name": "The Octocat",
        "company": null,
        "location": "San Francisco",
        "created_at": "2011-01-25T18:44:36Z",
        "updated_at": "2024-05-01T09:00:00Z",
        "public_repos": 3,
        "followers": 42,
        "following": 1
    }))
}

fn repository(name: &str, updated_at: &str) -> Value {
    json!({
        "name": name,
        "description": null,
        "stargazers_count": 1,
        "fork": false,
        "created_at": "2020-01-01T00:00:00Z",
        "updated_at": updated_at
    })
}

/// Two pages chained with a `Link` header. Any other sort order is refused so
/// a wrong query string shows up as a failure.
async fn repositories(
    State(base): State<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if query.get("sort").map(String::as_str) != Some("updated")
        || query.get("type").map(String::as_str) != Some("all")
    {
        return (StatusCode::BAD_REQUEST, Json(json!({ "message": "unexpected query" })))
            .into_response();
    }

    match query.get("page").map(String::as_str) {
        None | Some("1") => {
            let next = format!(
                "<{base}/users/{OWNER}/repos?type=all&sort=updated&direction=desc&per_page=100&page=2>; rel=\"next\", \
                 <{base}/users/{OWNER}/repos?type=all&sort=updated&direction=desc&per_page=100&page=2>; rel=\"last\""
            );
            let body = json!([
                repository("newest", "2024-05-01T00:00:00Z"),
                repository("middle", "2024-04-01T00:00:00Z"),
            ]);
            ([(header::LINK, next)], Json(body)).into_response()
        }
        Some("2") => {
            let mut fork = repository("oldest", "2024-03-01T00:00:00Z");
            fork["fork"] = json!(true);
            fork["parent"] = json!({ "full_name": "upstream/oldest" });
            Json(json!([fork])).into_response()
        }
        Some(_) => (StatusCode::NOT_FOUND, Json(not_found_body())).into_response(),
    }
}

fn not_found_body() -> Value {
    json!({
        "message": "Not Found",
        "documentation_url": "https://docs.github.com/rest/users/users#get-a-user"
    })
}

async fn missing_user() -> Response {
    (StatusCode::NOT_FOUND, Json(not_found_body())).into_response()
}

async fn rate_limited() -> Response {
    let body = json!({
        "message": "API rate limit exceeded for 127.0.0.1. (But here's the good news: Authenticated requests get a higher rate limit.)",
        "documentation_url": "https://docs.github.com/rest/overview/resources-in-the-rest-api#rate-limiting"
    });
    (
        StatusCode::FORBIDDEN,
        [("x-ratelimit-remaining", "0")],
        Json(body),
    )
        .into_response()
}

async fn forbidden() -> Response {
    let body = json!({
        "message": "Resource not accessible by integration",
        "documentation_url": "https://docs.github.com/rest"
    });
    (StatusCode::FORBIDDEN, Json(body)).into_response()
}
