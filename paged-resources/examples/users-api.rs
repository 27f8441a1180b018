//! Users API Example - Paged collection with navigation links
//!
//! Serves an in-memory list of users as paged resources. It demonstrates:
//!
//! - Reading `page`, `size` and `sort` with the `PageRequest` extractor
//! - Carrying filters such as `search` over to every link with `CurrentRequest`
//! - Sorting by any field in either direction
//! - Overriding paging defaults from `config.toml` or `PAGED_` variables
//!
//! Run with: cargo run --example users-api
//!
//! Test with:
//!   curl 'http://localhost:8080/users'
//!   curl 'http://localhost:8080/users?page=2&size=5'
//!   curl 'http://localhost:8080/users?search=a&sort=name,desc&size=3'
//!   curl -i 'http://localhost:8080/users?size=4'   # See the Link header
//!   curl 'http://localhost:8080/users?sort=name,sideways'   # 400 MALFORMED_SORT

use std::cmp::Ordering;

use axum::{routing::get, Extension, Router};
use paged_resources::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
struct User {
    id: u64,
    name: String,
    email: String,
}

const NAMES: [&str; 23] = [
    "alice", "bob", "carol", "dave", "erin", "frank", "grace", "heidi", "ivan", "judy", "mallory",
    "niaj", "olivia", "peggy", "rupert", "sybil", "trent", "uma", "victor", "walter", "xena",
    "yara", "zoe",
];

fn users() -> Vec<User> {
    NAMES
        .iter()
        .zip(1..)
        .map(|(name, id)| User {
            id,
            name: name.to_string(),
            email: format!("{name}@example.com"),
        })
        .collect()
}

fn compare(a: &User, b: &User, order: &Order) -> Ordering {
    let ordering = match order.property.as_str() {
        "id" => a.id.cmp(&b.id),
        "email" => a.email.cmp(&b.email),
        _ => a.name.cmp(&b.name),
    };

    if order.direction.is_ascending() {
        ordering
    } else {
        ordering.reverse()
    }
}

async fn list_users(
    current: CurrentRequest,
    request: PageRequest,
) -> Result<PagedResources<User>> {
    let mut matching: Vec<User> = match current.params().first("search") {
        Some(term) => users()
            .into_iter()
            .filter(|user| user.name.contains(term))
            .collect(),
        None => users(),
    };

    matching.sort_by(|a, b| {
        request
            .sort
            .orders()
            .iter()
            .map(|order| compare(a, b, order))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    });

    let total = matching.len() as u64;
    let content = matching
        .into_iter()
        .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
        .take(request.size as usize)
        .collect();

    current.paged(Page::new(content, request, total))
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    init_tracing(&config)?;

    let app = Router::new()
        .route("/users", get(list_users))
        .layer(Extension(config.paging.clone()));

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080")
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind: {e}")))?;

    tracing::info!("Listening on http://0.0.0.0:8080/users");

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Internal(format!("Server error: {e}")))?;

    Ok(())
}
