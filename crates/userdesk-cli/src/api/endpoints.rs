//! API endpoint path builders
//!
//! Paths are relative to the API base URL and always end with a slash; the
//! backend's routes treat `/users/1` and `/users/1/` as different URLs.

use crate::api::types::UserId;

/// Join the server URL and the API prefix into the base URL
///
/// `("http://localhost:8000/", "api")` and `("http://localhost:8000", "/api/")`
/// both give `http://localhost:8000/api`.
pub fn base_url(server_url: &str, api_prefix: &str) -> String {
    let server = server_url.trim_end_matches('/');
    let prefix = api_prefix.trim_matches('/');
    if prefix.is_empty() {
        server.to_string()
    } else {
        format!("{}/{}", server, prefix)
    }
}

/// Absolute URL of a path under the base URL
pub fn url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// User collection
pub fn users_path() -> String {
    "/users/".to_string()
}

/// Single user
pub fn user_path(id: &UserId) -> String {
    format!("/users/{}/", id.path_segment())
}

/// Profile of a user
pub fn user_profile_path(id: &UserId) -> String {
    format!("/users/{}/profile/", id.path_segment())
}

/// Legacy bio-only endpoint
pub fn user_bio_path(id: &UserId) -> String {
    format!("/users/{}/bio/", id.path_segment())
}
