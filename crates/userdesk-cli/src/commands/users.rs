//! `userdesk users` command implementations

use crate::api::{ApiClient, Payload, UserId};
use crate::commands::input::{parse_pairs, payload_from_args, print_json};
use crate::error::Result;
use crate::PayloadArgs;
use serde_json::Value;
use tracing::info;

/// List users, forwarding `--param` pairs as the query
pub async fn list(client: &ApiClient, params: &[String]) -> Result<()> {
    let query: Payload = parse_pairs(params)?
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect();
    let query = (!query.is_empty()).then_some(query);

    let users = client.list_users(query).await?;
    info!(count = users.len(), "Listed users");
    print_json(&users)
}

/// Show one user
pub async fn get(client: &ApiClient, id: &UserId) -> Result<()> {
    let user = client.get_user(id).await?;
    print_json(&user)
}

/// Create a user
pub async fn create(client: &ApiClient, input: &PayloadArgs) -> Result<()> {
    let payload = payload_from_args(input)?;
    let user = client.create_user(&payload).await?;
    info!(id = %user.id, username = %user.username, "Created user");
    print_json(&user)
}

/// Update a user
pub async fn update(client: &ApiClient, id: &UserId, input: &PayloadArgs) -> Result<()> {
    let payload = payload_from_args(input)?;
    let user = client.update_user(id, &payload).await?;
    print_json(&user)
}

/// Delete a user
pub async fn delete(client: &ApiClient, id: &UserId) -> Result<()> {
    client.delete_user(id).await?;
    info!(id = %id, "Deleted user");
    println!("Deleted user {}", id);
    Ok(())
}

/// Set a user's bio through the legacy endpoint
pub async fn set_bio(client: &ApiClient, id: &UserId, bio: &str) -> Result<()> {
    let reply = client.update_user_bio(id, bio).await?;
    print_json(&reply)
}
