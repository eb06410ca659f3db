//! `userdesk profile` command implementations

use crate::api::{ApiClient, Attachment, ProfileUpdate, UserId};
use crate::commands::input::{payload_from_args, print_json};
use crate::error::Result;
use crate::PayloadArgs;
use std::path::Path;
use tracing::debug;

/// Show a user's profile
pub async fn get(client: &ApiClient, id: &UserId) -> Result<()> {
    let profile = client.get_user_profile(id).await?;
    print_json(&profile)
}

/// Update a user's profile
///
/// With `avatar` the request goes out as multipart form data, otherwise as JSON.
pub async fn update(
    client: &ApiClient,
    id: &UserId,
    input: &PayloadArgs,
    avatar: Option<&Path>,
) -> Result<()> {
    let fields = payload_from_args(input)?;

    let update = match avatar {
        Some(path) => {
            let attachment = Attachment::from_path(path).await?;
            debug!(
                file = %attachment.file_name,
                content_type = %attachment.content_type,
                size = attachment.bytes.len(),
                "Uploading avatar"
            );
            ProfileUpdate::Multipart { fields, attachment }
        }
        None => ProfileUpdate::Plain(fields),
    };

    let profile = client.update_user_profile(id, update).await?;
    print_json(&profile)
}
