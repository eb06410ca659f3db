//! CLI command implementations

pub mod input;
pub mod profile;
pub mod users;

use crate::api::ApiClient;
use crate::error::Result;
use crate::{Commands, ProfileCommand, UserCommand};

/// Run a parsed command against the API
pub async fn run(client: &ApiClient, command: &Commands) -> Result<()> {
    match command {
        Commands::Users { command } => match command {
            UserCommand::List { params } => users::list(client, params).await,
            UserCommand::Get { id } => users::get(client, id).await,
            UserCommand::Create { input } => users::create(client, input).await,
            UserCommand::Update { id, input } => users::update(client, id, input).await,
            UserCommand::Delete { id } => users::delete(client, id).await,
            UserCommand::Bio { id, bio } => users::set_bio(client, id, bio).await,
        },

        Commands::Profile { command } => match command {
            ProfileCommand::Get { id } => profile::get(client, id).await,
            ProfileCommand::Update { id, input, avatar } => {
                profile::update(client, id, input, avatar.as_deref()).await
            }
        },
    }
}
