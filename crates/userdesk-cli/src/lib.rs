//! Userdesk CLI Library
//!
//! Typed client for the users backend plus a small command-line front end.
//!
//! # Overview
//!
//! - **API client** ([`api::ApiClient`]): list, get, create, update and delete
//!   users, and read or update a user's profile, optionally with an avatar upload
//! - **Request normalization**: empty strings become `null` before sending
//! - **Response tap**: every outcome is logged, tagged with the request path
//! - **Commands**: `userdesk users ...` and `userdesk profile ...`
//!
//! # Example
//!
//! ```no_run
//! use userdesk_cli::api::{ApiClient, UserId};
//! use userdesk_cli::config::ClientConfig;
//!
//! # async fn run() -> userdesk_cli::Result<()> {
//! let client = ApiClient::new(&ClientConfig::from_env()?)?;
//! let user = client.get_user(&UserId::Numeric(1)).await?;
//! println!("{}", user.username);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod commands;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{CliError, Result};

use api::UserId;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Userdesk - manage users from the command line
#[derive(Parser, Debug)]
#[command(name = "userdesk")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (logs every API response)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Server URL
    #[arg(long, env = "USERDESK_SERVER_URL", global = true)]
    pub server_url: Option<String>,

    /// Path prefix of the API
    #[arg(long, global = true)]
    pub api_prefix: Option<String>,

    /// Send empty strings as-is instead of null
    #[arg(long, global = true)]
    pub no_normalize: bool,

    /// Do not log API responses and errors
    #[arg(long, global = true)]
    pub quiet_responses: bool,
}

impl Cli {
    /// Apply command-line overrides on top of a loaded config
    pub fn apply_to(&self, config: &mut ClientConfig) {
        if let Some(url) = &self.server_url {
            config.set_server_url(url.clone());
        }
        if let Some(prefix) = &self.api_prefix {
            config.set_api_prefix(prefix.clone());
        }
        if self.no_normalize {
            config.set_normalize_empty_strings(false);
        }
        if self.quiet_responses {
            config.set_log_responses(false);
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage users
    Users {
        #[command(subcommand)]
        command: UserCommand,
    },

    /// Manage user profiles
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
}

/// User subcommands
#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// List users
    List {
        /// Query parameter forwarded to the server (repeatable)
        #[arg(short, long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
    },

    /// Show one user
    Get {
        /// User id
        id: UserId,
    },

    /// Create a user
    Create {
        #[command(flatten)]
        input: PayloadArgs,
    },

    /// Update a user
    Update {
        /// User id
        id: UserId,

        #[command(flatten)]
        input: PayloadArgs,
    },

    /// Delete a user
    Delete {
        /// User id
        id: UserId,
    },

    /// Set a user's bio through the legacy bio endpoint
    Bio {
        /// User id
        id: UserId,

        /// New bio text
        bio: String,
    },
}

/// Profile subcommands
#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Show a user's profile
    Get {
        /// User id
        id: UserId,
    },

    /// Update a user's profile
    Update {
        /// User id
        id: UserId,

        #[command(flatten)]
        input: PayloadArgs,

        /// Image file to upload as the avatar (sends multipart form data)
        #[arg(long)]
        avatar: Option<PathBuf>,
    },
}

/// Request body given on the command line
#[derive(Args, Debug, Clone, Default)]
pub struct PayloadArgs {
    /// JSON object with the fields to send
    #[arg(short, long)]
    pub data: Option<String>,

    /// Single field (repeatable); applied on top of --data
    #[arg(short, long = "field", value_name = "KEY=VALUE")]
    pub fields: Vec<String>,
}
