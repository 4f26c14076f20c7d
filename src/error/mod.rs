//! Error types for the bot.
//!
//! `AppError` is the top-level error returned by services and platform calls.
//! Event handlers never return it to serenity; the bot runtime logs it and keeps
//! processing further events. Use [`AppError::is_not_found`] to separate the benign
//! "resource absent" case from genuine faults.

pub mod config;
pub mod internal;

use thiserror::Error;

use crate::error::{config::ConfigError, internal::InternalError};

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// A Discord resource (message, channel, guild) no longer exists.
    ///
    /// The Serenity platform converts HTTP 404 responses into this variant.
    ///
    /// # Fields
    /// - Message describing what resource was not found
    #[error("{0}")]
    NotFound(String),

    /// Unexpected data from Discord or the database.
    #[error(transparent)]
    InternalError(#[from] InternalError),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Returns true when the error means the target resource is gone.
    ///
    /// Covers both `AppError::NotFound` and Discord HTTP 404 responses.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::DiscordErr(err) => matches!(
                err.as_ref(),
                serenity::Error::Http(serenity::http::HttpError::UnsuccessfulRequest(response))
                    if response.status_code.as_u16() == 404
            ),
            _ => false,
        }
    }
}
