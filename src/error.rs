use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Error reading {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error parsing config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Neither `bot_token` nor `DISCORD_TOKEN` was provided.
    #[error("Missing bot token, set bot_token in config.toml or DISCORD_TOKEN")]
    MissingToken,

    #[error("Invalid channel id for {field}: {value}")]
    InvalidChannelId { field: &'static str, value: String },

    #[error(transparent)]
    Discord(#[from] serenity::Error),
}
