use crate::error::Error;
use crate::monitor::ContinuedStreaming;
use serde::Deserialize;
use serenity::model::id::ChannelId;
use std::path::Path;

pub const DEFAULT_PATH: &str = "config.toml";

#[derive(Deserialize, Debug)]
struct FileConfig {
    bot_token: Option<String>,
    log_channel_id: Option<u64>,
    announce_channel_id: Option<u64>,
    #[serde(default)]
    continued_streaming: ContinuedStreaming,
}

#[derive(Debug)]
pub struct Config {
    pub bot_token: String,
    pub log_channel_id: Option<ChannelId>,
    pub announce_channel_id: Option<ChannelId>,
    pub continued_streaming: ContinuedStreaming,
}

impl Config {
    /// Reads `config.toml` (or `$CYDER_CONFIG`) then lets the process
    /// environment, including a `.env` file, override what it found.
    pub fn load() -> Result<Self, Error> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("Unable to load .env: {}", e);
            }
        }

        let path = std::env::var("CYDER_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let contents = read_optional(Path::new(&path))?;
        Self::from_parts(&contents, |key| std::env::var(key).ok())
    }

    fn from_parts<F>(contents: &str, env: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file: FileConfig = toml::from_str(contents)?;

        let bot_token = env("DISCORD_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .or(file.bot_token.filter(|t| !t.trim().is_empty()))
            .ok_or(Error::MissingToken)?;

        let log_channel_id = match env("LOG_CHANNEL_ID") {
            Some(raw) => parse_channel_env("LOG_CHANNEL_ID", &raw)?,
            None => file
                .log_channel_id
                .map(|id| channel_id("log_channel_id", id))
                .transpose()?,
        };
        let announce_channel_id = match env("ANNOUNCE_CHANNEL_ID") {
            Some(raw) => parse_channel_env("ANNOUNCE_CHANNEL_ID", &raw)?,
            None => file
                .announce_channel_id
                .map(|id| channel_id("announce_channel_id", id))
                .transpose()?,
        };

        Ok(Config {
            bot_token,
            log_channel_id,
            announce_channel_id,
            continued_streaming: file.continued_streaming,
        })
    }
}

// A missing file is fine when everything comes from the environment
fn read_optional(path: &Path) -> Result<String, Error> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(contents),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("No config file at {}, using environment", path.display());
            Ok(String::new())
        }
        Err(source) => Err(Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}

// Blank env vars count as unset, same as an empty LOG_CHANNEL_ID= line in .env
fn parse_channel_env(field: &'static str, raw: &str) -> Result<Option<ChannelId>, Error> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let id = raw.parse::<u64>().map_err(|_| Error::InvalidChannelId {
        field,
        value: raw.to_string(),
    })?;
    channel_id(field, id).map(Some)
}

fn channel_id(field: &'static str, id: u64) -> Result<ChannelId, Error> {
    if id == 0 {
        return Err(Error::InvalidChannelId {
            field,
            value: id.to_string(),
        });
    }
    Ok(ChannelId::new(id))
}
