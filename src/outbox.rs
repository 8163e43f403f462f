use crate::error::Error;
use crate::monitor::{Step, Target};
use serenity::async_trait;
use serenity::builder::EditChannel;
use serenity::http::Http;
use serenity::model::id::ChannelId;

/// The calls the bot makes against Discord
#[async_trait]
pub trait ChatOps: Send + Sync {
    /// Checks the channel exists and the bot can see it
    async fn fetch(&self, channel: ChannelId) -> Result<(), Error>;

    async fn send(&self, channel: ChannelId, content: &str) -> Result<(), Error>;

    /// Returns the channel's name as Discord reports it after the edit
    async fn rename(
        &self,
        channel: ChannelId,
        name: &str,
        reason: Option<&str>,
    ) -> Result<String, Error>;
}

#[async_trait]
impl ChatOps for Http {
    async fn fetch(&self, channel: ChannelId) -> Result<(), Error> {
        channel.to_channel(self).await?;
        Ok(())
    }

    async fn send(&self, channel: ChannelId, content: &str) -> Result<(), Error> {
        channel.say(self, content).await?;
        Ok(())
    }

    async fn rename(
        &self,
        channel: ChannelId,
        name: &str,
        reason: Option<&str>,
    ) -> Result<String, Error> {
        let mut edit = EditChannel::new().name(name);
        if let Some(reason) = reason {
            edit = edit.audit_log_reason(reason);
        }
        Ok(channel.edit(self, edit).await?.name)
    }
}

/// Text channels notifications go to, either may be unset
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Channels {
    pub log: Option<ChannelId>,
    pub announce: Option<ChannelId>,
}

impl Channels {
    fn get(&self, target: Target) -> Option<ChannelId> {
        match target {
            Target::Log => self.log,
            Target::Announce => self.announce,
        }
    }
}

/// Sends a message if the channel is configured, logging instead of failing
pub async fn notify<O: ChatOps + ?Sized>(ops: &O, channel: Option<ChannelId>, content: &str) {
    let Some(channel) = channel else {
        return;
    };
    if let Err(e) = ops.send(channel, content).await {
        tracing::error!("Unable to send \"{}\" to {}: {}", content, channel, e);
    }
}

/// Runs steps in order. Failed notifications are logged and skipped; a failed
/// rename drops everything after it, since those steps report on the rename.
pub async fn apply<O: ChatOps + ?Sized>(ops: &O, channels: &Channels, steps: &[Step]) {
    for step in steps {
        match step {
            Step::Notify { target, content } => {
                notify(ops, channels.get(*target), content).await;
            }
            Step::Rename {
                channel,
                name,
                reason,
            } => {
                tracing::info!("Renaming channel {} to {}", channel, name);
                match ops.rename(*channel, name, reason.as_deref()).await {
                    Ok(new_name) => tracing::info!("New name set: {}", new_name),
                    Err(e) => {
                        tracing::error!("Unable to rename channel {} to {}: {}", channel, name, e);
                        return;
                    }
                }
            }
        }
    }
}
