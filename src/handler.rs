use crate::activity::{ActivityView, Occupant};
use crate::config::Config;
use crate::monitor::{self, ContinuedStreaming, VoiceChannelView, VoiceUpdate};
use crate::outbox::{self, ChatOps, Channels};
use serenity::all::{
    ActivityData, ChannelId, Context, EventHandler, Guild, OnlineStatus, Ready, VoiceState,
};
use serenity::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

pub const READY_MESSAGE: &str = "Cyder Ready";
pub const SHUTDOWN_MESSAGE: &str = "Shutting down";

/// State shared by the event handler and the shutdown hook
pub struct App {
    configured: Channels,
    // Filled in on ready with whichever configured channels could be fetched
    resolved: RwLock<Channels>,
    started: AtomicBool,
    continued_streaming: ContinuedStreaming,
}

impl App {
    pub fn new(config: &Config) -> Self {
        App {
            configured: Channels {
                log: config.log_channel_id,
                announce: config.announce_channel_id,
            },
            resolved: RwLock::new(Channels::default()),
            started: AtomicBool::new(false),
            continued_streaming: config.continued_streaming,
        }
    }

    pub async fn channels(&self) -> Channels {
        *self.resolved.read().await
    }

    /// Looks up the configured channels and says hello in the log channel.
    /// Only the first call does anything; later ready events are reconnects.
    pub async fn start<O: ChatOps + ?Sized>(&self, ops: &O) {
        if self.started.swap(true, Ordering::SeqCst) {
            tracing::debug!("Already started, skipping ready message");
            return;
        }

        let channels = Channels {
            log: resolve(ops, "log", self.configured.log).await,
            announce: resolve(ops, "announce", self.configured.announce).await,
        };
        *self.resolved.write().await = channels;

        outbox::notify(ops, channels.log, READY_MESSAGE).await;
    }

    pub async fn stop<O: ChatOps + ?Sized>(&self, ops: &O) {
        outbox::notify(ops, self.channels().await.log, SHUTDOWN_MESSAGE).await;
    }

    pub async fn voice_state_changed<O: ChatOps + ?Sized>(&self, ops: &O, update: &VoiceUpdate) {
        let steps = monitor::plan(update, self.continued_streaming);
        if steps.is_empty() {
            return;
        }
        outbox::apply(ops, &self.channels().await, &steps).await;
    }
}

async fn resolve<O: ChatOps + ?Sized>(
    ops: &O,
    which: &str,
    channel: Option<ChannelId>,
) -> Option<ChannelId> {
    let channel = channel?;
    match ops.fetch(channel).await {
        Ok(()) => Some(channel),
        Err(e) => {
            tracing::warn!("Unable to fetch {} channel {}: {}", which, channel, e);
            None
        }
    }
}

pub struct Handler {
    pub app: Arc<App>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        ctx.set_presence(
            Some(ActivityData::watching("for changes")),
            OnlineStatus::Online,
        );
        tracing::info!("{} is connected and ready!", ready.user.name);

        self.app.start(&*ctx.http).await;
    }

    async fn voice_state_update(&self, ctx: Context, old: Option<VoiceState>, new: VoiceState) {
        let Some(guild_id) = new.guild_id else {
            return;
        };

        // The cache already reflects `new`, so occupant lists are current.
        // Guild refs can't be held across awaits, so copy out what we need.
        let update = {
            let Some(guild) = ctx.cache.guild(guild_id) else {
                tracing::warn!("Voice state update for uncached guild {}", guild_id);
                return;
            };
            VoiceUpdate {
                old_channel: old
                    .as_ref()
                    .and_then(|state| state.channel_id)
                    .and_then(|id| channel_view(&guild, id)),
                new_channel: new.channel_id.and_then(|id| channel_view(&guild, id)),
                was_streaming: old
                    .as_ref()
                    .and_then(|state| state.self_stream)
                    .unwrap_or(false),
                is_streaming: new.self_stream.unwrap_or(false),
            }
        };

        self.app.voice_state_changed(&*ctx.http, &update).await;
    }
}

fn channel_view(guild: &Guild, id: ChannelId) -> Option<VoiceChannelView> {
    let channel = guild.channels.get(&id)?;
    let occupants = guild
        .voice_states
        .values()
        .filter(|state| state.channel_id == Some(id))
        .map(|state| occupant(guild, state))
        .collect();

    Some(VoiceChannelView {
        id,
        name: channel.name.clone(),
        occupants,
    })
}

fn occupant(guild: &Guild, state: &VoiceState) -> Occupant {
    let display_name = state
        .member
        .as_ref()
        .or_else(|| guild.members.get(&state.user_id))
        .map_or_else(|| state.user_id.to_string(), |m| m.display_name().to_string());
    let activities = guild
        .presences
        .get(&state.user_id)
        .map(|presence| presence.activities.iter().map(ActivityView::from).collect())
        .unwrap_or_default();

    Occupant {
        display_name,
        activities,
    }
}
