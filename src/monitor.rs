//! Decides what to do when someone's voice state changes.
//!
//! [`plan`] turns a [`VoiceUpdate`] into an ordered list of [`Step`]s without
//! touching Discord, so every branch of the voice-channel policy can be
//! exercised with plain values. Running the steps is [`crate::outbox`]'s job.

use crate::activity::{MemberActivitySnapshot, Occupant};
use crate::channel_name;
use serde::Deserialize;
use serenity::model::id::ChannelId;

/// A voice channel as it looked when the event arrived
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoiceChannelView {
    pub id: ChannelId,
    pub name: String,
    pub occupants: Vec<Occupant>,
}

/// Before/after view of one member's voice state change
#[derive(Clone, Debug, Default)]
pub struct VoiceUpdate {
    pub old_channel: Option<VoiceChannelView>,
    pub new_channel: Option<VoiceChannelView>,
    pub was_streaming: bool,
    pub is_streaming: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamTransition {
    Stopped,
    Continued,
    Started,
    Neither,
}

impl StreamTransition {
    pub fn classify(was_streaming: bool, is_streaming: bool) -> Self {
        match (was_streaming, is_streaming) {
            (true, false) => StreamTransition::Stopped,
            (true, true) => StreamTransition::Continued,
            (false, true) => StreamTransition::Started,
            (false, false) => StreamTransition::Neither,
        }
    }
}

/// What happens when someone who was already streaming changes voice state
/// (mute, deafen, moving channels, ...).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContinuedStreaming {
    /// Log what the channel would be called, leave it alone
    #[default]
    Observe,
    /// Bring the channel name up to date with what's being played now
    Rename,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Log,
    Announce,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Notify {
        target: Target,
        content: String,
    },
    Rename {
        channel: ChannelId,
        name: String,
        reason: Option<String>,
    },
}

impl Step {
    fn log(content: String) -> Self {
        Step::Notify {
            target: Target::Log,
            content,
        }
    }

    fn announce(content: String) -> Self {
        Step::Notify {
            target: Target::Announce,
            content,
        }
    }
}

pub fn plan(update: &VoiceUpdate, continued: ContinuedStreaming) -> Vec<Step> {
    match &update.new_channel {
        None => match &update.old_channel {
            Some(old) if old.occupants.is_empty() => vacated(old),
            _ => vec![],
        },
        Some(channel) => occupied(
            channel,
            StreamTransition::classify(update.was_streaming, update.is_streaming),
            continued,
        ),
    }
}

fn vacated(channel: &VoiceChannelView) -> Vec<Step> {
    tracing::info!("Everyone has left voice channel: {}", channel.name);
    let mut steps = vec![Step::log(format!(
        "Everyone has left voice channel: {}",
        channel.name
    ))];

    if let Some(name) = channel_name::vacant(&channel.name) {
        tracing::info!("New channel name is: {}", name);
        steps.push(Step::Rename {
            channel: channel.id,
            name,
            reason: None,
        });
    }

    steps
}

fn occupied(
    channel: &VoiceChannelView,
    transition: StreamTransition,
    continued: ContinuedStreaming,
) -> Vec<Step> {
    let snapshot = MemberActivitySnapshot::collect(&channel.occupants);
    tracing::info!(
        "There are {} people hanging out in {}. List: {}",
        snapshot.members.len(),
        channel.name,
        snapshot.members.join(",")
    );

    match transition {
        StreamTransition::Stopped => {
            tracing::info!("No one is streaming any more.");
            vec![Step::log("Stream ended!".to_string())]
        }
        StreamTransition::Continued => still_streaming(channel, &snapshot, continued),
        StreamTransition::Started => started_streaming(channel, &snapshot),
        StreamTransition::Neither => vec![],
    }
}

fn still_streaming(
    channel: &VoiceChannelView,
    snapshot: &MemberActivitySnapshot,
    continued: ContinuedStreaming,
) -> Vec<Step> {
    let name = channel_name::playing(&channel.name, &snapshot.activities);
    tracing::info!(
        "Still streaming! {} are being played, new channel name would be {}",
        snapshot.activities.join(","),
        name
    );

    match continued {
        ContinuedStreaming::Observe => vec![],
        ContinuedStreaming::Rename => {
            if snapshot.activities.is_empty() || name == channel.name {
                return vec![];
            }
            vec![Step::Rename {
                channel: channel.id,
                name,
                reason: Some(audit_reason(&snapshot.activities)),
            }]
        }
    }
}

fn started_streaming(channel: &VoiceChannelView, snapshot: &MemberActivitySnapshot) -> Vec<Step> {
    let count = snapshot.members.len();

    if snapshot.activities.is_empty() {
        tracing::info!("People must be screensharing?");
        return vec![Step::log(format!(
            "{} people are hanging out and might be screensharing",
            count
        ))];
    }

    let listed = snapshot.activities.join(",");
    tracing::info!("{} is/are being played", listed);

    vec![
        Step::Rename {
            channel: channel.id,
            name: channel_name::playing(&channel.name, &snapshot.activities),
            reason: Some(audit_reason(&snapshot.activities)),
        },
        Step::log(format!(
            "{} people are hanging out and playing {}",
            count, listed
        )),
        Step::announce(format!(
            "{} people are hanging out and playing: {}",
            count, listed
        )),
    ]
}

fn audit_reason(activities: &[String]) -> String {
    format!("Someone is streaming {}", activities.join(" & "))
}
