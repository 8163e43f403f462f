use serenity::model::gateway::{Activity, ActivityType};
use std::collections::HashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivityKind {
    Playing,
    Streaming,
    Listening,
    Watching,
    Competing,
    /// The user's custom status, never a game
    Custom,
    Other,
}

impl ActivityKind {
    /// Kinds that say what someone in the room is doing
    pub fn qualifies(self) -> bool {
        matches!(
            self,
            ActivityKind::Playing | ActivityKind::Streaming | ActivityKind::Competing
        )
    }
}

impl From<ActivityType> for ActivityKind {
    fn from(kind: ActivityType) -> Self {
        match kind {
            ActivityType::Playing => ActivityKind::Playing,
            ActivityType::Streaming => ActivityKind::Streaming,
            ActivityType::Listening => ActivityKind::Listening,
            ActivityType::Watching => ActivityKind::Watching,
            ActivityType::Competing => ActivityKind::Competing,
            ActivityType::Custom => ActivityKind::Custom,
            _ => ActivityKind::Other,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityView {
    pub kind: ActivityKind,
    pub name: String,
}

impl ActivityView {
    pub fn new(kind: ActivityKind, name: impl Into<String>) -> Self {
        ActivityView {
            kind,
            name: name.into(),
        }
    }

    fn qualifies(&self) -> bool {
        self.kind.qualifies() && !self.name.trim().is_empty()
    }
}

impl From<&Activity> for ActivityView {
    fn from(activity: &Activity) -> Self {
        ActivityView::new(activity.kind.into(), activity.name.clone())
    }
}

/// Someone sitting in a voice channel
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Occupant {
    pub display_name: String,
    pub activities: Vec<ActivityView>,
}

/// Who is in a channel and what they're playing, rebuilt for every event
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MemberActivitySnapshot {
    pub members: Vec<String>,
    /// Distinct activity names in the order they were first seen
    pub activities: Vec<String>,
}

impl MemberActivitySnapshot {
    pub fn collect(occupants: &[Occupant]) -> Self {
        let mut seen = HashSet::new();
        let mut snapshot = MemberActivitySnapshot::default();

        for occupant in occupants {
            let current: Vec<&ActivityView> =
                occupant.activities.iter().filter(|a| a.qualifies()).collect();
            tracing::debug!(
                "Current activities for {}: {:?}",
                occupant.display_name,
                current
            );

            for activity in current {
                if seen.insert(activity.name.as_str()) {
                    snapshot.activities.push(activity.name.clone());
                }
            }
            snapshot.members.push(occupant.display_name.clone());
        }

        snapshot
    }
}
