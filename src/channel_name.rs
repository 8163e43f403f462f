// Voice channel names look like "<prefix>: <suffix>", e.g. "Gaming: Chess".
// The prefix is what the server admins picked and is never touched; the
// suffix says what's being played or goes back to TBD when the room empties.

pub const VACANT_SUFFIX: &str = "TBD";

/// Everything before the first colon, `None` if there isn't one
fn prefix(name: &str) -> Option<&str> {
    name.find(':').map(|i| &name[..i])
}

/// Name to reset an emptied channel to, `None` for names without a colon
pub fn vacant(name: &str) -> Option<String> {
    prefix(name).map(|prefix| format!("{}: {}", prefix, VACANT_SUFFIX))
}

// A name without a colon has no prefix to keep, so "Lounge" becomes ": Chess"
pub fn playing(name: &str, activities: &[String]) -> String {
    format!("{}: {}", prefix(name).unwrap_or(""), activities.join(" & "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_stops_at_first_colon() {
        assert_eq!(prefix("Gaming: Chess"), Some("Gaming"));
        assert_eq!(prefix("Room 2: Chess: Blitz"), Some("Room 2"));
        assert_eq!(prefix(": Chess"), Some(""));
        assert_eq!(prefix("Lounge"), None);
    }

    #[test]
    fn vacant_keeps_prefix_verbatim() {
        assert_eq!(vacant("Gaming: Chess").as_deref(), Some("Gaming: TBD"));
        assert_eq!(
            vacant("  Spaced Out :x: y").as_deref(),
            Some("  Spaced Out : TBD")
        );
        assert_eq!(vacant("Gaming:").as_deref(), Some("Gaming: TBD"));
    }

    #[test]
    fn vacant_skips_names_without_colon() {
        assert_eq!(vacant("Lounge"), None);
        assert_eq!(vacant(""), None);
    }

    #[test]
    fn playing_joins_with_ampersand() {
        let activities = vec!["Chess".to_string(), "Go".to_string()];
        assert_eq!(playing("Gaming: TBD", &activities), "Gaming: Chess & Go");
        assert_eq!(playing("Gaming: Old: Stuff", &activities[..1]), "Gaming: Chess");
    }

    #[test]
    fn playing_without_colon_drops_the_name() {
        let activities = vec!["Chess".to_string()];
        assert_eq!(playing("Lounge", &activities), ": Chess");
        assert_eq!(playing("", &activities), ": Chess");
    }
}
