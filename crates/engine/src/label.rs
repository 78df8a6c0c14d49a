//! Label parsing and validation for scheduling intent.

use std::collections::HashMap;

use tracing::warn;

use simple_core::{ScheduleCommand, ScheduleIntent, SCHEDULE_LABEL_PREFIX};

use crate::timer;

/// Whether a label key sits in the scheduling namespace (case-insensitive).
fn in_schedule_namespace(key: &str) -> bool {
    key.get(..SCHEDULE_LABEL_PREFIX.len())
        .is_some_and(|p| p.eq_ignore_ascii_case(SCHEDULE_LABEL_PREFIX))
}

/// Extract the scheduling intent from a container's label/attribute map.
///
/// `container` identifies the container in diagnostics only. Returns `None`
/// when no scheduling label is present, and also (with a warning) for every
/// rejection case: more than one matching key, an unsupported command
/// suffix, or an invalid schedule expression. The container is left
/// unscheduled in all of those; one bad label never terminates anything.
pub fn parse_intent(
    labels: &HashMap<String, String>,
    container: &str,
) -> Option<ScheduleIntent> {
    let mut matching: Vec<&String> = labels.keys().filter(|k| in_schedule_namespace(k)).collect();

    if matching.is_empty() {
        return None;
    }
    if matching.len() > 1 {
        matching.sort();
        warn!(
            container = %container,
            labels = ?matching,
            "multiple scheduling labels, treating container as unscheduled"
        );
        return None;
    }

    let key = matching.remove(0);
    // The prefix matched ASCII bytes, so this slice is on a char boundary.
    let suffix = &key[SCHEDULE_LABEL_PREFIX.len()..];
    let command = match suffix.parse::<ScheduleCommand>() {
        Ok(command) => command,
        Err(e) => {
            warn!(container = %container, label = %key, error = %e, "scheduling label rejected");
            return None;
        }
    };

    let expression = labels.get(key)?.clone();
    if !timer::validate(&expression) {
        warn!(
            container = %container,
            label = %key,
            expression = %expression,
            "invalid schedule expression, cannot register"
        );
        return None;
    }

    Some(ScheduleIntent {
        label_key: key.clone(),
        label_value: expression,
        command,
    })
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn single_valid_label_yields_intent() {
        let map = labels(&[
            ("simple.schedules.restart", "0 0 3 * * *"),
            ("com.example.other", "x"),
        ]);
        let intent = parse_intent(&map, "web").unwrap();
        assert_eq!(intent.command, ScheduleCommand::Restart);
        assert_eq!(intent.label_key, "simple.schedules.restart");
        assert_eq!(intent.label_value, "0 0 3 * * *");
        assert_eq!(intent.fingerprint(), "simple.schedules.restart=0 0 3 * * *");
    }

    #[test]
    fn five_field_expression_is_accepted() {
        let map = labels(&[("simple.schedules.stop", "0 4 * * *")]);
        let intent = parse_intent(&map, "web").unwrap();
        assert_eq!(intent.command, ScheduleCommand::Stop);
        assert_eq!(intent.label_value, "0 4 * * *");
    }

    #[test]
    fn prefix_match_is_case_insensitive() {
        let map = labels(&[("Simple.Schedules.start", "0 0 3 * * *")]);
        let intent = parse_intent(&map, "web").unwrap();
        assert_eq!(intent.command, ScheduleCommand::Start);
        // The exact key is preserved in the intent.
        assert_eq!(intent.label_key, "Simple.Schedules.start");
    }

    #[test]
    fn no_matching_label_yields_none() {
        let map = labels(&[("com.example.other", "x")]);
        assert!(parse_intent(&map, "web").is_none());
        assert!(parse_intent(&HashMap::new(), "web").is_none());
    }

    #[test]
    fn multiple_matching_labels_yield_none() {
        let map = labels(&[
            ("simple.schedules.start", "0 0 3 * * *"),
            ("simple.schedules.stop", "0 0 4 * * *"),
        ]);
        assert!(parse_intent(&map, "web").is_none());
    }

    #[test]
    fn unsupported_command_yields_none() {
        let map = labels(&[("simple.schedules.pause", "0 0 3 * * *")]);
        assert!(parse_intent(&map, "web").is_none());
    }

    #[test]
    fn uppercase_command_suffix_is_rejected() {
        let map = labels(&[("simple.schedules.Restart", "0 0 3 * * *")]);
        assert!(parse_intent(&map, "web").is_none());
    }

    #[test]
    fn invalid_expression_yields_none() {
        let map = labels(&[("simple.schedules.restart", "every day at 3am")]);
        assert!(parse_intent(&map, "web").is_none());
    }
}
