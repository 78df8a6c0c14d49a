//! Lifecycle commands that a scheduling label may request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Container lifecycle command named by the label suffix.
///
/// Only these three commands are allowed; any other suffix is rejected at
/// parse time, so downstream code never sees an unknown command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleCommand {
    Start,
    Stop,
    Restart,
}

/// Error for a label suffix that is not a known lifecycle command.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unsupported command '{0}' (expected start, stop, or restart)")]
pub struct UnsupportedCommand(pub String);

impl FromStr for ScheduleCommand {
    type Err = UnsupportedCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            "restart" => Ok(Self::Restart),
            other => Err(UnsupportedCommand(other.to_string())),
        }
    }
}

impl fmt::Display for ScheduleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Restart => "restart",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_commands() {
        assert_eq!("start".parse::<ScheduleCommand>().unwrap(), ScheduleCommand::Start);
        assert_eq!("stop".parse::<ScheduleCommand>().unwrap(), ScheduleCommand::Stop);
        assert_eq!("restart".parse::<ScheduleCommand>().unwrap(), ScheduleCommand::Restart);
    }

    #[test]
    fn rejects_unknown_and_mixed_case() {
        assert!("pause".parse::<ScheduleCommand>().is_err());
        assert!("Restart".parse::<ScheduleCommand>().is_err());
        assert!("".parse::<ScheduleCommand>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for cmd in [ScheduleCommand::Start, ScheduleCommand::Stop, ScheduleCommand::Restart] {
            assert_eq!(cmd.to_string().parse::<ScheduleCommand>().unwrap(), cmd);
        }
    }
}
