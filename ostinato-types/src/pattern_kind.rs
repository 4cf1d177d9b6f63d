use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::PatternError;

/// Traversal policy: how the current position moves from one tick to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PatternKind {
    #[default]
    Up,
    Down,
    UpDown,
    DownUp,
    AlternateUp,
    AlternateDown,
    Random,
    RandomWalk,
    RandomOnce,
}

impl PatternKind {
    pub const ALL: [PatternKind; 9] = [
        PatternKind::Up,
        PatternKind::Down,
        PatternKind::UpDown,
        PatternKind::DownUp,
        PatternKind::AlternateUp,
        PatternKind::AlternateDown,
        PatternKind::Random,
        PatternKind::RandomWalk,
        PatternKind::RandomOnce,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PatternKind::Up => "Up",
            PatternKind::Down => "Down",
            PatternKind::UpDown => "Up/Down",
            PatternKind::DownUp => "Down/Up",
            PatternKind::AlternateUp => "Alt Up",
            PatternKind::AlternateDown => "Alt Down",
            PatternKind::Random => "Random",
            PatternKind::RandomWalk => "Random Walk",
            PatternKind::RandomOnce => "Random Once",
        }
    }

    /// Canonical identifier, as accepted by `FromStr` and written by serde.
    pub fn id(&self) -> &'static str {
        match self {
            PatternKind::Up => "up",
            PatternKind::Down => "down",
            PatternKind::UpDown => "upDown",
            PatternKind::DownUp => "downUp",
            PatternKind::AlternateUp => "alternateUp",
            PatternKind::AlternateDown => "alternateDown",
            PatternKind::Random => "random",
            PatternKind::RandomWalk => "randomWalk",
            PatternKind::RandomOnce => "randomOnce",
        }
    }

    /// Starting sign for the bouncing policies. Only `DownUp` begins descending.
    pub fn initial_direction(&self) -> isize {
        match self {
            PatternKind::DownUp => -1,
            _ => 1,
        }
    }

    pub fn next(&self) -> PatternKind {
        let pos = Self::ALL.iter().position(|k| k == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> PatternKind {
        let pos = Self::ALL.iter().position(|k| k == self).unwrap_or(0);
        Self::ALL[(pos + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for PatternKind {
    type Err = PatternError;

    /// Case-insensitive; `_`, `-` and spaces between words are ignored,
    /// so `upDown`, `up_down` and `UP-DOWN` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.id().eq_ignore_ascii_case(&folded))
            .ok_or_else(|| PatternError::InvalidPolicy(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_ids() {
        for kind in PatternKind::ALL {
            assert_eq!(kind.id().parse::<PatternKind>().unwrap(), kind);
        }
    }

    #[test]
    fn parses_loose_spellings() {
        assert_eq!("up_down".parse::<PatternKind>().unwrap(), PatternKind::UpDown);
        assert_eq!("RANDOM-ONCE".parse::<PatternKind>().unwrap(), PatternKind::RandomOnce);
        assert_eq!("alternate up".parse::<PatternKind>().unwrap(), PatternKind::AlternateUp);
    }

    #[test]
    fn rejects_unknown_id() {
        let err = "sideways".parse::<PatternKind>().unwrap_err();
        assert_eq!(err, PatternError::InvalidPolicy("sideways".to_string()));
    }

    #[test]
    fn next_and_prev_cycle_through_all() {
        let mut kind = PatternKind::Up;
        for _ in 0..PatternKind::ALL.len() {
            assert_eq!(kind.next().prev(), kind);
            kind = kind.next();
        }
        assert_eq!(kind, PatternKind::Up);
        assert_eq!(PatternKind::Up.prev(), PatternKind::RandomOnce);
    }

    #[test]
    fn names_are_distinct() {
        let mut names: Vec<&str> = PatternKind::ALL.iter().map(|k| k.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), PatternKind::ALL.len());
        assert_eq!(PatternKind::UpDown.name(), "Up/Down");
    }

    #[test]
    fn only_down_up_starts_descending() {
        for kind in PatternKind::ALL {
            let expected = if kind == PatternKind::DownUp { -1 } else { 1 };
            assert_eq!(kind.initial_direction(), expected);
        }
    }

    #[test]
    fn serde_uses_camel_case_ids() {
        let json = serde_json::to_string(&PatternKind::AlternateDown).unwrap();
        assert_eq!(json, "\"alternateDown\"");
        let back: PatternKind = serde_json::from_str("\"randomWalk\"").unwrap();
        assert_eq!(back, PatternKind::RandomWalk);
    }
}
