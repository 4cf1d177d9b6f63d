use ostinato_core::{PatternError, PatternKind, BPM_RANGE};

pub const USAGE: &str = "usage: ostinato [--pattern ID] [--bpm N] [--ticks N] [--seed N] [--verbose] EVENT...
  EVENT    any token; '-' or '.' is a rest
  ID       up, down, upDown, downUp, alternateUp, alternateDown,
           random, randomWalk, randomOnce";

const DEFAULT_TICKS: u64 = 16;

#[derive(Debug, Default, PartialEq)]
pub struct Args {
    pub verbose: bool,
    pub help: bool,
    pub pattern: Option<PatternKind>,
    pub bpm: Option<u16>,
    pub ticks: u64,
    pub seed: Option<u64>,
    pub events: Vec<Option<String>>,
}

#[derive(Debug, PartialEq)]
pub enum ArgsError {
    MissingValue(String),
    BadNumber(String, String),
    OutOfRange(String, u64),
    Pattern(PatternError),
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingValue(flag) => write!(f, "{} needs a value", flag),
            Self::BadNumber(flag, value) => write!(f, "{}: not a number: {}", flag, value),
            Self::OutOfRange(flag, value) => write!(f, "{}: {} is out of range", flag, value),
            Self::Pattern(e) => write!(f, "{}", e),
        }
    }
}

impl From<PatternError> for ArgsError {
    fn from(e: PatternError) -> Self {
        Self::Pattern(e)
    }
}

pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Args, ArgsError> {
    let mut parsed = Args {
        ticks: DEFAULT_TICKS,
        ..Default::default()
    };
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-v" | "--verbose" => parsed.verbose = true,
            "-h" | "--help" => parsed.help = true,
            "--pattern" | "-p" => parsed.pattern = Some(value(&arg, iter.next())?.parse()?),
            "--bpm" => {
                let bpm: u16 = number(&arg, iter.next())?;
                if !BPM_RANGE.contains(&bpm) {
                    return Err(ArgsError::OutOfRange(arg, bpm as u64));
                }
                parsed.bpm = Some(bpm);
            }
            "--ticks" | "-n" => parsed.ticks = number(&arg, iter.next())?,
            "--seed" => parsed.seed = Some(number(&arg, iter.next())?),
            "-" | "." => parsed.events.push(None),
            _ => parsed.events.push(Some(arg)),
        }
    }
    Ok(parsed)
}

fn value(flag: &str, next: Option<String>) -> Result<String, ArgsError> {
    next.ok_or_else(|| ArgsError::MissingValue(flag.to_string()))
}

fn number<N: std::str::FromStr>(flag: &str, next: Option<String>) -> Result<N, ArgsError> {
    let raw = value(flag, next)?;
    raw.parse()
        .map_err(|_| ArgsError::BadNumber(flag.to_string(), raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Result<Args, ArgsError> {
        parse(line.split_whitespace().map(String::from))
    }

    #[test]
    fn parses_flags_and_events() {
        let a = args("--pattern upDown --bpm 90 -n 8 --seed 3 -v C4 - E4 . G4").unwrap();
        assert_eq!(a.pattern, Some(PatternKind::UpDown));
        assert_eq!(a.bpm, Some(90));
        assert_eq!(a.ticks, 8);
        assert_eq!(a.seed, Some(3));
        assert!(a.verbose);
        assert_eq!(
            a.events,
            vec![
                Some("C4".to_string()),
                None,
                Some("E4".to_string()),
                None,
                Some("G4".to_string())
            ]
        );
    }

    #[test]
    fn defaults_without_flags() {
        let a = args("A B").unwrap();
        assert_eq!(a.pattern, None);
        assert_eq!(a.ticks, 16);
        assert!(!a.verbose);
    }

    #[test]
    fn rejects_unknown_pattern() {
        assert_eq!(
            args("--pattern spiral A").unwrap_err(),
            ArgsError::Pattern(PatternError::InvalidPolicy("spiral".to_string()))
        );
    }

    #[test]
    fn rejects_missing_and_bad_values() {
        assert_eq!(
            args("A --bpm").unwrap_err(),
            ArgsError::MissingValue("--bpm".to_string())
        );
        assert_eq!(
            args("--bpm 0 A B").unwrap_err(),
            ArgsError::OutOfRange("--bpm".to_string(), 0)
        );
        assert_eq!(
            args("--bpm 1000").unwrap_err(),
            ArgsError::OutOfRange("--bpm".to_string(), 1000)
        );
        assert_eq!(args("--bpm 20").unwrap().bpm, Some(20));
        assert_eq!(
            args("--ticks many").unwrap_err(),
            ArgsError::BadNumber("--ticks".to_string(), "many".to_string())
        );
    }
}
