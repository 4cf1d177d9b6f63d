use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use ostinato_types::{PatternKind, PatternOptions};

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

const DEFAULT_BPM: u16 = 120;

/// Tempi the step clock accepts.
pub const BPM_RANGE: RangeInclusive<u16> = 20..=999;
const DEFAULT_STEPS_PER_BEAT: u8 = 2;

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    defaults: DefaultsConfig,
    #[serde(default)]
    clock: ClockConfig,
}

#[derive(Deserialize, Default)]
struct DefaultsConfig {
    pattern: Option<String>,
    index: Option<isize>,
    seed: Option<u64>,
}

#[derive(Deserialize, Default)]
struct ClockConfig {
    bpm: Option<u16>,
    steps_per_beat: Option<u8>,
}

pub struct Config {
    defaults: DefaultsConfig,
    clock: ClockConfig,
}

impl Config {
    /// Embedded defaults overlaid with `~/.config/ostinato/config.toml` when present.
    pub fn load() -> Self {
        Self::load_with(user_config_path())
    }

    /// Embedded defaults overlaid with the file at `path`.
    pub fn load_from(path: &Path) -> Self {
        Self::load_with(Some(path.to_path_buf()))
    }

    fn load_with(path: Option<PathBuf>) -> Self {
        let mut base: ConfigFile = toml::from_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
            log::error!(target: "config", "embedded config.toml is malformed: {}", e);
            ConfigFile::default()
        });

        if let Some(path) = path {
            if path.exists() {
                match std::fs::read_to_string(&path) {
                    Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                        Ok(user) => {
                            merge_defaults(&mut base.defaults, user.defaults);
                            merge_clock(&mut base.clock, user.clock);
                        }
                        Err(e) => {
                            log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                        }
                    },
                    Err(e) => {
                        log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
                    }
                }
            }
        }

        Config {
            defaults: base.defaults,
            clock: base.clock,
        }
    }

    /// Default traversal policy. Unknown identifiers fall back to `Up`.
    pub fn pattern_kind(&self) -> PatternKind {
        match self.defaults.pattern.as_deref() {
            Some(id) => id.parse::<PatternKind>().unwrap_or_else(|e| {
                log::warn!(target: "config", "{}; using {}", e, PatternKind::Up);
                PatternKind::Up
            }),
            None => PatternKind::Up,
        }
    }

    pub fn index(&self) -> isize {
        self.defaults.index.unwrap_or(0)
    }

    pub fn seed(&self) -> Option<u64> {
        self.defaults.seed
    }

    /// Pattern options over `events` using the configured defaults.
    pub fn options<T>(&self, events: Vec<T>) -> PatternOptions<T> {
        PatternOptions {
            events,
            pattern: self.pattern_kind(),
            index: self.index(),
            seed: self.seed(),
        }
    }

    /// Clock tempo (clamped to 20..=999).
    pub fn bpm(&self) -> u16 {
        self.clock
            .bpm
            .unwrap_or(DEFAULT_BPM)
            .clamp(*BPM_RANGE.start(), *BPM_RANGE.end())
    }

    /// Pattern steps per quarter note (clamped to 1..=32).
    pub fn steps_per_beat(&self) -> u8 {
        self.clock
            .steps_per_beat
            .unwrap_or(DEFAULT_STEPS_PER_BEAT)
            .clamp(1, 32)
    }
}

pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("ostinato").join("config.toml"))
}

fn merge_defaults(base: &mut DefaultsConfig, user: DefaultsConfig) {
    if user.pattern.is_some() {
        base.pattern = user.pattern;
    }
    if user.index.is_some() {
        base.index = user.index;
    }
    if user.seed.is_some() {
        base.seed = user.seed;
    }
}

fn merge_clock(base: &mut ClockConfig, user: ClockConfig) {
    if user.bpm.is_some() {
        base.bpm = user.bpm;
    }
    if user.steps_per_beat.is_some() {
        base.steps_per_beat = user.steps_per_beat;
    }
}
