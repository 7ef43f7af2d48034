//! Playback configuration.

use std::time::Duration;

use crate::error::{Error, Result};
use crate::render::VizKind;

/// Fastest autoplay period.
pub const MIN_STEP_PERIOD: Duration = Duration::from_millis(100);

/// Slowest autoplay period.
pub const MAX_STEP_PERIOD: Duration = Duration::from_millis(1000);

/// Autoplay period when nothing else is configured.
pub const DEFAULT_STEP_PERIOD: Duration = Duration::from_millis(500);

/// Settings for a playback controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackConfig {
    /// Time between autoplay ticks, within `MIN_STEP_PERIOD..=MAX_STEP_PERIOD`.
    pub step_period: Duration,
    pub viz_kind: VizKind,
    /// Speak each step's action on manual position changes.
    pub narrate: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            step_period: DEFAULT_STEP_PERIOD,
            viz_kind: VizKind::Bars,
            narrate: false,
        }
    }
}

impl PlaybackConfig {
    /// Read `ALGOVIZ_STEP_MS`, `ALGOVIZ_VIZ` and `ALGOVIZ_NARRATE`, falling
    /// back to defaults for unset variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup("ALGOVIZ_STEP_MS") {
            let ms = raw.trim().parse::<u64>().map_err(|_| Error::InvalidConfig {
                key: "ALGOVIZ_STEP_MS",
                value: raw.clone(),
            })?;
            config = config.with_step_period(Duration::from_millis(ms));
        }

        if let Some(raw) = lookup("ALGOVIZ_VIZ") {
            config.viz_kind = raw.parse().map_err(|_| Error::InvalidConfig {
                key: "ALGOVIZ_VIZ",
                value: raw.clone(),
            })?;
        }

        if let Some(raw) = lookup("ALGOVIZ_NARRATE") {
            let flag = raw.trim().to_ascii_lowercase();
            config.narrate = match flag.as_str() {
                "1" | "true" => true,
                "0" | "false" => false,
                _ => {
                    return Err(Error::InvalidConfig {
                        key: "ALGOVIZ_NARRATE",
                        value: raw,
                    })
                }
            };
        }

        Ok(config)
    }

    /// Set the autoplay period, clamped to the supported range.
    pub fn with_step_period(mut self, period: Duration) -> Self {
        self.step_period = clamp_period(period);
        self
    }

    pub fn with_viz_kind(mut self, kind: VizKind) -> Self {
        self.viz_kind = kind;
        self
    }

    pub fn with_narration(mut self, narrate: bool) -> Self {
        self.narrate = narrate;
        self
    }
}

pub(crate) fn clamp_period(period: Duration) -> Duration {
    period.clamp(MIN_STEP_PERIOD, MAX_STEP_PERIOD)
}
