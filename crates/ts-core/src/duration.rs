//! Duration rendering and optional rounding for coarse reports.

use chrono::Duration;

/// Template used by [`DurationFormat::default`], e.g. `3:45`.
pub const DEFAULT_DURATION_FORMAT: &str = "{hours}:{minutes:02}";

/// Renders durations from a template.
///
/// Recognized placeholders are `{hours}`, `{minutes}`, `{hours:02}` and
/// `{minutes:02}`. Hours are unbounded; minutes are the remainder after
/// whole hours. Any other text is copied verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationFormat {
    template: String,
}

impl Default for DurationFormat {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_FORMAT)
    }
}

impl DurationFormat {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Formats `duration` at minute precision.
    pub fn format(&self, duration: Duration) -> String {
        let total_minutes = duration.num_minutes();
        let hours = total_minutes / 60;
        let minutes = total_minutes % 60;

        self.template
            .replace("{hours:02}", &format!("{hours:02}"))
            .replace("{hours}", &hours.to_string())
            .replace("{minutes:02}", &format!("{minutes:02}"))
            .replace("{minutes}", &minutes.to_string())
    }
}

/// Formats a duration as `H:MM`.
pub fn format_duration(duration: Duration) -> String {
    DurationFormat::default().format(duration)
}

/// Snaps durations to a fixed interval with a floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rounding {
    /// Granularity to round to. Must be positive.
    pub interval: Duration,
    /// Smallest duration a rounded value may take.
    pub minimum: Duration,
}

impl Default for Rounding {
    fn default() -> Self {
        Self {
            interval: Duration::minutes(15),
            minimum: Duration::minutes(15),
        }
    }
}

impl Rounding {
    /// Rounds to the nearest multiple of `interval` (ties to even), then
    /// raises the result to at least `minimum`.
    pub fn round(&self, duration: Duration) -> Duration {
        let interval = self.interval.num_seconds();
        if interval <= 0 {
            return duration.max(self.minimum);
        }

        let seconds = duration.num_seconds();
        let mut steps = seconds.div_euclid(interval);
        let remainder = seconds.rem_euclid(interval);
        if remainder * 2 > interval || (remainder * 2 == interval && steps % 2 != 0) {
            steps += 1;
        }

        Duration::seconds(steps * interval).max(self.minimum)
    }
}
