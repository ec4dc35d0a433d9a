// Time range domain model and sampling density resolution
use chrono::Duration;

/// Time window requested by the dashboard.
///
/// Tokens that are not one of the known windows map to [`TimeRange::Other`],
/// which resolves to the default density instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    Live,
    #[default]
    LastHour,
    LastDay,
    LastWeek,
    Other,
}

impl TimeRange {
    pub fn from_token(token: &str) -> Self {
        match token {
            "live" => TimeRange::Live,
            "1h" => TimeRange::LastHour,
            "24h" => TimeRange::LastDay,
            "7d" => TimeRange::LastWeek,
            _ => TimeRange::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Live => "live",
            TimeRange::LastHour => "1h",
            TimeRange::LastDay => "24h",
            TimeRange::LastWeek => "7d",
            TimeRange::Other => "default",
        }
    }
}

/// How many points a series has and how far apart they are.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingDensity {
    pub point_count: usize,
    pub interval_minutes: f64,
}

impl SamplingDensity {
    pub const DEFAULT: SamplingDensity = SamplingDensity::new(50, 60.0);

    pub const fn new(point_count: usize, interval_minutes: f64) -> Self {
        Self {
            point_count,
            interval_minutes,
        }
    }

    /// Spacing between points, rounded to whole milliseconds so sub-minute
    /// intervals (0.1 min for live) stay exact.
    pub fn interval(&self) -> Duration {
        Duration::milliseconds((self.interval_minutes * 60_000.0).round() as i64)
    }

    pub fn lookback(&self) -> Duration {
        self.interval() * self.point_count as i32
    }
}

/// Map a range to its sampling density. Never fails: unknown ranges get
/// [`SamplingDensity::DEFAULT`].
pub fn resolve_density(range: TimeRange) -> SamplingDensity {
    match range {
        TimeRange::Live => SamplingDensity::new(30, 0.1),
        TimeRange::LastHour => SamplingDensity::new(60, 1.0),
        TimeRange::LastDay => SamplingDensity::new(48, 30.0),
        TimeRange::LastWeek => SamplingDensity::new(84, 120.0),
        TimeRange::Other => SamplingDensity::DEFAULT,
    }
}
