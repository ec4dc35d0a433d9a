// Series synthesizer - Mock traffic history for the line chart
use crate::domain::category::{Category, CategoryCounts};
use crate::domain::time_range::SamplingDensity;
use crate::domain::traffic::HistoryPoint;
use chrono::{DateTime, Utc};
use rand::Rng;

const TREND_AMPLITUDE: f64 = 30.0;
const TREND_MIDLINE: f64 = 50.0;
const NOISE_CEILING: f64 = 20.0;

/// Generate `density.point_count` points, ascending in time.
///
/// The series starts at `anchor` when given, otherwise it ends one interval
/// before `now`. Each category follows a sine trend phase-shifted by its
/// ordinal, plus uniform noise, floored at zero.
pub fn synthesize<R: Rng>(
    density: SamplingDensity,
    anchor: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<HistoryPoint> {
    let interval = density.interval();
    let start = anchor.unwrap_or_else(|| now - density.lookback());

    let mut history = Vec::with_capacity(density.point_count);
    let mut current = start;

    for i in 0..density.point_count {
        let mut counts = CategoryCounts::default();
        for category in Category::ALL {
            counts.set(category, sample(i, category, rng));
        }

        history.push(HistoryPoint::new(current, counts));
        current += interval;
    }

    history
}

fn sample<R: Rng>(step: usize, category: Category, rng: &mut R) -> u32 {
    let phase = step as f64 / 10.0 + category.ordinal() as f64;
    let trend = phase.sin() * TREND_AMPLITUDE + TREND_MIDLINE;
    let noise = rng.gen_range(0.0..NOISE_CEILING);
    (trend + noise).floor().max(0.0) as u32
}
