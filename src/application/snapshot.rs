// Snapshot projector - Pie chart view of the latest history point
use crate::domain::category::Category;
use crate::domain::traffic::{HistoryPoint, PieSlice};

/// Project the last point of `series` into one slice per category.
///
/// An empty series projects to zero-valued slices so the pie keeps its
/// shape.
pub fn project(series: &[HistoryPoint]) -> Vec<PieSlice> {
    let last = series.last();

    Category::ALL
        .iter()
        .map(|&category| {
            let value = last.map_or(0, |point| point.count(category));
            PieSlice::new(category.label(), value)
        })
        .collect()
}
