// Traffic statistics domain models
use super::category::{Category, CategoryCounts};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single sample of the line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryPoint {
    pub timestamp: DateTime<Utc>,
    pub counts: CategoryCounts,
}

impl HistoryPoint {
    pub fn new(timestamp: DateTime<Utc>, counts: CategoryCounts) -> Self {
        Self { timestamp, counts }
    }

    pub fn count(&self, category: Category) -> u32 {
        self.counts.get(category)
    }
}

// Flat shape the charts expect: {"timestamp": "...", "Cars": 12, "Bikes": 40, ...}
impl Serialize for HistoryPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Category::COUNT + 1))?;
        map.serialize_entry(
            "timestamp",
            &self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        )?;
        for (category, value) in self.counts.iter() {
            map.serialize_entry(category.label(), &value)?;
        }
        map.end()
    }
}

/// One segment of the pie chart.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: u32,
}

impl PieSlice {
    pub fn new(label: impl Into<String>, value: u32) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct DashboardResponse {
    pub pie: Vec<PieSlice>,
    pub history: Vec<HistoryPoint>,
}

impl DashboardResponse {
    pub fn new(pie: Vec<PieSlice>, history: Vec<HistoryPoint>) -> Self {
        Self { pie, history }
    }
}
