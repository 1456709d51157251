use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::FALLBACK_SEGMENT_COLOR;
use crate::shared_wheel_game::{SpinOutcome, Wheel};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionEntry {
    pub label: String,
    pub count: u64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// UTC calendar day, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsData {
    pub total_spins: u64,
    pub distribution: Vec<DistributionEntry>,
    pub timeline: Vec<TimelineEntry>,
}

/// Wins per label, in order of first appearance, coloured from the wheel as it is now.
pub fn distribution(wheel: &Wheel, outcomes: &[SpinOutcome]) -> Vec<DistributionEntry> {
    let mut entries: Vec<DistributionEntry> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for outcome in outcomes.iter().filter(|o| o.wheel_id == wheel.id) {
        let label = outcome.segment_label.as_str();
        match positions.get(label) {
            Some(&position) => entries[position].count += 1,
            None => {
                let color = wheel
                    .segments
                    .iter()
                    .find(|segment| segment.label == label)
                    .map(|segment| segment.color.clone())
                    .unwrap_or_else(|| FALLBACK_SEGMENT_COLOR.to_string());
                positions.insert(label, entries.len());
                entries.push(DistributionEntry {
                    label: label.to_string(),
                    count: 1,
                    color,
                });
            }
        }
    }
    entries
}

/// Spins per UTC day, oldest first.
pub fn timeline(wheel: &Wheel, outcomes: &[SpinOutcome]) -> Vec<TimelineEntry> {
    let mut days: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for outcome in outcomes.iter().filter(|o| o.wheel_id == wheel.id) {
        *days.entry(outcome.timestamp.date_naive()).or_insert(0) += 1;
    }
    days.into_iter()
        .map(|(date, count)| TimelineEntry { date, count })
        .collect()
}

pub fn summarize(wheel: &Wheel, outcomes: &[SpinOutcome]) -> AnalyticsData {
    let total_spins = outcomes.iter().filter(|o| o.wheel_id == wheel.id).count() as u64;
    AnalyticsData {
        total_spins,
        distribution: distribution(wheel, outcomes),
        timeline: timeline(wheel, outcomes),
    }
}
