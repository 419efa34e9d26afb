//! Dashboard aggregates over stored activities.

use chrono::Datelike;
use common::model::activity::Activity;
use common::model::summary::{CategoryTotal, DashboardSummary, Hotspot, TrendPoint};
use std::collections::BTreeMap;

pub const HOTSPOT_LIMIT: usize = 5;

pub fn summarize(activities: &[Activity]) -> DashboardSummary {
    DashboardSummary {
        total_co2e: total_co2e(activities),
        category_distribution: category_totals(activities),
        hotspots: hotspots(activities, HOTSPOT_LIMIT),
        trend_data: monthly_trend(activities),
    }
}

/// Adds two non-negative co2e values, saturating at `f64::MAX` instead of
/// overflowing to infinity.
pub fn saturating_add(acc: f64, value: f64) -> f64 {
    let sum = acc + value;
    if sum.is_finite() { sum } else { f64::MAX }
}

pub fn total_co2e(activities: &[Activity]) -> f64 {
    activities.iter().fold(0.0, |acc, a| saturating_add(acc, a.co2e))
}

/// One total per activity type present, in order of first appearance.
pub fn category_totals(activities: &[Activity]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for activity in activities {
        match totals.iter_mut().find(|t| t.name == activity.activity_type) {
            Some(total) => total.value = saturating_add(total.value, activity.co2e),
            None => totals.push(CategoryTotal {
                name: activity.activity_type,
                value: activity.co2e,
            }),
        }
    }
    totals
}

/// The `limit` largest activities by co2e, descending. Equal values keep
/// their input order.
pub fn hotspots(activities: &[Activity], limit: usize) -> Vec<Hotspot> {
    let mut ranked: Vec<&Activity> = activities.iter().collect();
    ranked.sort_by(|a, b| b.co2e.total_cmp(&a.co2e));
    ranked
        .into_iter()
        .take(limit)
        .map(|a| Hotspot {
            activity_id: a.id,
            description: a.description.clone(),
            co2e: a.co2e,
        })
        .collect()
}

/// Per-month totals keyed `YYYY-MM`, ascending.
pub fn monthly_trend(activities: &[Activity]) -> Vec<TrendPoint> {
    let mut buckets: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for activity in activities {
        let bucket = buckets
            .entry((activity.date.year(), activity.date.month()))
            .or_insert(0.0);
        *bucket = saturating_add(*bucket, activity.co2e);
    }
    buckets
        .into_iter()
        .map(|((year, month), co2e)| TrendPoint {
            date: format!("{:04}-{:02}", year, month),
            co2e,
        })
        .collect()
}
