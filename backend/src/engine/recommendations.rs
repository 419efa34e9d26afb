//! Rule-based recommendations and the templated narrative report.
//!
//! Both are deterministic text keyed by category totals; no external service is
//! called. An empty activity set produces an explicit "no data" answer.

use crate::engine::aggregator::{category_totals, hotspots, monthly_trend, total_co2e};
use common::model::activity::{Activity, ActivityType};
use common::model::insight::{Impact, InsightReport, Recommendation};
use common::model::summary::CategoryTotal;

const HIGH_SHARE: f64 = 40.0;
const MEDIUM_SHARE: f64 = 15.0;
/// Share of total emissions above which a single activity gets its own recommendation.
const HOTSPOT_SHARE: f64 = 20.0;

pub const NO_DATA_REPORT: &str =
    "No data available to analyze. Please upload your emission records.";

struct CategoryPlaybook {
    title: &'static str,
    advice: &'static str,
    strategic_action: &'static str,
    immediate_win: Option<&'static str>,
}

fn playbook(activity_type: ActivityType) -> CategoryPlaybook {
    match activity_type {
        ActivityType::Transport => CategoryPlaybook {
            title: "Electrify last-mile logistics",
            advice: "Moving delivery vehicles to EV and optimising routes typically cuts fleet emissions by 5-18%.",
            strategic_action: "Transitioning last-mile logistics to EV could reduce this by up to 18%.",
            immediate_win: Some("Optimize route planning to decrease fuel consumption by ~5%."),
        },
        ActivityType::Energy => CategoryPlaybook {
            title: "Switch to renewable electricity",
            advice: "Procure Renewable Energy Certificates for main facilities and audit HVAC idle time.",
            strategic_action: "Procure Renewable Energy Certificates (RECs) for your main facilities.",
            immediate_win: Some("Audit HVAC systems in HQ; 10% reduction typically found in idle-time management."),
        },
        ActivityType::SupplyChain => CategoryPlaybook {
            title: "Engage key suppliers",
            advice: "Request Tier 1 emission data from your largest suppliers and prefer local sourcing for high-volume materials.",
            strategic_action: "Engage top 5 suppliers for Tier 1 emission data transparency.",
            immediate_win: Some("Switch to local sourcing for high-volume, low-margin materials."),
        },
        ActivityType::Waste => CategoryPlaybook {
            title: "Divert waste from landfill",
            advice: "Introduce source separation and recycling contracts to move waste streams away from landfill.",
            strategic_action: "Negotiate recycling and composting contracts for your largest waste streams.",
            immediate_win: Some("Introduce source separation at collection points."),
        },
        ActivityType::Other => CategoryPlaybook {
            title: "Audit uncategorised activities",
            advice: "Review activity descriptions so they can be matched to specific emission factors.",
            strategic_action: "Conduct a granular audit of this sector to identify specific outlier activities.",
            immediate_win: None,
        },
    }
}

fn share(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        value / total * 100.0
    } else {
        0.0
    }
}

fn impact_for(share: f64) -> Impact {
    if share >= HIGH_SHARE {
        Impact::High
    } else if share >= MEDIUM_SHARE {
        Impact::Medium
    } else {
        Impact::Low
    }
}

/// Category totals sorted largest first. Equal totals keep first-seen order.
fn ranked_categories(activities: &[Activity]) -> Vec<CategoryTotal> {
    let mut totals = category_totals(activities);
    totals.sort_by(|a, b| b.value.total_cmp(&a.value));
    totals
}

pub fn recommend(activities: &[Activity]) -> Vec<Recommendation> {
    if activities.is_empty() {
        return vec![Recommendation {
            title: "No data available".to_string(),
            suggestion: "Upload a CSV of activity records to receive recommendations.".to_string(),
            impact: Impact::Low,
            category: None,
        }];
    }

    let total = total_co2e(activities);
    let mut recommendations: Vec<Recommendation> = ranked_categories(activities)
        .into_iter()
        .filter(|c| c.value > 0.0)
        .map(|c| {
            let pct = share(c.value, total);
            let book = playbook(c.name);
            Recommendation {
                title: book.title.to_string(),
                suggestion: format!(
                    "{} accounts for {:.1}% of your emissions. {}",
                    c.name, pct, book.advice
                ),
                impact: impact_for(pct),
                category: Some(c.name),
            }
        })
        .collect();

    if let Some(top) = hotspots(activities, 1).into_iter().next() {
        let pct = share(top.co2e, total);
        if pct >= HOTSPOT_SHARE {
            recommendations.push(Recommendation {
                title: format!("Hotspot: {}", top.description),
                suggestion: format!(
                    "This single activity contributes {:.1}% of total emissions ({:.2} kgCO2e). Prioritise it for reduction.",
                    pct, top.co2e
                ),
                impact: Impact::High,
                category: None,
            });
        }
    }

    recommendations
}

/// Builds the markdown narrative returned by `POST /api/insights/ai`.
pub fn narrative(activities: &[Activity]) -> InsightReport {
    let ranked = ranked_categories(activities);
    let Some(top) = ranked.first() else {
        return InsightReport {
            content: NO_DATA_REPORT.to_string(),
        };
    };

    let total = total_co2e(activities);
    let book = playbook(top.name);
    let mut content = String::from("**Executive Summary:**\n");
    content.push_str(&format!(
        "Your organization's total carbon footprint is currently **{:.2} kgCO2e**.\n\n",
        total
    ));
    content.push_str("**Critical Hotspot Identified:**\n");
    content.push_str(&format!(
        "The **{}** sector accounts for **{:.1}%** of your total emissions.\n",
        top.name,
        share(top.value, total)
    ));
    match book.immediate_win {
        Some(win) => {
            content.push_str(&format!("• **Strategic Action:** {}\n", book.strategic_action));
            content.push_str(&format!("• **Immediate Win:** {}\n", win));
        }
        None => content.push_str(&format!("• **Recommendation:** {}\n", book.strategic_action)),
    }
    content.push_str("\n**Projected Trajectory:**\n");
    content.push_str(&trajectory(activities));

    InsightReport { content }
}

/// Describes the change between the last two monthly buckets.
fn trajectory(activities: &[Activity]) -> String {
    let trend = monthly_trend(activities);
    let [.., previous, last] = trend.as_slice() else {
        return "Not enough monthly history to project a trajectory; upload records covering at least two months.".to_string();
    };

    if previous.co2e <= 0.0 {
        return format!(
            "Emissions rose from zero in {} to {:.2} kgCO2e in {}.",
            previous.date, last.co2e, last.date
        );
    }

    let change = (last.co2e - previous.co2e) / previous.co2e * 100.0;
    if change.is_infinite() {
        format!(
            "Emissions rose from {:.2} kgCO2e in {} to {:.2} kgCO2e in {}.",
            previous.co2e, previous.date, last.co2e, last.date
        )
    } else if change > 0.0 {
        format!(
            "Emissions rose by {:.1}% from {} to {}. Mitigation is needed to reverse this trend.",
            change, previous.date, last.date
        )
    } else if change < 0.0 {
        format!(
            "Emissions fell by {:.1}% from {} to {}. Keep the current measures in place.",
            -change, previous.date, last.date
        )
    } else {
        format!("Emissions were flat between {} and {}.", previous.date, last.date)
    }
}
