//! Static emission factor table.
//!
//! Factors are expressed in kgCO2e per unit. Activity types without an entry
//! (by default only `other`) use the fallback factor, which carries a lower
//! confidence.

use crate::error::{ApiError, Result};
use common::model::activity::ActivityType;
use serde::Deserialize;
use std::collections::HashMap;

/// Label addressing the fallback entry in configuration overrides.
pub const FALLBACK_LABEL: &str = "fallback";

#[derive(Debug, Clone, PartialEq)]
pub struct EmissionFactor {
    pub factor: f64,
    pub source: String,
    pub unit: String,
    pub confidence: f64,
}

impl EmissionFactor {
    fn new(factor: f64, unit: &str, confidence: f64, source: &str) -> Self {
        EmissionFactor {
            factor,
            source: source.to_string(),
            unit: unit.to_string(),
            confidence,
        }
    }

    pub fn formula(&self) -> String {
        format!(
            "co2e = quantity ({unit}) × {factor} kgCO2e/{unit}",
            unit = self.unit,
            factor = self.factor
        )
    }

    fn validate(&self, label: &str) -> Result<()> {
        if !self.factor.is_finite() || self.factor < 0.0 {
            return Err(ApiError::Config(format!(
                "factor for '{}' must be a non-negative number, got {}",
                label, self.factor
            )));
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(ApiError::Config(format!(
                "confidence for '{}' must be between 0 and 1, got {}",
                label, self.confidence
            )));
        }
        Ok(())
    }
}

/// Partial replacement of one table entry, read from the `[factors.<label>]`
/// tables of the configuration file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FactorOverride {
    pub factor: f64,
    pub source: Option<String>,
    pub unit: Option<String>,
    pub confidence: Option<f64>,
}

/// Result of a table lookup.
#[derive(Debug, Clone, Copy)]
pub struct FactorLookup<'a> {
    pub factor: &'a EmissionFactor,
    /// False when the fallback entry was used.
    pub known: bool,
}

#[derive(Debug, Clone)]
pub struct EmissionFactorTable {
    entries: HashMap<ActivityType, EmissionFactor>,
    fallback: EmissionFactor,
}

impl Default for EmissionFactorTable {
    fn default() -> Self {
        let entries = HashMap::from([
            (
                ActivityType::Transport,
                EmissionFactor::new(0.21, "km", 0.9, "DEFRA 2023 - road freight, average laden van/truck"),
            ),
            (
                ActivityType::Energy,
                EmissionFactor::new(0.233, "kWh", 1.0, "DEFRA 2023 - UK grid electricity"),
            ),
            (
                ActivityType::SupplyChain,
                EmissionFactor::new(0.45, "USD", 0.7, "EPA USEEIO v2 - spend-based average"),
            ),
            (
                ActivityType::Waste,
                EmissionFactor::new(0.467, "kg", 0.85, "DEFRA 2023 - mixed commercial waste to landfill"),
            ),
        ]);
        EmissionFactorTable {
            entries,
            fallback: EmissionFactor::new(0.1, "items", 0.4, "Generic cross-sector average"),
        }
    }
}

impl EmissionFactorTable {
    pub fn lookup(&self, activity_type: ActivityType) -> FactorLookup<'_> {
        match self.entries.get(&activity_type) {
            Some(factor) => FactorLookup { factor, known: true },
            None => FactorLookup {
                factor: &self.fallback,
                known: false,
            },
        }
    }

    pub fn fallback(&self) -> &EmissionFactor {
        &self.fallback
    }

    /// Applies configuration overrides on top of this table.
    ///
    /// Labels must name an activity type or `fallback`. Fields left out of an
    /// override keep the current entry's value (or the fallback's, when the type
    /// had no entry yet).
    pub fn with_overrides(mut self, overrides: &HashMap<String, FactorOverride>) -> Result<Self> {
        for (label, item) in overrides {
            if label.eq_ignore_ascii_case(FALLBACK_LABEL) {
                let merged = merge(&self.fallback, item);
                merged.validate(label)?;
                self.fallback = merged;
                continue;
            }

            let activity_type = ActivityType::from_label(label)
                .ok_or_else(|| ApiError::Config(format!("unknown activity type '{}' in factors", label)))?;
            let merged = merge(self.lookup(activity_type).factor, item);
            merged.validate(label)?;
            self.entries.insert(activity_type, merged);
        }
        Ok(self)
    }
}

fn merge(base: &EmissionFactor, item: &FactorOverride) -> EmissionFactor {
    EmissionFactor {
        factor: item.factor,
        source: item.source.clone().unwrap_or_else(|| base.source.clone()),
        unit: item.unit.clone().unwrap_or_else(|| base.unit.clone()),
        confidence: item.confidence.unwrap_or(base.confidence),
    }
}
