//! Linear emissions model: `co2e = quantity × factor`.

use crate::engine::factors::EmissionFactorTable;
use common::model::activity::ActivityType;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum QuantityError {
    #[error("quantity must not be negative (got {0})")]
    Negative(f64),

    #[error("quantity must be a finite number")]
    NonFinite,

    #[error("co2e for quantity {0} is too large to represent")]
    Overflow(f64),
}

/// Accepts zero and positive finite quantities.
pub fn validate_quantity(quantity: f64) -> Result<f64, QuantityError> {
    if !quantity.is_finite() {
        return Err(QuantityError::NonFinite);
    }
    if quantity < 0.0 {
        return Err(QuantityError::Negative(quantity));
    }
    Ok(quantity)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    pub co2e: f64,
    pub emission_factor: f64,
    pub factor_source: String,
    pub formula: String,
    pub confidence_score: f64,
    pub unit_applied: String,
}

/// Computes co2e for `quantity` of `activity_type`.
///
/// Types without a table entry use the fallback factor. Negative and
/// non-finite quantities are rejected, as is a product that overflows `f64`,
/// so a stored co2e is always finite and never negative.
pub fn compute(
    table: &EmissionFactorTable,
    activity_type: ActivityType,
    quantity: f64,
) -> Result<Calculation, QuantityError> {
    let quantity = validate_quantity(quantity)?;
    let factor = table.lookup(activity_type).factor;
    let co2e = quantity * factor.factor;
    if !co2e.is_finite() {
        return Err(QuantityError::Overflow(quantity));
    }

    Ok(Calculation {
        co2e,
        emission_factor: factor.factor,
        factor_source: factor.source.clone(),
        formula: factor.formula(),
        confidence_score: factor.confidence,
        unit_applied: factor.unit.clone(),
    })
}
