//! Emissions engine: classification, factor lookup, co2e computation and the
//! reports built on top of stored activities.
//!
//! Data flows one way: a row description is classified into an
//! [`ActivityType`](common::model::activity::ActivityType), the calculator applies
//! the matching factor from the [`factors::EmissionFactorTable`], and the
//! aggregator, scenario simulator and recommendation rules read the stored
//! results. Nothing in this module performs I/O.

pub mod aggregator;
pub mod calculator;
pub mod classifier;
pub mod factors;
pub mod recommendations;
pub mod scenario;
