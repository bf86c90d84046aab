//! Delay-risk scoring engine for in-flight logistics shipments.
//!
//! For each open shipment the engine estimates the probability of arriving
//! later than planned, a predicted delay magnitude, a coarse risk tier, and
//! a short rule-based explanation. Training fits two persisted artifacts
//! (a feature scaler and a gradient-boosted classifier); batch prediction
//! loads them and emits one prediction record per open shipment under a
//! shared run identifier.

pub mod config;
pub mod error;
pub mod ml;
pub mod models;
pub mod state;

pub use error::{AppError, Result};
