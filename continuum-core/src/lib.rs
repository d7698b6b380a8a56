//! Shared contracts for continuum-mechanics material models.
//!
//! This crate defines the vocabulary that material model packages implement
//! and that fitting tools consume:
//!
//! - [`Model`], [`Test`], and [`State`]: the open capability categories.
//! - [`Predict`]: the (model, test) dispatch point for simulated responses,
//!   with [`predict_all`] evaluating a batch of tests in order.
//! - [`ParameterSet`] and [`Bounds`]: named parameters and their admissible
//!   region, with [`parameter_bounds_all`] intersecting per-test bounds.
//! - [`MaterialHistory`]: an append-only, time-stamped record of states.
//!
//! It is not a simulation engine.
//! Unspecialized hooks fail with [`MaterialError::NotImplemented`] rather than
//! returning a placeholder value.

mod error;
mod history;
mod options;
mod params;
mod predict;
mod taxonomy;

pub use error::{ConfigError, MaterialError, Result};
pub use history::MaterialHistory;
pub use options::{Execution, PredictOptions};
pub use params::{Bounds, ParameterSet, aggregate_bounds};
pub use predict::{Predict, parameter_bounds_all, predict, predict_all};
pub use taxonomy::{Model, State, Test};
