//! Tensor invariants and constitutive hooks for continuum-mechanics material models.
//!
//! - [`invariants`](mod@invariants): `I1`, `I2`, `I3`, and the volume ratio `J` of rank-2 tensors.
//! - [`hooks`]: named extension points (strain energy, stress, strain, and
//!   deformation tensors) that material model packages specialize.

pub mod hooks;
pub mod invariants;

pub use hooks::{DeformationTensor, StrainEnergyDensity, StrainTensor, StressTensor};
pub use invariants::{Invariants, deviatoric, i1, i2, i3, invariants, isochoric, j};

/// A dynamically sized rank-2 tensor.
pub type Tensor = nalgebra::DMatrix<f64>;
