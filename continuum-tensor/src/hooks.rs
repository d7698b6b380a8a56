//! Constitutive hooks that material model packages specialize.
//!
//! Each hook takes a deformation gradient `F` and, where the result depends on
//! the material, a [`ParameterSet`].
//! Material-dependent hooks fail with [`MaterialError::NotImplemented`] until
//! a model overrides them.
//! Purely kinematic hooks ([`DeformationTensor`], [`StrainTensor`]) have the
//! standard definitions as defaults, which a model may replace.

use continuum_core::{MaterialError, Model, ParameterSet, Result};

use crate::{Tensor, invariants::square};

/// Strain energy stored per unit reference volume, `W(F)`.
pub trait StrainEnergyDensity: Model {
    /// Returns `W` at the deformation gradient `f`.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::NotImplemented`] unless the model overrides it.
    fn strain_energy_density(&self, _f: &Tensor, _parameters: &ParameterSet) -> Result<f64> {
        Err(MaterialError::not_implemented(
            "strain_energy_density",
            self.name(),
        ))
    }
}

/// Stress measures at a deformation gradient.
pub trait StressTensor: Model {
    /// Returns the first Piola-Kirchhoff stress `P`.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::NotImplemented`] unless the model overrides it.
    fn first_piola_kirchhoff(&self, _f: &Tensor, _parameters: &ParameterSet) -> Result<Tensor> {
        Err(MaterialError::not_implemented(
            "first_piola_kirchhoff",
            self.name(),
        ))
    }

    /// Returns the second Piola-Kirchhoff stress `S`.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::NotImplemented`] unless the model overrides it.
    fn second_piola_kirchhoff(&self, _f: &Tensor, _parameters: &ParameterSet) -> Result<Tensor> {
        Err(MaterialError::not_implemented(
            "second_piola_kirchhoff",
            self.name(),
        ))
    }

    /// Returns the Cauchy stress `σ`.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::NotImplemented`] unless the model overrides it.
    fn cauchy_stress(&self, _f: &Tensor, _parameters: &ParameterSet) -> Result<Tensor> {
        Err(MaterialError::not_implemented("cauchy_stress", self.name()))
    }
}

/// Deformation tensors derived from `F`.
pub trait DeformationTensor: Model {
    /// Returns the right Cauchy-Green tensor, `C = Fᵀ F`.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::Shape`] if `f` is not square.
    fn right_cauchy_green(&self, f: &Tensor) -> Result<Tensor> {
        let f = square(f, "right Cauchy-Green tensor")?;
        Ok(f.transpose() * f)
    }

    /// Returns the left Cauchy-Green tensor, `b = F Fᵀ`.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::Shape`] if `f` is not square.
    fn left_cauchy_green(&self, f: &Tensor) -> Result<Tensor> {
        let f = square(f, "left Cauchy-Green tensor")?;
        Ok(&f * f.transpose())
    }
}

/// Strain tensors derived from `F`.
pub trait StrainTensor: DeformationTensor {
    /// Returns the Green-Lagrange strain, `E = ½ (C − 1)`.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::Shape`] if `f` is not square.
    fn green_lagrange(&self, f: &Tensor) -> Result<Tensor> {
        let c = self.right_cauchy_green(f)?;
        let n = c.nrows();
        Ok((c - Tensor::identity(n, n)) * 0.5)
    }

    /// Returns the Euler-Almansi strain, `e = ½ (1 − b⁻¹)`.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::Shape`] if `f` is not square, or
    /// [`MaterialError::Domain`] if `b` is singular.
    fn euler_almansi(&self, f: &Tensor) -> Result<Tensor> {
        let b = self.left_cauchy_green(f)?;
        let n = b.nrows();
        let det = b.determinant();
        let b_inv = b.try_inverse().ok_or(MaterialError::Domain {
            context: "Euler-Almansi strain",
            value: det,
            reason: "left Cauchy-Green tensor is singular",
        })?;
        Ok((Tensor::identity(n, n) - b_inv) * 0.5)
    }
}
