//! Principal invariants of rank-2 tensors.
//!
//! Every function accepts any `nalgebra` matrix (fixed-size or dynamic) and
//! checks at runtime that it is square.
//! For a tensor `T` of order `n`:
//!
//! - `I1 = tr(T)`
//! - `I2 = ½ (tr(T)² − tr(T·T))`
//! - `I3 = det(T)`
//! - `J = √det(T)`, the volume ratio when `T` is a right Cauchy-Green tensor.
//!
//! `J` is only defined for a non-negative determinant.
//! A negative determinant is reported as [`MaterialError::Domain`] instead of
//! producing a NaN or complex value.

use continuum_core::{MaterialError, Result};
use nalgebra::{DMatrix, Dim, Matrix, RawStorage};
use tracing::debug;

use crate::Tensor;

/// The three principal invariants of a tensor, computed together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Invariants {
    pub i1: f64,
    pub i2: f64,
    pub i3: f64,
}

/// Computes `I1`, `I2`, and `I3` of `t` in one pass.
///
/// # Errors
///
/// Returns [`MaterialError::Shape`] if `t` is not square.
pub fn invariants<R, C, S>(t: &Matrix<f64, R, C, S>) -> Result<Invariants>
where
    R: Dim,
    C: Dim,
    S: RawStorage<f64, R, C>,
{
    let t = square(t, "invariants")?;
    let trace = t.trace();

    Ok(Invariants {
        i1: trace,
        i2: second_invariant(&t, trace),
        i3: t.determinant(),
    })
}

/// Returns the first invariant, `tr(T)`.
///
/// # Errors
///
/// Returns [`MaterialError::Shape`] if `t` is not square.
pub fn i1<R, C, S>(t: &Matrix<f64, R, C, S>) -> Result<f64>
where
    R: Dim,
    C: Dim,
    S: RawStorage<f64, R, C>,
{
    Ok(square(t, "I1")?.trace())
}

/// Returns the second invariant, `½ (tr(T)² − tr(T·T))`.
///
/// # Errors
///
/// Returns [`MaterialError::Shape`] if `t` is not square.
pub fn i2<R, C, S>(t: &Matrix<f64, R, C, S>) -> Result<f64>
where
    R: Dim,
    C: Dim,
    S: RawStorage<f64, R, C>,
{
    let t = square(t, "I2")?;
    Ok(second_invariant(&t, t.trace()))
}

/// Returns the third invariant, `det(T)`.
///
/// # Errors
///
/// Returns [`MaterialError::Shape`] if `t` is not square.
pub fn i3<R, C, S>(t: &Matrix<f64, R, C, S>) -> Result<f64>
where
    R: Dim,
    C: Dim,
    S: RawStorage<f64, R, C>,
{
    Ok(square(t, "I3")?.determinant())
}

/// Returns the volume ratio, `√det(T)`.
///
/// # Errors
///
/// Returns [`MaterialError::Shape`] if `t` is not square, or
/// [`MaterialError::Domain`] if the determinant is negative or not finite.
pub fn j<R, C, S>(t: &Matrix<f64, R, C, S>) -> Result<f64>
where
    R: Dim,
    C: Dim,
    S: RawStorage<f64, R, C>,
{
    let det = square(t, "J")?.determinant();

    if !det.is_finite() {
        return Err(MaterialError::Domain {
            context: "J",
            value: det,
            reason: "determinant is not finite",
        });
    }
    if det < 0.0 {
        debug!(det, "rejecting inverted configuration");
        return Err(MaterialError::Domain {
            context: "J",
            value: det,
            reason: "volume ratio requires a non-negative determinant",
        });
    }

    Ok(det.sqrt())
}

/// Returns the deviatoric part, `T − (I1 / n) 1`.
///
/// # Errors
///
/// Returns [`MaterialError::Shape`] if `t` is not square.
pub fn deviatoric<R, C, S>(t: &Matrix<f64, R, C, S>) -> Result<Tensor>
where
    R: Dim,
    C: Dim,
    S: RawStorage<f64, R, C>,
{
    let t = square(t, "deviatoric part")?;
    let n = t.nrows();
    let mean = t.trace() / n as f64;

    Ok(t - Tensor::identity(n, n) * mean)
}

/// Returns the unimodular part, `det(T)^(−1/n) T`, whose determinant is one.
///
/// For a right Cauchy-Green tensor of order three this is `J^(−2/3) C`.
///
/// # Errors
///
/// Returns [`MaterialError::Shape`] if `t` is not square, or
/// [`MaterialError::Domain`] if the determinant is not strictly positive.
pub fn isochoric<R, C, S>(t: &Matrix<f64, R, C, S>) -> Result<Tensor>
where
    R: Dim,
    C: Dim,
    S: RawStorage<f64, R, C>,
{
    let t = square(t, "isochoric part")?;
    let det = t.determinant();

    if !(det.is_finite() && det > 0.0) {
        return Err(MaterialError::Domain {
            context: "isochoric part",
            value: det,
            reason: "requires a strictly positive determinant",
        });
    }

    let n = t.nrows() as f64;
    Ok(t * det.powf(-1.0 / n))
}

/// Copies `t` into a dynamic square tensor, rejecting non-square input.
pub(crate) fn square<R, C, S>(t: &Matrix<f64, R, C, S>, context: &'static str) -> Result<Tensor>
where
    R: Dim,
    C: Dim,
    S: RawStorage<f64, R, C>,
{
    let (rows, cols) = t.shape();
    if rows != cols {
        return Err(MaterialError::Shape {
            context,
            expected: (rows, rows),
            found: (rows, cols),
        });
    }

    Ok(DMatrix::from_fn(rows, cols, |i, j| t[(i, j)]))
}

fn second_invariant(t: &Tensor, trace: f64) -> f64 {
    0.5 * (trace * trace - (t * t).trace())
}
