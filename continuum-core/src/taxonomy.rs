//! The three open capability categories shared by material model packages.
//!
//! - [`Model`]: a constitutive law, identified by its concrete type.
//! - [`Test`]: an experimental or loading protocol, identified by its concrete type.
//! - [`State`]: a value recorded in a [`MaterialHistory`] or produced by a prediction.
//!
//! This crate never inspects the internals of a model or test.
//! Behavior is attached to (model, test) pairs by implementing
//! [`Predict`] for the pair, so both categories can be extended independently.
//!
//! [`MaterialHistory`]: crate::MaterialHistory
//! [`Predict`]: crate::Predict

use nalgebra::{Dim, Matrix, RawStorage};

use crate::{MaterialError, Result};

/// A constitutive law.
///
/// The only requirement is an identity.
/// Parameter metadata and response computations are opt-in hooks that fail
/// with [`MaterialError::NotImplemented`] until a model specializes them.
pub trait Model {
    /// Returns the name used to identify this model in errors and logs.
    ///
    /// Defaults to the concrete type's name without its module path.
    fn name(&self) -> &str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Returns the ordered names of the parameters this model accepts.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::NotImplemented`] unless the model overrides it.
    fn parameter_names(&self) -> Result<Vec<String>> {
        Err(MaterialError::not_implemented(
            "parameter_names",
            self.name(),
        ))
    }
}

/// An experimental protocol, such as a uniaxial or biaxial loading path.
pub trait Test {
    /// Returns the name used to identify this test in errors and logs.
    ///
    /// Defaults to the concrete type's name without its module path.
    fn name(&self) -> &str {
        short_type_name(std::any::type_name::<Self>())
    }
}

/// A snapshot of material state, such as a strain vector or a deformation gradient.
///
/// Every snapshot reports a `(rows, cols)` shape.
/// A [`MaterialHistory`] fixes the shape of its first snapshot and rejects
/// any later snapshot with a different one.
///
/// [`MaterialHistory`]: crate::MaterialHistory
pub trait State {
    /// Returns the `(rows, cols)` shape of this snapshot.
    fn shape(&self) -> (usize, usize);
}

/// Covers `DVector`, `DMatrix`, and the fixed-size `SVector`/`SMatrix` types.
impl<R, C, S> State for Matrix<f64, R, C, S>
where
    R: Dim,
    C: Dim,
    S: RawStorage<f64, R, C>,
{
    fn shape(&self) -> (usize, usize) {
        Matrix::shape(self)
    }
}

impl State for f64 {
    fn shape(&self) -> (usize, usize) {
        (1, 1)
    }
}

/// Strips the module path from a type name, keeping any generic arguments.
///
/// `a::b::Foo<c::Bar>` becomes `Foo<c::Bar>`.
/// Names that do not start with a path, such as `[a::B; 3]` or `&a::B`,
/// are returned unchanged.
fn short_type_name(full: &str) -> &str {
    if !full.starts_with(|c: char| c.is_alphabetic() || c == '_') {
        return full;
    }
    let head = full.find(['<', ' ', ';', ',', ')']).unwrap_or(full.len());
    let start = full[..head].rfind("::").map_or(0, |i| i + 2);
    &full[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    use nalgebra::{DMatrix, DVector, Matrix3, Vector3};

    struct Unspecialized;
    impl Model for Unspecialized {}

    struct Uniaxial;
    impl Test for Uniaxial {}

    struct Named;
    impl Model for Named {
        fn name(&self) -> &str {
            "neo-hookean"
        }
    }

    #[test]
    fn default_names_strip_module_path() {
        assert_eq!(Unspecialized.name(), "Unspecialized");
        assert_eq!(Uniaxial.name(), "Uniaxial");
        assert_eq!(Named.name(), "neo-hookean");
    }

    #[test]
    fn short_type_name_keeps_generics() {
        assert_eq!(short_type_name("a::b::Foo<c::Bar>"), "Foo<c::Bar>");
        assert_eq!(short_type_name("Plain"), "Plain");
        assert_eq!(short_type_name("f64"), "f64");
    }

    #[test]
    fn short_type_name_leaves_non_path_types_alone() {
        assert_eq!(short_type_name("[a::B; 3]"), "[a::B; 3]");
        assert_eq!(short_type_name("&a::B"), "&a::B");
        assert_eq!(short_type_name("(a::B, c::D)"), "(a::B, c::D)");
        assert_eq!(short_type_name("dyn a::Trait"), "dyn a::Trait");
    }

    #[test]
    fn unspecialized_parameter_names_fail() {
        let err = Unspecialized.parameter_names().unwrap_err();
        assert_eq!(
            err,
            MaterialError::NotImplemented {
                hook: "parameter_names",
                model: "Unspecialized".into(),
                test: None,
            }
        );
    }

    #[test]
    fn overridden_name_appears_in_errors() {
        let err = Named.parameter_names().unwrap_err();
        assert!(err.to_string().contains("neo-hookean"));
    }

    #[test]
    fn state_shapes() {
        assert_eq!(State::shape(&DVector::<f64>::zeros(4)), (4, 1));
        assert_eq!(State::shape(&DMatrix::<f64>::zeros(2, 3)), (2, 3));
        assert_eq!(State::shape(&Matrix3::<f64>::identity()), (3, 3));
        assert_eq!(State::shape(&Vector3::new(1.0, 2.0, 3.0)), (3, 1));
        assert_eq!(State::shape(&1.5_f64), (1, 1));
    }
}
