use thiserror::Error;

/// A result type alias using [`MaterialError`] as the default error.
pub type Result<T, E = MaterialError> = std::result::Result<T, E>;

/// Errors that may occur when evaluating material model contracts.
///
/// No variant is ever recovered into a numeric default by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MaterialError {
    /// A hook was invoked for a model (or model/test pair) that does not specialize it.
    #[error("{hook} is not implemented for {}", pair(.model, .test))]
    NotImplemented {
        hook: &'static str,
        model: String,
        test: Option<String>,
    },

    /// A tensor or state snapshot had an unexpected shape.
    #[error("{context}: expected shape {expected:?}, found {found:?}")]
    Shape {
        context: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// The input is mathematically or physically outside the valid domain.
    ///
    /// For example, the volume ratio of a tensor with negative determinant.
    #[error("{context}: {reason} (got {value})")]
    Domain {
        context: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Parameter names or bounds are inconsistent.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A model-specific calculation failed.
    ///
    /// For example, a failure to converge inside a downstream constitutive update.
    #[error("calculation error: {0}")]
    Calculation(String),
}

impl MaterialError {
    /// Creates a [`MaterialError::NotImplemented`] for a hook keyed by model alone.
    pub fn not_implemented(hook: &'static str, model: impl Into<String>) -> Self {
        Self::NotImplemented {
            hook,
            model: model.into(),
            test: None,
        }
    }

    /// Creates a [`MaterialError::NotImplemented`] for a hook keyed by a model/test pair.
    pub fn not_implemented_for(
        hook: &'static str,
        model: impl Into<String>,
        test: impl Into<String>,
    ) -> Self {
        Self::NotImplemented {
            hook,
            model: model.into(),
            test: Some(test.into()),
        }
    }

    /// Returns `true` if this error marks an unspecialized hook.
    #[must_use]
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Self::NotImplemented { .. })
    }
}

fn pair(model: &str, test: &Option<String>) -> String {
    match test {
        Some(test) => format!("({model}, {test})"),
        None => format!("({model})"),
    }
}

/// Errors raised when parameter names or bound sets do not line up.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Two name sets that must agree do not.
    #[error("{context}: parameter names {found:?} do not match {expected:?}")]
    ParameterMismatch {
        context: &'static str,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// The aggregated lower bound exceeds the upper bound for a parameter.
    #[error("empty admissible interval for `{parameter}`: lower {lower} > upper {upper}")]
    EmptyInterval {
        parameter: String,
        lower: f64,
        upper: f64,
    },

    /// A parameter name appears more than once.
    #[error("duplicate parameter `{0}`")]
    DuplicateParameter(String),

    /// A parameter name was not found.
    #[error("unknown parameter `{0}`")]
    UnknownParameter(String),

    /// Names and values have different lengths.
    #[error("{names} parameter names but {values} values")]
    LengthMismatch { names: usize, values: usize },

    /// A bound value is NaN.
    #[error("{context} for `{parameter}` is NaN")]
    NanBound {
        context: &'static str,
        parameter: String,
    },

    /// A numeric setting is NaN or infinite.
    #[error("setting `{name}` must be finite, got {value}")]
    NonFiniteSetting { name: String, value: f64 },
}
