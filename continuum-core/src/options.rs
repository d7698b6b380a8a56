use std::collections::BTreeMap;

use crate::ConfigError;

/// How a batch of predictions is scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Execution {
    /// Evaluate tests one after another on the calling thread.
    #[default]
    Sequential,
    /// Evaluate tests on the rayon thread pool.
    ///
    /// Falls back to sequential evaluation without the `parallel` feature.
    Parallel,
}

/// Options forwarded to [`Predict::predict`] and used by [`predict_all`].
///
/// Named settings are opaque to this crate; models read the ones they understand.
///
/// [`Predict::predict`]: crate::Predict::predict
/// [`predict_all`]: crate::predict_all
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PredictOptions {
    pub execution: Execution,
    pub settings: BTreeMap<String, f64>,
}

impl PredictOptions {
    /// Returns options that evaluate batches in parallel.
    #[must_use]
    pub fn parallel() -> Self {
        Self {
            execution: Execution::Parallel,
            ..Self::default()
        }
    }

    /// Returns these options with the given execution mode.
    #[must_use]
    pub fn with_execution(self, execution: Execution) -> Self {
        Self { execution, ..self }
    }

    /// Returns these options with a named setting added or replaced.
    #[must_use]
    pub fn with_setting(mut self, name: impl Into<String>, value: f64) -> Self {
        self.settings.insert(name.into(), value);
        self
    }

    /// Returns the named setting, if present.
    #[must_use]
    pub fn setting(&self, name: &str) -> Option<f64> {
        self.settings.get(name).copied()
    }

    /// Validates that every setting is finite.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonFiniteSetting`] for the first NaN or infinite value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.settings.iter().find(|(_, value)| !value.is_finite()) {
            Some((name, &value)) => Err(ConfigError::NonFiniteSetting {
                name: name.clone(),
                value,
            }),
            None => Ok(()),
        }
    }
}
