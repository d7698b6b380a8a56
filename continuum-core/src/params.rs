//! Named parameter values and admissible bounds.
//!
//! A [`ParameterSet`] is the substrate that prediction and bound aggregation
//! operate on: an ordered collection of uniquely named scalars.
//! [`Bounds`] pairs an optional lower and upper [`ParameterSet`], where an
//! absent side means "unconstrained" (−∞ or +∞).
//!
//! When one parameter set is fit against several tests at once, the
//! admissible region is the intersection of every test's region.
//! [`aggregate_bounds`] computes it: the largest lower bound and the smallest
//! upper bound win for each parameter.

#[cfg(feature = "serde-derive")]
mod serde_impl;

use tracing::warn;

use crate::ConfigError;

/// An ordered collection of uniquely named scalar parameters.
///
/// Order follows insertion, which is typically the order reported by
/// [`Model::parameter_names`].
///
/// # Example
///
/// ```
/// use continuum_core::ParameterSet;
///
/// let params = ParameterSet::from_pairs([("mu", 1.2), ("kappa", 40.0)]).unwrap();
/// assert_eq!(params.get("kappa"), Some(40.0));
/// assert_eq!(params.names().collect::<Vec<_>>(), ["mu", "kappa"]);
/// ```
///
/// [`Model::parameter_names`]: crate::Model::parameter_names
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    entries: Vec<(String, f64)>,
}

impl ParameterSet {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parameter set from `(name, value)` pairs, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateParameter`] if a name repeats.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for (name, value) in pairs {
            set.insert(name, value)?;
        }
        Ok(set)
    }

    /// Pairs an ordered list of names with a value vector, as produced by an optimizer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LengthMismatch`] if the lengths differ,
    /// or [`ConfigError::DuplicateParameter`] if a name repeats.
    pub fn from_values<S: AsRef<str>>(names: &[S], values: &[f64]) -> Result<Self, ConfigError> {
        if names.len() != values.len() {
            return Err(ConfigError::LengthMismatch {
                names: names.len(),
                values: values.len(),
            });
        }
        Self::from_pairs(
            names
                .iter()
                .zip(values)
                .map(|(name, &value)| (name.as_ref(), value)),
        )
    }

    /// Appends a named value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateParameter`] if the name is already present.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) -> Result<(), ConfigError> {
        let name = name.into();
        if self.contains(&name) {
            return Err(ConfigError::DuplicateParameter(name));
        }
        self.entries.push((name, value));
        Ok(())
    }

    /// Returns the value for `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|&(_, value)| value)
    }

    /// Returns the value for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownParameter`] if the name is absent.
    pub fn value(&self, name: &str) -> Result<f64, ConfigError> {
        self.get(name)
            .ok_or_else(|| ConfigError::UnknownParameter(name.to_owned()))
    }

    /// Returns `true` if `name` is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == name)
    }

    /// Returns the values in the order given by `names`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownParameter`] for the first missing name.
    pub fn values_for<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<f64>, ConfigError> {
        names.iter().map(|name| self.value(name.as_ref())).collect()
    }

    /// Iterates over names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Iterates over values in order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|&(_, value)| value)
    }

    /// Iterates over `(name, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if both sets hold the same names, in any order.
    #[must_use]
    pub fn same_names(&self, other: &Self) -> bool {
        self.len() == other.len() && self.names().all(|name| other.contains(name))
    }

    /// Returns the names sorted, for order-independent reporting.
    #[must_use]
    pub fn sorted_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.names().map(str::to_owned).collect();
        names.sort();
        names
    }

    /// Combines `other` into `self` value by value with `pick`.
    ///
    /// Both sets must hold the same names.
    fn combine_with(&mut self, other: &Self, pick: fn(f64, f64) -> f64) {
        for (name, value) in &mut self.entries {
            if let Some(other) = other.get(name) {
                *value = pick(*value, other);
            }
        }
    }
}

/// Admissible lower and upper limits for named parameters.
///
/// `None` on either side means that side is unconstrained.
/// When both sides are present they must name the same parameters.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Bounds {
    pub lower: Option<ParameterSet>,
    pub upper: Option<ParameterSet>,
}

impl Bounds {
    /// Creates bounds from optional lower and upper sets.
    #[must_use]
    pub fn new(lower: Option<ParameterSet>, upper: Option<ParameterSet>) -> Self {
        Self { lower, upper }
    }

    /// Returns bounds that impose no restriction.
    #[must_use]
    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// Returns `true` if neither side is present.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.lower.is_none() && self.upper.is_none()
    }

    /// Checks that no bound is NaN, that both sides name the same parameters,
    /// and that `lower ≤ upper`.
    ///
    /// Infinite values are allowed and mean that parameter is unbounded on
    /// that side.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NanBound`] for the first NaN value,
    /// [`ConfigError::ParameterMismatch`] if the name sets differ,
    /// or [`ConfigError::EmptyInterval`] for the first parameter whose lower
    /// bound exceeds its upper bound.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(lower) = &self.lower {
            reject_nan(lower, "lower bound")?;
        }
        if let Some(upper) = &self.upper {
            reject_nan(upper, "upper bound")?;
        }

        let (Some(lower), Some(upper)) = (&self.lower, &self.upper) else {
            return Ok(());
        };

        if !lower.same_names(upper) {
            return Err(ConfigError::ParameterMismatch {
                context: "upper bound",
                expected: lower.sorted_names(),
                found: upper.sorted_names(),
            });
        }

        for (name, lo) in lower.iter() {
            let hi = upper.value(name)?;
            if lo > hi {
                return Err(ConfigError::EmptyInterval {
                    parameter: name.to_owned(),
                    lower: lo,
                    upper: hi,
                });
            }
        }

        Ok(())
    }

    /// Returns `true` if every named value lies within these bounds.
    ///
    /// Parameters that a present side does not mention are treated as
    /// unconstrained on that side. A parameter that a present side
    /// constrains but `params` lacks makes the set inadmissible.
    #[must_use]
    pub fn contains(&self, params: &ParameterSet) -> bool {
        let covers = |side: &Option<ParameterSet>| {
            side.as_ref()
                .is_none_or(|side| side.names().all(|name| params.contains(name)))
        };
        if !covers(&self.lower) || !covers(&self.upper) {
            return false;
        }

        params.iter().all(|(name, value)| {
            let above = self
                .lower
                .as_ref()
                .and_then(|lower| lower.get(name))
                .is_none_or(|lo| value >= lo);
            let below = self
                .upper
                .as_ref()
                .and_then(|upper| upper.get(name))
                .is_none_or(|hi| value <= hi);
            above && below
        })
    }

    /// Returns lower limits in the order of `names`, using `−∞` when unconstrained.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownParameter`] if a present lower bound lacks a name.
    pub fn lower_values<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<f64>, ConfigError> {
        side_values(self.lower.as_ref(), names, f64::NEG_INFINITY)
    }

    /// Returns upper limits in the order of `names`, using `+∞` when unconstrained.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownParameter`] if a present upper bound lacks a name.
    pub fn upper_values<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<f64>, ConfigError> {
        side_values(self.upper.as_ref(), names, f64::INFINITY)
    }
}

fn reject_nan(side: &ParameterSet, context: &'static str) -> Result<(), ConfigError> {
    match side.iter().find(|(_, value)| value.is_nan()) {
        Some((name, _)) => Err(ConfigError::NanBound {
            context,
            parameter: name.to_owned(),
        }),
        None => Ok(()),
    }
}

fn side_values<S: AsRef<str>>(
    side: Option<&ParameterSet>,
    names: &[S],
    unbounded: f64,
) -> Result<Vec<f64>, ConfigError> {
    match side {
        Some(set) => set.values_for(names),
        None => Ok(vec![unbounded; names.len()]),
    }
}

/// Intersects per-test bounds into a single admissible region.
///
/// - The aggregate lower bound is absent if every input lower bound is absent.
///   Otherwise each parameter takes the maximum over the present lower bounds.
/// - The aggregate upper bound is absent if every input upper bound is absent.
///   Otherwise each parameter takes the minimum over the present upper bounds.
///
/// An empty input yields unconstrained bounds.
///
/// # Errors
///
/// Returns [`ConfigError::NanBound`] if any input bound value is NaN.
/// Returns [`ConfigError::ParameterMismatch`] if two present lower (or upper)
/// bounds name different parameters, or if the aggregate lower and upper
/// bounds do.
/// Returns [`ConfigError::EmptyInterval`] if the aggregate lower bound exceeds
/// the aggregate upper bound for any parameter.
pub fn aggregate_bounds<I>(bounds: I) -> Result<Bounds, ConfigError>
where
    I: IntoIterator<Item = Bounds>,
{
    let (lowers, uppers): (Vec<_>, Vec<_>) = bounds
        .into_iter()
        .map(|bounds| (bounds.lower, bounds.upper))
        .unzip();

    let aggregate = Bounds {
        lower: tighten(lowers.into_iter().flatten(), "lower bound", f64::max)?,
        upper: tighten(uppers.into_iter().flatten(), "upper bound", f64::min)?,
    };

    aggregate.validate().inspect_err(|err| {
        warn!(%err, "aggregated bounds are inconsistent");
    })?;

    Ok(aggregate)
}

/// Folds present bound sets with `pick`, requiring identical name sets and
/// no NaN values.
fn tighten<I>(
    sides: I,
    context: &'static str,
    pick: fn(f64, f64) -> f64,
) -> Result<Option<ParameterSet>, ConfigError>
where
    I: IntoIterator<Item = ParameterSet>,
{
    let mut sides = sides.into_iter();
    let Some(mut combined) = sides.next() else {
        return Ok(None);
    };
    reject_nan(&combined, context)?;

    for side in sides {
        reject_nan(&side, context)?;
        if !combined.same_names(&side) {
            warn!(context, "per-test bounds name different parameters");
            return Err(ConfigError::ParameterMismatch {
                context,
                expected: combined.sorted_names(),
                found: side.sorted_names(),
            });
        }
        combined.combine_with(&side, pick);
    }

    Ok(Some(combined))
}
