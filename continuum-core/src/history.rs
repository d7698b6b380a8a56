use tracing::{trace, warn};
use uom::si::f64::Time;

use crate::{MaterialError, Result, State};

/// An append-only, time-indexed record of material state snapshots.
///
/// Every snapshot shares the shape of the first one, and each snapshot has
/// exactly one time stamp.
/// Time stamps are expected to be non-decreasing; a decreasing stamp is
/// accepted but logged as a warning.
///
/// Appending takes `&mut self`, so a history has a single writer at a time.
/// Share one across threads behind a `Mutex`.
///
/// # Example
///
/// ```
/// use continuum_core::MaterialHistory;
/// use nalgebra::Vector3;
/// use uom::si::{f64::Time, time::second};
///
/// let mut history = MaterialHistory::new(Vector3::zeros(), Time::new::<second>(0.0));
/// history.push(Vector3::new(0.1, 0.0, 0.0), Time::new::<second>(1.0)).unwrap();
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.states().len(), history.times().len());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize))]
pub struct MaterialHistory<S> {
    states: Vec<S>,
    times: Vec<Time>,
}

impl<S: State> MaterialHistory<S> {
    /// Creates a history holding one snapshot.
    ///
    /// The snapshot's shape becomes the required shape for every later snapshot.
    #[must_use]
    pub fn new(state: S, time: Time) -> Self {
        Self {
            states: vec![state],
            times: vec![time],
        }
    }

    /// Appends a snapshot taken at `time`.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::Shape`] if the snapshot's shape differs from
    /// the first snapshot's. The history is left unchanged.
    pub fn push(&mut self, state: S, time: Time) -> Result<()> {
        self.check_shape(&state)?;
        self.warn_if_decreasing(time);

        trace!(len = self.len() + 1, time_s = time.value, "appending state snapshot");
        self.states.push(state);
        self.times.push(time);
        Ok(())
    }

    /// Appends every snapshot of `other`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::Shape`] if `other` holds snapshots of a
    /// different shape. Nothing is appended in that case.
    pub fn extend(&mut self, other: Self) -> Result<()> {
        // Every snapshot in `other` shares its first snapshot's shape.
        self.check_shape(&other.states[0])?;
        self.warn_if_decreasing(other.times[0]);

        trace!(
            len = self.len() + other.len(),
            merged = other.len(),
            "merging state history"
        );
        self.states.extend(other.states);
        self.times.extend(other.times);
        Ok(())
    }

    /// Returns the shape shared by every snapshot.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.states[0].shape()
    }

    fn check_shape(&self, state: &S) -> Result<()> {
        let expected = self.shape();
        let found = state.shape();
        if found == expected {
            Ok(())
        } else {
            Err(MaterialError::Shape {
                context: "history snapshot",
                expected,
                found,
            })
        }
    }

    fn warn_if_decreasing(&self, time: Time) {
        let last = self.times[self.times.len() - 1];
        if time < last {
            warn!(
                last_s = last.value,
                next_s = time.value,
                "history time stamps are decreasing"
            );
        }
    }
}

impl<S> MaterialHistory<S> {
    /// Returns the snapshots in the order they were recorded.
    #[must_use]
    pub fn states(&self) -> &[S] {
        &self.states
    }

    /// Returns the time stamps, parallel to [`states`](Self::states).
    #[must_use]
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// Returns the number of recorded snapshots. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always `false`; a history is created with one snapshot and never shrinks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns the first snapshot and its time stamp.
    #[must_use]
    pub fn first(&self) -> (Time, &S) {
        (self.times[0], &self.states[0])
    }

    /// Returns the most recent snapshot and its time stamp.
    #[must_use]
    pub fn last(&self) -> (Time, &S) {
        let i = self.len() - 1;
        (self.times[i], &self.states[i])
    }

    /// Iterates over `(time, state)` pairs in recorded order.
    pub fn iter(&self) -> impl Iterator<Item = (Time, &S)> {
        self.times.iter().copied().zip(&self.states)
    }

    /// Consumes the history, returning its snapshots and time stamps.
    #[must_use]
    pub fn into_parts(self) -> (Vec<S>, Vec<Time>) {
        (self.states, self.times)
    }
}
