use tracing::{debug, debug_span};

use crate::{Bounds, MaterialError, Model, ParameterSet, PredictOptions, Result, Test, params};

#[cfg(feature = "parallel")]
use crate::Execution;

/// Computes a model's response under a test protocol.
///
/// A model implements `Predict<T>` once for every test type it can simulate,
/// so the (model, test) pair selects the computation.
/// Both methods have defaults, which lets a model declare a pair without
/// specializing it:
///
/// - [`predict`] fails with [`MaterialError::NotImplemented`] naming the pair.
/// - [`parameter_bounds`] returns [`Bounds::unconstrained`].
///
/// To simulate several kinds of tests in one batch, wrap them in an enum
/// that implements [`Test`] and implement `Predict` for the enum.
///
/// [`predict`]: Predict::predict
/// [`parameter_bounds`]: Predict::parameter_bounds
pub trait Predict<T: Test + ?Sized>: Model {
    /// The predicted response, such as a stress history.
    type Response;

    /// Returns the model's response to `test` for the given parameters.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::NotImplemented`] unless the pair overrides it,
    /// or any error raised by the model's computation.
    fn predict(
        &self,
        test: &T,
        _parameters: &ParameterSet,
        _options: &PredictOptions,
    ) -> Result<Self::Response> {
        Err(MaterialError::not_implemented_for(
            "predict",
            self.name(),
            test.name(),
        ))
    }

    /// Returns the admissible parameter region for fitting against `test`.
    ///
    /// Defaults to unconstrained bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot report bounds for this test.
    fn parameter_bounds(&self, _test: &T) -> Result<Bounds> {
        Ok(Bounds::unconstrained())
    }
}

/// Predicts the response for one test.
///
/// Equivalent to [`Predict::predict`]; provided for callers that prefer function form.
///
/// # Errors
///
/// Returns any error raised by [`Predict::predict`].
pub fn predict<M, T>(
    model: &M,
    test: &T,
    parameters: &ParameterSet,
    options: &PredictOptions,
) -> Result<M::Response>
where
    M: Predict<T> + ?Sized,
    T: Test + ?Sized,
{
    model.predict(test, parameters, options)
}

/// Predicts the response for each test, returning results in input order.
///
/// Each test is evaluated independently against the same model and parameters.
/// With [`Execution::Parallel`] and the `parallel` feature, tests run on the
/// rayon thread pool; the output order is unaffected.
///
/// # Errors
///
/// Returns the error of the first failing test in input order.
///
/// [`Execution::Parallel`]: crate::Execution::Parallel
pub fn predict_all<M, T>(
    model: &M,
    tests: &[T],
    parameters: &ParameterSet,
    options: &PredictOptions,
) -> Result<Vec<M::Response>>
where
    M: Predict<T> + Sync + ?Sized,
    M::Response: Send,
    T: Test + Sync,
{
    let _span = debug_span!("predict_all", model = model.name(), tests = tests.len()).entered();

    let results = evaluate_each(tests, options, |test| {
        model.predict(test, parameters, options)
    });

    debug!(
        failed = results.iter().filter(|result| result.is_err()).count(),
        "batch prediction finished"
    );

    results.into_iter().collect()
}

#[cfg(feature = "parallel")]
fn evaluate_each<T, R, F>(tests: &[T], options: &PredictOptions, f: F) -> Vec<Result<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> Result<R> + Sync + Send,
{
    use rayon::prelude::*;

    match options.execution {
        Execution::Parallel => tests.par_iter().map(f).collect(),
        Execution::Sequential => tests.iter().map(f).collect(),
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate_each<T, R, F>(tests: &[T], options: &PredictOptions, f: F) -> Vec<Result<R>>
where
    F: Fn(&T) -> Result<R>,
{
    if options.execution == crate::Execution::Parallel {
        debug!("parallel execution requested without the `parallel` feature; running sequentially");
    }
    tests.iter().map(f).collect()
}

/// Returns the admissible region for fitting one parameter set against every test.
///
/// Per-test bounds from [`Predict::parameter_bounds`] are intersected with
/// [`aggregate_bounds`](crate::aggregate_bounds).
/// If the result constrains anything, its parameter names must match
/// [`Model::parameter_names`].
///
/// # Errors
///
/// Returns [`MaterialError::Config`] if the per-test bounds are inconsistent
/// or disagree with the model's declared parameters, or any error raised while
/// querying bounds or names.
pub fn parameter_bounds_all<M, T>(model: &M, tests: &[T]) -> Result<Bounds>
where
    M: Predict<T> + ?Sized,
    T: Test,
{
    let per_test = tests
        .iter()
        .map(|test| model.parameter_bounds(test))
        .collect::<Result<Vec<_>>>()?;

    let bounds = params::aggregate_bounds(per_test)?;

    if bounds.is_unconstrained() {
        debug!(model = model.name(), "no test constrains the parameters");
        return Ok(bounds);
    }

    let declared = ParameterSet::from_pairs(
        model
            .parameter_names()?
            .into_iter()
            .map(|name| (name, 0.0)),
    )?;

    for (side, context) in [
        (&bounds.lower, "aggregated lower bound"),
        (&bounds.upper, "aggregated upper bound"),
    ] {
        if let Some(side) = side {
            if !side.same_names(&declared) {
                return Err(crate::ConfigError::ParameterMismatch {
                    context,
                    expected: declared.sorted_names(),
                    found: side.sorted_names(),
                }
                .into());
            }
        }
    }

    debug!(model = model.name(), ?bounds, "aggregated parameter bounds");
    Ok(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{ConfigError, Execution};

    /// Test protocol that stretches to a fixed ratio.
    struct Stretch(f64);
    impl Test for Stretch {}

    /// Test protocol no model here specializes.
    struct Shear;
    impl Test for Shear {}

    /// Linear spring: response is `k * (stretch - 1)`.
    struct Spring;

    impl Model for Spring {
        fn parameter_names(&self) -> Result<Vec<String>> {
            Ok(vec!["k".into()])
        }
    }

    impl Predict<Stretch> for Spring {
        type Response = f64;

        fn predict(
            &self,
            test: &Stretch,
            parameters: &ParameterSet,
            _options: &PredictOptions,
        ) -> Result<f64> {
            Ok(parameters.value("k")? * (test.0 - 1.0))
        }

        fn parameter_bounds(&self, test: &Stretch) -> Result<Bounds> {
            // Larger stretches demand a stiffer floor.
            let floor = ParameterSet::from_pairs([("k", test.0)])?;
            let ceiling = ParameterSet::from_pairs([("k", 100.0)])?;
            Ok(Bounds::new(Some(floor), Some(ceiling)))
        }
    }

    /// Declares the pair without specializing it.
    impl Predict<Shear> for Spring {
        type Response = f64;
    }

    /// Model with no parameter metadata at all.
    struct Placeholder;
    impl Model for Placeholder {}
    impl Predict<Stretch> for Placeholder {
        type Response = ();
    }

    fn params(k: f64) -> ParameterSet {
        ParameterSet::from_pairs([("k", k)]).unwrap()
    }

    #[test]
    fn unspecialized_pair_is_not_implemented() {
        let err = Spring
            .predict(&Shear, &params(1.0), &PredictOptions::default())
            .unwrap_err();
        assert_eq!(
            err,
            MaterialError::NotImplemented {
                hook: "predict",
                model: "Spring".into(),
                test: Some("Shear".into()),
            }
        );
    }

    #[test]
    fn unspecialized_bounds_are_unconstrained() {
        assert!(Spring.parameter_bounds(&Shear).unwrap().is_unconstrained());
        assert!(
            parameter_bounds_all(&Placeholder, &[Stretch(1.0), Stretch(2.0)])
                .unwrap()
                .is_unconstrained()
        );
    }

    #[test]
    fn function_form_matches_method() {
        let options = PredictOptions::default();
        let direct = Spring.predict(&Stretch(1.5), &params(4.0), &options).unwrap();
        let via_fn = predict(&Spring, &Stretch(1.5), &params(4.0), &options).unwrap();
        assert_eq!(direct, via_fn);
        assert_eq!(direct, 2.0);
    }

    #[test]
    fn batch_matches_single_predictions_in_order() {
        let tests = [Stretch(1.1), Stretch(1.5), Stretch(2.0), Stretch(0.5)];
        let parameters = params(10.0);

        for execution in [Execution::Sequential, Execution::Parallel] {
            let options = PredictOptions::default().with_execution(execution);
            let batch = predict_all(&Spring, &tests, &parameters, &options).unwrap();

            assert_eq!(batch.len(), tests.len());
            for (test, response) in tests.iter().zip(&batch) {
                assert_eq!(
                    *response,
                    Spring.predict(test, &parameters, &options).unwrap()
                );
            }
        }
    }

    #[test]
    fn empty_batch_yields_empty_result() {
        let tests: [Stretch; 0] = [];
        let batch = predict_all(&Spring, &tests, &params(1.0), &PredictOptions::default());
        assert_eq!(batch, Ok(vec![]));
    }

    #[test]
    fn batch_reports_first_failure() {
        let err = predict_all(
            &Spring,
            &[Stretch(1.0)],
            &ParameterSet::new(),
            &PredictOptions::parallel(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            MaterialError::from(ConfigError::UnknownParameter("k".into()))
        );

        let err = predict_all(&Spring, &[Shear, Shear], &params(1.0), &PredictOptions::default())
            .unwrap_err();
        assert!(err.is_not_implemented());
    }

    #[test]
    fn bounds_aggregate_across_tests() {
        let bounds = parameter_bounds_all(&Spring, &[Stretch(1.0), Stretch(3.0)]).unwrap();
        assert_eq!(bounds.lower, Some(params(3.0)));
        assert_eq!(bounds.upper, Some(params(100.0)));
    }

    #[test]
    fn bounds_must_match_declared_names() {
        struct Mislabeled;
        impl Model for Mislabeled {
            fn parameter_names(&self) -> Result<Vec<String>> {
                Ok(vec!["k".into(), "c".into()])
            }
        }
        impl Predict<Stretch> for Mislabeled {
            type Response = f64;

            fn parameter_bounds(&self, _test: &Stretch) -> Result<Bounds> {
                Ok(Bounds::new(Some(ParameterSet::from_pairs([("k", 0.0)])?), None))
            }
        }

        let err = parameter_bounds_all(&Mislabeled, &[Stretch(1.0)]).unwrap_err();
        assert!(matches!(
            err,
            MaterialError::Config(ConfigError::ParameterMismatch {
                context: "aggregated lower bound",
                ..
            })
        ));
    }

    #[test]
    fn upper_bounds_must_match_declared_names() {
        struct CeilingOnly;
        impl Model for CeilingOnly {
            fn parameter_names(&self) -> Result<Vec<String>> {
                Ok(vec!["k".into(), "c".into()])
            }
        }
        impl Predict<Stretch> for CeilingOnly {
            type Response = f64;

            fn parameter_bounds(&self, _test: &Stretch) -> Result<Bounds> {
                Ok(Bounds::new(None, Some(ParameterSet::from_pairs([("k", 5.0)])?)))
            }
        }

        let err = parameter_bounds_all(&CeilingOnly, &[Stretch(1.0), Stretch(2.0)]).unwrap_err();
        assert_eq!(
            err,
            MaterialError::Config(ConfigError::ParameterMismatch {
                context: "aggregated upper bound",
                expected: vec!["c".into(), "k".into()],
                found: vec!["k".into()],
            })
        );
    }

    #[test]
    fn nan_bound_from_one_test_fails_the_aggregate() {
        struct Unstable;
        impl Model for Unstable {
            fn parameter_names(&self) -> Result<Vec<String>> {
                Ok(vec!["k".into()])
            }
        }
        impl Predict<Stretch> for Unstable {
            type Response = f64;

            fn parameter_bounds(&self, test: &Stretch) -> Result<Bounds> {
                let floor = ParameterSet::from_pairs([("k", (test.0 - 2.0).ln())])?;
                Ok(Bounds::new(Some(floor), None))
            }
        }

        let err = parameter_bounds_all(&Unstable, &[Stretch(4.0), Stretch(1.0)]).unwrap_err();
        assert_eq!(
            err,
            MaterialError::Config(ConfigError::NanBound {
                context: "lower bound",
                parameter: "k".into(),
            })
        );
    }

    #[test]
    fn bounds_without_declared_names_fail_loudly() {
        struct Undeclared;
        impl Model for Undeclared {}
        impl Predict<Stretch> for Undeclared {
            type Response = f64;

            fn parameter_bounds(&self, _test: &Stretch) -> Result<Bounds> {
                Ok(Bounds::new(None, Some(ParameterSet::from_pairs([("k", 1.0)])?)))
            }
        }

        let err = parameter_bounds_all(&Undeclared, &[Stretch(1.0)]).unwrap_err();
        assert!(err.is_not_implemented());
    }
}
