pub mod neo_hookean {
    use continuum_core::{
        Bounds, MaterialError, Model, ParameterSet, Predict, PredictOptions, Result, Test,
    };
    use continuum_tensor::{DeformationTensor, StrainEnergyDensity, StressTensor, Tensor, i1};
    use serde::{Deserialize, Serialize};

    /// A mock incompressible neo-Hookean solid, `W = μ/2 (I1 − 3)`.
    ///
    /// Specializes uniaxial and equibiaxial tension, but not simple shear.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct NeoHookean;

    impl Model for NeoHookean {
        fn parameter_names(&self) -> Result<Vec<String>> {
            Ok(vec!["mu".into()])
        }
    }

    /// Loading protocols driven by a list of stretches or shear amounts.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(tag = "kind", rename_all = "snake_case")]
    pub enum Protocol {
        Uniaxial { stretches: Vec<f64> },
        EquiBiaxial { stretches: Vec<f64> },
        SimpleShear { amounts: Vec<f64> },
    }

    impl Test for Protocol {
        fn name(&self) -> &str {
            match self {
                Self::Uniaxial { .. } => "Uniaxial",
                Self::EquiBiaxial { .. } => "EquiBiaxial",
                Self::SimpleShear { .. } => "SimpleShear",
            }
        }
    }

    impl Protocol {
        /// Returns the deformation gradient at each load step.
        #[must_use]
        pub fn deformation_gradients(&self) -> Vec<Tensor> {
            match self {
                Self::Uniaxial { stretches } => stretches
                    .iter()
                    .map(|&l| diagonal(l, 1.0 / l.sqrt(), 1.0 / l.sqrt()))
                    .collect(),
                Self::EquiBiaxial { stretches } => stretches
                    .iter()
                    .map(|&l| diagonal(l, l, 1.0 / (l * l)))
                    .collect(),
                Self::SimpleShear { amounts } => amounts
                    .iter()
                    .map(|&g| {
                        let mut f = Tensor::identity(3, 3);
                        f[(0, 1)] = g;
                        f
                    })
                    .collect(),
            }
        }
    }

    fn diagonal(a: f64, b: f64, c: f64) -> Tensor {
        Tensor::from_diagonal(&nalgebra::DVector::from_vec(vec![a, b, c]))
    }

    /// Nominal stress in the loading direction at each stretch.
    impl Predict<Protocol> for NeoHookean {
        type Response = Vec<f64>;

        fn predict(
            &self,
            test: &Protocol,
            parameters: &ParameterSet,
            _options: &PredictOptions,
        ) -> Result<Vec<f64>> {
            let mu = parameters.value("mu")?;

            let (stretches, exponent) = match test {
                Protocol::Uniaxial { stretches } => (stretches, -2),
                Protocol::EquiBiaxial { stretches } => (stretches, -5),
                Protocol::SimpleShear { .. } => {
                    return Err(MaterialError::not_implemented_for(
                        "predict",
                        self.name(),
                        test.name(),
                    ));
                }
            };

            stretches
                .iter()
                .map(|&l| {
                    if l > 0.0 {
                        Ok(mu * (l - l.powi(exponent)))
                    } else {
                        Err(MaterialError::Domain {
                            context: "neo-Hookean stretch",
                            value: l,
                            reason: "stretch must be positive",
                        })
                    }
                })
                .collect()
        }

        fn parameter_bounds(&self, test: &Protocol) -> Result<Bounds> {
            let lower = ParameterSet::from_pairs([("mu", 0.0)])?;
            let upper = match test {
                Protocol::Uniaxial { .. } => Some(ParameterSet::from_pairs([("mu", 10.0)])?),
                Protocol::EquiBiaxial { .. } => Some(ParameterSet::from_pairs([("mu", 5.0)])?),
                Protocol::SimpleShear { .. } => None,
            };
            Ok(Bounds::new(Some(lower), upper))
        }
    }

    impl StrainEnergyDensity for NeoHookean {
        fn strain_energy_density(&self, f: &Tensor, parameters: &ParameterSet) -> Result<f64> {
            let mu = parameters.value("mu")?;
            let c = self.right_cauchy_green(f)?;
            Ok(0.5 * mu * (i1(&c)? - 3.0))
        }
    }

    /// Stress needs a pressure field, which this mock does not model.
    impl StressTensor for NeoHookean {}

    impl DeformationTensor for NeoHookean {}
}
