//! Seeded simple-regression data generator.

use crate::core::ObservationTable;
use crate::design::SchemaError;
use faer::{Col, Mat};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;
use thiserror::Error;

/// Errors from invalid generating parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntheticError {
    #[error("number of observations must be positive")]
    NoObservations,

    #[error("noise standard deviation must be finite and non-negative, got {0}")]
    InvalidNoise(f64),

    #[error("invalid x range [{0}, {1}): bounds must be finite with lower < upper")]
    InvalidRange(f64, f64),

    #[error("proportional variance needs x >= 0, but the range starts at {0}")]
    NegativeVarianceScale(f64),

    #[error("parameter {name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error(transparent)]
    Table(#[from] SchemaError),
}

/// Distribution of the error term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoiseModel {
    /// ε ~ N(0, sd²).
    Constant { sd: f64 },
    /// ε ~ N(0, sd²·x): variance grows linearly with x.
    ProportionalVariance { sd: f64 },
    /// Mean gains `curvature·x²`; ε ~ N(0, sd²).
    NonlinearMean { sd: f64, curvature: f64 },
}

impl NoiseModel {
    fn sd(&self) -> f64 {
        match *self {
            NoiseModel::Constant { sd }
            | NoiseModel::ProportionalVariance { sd }
            | NoiseModel::NonlinearMean { sd, .. } => sd,
        }
    }

    /// Response for predictor `x`, linear mean `mean` and a standard normal draw `z`.
    fn response(&self, x: f64, mean: f64, z: f64) -> f64 {
        match *self {
            NoiseModel::Constant { sd } => mean + sd * z,
            NoiseModel::ProportionalVariance { sd } => mean + sd * x.abs().sqrt() * z,
            NoiseModel::NonlinearMean { sd, curvature } => mean + curvature * x * x + sd * z,
        }
    }
}

impl Default for NoiseModel {
    fn default() -> Self {
        NoiseModel::Constant { sd: 1.0 }
    }
}

/// Parameters of y = intercept + slope·x + ε with x ~ Uniform(x_range).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratingParams {
    pub n: usize,
    pub intercept: f64,
    pub slope: f64,
    pub noise: NoiseModel,
    /// Half-open interval x is drawn from.
    pub x_range: (f64, f64),
    pub seed: u64,
}

impl Default for GeneratingParams {
    fn default() -> Self {
        Self {
            n: 100,
            intercept: 0.0,
            slope: 1.0,
            noise: NoiseModel::default(),
            x_range: (0.0, 10.0),
            seed: 0,
        }
    }
}

impl GeneratingParams {
    /// Check the parameters without drawing anything.
    pub fn validate(&self) -> Result<(), SyntheticError> {
        if self.n == 0 {
            return Err(SyntheticError::NoObservations);
        }
        for (name, value) in [("intercept", self.intercept), ("slope", self.slope)] {
            if !value.is_finite() {
                return Err(SyntheticError::NonFinite { name, value });
            }
        }
        if let NoiseModel::NonlinearMean { curvature, .. } = self.noise {
            if !curvature.is_finite() {
                return Err(SyntheticError::NonFinite {
                    name: "curvature",
                    value: curvature,
                });
            }
        }

        let sd = self.noise.sd();
        if !(sd.is_finite() && sd >= 0.0) {
            return Err(SyntheticError::InvalidNoise(sd));
        }

        let (lo, hi) = self.x_range;
        if !(lo.is_finite() && hi.is_finite() && lo < hi && (hi - lo).is_finite()) {
            return Err(SyntheticError::InvalidRange(lo, hi));
        }
        if matches!(self.noise, NoiseModel::ProportionalVariance { .. }) && lo < 0.0 {
            return Err(SyntheticError::NegativeVarianceScale(lo));
        }
        Ok(())
    }
}

/// A generated sample together with the parameters that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticDataset {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub params: GeneratingParams,
}

impl SyntheticDataset {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Table with numeric columns `x` and `y`.
    pub fn to_table(&self) -> Result<ObservationTable, SyntheticError> {
        Ok(ObservationTable::builder()
            .numeric_complete("x", &self.x)
            .numeric_complete("y", &self.y)
            .build()?)
    }
}

/// Draws [`SyntheticDataset`]s.
///
/// With [`generate`](Self::generate) the stream is
/// `ChaCha8Rng::seed_from_u64(params.seed)`; for each row one uniform x is
/// drawn, then one standard normal. The same parameters always give the
/// same dataset, bit for bit.
#[derive(Debug, Clone)]
pub struct SyntheticGenerator {
    params: GeneratingParams,
}

impl SyntheticGenerator {
    pub fn new(params: GeneratingParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &GeneratingParams {
        &self.params
    }

    /// Generate from the parameters' own seed.
    pub fn generate(&self) -> Result<SyntheticDataset, SyntheticError> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.params.seed);
        self.generate_with_rng(&mut rng)
    }

    /// Generate from a caller-supplied random source; `params.seed` is
    /// ignored.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<SyntheticDataset, SyntheticError> {
        let p = &self.params;
        p.validate()?;

        let (lo, hi) = p.x_range;
        let mut x = Vec::with_capacity(p.n);
        let mut y = Vec::with_capacity(p.n);
        for _ in 0..p.n {
            let xi: f64 = rng.random_range(lo..hi);
            let z: f64 = rng.sample(StandardNormal);
            x.push(xi);
            y.push(p.noise.response(xi, p.intercept + p.slope * xi, z));
        }

        Ok(SyntheticDataset {
            x,
            y,
            params: *p,
        })
    }
}

/// `n` draws of a N(0, 1) response and an `n × k` matrix of N(0, 1)
/// covariates independent of it.
///
/// The response is drawn first, then the matrix column by column, from
/// `ChaCha8Rng::seed_from_u64(seed)`. Nested models over the first j
/// columns are therefore nested in the data as well.
pub fn irrelevant_covariates(
    n: usize,
    k: usize,
    seed: u64,
) -> Result<(Mat<f64>, Col<f64>), SyntheticError> {
    if n == 0 {
        return Err(SyntheticError::NoObservations);
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let y_draws: Vec<f64> = (0..n).map(|_| rng.sample(StandardNormal)).collect();
    let x_draws: Vec<f64> = (0..n * k).map(|_| rng.sample(StandardNormal)).collect();

    let y = Col::from_fn(n, |i| y_draws[i]);
    let x = Mat::from_fn(n, k, |i, j| x_draws[j * n + i]);
    Ok((x, y))
}
