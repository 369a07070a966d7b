//! Seeded synthetic data for tests and simulations.
//!
//! All draws come from `rand_chacha::ChaCha8Rng`, so a seed pins the data
//! across platforms and releases of this crate.

mod generator;

pub use generator::{
    irrelevant_covariates, GeneratingParams, NoiseModel, SyntheticDataset, SyntheticError,
    SyntheticGenerator,
};
