//! Design matrix construction and encoding schemas.
//!
//! The builder turns an [`ObservationTable`](crate::core::ObservationTable)
//! and a [`ModelSpec`](crate::core::ModelSpec) into a numeric design matrix:
//!
//! - an optional intercept column named `(Intercept)`
//! - one column per numeric predictor, optionally mean-centered
//! - `k - 1` indicator columns per categorical predictor with `k` levels,
//!   named `name[level]`; the reference level is the first level in
//!   ascending lexicographic order
//!
//! The resulting [`EncodingSchema`] records centering offsets and levels so
//! that new rows can be encoded identically at prediction time.

mod builder;
mod schema;

pub use builder::{DesignMatrix, DesignMatrixBuilder};
pub use schema::{
    EncodedPredictor, EncodingSchema, PredictorEncoding, SchemaError, SchemaMismatch, INTERCEPT,
};
