//! Per-state emission ("output") distributions for hidden Markov models.
//!
//! An HMM over continuous time-series data needs, for every hidden state, a
//! probability distribution over the observed values. This crate provides
//! the [`OutputModel`] contract the surrounding estimators program against
//! and its 1D Gaussian implementation, [`GaussianOutputModel`]: weighted
//! maximum likelihood fitting for EM iterations, posterior parameter draws
//! for Gibbs sweeps, outlier handling for far-tail observations, and
//! synthetic trajectory generation. All stochastic operations take an
//! explicit [`rand::Rng`] handle, so seeded runs are reproducible.
pub mod errors;
pub mod gaussian;
pub mod matrix;
pub mod outliers;
pub mod output_model;
pub use errors::OutputModelError;
pub use gaussian::GaussianOutputModel;
pub use matrix::StateMatrix;
pub use output_model::OutputModel;
