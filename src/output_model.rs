//! The interface every per-state emission distribution family provides.
use crate::errors::OutputModelError;
use crate::matrix::StateMatrix;
use rand::Rng;
use std::borrow::Borrow;

/// Per-state output distributions of a hidden Markov model.
///
/// The HMM estimator talks to emission distributions only through this
/// trait: likelihood evaluation during inference, weighted maximum
/// likelihood updates during EM iterations, posterior parameter draws during
/// Gibbs sweeps, and synthetic generation for validation runs. A model owns
/// its parameter arrays and mutates them through `fit` and `sample` only;
/// every other operation is read-only. Callers must not run two mutating
/// calls concurrently against the same instance.
pub trait OutputModel {
    /// Number of hidden states.
    fn n_states(&self) -> usize;
    /// Identifier of the distribution family, e.g. "gaussian".
    fn model_type(&self) -> &'static str;
    /// Dimensionality of a single observation.
    fn dimension(&self) -> usize;
    /// Whether degenerate likelihood rows are replaced in `p_obs`.
    fn ignore_outliers(&self) -> bool;
    fn set_ignore_outliers(&mut self, ignore_outliers: bool);
    /// The probability of every observation under every hidden state, as a
    /// T x n_states matrix already routed through the outlier policy. Entry
    /// (t, i) is the likelihood of observation t under state i.
    fn p_obs(&self, observations: &[f64]) -> StateMatrix {
        let mut out = StateMatrix::new(observations.len(), self.n_states());
        self.p_obs_with(observations, &mut out);
        out
    }
    /// Same as `p_obs`, writing into `out` to avoid reallocation on repeated
    /// calls inside iterative estimators. `out` is resized as needed.
    fn p_obs_with(&self, observations: &[f64], out: &mut StateMatrix);
    /// Weighted maximum likelihood update from K observation trajectories
    /// and K matching T_k x n_states weight matrices. `weights[k].get(t, i)`
    /// is the soft assignment of `observations[k][t]` to state i; rows need
    /// not sum to one. On error the previous parameters are kept.
    fn fit<T: Borrow<[f64]>>(
        &mut self,
        observations: &[T],
        weights: &[StateMatrix],
    ) -> Result<(), OutputModelError>;
    /// Draw new parameters from each state's posterior. `observations[i]`
    /// holds the observations hard-assigned to state i; a state without any
    /// observation keeps its parameters.
    fn sample<T: Borrow<[f64]>, R: Rng>(&mut self, observations: &[T], rng: &mut R);
    /// A new, independently owned model restricted to the given subset of
    /// hidden states, in the given order.
    fn sub_output_model(&self, states: &[usize]) -> Self
    where
        Self: Sized;
    /// One observation drawn from the given state's distribution.
    fn generate_observation_from_state<R: Rng>(&self, state: usize, rng: &mut R) -> f64;
    /// `nobs` independent observations drawn from the given state's
    /// distribution.
    fn generate_observations_from_state<R: Rng>(
        &self,
        state: usize,
        nobs: usize,
        rng: &mut R,
    ) -> Vec<f64> {
        (0..nobs)
            .map(|_| self.generate_observation_from_state(state, rng))
            .collect()
    }
    /// One observation per entry of a hidden state sequence.
    fn generate_observation_trajectory<R: Rng>(&self, states: &[usize], rng: &mut R) -> Vec<f64> {
        states
            .iter()
            .map(|&state| self.generate_observation_from_state(state, rng))
            .collect()
    }
}
