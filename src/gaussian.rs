//! One-dimensional Gaussian emission distributions, one per hidden state.
use crate::errors::OutputModelError;
use crate::matrix::StateMatrix;
use crate::outliers::handle_outliers;
use crate::output_model::OutputModel;
use log::warn;
use rand::Rng;
use rand_distr::{ChiSquared, Distribution, StandardNormal};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// HMM output probability model using 1D Gaussians. State i emits
/// observations from N(means[i], sigmas[i]^2). Both parameter arrays always
/// have length `n_states`; `fit` and `sample` are the only operations that
/// move them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaussianOutputModel {
    n_states: usize,
    means: Vec<f64>,
    sigmas: Vec<f64>,
    ignore_outliers: bool,
}

fn check_shape(n_states: usize, params: &[f64]) -> Result<(), OutputModelError> {
    if params.len() != n_states {
        return Err(OutputModelError::ShapeMismatch {
            expected: n_states,
            actual: params.len(),
        });
    }
    Ok(())
}

fn density(x: f64, mean: f64, sigma: f64) -> f64 {
    let z = (x - mean) / sigma;
    (-0.5 * z * z).exp() / (sigma * (2f64 * std::f64::consts::PI).sqrt())
}

impl GaussianOutputModel {
    /// A model with all means and sigmas set to zero. Outlier replacement is
    /// enabled by default.
    pub fn new(n_states: usize) -> Self {
        assert!(0 < n_states);
        Self {
            n_states,
            means: vec![0f64; n_states],
            sigmas: vec![0f64; n_states],
            ignore_outliers: true,
        }
    }
    /// A model seeded with the given per-state parameters. Both arrays must
    /// have length `n_states`.
    pub fn with_parameters(
        n_states: usize,
        means: &[f64],
        sigmas: &[f64],
    ) -> Result<Self, OutputModelError> {
        check_shape(n_states, means)?;
        check_shape(n_states, sigmas)?;
        Ok(Self {
            n_states,
            means: means.to_vec(),
            sigmas: sigmas.to_vec(),
            ignore_outliers: true,
        })
    }
    /// Mean of each state's output density.
    pub fn means(&self) -> &[f64] {
        &self.means
    }
    /// Standard deviation of each state's output density.
    pub fn sigmas(&self) -> &[f64] {
        &self.sigmas
    }
    /// Replace the means. Rejected before any mutation if the length does
    /// not match `n_states`.
    pub fn set_means(&mut self, means: &[f64]) -> Result<(), OutputModelError> {
        check_shape(self.n_states, means)?;
        self.means.copy_from_slice(means);
        Ok(())
    }
    /// Replace the sigmas. Rejected before any mutation if the length does
    /// not match `n_states`.
    pub fn set_sigmas(&mut self, sigmas: &[f64]) -> Result<(), OutputModelError> {
        check_shape(self.n_states, sigmas)?;
        self.sigmas.copy_from_slice(sigmas);
        Ok(())
    }
}

impl OutputModel for GaussianOutputModel {
    fn n_states(&self) -> usize {
        self.n_states
    }
    fn model_type(&self) -> &'static str {
        "gaussian"
    }
    fn dimension(&self) -> usize {
        1
    }
    fn ignore_outliers(&self) -> bool {
        self.ignore_outliers
    }
    fn set_ignore_outliers(&mut self, ignore_outliers: bool) {
        self.ignore_outliers = ignore_outliers;
    }
    fn p_obs_with(&self, observations: &[f64], out: &mut StateMatrix) {
        out.reset(observations.len(), self.n_states);
        for (t, &x) in observations.iter().enumerate() {
            let row = out.row_mut(t);
            let params = self.means.iter().zip(self.sigmas.iter());
            for (p, (&mean, &sigma)) in row.iter_mut().zip(params) {
                *p = density(x, mean, sigma);
            }
        }
        handle_outliers(out, self.ignore_outliers);
    }
    /// Weighted maximum likelihood estimate of all means and sigmas. Means
    /// are brought to their final weighted average first, and the variances
    /// are accumulated about those updated means within the same call. The
    /// new parameters are committed only after every state passed the weight
    /// and sigma guards.
    fn fit<T: Borrow<[f64]>>(
        &mut self,
        observations: &[T],
        weights: &[StateMatrix],
    ) -> Result<(), OutputModelError> {
        assert_eq!(observations.len(), weights.len());
        let n_states = self.n_states;
        let mut w_sum = vec![0f64; n_states];
        let mut means = vec![0f64; n_states];
        for (obs, ws) in observations.iter().zip(weights.iter()) {
            let obs = obs.borrow();
            assert_eq!(ws.rows(), obs.len());
            assert_eq!(ws.columns(), n_states);
            for (t, &x) in obs.iter().enumerate() {
                for (i, &w) in ws.row(t).iter().enumerate() {
                    means[i] += w * x;
                    w_sum[i] += w;
                }
            }
        }
        for (state, (mean, &w)) in means.iter_mut().zip(w_sum.iter()).enumerate() {
            if w <= 0f64 {
                return Err(OutputModelError::UnweightedState { state });
            }
            *mean /= w;
        }
        let mut sigmas = vec![0f64; n_states];
        for (obs, ws) in observations.iter().zip(weights.iter()) {
            let obs = obs.borrow();
            for (t, &x) in obs.iter().enumerate() {
                for (i, &w) in ws.row(t).iter().enumerate() {
                    let diff = x - means[i];
                    sigmas[i] += w * diff * diff;
                }
            }
        }
        for (state, (sigma, &w)) in sigmas.iter_mut().zip(w_sum.iter()).enumerate() {
            *sigma = (*sigma / w).sqrt();
            if !sigma.is_finite() || *sigma < f64::EPSILON {
                return Err(OutputModelError::SigmaTooSmall {
                    state,
                    sigma: *sigma,
                });
            }
        }
        self.means = means;
        self.sigmas = sigmas;
        Ok(())
    }
    /// One posterior draw per state, mean first and sigma second. The mean
    /// proposal is scaled by the pre-call sigma; the sigma draw uses the
    /// improper Jeffreys prior on sigma^2, P(mu, sigma^2) ~ 1/sigma, and the
    /// second moment about the freshly drawn mean.
    fn sample<T: Borrow<[f64]>, R: Rng>(&mut self, observations: &[T], rng: &mut R) {
        assert_eq!(observations.len(), self.n_states);
        for (state, obs) in observations.iter().enumerate() {
            let obs = obs.borrow();
            let nobs = obs.len();
            if nobs == 0 {
                warn!("state {} has no observations, parameters unchanged", state);
                continue;
            }
            let empirical_mean = obs.iter().sum::<f64>() / nobs as f64;
            let z: f64 = rng.sample(StandardNormal);
            self.means[state] = z * self.sigmas[state] / (nobs as f64).sqrt() + empirical_mean;
            if 1 < nobs {
                let chisq = ChiSquared::new((nobs - 1) as f64).unwrap().sample(rng);
                let mean = self.means[state];
                let moment =
                    obs.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / nobs as f64;
                self.sigmas[state] = moment.sqrt() / (chisq / nobs as f64).sqrt();
            }
        }
    }
    fn sub_output_model(&self, states: &[usize]) -> Self {
        let means: Vec<_> = states.iter().map(|&i| self.means[i]).collect();
        let sigmas: Vec<_> = states.iter().map(|&i| self.sigmas[i]).collect();
        Self {
            n_states: states.len(),
            means,
            sigmas,
            ignore_outliers: self.ignore_outliers,
        }
    }
    fn generate_observation_from_state<R: Rng>(&self, state: usize, rng: &mut R) -> f64 {
        let z: f64 = rng.sample(StandardNormal);
        self.sigmas[state] * z + self.means[state]
    }
}

impl std::fmt::Display for GaussianOutputModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (mean, sigma)) in self.means.iter().zip(self.sigmas.iter()).enumerate() {
            if 0 < i {
                writeln!(f)?;
            }
            write!(f, "{}\tN({:.3}, {:.3})", i, mean, sigma)?;
        }
        Ok(())
    }
}
