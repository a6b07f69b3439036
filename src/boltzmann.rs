//! Boltzmann-weighted ensemble averages.
//!
//! Expectation values over a conformer/cluster ensemble: each sample i gets
//! the unnormalized weight exp(-G_i * beta_i), weights are normalized to
//! probabilities with the partition sum Q, and the target quantity is
//! averaged under those probabilities. Probabilities are always computed
//! from the free energies, also when the averaged quantity is H or S.
//!
//! `beta` is supplied per sample (1/RT for each) rather than as one scalar
//! so that bootstrap resampling for error bars can pair each sample with its
//! own inverse temperature.

use crate::error::{Result, ToolboxError};
use crate::thermo::GAS_CONSTANT;

fn probabilities(g: &[f64], beta: &[f64]) -> Result<Vec<f64>> {
    if g.is_empty() {
        return Err(ToolboxError::Inconsistent {
            what: "no samples to average".to_string(),
        });
    }
    if g.len() != beta.len() {
        return Err(ToolboxError::Inconsistent {
            what: format!("{} samples but {} beta values", g.len(), beta.len()),
        });
    }
    let weights: Vec<f64> = g.iter().zip(beta).map(|(gi, bi)| (-gi * bi).exp()).collect();
    let q: f64 = weights.iter().sum();
    Ok(weights.into_iter().map(|w| w / q).collect())
}

/// Boltzmann-averaged free energy of the samples in `g`.
///
/// With a single sample the partition sum equals its weight and the
/// probability is one, so the sample is returned exactly regardless of beta.
///
/// # Errors
///
/// [`ToolboxError::Inconsistent`] for empty input or mismatched lengths.
pub fn boltzmann_g(g: &[f64], beta: &[f64]) -> Result<f64> {
    let p = probabilities(g, beta)?;
    Ok(g.iter().zip(&p).map(|(gi, pi)| gi * pi).sum())
}

/// Boltzmann-averaged enthalpy: `h` weighted by probabilities computed from
/// the free energies `g`.
///
/// # Errors
///
/// [`ToolboxError::Inconsistent`] for empty input or mismatched lengths
/// between any pair of arrays.
pub fn boltzmann_h(g: &[f64], h: &[f64], beta: &[f64]) -> Result<f64> {
    if g.len() != h.len() {
        return Err(ToolboxError::Inconsistent {
            what: format!("{} free energies but {} enthalpies", g.len(), h.len()),
        });
    }
    let p = probabilities(g, beta)?;
    Ok(h.iter().zip(&p).map(|(hi, pi)| hi * pi).sum())
}

/// Boltzmann-averaged entropy: the probability-weighted average of `s` plus
/// the Gibbs mixing term `-R * sum(p_i ln p_i)`.
///
/// The mixing term is the configurational entropy of distributing the system
/// over the ensemble members; it is part of the observable entropy, not an
/// optional correction.
///
/// # Errors
///
/// [`ToolboxError::Inconsistent`] for empty input or mismatched lengths
/// between any pair of arrays.
pub fn boltzmann_s(g: &[f64], s: &[f64], beta: &[f64]) -> Result<f64> {
    if g.len() != s.len() {
        return Err(ToolboxError::Inconsistent {
            what: format!("{} free energies but {} entropies", g.len(), s.len()),
        });
    }
    let p = probabilities(g, beta)?;
    let weighted: f64 = s.iter().zip(&p).map(|(si, pi)| si * pi).sum();
    let gibbs: f64 = -GAS_CONSTANT * p.iter().map(|pi| pi * pi.ln()).sum::<f64>();
    Ok(weighted + gibbs)
}
