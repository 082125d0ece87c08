//! Group distribution
//!
//! Combine the predictions of many forecasters on one question into a single distribution.
use crate::config::EngineConfig;
use crate::distribution::{BinaryDistribution, DiscretizedContinuousDistribution, ProbabilityDistribution};
use crate::errors::PrognosisError;
use crate::space::Space;
use crate::utils::{add_elementwise, clamp01, mean, normalize};
use log::warn;
use rayon::prelude::*;

/// Aggregate predictions on a question with answer space `space`.
///
/// Binary predictions are averaged. Continuous predictions are discretized
/// over the bins of the space, summed and renormalized. Predictions of the
/// wrong kind are ignored, and `None` is returned when none remain.
///
/// * `space` - Answer space of the question.
/// * `dists` - Individual predictions.
/// * `cfg` - Whether discretization runs in parallel.
pub fn group_distribution(
    space: &Space,
    dists: &[ProbabilityDistribution],
    cfg: &EngineConfig,
) -> Result<Option<ProbabilityDistribution>, PrognosisError> {
    match space {
        Space::Binary => {
            let yes_probs: Vec<f64> = dists.iter().filter_map(|d| d.as_binary()).map(|d| d.yes_prob()).collect();
            match mean(&yes_probs) {
                Some(p) => Ok(Some(BinaryDistribution::new(clamp01(p))?.into())),
                None => Ok(None),
            }
        }
        Space::Numeric(numeric) => {
            let binner = numeric.binner()?;
            let discretize = |d: &ProbabilityDistribution| {
                d.as_continuous()
                    .map(|c| c.discretize_with(&binner).map(DiscretizedContinuousDistribution::into_bin_probs))
            };
            let all_probs: Vec<Vec<f64>> = if cfg.parallel {
                cfg.install(|| dists.par_iter().filter_map(discretize).collect::<Result<Vec<_>, PrognosisError>>())??
            } else {
                dists.iter().filter_map(discretize).collect::<Result<Vec<_>, PrognosisError>>()?
            };
            if all_probs.is_empty() {
                return Ok(None);
            }
            let mut bin_probs = vec![0.0; binner.bins()];
            for probs in &all_probs {
                add_elementwise(&mut bin_probs, probs);
            }
            if bin_probs.iter().sum::<f64>() <= 0.0 {
                warn!(
                    "Group of {} predictions has no mass inside [{}, {}].",
                    all_probs.len(),
                    numeric.min(),
                    numeric.max()
                );
            }
            normalize(&mut bin_probs);
            let grouped = DiscretizedContinuousDistribution::new(numeric.clone(), bin_probs, None, None)?;
            Ok(Some(grouped.into()))
        }
    }
}
