use nalgebra::SVector;
use rand::Rng;

use crate::{
    error::{LatticeError, Result},
    types::Value,
};

/// Returns `v` rescaled to unit length.
///
/// Returns [`LatticeError::ZeroMagnitude`] if `v` has a norm of exactly zero —
/// the zero vector is rejected rather than producing NaN components.
pub fn normalized<const D: usize>(v: SVector<Value, D>) -> Result<SVector<Value, D>> {
    v.try_normalize(0.0).ok_or(LatticeError::ZeroMagnitude)
}

/// Samples a random unit vector.
///
/// Each component is drawn uniformly from `[-0.5, 0.5)` and the result is
/// rescaled to unit length. This cube-then-rescale method carries a slight
/// bias toward the axes compared to a uniform-angle sampler; the noise
/// fields are tuned around it, so it must not be swapped out.
pub fn random_unit_vector<const D: usize>(rng: &mut impl Rng) -> SVector<Value, D> {
    loop {
        let v = SVector::<Value, D>::from_fn(|_, _| rng.random::<Value>() - 0.5);
        // A zero draw is a measure-zero event; resampling preserves the distribution.
        if let Ok(unit) = normalized(v) {
            return unit;
        }
    }
}
