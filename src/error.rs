use derive_more::{Display, From};

pub type Result<T> = core::result::Result<T, LatticeError>;

#[derive(Debug, Display, From)]
#[display("{self:?}")]
pub enum LatticeError {
    /// A lattice axis size was zero.
    InvalidDimension,
    /// A zero-magnitude vector cannot be normalized.
    ZeroMagnitude,
}

impl std::error::Error for LatticeError {}
