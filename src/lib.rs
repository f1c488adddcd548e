//! Smooth, tileable gradient (Perlin) noise fields over toroidal 2D and 3D
//! lattices of random unit gradient vectors.

pub mod error;
pub mod interp;
pub mod lattice2d;
pub mod lattice3d;
pub mod types;
pub mod vector;

pub use error::{LatticeError, Result};
pub use interp::Interpolation;
pub use lattice2d::GradientLattice2d;
pub use lattice3d::GradientLattice3d;
