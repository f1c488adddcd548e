use nalgebra::{Vector2, Vector3};

/// Scalar noise value.
pub type Value = f64;

/// A 2D gradient vector with [`Value`] components.
pub type Vec2 = Vector2<Value>;

/// A 3D gradient vector with [`Value`] components.
pub type Vec3 = Vector3<Value>;
