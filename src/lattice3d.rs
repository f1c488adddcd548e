use ndarray::{Array2, Array3};
use rand::Rng;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::debug;

use crate::{
    error::{LatticeError, Result},
    interp::{Interpolation, fade},
    types::{Value, Vec3},
    vector::random_unit_vector,
};

/// A toroidal 3D grid of random unit gradient vectors that answers smooth
/// noise queries at arbitrary real `(x, y, z)` coordinates.
///
/// Gradients are stored `[z][y][x]`: the table is laid out as `size_z`
/// z-major blocks of `size_x × size_y` each. All three axes wrap, so the
/// field is periodic with period equal to the lattice size per axis.
///
/// A common use is an animated 2D field: sample a fixed `(x, y)` plane and
/// advance `z` over time (see [`sample_plane`](GradientLattice3d::sample_plane)).
pub struct GradientLattice3d {
    size_x: usize,
    size_y: usize,
    size_z: usize,
    /// Unit gradients, indexed `[(z, y, x)]`.
    gradients: Array3<Vec3>,
    interpolation: Interpolation,
}

impl GradientLattice3d {
    /// Creates a lattice with `size_x × size_y × size_z` random unit
    /// gradients drawn from `rng`, blending with [`Interpolation::Linear`].
    ///
    /// Returns [`LatticeError::InvalidDimension`] if any axis is zero.
    pub fn new(size_x: usize, size_y: usize, size_z: usize, rng: &mut impl Rng) -> Result<Self> {
        if size_x == 0 || size_y == 0 || size_z == 0 {
            return Err(LatticeError::InvalidDimension);
        }

        let gradients =
            Array3::from_shape_simple_fn((size_z, size_y, size_x), || random_unit_vector(rng));
        debug!(size_x, size_y, size_z, "seeded 3d gradient lattice");

        Ok(Self {
            size_x,
            size_y,
            size_z,
            gradients,
            interpolation: Interpolation::default(),
        })
    }

    /// Sets the blending strategy used between cell corners.
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Replaces every gradient with a fresh random unit vector.
    ///
    /// Requires exclusive access; the lattice dimensions and interpolation
    /// strategy are unchanged.
    pub fn reseed(&mut self, rng: &mut impl Rng) {
        self.gradients = Array3::from_shape_simple_fn(
            (self.size_z, self.size_y, self.size_x),
            || random_unit_vector(rng),
        );
        debug!(
            size_x = self.size_x,
            size_y = self.size_y,
            size_z = self.size_z,
            "reseeded 3d gradient lattice"
        );
    }

    /// Returns the lattice dimensions `(size_x, size_y, size_z)`.
    pub fn size(&self) -> (usize, usize, usize) {
        (self.size_x, self.size_y, self.size_z)
    }

    /// Returns the blending strategy.
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Returns the gradient at grid point `(x, y, z)`, floor-modulo wrapping
    /// all three indices onto the torus.
    fn gradient(&self, x: i64, y: i64, z: i64) -> &Vec3 {
        let x = x.rem_euclid(self.size_x as i64) as usize;
        let y = y.rem_euclid(self.size_y as i64) as usize;
        let z = z.rem_euclid(self.size_z as i64) as usize;
        &self.gradients[(z, y, x)]
    }

    /// Samples the noise field at `(x, y, z)`. Returns a value in `[0, 1]`.
    ///
    /// The eight corners of the containing cell contribute one gradient dot
    /// product each. The front face (`z = gz`) and back face (`z = gz + 1`)
    /// are blended exactly like a 2D cell — x-pairs with `fade(fx)`, then
    /// along y with `fade(fy)` — and the two face results are interpolated
    /// along `fade(fz)`. Every grid vertex samples to exactly `0.5`.
    pub fn sample(&self, x: Value, y: Value, z: Value) -> Value {
        // Fold onto the torus; rem_euclid keeps negative inputs non-negative.
        let x = x.rem_euclid(self.size_x as Value);
        let y = y.rem_euclid(self.size_y as Value);
        let z = z.rem_euclid(self.size_z as Value);

        let gx = x.floor();
        let gy = y.floor();
        let gz = z.floor();
        let fx = x - gx;
        let fy = y - gy;
        let fz = z - gz;
        let (gx, gy, gz) = (gx as i64, gy as i64, gz as i64);

        // Corner dot products, front face (z = gz) then back face (z = gz + 1).
        let d000 = Vec3::new(fx, fy, fz).dot(self.gradient(gx, gy, gz));
        let d100 = Vec3::new(fx - 1.0, fy, fz).dot(self.gradient(gx + 1, gy, gz));
        let d010 = Vec3::new(fx, fy - 1.0, fz).dot(self.gradient(gx, gy + 1, gz));
        let d110 = Vec3::new(fx - 1.0, fy - 1.0, fz).dot(self.gradient(gx + 1, gy + 1, gz));

        let d001 = Vec3::new(fx, fy, fz - 1.0).dot(self.gradient(gx, gy, gz + 1));
        let d101 = Vec3::new(fx - 1.0, fy, fz - 1.0).dot(self.gradient(gx + 1, gy, gz + 1));
        let d011 = Vec3::new(fx, fy - 1.0, fz - 1.0).dot(self.gradient(gx, gy + 1, gz + 1));
        let d111 =
            Vec3::new(fx - 1.0, fy - 1.0, fz - 1.0).dot(self.gradient(gx + 1, gy + 1, gz + 1));

        let bx = fade(fx);
        let by = fade(fy);
        let bz = fade(fz);

        let front = {
            let top = self.interpolation.blend(d000, d100, bx);
            let bottom = self.interpolation.blend(d010, d110, bx);
            self.interpolation.blend(top, bottom, by)
        };
        let back = {
            let top = self.interpolation.blend(d001, d101, bx);
            let bottom = self.interpolation.blend(d011, d111, bx);
            self.interpolation.blend(top, bottom, by)
        };

        let value = self.interpolation.blend(front, back, bz);

        // Remap the roughly [-1, 1] blended dot product to [0, 1].
        (value + 1.0) / 2.0
    }

    /// Samples a `width × height` plane of noise values at
    /// `(col·step, row·step, z)`.
    ///
    /// Rows are evaluated in parallel. Advancing `z` between calls yields a
    /// smoothly animated 2D field — the classic flow-field driver. The result
    /// is indexed `[(row, col)]` and agrees pointwise with
    /// [`sample`](GradientLattice3d::sample).
    pub fn sample_plane(&self, width: usize, height: usize, step: Value, z: Value) -> Array2<Value> {
        let values: Vec<Value> = (0..height)
            .into_par_iter()
            .flat_map_iter(|row| {
                (0..width).map(move |col| self.sample(col as Value * step, row as Value * step, z))
            })
            .collect();

        Array2::from_shape_vec((height, width), values)
            .expect("row-major sample buffer matches (height, width)")
    }
}
