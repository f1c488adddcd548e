use ndarray::Array2;
use rand::Rng;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::debug;

use crate::{
    error::{LatticeError, Result},
    interp::{Interpolation, fade},
    types::{Value, Vec2},
    vector::random_unit_vector,
};

/// A toroidal grid of random unit gradient vectors that answers smooth noise
/// queries at arbitrary real `(x, y)` coordinates.
///
/// The grid has `size_x × size_y` gradients, stored `[y][x]`. Both coordinate
/// folding and gradient lookup wrap modulo the axis sizes, so the field is
/// periodic with period `size_x` along X and `size_y` along Y and tiles
/// seamlessly.
///
/// Queries are pure reads: a lattice can be shared across threads freely as
/// long as nobody calls [`reseed`](GradientLattice2d::reseed).
pub struct GradientLattice2d {
    size_x: usize,
    size_y: usize,
    /// Unit gradients, indexed `[(y, x)]`.
    gradients: Array2<Vec2>,
    interpolation: Interpolation,
}

impl GradientLattice2d {
    /// Creates a lattice with `size_x × size_y` random unit gradients drawn
    /// from `rng`, blending with [`Interpolation::Linear`].
    ///
    /// Returns [`LatticeError::InvalidDimension`] if either axis is zero.
    pub fn new(size_x: usize, size_y: usize, rng: &mut impl Rng) -> Result<Self> {
        if size_x == 0 || size_y == 0 {
            return Err(LatticeError::InvalidDimension);
        }

        let gradients =
            Array2::from_shape_simple_fn((size_y, size_x), || random_unit_vector(rng));
        debug!(size_x, size_y, "seeded 2d gradient lattice");

        Ok(Self {
            size_x,
            size_y,
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
        self.gradients =
            Array2::from_shape_simple_fn((self.size_y, self.size_x), || random_unit_vector(rng));
        debug!(size_x = self.size_x, size_y = self.size_y, "reseeded 2d gradient lattice");
    }

    /// Returns the lattice dimensions `(size_x, size_y)`.
    pub fn size(&self) -> (usize, usize) {
        (self.size_x, self.size_y)
    }

    /// Returns the blending strategy.
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Returns the gradient at grid point `(x, y)`, wrapping both indices
    /// onto the torus. The wrap is a floor-modulo, so negative grid
    /// coordinates resolve to the same gradients as their positive images.
    fn gradient(&self, x: i64, y: i64) -> &Vec2 {
        let x = x.rem_euclid(self.size_x as i64) as usize;
        let y = y.rem_euclid(self.size_y as i64) as usize;
        &self.gradients[(y, x)]
    }

    /// Samples the noise field at `(x, y)`. Returns a value in `[0, 1]`.
    ///
    /// ```text
    /// (gx, gy)        (gx+1, gy)
    ///    g00 ---------- g10
    ///     |   .(x, y)    |        per corner: dot(gradient, corner → point)
    ///     |              |        then blend the x-pairs with fade(fx),
    ///    g01 ---------- g11       then the two results with fade(fy)
    /// (gx, gy+1)      (gx+1, gy+1)
    /// ```
    ///
    /// The field is continuous everywhere (the fade weights zero out each
    /// corner's influence at the opposite cell edge) and exactly `0.5` at
    /// every grid vertex.
    pub fn sample(&self, x: Value, y: Value) -> Value {
        // Fold onto the torus; rem_euclid keeps negative inputs non-negative.
        let x = x.rem_euclid(self.size_x as Value);
        let y = y.rem_euclid(self.size_y as Value);

        let gx = x.floor();
        let gy = y.floor();
        let fx = x - gx;
        let fy = y - gy;
        let (gx, gy) = (gx as i64, gy as i64);

        // Corner gradients, then the dot of each with its corner-to-point offset.
        let g00 = self.gradient(gx, gy);
        let g01 = self.gradient(gx, gy + 1);
        let g10 = self.gradient(gx + 1, gy);
        let g11 = self.gradient(gx + 1, gy + 1);

        let d00 = Vec2::new(fx, fy).dot(g00);
        let d01 = Vec2::new(fx, fy - 1.0).dot(g01);
        let d10 = Vec2::new(fx - 1.0, fy).dot(g10);
        let d11 = Vec2::new(fx - 1.0, fy - 1.0).dot(g11);

        let bx = fade(fx);
        let by = fade(fy);

        let top = self.interpolation.blend(d00, d10, bx);
        let bottom = self.interpolation.blend(d01, d11, bx);
        let value = self.interpolation.blend(top, bottom, by);

        // Remap the roughly [-1, 1] blended dot product to [0, 1].
        (value + 1.0) / 2.0
    }

    /// Samples a `width × height` grid of noise values at `(col·step, row·step)`.
    ///
    /// Rows are evaluated in parallel. The result is indexed `[(row, col)]`
    /// and agrees pointwise with [`sample`](GradientLattice2d::sample).
    pub fn sample_grid(&self, width: usize, height: usize, step: Value) -> Array2<Value> {
        let values: Vec<Value> = (0..height)
            .into_par_iter()
            .flat_map_iter(|row| {
                (0..width).map(move |col| self.sample(col as Value * step, row as Value * step))
            })
            .collect();

        Array2::from_shape_vec((height, width), values)
            .expect("row-major sample buffer matches (height, width)")
    }
}
