//! Property sweeps over the public noise API: output range, periodicity,
//! continuity, determinism, and bulk-sampler agreement.

use perlin_lattice::{GradientLattice2d, GradientLattice3d, Interpolation};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SAMPLE_COUNT: usize = 10_000;

#[test]
fn noise_2d_stays_in_unit_range() {
    for (size_x, size_y) in [(8, 8), (5, 12), (2, 2)] {
        for interpolation in [Interpolation::Linear, Interpolation::Cosine] {
            let mut rng = ChaCha8Rng::seed_from_u64(1);
            let lattice = GradientLattice2d::new(size_x, size_y, &mut rng)
                .unwrap()
                .with_interpolation(interpolation);

            for _ in 0..SAMPLE_COUNT {
                let x = rng.random_range(-100.0..100.0);
                let y = rng.random_range(-100.0..100.0);
                let v = lattice.sample(x, y);
                assert!(
                    (0.0..=1.0).contains(&v),
                    "{interpolation:?} {size_x}x{size_y} noise out of range at ({x}, {y}): {v}"
                );
            }
        }
    }
}

#[test]
fn noise_3d_stays_in_unit_range() {
    for (size_x, size_y, size_z) in [(8, 8, 8), (3, 5, 7)] {
        for interpolation in [Interpolation::Linear, Interpolation::Cosine] {
            let mut rng = ChaCha8Rng::seed_from_u64(2);
            let lattice = GradientLattice3d::new(size_x, size_y, size_z, &mut rng)
                .unwrap()
                .with_interpolation(interpolation);

            for _ in 0..SAMPLE_COUNT {
                let x = rng.random_range(-100.0..100.0);
                let y = rng.random_range(-100.0..100.0);
                let z = rng.random_range(-100.0..100.0);
                let v = lattice.sample(x, y, z);
                assert!(
                    (0.0..=1.0).contains(&v),
                    "{interpolation:?} {size_x}x{size_y}x{size_z} noise out of range at ({x}, {y}, {z}): {v}"
                );
            }
        }
    }
}

#[test]
fn noise_2d_is_periodic_in_the_lattice_size() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let lattice = GradientLattice2d::new(5, 7, &mut rng).unwrap();
    let (sx, sy) = lattice.size();

    for i in 0..200 {
        let x = i as f64 * 0.173;
        let y = i as f64 * 0.311;
        let base = lattice.sample(x, y);
        for (k, k2) in [(1, 0), (0, 1), (3, 2), (-2, 4)] {
            let shifted = lattice.sample(x + (k * sx as i64) as f64, y + (k2 * sy as i64) as f64);
            assert!(
                (base - shifted).abs() < 1e-9,
                "not periodic at ({x}, {y}) shifted by ({k}, {k2}): {base} vs {shifted}"
            );
        }
    }
}

#[test]
fn noise_3d_is_periodic_in_the_lattice_size() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let lattice = GradientLattice3d::new(4, 5, 6, &mut rng).unwrap();
    let (sx, sy, sz) = lattice.size();

    for i in 0..200 {
        let x = i as f64 * 0.173;
        let y = i as f64 * 0.311;
        let z = i as f64 * 0.097;
        let base = lattice.sample(x, y, z);
        let shifted = lattice.sample(x + sx as f64, y + 2.0 * sy as f64, z - sz as f64);
        assert!(
            (base - shifted).abs() < 1e-9,
            "not periodic at ({x}, {y}, {z}): {base} vs {shifted}"
        );
    }
}

#[test]
fn noise_2d_is_continuous_across_grid_lines() {
    // Small input steps move the output by at most a constant multiple,
    // including across integer grid lines.
    const EPS: f64 = 1e-4;
    const LIPSCHITZ: f64 = 10.0;

    for interpolation in [Interpolation::Linear, Interpolation::Cosine] {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let lattice = GradientLattice2d::new(6, 6, &mut rng)
            .unwrap()
            .with_interpolation(interpolation);

        for i in 0..400 {
            // Walk a line that repeatedly crosses x = 1, 2, ... at y = 2.4.
            let x = i as f64 * 0.025;
            let a = lattice.sample(x, 2.4);
            let b = lattice.sample(x + EPS, 2.4);
            assert!(
                (a - b).abs() <= LIPSCHITZ * EPS,
                "{interpolation:?} jump at x = {x}: |{a} - {b}|"
            );
        }
    }
}

#[test]
fn repeated_queries_are_bit_identical() {
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let lattice2 = GradientLattice2d::new(8, 8, &mut rng).unwrap();
    let lattice3 = GradientLattice3d::new(8, 8, 8, &mut rng).unwrap();

    for _ in 0..1000 {
        let x = rng.random_range(0.0..8.0);
        let y = rng.random_range(0.0..8.0);
        let z = rng.random_range(0.0..8.0);
        assert_eq!(lattice2.sample(x, y).to_bits(), lattice2.sample(x, y).to_bits());
        assert_eq!(
            lattice3.sample(x, y, z).to_bits(),
            lattice3.sample(x, y, z).to_bits()
        );
    }
}

#[test]
fn sample_grid_agrees_with_pointwise_queries() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let lattice = GradientLattice2d::new(8, 8, &mut rng)
        .unwrap()
        .with_interpolation(Interpolation::Cosine);

    let step = 0.21;
    let grid = lattice.sample_grid(17, 11, step);
    assert_eq!(grid.dim(), (11, 17));

    for ((row, col), &v) in grid.indexed_iter() {
        assert_eq!(v, lattice.sample(col as f64 * step, row as f64 * step));
    }
}

#[test]
fn sample_plane_agrees_with_pointwise_queries() {
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let lattice = GradientLattice3d::new(8, 8, 8, &mut rng).unwrap();

    let step = 0.13;
    let z = 3.7;
    let plane = lattice.sample_plane(9, 6, step, z);
    assert_eq!(plane.dim(), (6, 9));

    for ((row, col), &v) in plane.indexed_iter() {
        assert_eq!(v, lattice.sample(col as f64 * step, row as f64 * step, z));
    }
}
