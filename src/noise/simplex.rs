//! Coherent noise from a 3-D simplex lattice.
//!
//! The evaluator follows the layout of Jordan Peck's FastNoise: a seeded
//! 512-entry permutation table selects one of twelve edge gradients for each
//! lattice corner, and the four corner contributions of the enclosing simplex
//! are summed with a radial falloff of 0.6.

use crate::{AudioSignal, Signal};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const F3: f64 = 1.0 / 3.0;
const G3: f64 = 1.0 / 6.0;

/// Squared radius of influence of each simplex corner.
const RADIUS_SQUARED: f64 = 0.6;
/// Brings the summed contributions into roughly [-1, 1].
const OUTPUT_SCALE: f64 = 32.0;

/// The walk position wraps at this magnitude to keep float precision.
const STEP_LIMIT: f64 = 65536.0;

const DEFAULT_SEED: u64 = 1337;
const DEFAULT_STEP: f64 = 0.01;

const GRAD_X: [f64; 12] = [1., -1., 1., -1., 1., -1., 1., -1., 0., 0., 0., 0.];
const GRAD_Y: [f64; 12] = [1., 1., -1., -1., 0., 0., 0., 0., 1., -1., 1., -1.];
const GRAD_Z: [f64; 12] = [0., 0., 0., 0., 1., 1., -1., -1., 1., 1., -1., -1.];

/// Reduces a floored lattice coordinate to `[0, 256)`.
#[inline]
fn lattice(coordinate: f64) -> i32 {
    coordinate.rem_euclid(256.0) as i32
}

/// Smoothly varying noise sampled along a one-dimensional walk.
///
/// As a [`Signal`] the generator advances its walk position by `step` per
/// sample and evaluates the noise there, so smaller steps give slower, smoother
/// movement. The noise field itself can also be queried directly with
/// [`get`](Self::get) and [`get3`](Self::get3).
///
/// For a fixed seed the output sequence is fully deterministic.
///
/// # Examples
///
/// ```
/// use wellenform::{Signal, SimplexNoise};
///
/// let mut a = SimplexNoise::<48000>::new(99);
/// let mut b = SimplexNoise::<48000>::new(99);
/// assert_eq!(a.next_sample(), b.next_sample());
///
/// // Drift slowly, e.g. as a modulation source
/// a.set_step(0.001);
/// ```
#[derive(Debug, Clone)]
pub struct SimplexNoise<const SAMPLE_RATE: u32> {
    seed: u64,
    perm: [u8; 512],
    perm12: [u8; 512],
    position: f64,
    step: f64,
}

impl<const SAMPLE_RATE: u32> SimplexNoise<SAMPLE_RATE> {
    /// Creates a generator with permutation tables built from `seed`.
    pub fn new(seed: u64) -> Self {
        let mut noise = Self {
            seed,
            perm: [0; 512],
            perm12: [0; 512],
            position: 0.0,
            step: DEFAULT_STEP,
        };
        noise.set_seed(seed);
        noise
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Rebuilds the permutation tables with a forward Fisher-Yates shuffle.
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
        let mut rng = StdRng::seed_from_u64(seed);

        for (i, entry) in self.perm.iter_mut().take(256).enumerate() {
            *entry = i as u8;
        }

        for j in 0..256 {
            let k = j + rng.gen_range(0..256 - j);
            self.perm.swap(j, k);
            self.perm[j + 256] = self.perm[j];
            self.perm12[j] = self.perm[j] % 12;
            self.perm12[j + 256] = self.perm12[j];
        }
    }

    /// Gets the walk increment per sample.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Sets the walk increment per sample.
    pub fn set_step(&mut self, step: f64) {
        self.step = step;
    }

    /// Gets the current walk position.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Evaluates the noise along the x axis.
    pub fn get(&self, x: f64) -> f64 {
        self.get3(0, x, 0.0, 0.0)
    }

    /// Evaluates the noise at a point in 3-D space.
    ///
    /// `offset` selects a decorrelated layer of the same permutation table.
    pub fn get3(&self, offset: u8, x: f64, y: f64, z: f64) -> f64 {
        let t = (x + y + z) * F3;
        let fi = (x + t).floor();
        let fj = (y + t).floor();
        let fk = (z + t).floor();

        let t = (fi + fj + fk) * G3;
        let x0 = x - (fi - t);
        let y0 = y - (fj - t);
        let z0 = z - (fk - t);

        // Only the low byte of a lattice coordinate reaches the hash
        let (i, j, k) = (lattice(fi), lattice(fj), lattice(fk));

        // Second and third corners of the simplex, by coordinate ordering
        let ((i1, j1, k1), (i2, j2, k2)) = if x0 >= y0 {
            if y0 >= z0 {
                ((1, 0, 0), (1, 1, 0))
            } else if x0 >= z0 {
                ((1, 0, 0), (1, 0, 1))
            } else {
                ((0, 0, 1), (1, 0, 1))
            }
        } else if y0 < z0 {
            ((0, 0, 1), (0, 1, 1))
        } else if x0 < z0 {
            ((0, 1, 0), (0, 1, 1))
        } else {
            ((0, 1, 0), (1, 1, 0))
        };

        let x1 = x0 - i1 as f64 + G3;
        let y1 = y0 - j1 as f64 + G3;
        let z1 = z0 - k1 as f64 + G3;
        let x2 = x0 - i2 as f64 + 2.0 * G3;
        let y2 = y0 - j2 as f64 + 2.0 * G3;
        let z2 = z0 - k2 as f64 + 2.0 * G3;
        let x3 = x0 - 1.0 + 3.0 * G3;
        let y3 = y0 - 1.0 + 3.0 * G3;
        let z3 = z0 - 1.0 + 3.0 * G3;

        let n0 = self.corner(offset, (i, j, k), x0, y0, z0);
        let n1 = self.corner(offset, (i + i1, j + j1, k + k1), x1, y1, z1);
        let n2 = self.corner(offset, (i + i2, j + j2, k + k2), x2, y2, z2);
        let n3 = self.corner(offset, (i + 1, j + 1, k + 1), x3, y3, z3);

        OUTPUT_SCALE * (n0 + n1 + n2 + n3)
    }

    /// Contribution of one simplex corner.
    #[inline]
    fn corner(&self, offset: u8, lattice: (i32, i32, i32), x: f64, y: f64, z: f64) -> f64 {
        let t = RADIUS_SQUARED - x * x - y * y - z * z;
        if t < 0.0 {
            return 0.0;
        }
        let t2 = t * t;
        t2 * t2 * self.gradient(offset, lattice, x, y, z)
    }

    #[inline]
    fn gradient(&self, offset: u8, (x, y, z): (i32, i32, i32), dx: f64, dy: f64, dz: f64) -> f64 {
        let z_index = (z & 0xff) as usize + offset as usize;
        let y_index = (y & 0xff) as usize + self.perm[z_index] as usize;
        let x_index = (x & 0xff) as usize + self.perm[y_index] as usize;
        let lut = self.perm12[x_index] as usize;
        dx * GRAD_X[lut] + dy * GRAD_Y[lut] + dz * GRAD_Z[lut]
    }
}

impl<const SAMPLE_RATE: u32> Default for SimplexNoise<SAMPLE_RATE> {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl<const SAMPLE_RATE: u32> Signal for SimplexNoise<SAMPLE_RATE> {
    fn next_sample(&mut self) -> f64 {
        self.position += self.step;
        if !self.position.is_finite() {
            self.position = 0.0;
        } else if self.position.abs() > STEP_LIMIT {
            self.position %= STEP_LIMIT;
        }
        self.get(self.position)
    }
}

impl<const SAMPLE_RATE: u32> AudioSignal<SAMPLE_RATE> for SimplexNoise<SAMPLE_RATE> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let noise = SimplexNoise::<48000>::default();
        assert_eq!(noise.seed(), DEFAULT_SEED);
        assert_eq!(noise.step(), DEFAULT_STEP);
    }

    #[test]
    fn test_permutation_is_complete() {
        let noise = SimplexNoise::<48000>::new(5);
        let mut seen = [false; 256];
        for &p in &noise.perm[..256] {
            seen[p as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
        assert_eq!(noise.perm[..256], noise.perm[256..]);
        for (p, p12) in noise.perm.iter().zip(noise.perm12.iter()) {
            assert_eq!(p % 12, *p12);
        }
    }

    #[test]
    fn test_deterministic_for_seed() {
        let mut a = SimplexNoise::<48000>::new(1234);
        let mut b = SimplexNoise::<48000>::new(1234);
        for _ in 0..10_000 {
            assert_eq!(a.next_sample(), b.next_sample());
        }
    }

    #[test]
    fn test_seeds_differ() {
        let a = SimplexNoise::<48000>::new(1);
        let b = SimplexNoise::<48000>::new(2);
        let differs = (0..100).any(|i| a.get(i as f64 * 0.37) != b.get(i as f64 * 0.37));
        assert!(differs);
    }

    #[test]
    fn test_set_seed_rebuilds_tables() {
        let mut a = SimplexNoise::<48000>::new(1);
        let b = SimplexNoise::<48000>::new(77);
        a.set_seed(77);
        assert_eq!(a.seed(), 77);
        assert_eq!(a.perm, b.perm);
    }

    #[test]
    fn test_zero_at_lattice_origin() {
        let noise = SimplexNoise::<48000>::default();
        assert_eq!(noise.get(0.0), 0.0);
    }

    #[test]
    fn test_range_and_continuity() {
        let mut noise = SimplexNoise::<48000>::new(3);
        let mut previous = noise.next_sample();
        for _ in 0..100_000 {
            let sample = noise.next_sample();
            assert!(sample.abs() <= 1.5, "{sample}");
            assert!((sample - previous).abs() < 0.2);
            previous = sample;
        }
    }

    #[test]
    fn test_walk_wraps() {
        let mut noise = SimplexNoise::<48000>::default();
        noise.set_step(40000.0);
        noise.next_sample();
        noise.next_sample();
        assert!((noise.position() - (80000.0 - STEP_LIMIT)).abs() < 1e-9);

        noise.set_step(-100000.0);
        noise.next_sample();
        assert!(noise.position().abs() <= STEP_LIMIT);
    }

    #[test]
    fn test_negative_coordinates() {
        let noise = SimplexNoise::<48000>::new(8);
        for i in 0..1000 {
            let x = -50.0 + i as f64 * 0.1;
            assert!(noise.get3(17, x, -x * 0.5, 3.0).is_finite());
        }
    }
    #[test]
    fn test_lattice_reduction_matches_byte_mask() {
        for coordinate in [-513, -256, -1, 0, 1, 255, 256, 70_000] {
            assert_eq!(lattice(coordinate as f64), coordinate & 0xff, "{coordinate}");
        }
    }

    #[test]
    fn test_huge_coordinates_stay_finite() {
        let noise = SimplexNoise::<48000>::new(4);
        for x in [3.0e9, -3.0e9, 1.0e15, f64::MAX / 4.0] {
            assert!(noise.get(x).is_finite(), "{x}");
            assert!(noise.get3(200, x, -x, x * 0.5).is_finite(), "{x}");
        }
    }

    #[test]
    fn test_huge_step_keeps_walk_in_range() {
        let mut noise = SimplexNoise::<48000>::new(4);
        noise.set_step(1e12);
        for _ in 0..100 {
            assert!(noise.next_sample().is_finite());
            assert!(noise.position().abs() <= STEP_LIMIT, "{}", noise.position());
        }

        noise.set_step(f64::INFINITY);
        assert!(noise.next_sample().is_finite());
        assert_eq!(noise.position(), 0.0);
    }
}
