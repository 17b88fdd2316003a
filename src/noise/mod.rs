//! Noise generators for audio synthesis.
//!
//! This module contains uniform, Gaussian, pink and coherent (simplex) noise
//! generators, plus the [`Noise`] bank that switches between them. Every
//! generator owns its random number generator and can be seeded for
//! reproducible output.

mod bank;
mod gaussian;
mod pink;
mod simplex;
mod white;

pub use bank::{Noise, NoiseType};
pub use gaussian::{FastGaussianNoise, GaussianNoise};
pub use pink::PinkNoise;
pub use simplex::SimplexNoise;
pub use white::{FastWhiteNoise, WhiteNoise};
