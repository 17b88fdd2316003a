//! Level detectors.
//!
//! Each detector is a [`Processor`](crate::Processor) whose output is a level
//! measurement of its input rather than a transformed audio signal. The most
//! recent measurement is also available through `current()`.

mod ema;
mod follower;
mod rms;

pub use ema::ExponentialMovingAverage;
pub use follower::EnvelopeFollower;
pub use rms::RootMeanSquare;
