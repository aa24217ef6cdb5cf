//! Injectable randomness
//!
//! The selector never touches a global RNG. Production wiring hands it an
//! OS-seeded generator; tests hand it a seeded or scripted one.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Largest value a unit draw may take
const MAX_UNIT: f64 = 1.0 - f64::EPSILON;

/// Source of uniform reals in `[0, 1)`
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<T: RandomSource + ?Sized> RandomSource for Box<T> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Draw from `source`, forcing the value into `[0, 1)`
///
/// NaN and infinities map to 0.
#[inline]
pub fn unit_draw(source: &mut dyn RandomSource) -> f64 {
    let value = source.next_unit();
    if value.is_finite() {
        value.clamp(0.0, MAX_UNIT)
    } else {
        0.0
    }
}

/// Adapter over any `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// OS-seeded generator for production use
    pub fn from_os() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl RngSource<ChaCha8Rng> {
    /// Reproducible generator
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed list of values, wrapping around at the end
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    /// An empty list always yields 0.0
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Number of values drawn so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
