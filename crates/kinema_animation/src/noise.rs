//! Seedable noise source for the random and Perlin easing curves
//!
//! A [`NoiseGenerator`] is a cheap, clonable handle. Clones share the same
//! underlying state, so two curves built from one handle draw from a single
//! deterministic sequence.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::rc::Rc;

/// Size of the Perlin permutation table
const TABLE_SIZE: usize = 256;

/// Shared handle to a seeded random/noise generator
#[derive(Clone, Debug)]
pub struct NoiseGenerator {
    state: Rc<RefCell<NoiseState>>,
}

#[derive(Debug)]
struct NoiseState {
    rng: StdRng,
    /// Permutation table, doubled to avoid wrapping on `index + 1`
    permutation: Vec<u8>,
    /// Offset added to every Perlin sample position
    offset: f64,
}

impl NoiseGenerator {
    /// Create a generator with a fixed seed (reproducible sequences)
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(mut rng: StdRng) -> Self {
        let mut table: Vec<u8> = (0..TABLE_SIZE).map(|i| i as u8).collect();
        table.shuffle(&mut rng);

        let mut permutation = Vec::with_capacity(TABLE_SIZE * 2);
        permutation.extend_from_slice(&table);
        permutation.extend_from_slice(&table);

        let offset = rng.gen_range(0.0..TABLE_SIZE as f64);

        Self {
            state: Rc::new(RefCell::new(NoiseState {
                rng,
                permutation,
                offset,
            })),
        }
    }

    /// Uniform sample in the open interval `(0, 1)`
    pub fn uniform(&self) -> f64 {
        let mut state = self.state.borrow_mut();
        loop {
            // gen::<f64>() is in [0, 1); only the lower bound needs rejecting
            let value: f64 = state.rng.gen();
            if value != 0.0 {
                return value;
            }
        }
    }

    /// 1D Perlin noise at `x`, mapped into `[0, 1)`
    pub fn perlin(&self, x: f64) -> f64 {
        let state = self.state.borrow();
        state.sample(x + state.offset)
    }

    /// 1D Perlin noise at `x` that is never exactly zero.
    ///
    /// An exact zero re-draws the sampling offset and samples again.
    pub fn perlin_nonzero(&self, x: f64) -> f64 {
        loop {
            let value = self.perlin(x);
            if value != 0.0 {
                return value;
            }

            let mut state = self.state.borrow_mut();
            state.offset = state.rng.gen_range(0.0..TABLE_SIZE as f64);
            tracing::trace!(
                x,
                offset = state.offset,
                "perlin sample hit zero, re-drawing offset"
            );
        }
    }
}

impl NoiseState {
    fn sample(&self, x: f64) -> f64 {
        let cell = x.floor();
        let index = (cell as i64).rem_euclid(TABLE_SIZE as i64) as usize;
        let local = x - cell;

        let g0 = gradient(self.permutation[index], local);
        let g1 = gradient(self.permutation[index + 1], local - 1.0);

        // Gradient noise lies in [-0.5, 0.5]; shift it and keep 1.0 exclusive
        let noise = g0 + fade(local) * (g1 - g0) + 0.5;
        noise.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// Quintic fade curve 6t⁵ - 15t⁴ + 10t³
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn gradient(hash: u8, distance: f64) -> f64 {
    if hash & 1 == 0 {
        distance
    } else {
        -distance
    }
}
