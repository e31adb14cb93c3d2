// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Seedable pseudo-random source.
//!
//! Accuracy checks need streams of distinct random strings that are reproducible from a seed,
//! and the synthetic log generator needs cheap random choices. Neither needs cryptographic
//! quality.

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

/// Random number source.
pub trait RandomSource {
    /// Returns the next random 64-bit value.
    fn next_u64(&mut self) -> u64;

    /// Returns a random boolean value.
    fn next_bool(&mut self) -> bool {
        (self.next_u64() & 1) != 0
    }

    /// Returns a value in `[0, bound)`.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is 0.
    fn next_below(&mut self, bound: u64) -> u64 {
        assert!(bound > 0, "bound must be positive");
        // Widening multiply keeps the high bits, which are the best mixed ones.
        ((u128::from(self.next_u64()) * u128::from(bound)) >> 64) as u64
    }

    /// Returns a value in `[low, high]`.
    ///
    /// # Panics
    ///
    /// Panics if `low > high`.
    fn next_in_range(&mut self, low: u64, high: u64) -> u64 {
        assert!(low <= high, "low must not exceed high");
        match (high - low).checked_add(1) {
            Some(span) => low + self.next_below(span),
            None => self.next_u64(),
        }
    }

    /// Picks one element of `items`, or `None` if it is empty.
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.next_below(items.len() as u64) as usize)
    }
}

/// Xorshift-based random generator.
#[derive(Debug, Clone, Copy)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    /// Creates a new generator using the provided seed.
    pub fn seeded(seed: u64) -> Self {
        let state = if seed == 0 { 0x9e3779b97f4a7c15 } else { seed };
        Self { state }
    }
}

impl Default for XorShift64 {
    fn default() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let mut seed = nanos as u64 ^ (std::process::id() as u64);
        if seed == 0 {
            seed = 0x9e3779b97f4a7c15;
        }
        Self::seeded(seed)
    }
}

impl RandomSource for XorShift64 {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = XorShift64::seeded(7);
        let mut b = XorShift64::seeded(7);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn test_zero_seed_is_not_stuck() {
        let mut rng = XorShift64::seeded(0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn test_ranges() {
        let mut rng = XorShift64::seeded(42);
        for _ in 0..1000 {
            assert!(rng.next_below(10) < 10);
            let v = rng.next_in_range(100, 5000);
            assert!((100..=5000).contains(&v));
        }
        assert_eq!(rng.next_in_range(3, 3), 3);
        let _ = rng.next_in_range(0, u64::MAX);
    }

    #[test]
    fn test_choose() {
        let mut rng = XorShift64::seeded(42);
        let methods = ["GET", "POST", "PUT", "DELETE"];
        for _ in 0..100 {
            assert!(methods.contains(rng.choose(&methods).unwrap()));
        }
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
    }
}
