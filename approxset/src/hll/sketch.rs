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

use crate::canonical::CanonicalString;
use crate::common::NumStdDev;
use crate::error::Error;
use crate::hash::DEFAULT_UPDATE_SEED;
use crate::hash::Murmur3;

use super::MAX_PRECISION;
use super::MIN_PRECISION;
use super::error_for_precision;
use super::estimator;

/// HyperLogLog cardinality estimator.
///
/// Estimates the number of distinct items added, using `2^precision` one-byte registers.
/// Registers only ever grow, and [`estimate()`](Self::estimate) is a read-only query that can
/// be taken at any time.
///
/// # Examples
///
/// ```
/// use approxset::hll::HyperLogLog;
///
/// let mut hll = HyperLogLog::new(12).unwrap();
/// for i in 0..10_000 {
///     hll.add(&format!("user_{i}"));
/// }
///
/// let relative_error = (hll.estimate() - 10_000.0).abs() / 10_000.0;
/// assert!(relative_error < 3.0 * hll.relative_error());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HyperLogLog {
    /// Log2 of the number of registers (p)
    precision: u8,
    /// Bias-correction constant derived from the register count
    alpha: f64,
    /// Hash applied to each item's canonical string
    hasher: Murmur3,
    /// One register per bucket, each holding the largest rho seen
    registers: Box<[u8]>,
}

impl HyperLogLog {
    /// Creates an empty estimator with `2^precision` registers.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidConfiguration`](crate::error::ErrorKind::InvalidConfiguration)
    /// if `precision` is outside `[4, 20]`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use approxset::hll::HyperLogLog;
    /// let hll = HyperLogLog::new(14).unwrap();
    /// assert_eq!(hll.num_registers(), 16384);
    ///
    /// assert!(HyperLogLog::new(21).is_err());
    /// ```
    pub fn new(precision: u8) -> Result<Self, Error> {
        Self::with_seed(precision, DEFAULT_UPDATE_SEED)
    }

    /// Creates an empty estimator whose item hash uses the given seed.
    ///
    /// # Errors
    ///
    /// Same as [`new()`](Self::new).
    pub fn with_seed(precision: u8, seed: u32) -> Result<Self, Error> {
        if !(MIN_PRECISION..=MAX_PRECISION).contains(&precision) {
            return Err(Error::invalid_configuration(format!(
                "precision must be in [{MIN_PRECISION}, {MAX_PRECISION}]"
            ))
            .with_context("precision", precision));
        }

        let m = 1usize << precision;
        Ok(HyperLogLog {
            precision,
            alpha: estimator::alpha(m),
            hasher: Murmur3::with_seed(seed),
            registers: vec![0u8; m].into_boxed_slice(),
        })
    }

    // ========================================================================
    // Update Operations
    // ========================================================================

    /// Adds an item.
    ///
    /// The item is hashed through its canonical string, so `42_u32` and `"42"` count as the
    /// same item.
    pub fn add<T: CanonicalString + ?Sized>(&mut self, item: &T) {
        let key = item.to_canonical_string();
        let hash = self.hasher.hash64(key.as_bytes());
        self.add_hash(hash);
    }

    /// Adds a pre-computed 64-bit hash value.
    ///
    /// The top `precision` bits select the register. The remaining `64 - precision` bits form
    /// `w`, and rho is the number of leading zeros of `w` within that window plus one
    /// (`64 - precision + 1` when `w` is zero).
    ///
    /// # Examples
    ///
    /// ```
    /// # use approxset::hll::HyperLogLog;
    /// let mut hll = HyperLogLog::new(4).unwrap();
    /// hll.add_hash(0x3000_0000_0000_0000); // register 3, w == 0
    /// assert_eq!(hll.registers()[3], 61);
    /// ```
    pub fn add_hash(&mut self, hash: u64) {
        let p = u32::from(self.precision);
        let index = (hash >> (64 - p)) as usize;
        let w = hash & (u64::MAX >> p);
        // w < 2^(64 - p), so it has at least p leading zeros; for w == 0 this yields 64 - p + 1.
        let rho = (w.leading_zeros() - p + 1) as u8;

        let register = &mut self.registers[index];
        if rho > *register {
            *register = rho;
        }
    }

    // ========================================================================
    // Estimation
    // ========================================================================

    /// Returns the estimated number of distinct items added.
    ///
    /// Uses linear counting while the raw estimate is at most `2.5 * m` and some register is
    /// still zero, and the raw harmonic-mean estimate otherwise. The result is never negative.
    pub fn estimate(&self) -> f64 {
        estimator::estimate(self.alpha, &self.registers)
    }

    /// Returns the raw harmonic-mean estimate `alpha * m^2 / sum(2^-register)`, without the
    /// small-range correction.
    pub fn raw_estimate(&self) -> f64 {
        estimator::raw_estimate(self.alpha, &self.registers)
    }

    /// Returns the asymptotic relative standard error `1.04 / sqrt(m)`.
    pub fn relative_error(&self) -> f64 {
        error_for_precision(self.precision)
    }

    /// Returns the lower confidence bound of the estimate, never below zero.
    pub fn lower_bound(&self, num_std_dev: NumStdDev) -> f64 {
        let estimate = self.estimate();
        (estimate - self.margin(estimate, num_std_dev)).max(0.0)
    }

    /// Returns the upper confidence bound of the estimate.
    pub fn upper_bound(&self, num_std_dev: NumStdDev) -> f64 {
        let estimate = self.estimate();
        estimate + self.margin(estimate, num_std_dev)
    }

    fn margin(&self, estimate: f64, num_std_dev: NumStdDev) -> f64 {
        num_std_dev.as_f64() * self.relative_error() * estimate
    }

    // ========================================================================
    // Statistics and Properties
    // ========================================================================

    /// Returns the precision (log2 of the register count).
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Returns the number of registers (m = 2^precision).
    pub fn num_registers(&self) -> usize {
        self.registers.len()
    }

    /// Returns the bias-correction constant used by the raw estimate.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Returns the hash seed.
    pub fn seed(&self) -> u32 {
        self.hasher.seed()
    }

    /// Returns the register values.
    pub fn registers(&self) -> &[u8] {
        &self.registers
    }

    /// Returns the number of registers that are still zero.
    pub fn num_zero_registers(&self) -> usize {
        self.registers.iter().filter(|&&r| r == 0).count()
    }

    /// Returns whether nothing has been added yet.
    pub fn is_empty(&self) -> bool {
        self.registers.iter().all(|&r| r == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_precision_range() {
        for p in [MIN_PRECISION, 10, 14, MAX_PRECISION] {
            let hll = HyperLogLog::new(p).unwrap();
            assert_eq!(hll.precision(), p);
            assert_eq!(hll.num_registers(), 1 << p);
            assert!(hll.is_empty());
        }

        for p in [0, 3, 21, u8::MAX] {
            let err = HyperLogLog::new(p).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
            assert_eq!(err.context("precision"), Some(p.to_string().as_str()));
        }
    }

    #[test]
    fn test_alpha_is_fixed_at_construction() {
        assert_eq!(HyperLogLog::new(4).unwrap().alpha(), 0.673);
        assert_eq!(HyperLogLog::new(5).unwrap().alpha(), 0.697);
        assert_eq!(HyperLogLog::new(6).unwrap().alpha(), 0.709);
    }

    #[test]
    fn test_empty_estimate() {
        let hll = HyperLogLog::new(12).unwrap();
        assert_eq!(hll.estimate(), 0.0);
        assert_eq!(hll.lower_bound(NumStdDev::Two), 0.0);
        assert_eq!(hll.upper_bound(NumStdDev::Two), 0.0);
    }

    #[test]
    fn test_rho_from_hash() {
        let mut hll = HyperLogLog::new(4).unwrap();

        // Register 0: first bit after the index is set, rho = 1.
        hll.add_hash(0x0800_0000_0000_0000);
        assert_eq!(hll.registers()[0], 1);

        // Register 1: two leading zeros in w, rho = 3.
        hll.add_hash(0x1200_0000_0000_0000);
        assert_eq!(hll.registers()[1], 3);

        // Register 15: only the lowest bit set, rho = 60.
        hll.add_hash(0xF000_0000_0000_0001);
        assert_eq!(hll.registers()[15], 60);

        // Register 2: w == 0, rho = (64 - 4) + 1.
        hll.add_hash(0x2000_0000_0000_0000);
        assert_eq!(hll.registers()[2], 61);
    }

    #[test]
    fn test_rho_at_max_precision() {
        let mut hll = HyperLogLog::new(MAX_PRECISION).unwrap();
        hll.add_hash(u64::MAX << 44);
        assert_eq!(hll.registers()[(1 << 20) - 1], 45);
    }

    #[test]
    fn test_registers_keep_maximum() {
        let mut hll = HyperLogLog::new(4).unwrap();
        hll.add_hash(0x0000_0000_0000_0001); // register 0, rho = 60
        hll.add_hash(0x0800_0000_0000_0000); // register 0, rho = 1
        assert_eq!(hll.registers()[0], 60);
    }

    #[test]
    fn test_duplicates() {
        let mut hll = HyperLogLog::new(12).unwrap();
        for _ in 0..10_000 {
            hll.add("same_item");
        }
        assert_eq!(hll.num_zero_registers(), hll.num_registers() - 1);
        let estimate = hll.estimate();
        assert!((0.5..=2.0).contains(&estimate), "estimate: {estimate}");
    }

    #[test]
    fn test_canonical_items_collide() {
        let mut a = HyperLogLog::new(10).unwrap();
        let mut b = HyperLogLog::new(10).unwrap();
        a.add(&42_u32);
        b.add("42");
        assert_eq!(a, b);
    }

    #[test]
    fn test_bounds_bracket_estimate() {
        let mut hll = HyperLogLog::new(14).unwrap();
        for i in 0..100_000 {
            hll.add(&i);
        }

        let estimate = hll.estimate();
        let lower = hll.lower_bound(NumStdDev::Two);
        let upper = hll.upper_bound(NumStdDev::Two);
        assert!(lower < estimate && estimate < upper);
        assert!(hll.lower_bound(NumStdDev::Three) < lower);
        assert!(hll.upper_bound(NumStdDev::Three) > upper);
        assert!(hll.lower_bound(NumStdDev::Three) < 100_000.0);
        assert!(hll.upper_bound(NumStdDev::Three) > 100_000.0);
    }
}
