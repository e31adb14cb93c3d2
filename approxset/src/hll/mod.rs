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

//! HyperLogLog cardinality estimator.
//!
//! A HyperLogLog keeps `m = 2^p` small registers. Each item is hashed to 64 bits; the top `p`
//! bits pick a register and the remaining `64 - p` bits contribute their leading-zero run
//! length plus one ("rho"). A register remembers the largest rho it has seen, and the
//! harmonic mean of `2^-register` over all registers yields the cardinality estimate.
//!
//! The relative standard error is approximately `1.04 / sqrt(m)`:
//!
//! | Precision | Registers | Error |
//! |-----------|-----------|-------|
//! | 10 | 1 KiB | ~3.25% |
//! | 12 | 4 KiB | ~1.63% |
//! | 14 | 16 KiB | ~0.81% |
//! | 16 | 64 KiB | ~0.41% |
//!
//! # Estimation regimes
//!
//! - **Small range**: when the raw estimate is at most `2.5 * m` and some register is still
//!   zero, linear counting `m * ln(m / V)` is returned, where `V` is the number of zero
//!   registers.
//! - **Otherwise**: the raw harmonic-mean estimate `alpha * m^2 / sum(2^-register)`.
//!
//! No large-range correction is applied: with a 64-bit hash the hash space does not saturate
//! at realistic cardinalities.
//!
//! # Usage
//!
//! ```rust
//! use approxset::hll::HyperLogLog;
//!
//! let mut hll = HyperLogLog::new(14).unwrap();
//! for ip in ["10.0.0.1", "10.0.0.2", "10.0.0.1"] {
//!     hll.add(ip);
//! }
//! assert!((hll.estimate() - 2.0).abs() < 0.5);
//! ```

mod estimator;
mod sketch;

pub use self::sketch::HyperLogLog;

/// Smallest accepted precision (16 registers).
pub const MIN_PRECISION: u8 = 4;
/// Largest accepted precision (1,048,576 registers).
pub const MAX_PRECISION: u8 = 20;

/// Returns the asymptotic relative standard error `1.04 / sqrt(2^precision)`.
pub fn error_for_precision(precision: u8) -> f64 {
    let m = (1u64 << precision) as f64;
    1.04 / m.sqrt()
}

/// Returns the smallest precision whose relative standard error does not exceed
/// `target_error`, clamped to `[MIN_PRECISION, MAX_PRECISION]`.
///
/// # Examples
///
/// ```
/// # use approxset::hll::precision_for_error;
/// assert_eq!(precision_for_error(0.01), 14);
/// assert_eq!(precision_for_error(0.5), 4);
/// ```
pub fn precision_for_error(target_error: f64) -> u8 {
    (MIN_PRECISION..=MAX_PRECISION)
        .find(|&p| error_for_precision(p) <= target_error)
        .unwrap_or(MAX_PRECISION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_for_precision() {
        let e14 = error_for_precision(14);
        assert!(e14 > 0.008 && e14 < 0.0082);
        assert!(error_for_precision(12) > e14);
    }

    #[test]
    fn test_precision_for_error() {
        assert_eq!(precision_for_error(error_for_precision(12)), 12);
        assert!(precision_for_error(0.005) > precision_for_error(0.01));
        assert_eq!(precision_for_error(0.0), MAX_PRECISION);
        assert_eq!(precision_for_error(1.0), MIN_PRECISION);
    }
}
