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

//! Cardinality estimation from HyperLogLog registers.

/// Bias-correction constant for `m` registers.
///
/// Closed form for `m` = 16, 32 and 64; the asymptotic formula otherwise.
pub(super) fn alpha(m: usize) -> f64 {
    match m {
        16 => 0.673,
        32 => 0.697,
        64 => 0.709,
        _ => 0.7213 / (1.0 + 1.079 / m as f64),
    }
}

/// Returns `2^-value`.
#[inline]
fn inv_pow2(value: u8) -> f64 {
    (-f64::from(value)).exp2()
}

/// Raw HLL estimate using the harmonic mean of the registers.
///
/// Formula: `alpha * m^2 / sum(2^-register[i])`
pub(super) fn raw_estimate(alpha: f64, registers: &[u8]) -> f64 {
    let m = registers.len() as f64;
    let sum: f64 = registers.iter().map(|&r| inv_pow2(r)).sum();
    alpha * m * m / sum
}

/// Linear counting estimate: `m * ln(m / V)` with `V` zero-valued registers.
pub(super) fn linear_counting(num_registers: usize, num_zeros: usize) -> f64 {
    let m = num_registers as f64;
    m * (m / num_zeros as f64).ln()
}

/// Cardinality estimate with the small-range correction.
///
/// Switches to linear counting when the raw estimate is at most `2.5 * m` and at least one
/// register is still zero.
pub(super) fn estimate(alpha: f64, registers: &[u8]) -> f64 {
    let raw = raw_estimate(alpha, registers);
    let m = registers.len();

    if raw <= 2.5 * m as f64 {
        let num_zeros = registers.iter().filter(|&&r| r == 0).count();
        if num_zeros > 0 {
            return linear_counting(m, num_zeros);
        }
    }

    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_constants() {
        assert_eq!(alpha(16), 0.673);
        assert_eq!(alpha(32), 0.697);
        assert_eq!(alpha(64), 0.709);
        let a = alpha(1 << 14);
        assert!((a - 0.7213 / (1.0 + 1.079 / 16384.0)).abs() < 1e-15);
    }

    #[test]
    fn test_empty_registers_estimate_zero() {
        let registers = vec![0u8; 1024];
        assert_eq!(estimate(alpha(1024), &registers), 0.0);
    }

    #[test]
    fn test_linear_counting_branch() {
        let mut registers = vec![0u8; 1024];
        for r in registers.iter_mut().take(10) {
            *r = 1;
        }
        let expected = 1024.0 * (1024.0_f64 / 1014.0).ln();
        assert!((estimate(alpha(1024), &registers) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_raw_branch_when_no_zero_registers() {
        let registers = vec![1u8; 16];
        // sum = 16 * 0.5 = 8, so raw = 0.673 * 256 / 8
        let expected = 0.673 * 256.0 / 8.0;
        assert!((raw_estimate(alpha(16), &registers) - expected).abs() < 1e-12);
        assert_eq!(estimate(alpha(16), &registers), raw_estimate(alpha(16), &registers));
    }

    #[test]
    fn test_raw_branch_when_above_threshold() {
        // Large register values push the raw estimate far above 2.5 * m even with a zero
        // register left.
        let mut registers = vec![30u8; 64];
        registers[0] = 0;
        let raw = raw_estimate(alpha(64), &registers);
        assert!(raw > 2.5 * 64.0);
        assert_eq!(estimate(alpha(64), &registers), raw);
    }
}
