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

use super::BloomFilter;
use crate::error::Error;
use crate::hash::DEFAULT_UPDATE_SEED;
use crate::hash::Murmur3;

/// Smallest accepted bit count.
pub const MIN_NUM_BITS: u64 = 1;
/// Largest accepted bit count (4 GiB of bit storage).
pub const MAX_NUM_BITS: u64 = 1u64 << 35;
/// Smallest accepted number of hash functions.
pub const MIN_NUM_HASHES: u16 = 1;
/// Largest accepted number of hash functions.
pub const MAX_NUM_HASHES: u16 = i16::MAX as u16;

/// Builder for creating [`BloomFilter`] instances.
///
/// Provides two construction modes:
/// - [`with_size()`](Self::with_size): Specify exact bit count and hash functions
/// - [`with_accuracy()`](Self::with_accuracy): Specify target items and false positive rate
///
/// Parameters are validated by [`build()`](Self::build).
#[derive(Debug, Clone)]
pub struct BloomFilterBuilder {
    num_bits: u64,
    num_hashes: u16,
    seed: u32,
}

impl BloomFilterBuilder {
    /// Creates a builder with manual size specification.
    ///
    /// # Arguments
    ///
    /// - `num_bits`: Total number of bits in the filter
    /// - `num_hashes`: Number of hash functions to use
    ///
    /// # Examples
    ///
    /// ```
    /// # use approxset::bloom::BloomFilterBuilder;
    /// let filter = BloomFilterBuilder::with_size(10_000, 7).build().unwrap();
    /// assert_eq!(filter.capacity(), 10_000);
    /// ```
    pub fn with_size(num_bits: u64, num_hashes: u16) -> Self {
        BloomFilterBuilder {
            num_bits,
            num_hashes,
            seed: DEFAULT_UPDATE_SEED,
        }
    }

    /// Creates a builder with optimal parameters for a target accuracy.
    ///
    /// # Arguments
    ///
    /// - `max_items`: Maximum expected number of distinct items
    /// - `fpp`: Target false positive probability (e.g., 0.01 for 1%)
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidConfiguration`](crate::error::ErrorKind::InvalidConfiguration)
    /// if `max_items` is 0 or `fpp` is not in (0.0, 1.0).
    pub fn with_accuracy(max_items: u64, fpp: f64) -> Result<Self, Error> {
        if max_items == 0 {
            return Err(Error::invalid_configuration("max_items must be greater than 0")
                .with_context("max_items", max_items));
        }
        if !(fpp > 0.0 && fpp < 1.0) {
            return Err(
                Error::invalid_configuration("fpp must be between 0.0 and 1.0 (exclusive)")
                    .with_context("fpp", fpp),
            );
        }

        let num_bits = Self::suggest_num_bits(max_items, fpp);
        let num_hashes = Self::suggest_num_hashes_from_accuracy(max_items, num_bits);
        Ok(Self::with_size(num_bits, num_hashes))
    }

    /// Sets a custom hash seed (default: 9001).
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Builds the Bloom filter.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidConfiguration`](crate::error::ErrorKind::InvalidConfiguration)
    /// if the bit count is outside `[MIN_NUM_BITS, MAX_NUM_BITS]` or the hash count is outside
    /// `[MIN_NUM_HASHES, MAX_NUM_HASHES]`.
    pub fn build(self) -> Result<BloomFilter, Error> {
        if !(MIN_NUM_BITS..=MAX_NUM_BITS).contains(&self.num_bits) {
            return Err(Error::invalid_configuration(format!(
                "num_bits must be in [{MIN_NUM_BITS}, {MAX_NUM_BITS}]"
            ))
            .with_context("num_bits", self.num_bits));
        }
        if !(MIN_NUM_HASHES..=MAX_NUM_HASHES).contains(&self.num_hashes) {
            return Err(Error::invalid_configuration(format!(
                "num_hashes must be in [{MIN_NUM_HASHES}, {MAX_NUM_HASHES}]"
            ))
            .with_context("num_hashes", self.num_hashes));
        }

        let num_words = self.num_bits.div_ceil(64) as usize;
        Ok(BloomFilter::from_parts(
            Murmur3::with_seed(self.seed),
            self.num_hashes,
            self.num_bits,
            vec![0u64; num_words].into_boxed_slice(),
        ))
    }

    /// Suggests optimal number of bits given max items and target FPP.
    ///
    /// Formula: `m = -n * ln(p) / (ln(2)^2)`
    /// where n = max_items, p = fpp
    ///
    /// # Examples
    ///
    /// ```
    /// # use approxset::bloom::BloomFilterBuilder;
    /// let bits = BloomFilterBuilder::suggest_num_bits(1000, 0.01);
    /// assert!(bits > 9000 && bits < 10000); // ~9585 bits
    /// ```
    pub fn suggest_num_bits(max_items: u64, fpp: f64) -> u64 {
        let n = max_items as f64;
        let ln2_squared = std::f64::consts::LN_2 * std::f64::consts::LN_2;

        let bits = (-n * fpp.ln() / ln2_squared).ceil() as u64;

        bits.clamp(MIN_NUM_BITS, MAX_NUM_BITS)
    }

    /// Suggests optimal number of hash functions given max items and bit count.
    ///
    /// Formula: `k = (m/n) * ln(2)`
    /// where m = num_bits, n = max_items
    ///
    /// # Examples
    ///
    /// ```
    /// # use approxset::bloom::BloomFilterBuilder;
    /// let hashes = BloomFilterBuilder::suggest_num_hashes_from_accuracy(1000, 10000);
    /// assert_eq!(hashes, 7); // Optimal k ≈ 6.93
    /// ```
    pub fn suggest_num_hashes_from_accuracy(max_items: u64, num_bits: u64) -> u16 {
        let m = num_bits as f64;
        let n = max_items as f64;

        // Ceil to avoid selecting too few hashes.
        let k = (m / n * std::f64::consts::LN_2).ceil();
        k.clamp(f64::from(MIN_NUM_HASHES), f64::from(MAX_NUM_HASHES)) as u16
    }

    /// Suggests optimal number of hash functions from target FPP.
    ///
    /// Formula: `k = -log2(p)`
    /// where p = fpp
    ///
    /// # Examples
    ///
    /// ```
    /// # use approxset::bloom::BloomFilterBuilder;
    /// let hashes = BloomFilterBuilder::suggest_num_hashes_from_fpp(0.01);
    /// assert_eq!(hashes, 7); // -log2(0.01) ≈ 6.64
    /// ```
    pub fn suggest_num_hashes_from_fpp(fpp: f64) -> u16 {
        let k = -fpp.log2();
        k.ceil()
            .clamp(f64::from(MIN_NUM_HASHES), f64::from(MAX_NUM_HASHES)) as u16
    }
}
