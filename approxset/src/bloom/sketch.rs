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
use crate::error::Error;
use crate::hash::Murmur3;
use crate::hash::SaltedHash;

use super::BloomFilterBuilder;

/// A Bloom filter for probabilistic set membership testing.
///
/// Provides membership queries with:
/// - No false negatives (added items always return `true`)
/// - False positives with probability `(1 - e^(-k*n/m))^k` after `n` insertions
/// - Constant space usage; bits only ever go from 0 to 1
///
/// Construct with [`BloomFilter::new`] or [`BloomFilterBuilder`].
///
/// The filter does no internal locking. Share it across threads behind a mutex held for the
/// duration of each `add` or `contains` call.
#[derive(Debug, Clone, PartialEq)]
pub struct BloomFilter {
    /// Base hash, keyed per slot by the slot ordinal
    hasher: Murmur3,
    /// Number of hash functions to use (k)
    num_hashes: u16,
    /// Total number of bits in the filter (m)
    capacity_bits: u64,
    /// Count of bits set to 1 (for statistics)
    num_bits_set: u64,
    /// Bit array packed into u64 words
    /// Length = ceil(capacity_bits / 64)
    bit_array: Box<[u64]>,
}

impl BloomFilter {
    /// Creates an empty filter with `size` bits and `num_hashes` hash functions.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidConfiguration`](crate::error::ErrorKind::InvalidConfiguration)
    /// if `size` or `num_hashes` is 0 (or above the supported maximum).
    ///
    /// # Examples
    ///
    /// ```
    /// # use approxset::bloom::BloomFilter;
    /// let filter = BloomFilter::new(1000, 3).unwrap();
    /// assert!(filter.is_empty());
    ///
    /// assert!(BloomFilter::new(0, 3).is_err());
    /// ```
    pub fn new(size: u64, num_hashes: u16) -> Result<Self, Error> {
        BloomFilterBuilder::with_size(size, num_hashes).build()
    }

    pub(super) fn from_parts(
        hasher: Murmur3,
        num_hashes: u16,
        capacity_bits: u64,
        bit_array: Box<[u64]>,
    ) -> Self {
        BloomFilter {
            hasher,
            num_hashes,
            capacity_bits,
            num_bits_set: 0,
            bit_array,
        }
    }

    // ========================================================================
    // Query Operations
    // ========================================================================

    /// Tests whether an item is possibly in the set.
    ///
    /// Returns:
    /// - `true`: Item was **possibly** added (or false positive)
    /// - `false`: Item was **definitely not** added
    ///
    /// # Examples
    ///
    /// ```
    /// # use approxset::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(1000, 3).unwrap();
    /// filter.add("apple");
    ///
    /// assert!(filter.contains("apple")); // true - was added
    /// assert!(!filter.contains("grape")); // false - never added (probably)
    /// ```
    pub fn contains<T: CanonicalString + ?Sized>(&self, item: &T) -> bool {
        if self.is_empty() {
            return false;
        }

        let key = item.to_canonical_string();
        (0..self.num_hashes).all(|slot| self.get_bit(self.bit_index(&key, slot)))
    }

    /// Tests and adds an item in a single operation.
    ///
    /// Returns whether the item was possibly already in the set before insertion.
    /// Hashes the item once instead of twice as `contains()` then `add()` would.
    ///
    /// # Examples
    ///
    /// ```
    /// # use approxset::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(1000, 3).unwrap();
    ///
    /// assert!(!filter.contains_and_add("apple")); // first insertion
    /// assert!(filter.contains_and_add("apple")); // now it's in the set
    /// ```
    pub fn contains_and_add<T: CanonicalString + ?Sized>(&mut self, item: &T) -> bool {
        let mut was_present = true;
        for index in self.indices(item) {
            if !self.set_bit(index) {
                was_present = false;
            }
        }
        was_present
    }

    /// Returns the `num_hashes` bit indices an item maps to, in slot order.
    ///
    /// The result depends only on the item's canonical string, the bit count, the number of
    /// hash functions and the seed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use approxset::bloom::BloomFilter;
    /// let filter = BloomFilter::new(1000, 3).unwrap();
    /// let indices = filter.indices("admin123");
    /// assert_eq!(indices.len(), 3);
    /// assert!(indices.iter().all(|&i| i < 1000));
    /// assert_eq!(indices, filter.indices("admin123"));
    /// ```
    pub fn indices<T: CanonicalString + ?Sized>(&self, item: &T) -> Vec<u64> {
        let key = item.to_canonical_string();
        (0..self.num_hashes)
            .map(|slot| self.bit_index(&key, slot))
            .collect()
    }

    // ========================================================================
    // Update Operations
    // ========================================================================

    /// Adds an item to the filter.
    ///
    /// After insertion, `contains(item)` will always return `true`. Adding an item that is
    /// already present leaves the filter unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use approxset::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(1000, 3).unwrap();
    ///
    /// filter.add("apple");
    /// filter.add(&42_u64);
    ///
    /// assert!(filter.contains("apple"));
    /// assert!(filter.contains(&42_u64));
    /// ```
    pub fn add<T: CanonicalString + ?Sized>(&mut self, item: &T) {
        for index in self.indices(item) {
            self.set_bit(index);
        }
    }

    // ========================================================================
    // Statistics and Properties
    // ========================================================================

    /// Returns whether the filter is empty (no items added).
    pub fn is_empty(&self) -> bool {
        self.num_bits_set == 0
    }

    /// Returns the number of bits set to 1.
    pub fn bits_used(&self) -> u64 {
        self.num_bits_set
    }

    /// Returns the total number of bits in the filter (capacity).
    pub fn capacity(&self) -> u64 {
        self.capacity_bits
    }

    /// Returns the number of hash functions used.
    pub fn num_hashes(&self) -> u16 {
        self.num_hashes
    }

    /// Returns the hash seed.
    pub fn seed(&self) -> u32 {
        self.hasher.seed()
    }

    /// Returns the current load factor (fraction of bits set).
    pub fn load_factor(&self) -> f64 {
        self.num_bits_set as f64 / self.capacity_bits as f64
    }

    /// Estimates the current false positive probability from the observed load.
    ///
    /// A query for a never-added item hits `k` bits that are each set with probability
    /// equal to the load factor, so this is `load_factor^k`.
    pub fn estimated_fpp(&self) -> f64 {
        self.load_factor().powi(i32::from(self.num_hashes))
    }

    /// Returns the analytic false positive probability after `num_items` distinct insertions.
    ///
    /// Formula: `(1 - e^(-k*n/m))^k`
    /// where k = num_hashes, n = num_items, m = capacity
    ///
    /// # Examples
    ///
    /// ```
    /// # use approxset::bloom::BloomFilter;
    /// let filter = BloomFilter::new(1000, 3).unwrap();
    /// assert_eq!(filter.false_positive_rate(0), 0.0);
    /// assert!(filter.false_positive_rate(100) < 0.02);
    /// ```
    pub fn false_positive_rate(&self, num_items: u64) -> f64 {
        let k = f64::from(self.num_hashes);
        let n = num_items as f64;
        let m = self.capacity_bits as f64;
        (1.0 - (-k * n / m).exp()).powf(k)
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    /// Maps the salted digest of `key` for one slot onto the bit array.
    fn bit_index(&self, key: &str, slot: u16) -> u64 {
        let digest = self.hasher.salted_hash(key, u32::from(slot));
        (digest % u128::from(self.capacity_bits)) as u64
    }

    /// Gets the value of a single bit.
    fn get_bit(&self, bit_index: u64) -> bool {
        let word_index = (bit_index / 64) as usize;
        let bit_offset = bit_index % 64;
        let mask = 1u64 << bit_offset;
        (self.bit_array[word_index] & mask) != 0
    }

    /// Sets a single bit and updates the count if it wasn't already set.
    ///
    /// Returns whether the bit was already set.
    fn set_bit(&mut self, bit_index: u64) -> bool {
        let word_index = (bit_index / 64) as usize;
        let bit_offset = bit_index % 64;
        let mask = 1u64 << bit_offset;

        if (self.bit_array[word_index] & mask) == 0 {
            self.bit_array[word_index] |= mask;
            self.num_bits_set += 1;
            false
        } else {
            true
        }
    }
}
