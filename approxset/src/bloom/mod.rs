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

//! Bloom filter for probabilistic set membership testing.
//!
//! A Bloom filter is a space-efficient probabilistic data structure used to test whether
//! an element is a member of a set. False positive matches are possible, but false negatives
//! are not. In other words, a query returns either "possibly in set" or "definitely not in set".
//!
//! # Properties
//!
//! - **No false negatives**: If an item was added, `contains()` will always return `true`
//! - **Possible false positives**: `contains()` may return `true` for items never added
//! - **Fixed size**: the bit array never grows, and bits are never cleared
//!
//! # Usage
//!
//! ```rust
//! use approxset::bloom::BloomFilter;
//!
//! let mut filter = BloomFilter::new(1000, 3).unwrap();
//!
//! filter.add("password123");
//! filter.add(&42_u64);
//!
//! assert!(filter.contains("password123"));
//! assert!(filter.contains("42")); // numbers are hashed through their string form
//! ```
//!
//! # Creating Filters
//!
//! ## By Size
//!
//! ```rust
//! # use approxset::bloom::BloomFilterBuilder;
//! let filter = BloomFilterBuilder::with_size(1000, 3).build().unwrap();
//! assert_eq!(filter.capacity(), 1000);
//! ```
//!
//! ## By Accuracy
//!
//! Derives the bit count and hash count from the expected number of items and a target
//! false positive probability:
//!
//! ```rust
//! # use approxset::bloom::BloomFilterBuilder;
//! let filter = BloomFilterBuilder::with_accuracy(10_000, 0.01)
//!     .unwrap()
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! assert_eq!(filter.num_hashes(), 7);
//! ```
//!
//! # False Positive Rate
//!
//! After `n` distinct insertions into a filter of `m` bits with `k` hash functions, the
//! probability that a never-added item is reported as present is approximately
//! `(1 - e^(-k*n/m))^k`. See [`BloomFilter::false_positive_rate`].
//!
//! # Implementation Details
//!
//! - Items are normalized with [`CanonicalString`](crate::canonical::CanonicalString)
//! - Slot `i` hashes `item ++ "_" ++ i` with MurmurHash3 x64/128 and reduces the 128-bit
//!   digest modulo the bit count
//! - Bits packed in `u64` words
//!
//! # References
//!
//! - Bloom, Burton H. (1970). "Space/time trade-offs in hash coding with allowable errors"

mod builder;
mod sketch;

pub use self::builder::BloomFilterBuilder;
pub use self::builder::MAX_NUM_BITS;
pub use self::builder::MAX_NUM_HASHES;
pub use self::builder::MIN_NUM_BITS;
pub use self::builder::MIN_NUM_HASHES;
pub use self::sketch::BloomFilter;
