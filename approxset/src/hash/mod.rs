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

//! Hash primitives shared by the filters and estimators.
//!
//! A Bloom filter needs `k` independent hash functions. Instead of `k` different algorithms,
//! one base hash is keyed by `k` distinct salts through [`SaltedHash`]; the filter only sees
//! that trait, so the backend can change without touching index derivation.

mod murmurhash;

pub use self::murmurhash::Murmur3;

/// The seed 9001 used by default for every hash in this crate is a prime number that was
/// chosen very early on in experimental testing.
///
/// Two filters (or two estimators) only agree on what an item maps to when they use the same
/// hash function and the same seed.
pub const DEFAULT_UPDATE_SEED: u32 = 9001;

/// A hash function that can be keyed by a per-slot salt.
pub trait SaltedHash {
    /// Hashes the concatenation `item ++ "_" ++ salt` and returns the full digest as an
    /// unsigned integer.
    ///
    /// Equal inputs always produce equal outputs, within and across processes.
    fn salted_hash(&self, item: &str, salt: u32) -> u128;
}
