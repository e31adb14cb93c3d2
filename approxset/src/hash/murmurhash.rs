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

use super::DEFAULT_UPDATE_SEED;
use super::SaltedHash;

/// MurmurHash3 x64/128 with a fixed seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Murmur3 {
    seed: u32,
}

impl Default for Murmur3 {
    fn default() -> Self {
        Self::with_seed(DEFAULT_UPDATE_SEED)
    }
}

impl Murmur3 {
    /// Creates a hasher that uses the given seed.
    pub const fn with_seed(seed: u32) -> Self {
        Self { seed }
    }

    /// Returns the seed.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Returns the 128-bit digest of `bytes`, with the first 64-bit half in the high bits.
    pub fn hash128(&self, bytes: &[u8]) -> u128 {
        let (h1, h2) = mur3::murmurhash3_x64_128(bytes, self.seed);
        (u128::from(h1) << 64) | u128::from(h2)
    }

    /// Returns a 64-bit hash of `bytes` (the first half of the 128-bit digest).
    pub fn hash64(&self, bytes: &[u8]) -> u64 {
        let (h1, _) = mur3::murmurhash3_x64_128(bytes, self.seed);
        h1
    }
}

impl SaltedHash for Murmur3 {
    fn salted_hash(&self, item: &str, salt: u32) -> u128 {
        let key = format!("{item}_{salt}");
        self.hash128(key.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn halves(value: u128) -> (u64, u64) {
        ((value >> 64) as u64, value as u64)
    }

    #[test]
    fn test_remainder() {
        let hasher = Murmur3::with_seed(0);

        // remainder > 8
        let key = "The quick brown fox jumps over the lazy dog";
        let (h1, h2) = halves(hasher.hash128(key.as_bytes()));
        assert_eq!(h1, 0xe34bbc7bbc071b6c);
        assert_eq!(h2, 0x7a433ca9c49a9347);
        assert_eq!(hasher.hash64(key.as_bytes()), h1);

        // change one bit
        let key = "The quick brown fox jumps over the lazy eog";
        let (h1, h2) = halves(hasher.hash128(key.as_bytes()));
        assert_eq!(h1, 0x362108102c62d1c9);
        assert_eq!(h2, 0x3285cd100292b305);

        // test a remainder < 8
        let key = "The quick brown fox jumps over the lazy dogdogdog";
        let (h1, h2) = halves(hasher.hash128(key.as_bytes()));
        assert_eq!(h1, 0x9c8205300e612fc4);
        assert_eq!(h2, 0xcbc0af6136aa3df9);

        // test a remainder = 0
        let key = "The quick brown fox jumps over t";
        let (h1, h2) = halves(hasher.hash128(key.as_bytes()));
        assert_eq!(h1, 0xdf6af91bb29bdacf);
        assert_eq!(h2, 0x91a341c58df1f3a6);
    }

    #[test]
    fn test_salted_hash_is_hash_of_concatenation() {
        let hasher = Murmur3::default();
        assert_eq!(
            hasher.salted_hash("password123", 2),
            hasher.hash128(b"password123_2")
        );
    }

    #[test]
    fn test_salts_give_distinct_hashes() {
        let hasher = Murmur3::default();
        let a = hasher.salted_hash("admin123", 0);
        let b = hasher.salted_hash("admin123", 1);
        assert_ne!(a, b);
        assert_eq!(a, hasher.salted_hash("admin123", 0));
    }

    #[test]
    fn test_seed_changes_output() {
        let a = Murmur3::with_seed(1).hash64(b"10.0.0.1");
        let b = Murmur3::with_seed(2).hash64(b"10.0.0.1");
        assert_ne!(a, b);
        assert_eq!(Murmur3::default().seed(), DEFAULT_UPDATE_SEED);
    }
}
