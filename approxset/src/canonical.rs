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

//! Normalization of items into the string form that gets hashed.
//!
//! Both [`BloomFilter`](crate::bloom::BloomFilter) and
//! [`HyperLogLog`](crate::hll::HyperLogLog) hash the UTF-8 bytes of an item's canonical
//! string, so `42_u32`, `42_i64` and `"42"` all map to the same hash values. The conversion is
//! spelled out here instead of relying on [`Hash`](std::hash::Hash), whose output depends on the
//! concrete type.

use std::borrow::Cow;
use std::net::IpAddr;
use std::net::Ipv4Addr;
use std::net::Ipv6Addr;

/// Types that can be normalized into the canonical string form used for hashing.
///
/// Strings are taken verbatim. Numbers, booleans, characters and IP addresses use their
/// [`Display`](std::fmt::Display) form.
///
/// # Examples
///
/// ```
/// use approxset::canonical::CanonicalString;
///
/// assert_eq!("admin123".to_canonical_string(), "admin123");
/// assert_eq!(42_u64.to_canonical_string(), "42");
/// assert_eq!(true.to_canonical_string(), "true");
/// ```
pub trait CanonicalString {
    /// Returns the canonical string form of this value.
    fn to_canonical_string(&self) -> Cow<'_, str>;
}

/// Returns the canonical string form of `item`.
///
/// Free-function spelling of [`CanonicalString::to_canonical_string`].
pub fn to_canonical_string<T: CanonicalString + ?Sized>(item: &T) -> Cow<'_, str> {
    item.to_canonical_string()
}

impl CanonicalString for str {
    fn to_canonical_string(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl CanonicalString for String {
    fn to_canonical_string(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl CanonicalString for Cow<'_, str> {
    fn to_canonical_string(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_ref())
    }
}

impl<T: CanonicalString + ?Sized> CanonicalString for &T {
    fn to_canonical_string(&self) -> Cow<'_, str> {
        (**self).to_canonical_string()
    }
}

impl<T: CanonicalString + ?Sized> CanonicalString for Box<T> {
    fn to_canonical_string(&self) -> Cow<'_, str> {
        (**self).to_canonical_string()
    }
}

macro_rules! impl_canonical_via_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl CanonicalString for $ty {
                fn to_canonical_string(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )*
    };
}

impl_canonical_via_display!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, bool, char,
    IpAddr, Ipv4Addr, Ipv6Addr,
);
