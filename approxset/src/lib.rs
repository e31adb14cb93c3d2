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

//! # approxset
//!
//! Two probabilistic approximate-set data structures that trade exactness for sublinear
//! memory:
//!
//! - [`bloom::BloomFilter`]: set membership with no false negatives and a bounded false
//!   positive rate, e.g. to detect previously seen passwords ([`password`]).
//! - [`hll::HyperLogLog`]: distinct-count estimation with relative error about
//!   `1.04 / sqrt(m)`, e.g. to count unique IP addresses in a log stream.
//!
//! Both are configured entirely through constructor parameters, reject invalid
//! configurations with [`error::ErrorKind::InvalidConfiguration`], and hash items through the
//! same [`canonical`] string form. Neither does internal locking.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

pub mod bloom;
pub mod canonical;
pub mod common;
pub mod error;
pub mod hash;
pub mod hll;
pub mod password;
