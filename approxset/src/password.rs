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

//! Password reuse detection on top of a [`BloomFilter`].
//!
//! Each candidate is classified as [`PasswordStatus::Invalid`] (empty or whitespace-only),
//! [`PasswordStatus::AlreadyUsed`] (the filter reports it present) or
//! [`PasswordStatus::Unique`]. Unique candidates are added to the filter immediately, so a
//! repeat later in the same batch is reported as already used.
//!
//! ```rust
//! use approxset::bloom::BloomFilter;
//! use approxset::password::PasswordStatus;
//! use approxset::password::check_password_uniqueness;
//!
//! let mut filter = BloomFilter::new(1000, 3).unwrap();
//! filter.add("password123");
//!
//! let results = check_password_uniqueness(&mut filter, ["password123", "hunter2", "  "]);
//! assert_eq!(results[0].1, PasswordStatus::AlreadyUsed);
//! assert_eq!(results[1].1, PasswordStatus::Unique);
//! assert_eq!(results[2].1, PasswordStatus::Invalid);
//! ```

use std::fmt;

use crate::bloom::BloomFilter;
use crate::error::Error;

/// Outcome of checking one candidate password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PasswordStatus {
    /// The candidate is empty or whitespace-only; it was not added to the filter.
    Invalid,
    /// The filter reports the candidate as (possibly) seen before.
    AlreadyUsed,
    /// The candidate was definitely not seen before; it has now been added.
    Unique,
}

impl PasswordStatus {
    /// Returns the status label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PasswordStatus::Invalid => "invalid",
            PasswordStatus::AlreadyUsed => "already-used",
            PasswordStatus::Unique => "unique",
        }
    }
}

impl fmt::Display for PasswordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checks that a candidate is usable as a password.
///
/// # Errors
///
/// Returns [`ErrorKind::InvalidInput`](crate::error::ErrorKind::InvalidInput) if the candidate
/// is empty or consists only of whitespace.
pub fn validate_candidate(candidate: &str) -> Result<&str, Error> {
    if candidate.is_empty() {
        return Err(Error::invalid_input("password must not be empty"));
    }
    if candidate.trim().is_empty() {
        return Err(Error::invalid_input("password must not be whitespace-only")
            .with_context("length", candidate.len()));
    }
    Ok(candidate)
}

/// Classifies one candidate against the filter, adding it when it is unique.
pub fn classify(filter: &mut BloomFilter, candidate: &str) -> PasswordStatus {
    match validate_candidate(candidate) {
        Err(_) => PasswordStatus::Invalid,
        Ok(candidate) => {
            if filter.contains_and_add(candidate) {
                PasswordStatus::AlreadyUsed
            } else {
                PasswordStatus::Unique
            }
        }
    }
}

/// Classifies every candidate in input order.
///
/// Returns one `(candidate, status)` pair per input, in the same order, so duplicate inputs
/// each get their own entry.
pub fn check_password_uniqueness<I, S>(
    filter: &mut BloomFilter,
    candidates: I,
) -> Vec<(String, PasswordStatus)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    candidates
        .into_iter()
        .map(|candidate| {
            let candidate = candidate.as_ref();
            let status = classify(filter, candidate);
            (candidate.to_string(), status)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn seeded_filter() -> BloomFilter {
        let mut filter = BloomFilter::new(1000, 3).unwrap();
        for password in ["password123", "admin123", "qwerty123"] {
            filter.add(password);
        }
        filter
    }

    #[test]
    fn test_reference_scenario() {
        let mut filter = seeded_filter();
        let results = check_password_uniqueness(
            &mut filter,
            ["password123", "newpassword", "admin123", "guest"],
        );

        let statuses: Vec<_> = results.iter().map(|(_, status)| *status).collect();
        assert_eq!(
            statuses,
            vec![
                PasswordStatus::AlreadyUsed,
                PasswordStatus::Unique,
                PasswordStatus::AlreadyUsed,
                PasswordStatus::Unique,
            ]
        );
        assert_eq!(results[3].0, "guest");
        assert!(filter.contains("guest"));
        assert!(filter.contains("newpassword"));
    }

    #[test]
    fn test_duplicates_within_batch() {
        let mut filter = BloomFilter::new(1000, 3).unwrap();
        let results = check_password_uniqueness(&mut filter, vec!["s3cret", "s3cret"]);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].1, PasswordStatus::Unique);
        assert_eq!(results[1].1, PasswordStatus::AlreadyUsed);
    }

    #[test]
    fn test_invalid_candidates_are_not_added() {
        let mut filter = BloomFilter::new(1000, 3).unwrap();
        let results = check_password_uniqueness(&mut filter, ["", "   ", "\t\n"]);
        assert!(results.iter().all(|(_, s)| *s == PasswordStatus::Invalid));
        assert!(filter.is_empty());
    }

    #[test]
    fn test_surrounding_whitespace_is_kept() {
        let mut filter = BloomFilter::new(1000, 3).unwrap();
        assert_eq!(classify(&mut filter, " pad "), PasswordStatus::Unique);
        assert!(filter.contains(" pad "));
    }

    #[test]
    fn test_validate_candidate() {
        assert_eq!(validate_candidate("ok").unwrap(), "ok");
        assert_eq!(
            validate_candidate("").unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
        let err = validate_candidate("  ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.context("length"), Some("2"));
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(PasswordStatus::Invalid.to_string(), "invalid");
        assert_eq!(PasswordStatus::AlreadyUsed.to_string(), "already-used");
        assert_eq!(PasswordStatus::Unique.to_string(), "unique");
    }
}
