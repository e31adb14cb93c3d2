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

//! Access-log lines in the common log format.
//!
//! ```text
//! 203.0.113.7 - - [12/Mar/2024:08:15:02 +0000] "GET /login HTTP/1.1" 302 1432
//! ```

use std::io::BufRead;
use std::net::Ipv4Addr;
use std::sync::LazyLock;

use approxset::common::RandomSource;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use regex::Regex;

const METHODS: [&str; 4] = ["GET", "POST", "PUT", "DELETE"];
const PATHS: [&str; 5] = ["/index.html", "/login", "/dashboard", "/contact", "/logout"];
const STATUSES: [u16; 4] = [200, 302, 404, 500];
const WINDOW_SECONDS: u64 = 30 * 24 * 60 * 60;

/// The first run of four dot-separated 1-3 digit groups on a word boundary.
static IPV4_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:\d{1,3}\.){3}\d{1,3}\b").expect("IPv4 candidate pattern is valid")
});

/// Returns the first dotted-quad candidate of `line` if it is a valid IPv4 address.
///
/// Only the first candidate is considered; a line whose first candidate is out of range
/// (e.g. `300.1.1.1`) yields `None`. A longer dotted run such as `1.2.3.4.5` yields its
/// leading quad, and a quad glued to a preceding letter or digit is not a candidate.
pub fn extract_ipv4(line: &str) -> Option<Ipv4Addr> {
    IPV4_CANDIDATE.find(line)?.as_str().parse().ok()
}

/// Streams the IPv4 address of every line that has one.
///
/// Invalid UTF-8 is replaced rather than rejected; lines without an address are skipped.
pub fn read_ips<R: BufRead>(reader: R) -> impl Iterator<Item = std::io::Result<Ipv4Addr>> {
    reader.split(b'\n').filter_map(|line| match line {
        Ok(bytes) => extract_ipv4(&String::from_utf8_lossy(&bytes)).map(Ok),
        Err(err) => Some(Err(err)),
    })
}

/// Produces random access-log lines.
#[derive(Debug)]
pub struct LogLineGenerator<R> {
    rng: R,
    now: DateTime<Utc>,
}

impl<R: RandomSource> LogLineGenerator<R> {
    /// Creates a generator whose timestamps fall in the 30 days before `now`.
    pub fn new(rng: R, now: DateTime<Utc>) -> Self {
        Self { rng, now }
    }

    /// Returns the next log line, without a trailing newline.
    pub fn next_line(&mut self) -> String {
        let ip = Ipv4Addr::from(self.rng.next_u64() as u32);
        let offset = self.rng.next_in_range(0, WINDOW_SECONDS) as i64;
        let timestamp = self.now - Duration::days(30) + Duration::seconds(offset);
        let method = self.rng.choose(&METHODS).copied().unwrap_or("GET");
        let path = self.rng.choose(&PATHS).copied().unwrap_or("/");
        let status = self.rng.choose(&STATUSES).copied().unwrap_or(200);
        let size = self.rng.next_in_range(100, 5000);

        format!(
            "{ip} - - [{}] \"{method} {path} HTTP/1.1\" {status} {size}",
            timestamp.format("%d/%b/%Y:%H:%M:%S +0000")
        )
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use approxset::common::XorShift64;
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_extract_from_log_line() {
        let line = r#"10.1.2.3 - - [12/Mar/2024:08:15:02 +0000] "GET /login HTTP/1.1" 302 1432"#;
        assert_eq!(extract_ipv4(line), Some(Ipv4Addr::new(10, 1, 2, 3)));
    }

    #[test]
    fn test_extract_skips_non_quads() {
        assert_eq!(
            extract_ipv4("build 1.2.3 from 192.168.0.10."),
            Some(Ipv4Addr::new(192, 168, 0, 10))
        );
        assert_eq!(extract_ipv4("no address here"), None);
        assert_eq!(extract_ipv4(""), None);
    }

    #[test]
    fn test_extract_rejects_out_of_range() {
        assert_eq!(extract_ipv4("300.1.1.1 - - [x]"), None);
        assert_eq!(extract_ipv4("1234.1.1.1 then 8.8.8.8"), Some(Ipv4Addr::new(8, 8, 8, 8)));
    }

    #[test]
    fn test_extract_takes_leading_quad_of_longer_run() {
        assert_eq!(extract_ipv4("1.2.3.4.5 - - [x]"), Some(Ipv4Addr::new(1, 2, 3, 4)));
        assert_eq!(extract_ipv4("10.0.0.1.99 GET"), Some(Ipv4Addr::new(10, 0, 0, 1)));
    }

    #[test]
    fn test_extract_requires_word_boundary() {
        assert_eq!(extract_ipv4("v10.0.0.1 x"), None);
        assert_eq!(extract_ipv4("host=a10.0.0.2"), None);
        assert_eq!(extract_ipv4("host=10.0.0.2"), Some(Ipv4Addr::new(10, 0, 0, 2)));
    }

    #[test]
    fn test_read_ips_skips_garbage() {
        let input = b"1.1.1.1 - a\n\xff\xfe junk\n\n2.2.2.2 - b\n1.1.1.1 - c";
        let ips: Vec<Ipv4Addr> = read_ips(Cursor::new(&input[..]))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(
            ips,
            vec![
                Ipv4Addr::new(1, 1, 1, 1),
                Ipv4Addr::new(2, 2, 2, 2),
                Ipv4Addr::new(1, 1, 1, 1),
            ]
        );
    }

    #[test]
    fn test_generated_lines_parse() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
        let window_start = now - Duration::days(30);
        let mut generator = LogLineGenerator::new(XorShift64::seeded(1), now);

        for _ in 0..200 {
            let line = generator.next_line();
            assert!(extract_ipv4(&line).is_some(), "{line}");
            assert!(line.contains(" HTTP/1.1\" "), "{line}");

            let open = line.find('[').unwrap();
            let close = line.find(']').unwrap();
            let timestamp =
                DateTime::parse_from_str(&line[open + 1..close], "%d/%b/%Y:%H:%M:%S %z")
                    .unwrap()
                    .with_timezone(&Utc);
            assert!(timestamp >= window_start && timestamp <= now, "{line}");

            let size: u64 = line.rsplit(' ').next().unwrap().parse().unwrap();
            assert!((100..=5000).contains(&size), "{line}");
        }
    }

    #[test]
    fn test_generator_is_reproducible() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
        let mut a = LogLineGenerator::new(XorShift64::seeded(9), now);
        let mut b = LogLineGenerator::new(XorShift64::seeded(9), now);
        for _ in 0..10 {
            assert_eq!(a.next_line(), b.next_line());
        }
    }
}
