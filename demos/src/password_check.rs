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

//! Checks candidate passwords against a Bloom filter of passwords already in use.

use anyhow::Context;
use approxset::bloom::BloomFilter;
use approxset::password::check_password_uniqueness;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(about = "Check whether candidate passwords were used before")]
struct Args {
    /// Number of bits in the filter.
    #[arg(long, default_value_t = 1000)]
    size: u64,

    /// Number of hash functions.
    #[arg(long, default_value_t = 3)]
    num_hashes: u16,

    /// Passwords that are already in use (comma separated).
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = ["password123", "admin123", "qwerty123"].map(String::from)
    )]
    existing: Vec<String>,

    /// Candidate passwords to check, in order.
    #[arg(default_values_t = ["password123", "newpassword", "admin123", "guest"].map(String::from))]
    candidates: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut filter = BloomFilter::new(args.size, args.num_hashes)
        .context("failed to create the password filter")?;
    for password in &args.existing {
        filter.add(password);
    }

    for (password, status) in check_password_uniqueness(&mut filter, &args.candidates) {
        println!("Password '{password}' - {status}.");
    }

    println!();
    println!("Bits used: {} of {}", filter.bits_used(), filter.capacity());
    println!("Est. FPP: {:.4}%", filter.estimated_fpp() * 100.0);
    Ok(())
}
