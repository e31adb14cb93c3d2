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

//! Compares exact and HyperLogLog distinct-IP counts over an access log.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use approxset::hll::HyperLogLog;
use clap::Parser;
use demos::access_log::read_ips;

#[derive(Debug, Parser)]
#[command(about = "Count unique IPv4 addresses in an access log")]
struct Args {
    /// Log file to read.
    #[arg(default_value = "lms-stage-access.log")]
    path: PathBuf,

    /// HyperLogLog precision (4..=20).
    #[arg(long, default_value_t = 14)]
    precision: u8,
}

fn open(path: &Path) -> anyhow::Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn exact_unique_count(path: &Path) -> anyhow::Result<usize> {
    let mut seen = HashSet::new();
    for ip in read_ips(open(path)?) {
        seen.insert(ip?);
    }
    Ok(seen.len())
}

fn hll_unique_count(path: &Path, precision: u8) -> anyhow::Result<f64> {
    let mut hll = HyperLogLog::new(precision).context("invalid HyperLogLog precision")?;
    for ip in read_ips(open(path)?) {
        hll.add(&ip?);
    }
    Ok(hll.estimate())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let start = Instant::now();
    let exact = exact_unique_count(&args.path)?;
    let exact_time = start.elapsed();

    let start = Instant::now();
    let approx = hll_unique_count(&args.path, args.precision)?;
    let hll_time = start.elapsed();

    println!("\nComparison results:");
    println!("{:27}{:>18}   {:>12}", "", "Exact count", "HyperLogLog");
    println!("{:27}{:>18.1}   {:>12.1}", "Unique elements", exact as f64, approx);
    println!(
        "{:27}{:>18.3}   {:>12.3}",
        "Execution time (sec.)",
        exact_time.as_secs_f64(),
        hll_time.as_secs_f64()
    );
    Ok(())
}
