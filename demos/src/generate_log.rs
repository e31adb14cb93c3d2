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

//! Writes a synthetic access log for the unique-IP comparison.

use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use approxset::common::XorShift64;
use chrono::Utc;
use clap::Parser;
use demos::access_log::LogLineGenerator;

#[derive(Debug, Parser)]
#[command(about = "Generate a synthetic access log")]
struct Args {
    /// Output file.
    #[arg(long, default_value = "lms-stage-access.log")]
    output: PathBuf,

    /// Number of lines to write.
    #[arg(long, default_value_t = 1000)]
    lines: usize,

    /// Seed for reproducible output; a time-based seed is used when absent.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let rng = args.seed.map(XorShift64::seeded).unwrap_or_default();
    let mut generator = LogLineGenerator::new(rng, Utc::now());

    let file = File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    let mut writer = BufWriter::new(file);
    for _ in 0..args.lines {
        writeln!(writer, "{}", generator.next_line())?;
    }
    writer.flush()?;

    println!(
        "File '{}' created with {} log lines.",
        args.output.display(),
        args.lines
    );
    Ok(())
}
