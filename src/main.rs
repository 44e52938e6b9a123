// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::time::Instant;

use anyhow::{Context, Result};
use comps::config::{load_and_validate_config, FunctionRegistry, Runtime};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <run1.yaml> [run2.yaml ...]", program);
    eprintln!("       {} --functions", program);
    eprintln!("Example: {} configs/sum-of-even-squares.yaml", program);
    eprintln!("Log level is read from RUST_LOG (default: info)");
}

fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("comps");

    if args.len() == 2 && args[1] == "--functions" {
        for name in FunctionRegistry::list_available_functions() {
            println!("{}", name);
        }
        return;
    }

    if args.len() < 2 {
        print_usage(program);
        std::process::exit(1);
    }

    let mut failures = 0;
    for (i, config_file) in args[1..].iter().enumerate() {
        if i > 0 {
            println!("{}", "─".repeat(60));
        }
        if let Err(e) = run_single_config(config_file) {
            eprintln!("Failed to execute {}: {:#}", config_file, e);
            failures += 1;
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }
}

fn run_single_config(config_file: &str) -> Result<()> {
    let start_time = Instant::now();

    let config = load_and_validate_config(config_file)
        .with_context(|| format!("loading {}", config_file))?;

    println!("Run definition: {}", config_file);
    println!("Kind: {}", config.kind.as_str());
    println!("Strategy: {}", config.strategy);

    let value = Runtime::execute(&config).context("executing run")?;

    println!("Result: {}", value);
    println!("Elapsed: {:.2?}", start_time.elapsed());
    Ok(())
}
