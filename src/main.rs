//! Nano Vanity Generator CLI
//!
//! Usage:
//!   nano_vanity -p abc             # Find an address starting with nano_?abc
//!   nano_vanity -p abc,xyz -n 5    # Find 5 addresses matching either prefix
//!   nano_vanity -p abc -n 0 -q     # Keep searching quietly until Ctrl+C

use std::process;
use std::sync::atomic::Ordering;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use nano_vanity::worker::format_number;
use nano_vanity::{Config, Coordinator, OsSeedSource, SearchError, VanityMatch};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_thread_names(true)
        .init();

    let config = Config::parse();

    let prefixes = match config.prefix_set() {
        Ok(prefixes) => prefixes,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let coordinator = Coordinator::new(prefixes, config.search_options(), OsSeedSource);

    if !config.quiet {
        let prefixes = coordinator.prefixes();
        println!("Nano Vanity Generator");
        println!("=====================");
        println!("Prefixes:   {}", prefixes.prefixes().join(", "));
        println!("Difficulty: {}", prefixes.difficulty_description());
        println!(
            "Estimated number of iterations needed: {}",
            coordinator.estimated_iterations() as u64
        );
        println!("Workers:    {}", config.worker_count());
        println!();
    }

    let interrupt = coordinator.interrupt_flag();
    if let Err(e) = ctrlc::set_handler(move || interrupt.store(true, Ordering::Relaxed)) {
        warn!(error = %e, "could not install Ctrl-C handler");
    }

    match coordinator.run(config.count, print_result) {
        Ok(_) => {}
        Err(SearchError::Cancelled) => println!("\nStopped by user."),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn print_result(result: &VanityMatch) {
    println!("Found matching address!");
    println!("Seed:     {}", result.seed.to_hex());
    println!("Address:  {}", result.address);
    println!("Attempts: {}", format_number(result.attempts));
    println!();
}
