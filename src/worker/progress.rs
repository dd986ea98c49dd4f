//! Aggregation and display of attempt counts from all workers.

use std::io::{self, Write};

use crossbeam_channel::Receiver;

/// Merges per-worker attempt counts into a running total.
pub struct ProgressAggregator {
    progress_rx: Receiver<u64>,
    /// Expected attempts for the longest prefix, fixed for the whole search
    estimate: f64,
    quiet: bool,
}

impl ProgressAggregator {
    pub fn new(progress_rx: Receiver<u64>, estimate: f64, quiet: bool) -> Self {
        Self {
            progress_rx,
            estimate,
            quiet,
        }
    }

    /// Consumes reports until every worker has hung up, then returns the
    /// total number of attempts.
    pub fn run(self) -> u64 {
        let mut total = 0u64;
        let stderr = io::stderr();

        for count in self.progress_rx.iter() {
            total = total.saturating_add(count);
            if !self.quiet {
                let mut out = stderr.lock();
                let _ = write!(out, "\r\x1b[K{}", format_progress(total, self.estimate));
                let _ = out.flush();
            }
        }

        if !self.quiet && total > 0 {
            let _ = writeln!(stderr.lock());
        }
        total
    }
}

/// Formats the status line, e.g. `Tried 1.50K (~9.16%)`.
pub fn format_progress(total: u64, estimate: f64) -> String {
    let percent = if estimate > 0.0 {
        total as f64 / estimate * 100.0
    } else {
        0.0
    };
    format!("Tried {} (~{:.2}%)", format_number(total), percent)
}

/// Formats large counts with K/M/B suffixes.
pub fn format_number(n: u64) -> String {
    if n >= 1_000_000_000 {
        format!("{:.2}B", n as f64 / 1_000_000_000.0)
    } else if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.2}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}
