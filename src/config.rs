//! Runtime configuration for the vanity address generator.

use clap::Parser;

use crate::error::SearchError;
use crate::matcher::PrefixSet;
use crate::worker::SearchOptions;

/// Nano Vanity Generator
///
/// Generate wallet seeds with desirable public addresses.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Prefixes to search for at the start of address, comma separated
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub prefixes: Vec<String>,

    /// Number of valid addresses to generate before exiting (0 = run forever)
    #[arg(short = 'n', long, default_value = "1")]
    pub count: usize,

    /// Do not output progress messages
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,

    /// Number of worker threads (default: number of CPU cores)
    #[arg(short = 'w', long)]
    pub workers: Option<usize>,

    /// Attempts between progress reports of the first worker
    #[arg(long, default_value = "500")]
    pub progress_interval: u64,
}

impl Config {
    /// Returns the number of workers, defaulting to CPU count
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get).max(1)
    }

    /// Validates and normalizes the requested prefixes
    pub fn prefix_set(&self) -> Result<PrefixSet, SearchError> {
        PrefixSet::new(&self.prefixes)
    }

    /// Returns the engine options described by this configuration
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            workers: self.worker_count(),
            progress_interval: self.progress_interval,
            quiet: self.quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comma_separated_prefixes() {
        let config = Config::parse_from(["nano_vanity", "-p", "abc, xyz", "-n", "3", "-q"]);
        assert_eq!(config.count, 3);
        assert!(config.quiet);

        let set = config.prefix_set().unwrap();
        assert_eq!(set.prefixes(), &["abc".to_string(), "xyz".to_string()]);
    }

    #[test]
    fn test_invalid_prefix() {
        let config = Config::parse_from(["nano_vanity", "-p", "abc,l0l"]);
        assert!(matches!(
            config.prefix_set(),
            Err(SearchError::InvalidPrefixCharacter { ref prefix, .. }) if prefix == "l0l"
        ));
    }

    #[test]
    fn test_search_options() {
        let config = Config::parse_from(["nano_vanity", "-p", "a", "-w", "0"]);
        let options = config.search_options();
        assert_eq!(options.workers, 1);
        assert_eq!(options.progress_interval, 500);
        assert!(!options.quiet);
    }

    #[test]
    fn test_prefixes_required() {
        assert!(Config::try_parse_from(["nano_vanity"]).is_err());
    }
}
