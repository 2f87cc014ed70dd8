//! Command-line interface definitions.
//!
//! Every option has a default, so running the binary with no arguments
//! writes `index.html` in the working directory using the built-in
//! configuration.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the UWB news digest.
///
/// # Examples
///
/// ```sh
/// # Built-in sources and keywords, writes ./index.html
/// uwb_digest
///
/// # Custom configuration and output location, plus a JSON copy
/// uwb_digest -c digest.yaml -o public/index.html -j public/digest.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path of the HTML digest to write (overwritten on every run)
    #[arg(short, long, env = "UWB_DIGEST_OUTPUT", default_value = "index.html")]
    pub output: PathBuf,

    /// Optional YAML file overriding the built-in configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Optional path for a JSON copy of the digest
    #[arg(short, long)]
    pub json_output: Option<PathBuf>,

    /// Override the recency window in days
    #[arg(long)]
    pub lookback_days: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["uwb_digest"]);
        assert_eq!(cli.output, PathBuf::from("index.html"));
        assert!(cli.config.is_none());
        assert!(cli.json_output.is_none());
        assert!(cli.lookback_days.is_none());
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "uwb_digest",
            "-o",
            "/tmp/site/index.html",
            "-c",
            "digest.yaml",
            "-j",
            "/tmp/site/digest.json",
        ]);

        assert_eq!(cli.output, PathBuf::from("/tmp/site/index.html"));
        assert_eq!(cli.config, Some(PathBuf::from("digest.yaml")));
        assert_eq!(cli.json_output, Some(PathBuf::from("/tmp/site/digest.json")));
    }

    #[test]
    fn test_cli_lookback_override() {
        let cli = Cli::parse_from(["uwb_digest", "--lookback-days", "7"]);
        assert_eq!(cli.lookback_days, Some(7));
    }
}
