#![forbid(unsafe_code)]

//! # rolling-log
//!
//! Writes one log line through the default logger.
//!
//! ## Usage
//!
//! ```bash
//! rolling-log --level debug --file ./tmp/test.log info hello world
//! rolling-log --file ./tmp/app.log --rolling size --interval 10240 warn disk low
//! rolling-log --format '{}\n' error "request failed"
//! rolling-log --fatal shutting down          # exits with status 1
//! rolling-log --lazy --file ./tmp/app.log info opened on first write
//! ```
//!
//! Set `RUST_LOG=rolling_log=debug` to see file opens and rotations on
//! stderr.

use clap::Parser;
use rolling_log::{CallSite, ConfigError, Level, default_logger};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "rolling-log", version, about = "Write a line through rolling_log")]
struct Cli {
    /// Minimum level to emit (debug, info, warn, error).
    #[arg(long, env = "ROLLING_LOG_LEVEL", default_value = "info")]
    level: String,

    /// Log file path. Standard output when omitted.
    #[arg(long)]
    file: Option<String>,

    /// Rolling mode (time, size). Requires --file.
    #[arg(long, requires = "file")]
    rolling: Option<String>,

    /// Rolling interval in seconds (time) or bytes (size).
    #[arg(long, default_value_t = rolling_log::MINUTE, allow_negative_numbers = true)]
    interval: i64,

    /// Format string with `{}` placeholders; the message words fill them in
    /// order and no newline is added.
    #[arg(long)]
    format: Option<String>,

    /// Log at error level and exit with status 1.
    #[arg(long)]
    fatal: bool,

    /// Open the log file on the first write instead of up front. A file
    /// that cannot be opened then aborts the process.
    #[arg(long, requires = "file")]
    lazy: bool,

    /// Level of the line followed by the message words, or only the words
    /// with --fatal.
    words: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = configure(&cli) {
        eprintln!("rolling-log: {err}");
        std::process::exit(2);
    }

    let site = CallSite::caller();
    let logger = default_logger();
    let (level, words) = if cli.fatal {
        (Level::Error, cli.words.as_slice())
    } else {
        match cli.words.split_first() {
            Some((first, rest)) => match first.parse::<Level>() {
                Ok(level) => (level, rest),
                Err(_) => (Level::Info, cli.words.as_slice()),
            },
            None => (Level::Info, &[][..]),
        }
    };

    let (msg, line_feed) = match &cli.format {
        Some(format) => (fill_placeholders(format, words), false),
        None => (words.join(" "), true),
    };

    if cli.fatal {
        if line_feed {
            logger.fatal(&[&msg]);
        }
        logger.fatalf(format_args!("{msg}"));
    }
    logger.log(level, site, msg, line_feed);
}

fn configure(cli: &Cli) -> Result<(), ConfigError> {
    let logger = default_logger();
    logger.try_set_level(&cli.level)?;
    if let Some(file) = &cli.file {
        logger.try_set_log_file(file)?;
    }
    if let Some(rolling) = &cli.rolling {
        logger.try_set_rolling(rolling, cli.interval)?;
    }
    if cli.file.is_some() && !cli.lazy {
        logger.open()?;
    }
    Ok(())
}

/// Replaces each `{}` in `format` with the next word; `\n` and `\t` escapes
/// are expanded.
fn fill_placeholders(format: &str, words: &[String]) -> String {
    let format = format.replace("\\n", "\n").replace("\\t", "\t");
    let mut out = String::with_capacity(format.len());
    let mut words = words.iter();
    let mut rest = format.as_str();
    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        if let Some(word) = words.next() {
            out.push_str(word);
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_placeholders() {
        let words = vec!["5".to_string(), "x".to_string()];
        assert_eq!(fill_placeholders("{}-{}\\n", &words), "5-x\n");
        assert_eq!(fill_placeholders("{} {} {}", &words), "5 x ");
        assert_eq!(fill_placeholders("plain", &words), "plain");
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "rolling-log",
            "--file",
            "a.log",
            "--rolling",
            "size",
            "--interval",
            "2048",
            "warn",
            "disk",
        ])
        .unwrap();
        assert_eq!(cli.rolling.as_deref(), Some("size"));
        assert_eq!(cli.interval, 2048);
        assert_eq!(cli.words, ["warn", "disk"]);
    }

    #[test]
    fn test_rolling_requires_file() {
        assert!(Cli::try_parse_from(["rolling-log", "--rolling", "time"]).is_err());
    }
}
