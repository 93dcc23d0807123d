//! Tests for the process-wide default logger and the crate macros.
//!
//! The default logger is global, so everything that reconfigures it lives in
//! this one test binary and in a single test.

use rolling_log::{
    Level, Rolling, debug, debugf, default_logger, error, errorf, info, infof, warn, warnf,
};
use std::fs;
use tempfile::TempDir;

#[test]
fn macros_write_through_the_default_logger() {
    let logger = default_logger();
    assert_eq!(logger.level(), Level::Info);
    assert_eq!(logger.rolling(), Rolling::None);
    assert!(logger.log_file().is_none());

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tmp/test.log");
    logger.set_log_file(path.to_str().unwrap());

    debug!("Debug", "log");
    debugf!("{}-{}\n", "Debugf", "log");
    info!("Info", "log");
    let info_line = line!() - 1;
    infof!("{}-{}\n", "Infof", "log");
    warn!("Warn", "log");
    warnf!("{}-{}", "Warnf", "log");
    error!("Error", 42);
    errorf!("{}-{}\n", "Errorf", "log");

    let contents = fs::read_to_string(&path).unwrap();
    assert!(!contents.contains("Debug"), "debug is below the default level");
    assert!(contents.contains(&format!("default_logger.rs:{info_line} Infolog")));
    assert!(contents.contains(" Infof-log\n\x1b[0m"));
    assert!(contents.contains(" Warnlog\x1b[0m\n"));
    // warnf adds no newline, so errorf continues on the same line.
    assert!(contents.contains(" Warnf-log\x1b[0m\x1b[31;3m[E|"));
    assert!(contents.contains(" Error42\x1b[0m\n"));

    logger.set_level("debug");
    debug!("now visible");
    assert!(fs::read_to_string(&path).unwrap().contains(" now visible"));
}
