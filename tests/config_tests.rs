//! Configuration tests
//!
//! These tests verify:
//! - Allow-listed keys and rejection of everything else
//! - Validate-only mode never mutates a logger
//! - Failed configuration leaves prior state untouched
//! - Multi-block configuration is all-or-nothing

mod common;

use common::CaptureHandler;
use logging_facade::handlers::RollPolicy;
use logging_facade::{
    configure, configure_json, configure_many, get_logger, Level, LoggerConfig, LoggerError,
    SharedHandler,
};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_round_trip_console_debug() {
    let logger = configure(
        &json!({"node": "cfg.roundtrip", "console": true, "level": "debug"}),
        false,
        false,
    )
    .unwrap();

    let looked_up = get_logger("cfg.roundtrip");
    assert!(std::sync::Arc::ptr_eq(&logger, &looked_up));
    assert!(looked_up.is_loggable(Level::Debug));
    assert!(!looked_up.is_loggable(Level::Trace));
    let handlers = looked_up.handlers();
    assert_eq!(handlers.len(), 1);
    assert_eq!(handlers[0].name(), "console");
    assert!(looked_up.use_parent_handlers());
}

#[test]
fn test_unknown_key_lists_offender() {
    let err = configure(&json!({"bogus": 1}), false, false).unwrap_err();
    match err {
        LoggerError::InvalidConfig { ref message } => assert!(message.contains("bogus")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unrecognized_roll_value() {
    let err = configure(&json!({"roll": "xyz", "filename": "a.log"}), false, false).unwrap_err();
    assert!(matches!(err, LoggerError::InvalidConfig { .. }));
    assert!(err.to_string().contains("xyz"));
}

#[test]
fn test_unknown_level() {
    let err = configure(&json!({"node": "cfg.badlevel", "level": "chatty"}), false, false)
        .unwrap_err();
    assert!(matches!(err, LoggerError::InvalidConfig { .. }));
    assert!(err.to_string().contains("chatty"));
}

#[test]
fn test_level_and_roll_case_insensitive() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("case.log");
    let logger = configure(
        &json!({
            "node": "cfg.case",
            "filename": path.to_str().unwrap(),
            "roll": "TuEsDaY",
            "level": "ERROR"
        }),
        false,
        false,
    )
    .unwrap();
    assert_eq!(logger.level(), Some(Level::Error));
    assert_eq!(logger.handlers()[0].name(), "file");
}

#[test]
fn test_defaults_applied() {
    let logger = configure(&json!({"node": "cfg.defaults"}), false, false).unwrap();
    assert_eq!(logger.level(), Some(Level::Warning));
    assert!(logger.handlers().is_empty());
    assert!(logger.use_parent_handlers());
}

#[test]
fn test_validate_only_never_mutates() {
    let logger = get_logger("cfg.preflight");
    logger.set_level(Level::Fatal);
    logger.set_use_parent_handlers(false);
    let (capture, _) = CaptureHandler::new();
    let existing = SharedHandler::new(capture);
    logger.add_handler(existing.clone());

    // valid block
    let returned = configure(
        &json!({"node": "cfg.preflight", "console": true, "level": "trace", "use_parents": true}),
        true,
        false,
    )
    .unwrap();
    assert!(std::sync::Arc::ptr_eq(&returned, &logger));

    // invalid blocks
    assert!(configure(&json!({"node": "cfg.preflight", "level": "nope"}), true, false).is_err());
    assert!(configure(&json!({"node": "cfg.preflight", "extra": 1}), true, false).is_err());

    assert_eq!(logger.level(), Some(Level::Fatal));
    assert!(!logger.use_parent_handlers());
    assert_eq!(logger.handlers(), vec![existing]);
}

#[test]
fn test_validate_only_does_not_create_files() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("never_written.log");
    configure(
        &json!({"node": "cfg.nofile", "filename": path.to_str().unwrap(), "roll": "daily"}),
        true,
        false,
    )
    .unwrap();
    assert!(!path.exists());
}

#[test]
fn test_validate_only_resolves_cached_logger_untouched() {
    let name = "cfg.preflight.fresh";
    assert!(!logging_facade::logger_names().iter().any(|n| n == name));

    let logger = configure(&json!({"node": name, "console": true, "level": "debug"}), true, false)
        .unwrap();

    assert!(logging_facade::logger_names().iter().any(|n| n == name));
    assert!(std::sync::Arc::ptr_eq(&logger, &get_logger(name)));
    assert_eq!(logger.level(), None);
    assert!(logger.handlers().is_empty());
    assert!(logger.use_parent_handlers());
}

#[test]
fn test_rejected_config_keeps_prior_state() {
    let logger = configure(
        &json!({"node": "cfg.keep", "console": true, "level": "info", "use_parents": false}),
        false,
        false,
    )
    .unwrap();
    let before = logger.handlers();

    let err = configure(
        &json!({"node": "cfg.keep", "console": false, "level": "bad"}),
        false,
        false,
    );
    assert!(err.is_err());

    assert_eq!(logger.handlers(), before);
    assert_eq!(logger.level(), Some(Level::Info));
    assert!(!logger.use_parent_handlers());
}

#[test]
fn test_reconfigure_replaces_handlers() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("replace.log");

    let logger = configure(
        &json!({"node": "cfg.replace", "console": true, "filename": path.to_str().unwrap()}),
        false,
        false,
    )
    .unwrap();
    assert_eq!(logger.handlers().len(), 2);

    configure(&json!({"node": "cfg.replace", "console": true}), false, false).unwrap();
    let handlers = logger.handlers();
    assert_eq!(handlers.len(), 1);
    assert_eq!(handlers[0].name(), "console");
}

#[test]
fn test_file_config_writes_truncated_utc_lines() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("truncated.log");

    let logger = configure(
        &json!({
            "node": "cfg.truncate",
            "filename": path.to_str().unwrap(),
            "utc": true,
            "truncate": 10,
            "level": "info",
            "use_parents": false
        }),
        false,
        false,
    )
    .unwrap();
    logger.info("0123456789abcdef").unwrap();
    logger.debug("filtered").unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.contains("Z] [INFO    ] cfg.truncate: 0123456789...\n"));
}

#[test]
fn test_nested_blocks_tolerated_when_allowed() {
    let block = json!({"node": "cfg.nested", "level": "info", "throttle": {"per_second": 5}});
    assert!(configure(&block, false, false).is_err());
    let logger = configure(&block, false, true).unwrap();
    assert_eq!(logger.level(), Some(Level::Info));
}

#[test]
fn test_configure_many_is_all_or_nothing() {
    let a = get_logger("cfg.many.a");
    a.set_level(Level::Fatal);

    let result = configure_many(
        &[
            json!({"node": "cfg.many.a", "level": "debug"}),
            json!({"node": "cfg.many.b", "roll": "xyz", "filename": "b.log"}),
        ],
        false,
    );
    assert!(result.is_err());
    assert_eq!(a.level(), Some(Level::Fatal));

    let loggers = configure_many(
        &[
            json!({"node": "cfg.many.a", "level": "debug"}),
            json!({"node": "cfg.many.b", "level": "error"}),
        ],
        false,
    )
    .unwrap();
    assert_eq!(loggers.len(), 2);
    assert_eq!(a.level(), Some(Level::Debug));
    assert_eq!(get_logger("cfg.many.b").level(), Some(Level::Error));
}

#[test]
fn test_configure_json_text() {
    let loggers = configure_json(
        r#"[{"node": "cfg.json.a", "level": "trace"}, {"node": "cfg.json.b"}]"#,
        false,
        false,
    )
    .unwrap();
    assert_eq!(loggers.len(), 2);
    assert_eq!(get_logger("cfg.json.a").level(), Some(Level::Trace));
    assert_eq!(get_logger("cfg.json.b").level(), Some(Level::Warning));

    let err = configure_json("{not json", false, false).unwrap_err();
    assert!(matches!(err, LoggerError::Json(_)));
}

#[test]
fn test_programmatic_config() {
    let temp_dir = TempDir::new().unwrap();
    let logger = LoggerConfig::new()
        .with_node("cfg.builder")
        .with_file(temp_dir.path().join("b.log"), RollPolicy::Hourly)
        .with_level(Level::Critical)
        .with_use_parents(false)
        .apply(false)
        .unwrap();
    assert_eq!(logger.level(), Some(Level::Critical));
    assert_eq!(logger.handlers().len(), 1);
    assert!(!logger.use_parent_handlers());
}
