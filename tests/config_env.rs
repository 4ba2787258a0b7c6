//! Environment-driven configuration behavior
//!
//! Mutating process-wide environment variables is unsafe under the
//! multi-threaded test harness, so each case re-executes itself in a child
//! process with the variables set and performs its assertions there.

use std::env;
use std::path::PathBuf;
use std::process::Command;

use blockledger::config::Config;

const CHILD_MARKER: &str = "BLOCKLEDGER_TEST_CHILD";

fn in_child() -> bool {
    env::var(CHILD_MARKER).is_ok()
}

/// Re-run the named test in a child process with the given environment.
fn run_in_child(test_name: &str, envs: &[(&str, &str)]) {
    let exe = env::current_exe().unwrap();
    let mut command = Command::new(exe);
    command
        .arg(test_name)
        .arg("--exact")
        .arg("--nocapture")
        .env(CHILD_MARKER, "1");
    for (key, value) in envs {
        command.env(key, value);
    }

    let status = command.status().unwrap();
    assert!(status.success(), "child assertions failed for {test_name}");
}

/// Config loaded from a path that does not exist: defaults plus whatever the
/// environment layers on top.
fn load_with_defaults() -> Config {
    Config::load_from_path(PathBuf::from("does_not_exist.toml")).unwrap()
}

#[test]
fn test_env_layer_overrides_defaults() {
    if in_child() {
        let config = load_with_defaults();
        assert_eq!(config.retention.keep_archives, 5);
        assert_eq!(config.enrichment.pause_ms, 1500);
        assert_eq!(config.archive.keyword, "export");
        return;
    }

    run_in_child(
        "test_env_layer_overrides_defaults",
        &[
            ("BLOCKLEDGER__RETENTION__KEEP_ARCHIVES", "5"),
            ("BLOCKLEDGER__ENRICHMENT__PAUSE_MS", "1500"),
            ("BLOCKLEDGER__ARCHIVE__KEYWORD", "export"),
        ],
    );
}

#[test]
fn test_token_survives_explicit_config_path() {
    if in_child() {
        let config = load_with_defaults();
        assert_eq!(config.enrichment.token.as_deref(), Some("env-token"));
        return;
    }

    run_in_child(
        "test_token_survives_explicit_config_path",
        &[("IPINFO_TOKEN", "env-token")],
    );
}

#[test]
fn test_prefixed_token_used_when_primary_absent() {
    if in_child() {
        let config = load_with_defaults();
        assert_eq!(config.enrichment.token.as_deref(), Some("prefixed-token"));
        return;
    }

    run_in_child(
        "test_prefixed_token_used_when_primary_absent",
        &[("BLOCKLEDGER_ENRICHMENT_TOKEN", "prefixed-token")],
    );
}

#[test]
fn test_primary_token_wins_over_prefixed() {
    if in_child() {
        let config = load_with_defaults();
        assert_eq!(config.enrichment.token.as_deref(), Some("primary"));
        return;
    }

    run_in_child(
        "test_primary_token_wins_over_prefixed",
        &[
            ("IPINFO_TOKEN", "primary"),
            ("BLOCKLEDGER_ENRICHMENT_TOKEN", "secondary"),
        ],
    );
}
