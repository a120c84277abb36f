use crate::config::{Config, DEFAULT_CONFIG_TEMPLATE};
use std::io::Write;

#[test]
fn defaults_are_sane() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.api.model, "openai/gpt-4o-mini");
    assert_eq!(config.api.timeout_secs, 90);
    assert_eq!(config.api.max_tokens, 1500);
    assert_eq!(config.analysis.default_monthly_bill_usd, 150.0);
}

#[test]
fn empty_file_yields_defaults() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config.api.base_url, Config::default().api.base_url);
    assert_eq!(config.server.port, Config::default().server.port);
}

#[test]
fn partial_file_keeps_unmentioned_defaults() {
    let config: Config = toml::from_str(
        r#"
        [api]
        model = "anthropic/claude-sonnet-4"

        [server]
        port = 9000
        "#,
    )
    .unwrap();
    assert_eq!(config.api.model, "anthropic/claude-sonnet-4");
    assert_eq!(config.api.max_tokens, 1500); // default retained
    assert_eq!(config.server.port, 9000);
}

#[test]
fn validation_rejects_nonsense() {
    let mut config = Config::default();
    config.api.model = "  ".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.api.base_url = "ftp://example.com".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.api.timeout_secs = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.analysis.default_monthly_bill_usd = -1.0;
    assert!(config.validate().is_err());
}

#[test]
fn load_reads_an_explicit_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[analysis]\ndefault_monthly_bill_usd = 80.0").unwrap();

    let config = Config::load(file.path().to_str()).unwrap();
    assert_eq!(config.analysis.default_monthly_bill_usd, 80.0);
}

#[test]
fn default_template_parses_to_defaults() {
    let config: Config = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.api.model, Config::default().api.model);
}
