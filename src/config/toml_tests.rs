//! Tests for TOML configuration parsing.

use super::ConfigError;
use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.server.listen.is_none());
        assert!(config.upstream.url.is_none());
    }

    #[test]
    fn parse_server_section() {
        let toml = r#"
            [server]
            listen = "0.0.0.0:9000"
            grace_period = 10
            runtime_mode = "debug"
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(config.server.listen.as_deref(), Some("0.0.0.0:9000"));
        assert_eq!(config.server.grace_period, Some(10));
        assert_eq!(config.server.runtime_mode.as_deref(), Some("debug"));
    }

    #[test]
    fn parse_upstream_section() {
        let toml = r#"
            [upstream]
            url = "https://hooks.example.com/api/"
            user_agent = ""
            accept = "text/plain"
            content_type = "application/xml"
            timeout = 5
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        let upstream = &config.upstream;

        assert_eq!(
            upstream.url.as_deref(),
            Some("https://hooks.example.com/api/")
        );
        assert_eq!(upstream.user_agent.as_deref(), Some(""));
        assert_eq!(upstream.accept.as_deref(), Some("text/plain"));
        assert_eq!(upstream.content_type.as_deref(), Some("application/xml"));
        assert_eq!(upstream.timeout, Some(5));
    }
}

mod errors {
    use super::*;

    #[test]
    fn unknown_section_is_rejected() {
        let result = TomlConfig::parse("[webhook]\nurl = \"https://example.com\"");

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let result = TomlConfig::parse("[server]\nport = 80");

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn wrong_type_is_rejected() {
        let result = TomlConfig::parse("[server]\ngrace_period = \"two\"");

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = TomlConfig::load(&dir.path().join("absent.toml"));

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }
}

mod template {
    use super::*;

    #[test]
    fn default_template_parses() {
        let config = TomlConfig::parse(&default_config_template()).unwrap();

        assert_eq!(config.server.listen.as_deref(), Some("127.0.0.1:8080"));
        assert_eq!(config.server.grace_period, Some(2));
        assert!(config.upstream.url.is_none());
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hookkit.toml");
        std::fs::write(&path, "[upstream]\ntimeout = 7\n").unwrap();

        let config = TomlConfig::load(&path).unwrap();

        assert_eq!(config.upstream.timeout, Some(7));
    }
}
