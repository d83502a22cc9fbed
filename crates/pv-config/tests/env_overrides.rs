//! Environment and file layering, sandboxed with `figment::Jail`.

use figment::Jail;
use pretty_assertions::assert_eq;
use pv_config::PvConfig;

#[test]
fn plain_deployment_variables_fill_config() {
    Jail::expect_with(|jail| {
        jail.set_env("DATABASE_URL", "sqlite:///students.db");
        jail.set_env("RISK_MODEL_PATH", "model/risk_model.json");
        jail.set_env("PORT", "8088");

        let config = PvConfig::load(None).map_err(|e| e.to_string())?;
        assert_eq!(config.database.url, "sqlite:///students.db");
        assert_eq!(config.database.local_path(), "students.db");
        assert_eq!(config.model.path, "model/risk_model.json");
        assert_eq!(config.server.port, 8088);
        Ok(())
    });
}

#[test]
fn prefixed_variables_beat_plain_ones() {
    Jail::expect_with(|jail| {
        jail.set_env("DATABASE_URL", "plain.db");
        jail.set_env("PRAVARTAK_DATABASE__URL", "prefixed.db");
        jail.set_env("PRAVARTAK_BOOTSTRAP__SEED_DEMO_MENTORS", "false");

        let config = PvConfig::load(None).map_err(|e| e.to_string())?;
        assert_eq!(config.database.url, "prefixed.db");
        assert!(!config.bootstrap.seed_demo_mentors);
        Ok(())
    });
}

#[test]
fn project_toml_and_explicit_file_layer_in_order() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "pravartak.toml",
            r#"
[server]
host = "127.0.0.1"
port = 7000
cors_origins = ["http://localhost:5173"]

[model]
path = "from-project.json"
"#,
        )?;
        jail.create_file(
            "override.toml",
            r#"
[model]
path = "from-override.json"
"#,
        )?;

        let config = PvConfig::load(Some(std::path::Path::new("override.toml")))
            .map_err(|e| e.to_string())?;
        assert_eq!(config.server.bind_address(), "127.0.0.1:7000");
        assert_eq!(config.server.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.model.path, "from-override.json");
        Ok(())
    });
}

#[test]
fn invalid_port_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("PRAVARTAK_SERVER__PORT", "0");
        let result = PvConfig::load(None);
        assert!(result.is_err(), "port 0 should be rejected");
        Ok(())
    });
}
