//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Project config (docpages.toml, or the file named by DOCPAGES_CONFIG)
//! 3. Environment variables (DOCPAGES_* prefix)
//! 4. CLI overrides

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::types::{ConfigOverrides, DocumentationConfig};
use crate::constants::config::{CONFIG_FILE, CONFIG_PATH_ENV, ENV_PREFIX};
use crate::types::{DocError, Result};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with the full resolution chain and validate it.
    pub fn load(overrides: ConfigOverrides) -> Result<DocumentationConfig> {
        let config_path = Self::project_config_path();
        Self::load_from(&config_path, overrides)
    }

    /// Resolve configuration using `path` as the project file, if it exists.
    pub fn load_from(path: &Path, overrides: ConfigOverrides) -> Result<DocumentationConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(DocumentationConfig::default()));

        if path.exists() {
            debug!("Loading project config from: {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        // DOCPAGES_EXCLUDE_PRIVATE -> exclude_private; DOCPAGES_CONFIG names the file
        figment = figment
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]))
            .merge(Serialized::defaults(overrides));

        let config: DocumentationConfig = figment
            .extract()
            .map_err(|e| DocError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Project config file: `DOCPAGES_CONFIG` if set, else `docpages.toml`
    /// in the working directory.
    pub fn project_config_path() -> PathBuf {
        env::var(CONFIG_PATH_ENV)
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use figment::Jail;

    fn cli(package: &str, output: &str) -> ConfigOverrides {
        ConfigOverrides {
            package_name: Some(package.to_string()),
            output_dir: Some(PathBuf::from(output)),
            exclude_private: None,
            format: Some(OutputFormat::Markdown),
        }
    }

    #[test]
    fn test_load_cli_only() {
        Jail::expect_with(|_jail| {
            let config = ConfigLoader::load(cli("pkg", "out")).map_err(|e| e.to_string())?;
            assert_eq!(config.package_name, "pkg");
            assert_eq!(config.output_dir, PathBuf::from("out"));
            assert_eq!(config.format, OutputFormat::Markdown);
            assert!(config.include_source);
            Ok(())
        });
    }

    #[test]
    fn test_project_file_and_cli_precedence() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "docpages.toml",
                r#"
                package_name = "from_file"
                source_root = "src"
                exclude = ["tests/*"]
                include_source = false
                "#,
            )?;

            let config = ConfigLoader::load(cli("from_cli", "out")).map_err(|e| e.to_string())?;
            assert_eq!(config.package_name, "from_cli");
            assert_eq!(config.source_root, PathBuf::from("src"));
            assert_eq!(config.exclude, vec!["tests/*".to_string()]);
            assert!(!config.include_source);
            Ok(())
        });
    }

    #[test]
    fn test_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file("docpages.toml", "exclude_private = false")?;
            jail.set_env("DOCPAGES_EXCLUDE_PRIVATE", "true");
            jail.set_env("DOCPAGES_COMPONENTS_IMPORT_PATH", "~/ui/Docs");

            let config = ConfigLoader::load(cli("pkg", "out")).map_err(|e| e.to_string())?;
            assert!(config.exclude_private);
            assert_eq!(config.components_import_path, "~/ui/Docs");
            Ok(())
        });
    }

    #[test]
    fn test_config_path_env() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "document_init_modules = true")?;
            jail.set_env("DOCPAGES_CONFIG", "custom.toml");

            assert_eq!(ConfigLoader::project_config_path(), PathBuf::from("custom.toml"));
            let config = ConfigLoader::load(cli("pkg", "out")).map_err(|e| e.to_string())?;
            assert!(config.document_init_modules);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_package_rejected() {
        Jail::expect_with(|_jail| {
            let err = ConfigLoader::load(cli("not-a-package", "out")).unwrap_err();
            assert!(matches!(err, DocError::Config(_)));
            Ok(())
        });
    }
}
