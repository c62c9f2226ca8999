//! Server configuration

use std::path::PathBuf;

use crate::auth::JwtConfig;

/// Server configuration, read from the environment with development defaults
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub http_port: u16,
    pub jwt: JwtConfig,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/pos-server".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Directory holding the embedded database
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// Directory for rolling log files
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Ensure the work directory structure exists
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directories_derive_from_work_dir() {
        let config = Config {
            work_dir: "/tmp/pos-test".to_string(),
            http_port: 3000,
            jwt: JwtConfig {
                secret: "test-secret-key-of-at-least-32-bytes!".to_string(),
                expiration_minutes: 60,
                issuer: "pos-server".to_string(),
                audience: "pos-terminals".to_string(),
            },
            environment: "development".to_string(),
        };

        assert_eq!(config.database_dir(), PathBuf::from("/tmp/pos-test/database"));
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/pos-test/logs"));
        assert!(config.is_development());
        assert!(!config.is_production());
    }
}
