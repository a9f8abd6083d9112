// FICHIER : src/utils/config.rs

use crate::utils::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Singleton global pour la configuration
static CONFIG: OnceLock<AppConfig> = OnceLock::new();

// Variables d'environnement reconnues
pub const ENV_DATA_FILE: &str = "DOSSIER_DATA_FILE";
pub const ENV_BIND_ADDR: &str = "DOSSIER_BIND_ADDR";
pub const ENV_LOG_DIR: &str = "DOSSIER_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "DOSSIER_LOG_LEVEL";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Configuration globale de l'application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Fichier JSON plat servant de base de données (id -> dossier).
    pub data_file: PathBuf,
    /// Adresse d'écoute du serveur HTTP local.
    pub bind_addr: String,
    /// Répertoire des journaux.
    pub log_dir: PathBuf,
    /// Niveau de log par défaut (surchargé par RUST_LOG).
    pub log_level: String,
}

impl AppConfig {
    /// Initialise le singleton depuis l'environnement. À appeler une
    /// seule fois au démarrage, avant `init_logging`.
    pub fn init() -> Result<()> {
        let cfg = Self::from_env()?;
        CONFIG
            .set(cfg)
            .map_err(|_| AppError::Config("Configuration déjà initialisée".to_string()))
    }

    /// Accès global. Si `init` n'a pas été appelé (cas des tests), on
    /// retombe sur les valeurs par défaut.
    pub fn get() -> &'static AppConfig {
        CONFIG.get_or_init(|| Self::from_env().unwrap_or_else(|_| Self::fallback()))
    }

    fn from_env() -> Result<AppConfig> {
        let data_file = env::var(ENV_DATA_FILE)
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir().join("patients.json"));

        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        validate_bind_addr(&bind_addr)?;

        let log_dir = env::var(ENV_LOG_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir().join("logs"));

        let log_level =
            env::var(ENV_LOG_LEVEL).unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());

        Ok(AppConfig {
            data_file,
            bind_addr,
            log_dir,
            log_level,
        })
    }

    fn fallback() -> AppConfig {
        AppConfig {
            data_file: default_data_dir().join("patients.json"),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            log_dir: default_data_dir().join("logs"),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

fn validate_bind_addr(addr: &str) -> Result<()> {
    addr.parse::<SocketAddr>().map_err(|e| {
        AppError::Config(format!("Adresse d'écoute invalide '{}' : {}", addr, e))
    })?;
    Ok(())
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dossier-patient")
}
