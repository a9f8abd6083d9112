// FICHIER : src/utils/mod.rs

// =========================================================================
//  FOUNDATION LAYER (Stable)
// =========================================================================

pub mod config;
pub mod error;
pub mod fs;
pub mod logger;

// --> Config & Erreurs
pub use config::AppConfig;
pub use error::{AppError, Result};
pub use logger::init_logging;

/// **Le Prélude** : À utiliser via `use crate::utils::prelude::*;`
pub mod prelude {
    pub use super::config::AppConfig;
    pub use super::error::{AppError, Result};
    pub use chrono::Utc;
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{json, Map, Value};
    pub use tracing::{debug, error, info, instrument, warn};
    pub use uuid::Uuid;
}
