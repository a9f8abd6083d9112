// FICHIER : src/utils/fs.rs

use crate::utils::error::{AppError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub async fn exists(path: &Path) -> bool {
    fs::metadata(path).await.is_ok()
}

/// Crée récursivement un répertoire.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).await?;
    Ok(())
}

pub async fn read_to_string(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path).await?)
}

pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

/// Écriture atomique : fichier temporaire puis rename.
/// Un crash au milieu de l'écriture ne laisse jamais un fichier final tronqué.
pub async fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent).await?;
        }
    }

    let tmp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&tmp_path).await?;

    file.write_all(content).await?;
    file.flush().await.ok();
    file.sync_all().await.ok();

    if let Err(e) = fs::rename(&tmp_path, path).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(AppError::Io(e));
    }
    Ok(())
}

pub async fn write_json_atomic<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(data)?;
    write_atomic(path, content.as_bytes()).await
}

pub async fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path).await?;
    Ok(())
}
