// FICHIER : src/store/mod.rs

//! Magasin de dossiers : un unique fichier JSON plat (id -> document).
//!
//! La base tient en mémoire derrière un `RwLock` ; chaque mutation
//! réécrit le fichier entier de manière atomique (fichier temporaire
//! puis rename). Le verrou d'écriture sérialise les écrivains
//! concurrents sur une même identité.

use crate::utils::fs;
use crate::utils::prelude::*;
use std::path::PathBuf;
use tokio::sync::RwLock;

pub struct PatientStore {
    path: PathBuf,
    docs: RwLock<Map<String, Value>>,
}

impl PatientStore {
    /// Ouvre le magasin : charge le fichier s'il existe, sinon démarre vide.
    pub async fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let docs = if fs::exists(&path).await {
            let root: Value = fs::read_json(&path).await?;
            match root {
                Value::Object(map) => map,
                _ => {
                    return Err(AppError::Storage(format!(
                        "Fichier '{}' corrompu : objet JSON attendu à la racine",
                        path.display()
                    )))
                }
            }
        } else {
            Map::new()
        };

        info!(fichier = %path.display(), dossiers = docs.len(), "Magasin ouvert");
        Ok(Self {
            path,
            docs: RwLock::new(docs),
        })
    }

    // --- LECTURE ---

    pub async fn list(&self) -> Vec<Value> {
        self.docs.read().await.values().cloned().collect()
    }

    pub async fn get(&self, id: &str) -> Option<Value> {
        self.docs.read().await.get(id).cloned()
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.docs.read().await.contains_key(id)
    }

    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }

    // --- ÉCRITURE ---

    /// Insère un nouveau document. Renvoie `false` (sans écrire) si
    /// l'identité existe déjà : le doublon est tranché ici, sous le
    /// verrou d'écriture.
    pub async fn insert(&self, id: &str, mut doc: Value) -> Result<bool> {
        let mut docs = self.docs.write().await;
        if docs.contains_key(id) {
            return Ok(false);
        }
        stamp(&mut doc, None);
        docs.insert(id.to_string(), doc);
        self.flush(&docs).await?;
        debug!(id, "Dossier inséré");
        Ok(true)
    }

    /// Lecture-modification-écriture sous UN SEUL verrou d'écriture :
    /// deux mises à jour concurrentes de la même identité se succèdent,
    /// chacune voyant le document laissé par la précédente. Renvoie
    /// `None` (sans appeler `mutate`) si l'identité est inconnue — une
    /// mise à jour ne ressuscite jamais un document supprimé.
    /// Le `createdAt` d'origine est préservé.
    pub async fn update<F>(&self, id: &str, mutate: F) -> Result<Option<Value>>
    where
        F: FnOnce(&Value) -> Result<Value>,
    {
        let mut docs = self.docs.write().await;
        let current = match docs.get(id) {
            Some(doc) => doc.clone(),
            None => return Ok(None),
        };

        let mut doc = mutate(&current)?;
        stamp(&mut doc, current.get("createdAt").cloned());
        docs.insert(id.to_string(), doc.clone());
        self.flush(&docs).await?;
        debug!(id, "Dossier mis à jour");
        Ok(Some(doc))
    }

    /// Supprime un document. Renvoie `false` si l'identité était inconnue.
    pub async fn remove(&self, id: &str) -> Result<bool> {
        let mut docs = self.docs.write().await;
        if docs.remove(id).is_none() {
            return Ok(false);
        }
        self.flush(&docs).await?;
        debug!(id, "Dossier supprimé");
        Ok(true)
    }

    async fn flush(&self, docs: &Map<String, Value>) -> Result<()> {
        fs::write_json_atomic(&self.path, docs).await
    }
}

/// Horodatage de gestion : `createdAt` posé une seule fois, `updatedAt`
/// à chaque écriture. Ce sont des métadonnées du magasin, pas des champs
/// du schéma.
fn stamp(doc: &mut Value, created_at: Option<Value>) {
    if let Some(obj) = doc.as_object_mut() {
        let now = Utc::now().to_rfc3339();
        let created = created_at.unwrap_or_else(|| Value::String(now.clone()));
        obj.insert("createdAt".to_string(), created);
        obj.insert("updatedAt".to_string(), Value::String(now));
    }
}
