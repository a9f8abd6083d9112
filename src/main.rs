// FICHIER : src/main.rs

use std::sync::Arc;

use dossier_patient::schema::RecordValidator;
use dossier_patient::server::{self, ApiState};
use dossier_patient::store::PatientStore;
use dossier_patient::utils::config::AppConfig;
use dossier_patient::utils::{init_logging, Result};

#[tokio::main]
async fn main() {
    if let Err(e) = AppConfig::init() {
        eprintln!("❌ Erreur fatale de configuration : {}", e);
        std::process::exit(1);
    }
    init_logging();

    if let Err(e) = run().await {
        tracing::error!(erreur = %e, "Arrêt sur erreur fatale");
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = AppConfig::get();

    let store = PatientStore::open(&config.data_file).await?;
    let state = Arc::new(ApiState {
        store,
        validator: RecordValidator::standard(),
    });

    let app = server::router(state);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("🚀 Service démarré sur http://{}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
