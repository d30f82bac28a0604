//src/main.rs

use anyhow::Context;
use tokio::net::TcpListener;

use izimo::{app::build_router, common::telemetry::init_tracing, config::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    // Se a configuração ou o banco falharem, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .context("Falha ao inicializar o estado da aplicação")?;

    let addr = app_state.config.addr.clone();
    let app = build_router(app_state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Falha ao iniciar o listener TCP em {}", addr))?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("Erro no servidor Axum")?;
    Ok(())
}
