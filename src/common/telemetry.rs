// src/common/telemetry.rs

use tracing_subscriber::EnvFilter;

/// Inicializa o logger. `RUST_LOG` controla o nível (padrão: info).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // `try_init` para não entrar em pânico se já houver um subscriber (testes)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
