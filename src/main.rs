use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use callsight::application::ports::CallRepository;
use callsight::application::services::{CallProcessingService, PollPolicy};
use callsight::infrastructure::elevate::{ElevateClient, ElevateConfig};
use callsight::infrastructure::observability::{init_tracing, TracingConfig};
use callsight::infrastructure::persistence::InMemoryCallRepository;
use callsight::presentation::{create_router, AppState, Environment, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let settings = Settings::load(environment)?;

    init_tracing(
        TracingConfig {
            environment: environment.to_string(),
            json_format: settings.logging.enable_json,
        },
        settings.server.port,
    );

    let client = Arc::new(ElevateClient::new(ElevateConfig {
        base_url: settings.elevate.base_url.clone(),
        api_token: settings.elevate.api_token.clone(),
        request_timeout: Duration::from_secs(settings.elevate.request_timeout_secs),
    }));

    let call_repository: Arc<dyn CallRepository> = Arc::new(InMemoryCallRepository::new());

    let processing_service = Arc::new(CallProcessingService::new(
        Arc::clone(&client),
        Arc::clone(&call_repository),
        PollPolicy {
            max_attempts: settings.polling.max_attempts,
            interval: Duration::from_secs(settings.polling.interval_secs),
        },
    ));

    let state = AppState {
        processing_service,
        call_repository,
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
