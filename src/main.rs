use article_chat::answer::{HttpAnswerService, LoggingService};
use article_chat::api::{create_router, AppState};
use article_chat::config::ChatConfig;
use article_chat::runtime::SessionHandle;
use article_chat::state_machine::SessionContext;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "article_chat=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = ChatConfig::from_env()?;
    let article = config.load_article()?;
    tracing::info!(
        endpoint = %config.endpoint,
        timeout_secs = config.request_timeout.as_secs(),
        article_title = %article.title,
        article_chars = article.content.chars().count(),
        "Configuration loaded"
    );

    // Answering backend
    let http = HttpAnswerService::new(&config.endpoint, config.request_timeout)?;
    let answers = LoggingService::new(Arc::new(http));

    // One widget session per process
    let session_id = uuid::Uuid::new_v4().to_string();
    let session = SessionHandle::spawn(SessionContext::new(session_id, article), answers);
    tracing::info!(session_id = %session.session_id(), "Session started");
    let state = AppState::new(session);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Article chat server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
