use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::bail;
use chrono::Duration as ChronoDuration;
use sqlx::PgPool;
use tokio::net::TcpListener;

use wayfarer::application::ports::LlmClient;
use wayfarer::application::services::{AuthService, ItineraryService, PlannerService};
use wayfarer::infrastructure::auth::{BcryptHasher, JwtTokenService};
use wayfarer::infrastructure::llm::{MockLlmClient, OpenAiClient};
use wayfarer::infrastructure::observability::{TracingConfig, init_tracing};
use wayfarer::infrastructure::persistence::{
    PgItineraryRepository, PgUserRepository, create_pool, ensure_schema,
};
use wayfarer::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;

    init_tracing(
        TracingConfig {
            environment: settings.environment.to_string(),
            ..TracingConfig::default()
        },
        settings.server.port,
    );

    let pool = create_pool(&settings.database.url, settings.database.max_connections).await?;
    ensure_schema(&pool).await?;

    match settings.llm.api_key.clone() {
        Some(api_key) => {
            let llm_client = Arc::new(OpenAiClient::new(api_key, settings.llm.model.clone()));
            serve(llm_client, settings, pool).await
        }
        None if settings.environment.is_local() => {
            tracing::warn!("OPENAI_API_KEY not set, serving canned plan responses");
            serve(Arc::new(MockLlmClient), settings, pool).await
        }
        None => bail!("OPENAI_API_KEY is required outside the local environment"),
    }
}

async fn serve<L>(llm_client: Arc<L>, settings: Settings, pool: PgPool) -> anyhow::Result<()>
where
    L: LlmClient + 'static,
{
    let planner_service = Arc::new(PlannerService::new(
        llm_client,
        Duration::from_secs(settings.llm.timeout_secs),
    ));
    let itinerary_service = Arc::new(ItineraryService::new(Arc::new(
        PgItineraryRepository::new(pool.clone()),
    )));
    let auth_service = Arc::new(AuthService::new(
        Arc::new(PgUserRepository::new(pool)),
        Arc::new(BcryptHasher::new(settings.auth.bcrypt_cost)),
        Arc::new(JwtTokenService::new(
            &settings.auth.token_secret,
            ChronoDuration::days(settings.auth.token_ttl_days),
        )),
    ));

    let state = AppState {
        planner_service,
        itinerary_service,
        auth_service,
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
