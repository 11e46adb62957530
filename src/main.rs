use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use smart_mindmap::application::ports::{FileLoader, LlmClient, OutlineRenderer};
use smart_mindmap::application::services::{
    GenerationOptions, MindMapService, TextExtractionService,
};
use smart_mindmap::infrastructure::llm::{MockLlmClient, StreamingLlmClient};
use smart_mindmap::infrastructure::observability::{TracingConfig, init_tracing};
use smart_mindmap::infrastructure::rendering::{HtmlExporter, MarkmapRenderer};
use smart_mindmap::infrastructure::text_processing::CompositeFileLoader;
use smart_mindmap::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::from_settings(
        environment.as_str(),
        &settings.logging,
    ));

    if settings.scaffold.enabled {
        tracing::warn!(
            delay_ms = settings.scaffold.mock_response_delay_ms,
            "Scaffold mode enabled, upstream LLM calls are replaced by a canned outline"
        );
        let llm_client = Arc::new(MockLlmClient::scaffold(
            settings.scaffold.mock_response_delay_ms,
        ));
        serve(settings, llm_client).await
    } else {
        let llm_client = Arc::new(StreamingLlmClient::new());
        serve(settings, llm_client).await
    }
}

async fn serve<L>(settings: Settings, llm_client: Arc<L>) -> anyhow::Result<()>
where
    L: LlmClient + 'static,
{
    let file_loader: Arc<dyn FileLoader> = Arc::new(CompositeFileLoader::with_default_adapters());
    let renderer: Arc<dyn OutlineRenderer> = Arc::new(MarkmapRenderer::new());

    let mind_map_service = Arc::new(MindMapService::new(
        llm_client,
        GenerationOptions {
            system_prompt: settings.relay.system_prompt.clone(),
            temperature: settings.relay.temperature,
            max_tokens: settings.relay.max_tokens,
        },
    ));
    let extraction_service = Arc::new(TextExtractionService::new(
        file_loader,
        settings.extraction.max_file_size_bytes(),
    ));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;

    let state = AppState {
        mind_map_service,
        extraction_service,
        renderer,
        html_exporter: Arc::new(HtmlExporter::default()),
    };

    let router = create_router(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, router).await?;

    Ok(())
}
