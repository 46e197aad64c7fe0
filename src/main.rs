use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use digitize::application::ports::{TemplateRepository, WorkspaceRepository};
use digitize::application::services::{
    DocumentIntake, ExtractionWorker, InFlightExtractions, TemplateService, WorkspaceService,
};
use digitize::infrastructure::engine::ExtractionEngineFactory;
use digitize::infrastructure::export::default_exporters;
use digitize::infrastructure::observability::{TracingConfig, init_tracing};
use digitize::infrastructure::persistence::{
    InMemoryTemplateRepository, InMemoryWorkspaceRepository,
};
use digitize::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::from_settings(
        environment,
        &settings.logging,
    ));

    let templates: Arc<dyn TemplateRepository> = if settings.templates.seed_examples {
        Arc::new(InMemoryTemplateRepository::with_examples())
    } else {
        Arc::new(InMemoryTemplateRepository::new())
    };
    let workspaces: Arc<dyn WorkspaceRepository> = Arc::new(InMemoryWorkspaceRepository::new());

    let engine = ExtractionEngineFactory::create(&settings.engine)?;
    let intake = DocumentIntake::new(settings.intake.max_size_bytes());
    let in_flight = Arc::new(InFlightExtractions::new());

    let (sender, receiver) = mpsc::channel(settings.engine.queue_capacity.max(1));

    let worker = ExtractionWorker::new(
        receiver,
        Arc::clone(&engine),
        Arc::clone(&workspaces),
        Arc::clone(&in_flight),
        Duration::from_secs(settings.engine.timeout_secs),
    );
    tokio::spawn(worker.run());

    let template_service = Arc::new(TemplateService::new(
        Arc::clone(&templates),
        engine,
        intake,
    ));
    let workspace_service = Arc::new(WorkspaceService::new(
        templates,
        workspaces,
        default_exporters(),
        intake,
        sender,
        in_flight,
    ));

    let state = AppState {
        template_service,
        workspace_service,
        max_upload_bytes: intake.max_size_bytes(),
    };

    let router = create_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%environment, "Listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
