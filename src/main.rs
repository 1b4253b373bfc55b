use std::{future::IntoFuture, process, sync::Arc};

use quire::{
    application::{
        content::ContentPipeline,
        error::AppError,
        posts::PostService,
        preview::PreviewService,
        render::{ComrakRenderService, RenderService},
    },
    config,
    domain::error::DomainError,
    infra::{
        error::InfraError,
        http::{self, ApiState},
        memory::InMemoryPostsRepo,
        telemetry,
    },
};
use tokio::sync::Notify;
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Render(args) => run_render(settings, args).await,
    }
}

fn content_pipeline(settings: &config::Settings) -> ContentPipeline {
    let renderer: Arc<dyn RenderService> = Arc::new(ComrakRenderService::new());
    ContentPipeline::new(renderer, settings.content)
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let content = content_pipeline(&settings);
    let repo = Arc::new(InMemoryPostsRepo::new());

    let state = ApiState {
        posts: Arc::new(PostService::new(repo.clone(), repo, content.clone())),
        preview: Arc::new(PreviewService::new(content)),
    };

    serve_http(&settings, state).await
}

async fn serve_http(settings: &config::Settings, state: ApiState) -> Result<(), AppError> {
    let router = http::build_router(state);

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = "quire::serve",
        addr = %settings.server.addr,
        "HTTP server listening"
    );

    let shutdown = Arc::new(Notify::new());
    let signal = shutdown.clone();
    let server = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { signal.notified().await })
        .into_future();
    let mut server = std::pin::pin!(server);

    tokio::select! {
        result = &mut server => {
            return result.map_err(|err| AppError::unexpected(format!("server error: {err}")));
        }
        signal = tokio::signal::ctrl_c() => {
            signal.map_err(|err| AppError::from(InfraError::from(err)))?;
        }
    }

    info!(target = "quire::serve", "shutdown requested; draining connections");
    shutdown.notify_one();

    match tokio::time::timeout(settings.server.graceful_shutdown, server).await {
        Ok(result) => {
            result.map_err(|err| AppError::unexpected(format!("server error: {err}")))
        }
        Err(_) => {
            warn!(
                target = "quire::serve",
                grace_secs = settings.server.graceful_shutdown.as_secs(),
                "graceful shutdown timed out"
            );
            Ok(())
        }
    }
}

async fn run_render(settings: config::Settings, args: config::RenderArgs) -> Result<(), AppError> {
    let markdown = tokio::fs::read_to_string(&args.file)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    let analysis = PreviewService::new(content_pipeline(&settings))
        .preview(&markdown)
        .map_err(|err| {
            AppError::from(DomainError::validation(format!(
                "{}: {err}",
                args.file.display()
            )))
        })?;

    let json = serde_json::to_string_pretty(&analysis)
        .map_err(|err| AppError::unexpected(format!("failed to encode analysis: {err}")))?;
    println!("{json}");

    Ok(())
}
