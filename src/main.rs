use std::{process, sync::Arc};

use recompile::{
    application::{
        error::AppError,
        fallback::FallbackContent,
        gateway::ContentGateway,
        views::{HomeView, Navigation, PostNavigator},
    },
    config::{self, Command, Transport},
    domain::entities::{Tag, TagRef},
    infra::{
        error::InfraError,
        http::{self, ProxyState},
        sources, telemetry,
    },
};
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

mod print;

use print::print_json;

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

    let subscriber = tracing_fmt()
        .with_writer(std::io::stderr)
        .with_max_level(Level::ERROR)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match cli_args.command {
        Command::Serve(_) => run_serve(settings).await,
        command => run_fetch(settings, command).await,
    }
}

async fn run_fetch(settings: config::Settings, command: Command) -> Result<(), AppError> {
    let source = sources::build_source(&settings.content)?;
    let gateway = ContentGateway::new(source, Arc::new(FallbackContent::default()));

    match command {
        Command::Hero => print_json(&gateway.hero().await),
        Command::Posts => print_json(&gateway.posts().await),
        Command::Post(args) => {
            let navigator = PostNavigator::new(gateway);
            match navigator.open(&args.slug, args.related).await {
                Navigation::Current(view) => print_json(&view),
                Navigation::Superseded => Err(AppError::unexpected(format!(
                    "navigation to `{}` was superseded",
                    args.slug
                ))),
            }
        }
        Command::Related(args) => {
            let tags: Vec<TagRef> = args
                .tags
                .iter()
                .map(|slug| Tag::new(slug.as_str(), slug.as_str()).into())
                .collect();
            print_json(&gateway.related_posts(&args.slug, &tags, args.limit).await)
        }
        Command::Settings => print_json(&gateway.site_settings().await),
        Command::Footer => print_json(&gateway.footer().await),
        Command::Resume => print_json(&gateway.resume_page().await),
        Command::Contact => print_json(&gateway.contact_page().await),
        Command::Home => print_json(&HomeView::load(&gateway).await),
        Command::Serve(_) => Err(AppError::unexpected("serve is not a fetch command")),
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let mut content = settings.content.clone();
    if content.transport == Transport::Proxy {
        warn!(
            target = "recompile::serve",
            "Proxy transport ignored while serving; the proxy always reads the delivery API"
        );
        content.transport = Transport::Direct;
    }

    let source = sources::build_source(&content)?;
    let router = http::build_router(ProxyState::new(source), &settings.server.proxy_path);

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = "recompile::serve",
        addr = %settings.server.addr,
        path = %settings.server.proxy_path,
        "Content proxy listening"
    );

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(
            target = "recompile::serve",
            error = %err,
            "Failed to listen for shutdown signal"
        );
        std::future::pending::<()>().await;
    }
    info!(target = "recompile::serve", "Shutdown signal received");
}
