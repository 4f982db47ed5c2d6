//! `vocalis serve`: run the skill webhook.

use std::sync::Arc;

use anyhow::Result;
use console::style;

use vocalis_api::http::build_router;
use vocalis_core::Skill;
use vocalis_infra::config::{PORT_ENV, resolve_port};
use vocalis_types::config::SkillConfig;

pub async fn serve(
    skill: Skill,
    config: &SkillConfig,
    port: Option<u16>,
    host: Option<String>,
    quiet: bool,
) -> Result<()> {
    let port = resolve_port(port, std::env::var(PORT_ENV).ok().as_deref(), config);
    let host = host.unwrap_or_else(|| config.server.host.clone());

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, path = %config.server.path, intents = skill.intents().len(), "skill webhook listening");

    if !quiet {
        println!(
            "  {} {} listening on {}",
            style("⚡").bold(),
            config.name.as_deref().unwrap_or("Skill"),
            style(format!("http://{addr}{}", config.server.path)).cyan()
        );
        println!("  {}", style("Press Ctrl+C to stop").dim());
    }

    let router = build_router(Arc::new(skill), &config.server.path);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if !quiet {
        println!("\n  Server stopped.");
    }
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
