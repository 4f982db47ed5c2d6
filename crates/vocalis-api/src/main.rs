//! Vocalis CLI and webhook entry point.
//!
//! Binary name: `vocalis`
//!
//! Parses CLI arguments, loads the skill configuration, builds the demo
//! skill, then dispatches to the requested command.

mod cli;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use vocalis_api::demo::demo_skill;
use vocalis_infra::config::{load_skill_config, resolve_config_path};
use vocalis_observe::tracing_setup::{init_tracing, shutdown_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,vocalis=debug",
        _ => "trace",
    };
    let otel = matches!(cli.command, Commands::Serve { otel: true, .. });
    init_tracing(filter, otel).map_err(|e| anyhow::anyhow!(e))?;

    let config_path = resolve_config_path(cli.config.as_deref());
    let config = load_skill_config(&config_path).await;

    let result = match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(shell, &mut cmd, "vocalis", &mut std::io::stdout());
            Ok(())
        }
        Commands::Serve { port, host, .. } => {
            let skill = demo_skill(config.clone())?;
            cli::serve::serve(skill, &config, port, host, cli.quiet).await
        }
        Commands::Assets { out } => {
            let skill = demo_skill(config)?;
            cli::assets::assets(&skill, out.as_deref(), cli.json, cli.quiet).await
        }
        Commands::Request { kind } => cli::request::print_request(kind),
        Commands::Invoke { file } => {
            let skill = demo_skill(config)?;
            cli::invoke::invoke(&skill, &file, cli.json).await
        }
    };

    shutdown_tracing();
    result
}
