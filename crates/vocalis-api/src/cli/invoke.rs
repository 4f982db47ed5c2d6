//! `vocalis invoke`: dispatch a request file and print the response.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use vocalis_core::Skill;
use vocalis_types::request::SkillRequest;
use vocalis_types::response::ResponseEnvelope;

/// Read a request document from `path`, or stdin for `-`.
pub async fn read_request(path: &Path) -> Result<SkillRequest> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read request from stdin")?;
        buf
    } else {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?
    };

    serde_json::from_str(&raw).with_context(|| format!("{} is not a valid request", path.display()))
}

pub async fn invoke(skill: &Skill, path: &Path, json: bool) -> Result<()> {
    let request = read_request(path).await?;
    let envelope = skill.handle(request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    } else {
        print_envelope(&envelope)?;
    }
    Ok(())
}

fn print_envelope(envelope: &ResponseEnvelope) -> Result<()> {
    let response = &envelope.response;
    println!();
    println!(
        "  {} {}",
        style("🗣").bold(),
        style(response.output_speech.content()).cyan()
    );
    if let Some(reprompt) = &response.reprompt {
        println!("  {} {}", style("reprompt:").dim(), reprompt.output_speech.content());
    }
    if let Some(card) = &response.card {
        println!(
            "  {} [{}] {}",
            style("card:").dim(),
            card.kind,
            card.title.as_deref().unwrap_or_default()
        );
    }
    println!(
        "  {} {}",
        style("end session:").dim(),
        response.should_end_session
    );
    println!(
        "  {} {}",
        style("attributes:").dim(),
        serde_json::to_string(&envelope.session_attributes)?
    );
    println!();
    Ok(())
}
