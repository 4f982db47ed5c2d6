//! `vocalis assets`: print or save speech assets.

use std::path::Path;

use anyhow::Result;
use console::style;

use vocalis_core::Skill;
use vocalis_core::assets::persist::save_speech_assets;
use vocalis_infra::filesystem::LocalFileSystem;

/// Print the assets, or write them under `out` when given.
pub async fn assets(skill: &Skill, out: Option<&Path>, json: bool, quiet: bool) -> Result<()> {
    let assets = skill.speech_assets();

    let Some(dir) = out else {
        if json {
            println!("{}", serde_json::to_string_pretty(&assets)?);
        } else {
            print!("{assets}");
        }
        return Ok(());
    };

    let written = save_speech_assets(&LocalFileSystem::new(), &assets, dir).await?;

    if json {
        let paths: Vec<_> = written.iter().map(|p| p.display().to_string()).collect();
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "written": paths }))?);
    } else if !quiet {
        println!();
        println!(
            "  {} Speech assets saved to {}",
            style("✓").green().bold(),
            style(dir.display()).cyan()
        );
        for path in &written {
            println!("    {}", style(path.display()).dim());
        }
        println!();
    }
    Ok(())
}
