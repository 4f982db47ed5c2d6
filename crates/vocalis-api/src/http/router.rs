//! Axum router configuration with middleware.
//!
//! A skill is served from a single POST route (`/` unless configured).
//! Middleware: tracing.

use std::sync::Arc;

use axum::Router;
use axum::routing::post;
use tower_http::trace::TraceLayer;

use vocalis_core::Skill;

use crate::http::handlers;

/// Build the webhook router for `skill`, mounted at `path`.
///
/// A path without a leading slash is treated as if it had one.
pub fn build_router(skill: Arc<Skill>, path: &str) -> Router {
    let path = normalize_path(path);

    Router::new()
        .route(&path, post(handlers::skill::handle_skill_request))
        .layer(TraceLayer::new_for_http())
        .with_state(skill)
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vocalis_core::SkillBuilder;
    use vocalis_types::config::SkillConfig;

    #[test]
    fn paths_get_a_leading_slash() {
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("alexa"), "/alexa");
        assert_eq!(normalize_path("/alexa/skill"), "/alexa/skill");
    }

    #[test]
    fn router_builds_for_custom_path() {
        let skill = Arc::new(SkillBuilder::new(SkillConfig::default()).build().unwrap());
        let _router: Router = build_router(skill, "/alexa");
    }
}
