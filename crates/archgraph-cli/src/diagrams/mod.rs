//! The architecture diagrams this tool knows how to draw.
//!
//! Each submodule populates one graph; they hold data, not logic.

mod agent_flow;
mod client_stream_loop;
mod deployment_railway;
mod docker_multistage;
mod monorepo_overview;
mod multi_agent_planner;
mod redis_caching_rate_limit;

use clap::Subcommand;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use archgraph_core::{BuilderConfig, ClusterAttrs, Color, Direction, Graph, GraphBuilder, Result};

const FONT_NAME: &str = "Inter, Helvetica, Arial";
const FONT_SIZE: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Subcommand, EnumIter, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Diagram {
    /// Agent planner -> executor flow (server side)
    AgentFlow,
    /// High-level monorepo architecture: server, site and external services
    MonorepoOverview,
    /// Client streaming receive loop in the web worker
    ClientStreamLoop,
    /// Deployment topology on Railway
    DeploymentRailway,
    /// Multi-stage Docker builds for server and site
    DockerMultistage,
    /// Planner output driving simple vs tool-enabled execution
    MultiAgentPlanner,
    /// Redis response caching and rate limiting
    RedisCachingRateLimit,
}

impl Diagram {
    pub fn all() -> impl Iterator<Item = Diagram> {
        Diagram::iter()
    }

    /// Artifact base name, e.g. `agent_flow` for `agent_flow.svg`.
    pub fn file_name(self) -> &'static str {
        match self {
            Diagram::AgentFlow => "agent_flow",
            Diagram::MonorepoOverview => "monorepo_overview",
            Diagram::ClientStreamLoop => "client_stream_loop",
            Diagram::DeploymentRailway => "deployment_railway",
            Diagram::DockerMultistage => "docker_multistage",
            Diagram::MultiAgentPlanner => "multi_agent_planner",
            Diagram::RedisCachingRateLimit => "redis_caching_rate_limit",
        }
    }

    pub fn build(self, config: BuilderConfig) -> Result<Graph> {
        match self {
            Diagram::AgentFlow => agent_flow::build(config),
            Diagram::MonorepoOverview => monorepo_overview::build(config),
            Diagram::ClientStreamLoop => client_stream_loop::build(config),
            Diagram::DeploymentRailway => deployment_railway::build(config),
            Diagram::DockerMultistage => docker_multistage::build(config),
            Diagram::MultiAgentPlanner => multi_agent_planner::build(config),
            Diagram::RedisCachingRateLimit => redis_caching_rate_limit::build(config),
        }
    }
}

/// Left-to-right builder with the house font.
fn builder(name: &str, config: BuilderConfig) -> GraphBuilder {
    let mut builder = GraphBuilder::with_config(name, config);
    builder
        .set_direction(Direction::LeftToRight)
        .set_font(FONT_NAME, FONT_SIZE);
    builder
}

/// Filled cluster whose border matches its fill.
fn panel(label: &str, color: &str) -> Result<ClusterAttrs> {
    let color = Color::new(color)?;
    Ok(ClusterAttrs::labeled(label).fill(color.clone()).color(color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_diagram_builds_and_validates() {
        for diagram in Diagram::all() {
            for strict in [false, true] {
                let config = BuilderConfig::new().with_strict_shapes(strict);
                let graph = diagram
                    .build(config)
                    .unwrap_or_else(|e| panic!("{diagram:?} failed to build: {e}"));
                graph
                    .validate()
                    .unwrap_or_else(|e| panic!("{diagram:?} failed to validate: {e}"));
                assert_eq!(graph.attrs().direction, Direction::LeftToRight);
                assert!(!graph.nodes().is_empty(), "{diagram:?} has no nodes");
            }
        }
    }

    #[test]
    fn test_file_names_are_unique() {
        let names: HashSet<&str> = Diagram::all().map(Diagram::file_name).collect();
        assert_eq!(names.len(), Diagram::all().count());
    }

    #[test]
    fn test_display_matches_command_name() {
        assert_eq!(Diagram::AgentFlow.to_string(), "agent-flow");
        assert_eq!(
            Diagram::RedisCachingRateLimit.to_string(),
            "redis-caching-rate-limit"
        );
    }

    #[test]
    fn test_panel_sets_fill_and_border() {
        let attrs = panel("server/", "#f8f9fa").unwrap();
        assert_eq!(attrs.fill_color, attrs.color);
        assert!(panel("server/", "#nothex").is_err());
    }
}
