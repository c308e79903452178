//! Monorepo root: the `server` API and the `site` UI as clusters, plus the
//! external services the API talks to.

use archgraph_core::{
    BuilderConfig, Color, EdgeAttrs, Graph, LineStyle, NodeStyle, Result, Shape,
};

const PANEL: &str = "#f8f9fa";

pub fn build(config: BuilderConfig) -> Result<Graph> {
    let mut g = super::builder("MonorepoOverview", config);

    // External services
    g.add_styled_node(
        "openai",
        "OpenAI API",
        Shape::Component,
        NodeStyle::filled(Color::new("#EEE6FF")?),
    )?
    .add_styled_node(
        "redis",
        "Redis (Upstash, optional)",
        Shape::Cylinder,
        NodeStyle::dashed(),
    )?;

    g.cluster("server", super::panel("server/ (NestJS API)", PANEL)?, |s| {
        s.add_node("agent_controller", "AgentController", Shape::Box)?
            .add_node("agent_service", "AgentService", Shape::Box)?
            .add_node("tool_registry", "ToolRegistry", Shape::Box)?
            .add_styled_node("tool_memory", "Tool: memory", Shape::Box, NodeStyle::rounded())?
            .add_styled_node(
                "tool_currency",
                "Tool: currency",
                Shape::Box,
                NodeStyle::rounded(),
            )?
            .add_styled_node(
                "tool_math",
                "Tool: math_eval (tutorial)",
                Shape::Box,
                NodeStyle::rounded(),
            )?
            .add_node(
                "endpoints",
                "Endpoints:\nPOST /agent/chat\nPOST /agent/chat/stream\nGET /healthcheck\nGET /api, /reference",
                Shape::Note,
            )?;

        s.edges([
            ("agent_controller", "agent_service"),
            ("agent_service", "tool_registry"),
            ("tool_registry", "tool_memory"),
            ("tool_registry", "tool_currency"),
            ("tool_registry", "tool_math"),
        ]);
        Ok(())
    })?;

    g.cluster("site", super::panel("site/ (Next.js UI)", PANEL)?, |s| {
        s.add_node("next_app", "Next.js App", Shape::Box)?
            .add_styled_node("chat_ui", "Chat UI", Shape::Box, NodeStyle::rounded())?
            .add_node("worker", "Worker: chat.worker.ts", Shape::Box)?
            .add_node(
                "components",
                "Components:\nChat interface\nTool call blocks\nMemory manager",
                Shape::Note,
            )?;
        s.edges([("next_app", "chat_ui"), ("chat_ui", "worker")]);
        Ok(())
    })?;

    // Interactions
    g.add_edge_with(
        "worker",
        "agent_controller",
        EdgeAttrs::labeled("POST /agent/chat/stream").line(LineStyle::Bold),
    )
    .add_edge_with("agent_service", "openai", LineStyle::Dashed)
    .add_edge_with(
        "agent_service",
        "redis",
        EdgeAttrs::labeled("cache / rate-limit").line(LineStyle::Dashed),
    );

    g.build()
}
