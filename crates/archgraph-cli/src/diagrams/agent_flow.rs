//! Controller -> service -> planner, then either a direct completion or the
//! tool-enabled executor loop, both ending in the streamed event sequence.

use archgraph_core::{BuilderConfig, Graph, NodeStyle, Result, Shape};

pub fn build(config: BuilderConfig) -> Result<Graph> {
    let mut g = super::builder("AgentFlow", config);

    g.add_node("client", "Client request\n/agent/chat/stream", Shape::Parallelogram)?
        .add_node("controller", "AgentController", Shape::Box)?
        .add_node("service", "AgentService.processRequest{Stream}", Shape::Box)?
        .add_node("planner", "Planner (small model)", Shape::Box)?
        .add_node("decision", "kind == 'simple'?", Shape::Diamond)?
        .add_styled_node(
            "simple",
            "Direct completion\n(content_stream)",
            Shape::Box,
            NodeStyle::rounded(),
        )?
        .add_node("executor", "Executor (tool-enabled)", Shape::Box)?
        .add_node("tool_registry", "ToolRegistry", Shape::Box)?
        .add_styled_node(
            "tool",
            "Tool (memory / currency / math)",
            Shape::Box,
            NodeStyle::rounded(),
        )?
        .add_node(
            "events",
            "Streamed events:\ncontent_stream\ntool_start\ntool_complete\nheartbeat\ncomplete",
            Shape::Note,
        )?
        .add_node("done", "Complete", Shape::Terminator)?;

    g.edges([
        ("client", "controller"),
        ("controller", "service"),
        ("service", "planner"),
        ("planner", "decision"),
        ("decision", "simple"),
        ("decision", "executor"),
        ("executor", "tool_registry"),
        ("tool_registry", "tool"),
        ("tool", "executor"),
        ("executor", "events"),
        ("simple", "events"),
        ("events", "done"),
    ]);

    g.build()
}
