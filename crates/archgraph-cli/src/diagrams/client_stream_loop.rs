//! The web worker's streaming receive loop: fetch, read, buffer, parse
//! `data: ` lines and dispatch by event type.

use archgraph_core::{BuilderConfig, EdgeAttrs, Graph, LineStyle, NodeStyle, Result, Shape};

pub fn build(config: BuilderConfig) -> Result<Graph> {
    let mut g = super::builder("ClientStreamLoop", config);

    g.add_node("start", "fetch POST\n/agent/chat/stream", Shape::Parallelogram)?
        .add_node("ok", "HTTP ok + body?", Shape::Diamond)?
        .add_node("reader", "reader.read() loop", Shape::Box)?
        .add_styled_node(
            "buffer",
            "append bytes → decode → split by \n\nkeep tail in buffer",
            Shape::Box,
            NodeStyle::rounded(),
        )?
        .add_node("parse", "if line starts with 'data: ' → JSON.parse", Shape::Box)?
        .add_node(
            "dispatch",
            "dispatch by evt.type:\ncontent_stream | tool_start | tool_complete | heartbeat | complete",
            Shape::Note,
        )?
        .add_node("update", "UI updates / state changes", Shape::Box)?
        .add_node("finish", "Stream finished", Shape::Terminator)?
        .add_node("error", "Throw / surface error", Shape::Octagon)?;

    g.edges([
        ("start", "ok"),
        ("ok", "reader"),
        ("reader", "buffer"),
        ("buffer", "parse"),
        ("parse", "dispatch"),
        ("dispatch", "update"),
        ("update", "reader"),
    ]);
    g.add_edge_with("ok", "error", EdgeAttrs::labeled("no").line(LineStyle::Dashed))
        .add_edge_with(
            "reader",
            "finish",
            EdgeAttrs::labeled("done? yes").line(LineStyle::Dashed),
        );

    g.build()
}
