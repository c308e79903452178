//! The planner emits a JSON plan; its `kind` picks simple completion or the
//! tool executor.

use archgraph_core::{BuilderConfig, Graph, Justify, Label, NodeStyle, Result, Shape};

pub fn build(config: BuilderConfig) -> Result<Graph> {
    let mut g = super::builder("MultiAgentPlanner", config);

    let plan = Label::from_lines([
        "{",
        "  \"kind\": \"simple\" | \"tool\",",
        "  \"tools\": [\"math_eval\", ...],",
        "  \"notes\": \"...\"",
        "}",
    ])
    .justify(Justify::Left);

    g.add_node("input", "User question + short history", Shape::Parallelogram)?
        .add_node("planner", "Planner (small model)", Shape::Box)?
        .add_node("plan_json", plan, Shape::Note)?
        .add_node("decision", "kind == 'simple'?", Shape::Diamond)?
        .add_styled_node("simple", "Simple completion", Shape::Box, NodeStyle::rounded())?
        .add_node("tool_exec", "Executor with tools", Shape::Box)?
        .add_node("tool_list", "Tool list from plan", Shape::Note)?
        .add_node("complete", "Complete", Shape::Terminator)?;

    g.edges([
        ("input", "planner"),
        ("planner", "plan_json"),
        ("plan_json", "decision"),
        ("decision", "simple"),
        ("decision", "tool_exec"),
        ("tool_exec", "tool_list"),
        ("simple", "complete"),
        ("tool_exec", "complete"),
    ]);

    g.build()
}
