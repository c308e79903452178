use archgraph_core::{BuilderConfig, EdgeAttrs, Graph, LineStyle, NodeStyle, Result, Shape};

pub fn build(config: BuilderConfig) -> Result<Graph> {
    let mut g = super::builder("RedisCaching", config);

    g.add_node("client", "Client requests", Shape::Parallelogram)?
        .add_node("guard", "RateLimitGuard (optional)", Shape::Diamond)?
        .add_node("controller", "AgentController", Shape::Box)?
        .add_node("service", "AgentService", Shape::Box)?
        .add_styled_node(
            "tools",
            "Tools (memory / currency / math)",
            Shape::Box,
            NodeStyle::rounded(),
        )?
        .add_node("redis", "Redis (Upstash)", Shape::Cylinder)?
        .add_node("cache", "Response / tool-result cache (TTL)", Shape::Note)?;

    g.edges([
        ("client", "guard"),
        ("guard", "controller"),
        ("controller", "service"),
        ("service", "tools"),
        ("tools", "service"),
    ]);
    g.add_edge_with(
        "service",
        "redis",
        EdgeAttrs::labeled("read/write cache").line(LineStyle::Dashed),
    )
    .add_edge_with(
        "guard",
        "redis",
        EdgeAttrs::labeled("rate-limit counters").line(LineStyle::Dashed),
    )
    .add_edge_with("redis", "cache", LineStyle::Dotted);

    g.build()
}
