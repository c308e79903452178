//! Railway deployment: API and web as separately scaled services inside the
//! Railway project, reached from the internet.

use archgraph_core::{
    BuilderConfig, ClusterAttrs, Color, EdgeAttrs, Graph, LineStyle, NodeStyle, Result, Shape,
};

pub fn build(config: BuilderConfig) -> Result<Graph> {
    let mut g = super::builder("DeploymentRailway", config);

    g.add_node("internet", "Internet / Users", Shape::Ellipse)?
        .add_styled_node(
            "openai",
            "OpenAI API",
            Shape::Component,
            NodeStyle::filled(Color::new("#EEE6FF")?),
        )?
        .add_styled_node(
            "redis",
            "Redis (Upstash)\noptional",
            Shape::Cylinder,
            NodeStyle::dashed(),
        )?;

    g.cluster("railway", super::panel("Railway", "#f1f3f5")?, |railway| {
        railway.cluster("api", ClusterAttrs::labeled("API service (server)"), |api| {
            api.add_node(
                "api",
                "NestJS API\n/agent/chat, /agent/chat/stream",
                Shape::Box,
            )?;
            Ok(())
        })?;
        railway.cluster("web", ClusterAttrs::labeled("Web service (site)"), |web| {
            web.add_node("web", "Next.js App", Shape::Box)?;
            Ok(())
        })?;
        Ok(())
    })?;

    g.add_edge_with("internet", "web", EdgeAttrs::labeled("HTTPS"))
        .add_edge_with(
            "internet",
            "api",
            EdgeAttrs::labeled("HTTPS (direct)").line(LineStyle::Dashed),
        )
        .add_edge_with("web", "api", EdgeAttrs::labeled("HTTP(S)"))
        .add_edge_with("api", "openai", LineStyle::Dashed)
        .add_edge_with(
            "api",
            "redis",
            EdgeAttrs::labeled("cache / rate-limit").line(LineStyle::Dashed),
        );

    g.build()
}
