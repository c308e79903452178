use archgraph_core::{BuilderConfig, Graph, GraphBuilder, Result, Shape};

const PANEL: &str = "#f8f9fa";

/// deps -> build -> prod, once per Dockerfile.
pub fn build(config: BuilderConfig) -> Result<Graph> {
    let mut g = super::builder("DockerMultistage", config);

    g.cluster("server", super::panel("server/Dockerfile", PANEL)?, |s| {
        stages(
            s,
            "s",
            [
                "deps\nnode:22-alpine\n`npm ci --omit=dev`",
                "build\ncopy src + node_modules\n`npm run build`",
                "prod\ncopy dist + node_modules\n`node dist/main`",
            ],
        )
    })?;

    g.cluster("site", super::panel("site/Dockerfile", PANEL)?, |s| {
        stages(
            s,
            "w",
            [
                "deps\nnode:22-alpine\n`npm ci`",
                "build\ncopy src + node_modules\n`npm run build`",
                "prod\ncopy .next + public\n`npm start`",
            ],
        )
    })?;

    g.build()
}

fn stages(g: &mut GraphBuilder, prefix: &str, [deps, build, prod]: [&str; 3]) -> Result<()> {
    let key = |stage: &str| format!("{prefix}_{stage}");
    g.add_node(key("deps"), deps, Shape::Box)?
        .add_node(key("build"), build, Shape::Box)?
        .add_node(key("prod"), prod, Shape::Box)?;
    g.edges([(key("deps"), key("build")), (key("build"), key("prod"))]);
    Ok(())
}
