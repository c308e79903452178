//! Graph serialization into DOT source for the layout engine.
//!
//! [`to_dot`] walks a [`Graph`] scope by scope: graph attributes and font
//! defaults, root nodes, clusters as nested `subgraph cluster_*` blocks, then
//! edges. Output is deterministic for identical input.
//!
//! # Module Structure
//!
//! - [`dot`]: escaping, attribute lists and the indenting [`DotBuilder`]

pub mod dot;

use std::collections::HashMap;

use tracing::debug;

use archgraph_core::{Cluster, ClusterId, Edge, Graph, LineStyle, Node, Scope};

pub use dot::{Attrs, DotBuilder, escape, quote_id, render_label};

/// Render `graph` to DOT source. Does not validate edge endpoints.
pub fn to_dot(graph: &Graph) -> String {
    let placements = place_edges(graph);

    let mut dot = DotBuilder::new(graph.name());
    let attrs = graph.attrs();
    dot.attr("rankdir", attrs.direction.as_ref());

    let mut font = Attrs::new();
    font.text_opt("fontname", attrs.font_name.as_deref());
    font.text_opt("fontsize", attrs.font_size.map(|s| s.to_string()));
    dot.attrs(&font);
    dot.defaults("node", &font);
    dot.defaults("edge", &font);
    dot.blank();

    write_scope(&mut dot, graph, Scope::Root, &placements);

    let output = dot.build();
    debug!(
        graph = graph.name(),
        nodes = graph.nodes().len(),
        edges = graph.edges().len(),
        clusters = graph.clusters().len(),
        bytes = output.len(),
        "graph serialized"
    );
    output
}

/// Pick the block each edge is written in.
///
/// An edge stays in the cluster it was declared in only while both
/// endpoints belong to that cluster; otherwise it moves outward until they
/// do, ending at the root. Mentioning a node inside a subgraph makes it a
/// member there, so this keeps edges from dragging nodes across clusters.
fn place_edges(graph: &Graph) -> HashMap<Scope, Vec<&Edge>> {
    let mut placements: HashMap<Scope, Vec<&Edge>> = HashMap::new();
    for edge in graph.edges() {
        let mut scope = edge.scope();
        while let Scope::Cluster(id) = scope {
            if graph.is_member(edge.from_key(), id) && graph.is_member(edge.to_key(), id) {
                break;
            }
            scope = graph.cluster(id).parent();
        }
        placements.entry(scope).or_default().push(edge);
    }
    placements
}

fn write_scope(
    dot: &mut DotBuilder,
    graph: &Graph,
    scope: Scope,
    placements: &HashMap<Scope, Vec<&Edge>>,
) {
    for node in graph.nodes_in(scope) {
        dot.node(node.key(), &node_attrs(node));
    }

    for (id, cluster) in graph.clusters_in(scope) {
        write_cluster(dot, graph, id, cluster, placements);
    }

    if let Some(edges) = placements.get(&scope) {
        for edge in edges {
            dot.edge(edge.from_key(), edge.to_key(), &edge_attrs(edge));
        }
    }
}

fn write_cluster(
    dot: &mut DotBuilder,
    graph: &Graph,
    id: ClusterId,
    cluster: &Cluster,
    placements: &HashMap<Scope, Vec<&Edge>>,
) {
    dot.start_cluster(&cluster.dot_id());
    dot.attrs(&cluster_attrs(cluster));
    write_scope(dot, graph, Scope::Cluster(id), placements);
    dot.end_cluster();
}

fn node_attrs(node: &Node) -> Attrs {
    let style = node.style();
    let mut attrs = Attrs::new();
    attrs.label(node.label());
    attrs.text("shape", node.shape().as_ref());
    if !style.styles.is_empty() {
        attrs.text("style", style.styles.to_string());
    }
    attrs.text_opt("fillcolor", style.fill_color.as_ref().map(|c| c.as_str()));
    attrs.text_opt("color", style.color.as_ref().map(|c| c.as_str()));
    attrs
}

fn edge_attrs(edge: &Edge) -> Attrs {
    let edge_attrs = edge.attrs();
    let mut attrs = Attrs::new();
    if let Some(label) = &edge_attrs.label {
        attrs.label(label);
    }
    if edge_attrs.line != LineStyle::Solid {
        attrs.text("style", edge_attrs.line.as_ref());
    }
    attrs.text_opt("color", edge_attrs.color.as_ref().map(|c| c.as_str()));
    attrs
}

fn cluster_attrs(cluster: &Cluster) -> Attrs {
    let cluster_attrs = cluster.attrs();
    let mut attrs = Attrs::new();
    if let Some(label) = &cluster_attrs.label {
        attrs.label(label);
    }
    if !cluster_attrs.styles.is_empty() {
        attrs.text("style", cluster_attrs.styles.to_string());
    }
    attrs.text_opt(
        "fillcolor",
        cluster_attrs.fill_color.as_ref().map(|c| c.as_str()),
    );
    attrs.text_opt("color", cluster_attrs.color.as_ref().map(|c| c.as_str()));
    attrs
}
