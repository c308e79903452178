use archgraph_core::{
    ClusterAttrs, Color, Direction, EdgeAttrs, ErrorKind, Graph, GraphBuilder, LineStyle,
    NodeStyle, Scope, Shape,
};
use pretty_assertions::assert_eq;

/// Two clusters side by side plus a root node, mirroring a typical
/// service overview.
fn clustered_builder() -> GraphBuilder {
    let panel = Color::new("#f8f9fa").unwrap();
    let mut b = GraphBuilder::new("Overview");
    b.set_direction(Direction::LeftToRight);
    b.add_styled_node(
        "openai",
        "OpenAI API",
        Shape::Component,
        NodeStyle::filled(Color::new("#EEE6FF").unwrap()),
    )
    .unwrap();

    b.cluster(
        "server",
        ClusterAttrs::labeled("server/").fill(panel.clone()),
        |b| {
            b.add_node("controller", "Controller", Shape::Box)?;
            b.add_node("service", "Service", Shape::Box)?;
            b.add_edge("controller", "service");
            Ok(())
        },
    )
    .unwrap();

    b.cluster("site", ClusterAttrs::labeled("site/").fill(panel), |b| {
        b.add_node("worker", "Worker", Shape::Box)?;
        Ok(())
    })
    .unwrap();
    b
}

fn build(b: &GraphBuilder) -> Graph {
    b.build().expect("builder should be balanced")
}

#[test]
fn cluster_members_are_visible_from_everywhere() {
    let mut b = clustered_builder();
    // outside -> inside, inside -> outside, cluster -> other cluster
    b.add_edge("openai", "controller");
    b.add_edge("service", "openai");
    b.add_edge_with(
        "worker",
        "controller",
        EdgeAttrs::labeled("POST /agent/chat/stream").line(LineStyle::Bold),
    );
    // and from inside a cluster back to another cluster's member
    b.cluster("site", ClusterAttrs::new(), |b| {
        b.add_edge("worker", "service");
        Ok(())
    })
    .unwrap();

    let graph = build(&b);
    assert!(graph.validate().is_ok());
    assert_eq!(graph.edges().len(), 5);
}

#[test]
fn validity_is_exactly_edge_endpoint_closure() {
    let base = clustered_builder();
    let keys = ["openai", "controller", "service", "worker", "ghost"];

    for from in keys {
        for to in keys {
            let mut b = base.clone();
            b.add_edge(from, to);
            let graph = build(&b);
            let expected = graph.contains_node(from) && graph.contains_node(to);
            assert_eq!(
                graph.validate().is_ok(),
                expected,
                "edge {from} -> {to}"
            );
        }
    }
}

#[test]
fn dangling_target_is_named() {
    let mut b = GraphBuilder::new("g");
    b.add_node("A", "A", Shape::Box).unwrap();
    b.add_edge("A", "Z");

    let err = build(&b).validate().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DanglingEdgeReference);
    assert_eq!(err.context_value("to_key"), Some("Z"));
    assert_eq!(err.context_value("from_key"), None);
}

#[test]
fn dangling_source_is_named() {
    let mut b = GraphBuilder::new("g");
    b.add_node("B", "B", Shape::Box).unwrap();
    b.add_edge("Y", "B");

    let err = build(&b).validate().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DanglingEdgeReference);
    assert_eq!(err.context_value("from_key"), Some("Y"));
}

#[test]
fn forward_references_resolve() {
    let mut b = GraphBuilder::new("g");
    b.add_edge("early", "late");
    b.add_node("late", "declared after its edge", Shape::Note)
        .unwrap();
    b.add_node("early", "also late", Shape::Box).unwrap();

    assert!(build(&b).validate().is_ok());
}

#[test]
fn unclosed_cluster_fails_regardless_of_content() {
    for count in [0usize, 1, 5, 25] {
        let mut b = GraphBuilder::new("g");
        b.begin_cluster("open", ClusterAttrs::new()).unwrap();
        for i in 0..count {
            b.add_node(format!("n{i}"), "node", Shape::Box).unwrap();
            b.add_edge(format!("n{i}"), "n0");
        }
        let err = b.build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnclosedCluster, "count {count}");
    }
}

#[test]
fn build_failure_leaves_builder_usable() {
    let mut b = GraphBuilder::new("g");
    b.begin_cluster("c", ClusterAttrs::new()).unwrap();
    b.add_node("a", "A", Shape::Box).unwrap();
    assert!(b.build().is_err());

    b.end_cluster().unwrap();
    let graph = build(&b);
    let id = graph.cluster_by_name("c").unwrap();
    assert_eq!(graph.node("a").unwrap().scope(), Scope::Cluster(id));
}

#[test]
fn reregistered_node_keeps_its_cluster() {
    let mut b = GraphBuilder::new("g");
    b.cluster("c", ClusterAttrs::new(), |b| {
        b.add_node("a", "inside", Shape::Box)?;
        Ok(())
    })
    .unwrap();
    b.add_node("a", "relabelled at root", Shape::Box).unwrap();

    let graph = build(&b);
    let id = graph.cluster_by_name("c").unwrap();
    assert_eq!(graph.nodes().len(), 1);
    assert_eq!(graph.node("a").unwrap().scope(), Scope::Cluster(id));
    assert_eq!(graph.node("a").unwrap().label().text(), "relabelled at root");
}

#[test]
fn snapshot_is_independent_of_later_mutation() {
    let mut b = GraphBuilder::new("g");
    b.add_node("a", "A", Shape::Box).unwrap();
    let first = build(&b);

    b.add_node("b", "B", Shape::Box).unwrap();
    let second = build(&b);

    assert_eq!(first.nodes().len(), 1);
    assert_eq!(second.nodes().len(), 2);
}
