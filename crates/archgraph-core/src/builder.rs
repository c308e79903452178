//! Fluent construction of a [`Graph`].
//!
//! The builder is pure data assembly: it never touches the filesystem and
//! never checks edge endpoints. Endpoints are resolved by
//! [`Graph::validate`] at render time, so nodes and edges may be declared
//! in any order.

use tracing::trace;

use crate::attr::{ClusterAttrs, Direction, EdgeAttrs, Label, NodeStyle, Shape};
use crate::graph::{Cluster, ClusterId, Edge, Graph, Node, Scope};
use crate::{Error, Result};

/// Builder behaviour switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuilderConfig {
    /// Reject re-registering a node key with a different shape.
    ///
    /// Off by default: re-registration silently overwrites label and shape.
    pub strict_shapes: bool,
}

impl BuilderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strict_shapes(mut self, strict: bool) -> Self {
        self.strict_shapes = strict;
        self
    }
}

/// Accumulates nodes, edges and clusters for one graph.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    config: BuilderConfig,
    graph: Graph,
    open: Vec<ClusterId>,
}

impl GraphBuilder {
    /// Start a graph; `name` becomes the graph identifier in the engine input.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, BuilderConfig::default())
    }

    pub fn with_config(name: impl Into<String>, config: BuilderConfig) -> Self {
        Self {
            config,
            graph: Graph::empty(name.into()),
            open: Vec::new(),
        }
    }

    pub fn config(&self) -> BuilderConfig {
        self.config
    }

    fn current_scope(&self) -> Scope {
        self.open
            .last()
            .map_or(Scope::Root, |&id| Scope::Cluster(id))
    }

    /// Number of cluster scopes currently open.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn set_direction(&mut self, direction: Direction) -> &mut Self {
        self.graph.attrs.direction = direction;
        self
    }

    /// Set the default font for the graph, its nodes and its edges.
    pub fn set_font(&mut self, name: impl Into<String>, size: f32) -> &mut Self {
        self.graph.attrs.font_name = Some(name.into());
        self.graph.attrs.font_size = Some(size);
        self
    }

    /// Register a node, or update the node already registered under `key`.
    pub fn add_node(
        &mut self,
        key: impl Into<String>,
        label: impl Into<Label>,
        shape: Shape,
    ) -> Result<&mut Self> {
        self.upsert_node(key.into(), label.into(), shape, None)
    }

    /// Like [`add_node`](Self::add_node) with an explicit style, which
    /// replaces any style the node had before.
    pub fn add_styled_node(
        &mut self,
        key: impl Into<String>,
        label: impl Into<Label>,
        shape: Shape,
        style: impl Into<NodeStyle>,
    ) -> Result<&mut Self> {
        self.upsert_node(key.into(), label.into(), shape, Some(style.into()))
    }

    fn upsert_node(
        &mut self,
        key: String,
        label: Label,
        shape: Shape,
        style: Option<NodeStyle>,
    ) -> Result<&mut Self> {
        check_identifier("node key", &key)
            .map_err(|err| err.with_operation("builder::add_node"))?;

        if let Some(&idx) = self.graph.node_index.get(&key) {
            let node = &mut self.graph.nodes[idx];
            if self.config.strict_shapes && node.shape != shape {
                return Err(Error::duplicate_shape_conflict(
                    key,
                    node.shape.to_string(),
                    shape.to_string(),
                )
                .with_operation("builder::add_node"));
            }
            trace!(key = %key, "updating node");
            node.label = label;
            node.shape = shape;
            if let Some(style) = style {
                node.style = style;
            }
            return Ok(self);
        }

        let scope = self.current_scope();
        self.graph
            .node_index
            .insert(key.clone(), self.graph.nodes.len());
        self.graph.nodes.push(Node {
            key,
            label,
            shape,
            style: style.unwrap_or_default(),
            scope,
        });
        Ok(self)
    }

    /// Append an edge. Endpoints are resolved later, at render time.
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) -> &mut Self {
        self.add_edge_with(from, to, EdgeAttrs::default())
    }

    pub fn add_edge_with(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        attrs: impl Into<EdgeAttrs>,
    ) -> &mut Self {
        let scope = self.current_scope();
        self.graph.edges.push(Edge {
            from: from.into(),
            to: to.into(),
            attrs: attrs.into(),
            scope,
        });
        self
    }

    /// Append one unlabelled edge per `(from, to)` pair.
    pub fn edges<F, T>(&mut self, pairs: impl IntoIterator<Item = (F, T)>) -> &mut Self
    where
        F: Into<String>,
        T: Into<String>,
    {
        for (from, to) in pairs {
            self.add_edge(from, to);
        }
        self
    }

    /// Open a cluster scope nested in the current one.
    ///
    /// Opening a name that already exists under the same parent re-enters
    /// that cluster and overlays `attrs` onto its attributes.
    pub fn begin_cluster(
        &mut self,
        name: impl Into<String>,
        attrs: ClusterAttrs,
    ) -> Result<&mut Self> {
        let name = name.into();
        check_identifier("cluster name", &name)
            .map_err(|err| err.with_operation("builder::begin_cluster"))?;

        let parent = self.current_scope();
        let id = match self.graph.cluster_by_name(&name) {
            Some(id) => {
                if self.open.contains(&id) {
                    return Err(Error::invalid_argument(format!(
                        "cluster '{name}' is already open"
                    ))
                    .with_context("cluster", name)
                    .with_operation("builder::begin_cluster"));
                }
                let cluster = &mut self.graph.clusters[id.index()];
                if cluster.parent != parent {
                    return Err(Error::invalid_argument(format!(
                        "cluster '{name}' is already declared under a different parent"
                    ))
                    .with_context("cluster", name)
                    .with_operation("builder::begin_cluster"));
                }
                cluster.attrs.merge(attrs);
                id
            }
            None => {
                let id = ClusterId::new(self.graph.clusters.len());
                self.graph.clusters.push(Cluster {
                    name,
                    attrs,
                    parent,
                });
                id
            }
        };

        trace!(cluster = self.graph.cluster(id).name(), depth = self.open.len() + 1, "cluster opened");
        self.open.push(id);
        Ok(self)
    }

    /// Close the innermost open cluster scope.
    pub fn end_cluster(&mut self) -> Result<&mut Self> {
        match self.open.pop() {
            Some(_) => Ok(self),
            None => Err(Error::unbalanced_cluster().with_operation("builder::end_cluster")),
        }
    }

    /// Run `body` inside a cluster scope.
    ///
    /// The scope is closed even when `body` fails, so the builder stays
    /// balanced and the error from `body` is returned.
    pub fn cluster<F>(
        &mut self,
        name: impl Into<String>,
        attrs: ClusterAttrs,
        body: F,
    ) -> Result<&mut Self>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.begin_cluster(name, attrs)?;
        let result = body(self);
        self.end_cluster()?;
        result?;
        Ok(self)
    }

    /// Snapshot the graph built so far.
    ///
    /// Fails with `UnclosedCluster` while any cluster scope is open. The
    /// builder is left untouched either way.
    pub fn build(&self) -> Result<Graph> {
        if let Some(&innermost) = self.open.last() {
            return Err(Error::unclosed_cluster(
                self.graph.cluster(innermost).name(),
                self.open.len(),
            )
            .with_operation("builder::build"));
        }
        Ok(self.graph.clone())
    }
}

/// Keys and cluster names become engine identifiers verbatim, so they must be
/// non-empty and free of control characters.
fn check_identifier(what: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::invalid_argument(format!("{what} must not be empty")));
    }
    if value.chars().any(char::is_control) {
        return Err(
            Error::invalid_argument(format!("{what} must not contain control characters"))
                .with_context("value", value.escape_debug().to_string()),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::{LineStyle, Style};
    use crate::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_direction_is_top_to_bottom() {
        let graph = GraphBuilder::new("g").build().unwrap();
        assert_eq!(graph.attrs().direction, Direction::TopToBottom);
        assert_eq!(graph.name(), "g");
    }

    #[test]
    fn test_reregistration_overwrites() {
        let mut b = GraphBuilder::new("g");
        b.add_styled_node("a", "first", Shape::Box, Style::Rounded)
            .unwrap();
        b.add_node("a", "second", Shape::Diamond).unwrap();

        let graph = b.build().unwrap();
        assert_eq!(graph.nodes().len(), 1);
        let node = graph.node("a").unwrap();
        assert_eq!(node.label().text(), "second");
        assert_eq!(node.shape(), Shape::Diamond);
        // no style supplied: the earlier one is kept
        assert!(node.style().styles.contains(Style::Rounded));

        b.add_styled_node("a", "third", Shape::Diamond, Style::Dashed)
            .unwrap();
        let node = b.build().unwrap().node("a").unwrap().clone();
        assert!(!node.style().styles.contains(Style::Rounded));
        assert!(node.style().styles.contains(Style::Dashed));
    }

    #[test]
    fn test_strict_shapes_rejects_conflict() {
        let mut b = GraphBuilder::with_config("g", BuilderConfig::new().with_strict_shapes(true));
        b.add_node("a", "A", Shape::Box).unwrap();
        b.add_node("a", "A again", Shape::Box).unwrap();

        let err = b.add_node("a", "A", Shape::Diamond).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateShapeConflict);
        assert_eq!(err.context_value("key"), Some("a"));
        assert_eq!(b.build().unwrap().node("a").unwrap().label().text(), "A again");
    }

    #[test]
    fn test_empty_key_rejected() {
        let mut b = GraphBuilder::new("g");
        let err = b.add_node("", "nothing", Shape::Box).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_end_cluster_without_open_is_unbalanced() {
        let mut b = GraphBuilder::new("g");
        let err = b.end_cluster().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnbalancedCluster);

        b.begin_cluster("c", ClusterAttrs::new()).unwrap();
        b.end_cluster().unwrap();
        assert_eq!(
            b.end_cluster().unwrap_err().kind(),
            ErrorKind::UnbalancedCluster
        );
    }

    #[test]
    fn test_build_with_open_cluster_fails() {
        let mut b = GraphBuilder::new("g");
        b.begin_cluster("outer", ClusterAttrs::new()).unwrap();
        b.begin_cluster("inner", ClusterAttrs::new()).unwrap();

        let err = b.build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnclosedCluster);
        assert_eq!(err.context_value("cluster"), Some("inner"));
        assert_eq!(err.context_value("depth"), Some("2"));

        b.end_cluster().unwrap();
        assert_eq!(b.build().unwrap_err().kind(), ErrorKind::UnclosedCluster);
        b.end_cluster().unwrap();
        assert!(b.build().is_ok());
    }

    #[test]
    fn test_scopes_are_recorded() {
        let mut b = GraphBuilder::new("g");
        b.add_node("root", "Root", Shape::Box).unwrap();
        b.begin_cluster("outer", ClusterAttrs::labeled("Outer")).unwrap();
        b.add_node("o", "O", Shape::Box).unwrap();
        b.begin_cluster("inner", ClusterAttrs::new()).unwrap();
        b.add_node("i", "I", Shape::Box).unwrap();
        b.add_edge("i", "root");
        b.end_cluster().unwrap();
        b.end_cluster().unwrap();

        let graph = b.build().unwrap();
        let outer = graph.cluster_by_name("outer").unwrap();
        let inner = graph.cluster_by_name("inner").unwrap();
        assert_eq!(graph.cluster(inner).parent(), Scope::Cluster(outer));
        assert_eq!(graph.node("root").unwrap().scope(), Scope::Root);
        assert_eq!(graph.node("i").unwrap().scope(), Scope::Cluster(inner));
        assert_eq!(graph.edges()[0].scope(), Scope::Cluster(inner));
        assert!(graph.is_member("i", outer));
        assert!(graph.is_member("o", outer));
        assert!(!graph.is_member("o", inner));
        assert!(!graph.is_member("root", outer));
    }

    #[test]
    fn test_reopen_cluster_merges_attrs() {
        let mut b = GraphBuilder::new("g");
        b.begin_cluster("server", ClusterAttrs::labeled("server"))
            .unwrap();
        b.add_node("a", "A", Shape::Box).unwrap();
        b.end_cluster().unwrap();
        b.begin_cluster("server", ClusterAttrs::labeled("server/ (API)"))
            .unwrap();
        b.add_node("b", "B", Shape::Box).unwrap();
        b.end_cluster().unwrap();

        let graph = b.build().unwrap();
        assert_eq!(graph.clusters().len(), 1);
        let id = graph.cluster_by_name("server").unwrap();
        assert_eq!(
            graph.cluster(id).attrs().label.as_ref().unwrap().text(),
            "server/ (API)"
        );
        assert_eq!(graph.nodes_in(Scope::Cluster(id)).count(), 2);
    }

    #[test]
    fn test_reopen_cluster_under_other_parent_fails() {
        let mut b = GraphBuilder::new("g");
        b.begin_cluster("a", ClusterAttrs::new()).unwrap();
        b.end_cluster().unwrap();
        b.begin_cluster("b", ClusterAttrs::new()).unwrap();
        let err = b.begin_cluster("a", ClusterAttrs::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(b.depth(), 1);
    }

    #[test]
    fn test_prefixed_name_refers_to_same_cluster() {
        let mut b = GraphBuilder::new("g");
        b.begin_cluster("server", ClusterAttrs::labeled("server")).unwrap();
        b.add_node("a", "A", Shape::Box).unwrap();
        b.end_cluster().unwrap();
        b.begin_cluster("cluster_server", ClusterAttrs::labeled("server/ (API)"))
            .unwrap();
        b.add_node("b", "B", Shape::Box).unwrap();
        b.end_cluster().unwrap();

        let graph = b.build().unwrap();
        assert_eq!(graph.clusters().len(), 1);
        let id = graph.cluster_by_name("cluster_server").unwrap();
        assert_eq!(graph.cluster_by_name("server"), Some(id));
        assert_eq!(graph.cluster(id).dot_id(), "cluster_server");
        assert_eq!(
            graph.cluster(id).attrs().label.as_ref().unwrap().text(),
            "server/ (API)"
        );
        assert_eq!(graph.nodes_in(Scope::Cluster(id)).count(), 2);
    }

    #[test]
    fn test_prefixed_name_under_other_parent_fails() {
        let mut b = GraphBuilder::new("g");
        b.begin_cluster("outer", ClusterAttrs::new()).unwrap();
        b.begin_cluster("server", ClusterAttrs::new()).unwrap();
        b.end_cluster().unwrap();
        b.end_cluster().unwrap();

        let err = b
            .begin_cluster("cluster_server", ClusterAttrs::new())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.context_value("cluster"), Some("cluster_server"));
        assert_eq!(b.depth(), 0);
        assert_eq!(b.build().unwrap().clusters().len(), 2);
    }

    #[test]
    fn test_reopen_open_cluster_fails() {
        let mut b = GraphBuilder::new("g");
        b.begin_cluster("outer", ClusterAttrs::new()).unwrap();
        b.begin_cluster("inner", ClusterAttrs::new()).unwrap();
        let err = b.begin_cluster("outer", ClusterAttrs::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.message().contains("already open"), "{err}");
        assert_eq!(b.depth(), 2);
    }

    #[test]
    fn test_control_characters_rejected_in_identifiers() {
        let mut b = GraphBuilder::new("g");
        b.add_node("ab", "plain", Shape::Box).unwrap();
        let err = b.add_node("a\rb", "with cr", Shape::Diamond).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.context_value("value"), Some("a\\rb"));

        let err = b
            .begin_cluster("web\tsite", ClusterAttrs::new())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(b.depth(), 0);
        assert_eq!(b.build().unwrap().nodes().len(), 1);
    }

    #[test]
    fn test_cluster_closure_closes_on_error() {
        let mut b = GraphBuilder::new("g");
        let err = b
            .cluster("c", ClusterAttrs::new(), |b| {
                b.add_node("", "bad", Shape::Box)?;
                Ok(())
            })
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(b.depth(), 0);
        assert!(b.build().is_ok());
    }

    #[test]
    fn test_edges_keep_declaration_order() {
        let mut b = GraphBuilder::new("g");
        b.edges([("a", "b"), ("b", "c")]);
        b.add_edge_with("c", "a", EdgeAttrs::labeled("back").line(LineStyle::Dashed));

        let graph = b.build().unwrap();
        let pairs: Vec<(&str, &str)> = graph
            .edges()
            .iter()
            .map(|e| (e.from_key(), e.to_key()))
            .collect();
        assert_eq!(pairs, vec![("a", "b"), ("b", "c"), ("c", "a")]);
        assert_eq!(graph.edges()[2].attrs().line, LineStyle::Dashed);
    }
}
