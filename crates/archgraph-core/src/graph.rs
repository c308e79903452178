//! The immutable graph snapshot produced by [`GraphBuilder::build`].
//!
//! Nodes, edges and clusters live in flat ordered vectors; every element
//! records the [`Scope`] it was declared in. Node keys form a single
//! namespace across all scopes, so cluster membership never affects whether a
//! key is a valid edge endpoint.
//!
//! [`GraphBuilder::build`]: crate::GraphBuilder::build

use std::collections::HashMap;

use crate::attr::{ClusterAttrs, EdgeAttrs, GraphAttrs, Label, NodeStyle, Shape};
use crate::{Error, Result};

/// Prefix the layout engine requires before it draws a subgraph as a bounded region.
pub const CLUSTER_PREFIX: &str = "cluster_";

/// Index of a cluster within its [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(u32);

impl ClusterId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Where an element was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    #[default]
    Root,
    Cluster(ClusterId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) key: String,
    pub(crate) label: Label,
    pub(crate) shape: Shape,
    pub(crate) style: NodeStyle,
    pub(crate) scope: Scope,
}

impl Node {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn style(&self) -> &NodeStyle {
        &self.style
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub(crate) from: String,
    pub(crate) to: String,
    pub(crate) attrs: EdgeAttrs,
    pub(crate) scope: Scope,
}

impl Edge {
    pub fn from_key(&self) -> &str {
        &self.from
    }

    pub fn to_key(&self) -> &str {
        &self.to
    }

    pub fn attrs(&self) -> &EdgeAttrs {
        &self.attrs
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub(crate) name: String,
    pub(crate) attrs: ClusterAttrs,
    pub(crate) parent: Scope,
}

impl Cluster {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attrs(&self) -> &ClusterAttrs {
        &self.attrs
    }

    pub fn parent(&self) -> Scope {
        self.parent
    }

    /// Subgraph identifier with the cluster prefix applied exactly once.
    pub fn dot_id(&self) -> String {
        format!("{CLUSTER_PREFIX}{}", cluster_stem(&self.name))
    }
}

fn cluster_stem(name: &str) -> &str {
    name.strip_prefix(CLUSTER_PREFIX).unwrap_or(name)
}

/// A finished, read-only graph description.
///
/// `Graph` holds no interior mutability, so a single instance can be shared
/// across threads and rendered to several formats concurrently.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    name: String,
    pub(crate) attrs: GraphAttrs,
    pub(crate) nodes: Vec<Node>,
    pub(crate) node_index: HashMap<String, usize>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) clusters: Vec<Cluster>,
}

impl Graph {
    pub(crate) fn empty(name: String) -> Self {
        Self {
            name,
            attrs: GraphAttrs::default(),
            nodes: Vec::new(),
            node_index: HashMap::new(),
            edges: Vec::new(),
            clusters: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attrs(&self) -> &GraphAttrs {
        &self.attrs
    }

    /// All nodes in declaration order, across every scope.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, key: &str) -> Option<&Node> {
        self.node_index.get(key).map(|&idx| &self.nodes[idx])
    }

    pub fn contains_node(&self, key: &str) -> bool {
        self.node_index.contains_key(key)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn cluster(&self, id: ClusterId) -> &Cluster {
        &self.clusters[id.index()]
    }

    /// Look a cluster up by name. `server` and `cluster_server` name the same
    /// cluster, since both are emitted as `cluster_server`.
    pub fn cluster_by_name(&self, name: &str) -> Option<ClusterId> {
        let stem = cluster_stem(name);
        self.clusters
            .iter()
            .position(|c| cluster_stem(&c.name) == stem)
            .map(ClusterId::new)
    }

    /// Nodes declared directly in `scope`, in declaration order.
    pub fn nodes_in(&self, scope: Scope) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(move |n| n.scope == scope)
    }

    pub fn root_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes_in(Scope::Root)
    }

    /// Edges declared directly in `scope`, in declaration order.
    pub fn edges_in(&self, scope: Scope) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |e| e.scope == scope)
    }

    /// Clusters whose parent is `scope`, in declaration order.
    pub fn clusters_in(&self, scope: Scope) -> impl Iterator<Item = (ClusterId, &Cluster)> + '_ {
        self.clusters
            .iter()
            .enumerate()
            .filter(move |(_, c)| c.parent == scope)
            .map(|(idx, c)| (ClusterId::new(idx), c))
    }

    /// True if `key` is declared in `cluster` or in any cluster nested inside it.
    pub fn is_member(&self, key: &str, cluster: ClusterId) -> bool {
        let Some(node) = self.node(key) else {
            return false;
        };
        self.scope_within(node.scope, cluster)
    }

    /// True if `scope` is `cluster` or lies beneath it.
    pub fn scope_within(&self, mut scope: Scope, cluster: ClusterId) -> bool {
        while let Scope::Cluster(id) = scope {
            if id == cluster {
                return true;
            }
            scope = self.cluster(id).parent;
        }
        false
    }

    /// Check that every edge endpoint resolves to a declared node key.
    ///
    /// Edges are checked in declaration order, source before target; the
    /// first unresolved key is reported.
    pub fn validate(&self) -> Result<()> {
        for edge in &self.edges {
            if !self.contains_node(&edge.from) {
                return Err(Error::dangling_from(&edge.from)
                    .with_context("to", edge.to.clone())
                    .with_operation("graph::validate"));
            }
            if !self.contains_node(&edge.to) {
                return Err(Error::dangling_to(&edge.to)
                    .with_context("from", edge.from.clone())
                    .with_operation("graph::validate"));
            }
        }
        Ok(())
    }
}
