//! Directed graph view over a resolved package list, using petgraph.
//!
//! The [`PackageList`] map is the canonical output shape; this view derives
//! an adjacency structure from it for inspection tasks that are awkward on
//! a flat map, such as walking dependents or finding circular dependency
//! chains.

use petgraph::algo::{is_cyclic_directed, tarjan_scc};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

use super::package_list::{PackageList, PackageRef};

/// A directed dependency graph derived from a [`PackageList`].
///
/// Nodes are `name@version` references; edges point from a dependent
/// package to the exact instance its edge was pinned to. Edges marked
/// missing in the source list have no target and are not represented.
///
/// # Example
///
/// ```rust
/// use lockgraph::graph::{DependencyGraph, PackageInfo, PackageList, Resolution};
///
/// let mut app = PackageInfo::new(".", ".");
/// app.dependencies.insert("left-pad".into(), Resolution::Pinned("1.3.0".into()));
/// let list: PackageList = vec![app, PackageInfo::new("left-pad", "1.3.0")]
///     .into_iter()
///     .collect();
///
/// let graph = DependencyGraph::from_package_list(&list);
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// assert!(!graph.has_cycles());
/// ```
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    graph: DiGraph<PackageRef, ()>,
    node_indices: HashMap<PackageRef, NodeIndex>,
}

impl DependencyGraph {
    /// Builds the adjacency view of a resolved package list.
    ///
    /// A pinned edge whose target reference has no entry in the list still
    /// gets a node, so closure violations remain visible in the view.
    pub fn from_package_list(packages: &PackageList) -> Self {
        let mut graph = DiGraph::with_capacity(packages.len(), packages.len());
        let mut node_indices: HashMap<PackageRef, NodeIndex> =
            HashMap::with_capacity(packages.len());

        fn index_of(
            graph: &mut DiGraph<PackageRef, ()>,
            node_indices: &mut HashMap<PackageRef, NodeIndex>,
            r: &PackageRef,
        ) -> NodeIndex {
            if let Some(&idx) = node_indices.get(r) {
                return idx;
            }
            let idx = graph.add_node(r.clone());
            node_indices.insert(r.clone(), idx);
            idx
        }

        for (owner, info) in packages.iter() {
            let from = index_of(&mut graph, &mut node_indices, owner);
            for (dep_name, resolution) in &info.dependencies {
                if let Some(version) = resolution.version() {
                    let to = index_of(
                        &mut graph,
                        &mut node_indices,
                        &PackageRef::new(dep_name, version),
                    );
                    graph.add_edge(from, to, ());
                }
            }
        }

        Self {
            graph,
            node_indices,
        }
    }

    /// Number of package instances in the view.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of pinned dependency edges in the view.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns true if the reference appears in the view.
    pub fn contains(&self, r: &PackageRef) -> bool {
        self.node_indices.contains_key(r)
    }

    /// Instances the given package depends on (outgoing edges).
    pub fn dependencies_of(&self, r: &PackageRef) -> Vec<&PackageRef> {
        self.neighbors(r, Direction::Outgoing)
    }

    /// Instances that depend on the given package (incoming edges).
    pub fn dependents_of(&self, r: &PackageRef) -> Vec<&PackageRef> {
        self.neighbors(r, Direction::Incoming)
    }

    fn neighbors(&self, r: &PackageRef, direction: Direction) -> Vec<&PackageRef> {
        let Some(&idx) = self.node_indices.get(r) else {
            return Vec::new();
        };

        self.graph
            .edges_directed(idx, direction)
            .filter_map(|edge| {
                let other = match direction {
                    Direction::Outgoing => edge.target(),
                    Direction::Incoming => edge.source(),
                };
                self.graph.node_weight(other)
            })
            .collect()
    }

    /// Returns true if the graph contains at least one dependency cycle.
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Finds all circular dependency chains.
    ///
    /// Each strongly connected component with more than one node, plus any
    /// self-looping node, is reported as one [`CycleInfo`].
    pub fn detect_cycles(&self) -> Vec<CycleInfo> {
        let mut cycles = Vec::new();

        for scc in tarjan_scc(&self.graph) {
            if scc.len() > 1 {
                let nodes = scc
                    .iter()
                    .filter_map(|&idx| self.graph.node_weight(idx))
                    .cloned()
                    .collect();
                cycles.push(CycleInfo { nodes });
            } else if let [idx] = scc[..] {
                if self.graph.contains_edge(idx, idx) {
                    if let Some(r) = self.graph.node_weight(idx) {
                        cycles.push(CycleInfo {
                            nodes: vec![r.clone()],
                        });
                    }
                }
            }
        }

        cycles
    }
}

impl From<&PackageList> for DependencyGraph {
    fn from(packages: &PackageList) -> Self {
        Self::from_package_list(packages)
    }
}

/// One circular dependency chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleInfo {
    /// The instances in the cycle; the last edge returns to the first.
    pub nodes: Vec<PackageRef>,
}

impl CycleInfo {
    /// Formats the cycle as "a@1 -> b@1 -> a@1".
    pub fn cycle_path(&self) -> String {
        if self.nodes.is_empty() {
            return String::new();
        }
        let mut path = self
            .nodes
            .iter()
            .map(PackageRef::to_string)
            .collect::<Vec<_>>()
            .join(" -> ");
        path.push_str(" -> ");
        path.push_str(&self.nodes[0].to_string());
        path
    }

    /// Number of instances in the cycle.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the cycle holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
