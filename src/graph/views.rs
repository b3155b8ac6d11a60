//! Textual views derived from a graph snapshot.
//!
//! All of these are pure functions of the store and skip edges that are
//! fading out.

use std::cmp::Ordering;
use std::fmt;

use super::model::{EdgeKind, Graph, NodeId, Weight};

/// One outgoing entry in the adjacency list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighbor {
	/// Node the edge points to.
	pub target: NodeId,
	/// Stored weight of that edge.
	pub weight: Weight,
}

/// Outgoing neighbors per node, in node insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyList {
	/// One row per node, including nodes with no outgoing edges.
	pub entries: Vec<(NodeId, Vec<Neighbor>)>,
}

impl AdjacencyList {
	/// Row for `id`, if the node exists.
	pub fn neighbors(&self, id: &str) -> Option<&[Neighbor]> {
		self.entries
			.iter()
			.find(|(node, _)| node == id)
			.map(|(_, n)| n.as_slice())
	}

	/// Render one row as `A → [ B(3), C(1) ]`, omitting weights when unweighted.
	pub fn format_row(id: &str, neighbors: &[Neighbor], weighted: bool) -> String {
		if neighbors.is_empty() {
			return format!("{id} → [ ]");
		}
		let items: Vec<String> = neighbors
			.iter()
			.map(|n| {
				if weighted {
					format!("{}({})", n.target, n.weight)
				} else {
					n.target.clone()
				}
			})
			.collect();
		format!("{id} → [ {} ]", items.join(", "))
	}
}

impl fmt::Display for AdjacencyList {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (id, neighbors) in &self.entries {
			writeln!(f, "{}", Self::format_row(id, neighbors, true))?;
		}
		Ok(())
	}
}

/// Square matrix over the sorted node ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyMatrix {
	/// Row and column headers.
	pub node_ids: Vec<NodeId>,
	/// `cells[i][j]` totals the edges from `node_ids[i]` to `node_ids[j]`.
	pub cells: Vec<Vec<u64>>,
}

impl AdjacencyMatrix {
	/// Cell for a pair of ids; `None` if either is unknown.
	pub fn get(&self, source: &str, target: &str) -> Option<u64> {
		let i = self.node_ids.iter().position(|id| id == source)?;
		let j = self.node_ids.iter().position(|id| id == target)?;
		Some(self.cells[i][j])
	}
}

/// In/out totals for one node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Degree {
	/// Total over incoming edges.
	pub in_degree: u64,
	/// Total over outgoing edges.
	pub out_degree: u64,
}

/// Degree per node in sorted-id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DegreeTable {
	/// One row per node.
	pub rows: Vec<(NodeId, Degree)>,
	/// Whether a single "Degree" column suffices: at least one live edge and
	/// none of them directed.
	pub all_undirected: bool,
}

impl DegreeTable {
	/// Row for `id`, if the node exists.
	pub fn get(&self, id: &str) -> Option<Degree> {
		self.rows.iter().find(|(n, _)| n == id).map(|(_, d)| *d)
	}
}

/// Outgoing live edges of every node.
pub fn adjacency_list(graph: &Graph) -> AdjacencyList {
	let mut entries: Vec<(NodeId, Vec<Neighbor>)> = graph
		.nodes()
		.iter()
		.map(|n| (n.id.clone(), Vec::new()))
		.collect();
	for edge in graph.live_edges() {
		if let Some((_, neighbors)) = entries.iter_mut().find(|(id, _)| *id == edge.source) {
			neighbors.push(Neighbor {
				target: edge.target.clone(),
				weight: edge.weight,
			});
		}
	}
	AdjacencyList { entries }
}

/// Node ids ordered numerically when every id is a number, lexicographically
/// otherwise.
pub fn sorted_node_ids(graph: &Graph) -> Vec<NodeId> {
	let mut ids: Vec<NodeId> = graph.nodes().iter().map(|n| n.id.clone()).collect();
	let numeric: Option<Vec<f64>> = ids.iter().map(|id| parse_numeric(id)).collect();
	match numeric {
		Some(values) if !values.is_empty() => {
			let mut keyed: Vec<(f64, NodeId)> = values.into_iter().zip(ids).collect();
			keyed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
			keyed.into_iter().map(|(_, id)| id).collect()
		}
		_ => {
			ids.sort();
			ids
		}
	}
}

fn parse_numeric(id: &str) -> Option<f64> {
	let trimmed = id.trim();
	if trimmed.is_empty() {
		return None;
	}
	trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Unweighted mode counts every edge as `1`.
fn contribution(weight: Weight, weighted: bool) -> u64 {
	if weighted { u64::from(weight) } else { 1 }
}

/// Matrix of edge weights (or counts when `weighted` is off).
pub fn adjacency_matrix(graph: &Graph, weighted: bool) -> AdjacencyMatrix {
	let node_ids = sorted_node_ids(graph);
	let size = node_ids.len();
	let mut cells = vec![vec![0u64; size]; size];
	let index = |id: &str| node_ids.iter().position(|n| n == id);

	for edge in graph.live_edges() {
		if let (Some(i), Some(j)) = (index(&edge.source), index(&edge.target)) {
			cells[i][j] += contribution(edge.weight, weighted);
		}
	}
	AdjacencyMatrix { node_ids, cells }
}

/// In- and out-degree of every node, weighted or by edge count.
pub fn degree_table(graph: &Graph, weighted: bool) -> DegreeTable {
	let mut rows: Vec<(NodeId, Degree)> = sorted_node_ids(graph)
		.into_iter()
		.map(|id| (id, Degree::default()))
		.collect();

	let mut any_live = false;
	let mut any_directed = false;
	for edge in graph.live_edges() {
		any_live = true;
		any_directed |= edge.kind == EdgeKind::Directed;
		let amount = contribution(edge.weight, weighted);
		for (id, degree) in rows.iter_mut() {
			if *id == edge.source {
				degree.out_degree += amount;
			}
			if *id == edge.target {
				degree.in_degree += amount;
			}
		}
	}

	DegreeTable {
		rows,
		all_undirected: any_live && !any_directed,
	}
}
