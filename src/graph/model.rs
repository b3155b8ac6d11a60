use std::collections::HashSet;
use std::fmt;

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::error::{GraphError, Result};

/// Node identifier, chosen by the user.
pub type NodeId = String;

/// Edge weight. Zero is never stored; it is normalized to `1`.
pub type Weight = u32;

/// Generated, never-reused edge identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(u64);

impl fmt::Display for EdgeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "e{}", self.0)
	}
}

/// Whether an edge is one-way or part of an undirected pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
	/// `source -> target`
	Directed,
	/// `source -- target`, stored as a mirrored pair of records.
	Undirected,
}

/// Where an edge is in its fade-in / fade-out lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeStatus {
	/// Just inserted, not yet faded in.
	New,
	/// Fully part of the graph.
	Visible,
	/// Logically deleted, kept around until its fade-out finishes.
	Removing,
}

/// A labeled point on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
	/// Unique, user-chosen label.
	pub id: NodeId,
	/// Canvas position of the center, horizontal.
	pub x: f64,
	/// Canvas position of the center, vertical.
	pub y: f64,
}

/// A single directed record. Undirected edges are two of these.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
	/// Identifier, unique for the life of the graph.
	pub id: EdgeId,
	/// Node the record points from.
	pub source: NodeId,
	/// Node the record points to.
	pub target: NodeId,
	/// Directed, or one half of an undirected pair.
	pub kind: EdgeKind,
	/// Always `1` for edges added in unweighted mode.
	pub weight: Weight,
	/// Position in the fade lifecycle.
	pub status: EdgeStatus,
}

impl Edge {
	/// Starts and ends on the same node.
	pub fn is_self_loop(&self) -> bool {
		self.source == self.target
	}

	/// Removing edges are invisible to every derived view.
	pub fn is_live(&self) -> bool {
		self.status != EdgeStatus::Removing
	}

	fn matches(&self, source: &str, target: &str, kind: EdgeKind, weight: Option<Weight>) -> bool {
		self.is_live()
			&& self.source == source
			&& self.target == target
			&& self.kind == kind
			&& weight.is_none_or(|w| self.weight == w)
	}
}

/// The graph store: nodes and edges in insertion order.
///
/// Every mutating operation either succeeds completely or returns an error
/// and leaves the store untouched.
#[derive(Debug, Clone)]
pub struct Graph {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	next_edge_id: u64,
	/// Source of generated node positions.
	scatter: SmallRng,
}

/// Fixed so a fresh session always lays its first nodes out the same way.
const SCATTER_SEED: u64 = 0x5eed_9301;

impl Default for Graph {
	fn default() -> Self {
		Self {
			nodes: Vec::new(),
			edges: Vec::new(),
			next_edge_id: 0,
			scatter: SmallRng::seed_from_u64(SCATTER_SEED),
		}
	}
}

// The position generator is not part of a graph's contents.
impl PartialEq for Graph {
	fn eq(&self, other: &Self) -> bool {
		self.nodes == other.nodes
			&& self.edges == other.edges
			&& self.next_edge_id == other.next_edge_id
	}
}

impl Graph {
	/// An empty graph.
	pub fn new() -> Self {
		Self::default()
	}

	/// Nodes in insertion order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// All edge records, including those still fading out.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Edges that count towards the adjacency list, matrix and degrees.
	pub fn live_edges(&self) -> impl Iterator<Item = &Edge> {
		self.edges.iter().filter(|e| e.is_live())
	}

	/// Look up a node by id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Look up an edge record by id.
	pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
		self.edges.iter().find(|e| e.id == id)
	}

	/// Whether a node with this id exists.
	pub fn contains(&self, id: &str) -> bool {
		self.nodes.iter().any(|n| n.id == id)
	}

	/// No nodes and no edge records, fading ones included.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.edges.is_empty()
	}

	/// Add a node at a pseudo-random spot inside the default viewport.
	pub fn add_node(&mut self, id: &str) -> Result<&Node> {
		self.validate_new_node(id)?;
		let (x, y) = self.next_position();
		Ok(self.insert_node(id, x, y))
	}

	/// Add a node at an explicit position.
	pub fn add_node_at(&mut self, id: &str, x: f64, y: f64) -> Result<&Node> {
		self.validate_new_node(id)?;
		Ok(self.insert_node(id, x, y))
	}

	/// Remove a node together with every edge touching it.
	pub fn remove_node(&mut self, id: &str) -> Result<Node> {
		if id.is_empty() {
			return Err(GraphError::MissingNodeId);
		}
		let pos = self
			.nodes
			.iter()
			.position(|n| n.id == id)
			.ok_or_else(|| GraphError::UnknownNode(id.to_string()))?;
		let node = self.nodes.remove(pos);
		let before = self.edges.len();
		self.edges.retain(|e| e.source != id && e.target != id);
		info!(
			"removed node {} and {} incident edge(s)",
			id,
			before - self.edges.len()
		);
		Ok(node)
	}

	/// Reposition a node, e.g. while it is being dragged.
	pub fn move_node(&mut self, id: &str, x: f64, y: f64) -> Result<()> {
		let node = self
			.nodes
			.iter_mut()
			.find(|n| n.id == id)
			.ok_or_else(|| GraphError::UnknownNode(id.to_string()))?;
		node.x = x;
		node.y = y;
		Ok(())
	}

	/// Insert an edge with status [`EdgeStatus::New`].
	///
	/// `weight` is `None` in unweighted mode, which stores a weight of `1`.
	/// Undirected edges between distinct nodes produce a mirrored pair of
	/// records; an undirected self-loop is a single record.
	pub fn add_edge(
		&mut self,
		source: &str,
		target: &str,
		weight: Option<Weight>,
		kind: EdgeKind,
	) -> Result<Vec<EdgeId>> {
		if source.is_empty() || target.is_empty() {
			return Err(GraphError::MissingEndpoints);
		}
		if !self.contains(source) || !self.contains(target) {
			return Err(GraphError::UnknownEndpoint);
		}
		let weight = match weight {
			Some(0) | None => 1,
			Some(w) => w,
		};

		let mut ids = vec![self.push_edge(source, target, weight, kind)];
		if kind == EdgeKind::Undirected && source != target {
			ids.push(self.push_edge(target, source, weight, kind));
		}
		info!(
			"added {:?} edge {} -> {} (weight {}, {} record(s))",
			kind,
			source,
			target,
			weight,
			ids.len()
		);
		Ok(ids)
	}

	/// Mark the first live edge matching the request as removing.
	///
	/// For undirected pairs the first live mirror record is marked as well.
	/// `weight` restricts the match to edges of exactly that weight.
	pub fn remove_edge(
		&mut self,
		source: &str,
		target: &str,
		kind: EdgeKind,
		weight: Option<Weight>,
	) -> Result<Vec<EdgeId>> {
		if source.is_empty() || target.is_empty() {
			return Err(GraphError::MissingEndpoints);
		}
		let primary = self
			.edges
			.iter()
			.position(|e| e.matches(source, target, kind, weight))
			.ok_or(GraphError::EdgeNotFound)?;

		let mirror = if kind == EdgeKind::Undirected && source != target {
			self.edges
				.iter()
				.enumerate()
				.position(|(i, e)| i != primary && e.matches(target, source, kind, weight))
		} else {
			None
		};

		let mut marked = Vec::with_capacity(2);
		for idx in std::iter::once(primary).chain(mirror) {
			let edge = &mut self.edges[idx];
			edge.status = EdgeStatus::Removing;
			marked.push(edge.id);
		}
		info!("marked {} edge record(s) {} -> {} as removing", marked.len(), source, target);
		Ok(marked)
	}

	/// Promote every new edge to visible in one batch.
	pub fn reveal_new(&mut self) -> Vec<EdgeId> {
		let mut revealed = Vec::new();
		for edge in self.edges.iter_mut().filter(|e| e.status == EdgeStatus::New) {
			edge.status = EdgeStatus::Visible;
			revealed.push(edge.id);
		}
		if !revealed.is_empty() {
			debug!("revealed {} new edge(s)", revealed.len());
		}
		revealed
	}

	/// Physically drop the given edges, provided they are marked removing.
	pub fn purge(&mut self, ids: &[EdgeId]) -> usize {
		let ids: HashSet<EdgeId> = ids.iter().copied().collect();
		let before = self.edges.len();
		self.edges
			.retain(|e| e.status != EdgeStatus::Removing || !ids.contains(&e.id));
		let purged = before - self.edges.len();
		if purged > 0 {
			debug!("purged {} faded-out edge(s)", purged);
		}
		purged
	}

	/// Drop every node and edge.
	pub fn clear(&mut self) {
		info!(
			"cleared graph ({} nodes, {} edges)",
			self.nodes.len(),
			self.edges.len()
		);
		self.nodes.clear();
		self.edges.clear();
	}

	fn validate_new_node(&self, id: &str) -> Result<()> {
		if id.is_empty() {
			return Err(GraphError::EmptyNodeId);
		}
		if self.contains(id) {
			return Err(GraphError::DuplicateNode(id.to_string()));
		}
		Ok(())
	}

	fn insert_node(&mut self, id: &str, x: f64, y: f64) -> &Node {
		info!("added node {} at ({:.0}, {:.0})", id, x, y);
		self.nodes.push(Node {
			id: id.to_string(),
			x,
			y,
		});
		&self.nodes[self.nodes.len() - 1]
	}

	fn push_edge(&mut self, source: &str, target: &str, weight: Weight, kind: EdgeKind) -> EdgeId {
		let id = EdgeId(self.next_edge_id);
		self.next_edge_id += 1;
		self.edges.push(Edge {
			id,
			source: source.to_string(),
			target: target.to_string(),
			kind,
			weight,
			status: EdgeStatus::New,
		});
		id
	}

	fn next_position(&mut self) -> (f64, f64) {
		let rx: f64 = self.scatter.random();
		let ry: f64 = self.scatter.random();
		(50.0 + rx * 400.0, 50.0 + ry * 300.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn graph_with(ids: &[&str]) -> Graph {
		let mut g = Graph::new();
		for id in ids {
			g.add_node(id).unwrap();
		}
		g
	}

	#[test]
	fn add_node_rejects_empty_and_duplicate_ids() {
		let mut g = graph_with(&["A"]);
		assert_eq!(g.add_node(""), Err(GraphError::EmptyNodeId));
		assert_eq!(
			g.add_node("A").map(|n| n.id.clone()),
			Err(GraphError::DuplicateNode("A".into()))
		);
		assert_eq!(g.nodes().len(), 1);
	}

	#[test]
	fn generated_positions_stay_in_default_viewport() {
		let g = graph_with(&["A", "B", "C", "D", "E"]);
		for n in g.nodes() {
			assert!((50.0..450.0).contains(&n.x), "x out of range: {}", n.x);
			assert!((50.0..350.0).contains(&n.y), "y out of range: {}", n.y);
		}
	}

	#[test]
	fn generated_positions_do_not_line_up() {
		let g = graph_with(&["A", "B", "C", "D", "E", "F", "G", "H"]);
		let p: Vec<(f64, f64)> = g.nodes().iter().map(|n| (n.x, n.y)).collect();
		let (ax, ay) = (p[1].0 - p[0].0, p[1].1 - p[0].1);
		let off_line = p[2..]
			.iter()
			.filter(|(x, y)| (ax * (y - p[0].1) - ay * (x - p[0].0)).abs() > 1.0)
			.count();
		assert!(off_line > 0, "all positions collinear: {p:?}");

		let mut ry_minus_rx: Vec<f64> = p
			.iter()
			.map(|(x, y)| ((y - 50.0) / 300.0 - (x - 50.0) / 400.0).rem_euclid(1.0))
			.collect();
		ry_minus_rx.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
		assert!(ry_minus_rx.len() > 1, "x and y move in lockstep");
	}

	#[test]
	fn remove_node_cascades_to_incident_edges() {
		let mut g = graph_with(&["A", "B", "C"]);
		g.add_edge("A", "B", Some(1), EdgeKind::Directed).unwrap();
		g.add_edge("C", "B", Some(1), EdgeKind::Undirected).unwrap();
		g.add_edge("A", "C", Some(1), EdgeKind::Directed).unwrap();

		let removed = g.remove_node("B").unwrap();
		assert_eq!(removed.id, "B");
		assert_eq!(g.edges().len(), 1);
		assert!(g.edges().iter().all(|e| e.source != "B" && e.target != "B"));
	}

	#[test]
	fn remove_node_validates_input() {
		let mut g = graph_with(&["A"]);
		assert_eq!(g.remove_node(""), Err(GraphError::MissingNodeId));
		assert_eq!(g.remove_node("Q"), Err(GraphError::UnknownNode("Q".into())));
		assert_eq!(g.nodes().len(), 1);
	}

	#[test]
	fn move_node_updates_position() {
		let mut g = graph_with(&["A"]);
		g.move_node("A", 10.0, 20.0).unwrap();
		let a = g.node("A").unwrap();
		assert_eq!((a.x, a.y), (10.0, 20.0));
		assert!(g.move_node("B", 0.0, 0.0).is_err());
	}

	#[test]
	fn undirected_edge_creates_mirrored_pair() {
		let mut g = graph_with(&["A", "B"]);
		let ids = g.add_edge("A", "B", Some(2), EdgeKind::Undirected).unwrap();
		assert_eq!(ids.len(), 2);
		let pair: Vec<_> = g
			.edges()
			.iter()
			.map(|e| (e.source.as_str(), e.target.as_str(), e.kind, e.weight, e.status))
			.collect();
		assert_eq!(
			pair,
			vec![
				("A", "B", EdgeKind::Undirected, 2, EdgeStatus::New),
				("B", "A", EdgeKind::Undirected, 2, EdgeStatus::New),
			]
		);
	}

	#[test]
	fn undirected_self_loop_is_a_single_record() {
		let mut g = graph_with(&["A"]);
		let ids = g.add_edge("A", "A", None, EdgeKind::Undirected).unwrap();
		assert_eq!(ids.len(), 1);
	}

	#[test]
	fn add_edge_validates_endpoints() {
		let mut g = graph_with(&["A"]);
		assert_eq!(
			g.add_edge("", "A", None, EdgeKind::Directed),
			Err(GraphError::MissingEndpoints)
		);
		assert_eq!(
			g.add_edge("A", "B", None, EdgeKind::Directed),
			Err(GraphError::UnknownEndpoint)
		);
		assert!(g.edges().is_empty());
	}

	#[test]
	fn zero_and_unweighted_become_unit_weight() {
		let mut g = graph_with(&["A", "B"]);
		g.add_edge("A", "B", Some(0), EdgeKind::Directed).unwrap();
		g.add_edge("A", "B", None, EdgeKind::Directed).unwrap();
		assert!(g.edges().iter().all(|e| e.weight == 1));
	}

	#[test]
	fn edge_ids_are_unique() {
		let mut g = graph_with(&["A", "B"]);
		let mut ids = g.add_edge("A", "B", None, EdgeKind::Undirected).unwrap();
		ids.extend(g.add_edge("A", "B", None, EdgeKind::Undirected).unwrap());
		let unique: HashSet<_> = ids.iter().collect();
		assert_eq!(unique.len(), 4);
	}

	#[test]
	fn remove_undirected_edge_marks_both_records() {
		let mut g = graph_with(&["A", "B"]);
		g.add_edge("A", "B", Some(2), EdgeKind::Undirected).unwrap();
		let marked = g.remove_edge("A", "B", EdgeKind::Undirected, None).unwrap();
		assert_eq!(marked.len(), 2);
		assert!(g.edges().iter().all(|e| e.status == EdgeStatus::Removing));
		assert_eq!(g.live_edges().count(), 0);
	}

	#[test]
	fn remove_edge_marks_only_the_first_parallel_match() {
		let mut g = graph_with(&["A", "B"]);
		g.add_edge("A", "B", Some(1), EdgeKind::Directed).unwrap();
		g.add_edge("A", "B", Some(1), EdgeKind::Directed).unwrap();
		g.remove_edge("A", "B", EdgeKind::Directed, None).unwrap();
		assert_eq!(g.live_edges().count(), 1);

		// the already-removing record is skipped on the next call
		g.remove_edge("A", "B", EdgeKind::Directed, None).unwrap();
		assert_eq!(g.live_edges().count(), 0);
		assert_eq!(
			g.remove_edge("A", "B", EdgeKind::Directed, None),
			Err(GraphError::EdgeNotFound)
		);
	}

	#[test]
	fn remove_edge_respects_kind_and_weight() {
		let mut g = graph_with(&["A", "B"]);
		g.add_edge("A", "B", Some(3), EdgeKind::Directed).unwrap();
		g.add_edge("A", "B", Some(5), EdgeKind::Directed).unwrap();

		assert_eq!(
			g.remove_edge("A", "B", EdgeKind::Undirected, None),
			Err(GraphError::EdgeNotFound)
		);
		assert_eq!(
			g.remove_edge("A", "B", EdgeKind::Directed, Some(4)),
			Err(GraphError::EdgeNotFound)
		);
		let marked = g.remove_edge("A", "B", EdgeKind::Directed, Some(5)).unwrap();
		assert_eq!(g.edge(marked[0]).map(|e| e.weight), Some(5));
		assert_eq!(g.live_edges().map(|e| e.weight).collect::<Vec<_>>(), vec![3]);
	}

	#[test]
	fn reveal_and_purge_follow_the_lifecycle() {
		let mut g = graph_with(&["A", "B"]);
		let ids = g.add_edge("A", "B", None, EdgeKind::Directed).unwrap();
		assert_eq!(g.reveal_new(), ids);
		assert_eq!(g.edges()[0].status, EdgeStatus::Visible);

		// only removing edges can be purged
		assert_eq!(g.purge(&ids), 0);
		g.remove_edge("A", "B", EdgeKind::Directed, None).unwrap();
		assert_eq!(g.purge(&ids), 1);
		assert!(g.edges().is_empty());
	}

	#[test]
	fn clear_drops_everything() {
		let mut g = graph_with(&["A", "B"]);
		g.add_edge("A", "B", None, EdgeKind::Directed).unwrap();
		g.clear();
		assert!(g.is_empty());
	}
}
