//! Edge bundling and path geometry for the canvas.
//!
//! Edges between the same unordered pair of nodes are bucketed so that
//! parallel and opposing edges bend apart instead of drawing on top of each
//! other. Edges that are fading out are laid out on their own so the
//! remaining bundle does not jump while the fade runs.

use std::fmt;

use super::model::{Edge, EdgeId, EdgeKind, EdgeStatus, Graph, NodeId, Weight};

/// Radius of a drawn node; edges start and end on its rim.
pub const NODE_RADIUS: f64 = 20.0;

const GROUP_SPREAD: f64 = 35.0;
const PARALLEL_SPREAD: f64 = 20.0;
const LOOP_BASE: f64 = 15.0;
const LOOP_GROUP_STEP: f64 = 20.0;
const LOOP_STACK_STEP: f64 = 8.0;

/// Canonical, order-independent key of a node pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PairKey {
	/// Self-loops on one node.
	Loop(NodeId),
	/// Always `(min, max)`.
	Pair(NodeId, NodeId),
}

impl PairKey {
	/// Key for an edge between `source` and `target`, in either direction.
	pub fn of(source: &str, target: &str) -> Self {
		if source == target {
			Self::Loop(source.to_string())
		} else if source < target {
			Self::Pair(source.to_string(), target.to_string())
		} else {
			Self::Pair(target.to_string(), source.to_string())
		}
	}
}

/// Live edges between one pair of nodes, split by direction and kind.
#[derive(Debug, Clone, PartialEq)]
pub enum PairGroup<'a> {
	/// Self-loops on a single node.
	Loop {
		/// The node every edge starts and ends on.
		node: &'a str,
		/// Directed loops.
		directed: Vec<&'a Edge>,
		/// Undirected loops.
		undirected: Vec<&'a Edge>,
	},
	/// Edges between two distinct nodes.
	Pair {
		/// Source of the first edge seen for this pair.
		s: &'a str,
		/// Target of the first edge seen for this pair.
		t: &'a str,
		/// Directed edges `s -> t`.
		s_to_t: Vec<&'a Edge>,
		/// Directed edges `t -> s`.
		t_to_s: Vec<&'a Edge>,
		/// Undirected records, both halves of every pair.
		undirected: Vec<&'a Edge>,
	},
}

/// A bundle of edges drawn with the same lateral offset.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcGroup<'a> {
	/// Node the bundle is drawn from.
	pub source: &'a str,
	/// Node the bundle is drawn to.
	pub target: &'a str,
	/// Edges in the bundle, spread apart in this order.
	pub edges: Vec<&'a Edge>,
}

impl<'a> PairGroup<'a> {
	fn new(edge: &'a Edge) -> Self {
		if edge.is_self_loop() {
			Self::Loop {
				node: &edge.source,
				directed: Vec::new(),
				undirected: Vec::new(),
			}
		} else {
			let (s, t) = if edge.source < edge.target {
				(&edge.source, &edge.target)
			} else {
				(&edge.target, &edge.source)
			};
			Self::Pair {
				s,
				t,
				s_to_t: Vec::new(),
				t_to_s: Vec::new(),
				undirected: Vec::new(),
			}
		}
	}

	fn push(&mut self, edge: &'a Edge) {
		match self {
			Self::Loop {
				directed,
				undirected,
				..
			} => match edge.kind {
				EdgeKind::Directed => directed.push(edge),
				EdgeKind::Undirected => undirected.push(edge),
			},
			Self::Pair {
				s,
				s_to_t,
				t_to_s,
				undirected,
				..
			} => match edge.kind {
				EdgeKind::Undirected => undirected.push(edge),
				EdgeKind::Directed if edge.source == *s => s_to_t.push(edge),
				EdgeKind::Directed => t_to_s.push(edge),
			},
		}
	}

	/// The non-empty bundles in drawing order.
	///
	/// Only one record of each undirected pair is drawn (the one leaving the
	/// canonical first node), and undirected self-loops collapse to one curve.
	pub fn arc_groups(&self) -> Vec<ArcGroup<'a>> {
		let mut groups = Vec::new();
		match self {
			Self::Loop {
				node,
				directed,
				undirected,
			} => {
				if !directed.is_empty() {
					groups.push(ArcGroup {
						source: *node,
						target: *node,
						edges: directed.clone(),
					});
				}
				if let Some(first) = undirected.first() {
					groups.push(ArcGroup {
						source: *node,
						target: *node,
						edges: vec![*first],
					});
				}
			}
			Self::Pair {
				s,
				t,
				s_to_t,
				t_to_s,
				undirected,
			} => {
				if !s_to_t.is_empty() {
					groups.push(ArcGroup {
						source: *s,
						target: *t,
						edges: s_to_t.clone(),
					});
				}
				if !t_to_s.is_empty() {
					groups.push(ArcGroup {
						source: *t,
						target: *s,
						edges: t_to_s.clone(),
					});
				}
				let forward: Vec<&Edge> = undirected
					.iter()
					.copied()
					.filter(|e| e.source == *s && e.target == *t)
					.collect();
				if !forward.is_empty() {
					groups.push(ArcGroup {
						source: *s,
						target: *t,
						edges: forward,
					});
				}
			}
		}
		groups
	}
}

/// The result of bucketing a graph's edges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeGroups<'a> {
	/// Pair groups in the order their first edge appears.
	pub pairs: Vec<(PairKey, PairGroup<'a>)>,
	/// Fading-out edges, each drawn on its own.
	pub removing: Vec<&'a Edge>,
}

/// Bucket the graph's edges by node pair.
pub fn group_edges(graph: &Graph) -> EdgeGroups<'_> {
	let mut groups = EdgeGroups::default();
	for edge in graph.edges() {
		if !edge.is_live() {
			groups.removing.push(edge);
			continue;
		}
		let key = PairKey::of(&edge.source, &edge.target);
		match groups.pairs.iter_mut().find(|(k, _)| *k == key) {
			Some((_, group)) => group.push(edge),
			None => {
				let mut group = PairGroup::new(edge);
				group.push(edge);
				groups.pairs.push((key, group));
			}
		}
	}
	groups
}

/// Where an edge sits inside its pair: which bundle, and which slot in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
	/// Slot of the edge inside its bundle.
	pub index: usize,
	/// Number of edges in the bundle.
	pub total: usize,
	/// Which bundle of the pair this edge belongs to.
	pub arc_group: usize,
	/// Number of bundles between the pair.
	pub arc_total: usize,
}

impl Placement {
	/// An edge drawn alone, as if it were the only one between its nodes.
	pub const SOLO: Placement = Placement {
		index: 0,
		total: 1,
		arc_group: 0,
		arc_total: 1,
	};
}

/// An edge together with the direction it is drawn in and its slot.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedEdge<'a> {
	/// The stored record.
	pub edge: &'a Edge,
	/// Start of the drawn curve, which can differ from `edge.source`.
	pub source: &'a str,
	/// End of the drawn curve.
	pub target: &'a str,
	/// Slot the curve is drawn in.
	pub placement: Placement,
}

/// Every edge that should be drawn, with its slot. Fading edges come last.
pub fn place_edges(graph: &Graph) -> Vec<PlacedEdge<'_>> {
	let groups = group_edges(graph);
	let mut placed = Vec::new();
	for (_, pair) in &groups.pairs {
		let arcs = pair.arc_groups();
		let arc_total = arcs.len();
		for (arc_group, arc) in arcs.iter().enumerate() {
			let total = arc.edges.len();
			for (index, &edge) in arc.edges.iter().enumerate() {
				placed.push(PlacedEdge {
					edge,
					source: arc.source,
					target: arc.target,
					placement: Placement {
						index,
						total,
						arc_group,
						arc_total,
					},
				});
			}
		}
	}
	placed.extend(groups.removing.iter().map(|&edge| PlacedEdge {
		edge,
		source: &edge.source,
		target: &edge.target,
		placement: Placement::SOLO,
	}));
	placed
}

/// A canvas coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
	/// Horizontal, growing right.
	pub x: f64,
	/// Vertical, growing down.
	pub y: f64,
}

impl Point {
	/// Point at `(x, y)`.
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Concrete curve for one edge, in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(missing_docs)]
pub enum EdgePath {
	/// The only edge between two nodes.
	Line { from: Point, to: Point },
	/// One of several edges bowed around the straight line.
	Quadratic {
		from: Point,
		control: Point,
		to: Point,
	},
	/// A self-loop above its node.
	Cubic {
		from: Point,
		control1: Point,
		control2: Point,
		to: Point,
	},
}

/// Formats as SVG path data.
impl fmt::Display for EdgePath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Line { from, to } => write!(f, "M {} {} L {} {}", from.x, from.y, to.x, to.y),
			Self::Quadratic { from, control, to } => write!(
				f,
				"M {} {} Q {} {} {} {}",
				from.x, from.y, control.x, control.y, to.x, to.y
			),
			Self::Cubic {
				from,
				control1,
				control2,
				to,
			} => write!(
				f,
				"M {} {} C {} {}, {} {}, {} {}",
				from.x, from.y, control1.x, control1.y, control2.x, control2.y, to.x, to.y
			),
		}
	}
}

/// Path plus the anchor point for the weight label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Route {
	/// Curve to stroke.
	pub path: EdgePath,
	/// Where the weight label is centered.
	pub label: Point,
}

/// Geometry for an edge drawn from `source` to `target` in the given slot.
///
/// Returns `None` when two distinct nodes sit on the same spot.
pub fn route(source: Point, target: Point, self_loop: bool, placement: Placement) -> Option<Route> {
	if self_loop {
		return Some(route_loop(source, placement));
	}

	let (dx, dy) = (target.x - source.x, target.y - source.y);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist <= 0.0 {
		return None;
	}
	// stop at the rim of the target circle so the arrowhead stays visible
	let end = Point::new(
		target.x - dx * NODE_RADIUS / dist,
		target.y - dy * NODE_RADIUS / dist,
	);
	let (nx, ny) = (-dy / dist, dx / dist);
	let mid = Point::new((source.x + end.x) / 2.0, (source.y + end.y) / 2.0);

	if placement.total == 1 && placement.arc_total == 1 {
		return Some(Route {
			path: EdgePath::Line {
				from: source,
				to: end,
			},
			label: Point::new(mid.x + nx * 10.0, mid.y + ny * 10.0),
		});
	}

	let offset = spread(placement.index, placement.total, PARALLEL_SPREAD)
		+ spread(placement.arc_group, placement.arc_total, GROUP_SPREAD);
	let control = Point::new(mid.x + nx * offset, mid.y + ny * offset);
	Some(Route {
		path: EdgePath::Quadratic {
			from: source,
			control,
			to: end,
		},
		label: Point::new(control.x + nx * 5.0, control.y + ny * 5.0),
	})
}

/// Offset of slot `index` among `count`, symmetric around zero.
fn spread(index: usize, count: usize, step: f64) -> f64 {
	if count > 1 {
		step * (index as f64 - (count - 1) as f64 / 2.0)
	} else {
		0.0
	}
}

fn route_loop(node: Point, placement: Placement) -> Route {
	let group_offset = if placement.arc_total > 1 {
		LOOP_GROUP_STEP * placement.arc_group as f64
	} else {
		0.0
	};
	let stack_offset = if placement.total > 1 {
		LOOP_STACK_STEP * placement.index as f64
	} else {
		0.0
	};
	let size = LOOP_BASE + group_offset + stack_offset;
	let top = node.y - NODE_RADIUS;
	let control1 = Point::new(node.x - size * 2.0, top - size * 2.5);
	let control2 = Point::new(node.x + size * 2.0, top - size * 2.5);
	Route {
		path: EdgePath::Cubic {
			from: Point::new(node.x - 2.0, top),
			control1,
			control2,
			to: Point::new(node.x + 2.0, top),
		},
		label: Point::new(control2.x, control2.y - 10.0),
	}
}

/// Everything the renderer needs to draw one edge.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct RoutedEdge {
	pub id: EdgeId,
	pub kind: EdgeKind,
	pub weight: Weight,
	pub status: EdgeStatus,
	pub path: EdgePath,
	pub label: Point,
}

/// Group, place and route every drawable edge of the graph.
pub fn route_edges(graph: &Graph) -> Vec<RoutedEdge> {
	let position = |id: &str| graph.node(id).map(|n| Point::new(n.x, n.y));
	place_edges(graph)
		.into_iter()
		.filter_map(|placed| {
			let source = position(placed.source)?;
			let target = position(placed.target)?;
			let route = route(
				source,
				target,
				placed.source == placed.target,
				placed.placement,
			)?;
			Some(RoutedEdge {
				id: placed.edge.id,
				kind: placed.edge.kind,
				weight: placed.edge.weight,
				status: placed.edge.status,
				path: route.path,
				label: route.label,
			})
		})
		.collect()
}
