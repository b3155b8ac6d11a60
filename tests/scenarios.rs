use graph_visualizer::graph::layout::{self, EdgePath};
use graph_visualizer::graph::lifecycle::Animator;
use graph_visualizer::graph::views::{self, Degree, Neighbor};
use graph_visualizer::graph::{EdgeKind, EdgeStatus, Graph, GraphError};

fn nodes(ids: &[&str]) -> Graph {
	let mut g = Graph::new();
	for id in ids {
		g.add_node(id).unwrap();
	}
	g
}

#[test]
fn directed_weighted_edge_shows_up_in_every_view() {
	let mut g = nodes(&["A", "B"]);
	g.add_edge("A", "B", Some(3), EdgeKind::Directed).unwrap();

	let list = views::adjacency_list(&g);
	assert_eq!(
		list.entries,
		vec![
			(
				"A".to_string(),
				vec![Neighbor {
					target: "B".into(),
					weight: 3
				}]
			),
			("B".to_string(), vec![]),
		]
	);

	let matrix = views::adjacency_matrix(&g, true);
	assert_eq!(matrix.node_ids, vec!["A", "B"]);
	assert_eq!(matrix.cells, vec![vec![0, 3], vec![0, 0]]);

	let degrees = views::degree_table(&g, true);
	assert_eq!(
		degrees.get("A"),
		Some(Degree {
			in_degree: 0,
			out_degree: 3
		})
	);
	assert_eq!(
		degrees.get("B"),
		Some(Degree {
			in_degree: 3,
			out_degree: 0
		})
	);
	assert!(!degrees.all_undirected);
}

#[test]
fn removing_an_endpoint_drops_the_undirected_pair() {
	let mut g = nodes(&["A", "B"]);
	g.add_edge("A", "B", Some(2), EdgeKind::Undirected).unwrap();
	assert_eq!(g.edges().len(), 2);

	g.remove_node("B").unwrap();
	assert!(g.edges().is_empty());
	let ids: Vec<_> = g.nodes().iter().map(|n| n.id.as_str()).collect();
	assert_eq!(ids, vec!["A"]);
}

#[test]
fn failed_actions_leave_the_store_unchanged() {
	let mut g = nodes(&["A", "B"]);
	g.add_edge("A", "B", Some(1), EdgeKind::Directed).unwrap();
	let before = g.clone();

	assert_eq!(
		g.add_node("A").map(|n| n.id.clone()),
		Err(GraphError::DuplicateNode("A".into()))
	);
	assert!(g.remove_node("C").is_err());
	assert!(g.add_edge("A", "C", None, EdgeKind::Directed).is_err());
	assert!(g.remove_edge("B", "A", EdgeKind::Directed, None).is_err());
	assert!(g.remove_edge("A", "B", EdgeKind::Directed, Some(9)).is_err());
	assert_eq!(g, before);
}

#[test]
fn fading_edge_is_drawn_but_not_counted_until_purged() {
	let mut g = Graph::new();
	g.add_node_at("A", 0.0, 0.0).unwrap();
	g.add_node_at("B", 100.0, 0.0).unwrap();
	let mut anim = Animator::new(100);

	g.add_edge("A", "B", Some(5), EdgeKind::Directed).unwrap();
	anim.observe(&g, 0.0);
	anim.advance(&mut g, 10.0);
	assert_eq!(g.edges()[0].status, EdgeStatus::Visible);

	g.remove_edge("A", "B", EdgeKind::Directed, None).unwrap();
	anim.observe(&g, 20.0);

	assert_eq!(views::adjacency_matrix(&g, true).get("A", "B"), Some(0));
	assert_eq!(views::degree_table(&g, true).get("B").unwrap().in_degree, 0);
	let routed = layout::route_edges(&g);
	assert_eq!(routed.len(), 1);
	assert_eq!(routed[0].status, EdgeStatus::Removing);
	assert!(matches!(routed[0].path, EdgePath::Line { .. }));

	anim.advance(&mut g, 30.0);
	assert!(g.edges().is_empty());
	assert!(layout::route_edges(&g).is_empty());
}

#[test]
fn unweighted_mode_counts_edges() {
	let mut g = nodes(&["1", "2", "10"]);
	g.add_edge("10", "2", Some(7), EdgeKind::Directed).unwrap();
	g.add_edge("10", "2", Some(4), EdgeKind::Directed).unwrap();
	g.add_edge("1", "1", None, EdgeKind::Undirected).unwrap();

	let matrix = views::adjacency_matrix(&g, false);
	assert_eq!(matrix.node_ids, vec!["1", "2", "10"]);
	assert_eq!(matrix.get("10", "2"), Some(2));
	assert_eq!(matrix.get("1", "1"), Some(1));

	let table = views::degree_table(&g, false);
	let total_in: u64 = table.rows.iter().map(|(_, d)| d.in_degree).sum();
	let total_out: u64 = table.rows.iter().map(|(_, d)| d.out_degree).sum();
	assert_eq!((total_in, total_out), (3, 3));
}
