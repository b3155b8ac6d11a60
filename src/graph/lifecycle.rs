//! Fade-in / fade-out timing for edges.
//!
//! The animator keeps a timer table keyed by edge id and is driven by the
//! caller's clock (milliseconds). It never owns the graph: each frame it
//! `observe`s the store to pick up new and removing edges, then `advance`s,
//! which applies due status transitions back onto the store.

use std::collections::HashMap;

use log::debug;

use super::model::{EdgeId, EdgeStatus, Graph};

/// Delay between an edge being inserted and it starting to fade in.
pub const REVEAL_DELAY_MS: f64 = 10.0;

/// Highest value of the animation speed slider.
pub const MAX_SPEED: u8 = 100;

/// Fade duration for a speed setting in `0..=100`; faster means shorter.
pub fn animation_duration_ms(speed: u8) -> f64 {
	f64::from(101 - u32::from(speed.min(MAX_SPEED))) * 10.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FadeKind {
	In,
	Out,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Fade {
	kind: FadeKind,
	started: f64,
}

/// What a call to [`Animator::advance`] changed in the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transitions {
	/// Edges that went from new to visible.
	pub revealed: Vec<EdgeId>,
	/// Edges dropped from the store after fading out.
	pub purged: Vec<EdgeId>,
}

impl Transitions {
	/// Nothing changed.
	pub fn is_empty(&self) -> bool {
		self.revealed.is_empty() && self.purged.is_empty()
	}
}

/// Timer table for edge fades, driven by an external clock.
#[derive(Debug, Clone)]
pub struct Animator {
	speed: u8,
	now: f64,
	/// Reveal deadlines for edges still in [`EdgeStatus::New`].
	pending: HashMap<EdgeId, f64>,
	fades: HashMap<EdgeId, Fade>,
}

impl Default for Animator {
	fn default() -> Self {
		Self::new(50)
	}
}

impl Animator {
	/// An animator with no timers, at the given slider speed.
	pub fn new(speed: u8) -> Self {
		Self {
			speed: speed.min(MAX_SPEED),
			now: 0.0,
			pending: HashMap::new(),
			fades: HashMap::new(),
		}
	}

	/// Current slider speed in `0..=100`.
	pub fn speed(&self) -> u8 {
		self.speed
	}

	/// Values above [`MAX_SPEED`] are clamped.
	pub fn set_speed(&mut self, speed: u8) {
		self.speed = speed.min(MAX_SPEED);
	}

	/// Length of one fade at the current speed.
	pub fn duration_ms(&self) -> f64 {
		animation_duration_ms(self.speed)
	}

	/// Clock value of the last `observe` or `advance`.
	pub fn now(&self) -> f64 {
		self.now
	}

	/// Schedule timers for edges that need one and forget edges that are gone.
	/// Finished fade-ins are dropped here, since nothing has to be applied to
	/// the store when they end.
	pub fn observe(&mut self, graph: &Graph, now: f64) {
		self.now = now;
		let duration = self.duration_ms();
		self.pending
			.retain(|id, _| graph.edge(*id).is_some_and(|e| e.status == EdgeStatus::New));
		self.fades.retain(|id, fade| match graph.edge(*id) {
			None => false,
			Some(e) => match fade.kind {
				FadeKind::In => e.status == EdgeStatus::Visible && now - fade.started < duration,
				FadeKind::Out => e.status == EdgeStatus::Removing,
			},
		});

		for edge in graph.edges() {
			match edge.status {
				EdgeStatus::New => {
					self.pending.entry(edge.id).or_insert(now + REVEAL_DELAY_MS);
				}
				EdgeStatus::Removing => {
					self.fades.entry(edge.id).or_insert(Fade {
						kind: FadeKind::Out,
						started: now,
					});
				}
				EdgeStatus::Visible => {}
			}
		}
	}

	/// Apply every transition that is due at `now`.
	///
	/// Once any reveal deadline passes, all new edges are revealed together.
	/// Edges whose fade-out has run its full duration are purged.
	pub fn advance(&mut self, graph: &mut Graph, now: f64) -> Transitions {
		self.now = now;
		let duration = self.duration_ms();
		let mut transitions = Transitions::default();

		if self.pending.values().any(|deadline| *deadline <= now) {
			self.pending.clear();
			transitions.revealed = graph.reveal_new();
			for id in &transitions.revealed {
				self.fades.insert(
					*id,
					Fade {
						kind: FadeKind::In,
						started: now,
					},
				);
			}
		}

		let finished: Vec<EdgeId> = self
			.fades
			.iter()
			.filter(|(_, fade)| fade.kind == FadeKind::Out && now - fade.started >= duration)
			.map(|(id, _)| *id)
			.collect();
		if !finished.is_empty() {
			graph.purge(&finished);
			for id in &finished {
				self.fades.remove(id);
			}
			transitions.purged = finished;
		}

		self.fades
			.retain(|_, fade| fade.kind == FadeKind::Out || now - fade.started < duration);

		if !transitions.is_empty() {
			debug!(
				"lifecycle: {} revealed, {} purged",
				transitions.revealed.len(),
				transitions.purged.len()
			);
		}
		transitions
	}

	/// Whether any transition is due at `now`.
	pub fn has_due(&self, now: f64) -> bool {
		let duration = self.duration_ms();
		self.pending.values().any(|deadline| *deadline <= now)
			|| self
				.fades
				.values()
				.any(|fade| fade.kind == FadeKind::Out && now - fade.started >= duration)
	}

	/// Opacity in `0.0..=1.0` for an edge with the given status.
	pub fn opacity(&self, id: EdgeId, status: EdgeStatus) -> f64 {
		let progress = |fade: &Fade| ((self.now - fade.started) / self.duration_ms()).clamp(0.0, 1.0);
		match (status, self.fades.get(&id)) {
			(EdgeStatus::New, _) => 0.0,
			(EdgeStatus::Visible, Some(fade)) if fade.kind == FadeKind::In => progress(fade),
			(EdgeStatus::Visible, _) => 1.0,
			(EdgeStatus::Removing, Some(fade)) => 1.0 - progress(fade),
			(EdgeStatus::Removing, None) => 1.0,
		}
	}

	/// True when no timer or fade is outstanding.
	pub fn is_idle(&self) -> bool {
		self.pending.is_empty() && self.fades.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::model::EdgeKind;

	fn graph() -> Graph {
		let mut g = Graph::new();
		g.add_node("A").unwrap();
		g.add_node("B").unwrap();
		g
	}

	#[test]
	fn duration_is_inverse_to_speed() {
		assert_eq!(animation_duration_ms(0), 1010.0);
		assert_eq!(animation_duration_ms(50), 510.0);
		assert_eq!(animation_duration_ms(100), 10.0);
		assert_eq!(animation_duration_ms(255), 10.0);
	}

	#[test]
	fn new_edges_are_revealed_together_after_the_delay() {
		let mut g = graph();
		let mut anim = Animator::new(50);
		let first = g.add_edge("A", "B", None, EdgeKind::Directed).unwrap();
		anim.observe(&g, 0.0);
		let second = g.add_edge("B", "A", None, EdgeKind::Directed).unwrap();
		anim.observe(&g, 5.0);

		assert!(!anim.has_due(9.0));
		assert!(anim.advance(&mut g, 9.0).is_empty());
		assert_eq!(anim.opacity(first[0], EdgeStatus::New), 0.0);

		let t = anim.advance(&mut g, 10.0);
		assert_eq!(t.revealed, vec![first[0], second[0]]);
		assert!(g.edges().iter().all(|e| e.status == EdgeStatus::Visible));
	}

	#[test]
	fn fade_in_runs_for_the_configured_duration() {
		let mut g = graph();
		let mut anim = Animator::new(50);
		let ids = g.add_edge("A", "B", None, EdgeKind::Directed).unwrap();
		anim.observe(&g, 0.0);
		anim.advance(&mut g, 10.0);

		anim.advance(&mut g, 265.0);
		assert!((anim.opacity(ids[0], EdgeStatus::Visible) - 0.5).abs() < 1e-9);

		anim.advance(&mut g, 600.0);
		assert_eq!(anim.opacity(ids[0], EdgeStatus::Visible), 1.0);
		assert!(anim.is_idle());
	}

	/// Mirrors the canvas frame loop: observe every frame, advance only when due.
	fn run_frames(anim: &mut Animator, g: &mut Graph, from: f64, to: f64) {
		let mut now = from;
		while now <= to {
			anim.observe(g, now);
			if anim.has_due(now) {
				anim.advance(g, now);
			}
			now += 16.0;
		}
	}

	#[test]
	fn frame_loop_goes_idle_after_fade_in() {
		let mut g = graph();
		let mut anim = Animator::new(50);
		let ids = g.add_edge("A", "B", None, EdgeKind::Directed).unwrap();

		run_frames(&mut anim, &mut g, 0.0, 200.0);
		assert_eq!(g.edges()[0].status, EdgeStatus::Visible);
		assert!(!anim.is_idle());

		run_frames(&mut anim, &mut g, 208.0, 2000.0);
		assert!(!anim.has_due(2000.0));
		assert!(anim.is_idle());
		assert_eq!(anim.opacity(ids[0], EdgeStatus::Visible), 1.0);
	}

	#[test]
	fn frame_loop_purges_and_goes_idle_after_fade_out() {
		let mut g = graph();
		let mut anim = Animator::new(50);
		g.add_edge("A", "B", None, EdgeKind::Undirected).unwrap();
		run_frames(&mut anim, &mut g, 0.0, 1000.0);

		g.remove_edge("A", "B", EdgeKind::Undirected, None).unwrap();
		run_frames(&mut anim, &mut g, 1016.0, 3000.0);
		assert!(g.edges().is_empty());
		assert!(anim.is_idle());
	}

	#[test]
	fn removing_edges_fade_out_then_leave_the_store() {
		let mut g = graph();
		let mut anim = Animator::new(90);
		g.add_edge("A", "B", None, EdgeKind::Undirected).unwrap();
		g.reveal_new();
		let marked = g.remove_edge("A", "B", EdgeKind::Undirected, None).unwrap();
		anim.observe(&g, 1000.0);

		assert_eq!(anim.opacity(marked[0], EdgeStatus::Removing), 1.0);
		anim.advance(&mut g, 1055.0);
		assert!((anim.opacity(marked[0], EdgeStatus::Removing) - 0.5).abs() < 1e-9);
		assert_eq!(g.edges().len(), 2);

		let t = anim.advance(&mut g, 1110.0);
		assert_eq!(t.purged.len(), 2);
		assert!(g.edges().is_empty());
		assert!(anim.is_idle());
	}

	#[test]
	fn timers_for_vanished_edges_are_dropped() {
		let mut g = graph();
		let mut anim = Animator::default();
		g.add_edge("A", "B", None, EdgeKind::Directed).unwrap();
		anim.observe(&g, 0.0);
		assert!(!anim.is_idle());

		g.remove_node("B").unwrap();
		anim.observe(&g, 1.0);
		assert!(anim.is_idle());
		assert!(anim.advance(&mut g, 100.0).is_empty());
	}
}
