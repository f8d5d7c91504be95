//! Debugging aid: frame statistics and click selection.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::info;

use crate::node::NodeUuid;
use crate::space::Space;

/// Key of the animate action feeding [`FrameStats`].
pub const STATS_ACTION: &str = "inspector-stats";

/// Frame counter with an fps estimate refreshed once per second.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameStats {
	frames: u64,
	fps: f32,
	frame_time: Duration,
	last: Option<Instant>,
	window_start: Option<Instant>,
	window_frames: u32,
}

impl FrameStats {
	pub fn update(&mut self) {
		self.update_at(Instant::now());
	}

	pub fn update_at(&mut self, now: Instant) {
		self.frames += 1;
		if let Some(last) = self.last {
			self.frame_time = now.saturating_duration_since(last);
		}
		self.last = Some(now);

		let window_start = *self.window_start.get_or_insert(now);
		self.window_frames += 1;
		let elapsed = now.saturating_duration_since(window_start);
		if elapsed >= Duration::from_secs(1) {
			// frames completed since the window opened
			self.fps = (self.window_frames - 1) as f32 / elapsed.as_secs_f32();
			self.window_start = Some(now);
			self.window_frames = 1;
		}
	}

	pub fn frames(&self) -> u64 {
		self.frames
	}

	/// Frames per second over the last full window, 0 before the first one completes.
	pub fn fps(&self) -> f32 {
		self.fps
	}

	/// Time between the last two frames.
	pub fn frame_time(&self) -> Duration {
		self.frame_time
	}
}

/// A pick hit, nearest first when several are reported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
	pub object: NodeUuid,
	pub distance: f32,
}

pub struct Inspector {
	stats: Rc<RefCell<FrameStats>>,
	selected: Option<NodeUuid>,
}

impl Inspector {
	/// Hook the inspector into the animation loop of `space`.
	pub fn new(space: &mut Space) -> Self {
		let stats = Rc::new(RefCell::new(FrameStats::default()));

		let action_stats = stats.clone();
		space.add_animate_action(STATS_ACTION, move || action_stats.borrow_mut().update());

		Self { stats, selected: None }
	}

	pub fn stats(&self) -> FrameStats {
		*self.stats.borrow()
	}

	/// Last node picked by [`click`](Self::click).
	pub fn selected(&self) -> Option<NodeUuid> {
		self.selected
	}

	/// Select and outline the first hit. Clicking into the void keeps the current selection.
	pub fn click(&mut self, space: &mut Space, intersects: &[Intersection]) {
		let Some(hit) = intersects.first() else {
			return;
		};

		match space.tree().get_node(hit.object) {
			Some(node) => info!("Selected {} {:?} at distance {}", hit.object, node.name, hit.distance),
			None => info!("Selected unknown node {}", hit.object),
		}

		self.selected = Some(hit.object);
		space.set_outline(vec![hit.object]);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::node::SceneNode;

	#[test]
	fn fps_over_one_second_windows() {
		let start = Instant::now();
		let mut stats = FrameStats::default();

		for i in 0..=60 {
			stats.update_at(start + Duration::from_millis(i * 1000 / 60));
		}

		assert_eq!(stats.frames(), 61);
		assert!((stats.fps() - 60.).abs() < 0.5);
		assert!(stats.frame_time() <= Duration::from_millis(17));
	}

	#[test]
	fn ticks_feed_the_stats() {
		let mut space = Space::new(SceneNode::group("scene"));
		let inspector = Inspector::new(&mut space);
		assert!(space.animations().contains(STATS_ACTION));

		space.tick();
		space.tick();
		space.tick();
		assert_eq!(inspector.stats().frames(), 3);
	}

	#[test]
	fn click_selects_the_nearest_hit() {
		let mut space = Space::new(SceneNode::group("scene"));
		let root = space.tree().root();
		let near = space.tree_mut().add(root, SceneNode::group("near")).unwrap();
		let far = space.tree_mut().add(root, SceneNode::group("far")).unwrap();
		let mut inspector = Inspector::new(&mut space);

		inspector.click(&mut space, &[]);
		assert_eq!(inspector.selected(), None);
		assert!(space.outline().is_empty());

		inspector.click(&mut space, &[
			Intersection {
				object: near,
				distance: 1.5,
			},
			Intersection {
				object: far,
				distance: 8.,
			},
		]);
		assert_eq!(inspector.selected(), Some(near));
		assert_eq!(space.outline(), &[near]);

		inspector.click(&mut space, &[]);
		assert_eq!(inspector.selected(), Some(near));
	}
}
