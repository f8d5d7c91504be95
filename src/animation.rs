use std::fmt;

use tracing::debug;

/// Per-frame callback.
pub type AnimateAction = Box<dyn FnMut()>;

/// Named per-frame callbacks, fired by the render loop once per tick in registration order.
///
/// Keys are unique: registering an existing key replaces its callback in place.
#[derive(Default)]
pub struct AnimationLoop {
	actions: Vec<(String, AnimateAction)>,
	frame: u64,
}

impl AnimationLoop {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_animate_action(&mut self, key: impl Into<String>, action: impl FnMut() + 'static) {
		let key = key.into();
		match self.actions.iter_mut().find(|(k, _)| *k == key) {
			Some(entry) => {
				debug!("Replacing animate action {key:?}");
				entry.1 = Box::new(action);
			}
			None => {
				debug!("Adding animate action {key:?}");
				self.actions.push((key, Box::new(action)));
			}
		}
	}

	/// Returns whether an action was registered under `key`.
	pub fn remove_animate_action(&mut self, key: &str) -> bool {
		let len = self.actions.len();
		self.actions.retain(|(k, _)| k != key);
		len != self.actions.len()
	}

	pub fn contains(&self, key: &str) -> bool {
		self.actions.iter().any(|(k, _)| k == key)
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.actions.iter().map(|(k, _)| k.as_str())
	}

	pub fn len(&self) -> usize {
		self.actions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.actions.is_empty()
	}

	/// Frames ticked so far.
	pub fn frame(&self) -> u64 {
		self.frame
	}

	/// Run every action once.
	pub fn tick(&mut self) {
		self.frame += 1;
		for (_, action) in self.actions.iter_mut() {
			action();
		}
	}
}

impl fmt::Debug for AnimationLoop {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AnimationLoop")
			.field("actions", &self.keys().collect::<Vec<_>>())
			.field("frame", &self.frame)
			.finish()
	}
}
