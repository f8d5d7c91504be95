use tracing::debug;

use crate::node::NodeUuid;

use super::tree::{SceneError, SceneTree};

impl SceneTree {
	/// Replace the container `old` with `new` in place.
	///
	/// - Children of `old` without geometry move under `new`. Drawables stay where they are.
	/// - If `old` has a parent, `new` takes its slot among the siblings. `new` is attached
	///   before `old` is detached. Without a parent `new` is left unattached.
	/// - `new` gets the local transform of `old`, so the world placement does not change.
	pub fn swap_container(&mut self, old: NodeUuid, new: NodeUuid) -> Result<(), SceneError> {
		if !self.contains(new) {
			return Err(SceneError::UnknownNode(new));
		}

		let structural: Vec<NodeUuid> = self
			.children(old)
			.into_iter()
			.filter(|&child| self.get_node(child).is_some_and(|node| !node.has_geometry()))
			.collect();
		for child in &structural {
			self.append(new, *child)?;
		}

		if self.parent(old).is_some() {
			self.insert_after(old, new)?;
			self.detach(old)?;
		} else {
			debug!("Container {old} has no parent, leaving {new} unattached");
		}

		self.copy_coordinate(old, new)?;

		debug!("Swapped container {old} for {new}, moved {} children", structural.len());
		Ok(())
	}
}
