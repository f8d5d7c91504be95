//! Per-node controllers switching between visual representations.
//!
//! A controller owns nothing in the scene tree: it remembers which node it controls, which
//! containers it has built so far and which one is currently attached. Operations that touch
//! the tree live on [`Space`](crate::space::Space).

pub(crate) mod builders;
pub mod options;
mod representation;

use std::collections::HashMap;
use std::fmt;

use crate::math::transform::Transform;
use crate::node::NodeUuid;
use crate::scene::SceneError;

pub use options::{LineOptions, PipeOptions, PointsOptions, ShowingModelOptions};
pub use representation::Representation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ControllerId(pub(crate) u32);

impl fmt::Display for ControllerId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "controller {}", self.0)
	}
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ControllerError {
	#[error("Can't change to this model: {0:?}")]
	InvalidModel(String),
	#[error("Representation {0} is already built")]
	AlreadyBuilt(Representation),
	#[error("Unknown {0}")]
	UnknownController(ControllerId),
	#[error("Node {0} already has a {1}")]
	AlreadyAttached(NodeUuid, ControllerId),
	#[error(transparent)]
	Scene(#[from] SceneError),
}

/// Containers built so far, per representation. Entries are never replaced.
#[derive(Debug, Default)]
pub struct RepresentationCache {
	containers: HashMap<Representation, NodeUuid>,
}

impl RepresentationCache {
	pub fn get(&self, representation: Representation) -> Option<NodeUuid> {
		self.containers.get(&representation).copied()
	}

	pub fn contains(&self, representation: Representation) -> bool {
		self.containers.contains_key(&representation)
	}

	/// Storing a second container for the same representation is a logic error and is refused.
	pub fn insert(&mut self, representation: Representation, container: NodeUuid) -> Result<(), ControllerError> {
		if self.contains(representation) {
			return Err(ControllerError::AlreadyBuilt(representation));
		}
		self.containers.insert(representation, container);
		Ok(())
	}

	pub fn len(&self) -> usize {
		self.containers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.containers.is_empty()
	}
}

#[derive(Debug)]
pub struct Controller {
	id: ControllerId,
	source: NodeUuid,
	name: String,
	original_transform: Transform,
	cache: RepresentationCache,
	state: Representation,
	showing: NodeUuid,
}

impl Controller {
	/// Starts out showing `source` itself.
	pub(crate) fn new(id: ControllerId, source: NodeUuid, name: String, transform: Transform) -> Self {
		let mut cache = RepresentationCache::default();
		// the normal container is the source itself, so it is cached from the start
		cache.containers.insert(Representation::Normal, source);

		Self {
			id,
			source,
			name,
			original_transform: transform,
			cache,
			state: Representation::Normal,
			showing: source,
		}
	}

	pub fn id(&self) -> ControllerId {
		self.id
	}

	/// The node this controller was attached to.
	pub fn source(&self) -> NodeUuid {
		self.source
	}

	/// Name of the source node when the controller was attached.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Local transform of the source node when the controller was attached.
	pub fn original_transform(&self) -> &Transform {
		&self.original_transform
	}

	pub fn state(&self) -> Representation {
		self.state
	}

	/// Container currently attached in place of the source node.
	pub fn showing(&self) -> NodeUuid {
		self.showing
	}

	pub fn cache(&self) -> &RepresentationCache {
		&self.cache
	}

	pub fn container(&self, representation: Representation) -> Option<NodeUuid> {
		self.cache.get(representation)
	}

	/// Key of the animate action registered by the pipe representation.
	///
	/// The action keeps running after switching away from the pipe, callers that want it
	/// stopped remove it from the animation loop with this key.
	pub fn flow_action_key(&self) -> String {
		builders::pipe_action_key(&self.name)
	}

	pub(crate) fn cache_mut(&mut self) -> &mut RepresentationCache {
		&mut self.cache
	}

	pub(crate) fn set_showing(&mut self, representation: Representation, container: NodeUuid) {
		self.state = representation;
		self.showing = container;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cache_is_insert_once() {
		let mut cache = RepresentationCache::default();
		assert!(cache.is_empty());

		cache.insert(Representation::Line, NodeUuid(7)).unwrap();
		assert_eq!(
			cache.insert(Representation::Line, NodeUuid(8)),
			Err(ControllerError::AlreadyBuilt(Representation::Line))
		);
		assert_eq!(cache.get(Representation::Line), Some(NodeUuid(7)));
		assert_eq!(cache.len(), 1);
	}

	#[test]
	fn starts_normal() {
		let controller = Controller::new(ControllerId(1), NodeUuid(3), "Pump".to_owned(), Transform::default());

		assert_eq!(controller.state(), Representation::Normal);
		assert_eq!(controller.showing(), NodeUuid(3));
		assert_eq!(controller.container(Representation::Normal), Some(NodeUuid(3)));
		assert_eq!(controller.container(Representation::Pipe), None);
		assert_eq!(controller.flow_action_key(), "Pump-pipe");
	}
}
