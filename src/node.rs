pub mod drawable;

use std::fmt;

use crate::controller::ControllerId;
use crate::formats::user_data::UserData;
use crate::math::transform::Transform;

pub use drawable::{Drawable, DrawableKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct NodeUuid(pub(crate) u32);

impl NodeUuid {
	pub fn raw(&self) -> u32 {
		self.0
	}
}

impl fmt::Display for NodeUuid {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Render layer that post processing picks up for glow.
pub const BLOOM_LAYER: u8 = 1;

/// Bitmask of render layers a node belongs to. Nodes start on layer 0 only.
///
/// There are 32 layers, toggling anything above is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layers(u32);

impl Default for Layers {
	fn default() -> Self {
		Self(1)
	}
}

impl Layers {
	fn bit(layer: u8) -> u32 {
		1u32.checked_shl(layer.into()).unwrap_or(0)
	}

	pub fn enable(&mut self, layer: u8) {
		self.0 |= Self::bit(layer);
	}

	pub fn disable(&mut self, layer: u8) {
		self.0 &= !Self::bit(layer);
	}

	pub fn is_enabled(&self, layer: u8) -> bool {
		self.0 & Self::bit(layer) != 0
	}

	pub fn mask(&self) -> u32 {
		self.0
	}
}

/// An element of the scene graph.
///
/// Hierarchy links live in the [`SceneTree`](crate::scene::SceneTree) holding the node.
#[derive(Debug, Clone)]
pub struct SceneNode {
	/// Assigned by the tree on insertion.
	pub(crate) uuid: NodeUuid,
	pub name: String,
	pub transform: Transform,
	/// Only leaves that actually render carry one.
	pub drawable: Option<Drawable>,
	/// Persisted per-node configuration, see [`UserData`].
	pub user_data: Option<UserData>,
	pub render_order: f32,
	pub layers: Layers,
	/// Non-owning back-reference, set when a controller is attached.
	pub(crate) controller: Option<ControllerId>,
}

impl SceneNode {
	/// A node without geometry, used to group and offset children.
	pub fn group(name: impl Into<String>) -> Self {
		Self {
			uuid: NodeUuid::default(),
			name: name.into(),
			transform: Transform::default(),
			drawable: None,
			user_data: None,
			render_order: 0.,
			layers: Layers::default(),
			controller: None,
		}
	}

	pub fn with_drawable(name: impl Into<String>, drawable: Drawable) -> Self {
		Self {
			drawable: Some(drawable),
			..Self::group(name)
		}
	}

	pub fn with_transform(mut self, transform: Transform) -> Self {
		self.transform = transform;
		self
	}

	pub fn with_user_data(mut self, user_data: UserData) -> Self {
		self.user_data = Some(user_data);
		self
	}

	pub fn uuid(&self) -> NodeUuid {
		self.uuid
	}

	pub fn has_geometry(&self) -> bool {
		self.drawable.is_some()
	}

	pub fn controller(&self) -> Option<ControllerId> {
		self.controller
	}

	/// Short label for tree dumps.
	pub fn type_name(&self) -> String {
		match &self.drawable {
			Some(drawable) => drawable.kind.to_string(),
			None => "Group".to_owned(),
		}
	}
}
