use std::collections::HashMap;
use std::fmt::Display;

use glam::Mat4;
use indextree::{Arena, NodeId};

use crate::node::{NodeUuid, SceneNode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
	#[error("Unknown scene node {0}")]
	UnknownNode(NodeUuid),
	#[error("Can not attach node {node} under its own descendant {target}")]
	WouldCycle { node: NodeUuid, target: NodeUuid },
	#[error("The root node {0} can not be moved")]
	RootIsFixed(NodeUuid),
}

/// Scene hierarchy. Nodes are owned by the arena; detached nodes stay alive and can be attached again.
#[derive(Debug)]
pub struct SceneTree {
	root_id: NodeId,
	arena: Arena<SceneNode>,
	node_ids: HashMap<NodeUuid, NodeId>,
	next_uuid: u32,
}

impl SceneTree {
	pub fn new_with_root(mut node: SceneNode) -> Self {
		let uuid = NodeUuid(1);
		node.uuid = uuid;

		let mut node_ids = HashMap::new();
		let mut arena = Arena::new();

		let root_id = arena.new_node(node);
		node_ids.insert(uuid, root_id);

		Self {
			root_id,
			arena,
			node_ids,
			next_uuid: 2,
		}
	}

	pub fn root(&self) -> NodeUuid {
		self.arena[self.root_id].get().uuid
	}

	/// Put a node in the arena without attaching it anywhere.
	pub fn insert(&mut self, mut node: SceneNode) -> NodeUuid {
		let uuid = NodeUuid(self.next_uuid);
		self.next_uuid += 1;
		node.uuid = uuid;

		let node_id = self.arena.new_node(node);
		self.node_ids.insert(uuid, node_id);
		uuid
	}

	/// Insert a node as last child of `parent`.
	pub fn add(&mut self, parent: NodeUuid, node: SceneNode) -> Result<NodeUuid, SceneError> {
		let parent_id = self.node_id(parent)?;
		let uuid = self.insert(node);
		let node_id = self.node_ids[&uuid];
		parent_id.append(node_id, &mut self.arena);
		Ok(uuid)
	}

	fn node_id(&self, uuid: NodeUuid) -> Result<NodeId, SceneError> {
		self.node_ids.get(&uuid).copied().ok_or(SceneError::UnknownNode(uuid))
	}

	fn uuid_of(&self, node_id: NodeId) -> NodeUuid {
		self.arena[node_id].get().uuid
	}

	/// `node` may be moved next to or under `target` without creating a cycle.
	fn check_movable(&self, node: NodeUuid, target: NodeUuid) -> Result<(NodeId, NodeId), SceneError> {
		let node_id = self.node_id(node)?;
		let target_id = self.node_id(target)?;
		if node_id == self.root_id {
			return Err(SceneError::RootIsFixed(node));
		}
		if target_id.ancestors(&self.arena).any(|ancestor| ancestor == node_id) {
			return Err(SceneError::WouldCycle { node, target });
		}
		Ok((node_id, target_id))
	}

	/// Move `child` (with its subtree) to the end of `parent`'s children, leaving its previous parent.
	pub fn append(&mut self, parent: NodeUuid, child: NodeUuid) -> Result<(), SceneError> {
		let (child_id, parent_id) = self.check_movable(child, parent)?;
		child_id.detach(&mut self.arena);
		parent_id.append(child_id, &mut self.arena);
		Ok(())
	}

	/// Move `node` (with its subtree) right after `sibling`, under the same parent.
	pub fn insert_after(&mut self, sibling: NodeUuid, node: NodeUuid) -> Result<(), SceneError> {
		let (node_id, sibling_id) = self.check_movable(node, sibling)?;
		node_id.detach(&mut self.arena);
		sibling_id.insert_after(node_id, &mut self.arena);
		Ok(())
	}

	/// Take a node (with its subtree) out of its parent. The nodes stay in the arena.
	pub fn detach(&mut self, node: NodeUuid) -> Result<(), SceneError> {
		let node_id = self.node_id(node)?;
		if node_id == self.root_id {
			return Err(SceneError::RootIsFixed(node));
		}
		node_id.detach(&mut self.arena);
		Ok(())
	}

	pub fn contains(&self, uuid: NodeUuid) -> bool {
		self.node_ids.contains_key(&uuid)
	}

	pub fn get_node(&self, uuid: NodeUuid) -> Option<&SceneNode> {
		Some(self.arena.get(*self.node_ids.get(&uuid)?)?.get())
	}

	pub fn get_node_mut(&mut self, uuid: NodeUuid) -> Option<&mut SceneNode> {
		Some(self.arena.get_mut(*self.node_ids.get(&uuid)?)?.get_mut())
	}

	pub fn parent(&self, uuid: NodeUuid) -> Option<NodeUuid> {
		let node = self.arena.get(*self.node_ids.get(&uuid)?)?;
		Some(self.uuid_of(node.parent()?))
	}

	/// Direct children, in order. Empty for unknown nodes.
	pub fn children(&self, uuid: NodeUuid) -> Vec<NodeUuid> {
		match self.node_ids.get(&uuid) {
			Some(node_id) => node_id.children(&self.arena).map(|id| self.uuid_of(id)).collect(),
			None => Vec::new(),
		}
	}

	/// The node itself followed by all its descendants, parents before children.
	pub fn pre_order(&self, uuid: NodeUuid) -> Vec<NodeUuid> {
		match self.node_ids.get(&uuid) {
			Some(node_id) => node_id.descendants(&self.arena).map(|id| self.uuid_of(id)).collect(),
			None => Vec::new(),
		}
	}

	/// First node in the arena with this name.
	pub fn find_by_name(&self, name: &str) -> Option<NodeUuid> {
		self.arena
			.iter()
			.filter(|node| !node.is_removed())
			.map(indextree::Node::get)
			.find(|node| node.name == name)
			.map(|node| node.uuid)
	}

	/// Whether the node is connected to the root.
	pub fn is_attached(&self, uuid: NodeUuid) -> bool {
		self.node_ids
			.get(&uuid)
			.is_some_and(|node_id| node_id.ancestors(&self.arena).any(|id| id == self.root_id))
	}

	/// Composition of the local transforms from the topmost ancestor down to the node.
	pub fn world_matrix(&self, uuid: NodeUuid) -> Option<Mat4> {
		let node_id = self.node_ids.get(&uuid)?;
		Some(
			node_id
				.ancestors(&self.arena)
				.map(|id| self.arena[id].get().transform.to_matrix())
				.fold(Mat4::IDENTITY, |child, parent| parent * child),
		)
	}

	/// Give `to` the local position/rotation/scale of `from`.
	pub fn copy_coordinate(&mut self, from: NodeUuid, to: NodeUuid) -> Result<(), SceneError> {
		let transform = self.get_node(from).ok_or(SceneError::UnknownNode(from))?.transform;
		self.get_node_mut(to)
			.ok_or(SceneError::UnknownNode(to))?
			.transform
			.copy_from(&transform);
		Ok(())
	}

	/// Put a node back to the identity transform.
	pub fn reset_coordinate(&mut self, uuid: NodeUuid) -> Result<(), SceneError> {
		self.get_node_mut(uuid).ok_or(SceneError::UnknownNode(uuid))?.transform.reset();
		Ok(())
	}
}

fn rec_fmt(indent: usize, f: &mut std::fmt::Formatter<'_>, node_id: NodeId, arena: &Arena<SceneNode>) -> std::fmt::Result {
	let Some(node) = arena.get(node_id) else {
		return Ok(());
	};

	let node = node.get();

	let type_name = node.type_name();
	#[cfg(feature = "owo")]
	let type_name = {
		use owo_colors::OwoColorize;
		type_name.magenta().to_string()
	};

	writeln!(f, "{}- [{}] {}", "  ".repeat(indent), type_name, node.name)?;
	for child in node_id.children(arena) {
		rec_fmt(indent + 1, f, child, arena)?;
	}

	Ok(())
}

impl Display for SceneTree {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		rec_fmt(0, f, self.root_id, &self.arena)
	}
}

#[cfg(test)]
mod tests {
	use glam::vec3;

	use super::*;
	use crate::math::transform::Transform;

	fn tree() -> (SceneTree, NodeUuid, NodeUuid, NodeUuid) {
		let mut tree = SceneTree::new_with_root(SceneNode::group("scene"));
		let root = tree.root();
		let a = tree.add(root, SceneNode::group("a")).unwrap();
		let b = tree.add(root, SceneNode::group("b")).unwrap();
		let c = tree.add(a, SceneNode::group("c")).unwrap();
		(tree, a, b, c)
	}

	#[test]
	fn add_and_query() {
		let (tree, a, b, c) = tree();
		let root = tree.root();

		assert_eq!(tree.children(root), vec![a, b]);
		assert_eq!(tree.parent(c), Some(a));
		assert_eq!(tree.parent(root), None);
		assert_eq!(tree.pre_order(root), vec![root, a, c, b]);
		assert_eq!(tree.find_by_name("c"), Some(c));
		assert_eq!(tree.to_string(), "- [Group] scene\n  - [Group] a\n    - [Group] c\n  - [Group] b\n");
	}

	#[test]
	fn append_reparents() {
		let (mut tree, a, b, c) = tree();

		tree.append(b, c).unwrap();
		assert!(tree.children(a).is_empty());
		assert_eq!(tree.children(b), vec![c]);
		assert_eq!(tree.parent(c), Some(b));
	}

	#[test]
	fn cycles_and_root_moves_are_rejected() {
		let (mut tree, a, _, c) = tree();
		let root = tree.root();

		assert_eq!(tree.append(c, a), Err(SceneError::WouldCycle { node: a, target: c }));
		assert_eq!(tree.append(a, a), Err(SceneError::WouldCycle { node: a, target: a }));
		assert_eq!(tree.append(a, root), Err(SceneError::RootIsFixed(root)));
		assert_eq!(tree.parent(c), Some(a));
	}

	#[test]
	fn insert_after_keeps_sibling_slot() {
		let (mut tree, a, b, _) = tree();
		let root = tree.root();
		let d = tree.insert(SceneNode::group("d"));
		assert!(!tree.is_attached(d));

		tree.insert_after(a, d).unwrap();
		assert_eq!(tree.children(root), vec![a, d, b]);

		tree.detach(a).unwrap();
		assert_eq!(tree.children(root), vec![d, b]);
		assert!(tree.contains(a));
		assert!(!tree.is_attached(a));
	}

	#[test]
	fn world_matrix_composes_ancestors() {
		let (mut tree, a, _, c) = tree();
		tree.get_node_mut(a).unwrap().transform = Transform::new()
			.with_position(vec3(1., 0., 0.))
			.with_scale(vec3(2., 2., 2.));
		tree.get_node_mut(c).unwrap().transform = Transform::new().with_position(vec3(0., 1., 0.));

		let origin = tree.world_matrix(c).unwrap().transform_point3(glam::Vec3::ZERO);
		assert!((origin - vec3(1., 2., 0.)).length() < 1e-6);
	}

	#[test]
	fn coordinates() {
		let (mut tree, a, b, _) = tree();
		tree.get_node_mut(a).unwrap().transform.position = vec3(3., 2., 1.);

		tree.copy_coordinate(a, b).unwrap();
		assert_eq!(tree.get_node(b).unwrap().transform.position, vec3(3., 2., 1.));

		tree.reset_coordinate(b).unwrap();
		assert!(tree.get_node(b).unwrap().transform.is_identity());
	}
}
