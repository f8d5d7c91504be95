use glam::Vec3;

use crate::controller::{PointsOptions, Representation};
use crate::node::{Drawable, NodeUuid, SceneNode};
use crate::resources::{Material, ResourceFactory};
use crate::scene::{SceneError, SceneTree};

use super::{own_drawables, Source};

/// One point cloud per geometry of the source and its direct children, sharing a single material.
pub(super) fn build_points(
	tree: &mut SceneTree,
	resources: &dyn ResourceFactory,
	source: &Source,
	opt: PointsOptions,
) -> Result<NodeUuid, SceneError> {
	let container = source.container(tree, Representation::Points);
	let material = resources.material(Material::points(opt.size, opt.color));

	for uuid in own_drawables(tree, source.uuid) {
		let Some(node) = tree.get_node(uuid) else {
			continue;
		};
		let Some(drawable) = &node.drawable else {
			continue;
		};

		let mut points = SceneNode::with_drawable(
			format!("{}_points", node.name),
			Drawable::points(drawable.geometry.clone(), material.clone()),
		);
		// placed by the container alone
		points.transform.position = Vec3::ZERO;
		tree.add(container, points)?;
	}

	Ok(container)
}
