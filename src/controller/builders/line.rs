use crate::controller::{LineOptions, Representation};
use crate::math::color::Color;
use crate::node::{Drawable, NodeUuid, SceneNode};
use crate::resources::{Material, ResourceFactory, Side};
use crate::scene::{SceneError, SceneTree};

use super::{own_drawables, Source};

/// Edge outlines of the source and its direct children.
///
/// Every outline comes with an invisible mesh of the same geometry, edges alone being too thin to pick.
pub(super) fn build_line(
	tree: &mut SceneTree,
	resources: &dyn ResourceFactory,
	source: &Source,
	opt: LineOptions,
) -> Result<NodeUuid, SceneError> {
	let container = source.container(tree, Representation::Line);

	let line_material = resources.material(Material::line_basic(opt.color));
	let box_material = resources.material(
		Material::mesh_basic(Color::WHITE)
			.translucent(opt.opacity)
			.with_side(Side::Back),
	);

	for uuid in own_drawables(tree, source.uuid) {
		let Some(node) = tree.get_node(uuid) else {
			continue;
		};
		let Some(drawable) = &node.drawable else {
			continue;
		};
		let name = node.name.clone();
		let geometry = drawable.geometry.clone();

		let edges = resources.edges_geometry(&geometry);
		let line = tree.add(
			container,
			SceneNode::with_drawable(format!("{name}_line"), Drawable::line_segments(edges, line_material.clone())),
		)?;
		let pick = tree.add(
			container,
			SceneNode::with_drawable(format!("{name}_pick"), Drawable::mesh(geometry, box_material.clone())),
		)?;

		// a leaf source gets replaced by the container, which takes over its transform
		if source.has_geometry {
			tree.reset_coordinate(line)?;
			tree.reset_coordinate(pick)?;
		} else {
			tree.copy_coordinate(uuid, line)?;
			tree.copy_coordinate(uuid, pick)?;
		}
	}

	Ok(container)
}

#[cfg(test)]
mod tests {
	use std::rc::Rc;

	use glam::vec3;

	use super::*;
	use crate::math::transform::Transform;
	use crate::node::DrawableKind;
	use crate::resources::{CpuResources, Geometry, MaterialKind};

	fn cube(name: &str) -> SceneNode {
		SceneNode::with_drawable(
			name,
			Drawable::mesh(
				Rc::new(Geometry::cuboid(1., 1., 1.)),
				Rc::new(Material::mesh_basic(Color::WHITE)),
			),
		)
	}

	#[test]
	fn group_source_keeps_child_transforms() {
		let mut tree = SceneTree::new_with_root(SceneNode::group("scene"));
		let root = tree.root();
		let group = tree.add(root, SceneNode::group("Rack")).unwrap();
		tree.add(
			group,
			cube("a").with_transform(Transform::new().with_position(vec3(1., 2., 3.))),
		)
		.unwrap();
		tree.add(group, SceneNode::group("label")).unwrap();

		let source = Source::read(&tree, group).unwrap();
		let container = build_line(&mut tree, &CpuResources::default(), &source, LineOptions {
			color: Color(0x123456),
			opacity: 0.,
		})
		.unwrap();

		let node = tree.get_node(container).unwrap();
		assert_eq!(node.name, "Rack_lineObject3d");
		assert!(!node.has_geometry());
		assert!(!tree.is_attached(container));

		let built = tree.children(container);
		assert_eq!(built.len(), 2);

		let line = tree.get_node(built[0]).unwrap();
		let line_drawable = line.drawable.as_ref().unwrap();
		assert_eq!(line_drawable.kind, DrawableKind::LineSegments);
		assert_eq!(line_drawable.material.kind, MaterialKind::LineBasic);
		assert_eq!(line_drawable.material.color, Color(0x123456));
		assert_eq!(line_drawable.geometry.primitive_count(), 12);
		assert_eq!(line.transform.position, vec3(1., 2., 3.));

		let pick = tree.get_node(built[1]).unwrap();
		let pick_drawable = pick.drawable.as_ref().unwrap();
		assert_eq!(pick_drawable.kind, DrawableKind::Mesh);
		assert_eq!(pick_drawable.material.opacity, 0.);
		assert!(pick_drawable.material.transparent);
		assert_eq!(pick_drawable.material.side, Side::Back);
		assert_eq!(pick.transform.position, vec3(1., 2., 3.));
	}

	#[test]
	fn leaf_source_resets_transforms() {
		let mut tree = SceneTree::new_with_root(SceneNode::group("scene"));
		let root = tree.root();
		let leaf = tree
			.add(root, cube("Tank").with_transform(Transform::new().with_scale(vec3(2., 2., 2.))))
			.unwrap();

		let source = Source::read(&tree, leaf).unwrap();
		let container = build_line(&mut tree, &CpuResources::default(), &source, LineOptions {
			color: Color::CYAN,
			opacity: 0.,
		})
		.unwrap();

		for uuid in tree.children(container) {
			assert!(tree.get_node(uuid).unwrap().transform.is_identity());
		}
		assert_eq!(tree.children(container).len(), 2);
	}
}
