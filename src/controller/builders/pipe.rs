use tracing::debug;

use crate::animation::AnimationLoop;
use crate::controller::{PipeOptions, Representation};
use crate::math::color::Color;
use crate::node::{Drawable, NodeUuid, SceneNode};
use crate::resources::{Material, ResourceFactory, Side};
use crate::scene::{SceneError, SceneTree};
use crate::texture::arrow::rasterize_arrow;
use crate::texture::WrapMode;

use super::Source;

/// Key of the animate action moving the arrows of `name`'s pipe.
pub(crate) fn pipe_action_key(name: &str) -> String {
	format!("{name}-pipe")
}

/// A see-through body with arrows flowing along it, for every geometry in the source's subtree.
///
/// Registers an animate action scrolling the arrow texture by `flow_speed` every frame.
pub(super) fn build_pipe(
	tree: &mut SceneTree,
	resources: &dyn ResourceFactory,
	animations: &mut AnimationLoop,
	source: &Source,
	opt: PipeOptions,
) -> Result<NodeUuid, SceneError> {
	let container = source.container(tree, Representation::Pipe);

	let texture = resources.canvas_texture(rasterize_arrow(opt.flow_rotation.to_radians(), opt.flow_color));
	{
		let mut texture = texture.borrow_mut();
		texture.wrap_s = WrapMode::Repeat;
		texture.wrap_t = WrapMode::Repeat;
		texture.repeat.x = 1.;
		texture.repeat.y = opt.flow_number;
	}

	let body_material = resources.material(
		Material::mesh_basic(opt.color)
			.translucent(opt.opacity)
			.with_side(Side::Double)
			.without_depth(),
	);
	let flow_material = resources.material(
		Material::mesh_basic(Color::WHITE)
			.with_map(texture.clone())
			.translucent(opt.flow_opacity)
			.with_side(Side::Double)
			.without_depth(),
	);

	for uuid in tree.pre_order(source.uuid) {
		let Some(node) = tree.get_node(uuid) else {
			continue;
		};
		let Some(drawable) = &node.drawable else {
			continue;
		};
		let name = node.name.clone();
		let geometry = drawable.geometry.clone();

		tree.add(
			container,
			SceneNode::with_drawable(format!("{name}_pipe"), Drawable::mesh(geometry.clone(), body_material.clone())),
		)?;
		tree.add(
			container,
			SceneNode::with_drawable(format!("{name}_flow"), Drawable::mesh(geometry, flow_material.clone())),
		)?;
	}

	let key = pipe_action_key(&source.name);
	debug!("Registering flow of {:?} at {} per frame", source.name, opt.flow_speed);
	let speed = opt.flow_speed;
	animations.add_animate_action(key, move || {
		texture.borrow_mut().offset.y += speed;
	});

	Ok(container)
}

#[cfg(test)]
mod tests {
	use std::rc::Rc;

	use super::*;
	use crate::controller::ShowingModelOptions;
	use crate::resources::{CpuResources, Geometry};

	#[test]
	fn traverses_whole_subtree_and_scrolls() {
		let geometry = Rc::new(Geometry::cuboid(1., 4., 1.));
		let material = Rc::new(Material::mesh_basic(Color::WHITE));

		let mut tree = SceneTree::new_with_root(SceneNode::group("scene"));
		let root = tree.root();
		let pipe = tree.add(root, SceneNode::group("Pipe1")).unwrap();
		let segment = tree.add(pipe, SceneNode::group("segment")).unwrap();
		tree.add(
			segment,
			SceneNode::with_drawable("deep", Drawable::mesh(geometry.clone(), material.clone())),
		)
		.unwrap();
		tree.add(pipe, SceneNode::with_drawable("near", Drawable::mesh(geometry, material)))
			.unwrap();

		let mut animations = AnimationLoop::new();
		let source = Source::read(&tree, pipe).unwrap();
		let opt = PipeOptions::from(&ShowingModelOptions {
			flow_speed: Some(0.25),
			flow_number: Some(3.),
			..Default::default()
		});
		let container = build_pipe(&mut tree, &CpuResources::default(), &mut animations, &source, opt).unwrap();

		assert_eq!(tree.get_node(container).unwrap().name, "Pipe1_pipeObject3d");
		let built = tree.children(container);
		assert_eq!(built.len(), 4);

		let body = tree.get_node(built[0]).unwrap().drawable.clone().unwrap();
		assert_eq!(body.material.color, Color(0x4040FF));
		assert_eq!(body.material.opacity, 0.5);
		assert_eq!(body.material.side, Side::Double);
		assert!(!body.material.depth_test && !body.material.depth_write);
		assert!(body.material.map.is_none());

		let flow = tree.get_node(built[1]).unwrap().drawable.clone().unwrap();
		assert!(Rc::ptr_eq(&flow.geometry, &body.geometry));
		assert!(!flow.material.depth_test && !flow.material.depth_write);
		let texture = flow.material.map.clone().unwrap();
		assert_eq!(texture.borrow().wrap_s, WrapMode::Repeat);
		assert_eq!(texture.borrow().wrap_t, WrapMode::Repeat);
		assert_eq!(texture.borrow().repeat.y, 3.);

		assert_eq!(animations.keys().collect::<Vec<_>>(), vec!["Pipe1-pipe"]);
		animations.tick();
		animations.tick();
		assert_eq!(texture.borrow().offset.y, 0.5);
		assert_eq!(texture.borrow().offset.x, 0.);
	}
}
