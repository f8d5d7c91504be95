mod line;
mod pipe;
mod points;

use tracing::debug;

use crate::animation::AnimationLoop;
use crate::node::{NodeUuid, SceneNode};
use crate::resources::ResourceFactory;
use crate::scene::{SceneError, SceneTree};

use super::{ControllerId, LineOptions, PipeOptions, PointsOptions, Representation, ShowingModelOptions};

pub(crate) use pipe::pipe_action_key;

/// Everything a builder may touch.
pub(crate) struct BuildContext<'a> {
	pub tree: &'a mut SceneTree,
	pub resources: &'a dyn ResourceFactory,
	pub animations: &'a mut AnimationLoop,
}

/// Source node facts every builder needs, read before the tree is mutated.
struct Source {
	uuid: NodeUuid,
	name: String,
	has_geometry: bool,
	controller: Option<ControllerId>,
}

impl Source {
	fn read(tree: &SceneTree, uuid: NodeUuid) -> Result<Self, SceneError> {
		let node = tree.get_node(uuid).ok_or(SceneError::UnknownNode(uuid))?;
		Ok(Self {
			uuid,
			name: node.name.clone(),
			has_geometry: node.has_geometry(),
			controller: node.controller,
		})
	}

	/// An empty, unattached container, tagged with the source's controller.
	fn container(&self, tree: &mut SceneTree, representation: Representation) -> NodeUuid {
		let mut container = SceneNode::group(representation.container_name(&self.name));
		container.controller = self.controller;
		tree.insert(container)
	}
}

/// The source node followed by its direct children that carry geometry.
fn own_drawables(tree: &SceneTree, source: NodeUuid) -> Vec<NodeUuid> {
	tree.children(source)
		.into_iter()
		.chain(std::iter::once(source))
		.filter(|&uuid| tree.get_node(uuid).is_some_and(SceneNode::has_geometry))
		.collect()
}

/// Build the container of `representation` for `source`, unattached.
///
/// `Normal` is the source node itself and is never built.
pub(crate) fn build(
	ctx: BuildContext,
	representation: Representation,
	source: NodeUuid,
	options: &ShowingModelOptions,
) -> Result<Option<NodeUuid>, SceneError> {
	let BuildContext {
		tree,
		resources,
		animations,
	} = ctx;
	let source = Source::read(tree, source)?;

	let container = match representation {
		Representation::Normal => return Ok(None),
		Representation::Line => line::build_line(tree, resources, &source, LineOptions::from(options))?,
		Representation::Pipe => pipe::build_pipe(tree, resources, animations, &source, PipeOptions::from(options))?,
		Representation::Points => points::build_points(tree, resources, &source, PointsOptions::from(options))?,
	};

	debug!(
		"Built {representation} container {container} for {:?} with {} drawables",
		source.name,
		tree.children(container).len()
	);
	Ok(Some(container))
}
