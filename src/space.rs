use std::collections::HashMap;

use tracing::{debug, error, info};

use crate::animation::AnimationLoop;
use crate::controller::builders::{self, BuildContext};
use crate::controller::{Controller, ControllerError, ControllerId, Representation, ShowingModelOptions};
use crate::node::{NodeUuid, SceneNode, BLOOM_LAYER};
use crate::resources::{CpuResources, ResourceFactory};
use crate::scene::{SceneError, SceneTree};


/// A scene with its controllers and the loop animating them.
pub struct Space {
	tree: SceneTree,
	controllers: HashMap<ControllerId, Controller>,
	next_controller: u32,
	animations: AnimationLoop,
	resources: Box<dyn ResourceFactory>,
	outline: Vec<NodeUuid>,
}

impl Space {
	/// A space creating its resources in plain memory.
	pub fn new(root: SceneNode) -> Self {
		Self::with_resources(root, CpuResources::default())
	}

	pub fn with_resources(root: SceneNode, resources: impl ResourceFactory + 'static) -> Self {
		Self {
			tree: SceneTree::new_with_root(root),
			controllers: HashMap::new(),
			next_controller: 1,
			animations: AnimationLoop::new(),
			resources: Box::new(resources),
			outline: Vec::new(),
		}
	}

	pub fn tree(&self) -> &SceneTree {
		&self.tree
	}

	pub fn tree_mut(&mut self) -> &mut SceneTree {
		&mut self.tree
	}

	pub fn animations(&self) -> &AnimationLoop {
		&self.animations
	}

	pub fn animations_mut(&mut self) -> &mut AnimationLoop {
		&mut self.animations
	}

	pub fn add_animate_action(&mut self, key: impl Into<String>, action: impl FnMut() + 'static) {
		self.animations.add_animate_action(key, action);
	}

	/// Advance one frame.
	pub fn tick(&mut self) {
		self.animations.tick();
	}

	/// Nodes drawn with a selection outline.
	pub fn outline(&self) -> &[NodeUuid] {
		&self.outline
	}

	pub fn set_outline(&mut self, nodes: Vec<NodeUuid>) {
		debug!("Outlining {} nodes", nodes.len());
		self.outline = nodes;
	}

	/// Put `node` under a new controller, showing its normal representation.
	pub fn attach_controller(&mut self, node: NodeUuid) -> Result<ControllerId, ControllerError> {
		let id = ControllerId(self.next_controller);
		let scene_node = self
			.tree
			.get_node_mut(node)
			.ok_or(SceneError::UnknownNode(node))?;
		if let Some(existing) = scene_node.controller {
			return Err(ControllerError::AlreadyAttached(node, existing));
		}
		scene_node.controller = Some(id);

		let controller = Controller::new(id, node, scene_node.name.clone(), scene_node.transform);
		debug!("Attached {id} to {:?}", controller.name());

		self.next_controller += 1;
		self.controllers.insert(id, controller);
		Ok(id)
	}

	pub fn controller(&self, id: ControllerId) -> Option<&Controller> {
		self.controllers.get(&id)
	}

	/// Controller of a source node or of one of its containers.
	pub fn controller_of(&self, node: NodeUuid) -> Option<&Controller> {
		self.controller(self.tree.get_node(node)?.controller?)
	}

	pub fn controllers(&self) -> impl Iterator<Item = &Controller> {
		self.controllers.values()
	}

	/// Show the `model` representation of a controller's node, building it on first use.
	///
	/// `options` take precedence over the node's stored `showingModelOptions` when building.
	/// Errors are logged and leave the controller as it was. Returns `None` for an unknown controller.
	pub fn change_showing_model(
		&mut self,
		id: ControllerId,
		model: &str,
		options: Option<&ShowingModelOptions>,
	) -> Option<&Controller> {
		if let Err(e) = self.try_change_showing_model(id, model, options) {
			error!("{e}");
		}
		self.controllers.get(&id)
	}

	fn try_change_showing_model(
		&mut self,
		id: ControllerId,
		model: &str,
		options: Option<&ShowingModelOptions>,
	) -> Result<(), ControllerError> {
		let target: Representation = model.parse()?;
		let controller = self.controllers.get(&id).ok_or(ControllerError::UnknownController(id))?;
		if controller.state() == target {
			return Ok(());
		}

		let source = controller.source();
		let showing = controller.showing();

		let container = match controller.container(target) {
			Some(container) => container,
			None => {
				let stored = self
					.tree
					.get_node(source)
					.and_then(|node| node.user_data.as_ref())
					.map(|user_data| user_data.showing_model_options.clone())
					.unwrap_or_default();
				let options = match options {
					Some(options) => options.merged_over(&stored),
					None => stored,
				};

				let ctx = BuildContext {
					tree: &mut self.tree,
					resources: self.resources.as_ref(),
					animations: &mut self.animations,
				};
				// only the normal container is never built, and it is cached from the start
				let container = builders::build(ctx, target, source, &options)?
					.ok_or(ControllerError::AlreadyBuilt(Representation::Normal))?;

				self.controllers
					.get_mut(&id)
					.ok_or(ControllerError::UnknownController(id))?
					.cache_mut()
					.insert(target, container)?;
				container
			}
		};

		self.tree.swap_container(showing, container)?;

		let controller = self.controllers.get_mut(&id).ok_or(ControllerError::UnknownController(id))?;
		controller.set_showing(target, container);
		info!("{:?} now shows {target}", controller.name());
		Ok(())
	}

	/// Restore the state stored in the node's userData, children first.
	///
	/// Does nothing for a node without userData.
	pub fn apply_user_data(&mut self, id: ControllerId) {
		let Some(source) = self.controllers.get(&id).map(Controller::source) else {
			error!("{}", ControllerError::UnknownController(id));
			return;
		};
		let Some(user_data) = self.tree.get_node(source).and_then(|node| node.user_data.clone()) else {
			return;
		};

		let children: Vec<ControllerId> = self
			.tree
			.children(source)
			.into_iter()
			.filter_map(|child| self.tree.get_node(child)?.controller)
			.filter(|&child| child != id)
			.collect();
		for child in children {
			self.apply_user_data(child);
		}

		if let Some(render_order) = user_data.render_order {
			if let Some(node) = self.tree.get_node_mut(source) {
				node.render_order = render_order;
			}
		}

		if let Some(model) = user_data.showing_model.as_deref().filter(|model| !model.is_empty()) {
			self.change_showing_model(id, model, None);
		}

		if user_data.bloom {
			self.bloom(id, true);
		}
	}

	/// Toggle the bloom layer on the container currently shown. Other representations are left alone.
	pub fn bloom(&mut self, id: ControllerId, on: bool) {
		let Some(showing) = self.controllers.get(&id).map(Controller::showing) else {
			error!("{}", ControllerError::UnknownController(id));
			return;
		};
		let Some(node) = self.tree.get_node_mut(showing) else {
			error!("Container {showing} of {id} is missing");
			return;
		};

		if on {
			node.layers.enable(BLOOM_LAYER);
		} else {
			node.layers.disable(BLOOM_LAYER);
		}
	}
}
