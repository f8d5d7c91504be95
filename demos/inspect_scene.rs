use std::error::Error;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use glam::vec3;
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};

use shapeshift::formats::user_data::UserData;
use shapeshift::inspector::{Inspector, Intersection};
use shapeshift::math::color::Color;
use shapeshift::math::transform::Transform;
use shapeshift::node::{Drawable, SceneNode};
use shapeshift::resources::{Geometry, Material};
use shapeshift::space::Space;
use shapeshift::texture::arrow::rasterize_arrow;

const PIPE_USER_DATA: &str = r#"{ "showingModel": "pipe", "showingModelOptions": { "flowSpeed": 0.02 } }"#;
const PLANT_USER_DATA: &str = r#"{ "renderOrder": 1 }"#;
const TANK_USER_DATA: &str = r#"{ "showingModel": "line", "bloom": true, "renderOrder": 2 }"#;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
	#[arg(help = "userData JSON for the pipe node")]
	user_data: Option<String>,
	#[arg(long, default_value_t = 50, help = "Frames to tick")]
	frames: u32,
	#[arg(long, help = "Write the flow arrow texture of the pipe to this PNG file")]
	arrow_png: Option<PathBuf>,
	#[arg(short, long)]
	verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
	let cli = Cli::parse();

	tracing_subscriber::registry()
		.with(fmt::layer())
		.with(if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::INFO })
		.init();

	let pipe_user_data = UserData::parse(cli.user_data.as_deref().unwrap_or(PIPE_USER_DATA))?;
	let flow = pipe_user_data.showing_model_options.clone();

	let material = Rc::new(Material::mesh_basic(Color(0x808080)));
	let mut space = Space::new(SceneNode::group("scene"));
	let root = space.tree().root();

	let tree = space.tree_mut();
	let plant = tree.add(
		root,
		SceneNode::group("Plant").with_user_data(UserData::parse(PLANT_USER_DATA)?),
	)?;
	let pipe = tree.add(
		plant,
		SceneNode::group("Pipe1")
			.with_user_data(pipe_user_data)
			.with_transform(Transform::new().with_position(vec3(0., 0., -3.))),
	)?;
	tree.add(
		pipe,
		SceneNode::with_drawable(
			"segment",
			Drawable::mesh(Rc::new(Geometry::cuboid(0.3, 4., 0.3)), material.clone()),
		),
	)?;
	let tank = tree.add(
		plant,
		SceneNode::with_drawable("Tank", Drawable::mesh(Rc::new(Geometry::cuboid(2., 3., 2.)), material))
			.with_user_data(UserData::parse(TANK_USER_DATA)?)
			.with_transform(Transform::new().with_position(vec3(3., 1.5, 0.))),
	)?;
	tree.add(tank, SceneNode::group("gauges"))?;

	let plant_id = space.attach_controller(plant)?;
	space.attach_controller(pipe)?;
	let tank_id = space.attach_controller(tank)?;

	info!("Applying user data");
	space.apply_user_data(plant_id);

	let mut inspector = Inspector::new(&mut space);
	for _ in 0..cli.frames {
		space.tick();
	}

	if let Some(tank) = space.controller(tank_id).map(|controller| controller.showing()) {
		inspector.click(&mut space, &[Intersection {
			object: tank,
			distance: 3.,
		}]);
	}

	println!("== Scene ==\n{}", space.tree());
	println!("== Controllers ==");
	for controller in space.controllers() {
		println!("{}: {}", controller.name(), controller.state());
	}
	println!("== Animations ==");
	for key in space.animations().keys() {
		println!("{key}");
	}
	println!("ticked {} frames", inspector.stats().frames());

	if let Some(path) = cli.arrow_png {
		let rotation = flow.flow_rotation.unwrap_or(90.);
		let color = flow.flow_color.unwrap_or(Color::CYAN);
		rasterize_arrow(rotation.to_radians(), color).save(&path)?;
		info!("Wrote arrow texture to {}", path.display());
	}

	Ok(())
}
