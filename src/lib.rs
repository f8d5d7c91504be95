pub mod animation;
pub mod controller;
pub mod formats;
pub mod inspector;
pub mod math;
pub mod node;
pub mod resources;
pub mod scene;
pub mod space;
pub mod texture;
