mod swap;
mod tree;

pub use tree::{SceneError, SceneTree};
