mod json;
pub mod user_data;

pub use json::{JsonError, JsonObject, JsonResult};
