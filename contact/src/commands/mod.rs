pub mod interactive;
pub mod submit;
