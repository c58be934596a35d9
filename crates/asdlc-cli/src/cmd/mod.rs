pub mod project;
pub mod story;
pub mod validate;
