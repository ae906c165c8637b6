// Module exports for models

pub mod post;
pub mod settings;
