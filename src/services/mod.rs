// Service module exports

pub mod i18n;
pub mod post_status;
pub mod settings;
