pub mod app;
pub mod gallery;
pub mod intro_overlay;
pub mod settings_modal;
