//! Browser side of the viewer: builds the overlay, feeds DOM events into the
//! session controller and applies what comes back.

pub mod lightbox;
pub mod listeners;
pub mod stage;
pub mod timer;

pub use lightbox::Lightbox;
