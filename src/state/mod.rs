pub mod boundary;
pub mod gesture;
pub mod session;
pub mod touch;
pub mod zoom;

pub use session::SessionController;
