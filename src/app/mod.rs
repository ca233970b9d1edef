//! Application-Layer: Controller, Commands und Feature-Handler.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod handlers;

pub use command_log::CommandLog;
pub use controller::SceneController;
pub use events::SceneCommand;
