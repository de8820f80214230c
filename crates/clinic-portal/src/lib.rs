/// Clinic portal view components.
///
/// Loaders fetch a collection and re-render a container. Handlers submit a
/// form and report the outcome through the feedback reporter. Every
/// component gets its backend handle and its element handles at
/// construction; nothing is looked up globally.

pub mod backend;
pub mod config;
pub mod feedback;
pub mod forms;
pub mod handlers;
pub mod loader;
pub mod memory;
pub mod portal;
pub mod refresh;
pub mod surface;
pub mod view;

pub use backend::BackendHandle;
pub use config::{BackendMode, Fallback, PortalConfig};
pub use feedback::{FeedbackReporter, MessageKind};
pub use handlers::Outcome;
pub use portal::{Portal, PortalView};
pub use refresh::RefreshHandle;
