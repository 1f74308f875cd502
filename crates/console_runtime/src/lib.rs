pub mod components;
pub mod host;
pub mod model;
pub mod registry;
pub mod runtime_context;

pub use components::ConsoleSurface;
pub use host::ConsoleHostContext;
pub use model::*;
pub use registry::{reduce_console, ConsoleAction, RegistryError, RuntimeEffect};
pub use runtime_context::{use_console_runtime, ConsoleProvider, ConsoleRuntimeContext};
