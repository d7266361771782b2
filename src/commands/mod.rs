/// Handlers for the subcommands vibe decorates. Capturing handlers return
/// result structs that main.rs renders as text or JSON; streaming handlers
/// return the child's exit code.
mod forward;
mod status;
mod sync;
mod version;
mod vibes;

pub use forward::*;
pub use status::*;
pub use sync::*;
pub use version::*;
pub use vibes::*;
