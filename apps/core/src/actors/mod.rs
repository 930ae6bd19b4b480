//! Event dispatch: a single supervisor task owns the workflow state and
//! processes platform events sequentially.

pub mod messages;
pub mod supervisor;
pub mod traits;

pub use supervisor::SupervisorHandle;
pub use traits::ChatPlatform;
