use crate::error::AppError;
use crate::models::{IncomingMessage, ReactionEvent};
use crate::workflow::{DepartureOutcome, MessageOutcome, ReactionOutcome};
use tokio::sync::oneshot;

/// Messages that can be sent to the `SupervisorActor`.
///
/// The supervisor handles them strictly one at a time, in arrival order.
#[derive(Debug)]
pub enum SupervisorMessage {
    /// A message was posted in a guild channel.
    MessageReceived {
        message: IncomingMessage,
        /// A channel to send the workflow outcome back.
        responder: oneshot::Sender<Result<MessageOutcome, AppError>>,
    },
    /// A reaction was added to a message.
    ReactionAdded {
        reaction: ReactionEvent,
        responder: oneshot::Sender<Result<ReactionOutcome, AppError>>,
    },
    /// A member left the guild.
    MemberRemoved {
        user_id: u64,
        responder: oneshot::Sender<Result<DepartureOutcome, AppError>>,
    },
    /// A command to stop the supervisor loop.
    Shutdown,
}
