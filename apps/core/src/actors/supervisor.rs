use crate::actors::messages::SupervisorMessage;
use crate::actors::traits::ChatPlatform;
use crate::error::AppError;
use crate::models::{IncomingMessage, ReactionEvent};
use crate::workflow::{ChannelWorkflow, DepartureOutcome, MessageOutcome, ReactionOutcome};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{timeout, Duration};
use tracing::{error, info, instrument};

/// Maximum time a caller waits for the supervisor's reply.
///
/// The handler itself is never cancelled; the caller just stops waiting.
const REPLY_TIMEOUT: Duration = Duration::from_secs(30);

/// A handle to the `SupervisorActor`.
///
/// This is the entry point for every platform event. The actor owns the
/// [`ChannelWorkflow`] and handles events strictly one after another, so the
/// workflow state needs no locking.
#[derive(Clone)]
pub struct SupervisorHandle {
    sender: mpsc::Sender<SupervisorMessage>,
}

impl SupervisorHandle {
    /// Spawns the actor around `workflow` and returns a handle to it plus the
    /// task running the loop.
    pub fn spawn<P: ChatPlatform>(workflow: ChannelWorkflow<P>) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::channel(32);
        let runner = SupervisorRunner { receiver, workflow };
        let task = tokio::spawn(async move { runner.run().await });
        (Self { sender }, task)
    }

    /// Delivers an observed message.
    #[instrument(skip(self, message))]
    pub async fn message_received(&self, message: IncomingMessage) -> Result<MessageOutcome, AppError> {
        let (send, recv) = oneshot::channel();
        self.send(SupervisorMessage::MessageReceived {
            message,
            responder: send,
        })
        .await?;
        Self::reply(recv).await
    }

    /// Delivers a reaction added to any message.
    #[instrument(skip(self, reaction))]
    pub async fn reaction_added(&self, reaction: ReactionEvent) -> Result<ReactionOutcome, AppError> {
        let (send, recv) = oneshot::channel();
        self.send(SupervisorMessage::ReactionAdded {
            reaction,
            responder: send,
        })
        .await?;
        Self::reply(recv).await
    }

    /// Delivers a member departure.
    #[instrument(skip(self))]
    pub async fn member_removed(&self, user_id: u64) -> Result<DepartureOutcome, AppError> {
        let (send, recv) = oneshot::channel();
        self.send(SupervisorMessage::MemberRemoved {
            user_id,
            responder: send,
        })
        .await?;
        Self::reply(recv).await
    }

    /// Asks the loop to stop once the events already queued are handled.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        self.send(SupervisorMessage::Shutdown).await
    }

    async fn send(&self, msg: SupervisorMessage) -> Result<(), AppError> {
        self.sender
            .send(msg)
            .await
            .map_err(|e| AppError::Actor(e.to_string()))
    }

    async fn reply<T>(recv: oneshot::Receiver<Result<T, AppError>>) -> Result<T, AppError> {
        timeout(REPLY_TIMEOUT, recv)
            .await?
            .map_err(|e| AppError::Actor(e.to_string()))?
    }
}

// --- Actor Runner ---
struct SupervisorRunner<P: ChatPlatform> {
    receiver: mpsc::Receiver<SupervisorMessage>,
    workflow: ChannelWorkflow<P>,
}

impl<P: ChatPlatform> SupervisorRunner<P> {
    async fn run(mut self) {
        info!("Supervisor started");
        while let Some(msg) = self.receiver.recv().await {
            if matches!(msg, SupervisorMessage::Shutdown) {
                info!("Supervisor shutting down...");
                break;
            }
            self.handle_message(msg).await;
        }
        info!("Supervisor stopped");
    }

    /// Errors are reported to the caller and logged; they never end the loop.
    async fn handle_message(&mut self, msg: SupervisorMessage) {
        match msg {
            SupervisorMessage::MessageReceived { message, responder } => {
                let result = self.workflow.handle_message(&message).await;
                if let Err(e) = &result {
                    error!("Error processing message: {:?}", e);
                }
                let _ = responder.send(result);
            }
            SupervisorMessage::ReactionAdded { reaction, responder } => {
                let result = self.workflow.handle_reaction(&reaction).await;
                if let Err(e) = &result {
                    error!("Error processing reaction: {:?}", e);
                }
                let _ = responder.send(result);
            }
            SupervisorMessage::MemberRemoved { user_id, responder } => {
                let result = self.workflow.handle_member_removed(user_id);
                if let Err(e) = &result {
                    error!("Error deleting user data: {:?}", e);
                }
                let _ = responder.send(result);
            }
            SupervisorMessage::Shutdown => {}
        }
    }
}
