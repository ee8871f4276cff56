use crate::frame::FrameId;
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;

/// A side effect returned from [`Component::update`](crate::Component::update)
/// or [`Model::update`](crate::Model::update).
///
/// Components report what happened by returning commands rather than calling
/// callbacks: a dropdown that committed a value returns
/// `Command::message(Message::Changed(value))`, and the parent maps that into
/// its own message type with [`Command::map`].
///
/// Besides immediate messages and async work, a command can defer a message to
/// the next paint frame ([`Command::next_frame`]) and cancel such a request
/// ([`Command::cancel_frame`]).
///
/// # Examples
///
/// ```rust,ignore
/// // Nothing to do:
/// let cmd = Command::none();
///
/// // Tell the parent the value changed:
/// let cmd = Command::message(Message::Changed("apple".into()));
///
/// // Scroll the selected option into view once the popover has been drawn:
/// let cmd = Command::next_frame(self.scroll_frame, Message::ScrollToSelected);
/// ```
pub struct Command<Msg: Send + 'static> {
    pub(crate) inner: CommandInner<Msg>,
}

pub(crate) enum CommandInner<Msg: Send + 'static> {
    None,
    Action(Action<Msg>),
    Future(BoxFuture<'static, Msg>),
    Batch(Vec<Command<Msg>>),
    Frame(FrameRequest<Msg>),
}

/// Actions the runtime handles synchronously.
pub enum Action<Msg> {
    /// Deliver a message immediately.
    Message(Msg),
    /// Stop the program.
    Quit,
}

/// A request against the runtime's [`FrameQueue`](crate::frame::FrameQueue).
pub enum FrameRequest<Msg> {
    /// Deliver `Msg` after the next draw. Replaces any pending request with the same id.
    Schedule(FrameId, Msg),
    /// Drop the pending request with this id, if any.
    Cancel(FrameId),
}

impl<Msg: Send + 'static> Command<Msg> {
    /// No-op command.
    pub fn none() -> Self {
        Command {
            inner: CommandInner::None,
        }
    }

    /// Send a message immediately.
    pub fn message(msg: Msg) -> Self {
        Command {
            inner: CommandInner::Action(Action::Message(msg)),
        }
    }

    /// Run an async future and map its output to a message.
    pub fn perform<F, T>(future: F, map: impl FnOnce(T) -> Msg + Send + 'static) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Command {
            inner: CommandInner::Future(Box::pin(async move { map(future.await) })),
        }
    }

    /// Quit the program.
    pub fn quit() -> Self {
        Command {
            inner: CommandInner::Action(Action::Quit),
        }
    }

    /// Run several commands. Empty batches collapse to [`Command::none`] and
    /// single-element batches to their only element.
    pub fn batch(cmds: impl IntoIterator<Item = Command<Msg>>) -> Self {
        let mut cmds: Vec<_> = cmds.into_iter().filter(|cmd| !cmd.is_none()).collect();
        match cmds.len() {
            0 => Command::none(),
            1 => cmds.pop().unwrap_or_else(Command::none),
            _ => Command {
                inner: CommandInner::Batch(cmds),
            },
        }
    }

    /// Deliver `msg` after the next frame has been drawn.
    pub fn next_frame(id: FrameId, msg: Msg) -> Self {
        Command {
            inner: CommandInner::Frame(FrameRequest::Schedule(id, msg)),
        }
    }

    /// Cancel a pending [`next_frame`](Command::next_frame) request.
    pub fn cancel_frame(id: FrameId) -> Self {
        Command {
            inner: CommandInner::Frame(FrameRequest::Cancel(id)),
        }
    }

    /// Transform the message type (for component composition).
    pub fn map<NewMsg: Send + 'static>(
        self,
        f: impl Fn(Msg) -> NewMsg + Send + Sync + 'static,
    ) -> Command<NewMsg> {
        self.map_with(Arc::new(f))
    }

    fn map_with<NewMsg: Send + 'static>(
        self,
        f: Arc<dyn Fn(Msg) -> NewMsg + Send + Sync>,
    ) -> Command<NewMsg> {
        match self.inner {
            CommandInner::None => Command::none(),
            CommandInner::Action(Action::Message(msg)) => Command::message(f(msg)),
            CommandInner::Action(Action::Quit) => Command::quit(),
            CommandInner::Future(fut) => Command {
                inner: CommandInner::Future(Box::pin(async move { f(fut.await) })),
            },
            CommandInner::Batch(cmds) => Command {
                inner: CommandInner::Batch(
                    cmds.into_iter()
                        .map(|cmd| cmd.map_with(f.clone()))
                        .collect(),
                ),
            },
            CommandInner::Frame(FrameRequest::Schedule(id, msg)) => {
                Command::next_frame(id, f(msg))
            }
            CommandInner::Frame(FrameRequest::Cancel(id)) => Command::cancel_frame(id),
        }
    }

    // --- Inspection methods (useful for testing) ---

    /// Returns `true` if this is a no-op command.
    pub fn is_none(&self) -> bool {
        matches!(self.inner, CommandInner::None)
    }

    /// If this command is a single immediate message, return it.
    pub fn into_message(self) -> Option<Msg> {
        match self.inner {
            CommandInner::Action(Action::Message(msg)) => Some(msg),
            _ => None,
        }
    }

    /// If this command is a batch, return the inner commands.
    pub fn into_batch(self) -> Option<Vec<Command<Msg>>> {
        match self.inner {
            CommandInner::Batch(cmds) => Some(cmds),
            _ => None,
        }
    }

    /// Every immediate message in this command, batches flattened in order.
    pub fn messages(self) -> Vec<Msg> {
        let mut out = Vec::new();
        self.collect_messages(&mut out);
        out
    }

    fn collect_messages(self, out: &mut Vec<Msg>) {
        match self.inner {
            CommandInner::Action(Action::Message(msg)) => out.push(msg),
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    cmd.collect_messages(out);
                }
            }
            _ => {}
        }
    }

    /// Whether this command (or any command in its batch) schedules `id`.
    pub fn schedules_frame(&self, id: FrameId) -> bool {
        match &self.inner {
            CommandInner::Frame(FrameRequest::Schedule(scheduled, _)) => *scheduled == id,
            CommandInner::Batch(cmds) => cmds.iter().any(|cmd| cmd.schedules_frame(id)),
            _ => false,
        }
    }

    /// Whether this command (or any command in its batch) cancels `id`.
    pub fn cancels_frame(&self, id: FrameId) -> bool {
        match &self.inner {
            CommandInner::Frame(FrameRequest::Cancel(cancelled)) => *cancelled == id,
            CommandInner::Batch(cmds) => cmds.iter().any(|cmd| cmd.cancels_frame(id)),
            _ => false,
        }
    }

    /// Whether this command quits the program.
    pub fn is_quit(&self) -> bool {
        matches!(self.inner, CommandInner::Action(Action::Quit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_none() {
        let cmd: Command<()> = Command::none();
        assert!(cmd.is_none());
    }

    #[test]
    fn message_round_trips_through_into_message() {
        let cmd: Command<i32> = Command::message(42);
        assert_eq!(cmd.into_message(), Some(42));
    }

    #[test]
    fn batch_drops_noops_and_unwraps_single() {
        let cmd: Command<i32> = Command::batch(vec![Command::none(), Command::message(1)]);
        assert_eq!(cmd.into_message(), Some(1));

        let cmd: Command<i32> = Command::batch(vec![Command::none(), Command::none()]);
        assert!(cmd.is_none());
    }

    #[test]
    fn batch_multiple_keeps_order() {
        let cmd: Command<i32> = Command::batch(vec![
            Command::message(1),
            Command::batch(vec![Command::message(2), Command::message(3)]),
        ]);
        assert_eq!(cmd.messages(), vec![1, 2, 3]);
    }

    #[test]
    fn map_message() {
        let cmd: Command<i32> = Command::message(42);
        let mapped: Command<String> = cmd.map(|n| n.to_string());
        assert_eq!(mapped.into_message().as_deref(), Some("42"));
    }

    #[test]
    fn map_quit_stays_quit() {
        let cmd: Command<i32> = Command::quit();
        assert!(cmd.map(|n| n.to_string()).is_quit());
    }

    #[test]
    fn map_preserves_frame_requests() {
        let id = FrameId::next();
        let cmd: Command<i32> = Command::batch(vec![
            Command::next_frame(id, 7),
            Command::message(1),
        ]);
        let mapped: Command<String> = cmd.map(|n| n.to_string());
        assert!(mapped.schedules_frame(id));

        let cancel: Command<i32> = Command::cancel_frame(id);
        let mapped: Command<String> = cancel.map(|n| n.to_string());
        assert!(mapped.cancels_frame(id));
        assert!(!mapped.schedules_frame(id));
    }

    #[test]
    fn frame_inspection_ignores_other_ids() {
        let a = FrameId::next();
        let b = FrameId::next();
        let cmd: Command<()> = Command::next_frame(a, ());
        assert!(cmd.schedules_frame(a));
        assert!(!cmd.schedules_frame(b));
    }
}
