use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::Frame;

/// The top-level application trait driven by [`Program`](crate::Program).
///
/// A host application implements `Model`, owns its components, routes
/// terminal input to whichever one has focus, and reacts to the change
/// messages they emit:
///
/// 1. [`init`](Model::init) builds the initial state.
/// 2. [`view`](Model::view) draws it.
/// 3. Input arrives through [`Subscription`]s as messages.
/// 4. [`update`](Model::update) handles each message and may return a
///    [`Command`].
/// 5. Deferred frame messages are delivered after the draw that follows.
///
/// # Example
///
/// ```rust,ignore
/// use dalgona_core::{terminal_events, Command, Model, Subscription};
/// use crossterm::event::Event;
///
/// struct App { pressed: u32 }
///
/// enum Msg { Key(crossterm::event::KeyEvent) }
///
/// impl Model for App {
///     type Message = Msg;
///     type Flags = ();
///
///     fn init(_: ()) -> (Self, Command<Msg>) {
///         (App { pressed: 0 }, Command::none())
///     }
///
///     fn update(&mut self, Msg::Key(_): Msg) -> Command<Msg> {
///         self.pressed += 1;
///         Command::none()
///     }
///
///     fn view(&self, frame: &mut ratatui::Frame) {}
///
///     fn subscriptions(&self) -> Vec<Subscription<Msg>> {
///         vec![terminal_events(|event| match event {
///             Event::Key(key) => Some(Msg::Key(key)),
///             _ => None,
///         })]
///     }
/// }
/// ```
pub trait Model: Sized + Send + 'static {
    /// The application's message type.
    type Message: Send + 'static;

    /// Startup data passed to [`Model::init`]. Use `()` when none is needed.
    type Flags: Send + 'static;

    /// Create the initial state and an optional startup command.
    fn init(flags: Self::Flags) -> (Self, Command<Self::Message>);

    /// Handle a message and return a command for side effects.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Draw the current state. Should only read `self`.
    fn view(&self, frame: &mut Frame);

    /// Subscriptions that should be active for the current state.
    ///
    /// Called after every update; the runtime starts new ones and stops the
    /// ones that disappeared.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }
}
