use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::{layout::Rect, Frame};

/// A reusable building block that renders into a given [`Rect`].
///
/// Every dalgona widget implements `Component`. Properties are set through
/// builder methods at construction time; interaction arrives as messages
/// (`KeyPress` for keyboard input, semantic variants such as `Pick(value)` for
/// the equivalent of a click on a specific element); changes are reported back
/// by returning a [`Command`] carrying an emitted message.
///
/// # Composition pattern
///
/// Wrap the child's message type in a parent variant and lift its commands
/// with [`Command::map`]:
///
/// ```rust,ignore
/// use dalgona_core::{Command, Component, Model};
/// use dalgona_widgets::toggle::{self, Toggle};
///
/// struct Settings { notifications: Toggle }
///
/// enum Msg { Notifications(toggle::Message) }
///
/// impl Model for Settings {
///     type Message = Msg;
///     type Flags = ();
///
///     fn init(_: ()) -> (Self, Command<Msg>) {
///         (Settings { notifications: Toggle::new() }, Command::none())
///     }
///
///     fn update(&mut self, msg: Msg) -> Command<Msg> {
///         match msg {
///             Msg::Notifications(toggle::Message::Changed(on)) => {
///                 // persist the preference
///                 Command::none()
///             }
///             Msg::Notifications(m) => self.notifications.update(m).map(Msg::Notifications),
///         }
///     }
///
///     fn view(&self, frame: &mut ratatui::Frame) {
///         self.notifications.view(frame, frame.area());
///     }
/// }
/// ```
pub trait Component: Send + 'static {
    /// The component's message type: input events plus the change
    /// notifications it emits.
    type Message: Send + 'static;

    /// Process a message, mutate local state, and return a [`Command`].
    ///
    /// Emitted change messages come back inside the command; the component
    /// itself treats them as no-ops if they are routed back to it.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into `area`. Popovers may draw outside `area` but stay inside
    /// the frame.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Declare active subscriptions for this component.
    ///
    /// The default implementation returns an empty list.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }

    /// Whether this component currently has keyboard focus.
    fn focused(&self) -> bool {
        false
    }

    /// Called by the parent right before it drops the component.
    ///
    /// Components that schedule next-frame work return
    /// [`Command::cancel_frame`] here so nothing fires after they are gone.
    fn unmount(&mut self) -> Command<Self::Message> {
        Command::none()
    }
}
