//! **dalgona** -- a terminal design-system component library for [`ratatui`].
//!
//! This is the umbrella crate that re-exports the runtime and every
//! component from a single dependency:
//!
//! ```toml
//! [dependencies]
//! dalgona = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`dalgona_core`] are available at the crate root
//!   ([`Model`], [`Component`], [`Command`], [`Subscription`], [`Program`],
//!   [`run`], [`run_with`], etc.).
//! * The [`widgets`] module re-exports [`dalgona_widgets`].
//! * [`prelude`] brings the runtime traits and the most used components into
//!   scope.
//! * [`ratatui`], [`crossterm`], and [`tokio`] are re-exported so downstream
//!   crates do not need to depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use dalgona::prelude::*;
//! use ratatui::Frame;
//!
//! struct App {
//!     save: Button,
//! }
//!
//! enum Msg {
//!     Save(button::Message),
//! }
//!
//! impl Model for App {
//!     type Message = Msg;
//!     type Flags = ();
//!
//!     fn init(_: ()) -> (Self, Command<Msg>) {
//!         (App { save: Button::new("Save") }, Command::none())
//!     }
//!     fn update(&mut self, msg: Msg) -> Command<Msg> {
//!         match msg {
//!             Msg::Save(m) => self.save.update(m).map(Msg::Save),
//!         }
//!     }
//!     fn view(&self, frame: &mut Frame) {
//!         self.save.view(frame, frame.area());
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     dalgona::run::<App>(()).await.unwrap();
//! }
//! ```

pub use dalgona_core::*;
pub mod widgets {
    pub use dalgona_widgets::*;
}

pub mod prelude {
    pub use dalgona_core::{
        AccessNode, Accessible, Command, Component, Model, ProgramOptions, Role, Subscription,
    };
    pub use dalgona_widgets::badge::Badge;
    pub use dalgona_widgets::button::{self, Button};
    pub use dalgona_widgets::calendar::Calendar;
    pub use dalgona_widgets::date_picker::DatePicker;
    pub use dalgona_widgets::dropdown::Dropdown;
    pub use dalgona_widgets::input::Input;
    pub use dalgona_widgets::pagination::Pagination;
    pub use dalgona_widgets::range::DateRange;
    pub use dalgona_widgets::tabs::Tabs;
    pub use dalgona_widgets::variant::Look;
}

// Re-export dependencies for use in demos and downstream crates
pub use crossterm;
pub use ratatui;
pub use tokio;
