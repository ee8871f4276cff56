//! Component runtime for the **dalgona** design system.
//!
//! `dalgona-core` provides the traits and plumbing every dalgona component is
//! built on. Components follow the [Elm Architecture]: state changes only in
//! `update`, rendering is a pure `view`, and effects (including "tell the
//! parent the value changed") are returned as [`Command`]s.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Component`] | Reusable piece of UI that renders into a [`ratatui::layout::Rect`] |
//! | [`Model`] | Top-level application owning components |
//! | [`Command`] | Effect returned from `update`: messages, async work, next-frame requests |
//! | [`FrameQueue`] | Messages deferred until after the next draw |
//! | [`AccessNode`] | Role, name and states of a component for assistive technology |
//! | [`Subscription`] | Terminal input and timers |
//! | [`Program`] | Drives a [`Model`] on a real terminal |
//! | [`ComponentHarness`](testing::ComponentHarness) | Headless driver for component tests |
//!
//! [Elm Architecture]: https://guide.elm-lang.org/architecture/

pub mod a11y;
pub mod command;
pub mod component;
pub mod frame;
pub mod logging;
pub mod model;
pub mod runtime;
pub mod subscription;
pub mod testing;

pub use a11y::{AccessNode, Accessible, Checked, Current, Role};
pub use command::Command;
pub use component::Component;
pub use frame::{FrameId, FrameQueue};
pub use logging::{init_file_logging, LogConfig, LogError};
pub use model::Model;
pub use runtime::{Program, ProgramError, ProgramOptions};
pub use subscription::{terminal_events, Subscription, SubscriptionId};

/// Run a dalgona application with default options.
pub async fn run<M: Model>(flags: M::Flags) -> Result<M, ProgramError> {
    Program::<M>::new(flags)?.run().await
}

/// Run with custom options.
pub async fn run_with<M: Model>(
    flags: M::Flags,
    options: ProgramOptions,
) -> Result<M, ProgramError> {
    Program::<M>::with_options(flags, options)?.run().await
}
