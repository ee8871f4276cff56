use crate::command::{Action, Command, CommandInner, FrameRequest};
use crate::frame::FrameQueue;
use crate::logging::{init_file_logging, LogConfig, LogError};
use crate::model::Model;
use crate::subscription::SubscriptionManager;
use crossterm::{
    cursor, execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing_appender::non_blocking::WorkerGuard;

/// Errors that can occur while initializing or running a [`Program`].
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// Terminal setup, rendering, or teardown failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// The log file could not be installed.
    #[error("logging: {0}")]
    Logging(#[from] LogError),
}

/// Configuration options for a [`Program`].
///
/// Use struct update syntax to override only what you need:
///
/// ```rust,ignore
/// let opts = ProgramOptions {
///     log: Some(LogConfig::new("gallery.log")),
///     ..ProgramOptions::default()
/// };
/// ```
pub struct ProgramOptions {
    /// Target frames per second (default 60, clamped to 1..=120).
    pub fps: u32,
    /// Draw on the alternate screen (default true).
    pub alt_screen: bool,
    /// Terminal title.
    pub title: Option<String>,
    /// Restore the terminal before the default panic hook runs (default true).
    pub catch_panics: bool,
    /// Quit on Ctrl+C delivered as a signal (default true).
    pub handle_signals: bool,
    /// Install file logging before the terminal is taken over.
    pub log: Option<LogConfig>,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            fps: 60,
            alt_screen: true,
            title: None,
            catch_panics: true,
            handle_signals: true,
            log: None,
        }
    }
}

/// Wires a [`Model`] to a real terminal and drives the update/draw loop.
///
/// After each draw the runtime drains its [`FrameQueue`] and feeds the
/// deferred messages back through `update`, which is how
/// [`Command::next_frame`] requests land one frame after they were made.
pub struct Program<M: Model> {
    model: M,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    msg_tx: mpsc::UnboundedSender<M::Message>,
    msg_rx: mpsc::UnboundedReceiver<M::Message>,
    subscriptions: SubscriptionManager<M::Message>,
    frames: FrameQueue<M::Message>,
    options: ProgramOptions,
    needs_redraw: bool,
    should_quit: bool,
    _log_guard: Option<WorkerGuard>,
}

impl<M: Model> Program<M> {
    pub fn new(flags: M::Flags) -> Result<Self, ProgramError> {
        Self::with_options(flags, ProgramOptions::default())
    }

    pub fn with_options(flags: M::Flags, options: ProgramOptions) -> Result<Self, ProgramError> {
        let log_guard = options.log.as_ref().map(init_file_logging).transpose()?;

        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let (model, init_cmd) = M::init(flags);
        let terminal = init_terminal(&options)?;
        let subscriptions = SubscriptionManager::new(msg_tx.clone());

        let mut program = Self {
            model,
            terminal,
            msg_tx,
            msg_rx,
            subscriptions,
            frames: FrameQueue::new(),
            options,
            needs_redraw: true,
            should_quit: false,
            _log_guard: log_guard,
        };
        tracing::info!("program initialized");

        program.execute_command(init_cmd);
        let subs = program.model.subscriptions();
        program.subscriptions.reconcile(subs);

        Ok(program)
    }

    /// A sender for injecting messages from outside the loop.
    pub fn sender(&self) -> mpsc::UnboundedSender<M::Message> {
        self.msg_tx.clone()
    }

    /// Run until the model quits. Returns the final model.
    pub async fn run(mut self) -> Result<M, ProgramError> {
        let result = self.event_loop().await;
        tracing::info!("shutting down");
        self.subscriptions.shutdown();
        restore_terminal(self.options.alt_screen)?;
        result.map(|()| self.model)
    }

    async fn event_loop(&mut self) -> Result<(), ProgramError> {
        self.render()?;

        let fps = self.options.fps.clamp(1, 120);
        let mut frame_interval = tokio::time::interval(Duration::from_secs_f64(1.0 / fps as f64));
        frame_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let handle_signals = self.options.handle_signals;

        loop {
            tokio::select! {
                biased;

                _ = tokio::signal::ctrl_c(), if handle_signals => {
                    tracing::info!("received ctrl+c");
                    return Ok(());
                }

                Some(msg) = self.msg_rx.recv() => {
                    self.process_message(msg);
                    while let Ok(msg) = self.msg_rx.try_recv() {
                        self.process_message(msg);
                        if self.should_quit {
                            break;
                        }
                    }
                    if self.should_quit {
                        return Ok(());
                    }
                }

                _ = frame_interval.tick() => {
                    if self.needs_redraw {
                        self.render()?;
                        self.needs_redraw = false;
                        self.deliver_frames();
                        if self.should_quit {
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    /// Run the messages that were waiting for this draw. Each one is
    /// processed before the next is popped, so a cancel issued along the
    /// way still takes effect.
    fn deliver_frames(&mut self) {
        self.frames.begin_frame();
        while let Some(msg) = self.frames.pop_due() {
            self.process_message(msg);
            if self.should_quit {
                break;
            }
        }
    }

    fn process_message(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.execute_command(cmd);

        let subs = self.model.subscriptions();
        self.subscriptions.reconcile(subs);
        self.needs_redraw = true;
    }

    fn execute_command(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Action(Action::Message(msg)) => {
                let _ = self.msg_tx.send(msg);
            }
            CommandInner::Action(Action::Quit) => {
                self.should_quit = true;
            }
            CommandInner::Future(fut) => {
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let _ = tx.send(fut.await);
                });
            }
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.execute_command(cmd);
                }
            }
            CommandInner::Frame(FrameRequest::Schedule(id, msg)) => {
                self.frames.schedule(id, msg);
                // a request only fires after a draw, so make sure one happens
                self.needs_redraw = true;
            }
            CommandInner::Frame(FrameRequest::Cancel(id)) => {
                self.frames.cancel(id);
            }
        }
    }

    fn render(&mut self) -> Result<(), ProgramError> {
        self.terminal.draw(|frame| self.model.view(frame))?;
        Ok(())
    }
}

fn init_terminal(options: &ProgramOptions) -> Result<Terminal<CrosstermBackend<Stdout>>, ProgramError> {
    if options.catch_panics {
        use std::sync::Once;
        static HOOK_INSTALLED: Once = Once::new();
        let alt_screen = options.alt_screen;
        HOOK_INSTALLED.call_once(|| {
            let original_hook = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                let _ = restore_terminal(alt_screen);
                original_hook(info);
            }));
        });
    }

    enable_raw_mode()?;
    let mut out = stdout();
    if options.alt_screen {
        execute!(out, EnterAlternateScreen)?;
    }
    if let Some(ref title) = options.title {
        execute!(out, SetTitle(title))?;
    }
    execute!(out, cursor::Hide)?;

    Ok(Terminal::new(CrosstermBackend::new(out))?)
}

/// Best-effort teardown: every step runs even if an earlier one failed.
fn restore_terminal(alt_screen: bool) -> Result<(), io::Error> {
    let raw = disable_raw_mode();
    let mut out = stdout();
    execute!(out, cursor::Show).ok();
    if alt_screen {
        execute!(out, LeaveAlternateScreen).ok();
    }
    raw
}
