//! Headless harnesses for models and components.
//!
//! Neither harness needs a tokio runtime or a TTY. Immediate messages are
//! collected synchronously; async futures are dropped; next-frame requests
//! go into a [`FrameQueue`] that the test flushes with `advance_frame`.

use crate::command::{Action, Command, CommandInner, FrameRequest};
use crate::component::Component;
use crate::frame::{FrameId, FrameQueue};
use crate::model::Model;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};

/// Drives a [`Model`] through init/update/view.
///
/// ```rust,ignore
/// let mut prog = TestProgram::<Gallery>::new(());
/// prog.send(Msg::Key(key(KeyCode::Tab)));
/// prog.drain_messages();
/// assert!(prog.render_string(60, 20).contains("Select date"));
/// ```
pub struct TestProgram<M: Model> {
    model: M,
    pending: Vec<M::Message>,
    frames: FrameQueue<M::Message>,
    quit: bool,
}

impl<M: Model> TestProgram<M> {
    pub fn new(flags: M::Flags) -> Self {
        let (model, init_cmd) = M::init(flags);
        let mut program = Self {
            model,
            pending: Vec::new(),
            frames: FrameQueue::new(),
            quit: false,
        };
        program.absorb(init_cmd);
        program
    }

    /// Run one update. Resulting immediate messages are queued, not processed.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.absorb(cmd);
    }

    /// Process queued messages until no new ones appear.
    pub fn drain_messages(&mut self) {
        while !self.pending.is_empty() {
            let batch: Vec<_> = self.pending.drain(..).collect();
            for msg in batch {
                self.send(msg);
            }
        }
    }

    /// Simulate a draw: deliver every next-frame message, then drain.
    pub fn advance_frame(&mut self) {
        self.frames.begin_frame();
        while let Some(msg) = self.frames.pop_due() {
            self.send(msg);
        }
        self.drain_messages();
    }

    pub fn frame_pending(&self, id: FrameId) -> bool {
        self.frames.is_pending(id)
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn render(&self, width: u16, height: u16) -> Buffer {
        draw(width, height, |frame| self.model.view(frame))
    }

    pub fn render_string(&self, width: u16, height: u16) -> String {
        buffer_to_string(&self.render(width, height))
    }

    fn absorb(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None | CommandInner::Future(_) => {}
            CommandInner::Action(Action::Message(msg)) => self.pending.push(msg),
            CommandInner::Action(Action::Quit) => self.quit = true,
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.absorb(cmd);
                }
            }
            CommandInner::Frame(FrameRequest::Schedule(id, msg)) => self.frames.schedule(id, msg),
            CommandInner::Frame(FrameRequest::Cancel(id)) => {
                self.frames.cancel(id);
            }
        }
    }
}

/// Drives a single [`Component`] the way a parent would.
///
/// Messages the component returns are recorded as *emitted* rather than fed
/// back, since they are addressed to the parent. Next-frame messages are
/// addressed to the component itself and are delivered by
/// [`advance_frame`](ComponentHarness::advance_frame).
pub struct ComponentHarness<C: Component> {
    component: C,
    emitted: Vec<C::Message>,
    frames: FrameQueue<C::Message>,
    mounted: bool,
}

impl<C: Component> ComponentHarness<C> {
    pub fn new(component: C) -> Self {
        Self {
            component,
            emitted: Vec::new(),
            frames: FrameQueue::new(),
            mounted: true,
        }
    }

    /// Run one update and return the messages it emitted.
    pub fn send(&mut self, msg: C::Message) -> Vec<C::Message> {
        let cmd = self.component.update(msg);
        let start = self.emitted.len();
        self.absorb(cmd);
        self.emitted.split_off(start)
    }

    /// Deliver pending next-frame messages. Returns what they emitted.
    pub fn advance_frame(&mut self) -> Vec<C::Message> {
        let mut out = Vec::new();
        self.frames.begin_frame();
        while let Some(msg) = self.frames.pop_due() {
            out.extend(self.send(msg));
        }
        out
    }

    /// Unmount: run [`Component::unmount`] and stop rendering.
    pub fn unmount(&mut self) -> Vec<C::Message> {
        let cmd = self.component.unmount();
        self.mounted = false;
        let start = self.emitted.len();
        self.absorb(cmd);
        self.emitted.split_off(start)
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn frame_pending(&self, id: FrameId) -> bool {
        self.frames.is_pending(id)
    }

    pub fn frames_pending(&self) -> usize {
        self.frames.len()
    }

    pub fn component(&self) -> &C {
        &self.component
    }

    pub fn component_mut(&mut self) -> &mut C {
        &mut self.component
    }

    /// Render into the full `width` x `height` area. Unmounted components
    /// render nothing.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        draw(width, height, |frame| {
            if self.mounted {
                let area = frame.area();
                self.component.view(frame, area);
            }
        })
    }

    /// Render with the component confined to `area` inside a larger frame.
    pub fn render_in(&self, width: u16, height: u16, area: Rect) -> Buffer {
        draw(width, height, |frame| {
            if self.mounted {
                self.component.view(frame, area);
            }
        })
    }

    pub fn render_string(&self, width: u16, height: u16) -> String {
        buffer_to_string(&self.render(width, height))
    }

    fn absorb(&mut self, cmd: Command<C::Message>) {
        match cmd.inner {
            CommandInner::None | CommandInner::Future(_) | CommandInner::Action(Action::Quit) => {}
            CommandInner::Action(Action::Message(msg)) => self.emitted.push(msg),
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.absorb(cmd);
                }
            }
            CommandInner::Frame(FrameRequest::Schedule(id, msg)) => self.frames.schedule(id, msg),
            CommandInner::Frame(FrameRequest::Cancel(id)) => {
                self.frames.cancel(id);
            }
        }
    }
}

fn draw(width: u16, height: u16, view: impl FnOnce(&mut Frame)) -> Buffer {
    let mut terminal =
        Terminal::new(TestBackend::new(width, height)).expect("test backend is infallible");
    let mut view = Some(view);
    terminal
        .draw(|frame| {
            if let Some(view) = view.take() {
                view(frame);
            }
        })
        .expect("test backend is infallible");
    terminal.backend().buffer().clone()
}

/// Rows joined with `\n`, trailing spaces kept.
pub fn buffer_to_string(buf: &Buffer) -> String {
    let area = buf.area;
    let mut output = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            output.push_str(buf[(x, y)].symbol());
        }
        if y + 1 < area.bottom() {
            output.push('\n');
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    struct Counter {
        count: i64,
        frame: FrameId,
        close: FrameId,
    }

    #[derive(Debug, PartialEq)]
    enum CounterMsg {
        Increment,
        IncrementLater,
        CancelLater,
        /// Cancel the increment from inside the same frame.
        CancelNextFrame,
        Changed(i64),
    }

    impl Component for Counter {
        type Message = CounterMsg;

        fn update(&mut self, msg: CounterMsg) -> Command<CounterMsg> {
            match msg {
                CounterMsg::Increment => {
                    self.count += 1;
                    Command::message(CounterMsg::Changed(self.count))
                }
                CounterMsg::IncrementLater => Command::next_frame(self.frame, CounterMsg::Increment),
                CounterMsg::CancelLater => Command::cancel_frame(self.frame),
                CounterMsg::CancelNextFrame => Command::next_frame(self.close, CounterMsg::CancelLater),
                CounterMsg::Changed(_) => Command::none(),
            }
        }

        fn view(&self, frame: &mut Frame, area: Rect) {
            frame.render_widget(Paragraph::new(format!("Count: {}", self.count)), area);
        }

        fn unmount(&mut self) -> Command<CounterMsg> {
            Command::cancel_frame(self.frame)
        }
    }

    fn counter() -> ComponentHarness<Counter> {
        ComponentHarness::new(Counter {
            count: 0,
            frame: FrameId::next(),
            close: FrameId::next(),
        })
    }

    #[test]
    fn send_returns_emitted_messages() {
        let mut h = counter();
        assert_eq!(h.send(CounterMsg::Increment), vec![CounterMsg::Changed(1)]);
        assert_eq!(h.component().count, 1);
    }

    #[test]
    fn next_frame_waits_for_advance() {
        let mut h = counter();
        assert!(h.send(CounterMsg::IncrementLater).is_empty());
        assert_eq!(h.component().count, 0);
        assert_eq!(h.frames_pending(), 1);

        assert_eq!(h.advance_frame(), vec![CounterMsg::Changed(1)]);
        assert_eq!(h.component().count, 1);
        assert_eq!(h.frames_pending(), 0);
    }

    #[test]
    fn cancel_drops_pending_frame() {
        let mut h = counter();
        h.send(CounterMsg::IncrementLater);
        h.send(CounterMsg::CancelLater);
        assert!(h.advance_frame().is_empty());
        assert_eq!(h.component().count, 0);
    }

    #[test]
    fn cancel_delivered_in_same_frame_wins() {
        let mut h = counter();
        h.send(CounterMsg::CancelNextFrame);
        h.send(CounterMsg::IncrementLater);
        assert_eq!(h.frames_pending(), 2);

        assert!(h.advance_frame().is_empty());
        assert_eq!(h.component().count, 0);
        assert_eq!(h.frames_pending(), 0);
    }

    #[test]
    fn unmount_cancels_and_clears_output() {
        let mut h = counter();
        h.send(CounterMsg::IncrementLater);
        assert!(h.render_string(12, 1).contains("Count: 0"));

        h.unmount();
        assert_eq!(h.frames_pending(), 0);
        assert!(h.advance_frame().is_empty());
        assert_eq!(h.render_string(12, 1).trim(), "");
    }

    struct Echo {
        seen: Vec<i32>,
    }

    impl Model for Echo {
        type Message = i32;
        type Flags = ();

        fn init(_: ()) -> (Self, Command<i32>) {
            (Echo { seen: vec![] }, Command::message(1))
        }

        fn update(&mut self, msg: i32) -> Command<i32> {
            self.seen.push(msg);
            if msg < 3 {
                Command::message(msg + 1)
            } else {
                Command::quit()
            }
        }

        fn view(&self, frame: &mut Frame) {
            frame.render_widget(Paragraph::new(format!("{:?}", self.seen)), frame.area());
        }
    }

    #[test]
    fn test_program_chains_messages() {
        let mut prog = TestProgram::<Echo>::new(());
        prog.drain_messages();
        assert_eq!(prog.model().seen, vec![1, 2, 3]);
        assert!(prog.quit_requested());
        assert!(prog.render_string(20, 1).starts_with("[1, 2, 3]"));
    }
}
