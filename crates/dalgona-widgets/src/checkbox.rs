//! Tri-state checkbox.

use crate::palette::{tone, Hue, Shade};
use crate::variant::Look;
use crossterm::event::{KeyCode, KeyEvent};
use dalgona_core::{AccessNode, Accessible, Checked, Command, Component, Role};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckState {
    #[default]
    Unchecked,
    Checked,
    Indeterminate,
}

impl CheckState {
    /// State after one toggle. Indeterminate resolves to checked.
    pub fn toggled(self) -> CheckState {
        match self {
            CheckState::Checked => CheckState::Unchecked,
            CheckState::Unchecked | CheckState::Indeterminate => CheckState::Checked,
        }
    }

    fn glyph(self) -> &'static str {
        match self {
            CheckState::Unchecked => "[ ]",
            CheckState::Checked => "[✓]",
            CheckState::Indeterminate => "[–]",
        }
    }
}

impl From<CheckState> for Checked {
    fn from(state: CheckState) -> Self {
        match state {
            CheckState::Unchecked => Checked::False,
            CheckState::Checked => Checked::True,
            CheckState::Indeterminate => Checked::Mixed,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    KeyPress(KeyEvent),
    Toggle,
    /// Emitted with the new checked flag.
    Changed(bool),
}

pub struct Checkbox {
    label: String,
    state: CheckState,
    error: bool,
    disabled: bool,
    focus: bool,
    look: Look,
}

impl Checkbox {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            state: CheckState::Unchecked,
            error: false,
            disabled: false,
            focus: false,
            look: Look::new(),
        }
    }

    pub fn with_state(mut self, state: CheckState) -> Self {
        self.state = state;
        self
    }

    pub fn with_error(mut self, error: bool) -> Self {
        self.error = error;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_look(mut self, look: Look) -> Self {
        self.look = look;
        self
    }

    pub fn state(&self) -> CheckState {
        self.state
    }

    pub fn set_state(&mut self, state: CheckState) {
        self.state = state;
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    fn toggle(&mut self) -> Command<Message> {
        if self.disabled {
            tracing::debug!(label = %self.label, "toggle ignored on disabled checkbox");
            return Command::none();
        }
        self.state = self.state.toggled();
        Command::message(Message::Changed(self.state == CheckState::Checked))
    }

    fn box_color(&self) -> ratatui::style::Color {
        if self.error {
            tone(Hue::Red, Shade::S500)
        } else if self.state == CheckState::Unchecked {
            tone(Hue::Gray, Shade::S400)
        } else {
            tone(Hue::Blue, Shade::S500)
        }
    }
}

impl Component for Checkbox {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus && key.code == KeyCode::Char(' ') => self.toggle(),
            Message::Toggle => self.toggle(),
            Message::KeyPress(_) | Message::Changed(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let mut look = self.look;
        if self.disabled {
            look = look.dimmed();
        }
        let base = look.style();
        let mut box_style = Style::default().fg(self.box_color()).patch(base);
        if self.focus {
            box_style = box_style.add_modifier(ratatui::style::Modifier::BOLD);
        }
        let line = Line::from(vec![
            Span::styled(self.state.glyph(), box_style),
            Span::styled(format!(" {}", self.label), base),
        ]);
        frame.render_widget(Paragraph::new(line), Rect { height: area.height.min(1), ..area });
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

impl Accessible for Checkbox {
    fn access_node(&self) -> AccessNode {
        AccessNode::new(Role::Checkbox)
            .label(&self.label)
            .checked(self.state)
            .disabled(self.disabled)
            .invalid(self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use dalgona_core::testing::ComponentHarness;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn toggle_cycles_between_checked_and_unchecked() {
        let mut h = ComponentHarness::new(Checkbox::new("Remember me"));
        assert!(matches!(h.send(Message::Toggle).as_slice(), [Message::Changed(true)]));
        assert!(matches!(h.send(Message::Toggle).as_slice(), [Message::Changed(false)]));
    }

    #[test]
    fn indeterminate_resolves_to_checked() {
        let mut c = Checkbox::new("All").with_state(CheckState::Indeterminate);
        assert_eq!(c.access_node().checked, Some(Checked::Mixed));
        let cmd = c.update(Message::Toggle);
        assert!(matches!(cmd.into_message(), Some(Message::Changed(true))));
        assert_eq!(c.state(), CheckState::Checked);
    }

    #[test]
    fn space_toggles_only_when_focused() {
        let mut c = Checkbox::new("x");
        assert!(c.update(Message::KeyPress(key(KeyCode::Char(' ')))).is_none());
        c.focus();
        assert!(!c.update(Message::KeyPress(key(KeyCode::Char(' ')))).is_none());
    }

    #[test]
    fn disabled_stays_put() {
        let mut c = Checkbox::new("x").with_disabled(true);
        assert!(c.update(Message::Toggle).is_none());
        assert_eq!(c.state(), CheckState::Unchecked);
    }

    #[test]
    fn error_marks_invalid_and_renders() {
        let c = Checkbox::new("Terms").with_error(true).with_state(CheckState::Checked);
        assert!(c.access_node().invalid);
        let out = ComponentHarness::new(c).render_string(12, 1);
        assert_eq!(out.trim_end(), "[✓] Terms");
    }
}
