//! On/off switch.

use crate::palette::{tone, Hue, Shade, WHITE};
use crate::variant::Look;
use crossterm::event::{KeyCode, KeyEvent};
use dalgona_core::{AccessNode, Accessible, Command, Component, Role};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Track color when on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToggleColor {
    #[default]
    Blue,
    Green,
    Black,
}

impl ToggleColor {
    fn track(self) -> Color {
        match self {
            ToggleColor::Blue => tone(Hue::Blue, Shade::S500),
            ToggleColor::Green => tone(Hue::Green, Shade::S500),
            ToggleColor::Black => tone(Hue::Gray, Shade::S900),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToggleSize {
    #[default]
    S20,
    S24,
}

impl ToggleSize {
    /// Track width in columns, knob included.
    pub fn track_width(self) -> u16 {
        match self {
            ToggleSize::S20 => 4,
            ToggleSize::S24 => 5,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    KeyPress(KeyEvent),
    Toggle,
    Changed(bool),
}

pub struct Toggle {
    checked: bool,
    color: ToggleColor,
    size: ToggleSize,
    disabled: bool,
    label: Option<String>,
    focus: bool,
    look: Look,
}

impl Toggle {
    pub fn new(checked: bool) -> Self {
        Self {
            checked,
            color: ToggleColor::default(),
            size: ToggleSize::default(),
            disabled: false,
            label: None,
            focus: false,
            look: Look::new(),
        }
    }

    pub fn with_color(mut self, color: ToggleColor) -> Self {
        self.color = color;
        self
    }

    pub fn with_size(mut self, size: ToggleSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_look(mut self, look: Look) -> Self {
        self.look = look;
        self
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    fn toggle(&mut self) -> Command<Message> {
        if self.disabled {
            tracing::debug!("toggle ignored on disabled switch");
            return Command::none();
        }
        self.checked = !self.checked;
        Command::message(Message::Changed(self.checked))
    }

    fn track(&self) -> Vec<Span<'static>> {
        let bg = if self.checked {
            self.color.track()
        } else {
            tone(Hue::Gray, Shade::S200)
        };
        let mut track = Style::default().bg(bg).patch(self.look.style());
        if self.disabled {
            track = track.add_modifier(ratatui::style::Modifier::DIM);
        }
        let knob = track.fg(WHITE);
        let gap = " ".repeat(self.size.track_width() as usize - 1);
        if self.checked {
            vec![Span::styled(gap, track), Span::styled("●", knob)]
        } else {
            vec![Span::styled("●", knob), Span::styled(gap, track)]
        }
    }
}

impl Component for Toggle {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key)
                if self.focus && matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter) =>
            {
                self.toggle()
            }
            Message::Toggle => self.toggle(),
            Message::KeyPress(_) | Message::Changed(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let mut spans = self.track();
        if let Some(label) = &self.label {
            spans.push(Span::raw(format!(" {label}")));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), Rect { height: area.height.min(1), ..area });
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

impl Accessible for Toggle {
    fn access_node(&self) -> AccessNode {
        let node = AccessNode::new(Role::Switch)
            .checked(self.checked)
            .disabled(self.disabled);
        match &self.label {
            Some(label) => node.label(label),
            None => node,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dalgona_core::testing::ComponentHarness;
    use dalgona_core::Checked;

    #[test]
    fn toggle_flips_and_emits() {
        let mut h = ComponentHarness::new(Toggle::new(false));
        assert!(matches!(h.send(Message::Toggle).as_slice(), [Message::Changed(true)]));
        assert!(h.component().is_checked());
        assert_eq!(h.component().access_node().checked, Some(Checked::True));
    }

    #[test]
    fn disabled_is_inert() {
        let mut t = Toggle::new(true).with_disabled(true);
        assert!(t.update(Message::Toggle).is_none());
        assert!(t.is_checked());
    }

    #[test]
    fn knob_moves_with_state() {
        let off = ComponentHarness::new(Toggle::new(false)).render_string(4, 1);
        let on = ComponentHarness::new(Toggle::new(true)).render_string(4, 1);
        assert_eq!(off, "●   ");
        assert_eq!(on, "   ●");
    }

    #[test]
    fn size_sets_track_width() {
        let out = ComponentHarness::new(Toggle::new(true).with_size(ToggleSize::S24)).render_string(6, 1);
        assert_eq!(out, "    ● ");
    }

    #[test]
    fn color_sets_checked_track() {
        let buf = ComponentHarness::new(Toggle::new(true).with_color(ToggleColor::Green)).render(4, 1);
        assert_eq!(buf[(0, 0)].bg, tone(Hue::Green, Shade::S500));
    }
}
