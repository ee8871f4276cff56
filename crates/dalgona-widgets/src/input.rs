//! Single-line text field with optional adornments.

use crate::palette::{tone, Hue, Shade, WHITE};
use crate::text;
use crate::text_edit::{EditOutcome, TextEditState};
use crate::variant::{resolve, Edge, FieldStatus, Look, Variant};
use crossterm::event::{KeyCode, KeyEvent};
use dalgona_core::{AccessNode, Accessible, Command, Component, Role};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputSize {
    Sm,
    Base,
    #[default]
    Md,
    Lg,
}

impl Variant for InputSize {
    fn look(self) -> Look {
        match self {
            InputSize::Sm => Look::new().height(1).pad_x(0),
            InputSize::Base => Look::new().height(1).pad_x(1),
            InputSize::Md => Look::new().height(3).pad_x(1).edge(Edge::Rounded),
            InputSize::Lg => Look::new().height(3).pad_x(2).edge(Edge::Rounded),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputVariant {
    #[default]
    Default,
    Error,
    Success,
}

impl Variant for InputVariant {
    fn look(self) -> Look {
        let base = Look::new().fg(tone(Hue::Gray, Shade::S900)).bg(WHITE);
        match self {
            InputVariant::Default => base.border(tone(Hue::Gray, Shade::S300)),
            InputVariant::Error => base.border(tone(Hue::Red, Shade::S500)),
            InputVariant::Success => base.border(tone(Hue::Green, Shade::S500)),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    KeyPress(KeyEvent),
    Paste(String),
    /// Emitted with the full text after every edit.
    Changed(String),
    /// Emitted on Enter.
    Submitted(String),
}

pub struct Input {
    state: TextEditState,
    placeholder: String,
    size: InputSize,
    variant: InputVariant,
    error: bool,
    disabled: bool,
    left: Option<String>,
    right: Option<String>,
    label: Option<String>,
    focus: bool,
    look: Look,
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

impl Input {
    pub fn new() -> Self {
        Self {
            state: TextEditState::new(),
            placeholder: String::new(),
            size: InputSize::default(),
            variant: InputVariant::default(),
            error: false,
            disabled: false,
            left: None,
            right: None,
            label: None,
            focus: false,
            look: Look::new(),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.state.set_value(value);
        self
    }

    pub fn with_size(mut self, size: InputSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_variant(mut self, variant: InputVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Overrides the variant with [`InputVariant::Error`].
    pub fn with_error(mut self, error: bool) -> Self {
        self.error = error;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Adornment drawn before the text, e.g. an icon or a unit.
    pub fn with_left(mut self, left: impl Into<String>) -> Self {
        self.left = Some(left.into());
        self
    }

    pub fn with_right(mut self, right: impl Into<String>) -> Self {
        self.right = Some(right.into());
        self
    }

    pub fn with_max_len(mut self, max: usize) -> Self {
        self.state = self.state.with_max_len(max);
        self
    }

    /// Accessible name.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_look(mut self, look: Look) -> Self {
        self.look = look;
        self
    }

    pub fn value(&self) -> String {
        self.state.value()
    }

    pub fn set_value(&mut self, value: &str) {
        self.state.set_value(value);
    }

    pub fn set_error(&mut self, error: bool) {
        self.error = error;
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    pub fn resolved_look(&self) -> Look {
        let variant = if self.error {
            InputVariant::Error
        } else {
            self.variant
        };
        let mut look = resolve([variant.look(), self.size.look()]);
        if self.focus && !self.error {
            look.border = Some(tone(Hue::Blue, Shade::S500));
        }
        if self.disabled {
            look = look.merge(FieldStatus::Disabled.look());
        }
        look.merge(self.look)
    }
}

impl Component for Input {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(_) | Message::Paste(_) if self.disabled => {
                tracing::debug!("input is disabled");
                Command::none()
            }
            Message::KeyPress(key) if self.focus => match key.code {
                KeyCode::Enter => Command::message(Message::Submitted(self.state.value())),
                _ => match self.state.handle_key(key) {
                    EditOutcome::Changed => Command::message(Message::Changed(self.state.value())),
                    EditOutcome::Moved | EditOutcome::Ignored => Command::none(),
                },
            },
            Message::Paste(text) => {
                if self.state.insert_str(&text) {
                    Command::message(Message::Changed(self.state.value()))
                } else {
                    Command::none()
                }
            }
            Message::KeyPress(_) | Message::Changed(_) | Message::Submitted(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let look = self.resolved_look();
        let inner = look.paint(frame, look.fit(area));
        if inner.width == 0 || inner.height == 0 {
            return;
        }
        let muted = look.style().fg(tone(Hue::Gray, Shade::S500));

        let mut spans = Vec::new();
        let mut used = 0usize;
        if let Some(left) = &self.left {
            spans.push(Span::styled(format!("{left} "), muted));
            used += text::width(left) + 1;
        }
        let right_width = self.right.as_ref().map_or(0, |r| text::width(r) + 1);
        let field = (inner.width as usize).saturating_sub(used + right_width);

        let cursor_col = if self.state.is_empty() {
            let placeholder = text::truncate(&self.placeholder, field);
            let pad = field.saturating_sub(text::width(&placeholder));
            spans.push(Span::styled(
                placeholder,
                look.style().fg(tone(Hue::Gray, Shade::S400)),
            ));
            spans.push(Span::styled(" ".repeat(pad), look.style()));
            0
        } else {
            let (shown, col) = self.state.window(field);
            let pad = field.saturating_sub(text::width(&shown));
            spans.push(Span::styled(shown, look.style()));
            spans.push(Span::styled(" ".repeat(pad), look.style()));
            col
        };

        if let Some(right) = &self.right {
            spans.push(Span::styled(format!(" {right}"), muted));
        }
        let row = Rect { height: 1, ..inner };
        frame.render_widget(Paragraph::new(Line::from(spans)).style(Style::default()), row);

        if self.focus && !self.disabled {
            let x = row.x + (used + cursor_col).min(row.width.saturating_sub(1) as usize) as u16;
            frame.set_cursor_position((x, row.y));
        }
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

impl Accessible for Input {
    fn access_node(&self) -> AccessNode {
        let label = self.label.clone().unwrap_or_else(|| self.placeholder.clone());
        AccessNode::new(Role::TextBox)
            .label(label)
            .disabled(self.disabled)
            .invalid(self.error || self.variant == InputVariant::Error)
    }
}
