//! Single choice among a vertical list of radio items.

use crate::palette::{tone, Hue, Shade};
use crate::selection::SelectionState;
use crate::variant::{resolve, Look, Variant};
use crossterm::event::{KeyCode, KeyEvent};
use dalgona_core::{AccessNode, Accessible, Command, Component, Role};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

#[derive(Debug, Clone)]
pub struct RadioOption {
    pub value: String,
    pub label: String,
    pub disabled: bool,
}

impl RadioOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// `pad_x` is the gap between indicator and label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RadioSize {
    #[default]
    Md,
    Lg,
    Xl,
}

impl Variant for RadioSize {
    fn look(self) -> Look {
        match self {
            RadioSize::Md => Look::new().pad_x(1),
            RadioSize::Lg => Look::new().pad_x(2),
            RadioSize::Xl => Look::new().pad_x(2).add(Modifier::BOLD),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RadioVariant {
    #[default]
    Default,
    Error,
}

impl Variant for RadioVariant {
    /// `border` colors the indicator.
    fn look(self) -> Look {
        let look = Look::new().fg(tone(Hue::Gray, Shade::S900));
        match self {
            RadioVariant::Default => look.border(tone(Hue::Blue, Shade::S500)),
            RadioVariant::Error => look.border(tone(Hue::Red, Shade::S500)),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    KeyPress(KeyEvent),
    /// Select the option with this value.
    Pick(String),
    /// Emitted with the newly selected value.
    Changed(String),
}

pub struct RadioGroup {
    options: Vec<RadioOption>,
    value: Option<String>,
    size: RadioSize,
    variant: RadioVariant,
    error: bool,
    disabled: bool,
    selection: SelectionState,
    focus: bool,
    look: Look,
}

impl RadioGroup {
    pub fn new(options: Vec<RadioOption>) -> Self {
        let mut selection = SelectionState::new(options.len(), options.len());
        selection.set_enabled(options.iter().map(|o| !o.disabled).collect());
        Self {
            options,
            value: None,
            size: RadioSize::default(),
            variant: RadioVariant::default(),
            error: false,
            disabled: false,
            selection,
            focus: false,
            look: Look::new(),
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(Some(value.into()));
        self
    }

    pub fn with_size(mut self, size: RadioSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_variant(mut self, variant: RadioVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Forces the error variant.
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

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Values outside the option set clear the selection.
    pub fn set_value(&mut self, value: Option<String>) {
        match value {
            Some(v) => match self.options.iter().position(|o| o.value == v) {
                Some(index) => {
                    self.selection.select(index);
                    self.value = Some(v);
                }
                None => {
                    tracing::warn!(value = %v, "radio value is not among the options");
                    self.value = None;
                }
            },
            None => self.value = None,
        }
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    pub fn resolved_look(&self) -> Look {
        let variant = if self.error {
            RadioVariant::Error
        } else {
            self.variant
        };
        let look = resolve([variant.look(), self.size.look(), self.look]);
        if self.disabled {
            look.dimmed()
        } else {
            look
        }
    }

    fn choose(&mut self, index: usize) -> Command<Message> {
        if self.disabled {
            tracing::debug!("radio group is disabled");
            return Command::none();
        }
        let Some(option) = self.options.get(index) else {
            return Command::none();
        };
        if option.disabled {
            tracing::debug!(value = %option.value, "disabled radio item");
            return Command::none();
        }
        if self.value.as_deref() == Some(option.value.as_str()) {
            return Command::none();
        }
        let value = option.value.clone();
        self.selection.select(index);
        self.value = Some(value.clone());
        Command::message(Message::Changed(value))
    }
}

impl Component for RadioGroup {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus && !self.disabled => match key.code {
                KeyCode::Down | KeyCode::Right => {
                    self.selection.move_down();
                    self.choose(self.selection.cursor())
                }
                KeyCode::Up | KeyCode::Left => {
                    self.selection.move_up();
                    self.choose(self.selection.cursor())
                }
                KeyCode::Char(' ') => self.choose(self.selection.cursor()),
                _ => Command::none(),
            },
            Message::Pick(value) => match self.options.iter().position(|o| o.value == value) {
                Some(index) => self.choose(index),
                None => {
                    tracing::warn!(value = %value, "picked radio value is not among the options");
                    Command::none()
                }
            },
            Message::KeyPress(_) | Message::Changed(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let look = self.resolved_look();
        let gap = " ".repeat(look.pad_x.unwrap_or(1) as usize);
        let lines: Vec<Line> = self
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let checked = self.value.as_deref() == Some(option.value.as_str());
                let mut label_style = look.style();
                if option.disabled {
                    label_style = label_style.add_modifier(Modifier::DIM);
                }
                let ring = if checked {
                    look.border.unwrap_or(Color::Reset)
                } else {
                    tone(Hue::Gray, Shade::S400)
                };
                let mut dot = Style::default().fg(ring).add_modifier(look.modifiers);
                if self.focus && i == self.selection.cursor() {
                    dot = dot.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                }
                Line::from(vec![
                    Span::styled(if checked { "◉" } else { "○" }, dot),
                    Span::raw(gap.clone()),
                    Span::styled(option.label.clone(), label_style),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

impl Accessible for RadioGroup {
    fn access_node(&self) -> AccessNode {
        AccessNode::new(Role::RadioGroup)
            .disabled(self.disabled)
            .invalid(self.error || self.variant == RadioVariant::Error)
            .children(self.options.iter().map(|o| {
                AccessNode::new(Role::Radio)
                    .label(&o.label)
                    .checked(self.value.as_deref() == Some(o.value.as_str()))
                    .disabled(self.disabled || o.disabled)
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use dalgona_core::testing::ComponentHarness;
    use dalgona_core::Checked;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn plans() -> RadioGroup {
        RadioGroup::new(vec![
            RadioOption::new("free", "Free"),
            RadioOption::new("team", "Team").disabled(true),
            RadioOption::new("pro", "Pro"),
        ])
    }

    #[test]
    fn pick_emits_once() {
        let mut h = ComponentHarness::new(plans());
        let out = h.send(Message::Pick("pro".into()));
        assert!(matches!(out.as_slice(), [Message::Changed(v)] if v == "pro"));
        // Re-picking the selected value is not a change.
        assert!(h.send(Message::Pick("pro".into())).is_empty());
    }

    #[test]
    fn arrows_wrap_and_skip_disabled() {
        let mut g = plans().with_value("free");
        g.focus();
        let cmd = g.update(Message::KeyPress(key(KeyCode::Down)));
        assert!(matches!(cmd.into_message(), Some(Message::Changed(v)) if v == "pro"));
        let cmd = g.update(Message::KeyPress(key(KeyCode::Down)));
        assert!(matches!(cmd.into_message(), Some(Message::Changed(v)) if v == "free"));
    }

    #[test]
    fn disabled_option_and_group_are_inert() {
        let mut g = plans();
        assert!(g.update(Message::Pick("team".into())).is_none());
        let mut g = plans().with_disabled(true);
        assert!(g.update(Message::Pick("pro".into())).is_none());
        assert_eq!(g.value(), None);
    }

    #[test]
    fn unknown_value_clears() {
        let mut g = plans().with_value("free");
        g.set_value(Some("enterprise".into()));
        assert_eq!(g.value(), None);
    }

    #[test]
    fn error_flag_forces_error_variant() {
        let look = plans().with_error(true).resolved_look();
        assert_eq!(look.border, Some(tone(Hue::Red, Shade::S500)));
        for size in [RadioSize::Md, RadioSize::Lg, RadioSize::Xl] {
            assert_eq!(plans().with_size(size).resolved_look().pad_x, size.look().pad_x);
        }
    }

    #[test]
    fn access_tree_and_render() {
        let g = plans().with_value("pro");
        let node = g.access_node();
        assert_eq!(node.role, Role::RadioGroup);
        assert_eq!(node.find_labeled("Pro").and_then(|n| n.checked), Some(Checked::True));
        assert_eq!(node.find_labeled("Team").map(|n| n.disabled), Some(true));
        let out = ComponentHarness::new(g).render_string(10, 3);
        let rows: Vec<&str> = out.lines().collect();
        assert_eq!(rows[0].trim_end(), "○ Free");
        assert_eq!(rows[2].trim_end(), "◉ Pro");
    }
}
