//! A row of joined buttons sharing one border.

use crate::palette::{tone, Hue, Shade, WHITE};
use crate::selection::SelectionState;
use crate::text;
use crate::variant::{Edge, Look};
use crossterm::event::{KeyCode, KeyEvent};
use dalgona_core::{AccessNode, Accessible, Command, Component, Role};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// How an item combines its icon and label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemKind {
    #[default]
    Default,
    /// Icon only; the label is kept for accessibility.
    Icon,
    LeadingIcon,
    TrailingIcon,
}

#[derive(Debug, Clone)]
pub struct GroupItem {
    pub label: String,
    pub icon: Option<String>,
    pub kind: ItemKind,
    pub disabled: bool,
}

impl GroupItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon: None,
            kind: ItemKind::Default,
            disabled: false,
        }
    }

    pub fn icon(mut self, icon: impl Into<String>, kind: ItemKind) -> Self {
        self.icon = Some(icon.into());
        self.kind = kind;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    fn content(&self) -> String {
        let icon = self.icon.as_deref().unwrap_or("");
        match self.kind {
            ItemKind::Default => self.label.clone(),
            ItemKind::Icon if !icon.is_empty() => icon.to_string(),
            ItemKind::Icon => self.label.clone(),
            ItemKind::LeadingIcon => format!("{icon} {}", self.label).trim().to_string(),
            ItemKind::TrailingIcon => format!("{} {icon}", self.label).trim().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    KeyPress(KeyEvent),
    /// Pointer activation of item `index`.
    Press(usize),
    /// Emitted with the index of an activated, enabled item.
    Pressed(usize),
}

pub struct GroupButton {
    items: Vec<GroupItem>,
    selection: SelectionState,
    focus: bool,
    look: Look,
}

impl GroupButton {
    pub fn new(items: Vec<GroupItem>) -> Self {
        let mut selection = SelectionState::new(items.len(), items.len());
        selection.set_enabled(items.iter().map(|item| !item.disabled).collect());
        Self {
            items,
            selection,
            focus: false,
            look: Look::new(),
        }
    }

    pub fn with_look(mut self, look: Look) -> Self {
        self.look = look;
        self
    }

    pub fn items(&self) -> &[GroupItem] {
        &self.items
    }

    pub fn highlighted(&self) -> usize {
        self.selection.cursor()
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    fn activate(&mut self, index: usize) -> Command<Message> {
        match self.items.get(index) {
            Some(item) if !item.disabled => {
                self.selection.select(index);
                Command::message(Message::Pressed(index))
            }
            Some(item) => {
                tracing::debug!(label = %item.label, "press ignored on disabled group item");
                Command::none()
            }
            None => Command::none(),
        }
    }

    fn frame_look(&self) -> Look {
        Look::new()
            .fg(tone(Hue::Gray, Shade::S700))
            .bg(WHITE)
            .border(tone(Hue::Gray, Shade::S300))
            .edge(Edge::Rounded)
            .merge(self.look)
    }
}

impl Component for GroupButton {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus => match key.code {
                KeyCode::Left => {
                    self.selection.move_up();
                    Command::none()
                }
                KeyCode::Right => {
                    self.selection.move_down();
                    Command::none()
                }
                KeyCode::Enter | KeyCode::Char(' ') => self.activate(self.selection.cursor()),
                _ => Command::none(),
            },
            Message::Press(index) => self.activate(index),
            Message::KeyPress(_) | Message::Pressed(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let look = self.frame_look();
        let area = Rect {
            height: area.height.min(3),
            ..area
        };
        let inner = look.paint(frame, area);

        let divider = Span::styled(" │ ", Style::default().fg(tone(Hue::Gray, Shade::S300)));
        let mut spans = Vec::new();
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                spans.push(divider.clone());
            }
            let mut style = look.style();
            if item.disabled {
                style = style.add_modifier(Modifier::DIM);
            } else if self.focus && i == self.selection.cursor() {
                style = style.bg(tone(Hue::Gray, Shade::S100)).add_modifier(Modifier::BOLD);
            }
            spans.push(Span::styled(item.content(), style));
        }
        let line = Line::from(spans);
        let used = line.width();
        let offset = text::center_offset(used, inner.width as usize);
        let row = Rect {
            x: inner.x + offset,
            width: inner.width.saturating_sub(offset),
            ..inner
        };
        frame.render_widget(Paragraph::new(line), row);
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

impl Accessible for GroupButton {
    fn access_node(&self) -> AccessNode {
        AccessNode::new(Role::Group).children(self.items.iter().map(|item| {
            AccessNode::new(Role::Button)
                .label(&item.label)
                .disabled(item.disabled)
        }))
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

    fn group() -> GroupButton {
        GroupButton::new(vec![
            GroupItem::new("Day"),
            GroupItem::new("Week").disabled(true),
            GroupItem::new("Month").icon("▾", ItemKind::TrailingIcon),
        ])
    }

    #[test]
    fn press_emits_index() {
        let mut h = ComponentHarness::new(group());
        let out = h.send(Message::Press(2));
        assert!(matches!(out.as_slice(), [Message::Pressed(2)]));
    }

    #[test]
    fn disabled_item_is_inert() {
        let mut g = group();
        assert!(g.update(Message::Press(1)).is_none());
        assert!(g.update(Message::Press(9)).is_none());
    }

    #[test]
    fn arrows_skip_disabled_items() {
        let mut g = group();
        g.focus();
        g.update(Message::KeyPress(key(KeyCode::Right)));
        assert_eq!(g.highlighted(), 2);
        let cmd = g.update(Message::KeyPress(key(KeyCode::Enter)));
        assert!(matches!(cmd.into_message(), Some(Message::Pressed(2))));
    }

    #[test]
    fn item_content_by_kind() {
        let lead = GroupItem::new("Add").icon("+", ItemKind::LeadingIcon);
        let icon = GroupItem::new("Add").icon("+", ItemKind::Icon);
        assert_eq!(lead.content(), "+ Add");
        assert_eq!(icon.content(), "+");
    }

    #[test]
    fn renders_dividers_and_accessibility() {
        let g = group();
        let out = ComponentHarness::new(group()).render_string(40, 3);
        assert!(out.contains("Day │ Week │ Month ▾"));
        let node = g.access_node();
        assert_eq!(node.find_all(Role::Button).len(), 3);
        assert_eq!(node.find_labeled("Week").map(|n| n.disabled), Some(true));
    }
}
