//! Trail of links ending at the current page.

use crate::palette::{tone, Hue, Shade};
use crate::variant::Look;
use crossterm::event::{KeyCode, KeyEvent};
use dalgona_core::{AccessNode, Accessible, Command, Component, Current, Role};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub const DEFAULT_SEPARATOR: &str = "›";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Crumb {
    Link(String),
    /// Collapsed middle segment.
    Ellipsis,
    Page(String),
}

impl Crumb {
    pub fn link(label: impl Into<String>) -> Self {
        Crumb::Link(label.into())
    }

    pub fn page(label: impl Into<String>) -> Self {
        Crumb::Page(label.into())
    }

    pub fn is_link(&self) -> bool {
        matches!(self, Crumb::Link(_))
    }

    fn text(&self) -> &str {
        match self {
            Crumb::Link(label) | Crumb::Page(label) => label,
            Crumb::Ellipsis => "…",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    KeyPress(KeyEvent),
    /// Pointer activation of the item at `index`.
    Activate(usize),
    /// Emitted when a link item is activated.
    Navigate(usize),
}

pub struct Breadcrumb {
    items: Vec<Crumb>,
    separator: String,
    cursor: Option<usize>,
    focus: bool,
    look: Look,
}

impl Breadcrumb {
    pub fn new(items: impl IntoIterator<Item = Crumb>) -> Self {
        Self {
            items: items.into_iter().collect(),
            separator: DEFAULT_SEPARATOR.to_string(),
            cursor: None,
            focus: false,
            look: Look::new(),
        }
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_look(mut self, look: Look) -> Self {
        self.look = look;
        self
    }

    pub fn items(&self) -> &[Crumb] {
        &self.items
    }

    /// Link under keyboard focus.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn focus(&mut self) {
        self.focus = true;
        if self.cursor.is_none() {
            self.cursor = self.items.iter().position(Crumb::is_link);
        }
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    fn activate(&self, index: usize) -> Command<Message> {
        match self.items.get(index) {
            Some(Crumb::Link(_)) => Command::message(Message::Navigate(index)),
            Some(_) => {
                tracing::debug!(index, "breadcrumb item is not a link");
                Command::none()
            }
            None => {
                tracing::warn!(index, count = self.items.len(), "breadcrumb index out of range");
                Command::none()
            }
        }
    }

    fn step(&mut self, forward: bool) {
        let links: Vec<usize> = (0..self.items.len())
            .filter(|&i| self.items[i].is_link())
            .collect();
        let Some(&first) = links.first() else {
            return;
        };
        let next = match self.cursor {
            None => first,
            Some(at) if forward => links.iter().copied().find(|&i| i > at).unwrap_or(at),
            Some(at) => links.iter().rev().copied().find(|&i| i < at).unwrap_or(at),
        };
        self.cursor = Some(next);
    }
}

impl Component for Breadcrumb {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus => match key.code {
                KeyCode::Left | KeyCode::Char('h') => {
                    self.step(false);
                    Command::none()
                }
                KeyCode::Right | KeyCode::Char('l') => {
                    self.step(true);
                    Command::none()
                }
                KeyCode::Enter | KeyCode::Char(' ') => match self.cursor {
                    Some(index) => self.activate(index),
                    None => Command::none(),
                },
                _ => Command::none(),
            },
            Message::Activate(index) => self.activate(index),
            Message::KeyPress(_) | Message::Navigate(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let base = self.look.style();
        let muted = base.fg(tone(Hue::Gray, Shade::S400));
        let mut spans = Vec::new();
        for (index, item) in self.items.iter().enumerate() {
            if index > 0 {
                spans.push(Span::styled(format!(" {} ", self.separator), muted));
            }
            let style = match item {
                Crumb::Link(_) => {
                    let style = Style::default().fg(tone(Hue::Gray, Shade::S500));
                    if self.focus && self.cursor == Some(index) {
                        style.add_modifier(Modifier::UNDERLINED)
                    } else {
                        style
                    }
                }
                Crumb::Ellipsis => muted,
                Crumb::Page(_) => Style::default()
                    .fg(tone(Hue::Gray, Shade::S900))
                    .add_modifier(Modifier::BOLD),
            };
            spans.push(Span::styled(item.text().to_string(), base.patch(style)));
        }
        let row = Rect { height: 1, ..area };
        frame.render_widget(Paragraph::new(Line::from(spans)), row);
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

impl Accessible for Breadcrumb {
    fn access_node(&self) -> AccessNode {
        let items = self.items.iter().map(|item| {
            let inner = match item {
                Crumb::Link(label) => AccessNode::new(Role::Link).label(label),
                Crumb::Page(label) => AccessNode::new(Role::Link)
                    .label(label)
                    .disabled(true)
                    .current(Some(Current::Page)),
                Crumb::Ellipsis => AccessNode::new(Role::Presentation)
                    .label("More")
                    .hidden(true),
            };
            AccessNode::new(Role::ListItem).child(inner)
        });
        AccessNode::new(Role::Navigation)
            .label("breadcrumb")
            .child(AccessNode::new(Role::List).children(items))
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

    fn trail() -> Breadcrumb {
        Breadcrumb::new([
            Crumb::link("Home"),
            Crumb::Ellipsis,
            Crumb::link("Projects"),
            Crumb::page("Settings"),
        ])
    }

    #[test]
    fn only_links_navigate() {
        let mut h = ComponentHarness::new(trail());
        assert!(matches!(h.send(Message::Activate(0)).as_slice(), [Message::Navigate(0)]));
        assert!(matches!(h.send(Message::Activate(2)).as_slice(), [Message::Navigate(2)]));
        assert!(h.send(Message::Activate(1)).is_empty());
        assert!(h.send(Message::Activate(3)).is_empty());
        assert!(h.send(Message::Activate(9)).is_empty());
    }

    #[test]
    fn renders_with_default_separator() {
        let out = ComponentHarness::new(trail()).render_string(50, 1);
        assert!(out.contains("Home › … › Projects › Settings"));
    }

    #[test]
    fn custom_separator() {
        let crumbs = Breadcrumb::new([Crumb::link("a"), Crumb::page("b")]).with_separator("/");
        let out = ComponentHarness::new(crumbs).render_string(20, 1);
        assert!(out.contains("a / b"));
    }

    #[test]
    fn page_is_current_and_disabled() {
        let node = trail().access_node();
        assert_eq!(node.role, Role::Navigation);
        let page = node.find_labeled("Settings").unwrap();
        assert_eq!(page.current, Some(Current::Page));
        assert!(page.disabled);
        let link = node.find_labeled("Home").unwrap();
        assert_eq!(link.current, None);
        assert!(!link.disabled);
        assert!(node.find_labeled("More").unwrap().hidden);
    }

    #[test]
    fn keyboard_walks_links_only() {
        let mut b = trail();
        b.focus();
        assert_eq!(b.cursor(), Some(0));
        b.update(Message::KeyPress(key(KeyCode::Right)));
        assert_eq!(b.cursor(), Some(2));
        b.update(Message::KeyPress(key(KeyCode::Right)));
        assert_eq!(b.cursor(), Some(2));
        let cmd = b.update(Message::KeyPress(key(KeyCode::Enter)));
        assert!(matches!(cmd.into_message(), Some(Message::Navigate(2))));
        b.update(Message::KeyPress(key(KeyCode::Left)));
        assert_eq!(b.cursor(), Some(0));
    }

    #[test]
    fn unfocused_ignores_keys() {
        let mut b = trail();
        assert!(b.update(Message::KeyPress(key(KeyCode::Enter))).is_none());
    }
}
