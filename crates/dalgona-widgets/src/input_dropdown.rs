//! Combobox: a text box that filters a dropdown list as you type.

use crate::command_menu::{self, CommandMenu, Mark, MenuItem};
use crate::dropdown::{paint_panel, panel_look, trigger_look, DropdownItem, DropdownSize};
use crate::palette::{tone, Hue, Shade};
use crate::popover::Popover;
use crate::text;
use crate::text_edit::{EditOutcome, TextEditState};
use crate::variant::{FieldStatus, Look};
use crossterm::event::{KeyCode, KeyEvent};
use dalgona_core::{AccessNode, Accessible, Command, Component, Role};
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

#[derive(Debug, Clone)]
pub enum Message {
    KeyPress(KeyEvent),
    /// The text box gained focus; opens the list.
    Focus,
    /// The text box lost focus; closes the list.
    Blur,
    /// Pointer activation of the clear button.
    Clear,
    Menu(command_menu::Message),
    /// Emitted with the chosen value.
    Changed(String),
    OpenChanged(bool),
}

pub struct InputDropdown {
    items: Vec<DropdownItem>,
    value: Option<String>,
    placeholder: String,
    size: DropdownSize,
    error: bool,
    search: TextEditState,
    popover: Popover,
    menu: CommandMenu,
    focus: bool,
    look: Look,
}

impl InputDropdown {
    pub fn new(items: Vec<DropdownItem>, placeholder: impl Into<String>) -> Self {
        let size = DropdownSize::default();
        let menu = CommandMenu::new(
            items
                .iter()
                .map(|item| MenuItem::new(&item.label).disabled(item.disabled))
                .collect(),
        )
        .with_max_visible(size.max_visible());
        let mut dropdown = Self {
            items,
            value: None,
            placeholder: placeholder.into(),
            size,
            error: false,
            search: TextEditState::new(),
            popover: Popover::new(),
            menu,
            focus: false,
            look: Look::new(),
        };
        dropdown.refresh_marks();
        dropdown
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(Some(value.into()));
        self
    }

    pub fn with_size(mut self, size: DropdownSize) -> Self {
        self.size = size;
        self.menu = std::mem::take(&mut self.menu).with_max_visible(size.max_visible());
        self
    }

    pub fn with_error(mut self, error: bool) -> Self {
        self.error = error;
        self
    }

    pub fn with_look(mut self, look: Look) -> Self {
        self.look = look;
        self
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn set_value(&mut self, value: Option<String>) {
        self.value = match value {
            Some(v) if self.items.iter().any(|item| item.value == v) => Some(v),
            Some(v) => {
                tracing::warn!(value = %v, "combobox value is not among the items");
                None
            }
            None => None,
        };
        self.refresh_marks();
        if !self.popover.is_open() {
            self.resync();
        }
    }

    /// Current text in the box.
    pub fn search_text(&self) -> String {
        self.search.value()
    }

    pub fn is_open(&self) -> bool {
        self.popover.is_open()
    }

    pub fn menu(&self) -> &CommandMenu {
        &self.menu
    }

    fn selected_label(&self) -> Option<&str> {
        let value = self.value.as_deref()?;
        self.items
            .iter()
            .find(|item| item.value == value)
            .map(|item| item.label.as_str())
    }

    /// Put the committed value's label back in the box.
    fn resync(&mut self) {
        let label = self.selected_label().unwrap_or("").to_string();
        self.search.set_value(&label);
    }

    fn refresh_marks(&mut self) {
        let value = self.value.as_deref();
        let marks: Vec<Mark> = self
            .items
            .iter()
            .map(|item| Mark::Tick(Some(item.value.as_str()) == value))
            .collect();
        self.menu.set_marks(marks);
    }

    fn set_open(&mut self, open: bool) -> Command<Message> {
        if !self.popover.set_open(open) {
            return Command::none();
        }
        if open {
            self.menu.set_query(&self.search.value());
        } else {
            self.resync();
        }
        Command::message(Message::OpenChanged(open))
    }

    fn choose(&mut self, index: usize) -> Command<Message> {
        let Some(item) = self.items.get(index) else {
            return Command::none();
        };
        let value = item.value.clone();
        self.value = Some(value.clone());
        self.refresh_marks();
        Command::batch([Command::message(Message::Changed(value)), self.set_open(false)])
    }

    fn route_menu(&mut self, msg: command_menu::Message) -> Command<Message> {
        let out = self.menu.update(msg).messages();
        Command::batch(out.into_iter().map(|m| match m {
            command_menu::Message::Chosen(index) => self.choose(index),
            _ => Command::none(),
        }))
    }
}

impl Component for InputDropdown {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Focus => {
                self.focus = true;
                self.set_open(true)
            }
            Message::Blur => {
                self.focus = false;
                self.set_open(false)
            }
            Message::Clear => {
                self.search.clear();
                self.menu.set_query("");
                self.focus = true;
                self.set_open(true)
            }
            Message::KeyPress(key) if self.focus => match key.code {
                KeyCode::Esc => self.set_open(false),
                KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown | KeyCode::Enter => {
                    if !self.popover.is_open() {
                        return self.set_open(true);
                    }
                    self.route_menu(command_menu::Message::KeyPress(key))
                }
                _ => match self.search.handle_key(key) {
                    EditOutcome::Changed => {
                        self.menu.set_query(&self.search.value());
                        self.set_open(true)
                    }
                    EditOutcome::Moved | EditOutcome::Ignored => Command::none(),
                },
            },
            Message::Menu(msg) if self.popover.is_open() => self.route_menu(msg),
            Message::KeyPress(_) | Message::Menu(_) | Message::Changed(_) | Message::OpenChanged(_) => {
                Command::none()
            }
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let open = self.popover.is_open();
        let status = if self.error {
            FieldStatus::Error
        } else {
            FieldStatus::Default
        };
        let mut look = trigger_look(self.size, status, false, self.focus).merge(self.look);
        look.fg = Some(tone(Hue::Gray, Shade::S600));
        let field = look.fit(area);
        let inner = look.paint(frame, field);
        if inner.width > 0 && inner.height > 0 {
            let icon = if open {
                look.style().fg(tone(Hue::Blue, Shade::S500))
            } else {
                look.style().fg(tone(Hue::Gray, Shade::S500))
            };
            let clear = if self.value.is_some() { 2 } else { 0 };
            let room = (inner.width as usize).saturating_sub(2 + clear);
            let query = self.search.value();
            let mut spans = vec![Span::styled("⌕ ", icon)];
            let cursor_col = if query.is_empty() {
                let shown = text::truncate(&self.placeholder, room);
                let pad = room.saturating_sub(text::width(&shown));
                spans.push(Span::styled(shown, look.style().fg(tone(Hue::Gray, Shade::S300))));
                spans.push(Span::raw(" ".repeat(pad)));
                0
            } else {
                let (shown, col) = self.search.window(room);
                let pad = room.saturating_sub(text::width(&shown));
                spans.push(Span::styled(shown, look.style()));
                spans.push(Span::raw(" ".repeat(pad)));
                col
            };
            if clear > 0 {
                spans.push(Span::styled(" ⊗", look.style().fg(tone(Hue::Blue, Shade::S500))));
            }
            let row = Rect { height: 1, ..inner };
            frame.render_widget(Paragraph::new(Line::from(spans)).style(look.style()), row);
            if self.focus {
                frame.set_cursor_position((row.x + 2 + cursor_col as u16, row.y));
            }
        }
        if open {
            paint_panel(frame, &self.popover, field, &self.menu, &panel_look(self.error), 0);
        }
    }

    fn focused(&self) -> bool {
        self.focus
    }

    fn unmount(&mut self) -> Command<Message> {
        self.popover.set_open(false);
        Command::none()
    }
}

impl Accessible for InputDropdown {
    fn access_node(&self) -> AccessNode {
        let node = AccessNode::new(Role::Combobox)
            .label(&self.placeholder)
            .expanded(self.popover.is_open())
            .invalid(self.error);
        let node = if self.value.is_some() {
            node.child(AccessNode::new(Role::Button).label("Clear"))
        } else {
            node
        };
        if self.popover.is_open() {
            node.child(self.menu.access_node())
        } else {
            node
        }
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

    fn cities() -> InputDropdown {
        InputDropdown::new(
            vec![
                DropdownItem::new("sel", "Seoul"),
                DropdownItem::new("bsn", "Busan"),
                DropdownItem::new("inc", "Incheon"),
            ],
            "Search city",
        )
    }

    fn type_text(d: &mut InputDropdown, text: &str) {
        for c in text.chars() {
            d.update(Message::KeyPress(key(KeyCode::Char(c))));
        }
    }

    #[test]
    fn focus_opens_and_blur_closes() {
        let mut h = ComponentHarness::new(cities());
        let out = h.send(Message::Focus);
        assert!(matches!(out.as_slice(), [Message::OpenChanged(true)]));
        let out = h.send(Message::Blur);
        assert!(matches!(out.as_slice(), [Message::OpenChanged(false)]));
        assert!(!h.component().is_open());
    }

    #[test]
    fn typing_filters_and_enter_chooses() {
        let mut d = cities();
        d.update(Message::Focus);
        type_text(&mut d, "an");
        assert_eq!(d.menu().filtered(), &[1]);
        let out = d.update(Message::KeyPress(key(KeyCode::Enter))).messages();
        assert!(out.iter().any(|m| matches!(m, Message::Changed(v) if v == "bsn")));
        assert!(!d.is_open());
        assert_eq!(d.search_text(), "Busan");
    }

    #[test]
    fn closing_resyncs_search_to_committed_label() {
        let mut d = cities().with_value("sel");
        assert_eq!(d.search_text(), "Seoul");
        d.update(Message::Focus);
        type_text(&mut d, "xyz");
        assert_eq!(d.search_text(), "Seoulxyz");
        d.update(Message::Blur);
        assert_eq!(d.search_text(), "Seoul");
    }

    #[test]
    fn clear_empties_search_and_opens() {
        let mut d = cities().with_value("inc");
        let out = d.update(Message::Clear).messages();
        assert!(out.iter().any(|m| matches!(m, Message::OpenChanged(true))));
        assert_eq!(d.search_text(), "");
        assert_eq!(d.menu().filtered().len(), 3);
        // The committed value survives until something else is chosen.
        assert_eq!(d.value(), Some("inc"));
    }

    #[test]
    fn keys_ignored_without_focus() {
        let mut d = cities();
        assert!(d.update(Message::KeyPress(key(KeyCode::Char('s')))).is_none());
        assert_eq!(d.search_text(), "");
    }

    #[test]
    fn renders_placeholder_and_list() {
        let mut d = cities();
        let closed = ComponentHarness::new(cities()).render_string(30, 8);
        assert!(closed.contains("⌕ Search city"));
        d.update(Message::Focus);
        let open = ComponentHarness::new(d).render_string(30, 8);
        assert!(open.contains("Incheon"));
    }
}
