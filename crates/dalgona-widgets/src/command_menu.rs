//! Searchable command list.
//!
//! `CommandMenu` is the list engine inside every dropdown: an optional
//! search row, a case-insensitive substring filter over item labels, a
//! highlighted row that skips disabled items, and an empty state. Choosing
//! reports the item's index in the full (unfiltered) list, so callers never
//! need to map filtered positions back.

use crate::palette::{tone, Hue, Shade, WHITE};
use crate::selection::SelectionState;
use crate::text;
use crate::text_edit::{EditOutcome, TextEditState};
use crate::variant::Look;
use crossterm::event::{KeyCode, KeyEvent};
use dalgona_core::{AccessNode, Accessible, Command, Component, Role};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub const DEFAULT_EMPTY_TEXT: &str = "No results found.";
pub const DEFAULT_SEARCH_PLACEHOLDER: &str = "Search...";
const DEFAULT_MAX_VISIBLE: usize = 8;

/// Selection indicator drawn with an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mark {
    #[default]
    None,
    /// Trailing check, shown when true.
    Tick(bool),
    /// Leading checkbox.
    Box(bool),
}

#[derive(Debug, Clone)]
pub struct MenuItem {
    pub label: String,
    pub disabled: bool,
    pub mark: Mark,
    pub icon: Option<String>,
}

impl MenuItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            disabled: false,
            mark: Mark::None,
            icon: None,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn mark(mut self, mark: Mark) -> Self {
        self.mark = mark;
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    KeyPress(KeyEvent),
    /// Pointer activation of the item at this full-list index.
    Choose(usize),
    /// Replace the search text.
    Query(String),
    /// Emitted with the full-list index of the chosen item.
    Chosen(usize),
    /// Emitted when typing changes the search text.
    QueryChanged(String),
}

pub struct CommandMenu {
    items: Vec<MenuItem>,
    search: TextEditState,
    searchable: bool,
    search_placeholder: String,
    empty_text: String,
    filtered: Vec<usize>,
    selection: SelectionState,
    max_visible: usize,
    look: Look,
}

impl Default for CommandMenu {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl CommandMenu {
    pub fn new(items: Vec<MenuItem>) -> Self {
        let mut menu = Self {
            items,
            search: TextEditState::new(),
            searchable: false,
            search_placeholder: DEFAULT_SEARCH_PLACEHOLDER.to_string(),
            empty_text: DEFAULT_EMPTY_TEXT.to_string(),
            filtered: Vec::new(),
            selection: SelectionState::new(0, DEFAULT_MAX_VISIBLE),
            max_visible: DEFAULT_MAX_VISIBLE,
            look: Look::new(),
        };
        menu.refilter();
        menu
    }

    /// Show a search row above the list.
    pub fn with_search(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn with_search_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.search_placeholder = placeholder.into();
        self
    }

    pub fn with_empty_text(mut self, text: impl Into<String>) -> Self {
        self.empty_text = text.into();
        self
    }

    pub fn with_max_visible(mut self, rows: usize) -> Self {
        self.max_visible = rows.max(1);
        self.selection.set_visible(self.max_visible);
        self
    }

    pub fn with_look(mut self, look: Look) -> Self {
        self.look = look;
        self
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Replace the items, keeping the search text.
    pub fn set_items(&mut self, items: Vec<MenuItem>) {
        self.items = items;
        self.refilter();
    }

    /// Update marks in place without touching highlight or filter.
    pub fn set_marks(&mut self, marks: impl IntoIterator<Item = Mark>) {
        for (item, mark) in self.items.iter_mut().zip(marks) {
            item.mark = mark;
        }
    }

    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    pub fn query(&self) -> String {
        self.search.value()
    }

    /// Set the filter text. Works without a search row too, for callers
    /// that own their own text box.
    pub fn set_query(&mut self, query: &str) {
        self.search.set_value(query);
        self.refilter();
    }

    /// Full-list indices of the items that pass the filter, in order.
    pub fn filtered(&self) -> &[usize] {
        &self.filtered
    }

    /// Full-list index of the highlighted item.
    pub fn highlighted(&self) -> Option<usize> {
        self.filtered
            .get(self.selection.cursor())
            .copied()
            .filter(|&i| self.items.get(i).is_some_and(|item| !item.disabled))
    }

    /// Highlight the item at this full-list index if it is visible and enabled.
    pub fn highlight(&mut self, index: usize) -> bool {
        match self.filtered.iter().position(|&i| i == index) {
            Some(row) => self.selection.select(row),
            None => false,
        }
    }

    /// Scroll so the item at `index` sits `lead` rows below the top.
    pub fn scroll_to_item(&mut self, index: usize, lead: usize) {
        if let Some(row) = self.filtered.iter().position(|&i| i == index) {
            self.selection.scroll_to(row, lead);
        }
    }

    pub fn scroll_offset(&self) -> usize {
        self.selection.offset()
    }

    /// Rows needed to draw the menu: search row and rule, then the list or
    /// the empty state.
    pub fn height(&self) -> u16 {
        let search = if self.searchable { 2 } else { 0 };
        let list = self.filtered.len().clamp(1, self.max_visible);
        (search + list) as u16
    }

    /// Columns needed to show the widest label without truncation.
    pub fn content_width(&self) -> u16 {
        let widest = self
            .items
            .iter()
            .map(|item| text::width(&item.label) + Self::decoration_width(item))
            .max()
            .unwrap_or(0)
            .max(text::width(&self.empty_text));
        widest as u16
    }

    fn decoration_width(item: &MenuItem) -> usize {
        let icon = item.icon.as_ref().map_or(0, |i| text::width(i) + 1);
        let mark = match item.mark {
            Mark::None => 0,
            Mark::Tick(_) => 2,
            Mark::Box(_) => 4,
        };
        // Two columns for the highlight gutter.
        2 + icon + mark
    }

    fn refilter(&mut self) {
        let query = self.query();
        self.filtered = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| text::matches_query(&item.label, &query))
            .map(|(i, _)| i)
            .collect();
        let enabled = self
            .filtered
            .iter()
            .map(|&i| !self.items[i].disabled)
            .collect();
        self.selection = SelectionState::new(0, self.max_visible);
        self.selection.set_enabled(enabled);
        self.selection.home();
    }

    fn choose(&self, index: usize) -> Command<Message> {
        match self.items.get(index) {
            Some(item) if item.disabled => {
                tracing::debug!(label = %item.label, "disabled menu item");
                Command::none()
            }
            Some(_) => Command::message(Message::Chosen(index)),
            None => Command::none(),
        }
    }
}

impl Component for CommandMenu {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) => match key.code {
                KeyCode::Down => {
                    self.selection.move_down();
                    Command::none()
                }
                KeyCode::Up => {
                    self.selection.move_up();
                    Command::none()
                }
                KeyCode::PageDown => {
                    self.selection.page_down();
                    Command::none()
                }
                KeyCode::PageUp => {
                    self.selection.page_up();
                    Command::none()
                }
                KeyCode::Enter => match self.highlighted() {
                    Some(index) => self.choose(index),
                    None => Command::none(),
                },
                _ if !self.searchable => Command::none(),
                _ => match self.search.handle_key(key) {
                    EditOutcome::Changed => {
                        self.refilter();
                        Command::message(Message::QueryChanged(self.search.value()))
                    }
                    EditOutcome::Moved | EditOutcome::Ignored => Command::none(),
                },
            },
            Message::Choose(index) => self.choose(index),
            Message::Query(query) => {
                self.set_query(&query);
                Command::none()
            }
            Message::Chosen(_) | Message::QueryChanged(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let base = Look::new()
            .fg(tone(Hue::Gray, Shade::S900))
            .bg(WHITE)
            .merge(self.look);
        let style = base.style();
        let muted = style.fg(tone(Hue::Gray, Shade::S500));
        let mut rows: Vec<Line> = Vec::new();

        if self.searchable {
            let query = self.search.value();
            let shown = if query.is_empty() {
                Span::styled(self.search_placeholder.clone(), muted)
            } else {
                Span::styled(query, style)
            };
            rows.push(Line::from(vec![Span::styled("⌕ ", muted), shown]));
            rows.push(Line::styled(
                "─".repeat(area.width as usize),
                Style::default().fg(tone(Hue::Gray, Shade::S200)),
            ));
        }

        if self.filtered.is_empty() {
            rows.push(Line::styled(self.empty_text.clone(), muted));
        }

        let offset = self.selection.offset();
        let highlighted = self.highlighted();
        for &index in self.filtered.iter().skip(offset).take(self.max_visible) {
            let item = &self.items[index];
            let active = highlighted == Some(index);
            let mut item_style = style;
            if item.disabled {
                item_style = item_style.add_modifier(Modifier::DIM);
            } else if active {
                item_style = item_style
                    .bg(tone(Hue::Gray, Shade::S100))
                    .add_modifier(Modifier::BOLD);
            }
            let mut spans = vec![Span::styled(if active { "▸ " } else { "  " }, item_style)];
            if let Mark::Box(on) = item.mark {
                spans.push(Span::styled(
                    if on { "[✓] " } else { "[ ] " },
                    item_style.fg(tone(Hue::Blue, Shade::S500)),
                ));
            }
            if let Some(icon) = &item.icon {
                spans.push(Span::styled(format!("{icon} "), item_style));
            }
            let budget = (area.width as usize)
                .saturating_sub(Self::decoration_width(item));
            spans.push(Span::styled(text::truncate(&item.label, budget), item_style));
            if let Mark::Tick(on) = item.mark {
                let used: usize = spans.iter().map(|s| s.width()).sum();
                let pad = (area.width as usize).saturating_sub(used + 1);
                spans.push(Span::styled(" ".repeat(pad), item_style));
                spans.push(Span::styled(
                    if on { "✓" } else { " " },
                    item_style.fg(tone(Hue::Blue, Shade::S500)),
                ));
            }
            rows.push(Line::from(spans));
        }

        frame.render_widget(Paragraph::new(rows).style(style), area);
    }

    fn focused(&self) -> bool {
        true
    }
}

impl Accessible for CommandMenu {
    fn access_node(&self) -> AccessNode {
        let highlighted = self.highlighted();
        let mut node = AccessNode::new(Role::Listbox);
        if self.searchable {
            node = node.child(AccessNode::new(Role::SearchBox).label(&self.search_placeholder));
        }
        if self.filtered.is_empty() {
            return node.child(AccessNode::new(Role::Status).label(&self.empty_text));
        }
        node.children(self.filtered.iter().map(|&i| {
            let item = &self.items[i];
            let option = AccessNode::new(Role::Option)
                .label(&item.label)
                .disabled(item.disabled)
                .selected(highlighted == Some(i));
            match item.mark {
                Mark::Tick(on) | Mark::Box(on) => option.checked(on),
                Mark::None => option,
            }
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

    fn fruit() -> CommandMenu {
        CommandMenu::new(vec![
            MenuItem::new("Apple"),
            MenuItem::new("Banana").disabled(true),
            MenuItem::new("Cherry"),
            MenuItem::new("Pineapple"),
        ])
        .with_search(true)
    }

    fn type_text(menu: &mut CommandMenu, text: &str) {
        for c in text.chars() {
            menu.update(Message::KeyPress(key(KeyCode::Char(c))));
        }
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let mut menu = fruit();
        type_text(&mut menu, "APP");
        assert_eq!(menu.filtered(), &[0, 3]);
        assert_eq!(menu.query(), "APP");
    }

    #[test]
    fn typing_reports_query() {
        let mut h = ComponentHarness::new(fruit());
        let out = h.send(Message::KeyPress(key(KeyCode::Char('c'))));
        assert!(matches!(out.as_slice(), [Message::QueryChanged(q)] if q == "c"));
    }

    #[test]
    fn chosen_index_refers_to_full_list() {
        let mut menu = fruit();
        type_text(&mut menu, "pine");
        let cmd = menu.update(Message::KeyPress(key(KeyCode::Enter)));
        assert!(matches!(cmd.into_message(), Some(Message::Chosen(3))));
    }

    #[test]
    fn navigation_skips_disabled() {
        let mut menu = fruit();
        assert_eq!(menu.highlighted(), Some(0));
        menu.update(Message::KeyPress(key(KeyCode::Down)));
        assert_eq!(menu.highlighted(), Some(2));
        menu.update(Message::KeyPress(key(KeyCode::Up)));
        menu.update(Message::KeyPress(key(KeyCode::Up)));
        assert_eq!(menu.highlighted(), Some(3));
    }

    #[test]
    fn disabled_item_cannot_be_chosen() {
        let mut menu = fruit();
        assert!(menu.update(Message::Choose(1)).is_none());
        assert!(menu.update(Message::Choose(42)).is_none());
    }

    #[test]
    fn empty_state() {
        let mut menu = fruit();
        type_text(&mut menu, "zzz");
        assert!(menu.filtered().is_empty());
        assert_eq!(menu.highlighted(), None);
        assert!(menu.update(Message::KeyPress(key(KeyCode::Enter))).is_none());
        let out = ComponentHarness::new(menu).render_string(24, 4);
        assert!(out.contains(DEFAULT_EMPTY_TEXT));
    }

    #[test]
    fn renders_search_row_and_marks() {
        let mut menu = fruit();
        menu.set_marks([Mark::Tick(true), Mark::None, Mark::Tick(false), Mark::None]);
        let out = ComponentHarness::new(menu).render_string(16, 6);
        let rows: Vec<&str> = out.lines().collect();
        assert!(rows[0].starts_with("⌕ Search..."));
        assert!(rows[1].starts_with('─'));
        assert!(rows[2].starts_with("▸ Apple"));
        assert!(rows[2].ends_with('✓'));
    }

    #[test]
    fn scroll_to_item_sets_offset() {
        let items = (0..20).map(|i| MenuItem::new(format!("Item {i}"))).collect();
        let mut menu = CommandMenu::new(items).with_max_visible(5);
        menu.scroll_to_item(12, 2);
        assert_eq!(menu.scroll_offset(), 10);
        assert_eq!(menu.height(), 5);
    }

    #[test]
    fn access_tree_lists_visible_options() {
        let mut menu = fruit();
        menu.set_query("an");
        let node = menu.access_node();
        assert!(node.find(Role::SearchBox).is_some());
        let options = node.find_all(Role::Option);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].label.as_deref(), Some("Banana"));
        assert!(options[0].disabled);
    }
}
