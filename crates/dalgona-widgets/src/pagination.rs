//! Numbered page navigation.
//!
//! Pages are 1-based and shown in fixed windows of `page_range` buttons:
//! with a range of 5, pages 1 to 5 share a window, 6 to 10 the next, and the
//! last window holds whatever remains.

use crate::palette::{tone, Hue, Shade, WHITE};
use crate::variant::{Look, Variant};
use crossterm::event::{KeyCode, KeyEvent};
use dalgona_core::{AccessNode, Accessible, Command, Component, Current, Role};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_PAGE_RANGE: usize = 5;

/// `ceil(total / page_size)`; zero when there is nothing to show.
pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(page_size)
}

/// First page of the window holding `page`.
pub fn range_start(page: usize, page_range: usize) -> usize {
    let range = page_range.max(1);
    (page.max(1) - 1) / range * range + 1
}

/// Buttons in the window starting at `start`: the full range, or what is
/// left before the last page.
pub fn visible_count(start: usize, page_range: usize, total_pages: usize) -> usize {
    if start + page_range <= total_pages {
        page_range
    } else {
        (total_pages + 1).saturating_sub(start)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaginationVariant {
    #[default]
    Default,
    Circle,
}

/// Per-button state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemState {
    #[default]
    Default,
    Active,
    Disabled,
}

impl Variant for ItemState {
    fn look(self) -> Look {
        let look = Look::new()
            .fg(tone(Hue::Gray, Shade::S500))
            .bg(WHITE)
            .add(Modifier::BOLD)
            .pad_x(1);
        match self {
            ItemState::Default => look,
            ItemState::Active => look
                .fg(tone(Hue::Blue, Shade::S600))
                .bg(tone(Hue::Blue, Shade::S50))
                .border(tone(Hue::Blue, Shade::S100)),
            ItemState::Disabled => look.dimmed(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    KeyPress(KeyEvent),
    PrevPage,
    NextPage,
    /// Pointer activation of a page button.
    GotoPage(usize),
    /// Emitted with the new 1-based page.
    PageChanged(usize),
}

pub struct Pagination {
    total_count: usize,
    current: usize,
    page_size: usize,
    page_range: usize,
    variant: PaginationVariant,
    show_total: bool,
    focus: bool,
    look: Look,
}

impl Pagination {
    pub fn new(total_count: usize) -> Self {
        Self {
            total_count,
            current: 1,
            page_size: DEFAULT_PAGE_SIZE,
            page_range: DEFAULT_PAGE_RANGE,
            variant: PaginationVariant::default(),
            show_total: false,
            focus: false,
            look: Look::new(),
        }
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.set_page(page);
        self
    }

    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = size.max(1);
        self.set_page(self.current);
        self
    }

    pub fn with_page_range(mut self, range: usize) -> Self {
        self.page_range = range.max(1);
        self
    }

    pub fn with_variant(mut self, variant: PaginationVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Show "Total {n} results" before the buttons.
    pub fn with_total_text(mut self, show: bool) -> Self {
        self.show_total = show;
        self
    }

    pub fn with_look(mut self, look: Look) -> Self {
        self.look = look;
        self
    }

    pub fn page(&self) -> usize {
        self.current
    }

    /// Clamped to the available pages.
    pub fn set_page(&mut self, page: usize) {
        self.current = page.clamp(1, self.total_pages().max(1));
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn set_total_count(&mut self, total: usize) {
        self.total_count = total;
        self.set_page(self.current);
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_count, self.page_size)
    }

    pub fn on_first_page(&self) -> bool {
        self.current <= 1
    }

    pub fn on_last_page(&self) -> bool {
        self.current >= self.total_pages()
    }

    /// Page numbers in the current window.
    pub fn visible_pages(&self) -> std::ops::Range<usize> {
        let start = range_start(self.current, self.page_range);
        start..start + visible_count(start, self.page_range, self.total_pages())
    }

    /// Items on the current page, as `start..end` into the full list.
    pub fn slice_bounds(&self) -> std::ops::Range<usize> {
        let start = ((self.current - 1) * self.page_size).min(self.total_count);
        start..(start + self.page_size).min(self.total_count)
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    fn goto(&mut self, page: usize) -> Command<Message> {
        let total = self.total_pages();
        if page == 0 || page > total {
            tracing::debug!(page, total, "page out of range");
            return Command::none();
        }
        if page == self.current {
            return Command::none();
        }
        self.current = page;
        Command::message(Message::PageChanged(page))
    }

    fn item_spans(&self, label: String, state: ItemState) -> Vec<Span<'static>> {
        let look = state.look().merge(self.look);
        let pad = " ".repeat(look.pad_x.unwrap_or(0) as usize);
        let style = look.style();
        let caps = self.variant == PaginationVariant::Circle && state == ItemState::Active;
        if caps {
            let edge = Style::default()
                .fg(tone(Hue::Blue, Shade::S50))
                .bg(WHITE);
            vec![
                Span::styled("◖", edge),
                Span::styled(label, style),
                Span::styled("◗", edge),
            ]
        } else {
            vec![Span::styled(format!("{pad}{label}{pad}"), style)]
        }
    }
}

impl Component for Pagination {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus => match key.code {
                KeyCode::Left | KeyCode::Char('h') => self.goto(self.current.saturating_sub(1)),
                KeyCode::Right | KeyCode::Char('l') => self.goto(self.current + 1),
                KeyCode::Home => self.goto(1),
                KeyCode::End => self.goto(self.total_pages()),
                _ => Command::none(),
            },
            Message::PrevPage => self.goto(self.current.saturating_sub(1)),
            Message::NextPage => self.goto(self.current + 1),
            Message::GotoPage(page) => self.goto(page),
            Message::KeyPress(_) | Message::PageChanged(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if self.total_pages() == 0 || area.width == 0 || area.height == 0 {
            return;
        }
        let state = |disabled: bool| {
            if disabled {
                ItemState::Disabled
            } else {
                ItemState::Default
            }
        };
        let mut spans = Vec::new();
        if self.show_total {
            spans.push(Span::styled(
                format!("Total {} results", self.total_count),
                Style::default().fg(tone(Hue::Gray, Shade::S500)),
            ));
            spans.push(Span::raw("  "));
        }
        spans.extend(self.item_spans("‹".into(), state(self.on_first_page())));
        for page in self.visible_pages() {
            spans.push(Span::raw(" "));
            let item = if page == self.current {
                ItemState::Active
            } else {
                ItemState::Default
            };
            spans.extend(self.item_spans(page.to_string(), item));
        }
        spans.push(Span::raw(" "));
        spans.extend(self.item_spans("›".into(), state(self.on_last_page())));

        let line = Line::from(spans);
        let used = line.width();
        let row = Rect {
            x: area.x + (area.width as usize).saturating_sub(used) as u16,
            width: (used as u16).min(area.width),
            height: 1,
            ..area
        };
        frame.render_widget(Paragraph::new(line), row);
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

impl Accessible for Pagination {
    fn access_node(&self) -> AccessNode {
        let mut node = AccessNode::new(Role::Navigation).label("pagination");
        if self.total_pages() == 0 {
            return node.hidden(true);
        }
        if self.show_total {
            let total = format!("Total {} results", self.total_count);
            node = node.child(AccessNode::new(Role::Status).label(total));
        }
        node = node.child(
            AccessNode::new(Role::Button)
                .label("Previous page")
                .disabled(self.on_first_page()),
        );
        node = node.children(self.visible_pages().map(|page| {
            AccessNode::new(Role::Button)
                .label(page.to_string())
                .current((page == self.current).then_some(Current::Page))
        }));
        node.child(
            AccessNode::new(Role::Button)
                .label("Next page")
                .disabled(self.on_last_page()),
        )
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
    fn page_math() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(123, 10), 13);
        assert_eq!(range_start(1, 5), 1);
        assert_eq!(range_start(5, 5), 1);
        assert_eq!(range_start(6, 5), 6);
        assert_eq!(range_start(13, 5), 11);
        assert_eq!(visible_count(1, 5, 13), 5);
        assert_eq!(visible_count(11, 5, 13), 3);
        assert_eq!(visible_count(1, 5, 2), 2);
    }

    #[test]
    fn window_follows_current_page() {
        let p = Pagination::new(123).with_page(12);
        assert_eq!(p.visible_pages(), 11..14);
        assert_eq!(p.slice_bounds(), 110..120);
        let p = Pagination::new(123).with_page(13);
        assert_eq!(p.slice_bounds(), 120..123);
    }

    #[test]
    fn page_size_after_page_reclamps() {
        let late = Pagination::new(100).with_page(8).with_page_size(20);
        let early = Pagination::new(100).with_page_size(20).with_page(8);
        for p in [late, early] {
            assert_eq!(p.page(), 5);
            assert!(p.on_last_page());
            assert_eq!(p.visible_pages(), 1..6);
            assert_eq!(p.slice_bounds(), 80..100);
        }
    }

    #[test]
    fn prev_disabled_on_first_next_on_last() {
        let mut h = ComponentHarness::new(Pagination::new(30));
        assert!(h.send(Message::PrevPage).is_empty());
        let out = h.send(Message::NextPage);
        assert!(matches!(out.as_slice(), [Message::PageChanged(2)]));
        h.send(Message::GotoPage(3));
        assert!(h.component().on_last_page());
        assert!(h.send(Message::NextPage).is_empty());
        let node = h.component().access_node();
        assert!(node.find_labeled("Next page").unwrap().disabled);
        assert!(!node.find_labeled("Previous page").unwrap().disabled);
    }

    #[test]
    fn goto_emits_once_and_ignores_current() {
        let mut h = ComponentHarness::new(Pagination::new(100));
        assert!(h.send(Message::GotoPage(1)).is_empty());
        let out = h.send(Message::GotoPage(4));
        assert!(matches!(out.as_slice(), [Message::PageChanged(4)]));
        assert!(h.send(Message::GotoPage(11)).is_empty());
    }

    #[test]
    fn arrows_need_focus() {
        let mut p = Pagination::new(100);
        assert!(p.update(Message::KeyPress(key(KeyCode::Right))).is_none());
        p.focus();
        p.update(Message::KeyPress(key(KeyCode::End)));
        assert_eq!(p.page(), 10);
    }

    #[test]
    fn active_page_is_current() {
        let node = Pagination::new(100).with_page(3).access_node();
        assert_eq!(node.role, Role::Navigation);
        assert_eq!(node.find_labeled("3").unwrap().current, Some(Current::Page));
        assert_eq!(node.find_labeled("2").unwrap().current, None);
    }

    #[test]
    fn renders_nothing_without_pages() {
        let out = ComponentHarness::new(Pagination::new(0).with_total_text(true)).render_string(40, 1);
        assert_eq!(out.trim(), "");
    }

    #[test]
    fn renders_right_aligned_with_total() {
        let p = Pagination::new(42).with_total_text(true);
        let out = ComponentHarness::new(p).render_string(50, 1);
        assert!(out.contains("Total 42 results"));
        assert!(out.trim_end().ends_with('›'));
        assert!(out.contains(" 1 "));
        assert!(out.contains(" 5 "));
        assert!(!out.contains(" 6 "));
    }

    #[test]
    fn item_states_resolve() {
        assert_eq!(ItemState::Active.look().fg, Some(tone(Hue::Blue, Shade::S600)));
        assert!(ItemState::Disabled.look().modifiers.contains(Modifier::DIM));
    }
}
