//! Ten-minute time slots and the scrolling slot list.
//!
//! A day is cut into [`SLOTS_PER_DAY`] slots; slot `i` starts at
//! `i / 6` hours and `(i % 6) * 10` minutes, so 14:30 is slot 87. The slot
//! functions are pure so they can be tested without a clock: callers pass
//! the stored date-time and "now" explicitly.

use crate::palette::{tone, Hue, Shade, WHITE};
use crate::selection::SelectionState;
use crate::text;
use crate::variant::{Look, Variant};
use chrono::{Local, NaiveDateTime, NaiveTime, Timelike};
use crossterm::event::{KeyCode, KeyEvent};
use dalgona_core::{AccessNode, Accessible, Command, Component, Role};
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub const SLOTS_PER_DAY: usize = 144;
pub const SLOT_MINUTES: u32 = 10;
const SLOTS_PER_HOUR: usize = 6;

/// Rows kept above the selected slot when scrolling it into view.
pub const SCROLL_LEAD: usize = 2;

/// Slot holding `time`; minutes round down to the slot start.
pub fn slot_index(time: NaiveTime) -> usize {
    time.hour() as usize * SLOTS_PER_HOUR + (time.minute() / SLOT_MINUTES) as usize
}

pub fn slot_hour(index: usize) -> u32 {
    (index / SLOTS_PER_HOUR) as u32
}

pub fn slot_minute(index: usize) -> u32 {
    (index % SLOTS_PER_HOUR) as u32 * SLOT_MINUTES
}

/// Start time of a slot, `None` past the end of the day.
pub fn slot_time(index: usize) -> Option<NaiveTime> {
    if index >= SLOTS_PER_DAY {
        return None;
    }
    NaiveTime::from_hms_opt(slot_hour(index), slot_minute(index), 0)
}

/// `HH:MM`.
pub fn slot_label(index: usize) -> String {
    format!("{:02}:{:02}", slot_hour(index), slot_minute(index))
}

/// A slot is disabled only when the stored date is today and the slot
/// starts before the current wall-clock minute.
pub fn is_slot_disabled(index: usize, stored: Option<NaiveDateTime>, now: NaiveDateTime) -> bool {
    let Some(stored) = stored else {
        return false;
    };
    if stored.date() != now.date() {
        return false;
    }
    let (hour, minute) = (slot_hour(index), slot_minute(index));
    hour < now.hour() || (hour == now.hour() && minute < now.minute())
}

/// Whether the stored time sits exactly on the slot start.
pub fn is_slot_selected(index: usize, stored: Option<NaiveDateTime>) -> bool {
    stored.is_some_and(|s| s.hour() == slot_hour(index) && s.minute() == slot_minute(index))
}

/// Move the stored date-time to the slot start, seconds zeroed. Without a
/// stored date there is nothing to put the time on.
pub fn select_time(stored: Option<NaiveDateTime>, index: usize) -> Option<NaiveDateTime> {
    let stored = stored?;
    let time = slot_time(index)?;
    Some(stored.date().and_time(time))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimePanelSize {
    #[default]
    Sm,
    Base,
    Md,
}

impl Variant for TimePanelSize {
    fn look(self) -> Look {
        let look = Look::new().fg(tone(Hue::Gray, Shade::S900)).bg(WHITE);
        match self {
            TimePanelSize::Sm => look.width(10).height(9),
            TimePanelSize::Base => look.width(11).height(10),
            TimePanelSize::Md => look.width(12).height(11).add(Modifier::BOLD),
        }
    }
}

impl TimePanelSize {
    /// Slot rows below the header.
    pub fn rows(self) -> usize {
        self.look().height.unwrap_or(9) as usize - 1
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    KeyPress(KeyEvent),
    /// Pointer activation of a slot.
    Pick(usize),
    /// Bring the selected slot into view; usually scheduled for the frame
    /// after the panel appears.
    ScrollToSelected,
    /// Emitted with the stored date moved to the picked slot.
    Selected(NaiveDateTime),
}

pub struct TimePanel {
    stored: Option<NaiveDateTime>,
    now: NaiveDateTime,
    size: TimePanelSize,
    title: String,
    selection: SelectionState,
    focus: bool,
    look: Look,
}

impl Default for TimePanel {
    fn default() -> Self {
        Self::new()
    }
}

impl TimePanel {
    pub fn new() -> Self {
        let size = TimePanelSize::default();
        let mut panel = Self {
            stored: None,
            now: Local::now().naive_local(),
            size,
            title: "Time".to_string(),
            selection: SelectionState::new(SLOTS_PER_DAY, size.rows()),
            focus: false,
            look: Look::new(),
        };
        panel.refresh();
        panel
    }

    pub fn with_value(mut self, stored: NaiveDateTime) -> Self {
        self.set_value(Some(stored));
        self
    }

    pub fn with_now(mut self, now: NaiveDateTime) -> Self {
        self.set_now(now);
        self
    }

    pub fn with_size(mut self, size: TimePanelSize) -> Self {
        self.size = size;
        self.selection.set_visible(size.rows());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_look(mut self, look: Look) -> Self {
        self.look = look;
        self
    }

    pub fn value(&self) -> Option<NaiveDateTime> {
        self.stored
    }

    pub fn set_value(&mut self, stored: Option<NaiveDateTime>) {
        self.stored = stored;
        self.refresh();
    }

    pub fn set_now(&mut self, now: NaiveDateTime) {
        self.now = now;
        self.refresh();
    }

    pub fn is_disabled(&self, index: usize) -> bool {
        is_slot_disabled(index, self.stored, self.now)
    }

    /// The selected slot, if the stored time sits on one.
    pub fn selected_slot(&self) -> Option<usize> {
        let stored = self.stored?;
        let index = slot_index(stored.time());
        is_slot_selected(index, self.stored).then_some(index)
    }

    pub fn cursor(&self) -> usize {
        self.selection.cursor()
    }

    pub fn scroll_offset(&self) -> usize {
        self.selection.offset()
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    pub fn width(&self) -> u16 {
        self.size.look().merge(self.look).width.unwrap_or(10)
    }

    pub fn height(&self) -> u16 {
        self.size.look().merge(self.look).height.unwrap_or(9)
    }

    fn refresh(&mut self) {
        let enabled = (0..SLOTS_PER_DAY).map(|i| !self.is_disabled(i)).collect();
        self.selection.set_enabled(enabled);
    }

    /// Scroll the selected slot (or the stored time's slot) into view.
    pub fn scroll_to_selected(&mut self) {
        let Some(stored) = self.stored else {
            return;
        };
        let index = slot_index(stored.time());
        self.selection.select(index);
        self.selection.scroll_to(index, SCROLL_LEAD);
    }

    fn pick(&mut self, index: usize) -> Command<Message> {
        if self.is_disabled(index) {
            tracing::debug!(slot = index, "time slot is in the past");
            return Command::none();
        }
        match select_time(self.stored, index) {
            Some(next) => {
                self.stored = Some(next);
                self.selection.select(index);
                Command::message(Message::Selected(next))
            }
            None => {
                tracing::debug!(slot = index, "no date to put the time on");
                Command::none()
            }
        }
    }
}

impl Component for TimePanel {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus => {
                match key.code {
                    KeyCode::Up => self.selection.move_up(),
                    KeyCode::Down => self.selection.move_down(),
                    KeyCode::PageUp => self.selection.page_up(),
                    KeyCode::PageDown => self.selection.page_down(),
                    KeyCode::Home => self.selection.home(),
                    KeyCode::End => self.selection.end(),
                    KeyCode::Enter | KeyCode::Char(' ') => return self.pick(self.selection.cursor()),
                    _ => {}
                }
                Command::none()
            }
            Message::Pick(index) => self.pick(index),
            Message::ScrollToSelected => {
                self.scroll_to_selected();
                Command::none()
            }
            Message::KeyPress(_) | Message::Selected(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let look = self.size.look().merge(self.look);
        let block = Block::default()
            .borders(Borders::LEFT)
            .border_style(look.style().fg(tone(Hue::Gray, Shade::S200)))
            .style(look.style());
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }
        let width = inner.width as usize;
        let base = look.style();
        let mut rows = vec![Line::from(Span::styled(
            format!("{:^width$}", text::truncate(&self.title, width)),
            base.add_modifier(Modifier::BOLD),
        ))];
        let shown = (inner.height as usize).saturating_sub(1);
        let selected = self.selected_slot();
        for index in self.selection.offset()..(self.selection.offset() + shown).min(SLOTS_PER_DAY) {
            let mut style = base;
            if Some(index) == selected {
                style = style.bg(tone(Hue::Blue, Shade::S400)).fg(WHITE);
            }
            if self.is_disabled(index) {
                style = style.add_modifier(Modifier::DIM);
            }
            if self.focus && index == self.selection.cursor() {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            rows.push(Line::from(Span::styled(
                format!("{:^width$}", slot_label(index)),
                style,
            )));
        }
        frame.render_widget(Paragraph::new(rows).style(base), inner);
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

impl Accessible for TimePanel {
    fn access_node(&self) -> AccessNode {
        let selected = self.selected_slot();
        AccessNode::new(Role::Listbox)
            .label(&self.title)
            .children((0..SLOTS_PER_DAY).map(|i| {
                AccessNode::new(Role::Option)
                    .label(slot_label(i))
                    .selected(Some(i) == selected)
                    .disabled(self.is_disabled(i))
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use dalgona_core::testing::ComponentHarness;
    use proptest::prelude::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn slot_87_is_half_past_two() {
        assert_eq!(slot_label(87), "14:30");
        assert_eq!(slot_index(NaiveTime::from_hms_opt(14, 30, 0).unwrap()), 87);
        assert_eq!(slot_index(NaiveTime::from_hms_opt(14, 39, 59).unwrap()), 87);
        assert_eq!(slot_label(0), "00:00");
        assert_eq!(slot_label(SLOTS_PER_DAY - 1), "23:50");
        assert_eq!(slot_time(SLOTS_PER_DAY), None);
    }

    #[test]
    fn past_slots_disabled_only_today() {
        let now = at(12, 14, 35);
        assert!(is_slot_disabled(86, Some(at(12, 9, 0)), now));
        assert!(is_slot_disabled(87, Some(at(12, 9, 0)), now));
        assert!(!is_slot_disabled(88, Some(at(12, 9, 0)), now));
        assert!(!is_slot_disabled(0, Some(at(13, 9, 0)), now));
        assert!(!is_slot_disabled(0, Some(at(11, 9, 0)), now));
        assert!(!is_slot_disabled(0, None, now));
    }

    #[test]
    fn slot_at_current_minute_stays_enabled() {
        assert!(!is_slot_disabled(87, Some(at(12, 0, 0)), at(12, 14, 30)));
    }

    #[test]
    fn select_time_keeps_date_and_zeroes_seconds() {
        let stored = NaiveDate::from_ymd_opt(2025, 3, 12)
            .unwrap()
            .and_hms_opt(9, 7, 42)
            .unwrap();
        assert_eq!(select_time(Some(stored), 87), Some(at(12, 14, 30)));
        assert_eq!(select_time(None, 87), None);
    }

    #[test]
    fn pick_emits_selected() {
        let panel = TimePanel::new().with_now(at(1, 8, 0)).with_value(at(12, 9, 0));
        let mut h = ComponentHarness::new(panel);
        let out = h.send(Message::Pick(87));
        assert!(matches!(out.as_slice(), [Message::Selected(t)] if *t == at(12, 14, 30)));
        assert_eq!(h.component().selected_slot(), Some(87));
    }

    #[test]
    fn disabled_pick_is_inert() {
        let panel = TimePanel::new().with_now(at(12, 14, 35)).with_value(at(12, 15, 0));
        let mut h = ComponentHarness::new(panel);
        assert!(h.send(Message::Pick(10)).is_empty());
        assert_eq!(h.component().value(), Some(at(12, 15, 0)));
    }

    #[test]
    fn pick_without_date_is_inert() {
        let mut panel = TimePanel::new();
        assert!(panel.update(Message::Pick(3)).is_none());
    }

    #[test]
    fn scroll_keeps_two_rows_above() {
        let mut panel = TimePanel::new().with_now(at(1, 0, 0)).with_value(at(12, 14, 30));
        panel.update(Message::ScrollToSelected);
        assert_eq!(panel.scroll_offset(), 85);
        assert_eq!(panel.cursor(), 87);
    }

    #[test]
    fn keyboard_skips_past_slots() {
        let mut panel = TimePanel::new().with_now(at(12, 14, 35)).with_value(at(12, 15, 0));
        panel.scroll_to_selected();
        panel.focus();
        panel.update(Message::KeyPress(key(KeyCode::Up)));
        panel.update(Message::KeyPress(key(KeyCode::Up)));
        assert_eq!(panel.cursor(), 88);
        panel.update(Message::KeyPress(key(KeyCode::Up)));
        // Wraps to the end of the day instead of entering the past.
        assert_eq!(panel.cursor(), SLOTS_PER_DAY - 1);
    }

    #[test]
    fn renders_header_and_selected_slot() {
        let mut panel = TimePanel::new().with_now(at(1, 0, 0)).with_value(at(12, 14, 30));
        panel.scroll_to_selected();
        let h = ComponentHarness::new(panel);
        let out = h.render_string(10, 9);
        assert!(out.contains("Time"));
        assert!(out.contains("14:30"));
        assert!(out.contains("14:10"));
    }

    proptest! {
        #[test]
        fn index_round_trips_through_time(index in 0usize..SLOTS_PER_DAY) {
            let time = slot_time(index).unwrap();
            prop_assert_eq!(slot_index(time), index);
            prop_assert_eq!(slot_label(index), time.format("%H:%M").to_string());
        }

        #[test]
        fn other_days_never_disable(index in 0usize..SLOTS_PER_DAY, h in 0u32..24, m in 0u32..60, day in 1u32..28) {
            let now = at(28, h, m);
            prop_assert!(!is_slot_disabled(index, Some(at(day, 12, 0)), now));
        }

        #[test]
        fn today_disables_exactly_the_past(index in 0usize..SLOTS_PER_DAY, h in 0u32..24, m in 0u32..60) {
            let now = at(12, h, m);
            let start = slot_time(index).unwrap();
            prop_assert_eq!(
                is_slot_disabled(index, Some(at(12, 0, 0)), now),
                start < NaiveTime::from_hms_opt(h, m, 0).unwrap()
            );
        }
    }
}
