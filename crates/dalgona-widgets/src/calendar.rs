//! Month-grid calendar with single and range selection.
//!
//! Weeks start on Sunday and the leading and trailing days of the adjacent
//! months are shown. Navigation is bounded: the last reachable month is
//! December ten years after the current year.
//!
//! In [`CalendarMode::Single`] a pick updates the selection and emits
//! [`Message::Selected`]. In [`CalendarMode::Range`] the calendar only
//! [`propose`](crate::range::propose)s a range from the click and emits
//! [`Message::RangeProposed`]; the host reconciles it and hands the result
//! back through [`Calendar::set_range`].

use crate::palette::{tone, Hue, Shade, WHITE};
use crate::range::{self, DateRange};
use crate::text;
use crate::variant::{Look, Variant};
use chrono::{Datelike, Duration, Local, Months, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dalgona_core::{AccessNode, Accessible, Command, Component, Current, Role};
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Years reachable after the current one.
pub const YEARS_AHEAD: i32 = 10;
/// Years reachable before the current one.
pub const YEARS_BEHIND: i32 = 100;

pub type DisabledDate = Box<dyn Fn(NaiveDate) -> bool + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarMode {
    #[default]
    Single,
    Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarSize {
    #[default]
    Sm,
    Base,
    Md,
}

impl Variant for CalendarSize {
    fn look(self) -> Look {
        let look = Look::new().fg(tone(Hue::Gray, Shade::S800)).bg(WHITE);
        match self {
            CalendarSize::Sm => look.pad_x(1),
            CalendarSize::Base => look.pad_x(1),
            CalendarSize::Md => look.pad_x(2),
        }
    }
}

impl CalendarSize {
    /// Columns per day cell.
    pub fn cell_width(self) -> u16 {
        match self {
            CalendarSize::Sm => 4,
            CalendarSize::Base | CalendarSize::Md => 5,
        }
    }
}

/// Per-day state that decides how a day cell is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayModifiers {
    pub selected: bool,
    pub range_start: bool,
    pub range_middle: bool,
    pub range_end: bool,
    pub today: bool,
    pub outside: bool,
    pub disabled: bool,
    pub focused: bool,
}

impl DayModifiers {
    /// Resolve the day-button look. Later rules override earlier ones.
    pub fn look(&self) -> Look {
        let mut look = Look::new().fg(tone(Hue::Gray, Shade::S800));
        let ranged = self.range_start || self.range_end || self.range_middle;
        if self.today {
            look = look.bg(tone(Hue::Gray, Shade::S100));
        }
        if self.outside && !self.selected && !ranged {
            look = look.fg(tone(Hue::Gray, Shade::S200));
        }
        if self.range_middle {
            look = look
                .bg(tone(Hue::Blue, Shade::S50))
                .fg(tone(Hue::Gray, Shade::S800));
            if self.outside {
                look = look.bg(tone(Hue::Blue, Shade::S100));
            }
        }
        if self.range_start || self.range_end || (self.selected && !ranged) {
            look = look.bg(tone(Hue::Blue, Shade::S500)).fg(WHITE);
        }
        if self.disabled {
            look = look.dimmed();
        }
        if self.focused {
            look = look.add(Modifier::UNDERLINED | Modifier::BOLD);
        }
        look
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    KeyPress(KeyEvent),
    /// Pointer activation of a day.
    Pick(NaiveDate),
    PrevMonth,
    NextMonth,
    /// Show the month containing the given day.
    ShowMonth(NaiveDate),
    /// Single mode: the new selection; `None` when the selected day was
    /// picked again.
    Selected(Option<NaiveDate>),
    /// Range mode: the range proposed by a pick.
    RangeProposed(Option<DateRange>),
    /// Emitted with the first day of the newly shown month.
    MonthChanged(NaiveDate),
}

pub struct Calendar {
    mode: CalendarMode,
    size: CalendarSize,
    today: NaiveDate,
    month: NaiveDate,
    cursor: NaiveDate,
    selected: Option<NaiveDate>,
    range: Option<DateRange>,
    disabled_date: Option<DisabledDate>,
    show_outside_days: bool,
    focus: bool,
    look: Look,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new(CalendarMode::default())
    }
}

fn first_of_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

fn days_in_month(first: NaiveDate) -> i64 {
    first
        .checked_add_months(Months::new(1))
        .map_or(31, |next| (next - first).num_days())
}

impl Calendar {
    pub fn new(mode: CalendarMode) -> Self {
        Self::with_today_in(mode, Local::now().date_naive())
    }

    fn with_today_in(mode: CalendarMode, today: NaiveDate) -> Self {
        Self {
            mode,
            size: CalendarSize::default(),
            today,
            month: first_of_month(today),
            cursor: today,
            selected: None,
            range: None,
            disabled_date: None,
            show_outside_days: true,
            focus: false,
            look: Look::new(),
        }
    }

    /// Pin "today"; navigation bounds follow it.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        if self.selected.is_none() && self.range.is_none() {
            self.show(today);
        }
        self
    }

    /// Move "today" without changing the shown month.
    pub fn set_today(&mut self, today: NaiveDate) {
        if today != self.today {
            tracing::debug!(%today, "calendar day rolled over");
            self.today = today;
        }
    }

    pub fn with_size(mut self, size: CalendarSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_selected(mut self, day: NaiveDate) -> Self {
        self.set_selected(Some(day));
        self
    }

    pub fn with_range(mut self, range: DateRange) -> Self {
        self.set_range(Some(range));
        self
    }

    pub fn with_disabled_date(mut self, predicate: DisabledDate) -> Self {
        self.disabled_date = Some(predicate);
        self
    }

    pub fn with_outside_days(mut self, show: bool) -> Self {
        self.show_outside_days = show;
        self
    }

    pub fn with_look(mut self, look: Look) -> Self {
        self.look = look;
        self
    }

    pub fn mode(&self) -> CalendarMode {
        self.mode
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// First day of the shown month.
    pub fn month(&self) -> NaiveDate {
        self.month
    }

    /// The keyboard-focused day.
    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn range(&self) -> Option<&DateRange> {
        self.range.as_ref()
    }

    /// Select a day and show its month.
    pub fn set_selected(&mut self, day: Option<NaiveDate>) {
        self.selected = day;
        if let Some(day) = day {
            self.show(day);
        }
    }

    /// Replace the shown range; the month follows its start.
    pub fn set_range(&mut self, range: Option<DateRange>) {
        self.range = range;
        if let Some(from) = range.and_then(|r| r.from) {
            self.show(from);
        }
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    /// First reachable month.
    pub fn start_month(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.today.year() - YEARS_BEHIND, 1, 1).unwrap_or(self.today)
    }

    /// Last reachable month: December, ten years ahead.
    pub fn end_month(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.today.year() + YEARS_AHEAD, 12, 1).unwrap_or(self.today)
    }

    fn last_day(&self) -> NaiveDate {
        let end = self.end_month();
        end + Duration::days(days_in_month(end) - 1)
    }

    pub fn is_disabled(&self, day: NaiveDate) -> bool {
        self.disabled_date.as_ref().is_some_and(|f| f(day))
    }

    fn in_bounds(&self, day: NaiveDate) -> bool {
        day >= self.start_month() && day <= self.last_day()
    }

    /// Show the month holding `day` and put the cursor there. Returns whether
    /// the month changed.
    fn show(&mut self, day: NaiveDate) -> bool {
        let day = day.clamp(self.start_month(), self.last_day());
        self.cursor = day;
        let month = first_of_month(day);
        let changed = month != self.month;
        self.month = month;
        changed
    }

    fn show_cmd(&mut self, day: NaiveDate) -> Command<Message> {
        if self.show(day) {
            Command::message(Message::MonthChanged(self.month))
        } else {
            Command::none()
        }
    }

    /// Every day drawn in the grid, Sunday first, whole weeks.
    pub fn grid(&self) -> Vec<NaiveDate> {
        let lead = self.month.weekday().num_days_from_sunday() as i64;
        let start = self.month - Duration::days(lead);
        let weeks = (lead + days_in_month(self.month) + 6) / 7;
        (0..weeks * 7).map(|i| start + Duration::days(i)).collect()
    }

    pub fn weeks(&self) -> u16 {
        (self.grid().len() / 7) as u16
    }

    pub fn modifiers(&self, day: NaiveDate) -> DayModifiers {
        let mut m = DayModifiers {
            today: day == self.today,
            outside: first_of_month(day) != self.month,
            disabled: self.is_disabled(day),
            focused: self.focus && day == self.cursor,
            ..DayModifiers::default()
        };
        match self.mode {
            CalendarMode::Single => m.selected = self.selected == Some(day),
            CalendarMode::Range => {
                if let Some(r) = &self.range {
                    m.range_start = r.from == Some(day);
                    m.range_end = r.to == Some(day);
                    m.range_middle = matches!((r.from, r.to), (Some(f), Some(t)) if f < day && day < t);
                    m.selected = m.range_start || m.range_end || m.range_middle;
                }
            }
        }
        m
    }

    /// Columns needed to draw the grid.
    pub fn width(&self) -> u16 {
        let pad = self.size.look().merge(self.look).pad_x.unwrap_or(0);
        self.size.cell_width() * 7 + pad * 2
    }

    /// Rows: caption, weekday header, weeks.
    pub fn height(&self) -> u16 {
        2 + self.weeks()
    }

    fn pick(&mut self, day: NaiveDate) -> Command<Message> {
        if !self.in_bounds(day) {
            tracing::debug!(%day, "day outside the navigable months");
            return Command::none();
        }
        if self.is_disabled(day) {
            tracing::debug!(%day, "disabled day");
            return Command::none();
        }
        let shown = self.show_cmd(day);
        let picked = match self.mode {
            CalendarMode::Single => {
                let next = if self.selected == Some(day) {
                    None
                } else {
                    Some(day)
                };
                self.selected = next;
                Command::message(Message::Selected(next))
            }
            CalendarMode::Range => {
                Command::message(Message::RangeProposed(range::propose(day, self.range.as_ref())))
            }
        };
        Command::batch([picked, shown])
    }

    /// Move the cursor by `step` days, passing over disabled days.
    fn step_cursor(&mut self, step: i64) -> Command<Message> {
        let mut day = self.cursor;
        for _ in 0..366 {
            let Some(next) = day.checked_add_signed(Duration::days(step)) else {
                break;
            };
            if !self.in_bounds(next) {
                break;
            }
            day = next;
            if !self.is_disabled(day) {
                return self.show_cmd(day);
            }
        }
        Command::none()
    }

    fn step_month(&mut self, forward: bool) -> Command<Message> {
        let moved = if forward {
            self.cursor.checked_add_months(Months::new(1))
        } else {
            self.cursor.checked_sub_months(Months::new(1))
        };
        match moved {
            Some(day) if self.in_bounds(day) => self.show_cmd(day),
            _ => {
                tracing::debug!(forward, "month navigation at bound");
                Command::none()
            }
        }
    }
}

impl Component for Calendar {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus => match key.code {
                KeyCode::Left => self.step_cursor(-1),
                KeyCode::Right => self.step_cursor(1),
                KeyCode::Up => self.step_cursor(-7),
                KeyCode::Down => self.step_cursor(7),
                KeyCode::PageUp if key.modifiers.contains(KeyModifiers::SHIFT) => {
                    match self.cursor.checked_sub_months(Months::new(12)) {
                        Some(day) if self.in_bounds(day) => self.show_cmd(day),
                        _ => Command::none(),
                    }
                }
                KeyCode::PageDown if key.modifiers.contains(KeyModifiers::SHIFT) => {
                    match self.cursor.checked_add_months(Months::new(12)) {
                        Some(day) if self.in_bounds(day) => self.show_cmd(day),
                        _ => Command::none(),
                    }
                }
                KeyCode::PageUp => self.step_month(false),
                KeyCode::PageDown => self.step_month(true),
                KeyCode::Home => {
                    let back = self.cursor.weekday().num_days_from_sunday() as i64;
                    self.show_cmd(self.cursor - Duration::days(back))
                }
                KeyCode::End => {
                    let ahead = 6 - self.cursor.weekday().num_days_from_sunday() as i64;
                    self.show_cmd(self.cursor + Duration::days(ahead))
                }
                KeyCode::Enter | KeyCode::Char(' ') => self.pick(self.cursor),
                _ => Command::none(),
            },
            Message::Pick(day) => self.pick(day),
            Message::PrevMonth => {
                let target = self.month.checked_sub_months(Months::new(1));
                match target {
                    Some(m) if m >= self.start_month() => self.show_cmd(m),
                    _ => Command::none(),
                }
            }
            Message::NextMonth => {
                let target = self.month.checked_add_months(Months::new(1));
                match target {
                    Some(m) if m <= self.end_month() => self.show_cmd(m),
                    _ => Command::none(),
                }
            }
            Message::ShowMonth(day) => self.show_cmd(day),
            Message::KeyPress(_)
            | Message::Selected(_)
            | Message::RangeProposed(_)
            | Message::MonthChanged(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let look = self.size.look().merge(self.look);
        let pad = look.pad_x.unwrap_or(0);
        let cell = self.size.cell_width() as usize;
        let inner = Rect {
            x: area.x + pad.min(area.width),
            width: area.width.saturating_sub(pad * 2),
            ..area
        };
        frame.render_widget(Paragraph::new("").style(look.style()), area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }
        let base = look.style();
        let muted = base.fg(tone(Hue::Gray, Shade::S500));
        let grid_width = cell * 7;

        let caption = self.month.format("%Y.%m").to_string();
        let prev_style = if self.month <= self.start_month() {
            muted.add_modifier(Modifier::DIM)
        } else {
            muted
        };
        let next_style = if self.month >= self.end_month() {
            muted.add_modifier(Modifier::DIM)
        } else {
            muted
        };
        let gap = grid_width.saturating_sub(text::width(&caption) + 2);
        let left = gap / 2;
        let mut rows = vec![Line::from(vec![
            Span::styled("‹", prev_style),
            Span::styled(" ".repeat(left), base),
            Span::styled(caption, base.add_modifier(Modifier::BOLD)),
            Span::styled(" ".repeat(gap - left), base),
            Span::styled("›", next_style),
        ])];

        rows.push(Line::from(
            WEEKDAYS
                .iter()
                .map(|w| Span::styled(format!("{w:^cell$}"), muted))
                .collect::<Vec<_>>(),
        ));

        for week in self.grid().chunks(7) {
            let spans: Vec<Span> = week
                .iter()
                .map(|&day| {
                    let m = self.modifiers(day);
                    if m.outside && !self.show_outside_days {
                        return Span::styled(" ".repeat(cell), base);
                    }
                    let style = base.patch(m.look().style());
                    Span::styled(format!("{:^cell$}", day.day()), style)
                })
                .collect();
            rows.push(Line::from(spans));
        }
        frame.render_widget(Paragraph::new(rows).style(base), inner);
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

impl Accessible for Calendar {
    fn access_node(&self) -> AccessNode {
        let cells = self.grid().into_iter().map(|day| {
            let m = self.modifiers(day);
            AccessNode::new(Role::GridCell)
                .label(day.format("%Y-%m-%d").to_string())
                .selected(m.selected)
                .disabled(m.disabled)
                .hidden(m.outside && !self.show_outside_days)
                .current(m.today.then_some(Current::Date))
        });
        AccessNode::new(Role::Grid)
            .label(self.month.format("%B %Y").to_string())
            .child(
                AccessNode::new(Role::Button)
                    .label("Previous month")
                    .disabled(self.month <= self.start_month()),
            )
            .child(
                AccessNode::new(Role::Button)
                    .label("Next month")
                    .disabled(self.month >= self.end_month()),
            )
            .children(cells)
    }
}
