//! Date picker: a trigger field that opens a calendar in a popover.
//!
//! [`DatePicker::single`] keeps one date-time. Picking a day keeps the time
//! of day already chosen, and the time can be set from a slot panel or a
//! typed `HH:MM` field. [`DatePicker::range`] keeps a [`DateRange`] and runs
//! every calendar click through [`range::reconcile`].

use crate::calendar::{self, Calendar, CalendarMode, CalendarSize, DisabledDate};
use crate::dropdown::status_of;
use crate::input::{self, Input, InputSize};
use crate::palette::{tone, Hue, Shade, WHITE};
use crate::popover::{Align, Popover};
use crate::range::{self, DateRange};
use crate::text;
use crate::time_panel::{self, TimePanel, TimePanelSize};
use crate::variant::{resolve, Edge, FieldStatus, Look, Variant};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use crossterm::event::{KeyCode, KeyEvent};
use dalgona_core::{AccessNode, Accessible, Command, Component, FrameId, Role};
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::fmt::Write as _;

pub const DEFAULT_PLACEHOLDER: &str = "Select date";
pub const DATE_FORMAT: &str = "%Y.%m.%d";
pub const DATE_TIME_FORMAT: &str = "%Y.%m.%d %H:%M";

/// How the time of day is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeType {
    #[default]
    None,
    /// A scrolling list of ten-minute slots beside the calendar.
    Panel,
    /// A typed `HH:MM` field under the calendar.
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatePickerSize {
    #[default]
    Sm,
    Base,
    Md,
}

impl Variant for DatePickerSize {
    fn look(self) -> Look {
        let look = Look::new().height(3).edge(Edge::Rounded);
        match self {
            DatePickerSize::Sm => look.pad_x(1),
            DatePickerSize::Base => look.pad_x(1),
            DatePickerSize::Md => look.pad_x(2),
        }
    }
}

impl DatePickerSize {
    fn calendar(self) -> CalendarSize {
        match self {
            DatePickerSize::Sm => CalendarSize::Sm,
            DatePickerSize::Base => CalendarSize::Base,
            DatePickerSize::Md => CalendarSize::Md,
        }
    }

    fn time_panel(self) -> TimePanelSize {
        match self {
            DatePickerSize::Sm => TimePanelSize::Sm,
            DatePickerSize::Base => TimePanelSize::Base,
            DatePickerSize::Md => TimePanelSize::Md,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    KeyPress(KeyEvent),
    /// Pointer activation of the trigger.
    Toggle,
    SetOpen(bool),
    Calendar(calendar::Message),
    Time(time_panel::Message),
    TimeInput(input::Message),
    /// Deferred: scroll the time panel to the chosen slot.
    ScrollTime,
    /// Single mode: the new date-time.
    Changed(NaiveDateTime),
    /// Range mode: the reconciled range.
    RangeChanged(DateRange),
    OpenChanged(bool),
    /// Range mode: the popover closed while reset notification is on.
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Value {
    Single(Option<NaiveDateTime>),
    Range(Option<DateRange>),
}

/// Which part of the open panel receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Calendar,
    Time,
}

pub struct DatePicker {
    value: Value,
    placeholder: String,
    format: Option<String>,
    time_type: TimeType,
    size: DatePickerSize,
    error: bool,
    disabled: bool,
    show_arrow: bool,
    bottom_text: Option<String>,
    notify_reset: bool,
    controlled_open: bool,
    popover: Popover,
    calendar: Calendar,
    time: TimePanel,
    time_input: Input,
    region: Region,
    scroll: FrameId,
    focus: bool,
    look: Look,
}

impl DatePicker {
    fn with_mode(value: Value, mode: CalendarMode) -> Self {
        Self {
            value,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            format: None,
            time_type: TimeType::None,
            size: DatePickerSize::default(),
            error: false,
            disabled: false,
            show_arrow: true,
            bottom_text: None,
            notify_reset: false,
            controlled_open: false,
            popover: Popover::new().with_align(Align::Start),
            calendar: Calendar::new(mode),
            time: TimePanel::new(),
            time_input: Input::new()
                .with_size(InputSize::Sm)
                .with_placeholder("HH:MM")
                .with_max_len(5)
                .with_label("Time"),
            region: Region::Calendar,
            scroll: FrameId::next(),
            focus: false,
            look: Look::new(),
        }
    }

    pub fn single() -> Self {
        Self::with_mode(Value::Single(None), CalendarMode::Single)
    }

    pub fn range() -> Self {
        Self::with_mode(Value::Range(None), CalendarMode::Range)
    }

    pub fn with_value(mut self, value: NaiveDateTime) -> Self {
        self.set_value(Some(value));
        self
    }

    pub fn with_range(mut self, range: DateRange) -> Self {
        self.set_range(Some(range));
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// A chrono `strftime` format for the trigger text.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_time_type(mut self, time_type: TimeType) -> Self {
        self.time_type = time_type;
        self
    }

    pub fn with_size(mut self, size: DatePickerSize) -> Self {
        self.size = size;
        self.calendar = std::mem::take(&mut self.calendar).with_size(size.calendar());
        self.time = std::mem::take(&mut self.time).with_size(size.time_panel());
        self
    }

    pub fn with_error(mut self, error: bool) -> Self {
        self.error = error;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_arrow(mut self, show: bool) -> Self {
        self.show_arrow = show;
        self
    }

    /// A line of text under the calendar.
    pub fn with_bottom_text(mut self, text: impl Into<String>) -> Self {
        self.bottom_text = Some(text.into());
        self
    }

    pub fn with_disabled_date(mut self, predicate: DisabledDate) -> Self {
        self.calendar = std::mem::take(&mut self.calendar).with_disabled_date(predicate);
        self
    }

    /// Range mode: emit [`Message::Reset`] whenever the popover closes.
    pub fn with_reset_notification(mut self, notify: bool) -> Self {
        self.notify_reset = notify;
        self
    }

    /// Open state owned by the host: open requests only emit
    /// [`Message::OpenChanged`] and the host answers with [`set_open`](Self::set_open).
    pub fn with_controlled_open(mut self, controlled: bool) -> Self {
        self.controlled_open = controlled;
        self
    }

    /// Pin the clock used for "today" and for past time slots.
    pub fn with_now(mut self, now: NaiveDateTime) -> Self {
        let today = now.date();
        self.calendar = std::mem::take(&mut self.calendar).with_today(today);
        self.time.set_now(now);
        match self.value {
            Value::Single(Some(v)) => self.calendar.set_selected(Some(v.date())),
            Value::Range(r) => self.calendar.set_range(r),
            Value::Single(None) => {}
        }
        self
    }

    pub fn with_look(mut self, look: Look) -> Self {
        self.look = look;
        self
    }

    /// Single mode value; `None` in range mode too.
    pub fn value(&self) -> Option<NaiveDateTime> {
        match self.value {
            Value::Single(v) => v,
            Value::Range(_) => None,
        }
    }

    /// Range mode value.
    pub fn range_value(&self) -> Option<DateRange> {
        match self.value {
            Value::Range(r) => r,
            Value::Single(_) => None,
        }
    }

    pub fn set_value(&mut self, value: Option<NaiveDateTime>) {
        let Value::Single(_) = self.value else {
            tracing::warn!("set_value on a range picker");
            return;
        };
        self.value = Value::Single(value);
        self.calendar.set_selected(value.map(|v| v.date()));
        self.time.set_value(value);
        self.sync_time_input();
    }

    pub fn set_range(&mut self, range: Option<DateRange>) {
        let Value::Range(_) = self.value else {
            tracing::warn!("set_range on a single picker");
            return;
        };
        let range = range.map(|r| match (r.from, r.to) {
            (Some(a), Some(b)) if b < a => DateRange::new(b, a),
            _ => r,
        });
        self.value = Value::Range(range);
        self.calendar.set_range(range);
    }

    /// Keep the clock current: past slots are disabled today and the
    /// calendar's today marker follows the date.
    pub fn set_now(&mut self, now: NaiveDateTime) {
        self.calendar.set_today(now.date());
        self.time.set_now(now);
    }

    pub fn is_open(&self) -> bool {
        self.popover.is_open()
    }

    /// Host side of controlled open state. Emits nothing.
    pub fn set_open(&mut self, open: bool) {
        self.popover.set_open(open);
        self.on_open_state(open);
    }

    pub fn scroll_frame(&self) -> FrameId {
        self.scroll
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn time_panel(&self) -> &TimePanel {
        &self.time
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    fn format_str(&self) -> &str {
        match (&self.format, self.time_type) {
            (Some(f), _) => f,
            (None, TimeType::None) => DATE_FORMAT,
            (None, _) => DATE_TIME_FORMAT,
        }
    }

    fn format(&self, value: NaiveDateTime) -> String {
        let mut out = String::new();
        if write!(out, "{}", value.format(self.format_str())).is_err() {
            tracing::warn!(format = %self.format_str(), "unusable date format");
            out.clear();
            let _ = write!(out, "{}", value.format(DATE_FORMAT));
        }
        out
    }

    fn format_day(&self, day: NaiveDate) -> String {
        self.format(day.and_time(NaiveTime::MIN))
    }

    /// Trigger text, `None` when the placeholder shows.
    pub fn display_text(&self) -> Option<String> {
        match self.value {
            Value::Single(v) => v.map(|v| self.format(v)),
            Value::Range(None) => None,
            Value::Range(Some(r)) if r.is_empty() => None,
            Value::Range(Some(r)) => {
                let from = r
                    .from
                    .map_or_else(|| format!("Start {}", self.placeholder), |d| self.format_day(d));
                let to = r
                    .to
                    .map_or_else(|| format!("End {}", self.placeholder), |d| self.format_day(d));
                Some(format!("{from} - {to}"))
            }
        }
    }

    fn sync_time_input(&mut self) {
        let text = self.value().map(|v| v.format("%H:%M").to_string()).unwrap_or_default();
        self.time_input.set_value(&text);
        self.time_input.set_error(false);
    }

    fn set_region(&mut self, region: Region) {
        self.region = region;
        self.calendar.blur();
        self.time.blur();
        self.time_input.blur();
        match region {
            Region::Calendar => self.calendar.focus(),
            Region::Time => match self.time_type {
                TimeType::Panel => self.time.focus(),
                TimeType::Input => self.time_input.focus(),
                TimeType::None => self.calendar.focus(),
            },
        }
    }

    fn on_open_state(&mut self, open: bool) {
        if open {
            self.set_region(Region::Calendar);
        } else {
            self.calendar.blur();
            self.time.blur();
            self.time_input.blur();
            self.sync_time_input();
        }
    }

    fn request_open(&mut self, open: bool) -> Command<Message> {
        if open && self.disabled {
            tracing::debug!("date picker is disabled");
            return Command::none();
        }
        if !self.controlled_open {
            if !self.popover.set_open(open) {
                return Command::none();
            }
            self.on_open_state(open);
        }
        let mut cmds = vec![Command::message(Message::OpenChanged(open))];
        if open {
            if self.time_type == TimeType::Panel && self.value().is_some() {
                cmds.push(Command::next_frame(self.scroll, Message::ScrollTime));
            }
        } else {
            cmds.push(Command::cancel_frame(self.scroll));
            if self.notify_reset && matches!(self.value, Value::Range(_)) {
                cmds.push(Command::message(Message::Reset));
            }
        }
        Command::batch(cmds)
    }

    fn pick_day(&mut self, day: NaiveDate) -> Command<Message> {
        let time = self.value().map_or(NaiveTime::MIN, |v| v.time());
        let next = day.and_time(time);
        self.value = Value::Single(Some(next));
        self.time.set_value(Some(next));
        self.sync_time_input();
        Command::message(Message::Changed(next))
    }

    fn apply_range(&mut self, proposed: Option<DateRange>) -> Command<Message> {
        let stored = self.range_value();
        let outcome = range::reconcile(stored.as_ref(), proposed);
        match outcome.range {
            Some(next) => {
                self.value = Value::Range(Some(next));
                self.calendar.set_range(Some(next));
                Command::message(Message::RangeChanged(next))
            }
            None => Command::none(),
        }
    }

    fn set_time(&mut self, next: NaiveDateTime) -> Command<Message> {
        self.value = Value::Single(Some(next));
        self.time.set_value(Some(next));
        self.sync_time_input();
        Command::message(Message::Changed(next))
    }

    fn route_calendar(&mut self, msg: calendar::Message) -> Command<Message> {
        let out = self.calendar.update(msg).messages();
        Command::batch(out.into_iter().map(|m| match m {
            calendar::Message::Selected(Some(day)) => self.pick_day(day),
            calendar::Message::Selected(None) => {
                // Re-picking the chosen day keeps it.
                let day = self.value().map(|v| v.date());
                self.calendar.set_selected(day);
                Command::none()
            }
            calendar::Message::RangeProposed(proposed) => self.apply_range(proposed),
            _ => Command::none(),
        }))
    }

    fn route_time(&mut self, msg: time_panel::Message) -> Command<Message> {
        let out = self.time.update(msg).messages();
        Command::batch(out.into_iter().map(|m| match m {
            time_panel::Message::Selected(next) => self.set_time(next),
            _ => Command::none(),
        }))
    }

    fn route_time_input(&mut self, msg: input::Message) -> Command<Message> {
        let out = self.time_input.update(msg).messages();
        Command::batch(out.into_iter().map(|m| match m {
            input::Message::Submitted(text) => self.submit_time(&text),
            _ => Command::none(),
        }))
    }

    fn submit_time(&mut self, text: &str) -> Command<Message> {
        let Some(current) = self.value() else {
            tracing::debug!("no date to put the time on");
            return Command::none();
        };
        match NaiveTime::parse_from_str(text.trim(), "%H:%M") {
            Ok(time) => self.set_time(current.date().and_time(time)),
            Err(err) => {
                tracing::debug!(input = %text, %err, "time input rejected");
                self.time_input.set_error(true);
                Command::none()
            }
        }
    }

    fn resolved_look(&self) -> Look {
        let status = status_of(self.error, self.disabled);
        let mut look = resolve([
            Look::new().bg(WHITE).fg(tone(Hue::Gray, Shade::S700)),
            self.size.look(),
            status.look(),
        ]);
        if self.popover.is_open() {
            look.bg = Some(tone(Hue::Gray, Shade::S50));
        }
        if (self.popover.is_open() || self.focus) && status == FieldStatus::Default {
            look.border = Some(tone(Hue::Blue, Shade::S400));
        }
        look.merge(self.look)
    }

    fn panel_size(&self) -> (u16, u16) {
        let single = matches!(self.value, Value::Single(_));
        let mut width = self.calendar.width();
        let mut height = self.calendar.height();
        if single && self.time_type == TimeType::Panel {
            width += self.time.width();
            height = height.max(self.time.height());
        }
        if single && self.time_type == TimeType::Input {
            height += 1;
        }
        if self.bottom_text.is_some() {
            height += 1;
        }
        (width + 2, height + 2)
    }

    fn paint_panel(&self, frame: &mut Frame, trigger: Rect) {
        let (width, height) = self.panel_size();
        let (panel, _) = self.popover.place(trigger, width, height, frame.area());
        let look = Look::new()
            .bg(WHITE)
            .border(tone(Hue::Gray, Shade::S300))
            .edge(Edge::Rounded);
        let inner = Popover::paint_surface(frame, panel, &look);
        let single = matches!(self.value, Value::Single(_));
        let cal = Rect {
            width: self.calendar.width().min(inner.width),
            height: self.calendar.height().min(inner.height),
            ..inner
        };
        self.calendar.view(frame, cal);
        let mut y = cal.bottom();
        if single && self.time_type == TimeType::Panel {
            let time = Rect {
                x: cal.right(),
                width: inner.right().saturating_sub(cal.right()),
                height: self.time.height().min(inner.height),
                ..inner
            };
            self.time.view(frame, time);
            y = y.max(time.bottom());
        }
        let muted = look.style().fg(tone(Hue::Gray, Shade::S500));
        if single && self.time_type == TimeType::Input && y < inner.bottom() {
            let label = "Time ";
            let row = Rect::new(inner.x + 1, y, inner.width.saturating_sub(1), 1);
            frame.render_widget(Paragraph::new(Span::styled(label, muted)), row);
            let field = Rect {
                x: row.x + label.len() as u16,
                width: 7.min(row.width.saturating_sub(label.len() as u16)),
                ..row
            };
            self.time_input.view(frame, field);
            y += 1;
        }
        if let Some(bottom) = &self.bottom_text {
            if y < inner.bottom() {
                let row = Rect::new(inner.x + 1, y, inner.width.saturating_sub(1), 1);
                let shown = text::truncate(bottom, row.width as usize);
                frame.render_widget(Paragraph::new(Span::styled(shown, muted)), row);
            }
        }
    }
}

impl Component for DatePicker {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(_) | Message::Toggle | Message::SetOpen(true) if self.disabled => {
                tracing::debug!("date picker is disabled");
                Command::none()
            }
            Message::KeyPress(key) if self.focus => {
                if !self.popover.is_open() {
                    return match key.code {
                        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => self.request_open(true),
                        _ => Command::none(),
                    };
                }
                match key.code {
                    KeyCode::Esc => self.request_open(false),
                    KeyCode::Tab if self.time_type != TimeType::None
                        && matches!(self.value, Value::Single(_)) =>
                    {
                        let next = match self.region {
                            Region::Calendar => Region::Time,
                            Region::Time => Region::Calendar,
                        };
                        self.set_region(next);
                        Command::none()
                    }
                    _ => match (self.region, self.time_type) {
                        (Region::Time, TimeType::Panel) => self.route_time(time_panel::Message::KeyPress(key)),
                        (Region::Time, TimeType::Input) => {
                            self.route_time_input(input::Message::KeyPress(key))
                        }
                        _ => self.route_calendar(calendar::Message::KeyPress(key)),
                    },
                }
            }
            Message::Toggle => self.request_open(!self.popover.is_open()),
            Message::SetOpen(open) => self.request_open(open),
            Message::Calendar(msg) if self.popover.is_open() => self.route_calendar(msg),
            Message::Time(msg) if self.popover.is_open() => self.route_time(msg),
            Message::TimeInput(msg) if self.popover.is_open() => self.route_time_input(msg),
            Message::ScrollTime => {
                self.time.scroll_to_selected();
                Command::none()
            }
            Message::KeyPress(_)
            | Message::Calendar(_)
            | Message::Time(_)
            | Message::TimeInput(_)
            | Message::Changed(_)
            | Message::RangeChanged(_)
            | Message::OpenChanged(_)
            | Message::Reset => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let look = self.resolved_look();
        let trigger = look.fit(area);
        let inner = look.paint(frame, trigger);
        if inner.width > 0 && inner.height > 0 {
            let (label, muted) = match self.display_text() {
                Some(text) => (text, false),
                None => (self.placeholder.clone(), true),
            };
            let arrow = if self.show_arrow { 2 } else { 0 };
            let room = (inner.width as usize).saturating_sub(arrow);
            let shown = text::truncate(&label, room);
            let pad = room.saturating_sub(text::width(&shown));
            let mut text_style = look.style();
            if muted {
                text_style = text_style.fg(tone(Hue::Gray, Shade::S400));
            }
            let mut spans = vec![
                Span::styled(shown, text_style),
                Span::styled(" ".repeat(pad), look.style()),
            ];
            if self.show_arrow {
                let glyph = if self.popover.is_open() { " ▴" } else { " ▾" };
                spans.push(Span::styled(glyph, look.style().fg(tone(Hue::Gray, Shade::S500))));
            }
            frame.render_widget(Paragraph::new(Line::from(spans)), Rect { height: 1, ..inner });
        }
        if self.popover.is_open() {
            self.paint_panel(frame, trigger);
        }
    }

    fn focused(&self) -> bool {
        self.focus
    }

    fn unmount(&mut self) -> Command<Message> {
        self.popover.set_open(false);
        Command::cancel_frame(self.scroll)
    }
}

impl Accessible for DatePicker {
    fn access_node(&self) -> AccessNode {
        let label = self.display_text().unwrap_or_else(|| self.placeholder.clone());
        let node = AccessNode::new(Role::Button)
            .label(label)
            .expanded(self.popover.is_open())
            .disabled(self.disabled)
            .invalid(self.error);
        if !self.popover.is_open() {
            return node;
        }
        let mut dialog = AccessNode::new(Role::Dialog).child(self.calendar.access_node());
        if matches!(self.value, Value::Single(_)) {
            match self.time_type {
                TimeType::Panel => dialog = dialog.child(self.time.access_node()),
                TimeType::Input => dialog = dialog.child(self.time_input.access_node()),
                TimeType::None => {}
            }
        }
        node.child(dialog)
    }
}
