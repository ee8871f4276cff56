//! # Gallery
//!
//! Mounts a handful of dalgona components on one screen:
//! - Heading with tabs, breadcrumb, badge and an action
//! - Single date-time picker and a date-range picker
//! - Dropdown, tabs, pagination and a step indicator
//!
//! `Ctrl+N` / `Ctrl+P` move focus, `Ctrl+Q` quits. Events are logged to
//! `gallery.log`; set `RUST_LOG=debug` to see every interaction decision.
//!
//! Run with: `cargo run --example gallery`

use std::time::Duration;

use chrono::Local;
use dalgona::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use dalgona::ratatui::layout::{Constraint, Layout};
use dalgona::ratatui::style::{Color, Style};
use dalgona::ratatui::widgets::Paragraph;
use dalgona::ratatui::Frame;
use dalgona::widgets::badge::Badge;
use dalgona::widgets::breadcrumb::{Breadcrumb, Crumb};
use dalgona::widgets::button::{Button, ButtonSize, ButtonVariant};
use dalgona::widgets::date_picker::{self, DatePicker, TimeType};
use dalgona::widgets::dropdown::{self, Dropdown, DropdownItem};
use dalgona::widgets::heading::{self, Heading, HeadingTab, HeadingTabState};
use dalgona::widgets::pagination::{self, Pagination};
use dalgona::widgets::steps::Steps;
use dalgona::widgets::tabs::{self, TabItem, Tabs};
use dalgona::{
    run_with, terminal_events, Command, Component, LogConfig, Model, ProgramOptions, Subscription,
};

const FIELDS: usize = 5;

struct Gallery {
    heading: Heading,
    when: DatePicker,
    stay: DatePicker,
    plan: Dropdown,
    tabs: Tabs,
    pages: Pagination,
    steps: Steps,
    focus: usize,
    status: String,
}

#[derive(Debug)]
enum Msg {
    Key(KeyEvent),
    Heading(heading::Message),
    When(date_picker::Message),
    Stay(date_picker::Message),
    Plan(dropdown::Message),
    Tabs(tabs::Message),
    Pages(pagination::Message),
    Clock,
    FocusNext,
    FocusPrev,
    Quit,
}

impl Gallery {
    fn apply_focus(&mut self) {
        self.when.blur();
        self.stay.blur();
        self.plan.blur();
        self.tabs.blur();
        self.pages.blur();
        match self.focus {
            0 => self.when.focus(),
            1 => self.stay.focus(),
            2 => self.plan.focus(),
            3 => self.tabs.focus(),
            _ => self.pages.focus(),
        }
    }

    fn refresh_steps(&mut self) {
        let step = if self.when.value().is_none() {
            1
        } else if self.plan.value().is_none() {
            2
        } else {
            3
        };
        self.steps.set_current_step(step);
    }

    fn key(&mut self, key: KeyEvent) -> Command<Msg> {
        match key.code {
            KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => match c {
                'q' | 'c' => Command::message(Msg::Quit),
                'n' => Command::message(Msg::FocusNext),
                'p' => Command::message(Msg::FocusPrev),
                _ => Command::none(),
            },
            _ => match self.focus {
                0 => Command::message(Msg::When(date_picker::Message::KeyPress(key))),
                1 => Command::message(Msg::Stay(date_picker::Message::KeyPress(key))),
                2 => Command::message(Msg::Plan(dropdown::Message::KeyPress(key))),
                3 => Command::message(Msg::Tabs(tabs::Message::KeyPress(key))),
                _ => Command::message(Msg::Pages(pagination::Message::KeyPress(key))),
            },
        }
    }
}

impl Model for Gallery {
    type Message = Msg;
    type Flags = ();

    fn init(_: ()) -> (Self, Command<Msg>) {
        let heading = Heading::tabbed([
            HeadingTab::new("Components", HeadingTabState::Active),
            HeadingTab::new("Tokens", HeadingTabState::Inactive),
        ])
        .with_breadcrumb(Breadcrumb::new([Crumb::link("Home"), Crumb::page("Gallery")]))
        .with_badge(Badge::new("Preview"))
        .with_action(
            Button::new("Reset")
                .with_size(ButtonSize::Sm)
                .with_variant(ButtonVariant::SecondaryGray),
        )
        .with_bottom_text("Ctrl+N / Ctrl+P to move focus, Ctrl+Q to quit");

        let when = DatePicker::single()
            .with_time_type(TimeType::Panel)
            .with_placeholder("Departure")
            .with_now(Local::now().naive_local());
        let stay = DatePicker::range()
            .with_placeholder("date")
            .with_reset_notification(true);
        let plan = Dropdown::new(
            vec![
                DropdownItem::new("basic", "Basic"),
                DropdownItem::new("plus", "Plus"),
                DropdownItem::new("team", "Team"),
                DropdownItem::new("legacy", "Legacy").disabled(true),
            ],
            "Choose a plan",
        );
        let tabs = Tabs::new(vec![
            TabItem::new("summary", "Summary").content("Nothing booked yet."),
            TabItem::new("history", "History").badge("3"),
            TabItem::new("archive", "Archive").disabled(true),
        ]);

        let mut gallery = Gallery {
            heading,
            when,
            stay,
            plan,
            tabs,
            pages: Pagination::new(123).with_total_text(true),
            steps: Steps::new(["Date", "Plan", "Confirm"]),
            focus: 0,
            status: String::new(),
        };
        gallery.apply_focus();
        (gallery, Command::none())
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Key(key) => self.key(key),
            Msg::Heading(heading::Message::TabSelected(index)) => {
                self.heading.set_active_tab(index);
                Command::none()
            }
            Msg::Heading(heading::Message::ActionPressed(_)) => {
                self.when.set_value(None);
                self.stay.set_range(None);
                self.plan.set_value(None);
                self.refresh_steps();
                self.status = "cleared".into();
                Command::none()
            }
            Msg::Heading(m) => self.heading.update(m).map(Msg::Heading),
            Msg::When(m) => {
                if let date_picker::Message::Changed(at) = &m {
                    self.status = format!("departure {at}");
                }
                let cmd = self.when.update(m).map(Msg::When);
                self.refresh_steps();
                cmd
            }
            Msg::Stay(m) => {
                match &m {
                    date_picker::Message::RangeChanged(range) => {
                        self.status = format!("stay {range}");
                    }
                    date_picker::Message::Reset => self.status = "stay reset".into(),
                    _ => {}
                }
                self.stay.update(m).map(Msg::Stay)
            }
            Msg::Plan(m) => {
                if let dropdown::Message::Changed(value) = &m {
                    self.status = format!("plan {value}");
                }
                let cmd = self.plan.update(m).map(Msg::Plan);
                self.refresh_steps();
                cmd
            }
            Msg::Tabs(m) => self.tabs.update(m).map(Msg::Tabs),
            Msg::Pages(m) => {
                if let pagination::Message::PageChanged(page) = &m {
                    self.status = format!("page {page}");
                }
                self.pages.update(m).map(Msg::Pages)
            }
            Msg::Clock => {
                self.when.set_now(Local::now().naive_local());
                Command::none()
            }
            Msg::FocusNext => {
                self.focus = (self.focus + 1) % FIELDS;
                self.apply_focus();
                Command::none()
            }
            Msg::FocusPrev => {
                self.focus = (self.focus + FIELDS - 1) % FIELDS;
                self.apply_focus();
                Command::none()
            }
            Msg::Quit => {
                tracing::info!(status = %self.status, "gallery closing");
                Command::quit()
            }
        }
    }

    fn view(&self, frame: &mut Frame) {
        let [heading_area, steps_area, pickers_area, tabs_area, pages_area, status_area] =
            Layout::vertical([
                Constraint::Length(self.heading.height()),
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(frame.area());
        let [when_area, stay_area, plan_area] = Layout::horizontal([
            Constraint::Length(24),
            Constraint::Length(30),
            Constraint::Length(20),
        ])
        .spacing(2)
        .areas(pickers_area);

        self.heading.view(frame, heading_area);
        self.steps.view(frame, steps_area);
        self.tabs.view(frame, tabs_area);
        self.pages.view(frame, pages_area);
        frame.render_widget(
            Paragraph::new(self.status.as_str()).style(Style::default().fg(Color::DarkGray)),
            status_area,
        );

        // Popovers paint over whatever was drawn before them.
        self.plan.view(frame, plan_area);
        self.stay.view(frame, stay_area);
        self.when.view(frame, when_area);
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        vec![
            terminal_events(|event| match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => Some(Msg::Key(key)),
                _ => None,
            }),
            Subscription::every(Duration::from_secs(30), "clock", |_| Msg::Clock),
        ]
    }
}

#[tokio::main]
async fn main() {
    let options = ProgramOptions {
        title: Some("dalgona gallery".into()),
        log: Some(LogConfig::new("gallery.log")),
        ..ProgramOptions::default()
    };
    if let Err(err) = run_with::<Gallery>((), options).await {
        eprintln!("gallery: {err}");
    }
}
