//! Style-variant resolution.
//!
//! Each component declares small enums for its style buckets (variant, size,
//! theme, status). Every bucket value maps to a fixed [`Look`] through the
//! [`Variant`] trait, and a component's final look is the left-to-right
//! [`merge`](Look::merge) of its bucket looks followed by the caller's
//! override, so the caller always wins.
//!
//! ```rust,ignore
//! let look = resolve([
//!     ButtonVariant::Primary.look(),
//!     ButtonSize::Sm.look(),
//!     Look::new().bg(palette::tone(Hue::Pink, Shade::S500)), // override
//! ]);
//! ```

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::border;
use ratatui::widgets::{Block, BorderType, Padding};
use ratatui::Frame;

/// Border drawing style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Plain,
    Rounded,
    Thick,
    Dashed,
}

const DASHED: border::Set = border::Set {
    top_left: "┌",
    top_right: "┐",
    bottom_left: "└",
    bottom_right: "┘",
    vertical_left: "╎",
    vertical_right: "╎",
    horizontal_top: "╌",
    horizontal_bottom: "╌",
};

/// A resolved set of visual properties. `None` fields inherit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Look {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub border: Option<Color>,
    pub edge: Option<Edge>,
    pub modifiers: Modifier,
    /// Rows, borders included.
    pub height: Option<u16>,
    /// Columns, borders included. `None` sizes to content.
    pub width: Option<u16>,
    /// Horizontal padding inside the border, per side.
    pub pad_x: Option<u16>,
}

impl Default for Look {
    fn default() -> Self {
        Self::new()
    }
}

impl Look {
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            border: None,
            edge: None,
            modifiers: Modifier::empty(),
            height: None,
            width: None,
            pad_x: None,
        }
    }

    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Border color. Only drawn when an [`Edge`] is set.
    pub const fn border(mut self, color: Color) -> Self {
        self.border = Some(color);
        self
    }

    pub const fn edge(mut self, edge: Edge) -> Self {
        self.edge = Some(edge);
        self
    }

    pub fn add(mut self, modifier: Modifier) -> Self {
        self.modifiers |= modifier;
        self
    }

    pub const fn height(mut self, rows: u16) -> Self {
        self.height = Some(rows);
        self
    }

    pub const fn width(mut self, cols: u16) -> Self {
        self.width = Some(cols);
        self
    }

    pub const fn pad_x(mut self, cols: u16) -> Self {
        self.pad_x = Some(cols);
        self
    }

    /// Layer `other` on top of `self`: its set fields win, modifiers add up.
    pub fn merge(self, other: Look) -> Look {
        Look {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            border: other.border.or(self.border),
            edge: other.edge.or(self.edge),
            modifiers: self.modifiers | other.modifiers,
            height: other.height.or(self.height),
            width: other.width.or(self.width),
            pad_x: other.pad_x.or(self.pad_x),
        }
    }

    /// Disabled rendering: dim everything.
    pub fn dimmed(self) -> Look {
        self.add(Modifier::DIM)
    }

    pub fn style(&self) -> Style {
        let mut style = Style::default().add_modifier(self.modifiers);
        if let Some(fg) = self.fg {
            style = style.fg(fg);
        }
        if let Some(bg) = self.bg {
            style = style.bg(bg);
        }
        style
    }

    pub fn has_border(&self) -> bool {
        self.edge.is_some()
    }

    /// Rows taken by the border, top and bottom combined.
    pub fn chrome_rows(&self) -> u16 {
        if self.has_border() {
            2
        } else {
            0
        }
    }

    /// Columns taken by border and padding, both sides combined.
    pub fn chrome_cols(&self) -> u16 {
        let border = if self.has_border() { 2 } else { 0 };
        border + self.pad_x.unwrap_or(0) * 2
    }

    pub fn block(&self) -> Block<'static> {
        let mut block = Block::default()
            .style(self.style())
            .padding(Padding::horizontal(self.pad_x.unwrap_or(0)));
        if self.has_border() {
            let edge_color = self.border.or(self.bg).or(self.fg).unwrap_or(Color::Reset);
            let border_style = Style::default().fg(edge_color);
            block = block.borders(ratatui::widgets::Borders::ALL).border_style(border_style);
            block = match self.edge.unwrap_or(Edge::Plain) {
                Edge::Plain => block.border_type(BorderType::Plain),
                Edge::Rounded => block.border_type(BorderType::Rounded),
                Edge::Thick => block.border_type(BorderType::Thick),
                Edge::Dashed => block.border_set(DASHED),
            };
        }
        block
    }

    /// Paint the background, border and padding into `area`; return the content area.
    pub fn paint(&self, frame: &mut Frame, area: Rect) -> Rect {
        let block = self.block();
        let inner = block.inner(area);
        frame.render_widget(block, area);
        inner
    }

    /// Clamp `area` to this look's fixed height and width, anchored top-left.
    pub fn fit(&self, area: Rect) -> Rect {
        Rect {
            width: self.width.map_or(area.width, |w| w.min(area.width)),
            height: self.height.map_or(area.height, |h| h.min(area.height)),
            ..area
        }
    }
}

/// A style-bucket value that resolves to a [`Look`].
pub trait Variant: Copy {
    fn look(self) -> Look;
}

/// Merge looks left to right.
pub fn resolve(looks: impl IntoIterator<Item = Look>) -> Look {
    looks.into_iter().fold(Look::new(), Look::merge)
}

/// Status shared by form fields (dropdown triggers, date picker, input).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldStatus {
    #[default]
    Default,
    Error,
    Disabled,
}

impl Variant for FieldStatus {
    fn look(self) -> Look {
        use crate::palette::{tone, Hue, Shade};
        match self {
            FieldStatus::Default => Look::new()
                .fg(tone(Hue::Gray, Shade::S900))
                .border(tone(Hue::Gray, Shade::S300)),
            FieldStatus::Error => Look::new()
                .fg(tone(Hue::Gray, Shade::S900))
                .border(tone(Hue::Red, Shade::S500)),
            FieldStatus::Disabled => Look::new()
                .fg(tone(Hue::Gray, Shade::S400))
                .bg(tone(Hue::Gray, Shade::S100))
                .border(tone(Hue::Gray, Shade::S200))
                .add(Modifier::DIM),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_last_writer_wins() {
        let base = Look::new().fg(Color::Red).height(3).pad_x(1);
        let over = Look::new().fg(Color::Blue).add(Modifier::BOLD);
        let merged = base.merge(over);
        assert_eq!(merged.fg, Some(Color::Blue));
        assert_eq!(merged.height, Some(3));
        assert_eq!(merged.pad_x, Some(1));
        assert!(merged.modifiers.contains(Modifier::BOLD));
    }

    #[test]
    fn resolve_applies_in_order() {
        let look = resolve([
            Look::new().bg(Color::Red),
            Look::new().bg(Color::Green),
            Look::new(),
        ]);
        assert_eq!(look.bg, Some(Color::Green));
    }

    #[test]
    fn chrome_counts_border_and_padding() {
        let look = Look::new().edge(Edge::Rounded).pad_x(2);
        assert_eq!(look.chrome_cols(), 6);
        assert_eq!(look.chrome_rows(), 2);
        assert_eq!(Look::new().chrome_cols(), 0);
    }

    #[test]
    fn fit_clamps_to_fixed_size() {
        let area = Rect::new(2, 3, 40, 10);
        let fitted = Look::new().height(3).width(20).fit(area);
        assert_eq!(fitted, Rect::new(2, 3, 20, 3));
        let fitted = Look::new().width(80).fit(area);
        assert_eq!(fitted.width, 40);
    }

    #[test]
    fn disabled_status_dims() {
        assert!(FieldStatus::Disabled.look().modifiers.contains(Modifier::DIM));
        assert_ne!(FieldStatus::Error.look().border, FieldStatus::Default.look().border);
    }
}
