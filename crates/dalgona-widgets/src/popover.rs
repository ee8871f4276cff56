//! Floating surfaces anchored to a trigger.
//!
//! [`Popover`] holds the open flag shared by every dropdown and picker and
//! computes where the floating panel goes: below the trigger when it fits,
//! above it otherwise, aligned to the trigger's start, center, or end, and
//! always clamped to the frame.

use crate::variant::Look;
use ratatui::layout::Rect;
use ratatui::widgets::Clear;
use ratatui::Frame;

/// Horizontal alignment of the panel against its trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
}

/// Which side of the trigger the panel ended up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Below,
    Above,
}

#[derive(Debug, Clone, Default)]
pub struct Popover {
    open: bool,
    align: Align,
    gap: u16,
}

impl Popover {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Rows between trigger and panel.
    pub fn with_gap(mut self, rows: u16) -> Self {
        self.gap = rows;
        self
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn align(&self) -> Align {
        self.align
    }

    /// Set the open flag. Returns `true` when it actually changed, which is
    /// when callers emit their open-change notification.
    pub fn set_open(&mut self, open: bool) -> bool {
        let changed = self.open != open;
        self.open = open;
        changed
    }

    /// Where a `width` x `height` panel goes for `anchor` inside `bounds`.
    pub fn place(&self, anchor: Rect, width: u16, height: u16, bounds: Rect) -> (Rect, Side) {
        let width = width.min(bounds.width);
        let below_y = anchor.bottom().saturating_add(self.gap);
        let room_below = bounds.bottom().saturating_sub(below_y);
        let room_above = anchor.y.saturating_sub(bounds.y).saturating_sub(self.gap);

        let (y, height, side) = if height <= room_below || room_below >= room_above {
            (below_y, height.min(room_below), Side::Below)
        } else {
            let h = height.min(room_above);
            (anchor.y - self.gap - h, h, Side::Above)
        };

        let x = match self.align {
            Align::Start => anchor.x,
            Align::Center => (anchor.x + anchor.width / 2).saturating_sub(width / 2),
            Align::End => anchor.right().saturating_sub(width),
        };
        let max_x = bounds.right().saturating_sub(width);
        let x = x.clamp(bounds.x, max_x.max(bounds.x));

        (Rect::new(x, y, width, height), side)
    }

    /// Clear the panel area and paint its surface. Returns the content area.
    pub fn paint_surface(frame: &mut Frame, panel: Rect, look: &Look) -> Rect {
        frame.render_widget(Clear, panel);
        look.paint(frame, panel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };

    #[test]
    fn set_open_reports_changes_only() {
        let mut p = Popover::new();
        assert!(p.set_open(true));
        assert!(!p.set_open(true));
        assert!(p.set_open(false));
    }

    #[test]
    fn places_below_when_room() {
        let p = Popover::new();
        let (rect, side) = p.place(Rect::new(4, 2, 20, 3), 30, 8, BOUNDS);
        assert_eq!(side, Side::Below);
        assert_eq!(rect, Rect::new(4, 5, 30, 8));
    }

    #[test]
    fn flips_above_near_bottom() {
        let p = Popover::new();
        let (rect, side) = p.place(Rect::new(4, 18, 20, 3), 30, 8, BOUNDS);
        assert_eq!(side, Side::Above);
        assert_eq!(rect.bottom(), 18);
        assert_eq!(rect.height, 8);
    }

    #[test]
    fn end_alignment_and_clamping() {
        let p = Popover::new().with_align(Align::End);
        let (rect, _) = p.place(Rect::new(60, 0, 20, 3), 30, 5, BOUNDS);
        assert_eq!(rect.right(), 80);

        let p = Popover::new();
        let (rect, _) = p.place(Rect::new(70, 0, 10, 3), 30, 5, BOUNDS);
        assert_eq!(rect.x, 50);
    }

    #[test]
    fn center_alignment() {
        let p = Popover::new().with_align(Align::Center);
        let (rect, _) = p.place(Rect::new(20, 0, 20, 3), 10, 5, BOUNDS);
        assert_eq!(rect.x, 25);
    }
}
