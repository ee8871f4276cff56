//! Design-system components for the **dalgona** runtime.
//!
//! Every component implements [`dalgona_core::Component`] and
//! [`dalgona_core::Accessible`], so it can be embedded inside any
//! [`dalgona_core::Model`], laid out with [`ratatui`], and inspected through
//! its accessibility tree. Components never mutate host state: changes are
//! reported as messages returned in a [`dalgona_core::Command`].
//!
//! Visual options are named variants (size, theme, status) that resolve to
//! a [`Look`](variant::Look). A caller-supplied look passed through
//! `with_look` is always merged last.
//!
//! # Components
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`button`] | Push button with color variants and sizes |
//! | [`group_button`] | Row of joined buttons |
//! | [`badge`] | Status label with optional dot and remove button |
//! | [`chip`] | Small pressable token |
//! | [`checkbox`] | Tri-state checkbox |
//! | [`radio_group`] | Single choice among radio items |
//! | [`toggle`] | On/off switch |
//! | [`input`] | Single-line text field |
//! | [`command_menu`] | Searchable command list |
//! | [`dropdown`] | Single-select dropdown and option menu |
//! | [`input_dropdown`] | Combobox that filters as you type |
//! | [`multi_dropdown`] | Multi-select dropdown |
//! | [`calendar`] | Month grid with single and range selection |
//! | [`time_panel`] | Ten-minute time slot list |
//! | [`date_picker`] | Date, date-time and date-range picker |
//! | [`tabs`] | Tab bar with content panels |
//! | [`pagination`] | Numbered page navigation |
//! | [`steps`] | Multi-step progress indicator |
//! | [`breadcrumb`] | Link trail ending at the current page |
//! | [`heading`] | Page header with breadcrumb, tabs and actions |
//!
//! # Building blocks
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`palette`] | Design-token colors |
//! | [`variant`] | [`Look`](variant::Look) and variant resolution |
//! | [`text`] | Column-width aware string helpers |
//! | [`text_edit`] | Edit buffer shared by text fields |
//! | [`selection`] | Highlight and scroll state for option lists |
//! | [`popover`] | Floating surface placement |
//! | [`range`] | Date ranges and click reconciliation |

pub mod badge;
pub mod breadcrumb;
pub mod button;
pub mod calendar;
pub mod checkbox;
pub mod chip;
pub mod command_menu;
pub mod date_picker;
pub mod dropdown;
pub mod group_button;
pub mod heading;
pub mod input;
pub mod input_dropdown;
pub mod multi_dropdown;
pub mod pagination;
pub mod palette;
pub mod popover;
pub mod radio_group;
pub mod range;
pub mod selection;
pub mod steps;
pub mod tabs;
pub mod text;
pub mod text_edit;
pub mod time_panel;
pub mod toggle;
pub mod variant;
