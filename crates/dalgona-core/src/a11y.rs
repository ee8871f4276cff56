//! Accessibility metadata.
//!
//! Terminals have no accessibility API, but every component still describes
//! itself as a small tree of [`AccessNode`]s: its role, its accessible name
//! and its states. Hosts can feed the tree to a screen-reader bridge; tests
//! use it to assert semantics without scraping rendered cells.

/// The semantic role of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Button,
    Group,
    Checkbox,
    Radio,
    RadioGroup,
    Switch,
    TextBox,
    Combobox,
    Listbox,
    Option,
    SearchBox,
    Menu,
    MenuItem,
    Separator,
    TabList,
    Tab,
    TabPanel,
    Navigation,
    List,
    ListItem,
    Link,
    Grid,
    GridCell,
    Dialog,
    Heading,
    Status,
    Presentation,
}

/// Tri-state `checked` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checked {
    False,
    True,
    Mixed,
}

impl From<bool> for Checked {
    fn from(value: bool) -> Self {
        if value {
            Checked::True
        } else {
            Checked::False
        }
    }
}

/// Which "current item" a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Current {
    Page,
    Step,
    Date,
}

/// One node of a component's accessibility tree.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessNode {
    pub role: Role,
    pub label: Option<String>,
    pub disabled: bool,
    pub hidden: bool,
    pub expanded: Option<bool>,
    pub checked: Option<Checked>,
    pub selected: Option<bool>,
    pub current: Option<Current>,
    pub invalid: bool,
    pub children: Vec<AccessNode>,
}

impl AccessNode {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            label: None,
            disabled: false,
            hidden: false,
            expanded: None,
            checked: None,
            selected: None,
            current: None,
            invalid: false,
            children: Vec::new(),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Hidden from assistive technology (decorative separators, icons).
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = Some(expanded);
        self
    }

    pub fn checked(mut self, checked: impl Into<Checked>) -> Self {
        self.checked = Some(checked.into());
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = Some(selected);
        self
    }

    pub fn current(mut self, current: Option<Current>) -> Self {
        self.current = current;
        self
    }

    pub fn invalid(mut self, invalid: bool) -> Self {
        self.invalid = invalid;
        self
    }

    pub fn child(mut self, child: AccessNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = AccessNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Depth-first search for the first node with `role`, including `self`.
    pub fn find(&self, role: Role) -> Option<&AccessNode> {
        if self.role == role {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(role))
    }

    /// Every node with `role`, depth-first, including `self`.
    pub fn find_all(&self, role: Role) -> Vec<&AccessNode> {
        let mut out = Vec::new();
        self.collect(role, &mut out);
        out
    }

    fn collect<'a>(&'a self, role: Role, out: &mut Vec<&'a AccessNode>) {
        if self.role == role {
            out.push(self);
        }
        for child in &self.children {
            child.collect(role, out);
        }
    }

    /// The first descendant (or self) whose label equals `label`.
    pub fn find_labeled(&self, label: &str) -> Option<&AccessNode> {
        if self.label.as_deref() == Some(label) {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|child| child.find_labeled(label))
    }
}

/// Components that describe themselves to assistive technology.
pub trait Accessible {
    fn access_node(&self) -> AccessNode;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AccessNode {
        AccessNode::new(Role::RadioGroup).label("Plan").children([
            AccessNode::new(Role::Radio).label("Free").checked(true),
            AccessNode::new(Role::Radio)
                .label("Pro")
                .checked(false)
                .disabled(true),
        ])
    }

    #[test]
    fn find_matches_self_first() {
        let tree = sample();
        assert_eq!(tree.find(Role::RadioGroup).map(|n| n.role), Some(Role::RadioGroup));
    }

    #[test]
    fn find_all_walks_depth_first() {
        let tree = sample();
        let labels: Vec<_> = tree
            .find_all(Role::Radio)
            .into_iter()
            .filter_map(|n| n.label.as_deref())
            .collect();
        assert_eq!(labels, vec!["Free", "Pro"]);
    }

    #[test]
    fn find_labeled_returns_states() {
        let tree = sample();
        let pro = tree.find_labeled("Pro");
        assert_eq!(pro.map(|n| n.disabled), Some(true));
        assert_eq!(pro.and_then(|n| n.checked), Some(Checked::False));
        assert!(tree.find_labeled("Team").is_none());
    }
}
