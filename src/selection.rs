//! Hover and click selection with a single, mutually exclusive lock.

use tracing::debug;

use crate::graph::{EdgeIndex, Element, NodeIndex};

/// The locked, click-confirmed selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Selection {
    #[default]
    None,
    Node(NodeIndex),
    Edge(EdgeIndex),
}

impl Selection {
    pub fn element(self) -> Option<Element> {
        match self {
            Self::None => None,
            Self::Node(node) => Some(Element::Node(node)),
            Self::Edge(edge) => Some(Element::Edge(edge)),
        }
    }

    pub fn is_none(self) -> bool {
        self == Self::None
    }
}

impl From<Element> for Selection {
    fn from(element: Element) -> Self {
        match element {
            Element::Node(node) => Self::Node(node),
            Element::Edge(edge) => Self::Edge(edge),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementState {
    Idle,
    Hovered,
    Locked,
}

#[derive(Clone, Debug, Default)]
pub struct SelectionController {
    selection: Selection,
    hovered: Option<Element>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn hovered(&self) -> Option<Element> {
        self.hovered
    }

    pub fn is_locked(&self) -> bool {
        !self.selection.is_none()
    }

    pub fn hover(&mut self, element: Element) {
        self.hovered = Some(element);
    }

    /// Ends the hover on `element`; a newer hover on something else is kept.
    pub fn hover_end(&mut self, element: Element) {
        if self.hovered == Some(element) {
            self.hovered = None;
        }
    }

    /// Toggles the lock on `element`. Clicking the locked element releases it
    /// and hides the detail; clicking anything else moves the lock there.
    pub fn click(&mut self, element: Element) {
        if self.selection.element() == Some(element) {
            debug!(?element, "selection released");
            self.clear();
            return;
        }
        self.select(element);
    }

    /// Replaces any previous lock with `element`.
    pub fn select(&mut self, element: Element) {
        self.selection = Selection::from(element);
        debug!(?element, "selection locked");
    }

    pub fn clear(&mut self) {
        self.selection = Selection::None;
        self.hovered = None;
    }

    pub fn clear_background(&mut self) {
        if self.is_locked() {
            debug!("selection cleared by background click");
        }
        self.clear();
    }

    pub fn state_of(&self, element: Element) -> ElementState {
        if self.selection.element() == Some(element) {
            ElementState::Locked
        } else if self.hovered == Some(element) {
            ElementState::Hovered
        } else {
            ElementState::Idle
        }
    }

    /// Element whose details are on display: the lock, else the hover.
    pub fn detail_target(&self) -> Option<Element> {
        self.selection.element().or(self.hovered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Element = Element::Node(NodeIndex(0));
    const B: Element = Element::Node(NodeIndex(1));
    const AB: Element = Element::Edge(EdgeIndex(0));

    #[test]
    fn clicking_twice_releases_the_lock() {
        let mut controller = SelectionController::new();
        controller.click(A);
        assert_eq!(controller.selection(), Selection::Node(NodeIndex(0)));

        controller.click(A);
        assert_eq!(controller.selection(), Selection::None);
        assert_eq!(controller.detail_target(), None);
    }

    #[test]
    fn clicking_another_element_moves_the_lock() {
        let mut controller = SelectionController::new();
        controller.click(A);
        controller.click(B);

        assert_eq!(controller.selection(), Selection::Node(NodeIndex(1)));
        assert_eq!(controller.state_of(A), ElementState::Idle);
        assert_eq!(controller.state_of(B), ElementState::Locked);

        controller.click(AB);
        assert_eq!(controller.selection(), Selection::Edge(EdgeIndex(0)));
        assert_eq!(controller.state_of(B), ElementState::Idle);
    }

    #[test]
    fn background_click_clears_everything() {
        let mut controller = SelectionController::new();
        controller.click(AB);
        controller.hover(A);
        controller.clear_background();

        assert!(!controller.is_locked());
        assert_eq!(controller.detail_target(), None);
    }

    #[test]
    fn hover_drives_detail_only_without_lock() {
        let mut controller = SelectionController::new();
        controller.hover(A);
        assert_eq!(controller.detail_target(), Some(A));
        assert_eq!(controller.state_of(A), ElementState::Hovered);

        controller.click(B);
        controller.hover(A);
        assert_eq!(controller.detail_target(), Some(B));

        controller.hover_end(A);
        assert_eq!(controller.detail_target(), Some(B));
    }

    #[test]
    fn stale_hover_end_keeps_newer_hover() {
        let mut controller = SelectionController::new();
        controller.hover(A);
        controller.hover(B);
        controller.hover_end(A);

        assert_eq!(controller.hovered(), Some(B));
    }
}
