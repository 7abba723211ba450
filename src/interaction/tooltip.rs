use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Overlay describing the hovered bar.
///
/// Content changes only on hover transitions. Position follows the bar's
/// projected center on every frame the hover persists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipState {
    attached: bool,
    visible: bool,
    text: String,
    x: f64,
    y: f64,
    content_revision: u64,
}

impl Default for TooltipState {
    fn default() -> Self {
        Self {
            attached: true,
            visible: false,
            text: String::new(),
            x: 0.0,
            y: 0.0,
            content_revision: 0,
        }
    }
}

impl TooltipState {
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.attached && self.visible
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Incremented on every content change.
    #[must_use]
    pub fn content_revision(&self) -> u64 {
        self.content_revision
    }

    pub fn show(&mut self, text: &str, position: Option<DVec2>) {
        if !self.attached {
            return;
        }
        self.visible = true;
        self.text.clear();
        self.text.push_str(text);
        self.content_revision += 1;
        if let Some(position) = position {
            self.move_to(position);
        }
    }

    pub fn move_to(&mut self, position: DVec2) {
        self.x = position.x;
        self.y = position.y;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Removes the overlay from the surface; later calls become no-ops.
    pub fn detach(&mut self) {
        self.visible = false;
        self.attached = false;
        self.text.clear();
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec2;

    use super::TooltipState;

    #[test]
    fn detached_tooltip_ignores_show() {
        let mut tooltip = TooltipState::default();
        tooltip.detach();
        tooltip.show("Widget Q1: 10", Some(DVec2::new(1.0, 2.0)));
        assert!(!tooltip.is_visible());
        assert_eq!(tooltip.text(), "");
    }

    #[test]
    fn show_bumps_revision_and_move_does_not() {
        let mut tooltip = TooltipState::default();
        tooltip.show("Widget Q1: 10", Some(DVec2::new(1.0, 2.0)));
        tooltip.move_to(DVec2::new(3.0, 4.0));
        assert_eq!(tooltip.content_revision(), 1);
        assert_eq!(tooltip.position(), DVec2::new(3.0, 4.0));
    }
}
