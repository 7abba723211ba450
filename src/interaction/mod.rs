mod hit_test;
mod tooltip;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::core::Surface;
use crate::scene::BarId;

pub use hit_test::{BarHit, pick_bar};
pub use tooltip::TooltipState;

/// Latest pointer position in normalized device coordinates.
///
/// Pointer events only store the coordinate; picking happens on the frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    ndc: Option<DVec2>,
}

impl PointerState {
    #[must_use]
    pub fn ndc(self) -> Option<DVec2> {
        self.ndc
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64, surface: Surface) {
        if !x.is_finite() || !y.is_finite() || !surface.is_valid() {
            return;
        }
        self.ndc = Some(normalize_pointer(x, y, surface));
    }

    pub fn on_pointer_leave(&mut self) {
        self.ndc = None;
    }
}

/// Maps surface pixels (origin top-left) to NDC in `[-1, 1]`, y up.
#[must_use]
pub fn normalize_pointer(x: f64, y: f64, surface: Surface) -> DVec2 {
    DVec2::new(
        x / f64::from(surface.width) * 2.0 - 1.0,
        -(y / f64::from(surface.height)) * 2.0 + 1.0,
    )
}

/// Which bar, if any, is under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "bar", rename_all = "snake_case")]
pub enum HoverState {
    #[default]
    Idle,
    Hovering(BarId),
}

/// Effect of one frame's pick on the hover state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverTransition {
    /// Same bar as last frame, or still nothing.
    Unchanged,
    Entered(BarId),
    Switched { from: BarId, to: BarId },
    Left(BarId),
}

impl HoverState {
    #[must_use]
    pub fn hovered(self) -> Option<BarId> {
        match self {
            Self::Idle => None,
            Self::Hovering(id) => Some(id),
        }
    }

    /// Next state for a frame whose pick returned `hit`.
    #[must_use]
    pub fn advance(self, hit: Option<BarId>) -> (HoverState, HoverTransition) {
        match (self, hit) {
            (Self::Idle, None) => (Self::Idle, HoverTransition::Unchanged),
            (Self::Idle, Some(to)) => (Self::Hovering(to), HoverTransition::Entered(to)),
            (Self::Hovering(from), Some(to)) if from == to => {
                (self, HoverTransition::Unchanged)
            }
            (Self::Hovering(from), Some(to)) => {
                (Self::Hovering(to), HoverTransition::Switched { from, to })
            }
            (Self::Hovering(from), None) => (Self::Idle, HoverTransition::Left(from)),
        }
    }
}

impl HoverTransition {
    /// Bar whose highlight must be cleared.
    #[must_use]
    pub fn cleared(self) -> Option<BarId> {
        match self {
            Self::Switched { from, .. } | Self::Left(from) => Some(from),
            Self::Unchanged | Self::Entered(_) => None,
        }
    }

    /// Bar that becomes highlighted.
    #[must_use]
    pub fn highlighted(self) -> Option<BarId> {
        match self {
            Self::Entered(to) | Self::Switched { to, .. } => Some(to),
            Self::Unchanged | Self::Left(_) => None,
        }
    }
}
