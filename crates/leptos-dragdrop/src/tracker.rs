//! Drag Tracker
//!
//! Framework-free pointer drag state machine:
//!
//! ```text
//! Idle --press--> Pending --constraint met--> Dragging --release--> Idle
//!                    \--release (click)--> Idle
//! ```
//!
//! Positions are client pixels; times are milliseconds from any monotonic clock.

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

/// When a press becomes a drag
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActivationConstraint {
    /// Pointer moved further than `px` on either axis
    Distance(i32),
    /// Pointer held for `ms` without drifting more than `tolerance_px`.
    /// Drifting further first cancels the press.
    Delay { ms: f64, tolerance_px: i32 },
}

impl Default for ActivationConstraint {
    fn default() -> Self {
        ActivationConstraint::Distance(DRAG_THRESHOLD_PX)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DragPhase<T> {
    Idle,
    /// Pressed, not yet a drag
    Pending {
        item: T,
        origin: (i32, i32),
        pressed_at: f64,
    },
    Dragging {
        item: T,
        over: Option<T>,
    },
}

/// What a release amounted to
#[derive(Clone, Debug, PartialEq)]
pub enum Release<T> {
    /// Pressed and released without activating
    Click(T),
    /// A drag ended; `over` is `None` when released outside any target
    Drop { active: T, over: Option<T> },
    /// Nothing was pressed, or the press was cancelled
    Nothing,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DragTracker<T> {
    constraint: ActivationConstraint,
    phase: DragPhase<T>,
    /// Press cancelled by drifting during a delay; its release is swallowed
    cancelled: bool,
}

impl<T> Default for DragTracker<T> {
    fn default() -> Self {
        Self {
            constraint: ActivationConstraint::default(),
            phase: DragPhase::Idle,
            cancelled: false,
        }
    }
}

impl<T: Clone + PartialEq> DragTracker<T> {
    pub fn new(constraint: ActivationConstraint) -> Self {
        Self {
            constraint,
            phase: DragPhase::Idle,
            cancelled: false,
        }
    }

    pub fn phase(&self) -> &DragPhase<T> {
        &self.phase
    }

    pub fn constraint(&self) -> ActivationConstraint {
        self.constraint
    }

    /// Item being dragged, once activated
    pub fn active(&self) -> Option<&T> {
        match &self.phase {
            DragPhase::Dragging { item, .. } => Some(item),
            _ => None,
        }
    }

    pub fn over(&self) -> Option<&T> {
        match &self.phase {
            DragPhase::Dragging { over, .. } => over.as_ref(),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    pub fn is_dragging_item(&self, item: &T) -> bool {
        self.active() == Some(item)
    }

    pub fn is_over(&self, target: &T) -> bool {
        self.over() == Some(target)
    }

    /// Pointer pressed on an item. Ignored while a drag is active.
    pub fn press(&mut self, item: T, x: i32, y: i32, now: f64) {
        if self.is_dragging() {
            return;
        }
        self.cancelled = false;
        self.phase = DragPhase::Pending {
            item,
            origin: (x, y),
            pressed_at: now,
        };
    }

    /// Pointer moved. Returns `true` when this move activated a drag.
    pub fn pointer_move(&mut self, x: i32, y: i32, now: f64) -> bool {
        let (origin, pressed_at) = match &self.phase {
            DragPhase::Pending { origin, pressed_at, .. } => (*origin, *pressed_at),
            _ => return false,
        };
        let dx = (x - origin.0).abs();
        let dy = (y - origin.1).abs();

        let activate = match self.constraint {
            ActivationConstraint::Distance(px) => dx > px || dy > px,
            ActivationConstraint::Delay { ms, tolerance_px } => {
                if dx > tolerance_px || dy > tolerance_px {
                    self.phase = DragPhase::Idle;
                    self.cancelled = true;
                    return false;
                }
                now - pressed_at >= ms
            }
        };

        if activate {
            if let DragPhase::Pending { item, .. } = std::mem::replace(&mut self.phase, DragPhase::Idle) {
                self.phase = DragPhase::Dragging { item, over: None };
            }
        }
        activate
    }

    /// Timer tick with the pointer still. Only matters for delay activation.
    pub fn tick(&mut self, now: f64) -> bool {
        let (x, y) = match &self.phase {
            DragPhase::Pending { origin, .. } => *origin,
            _ => return false,
        };
        match self.constraint {
            ActivationConstraint::Delay { .. } => self.pointer_move(x, y, now),
            ActivationConstraint::Distance(_) => false,
        }
    }

    /// Pointer entered a drop target. The dragged item is never its own target.
    pub fn enter(&mut self, target: T) {
        if let DragPhase::Dragging { item, over } = &mut self.phase {
            if *item != target {
                *over = Some(target);
            }
        }
    }

    /// Pointer left a drop target
    pub fn leave(&mut self, target: &T) {
        if let DragPhase::Dragging { over, .. } = &mut self.phase {
            if over.as_ref() == Some(target) {
                *over = None;
            }
        }
    }

    /// Pointer released. Always returns to idle.
    pub fn release(&mut self) -> Release<T> {
        let phase = std::mem::replace(&mut self.phase, DragPhase::Idle);
        let cancelled = std::mem::take(&mut self.cancelled);
        match phase {
            DragPhase::Dragging { item, over } => Release::Drop { active: item, over },
            DragPhase::Pending { item, .. } if !cancelled => Release::Click(item),
            _ => Release::Nothing,
        }
    }

    /// Abort without producing a drop (e.g. Escape)
    pub fn cancel(&mut self) {
        self.phase = DragPhase::Idle;
        self.cancelled = false;
    }
}
