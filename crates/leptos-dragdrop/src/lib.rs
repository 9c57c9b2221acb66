//! Leptos DragDrop Utilities
//!
//! Mouse-event drag-and-drop for Leptos, generic over the dragged payload.
//! The state machine lives in [`DragTracker`]; this module binds it to the DOM.
//!
//! Draggables get `make_on_mousedown`, drop targets get `make_on_over` and
//! `make_on_leave`, and the page binds the document-level listeners once
//! with `bind_global_listeners`.

mod tracker;

pub use tracker::*;

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Shared drag state for one board
pub struct Dnd<T: Send + Sync + 'static> {
    tracker: RwSignal<DragTracker<T>>,
}

impl<T: Send + Sync + 'static> Clone for Dnd<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for Dnd<T> {}

pub fn create_dnd<T>(constraint: ActivationConstraint) -> Dnd<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    Dnd {
        tracker: RwSignal::new(DragTracker::new(constraint)),
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> Dnd<T> {
    pub fn is_dragging(&self) -> bool {
        self.tracker.with(|t| t.is_dragging())
    }

    pub fn is_dragging_item(&self, item: &T) -> bool {
        self.tracker.with(|t| t.is_dragging_item(item))
    }

    pub fn is_over(&self, target: &T) -> bool {
        self.tracker.with(|t| t.is_over(target))
    }

    pub fn active(&self) -> Option<T> {
        self.tracker.with(|t| t.active().cloned())
    }
}

/// Milliseconds since page load
fn now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Presses on form controls never start a drag
fn is_control(ev: &web_sys::MouseEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .and_then(|el| el.closest("input, textarea, select, button").ok().flatten())
        .is_some()
}

fn set_timeout(ms: i32, f: impl FnOnce() + 'static) {
    if let Some(win) = web_sys::window() {
        let cb = Closure::once_into_js(f);
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms);
    }
}

/// Create mousedown handler for a draggable item.
/// The innermost draggable wins; outer ones never see the press.
pub fn make_on_mousedown<T>(dnd: Dnd<T>, item: T) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 || is_control(&ev) {
            return;
        }
        ev.stop_propagation();
        let pressed_at = now();
        let started = dnd.tracker.try_update(|t| {
            t.press(item.clone(), ev.client_x(), ev.client_y(), pressed_at);
            t.constraint()
        });

        // Delay activation has to fire without further pointer movement
        if let Some(ActivationConstraint::Delay { ms, .. }) = started {
            set_timeout(ms.ceil() as i32, move || {
                dnd.tracker.try_update(|t| t.tick(now()));
            });
        }
    }
}

/// Create mouseover handler for a drop target.
/// `mouseover` bubbles, so the innermost target under the pointer wins.
pub fn make_on_over<T>(dnd: Dnd<T>, target: T) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        let dragging = dnd.tracker.try_with_untracked(|t| t.is_dragging()).unwrap_or(false);
        if !dragging {
            return;
        }
        ev.stop_propagation();
        if !dnd.tracker.with_untracked(|t| t.is_over(&target)) {
            dnd.tracker.update(|t| t.enter(target.clone()));
        }
    }
}

/// Create mouseleave handler for a drop target
pub fn make_on_leave<T>(dnd: Dnd<T>, target: T) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        let over = dnd.tracker.try_with_untracked(|t| t.is_over(&target)).unwrap_or(false);
        if over {
            dnd.tracker.update(|t| t.leave(&target));
        }
    }
}

fn add_document_listener<E>(event: &str, handler: impl FnMut(E) + 'static)
where
    E: wasm_bindgen::convert::FromWasmAbi + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        let _ = doc.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Bind document-level mousemove, mouseup and Escape handling.
///
/// `on_release` sees every release: clicks, drops (with or without a
/// target), and `Release::Nothing` for cancelled presses. Listeners outlive
/// the owner; once the signal is disposed they do nothing.
pub fn bind_global_listeners<T, F>(dnd: Dnd<T>, on_release: F)
where
    T: Clone + PartialEq + Send + Sync + 'static,
    F: Fn(Release<T>) + 'static,
{
    add_document_listener("mousemove", move |ev: web_sys::MouseEvent| {
        let pending = dnd
            .tracker
            .try_with_untracked(|t| matches!(t.phase(), DragPhase::Pending { .. }))
            .unwrap_or(false);
        // Only touch the signal while a press is pending
        if pending {
            let at = now();
            dnd.tracker.try_update(|t| t.pointer_move(ev.client_x(), ev.client_y(), at));
        }
    });

    add_document_listener("mouseup", move |_ev: web_sys::MouseEvent| {
        let idle = dnd
            .tracker
            .try_with_untracked(|t| *t.phase() == DragPhase::Idle)
            .unwrap_or(true);
        if idle {
            return;
        }
        if let Some(release) = dnd.tracker.try_update(|t| t.release()) {
            on_release(release);
        }
    });

    add_document_listener("keydown", move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" {
            dnd.tracker.try_update(|t| t.cancel());
        }
    });
}
