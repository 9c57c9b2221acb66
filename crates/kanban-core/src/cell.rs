//! Shared Board Handle
//!
//! Where the live `BoardState` is kept: a `RefCell`, a reactive signal, ...
//! Access returns `None` once the owner has been torn down, so late
//! completions can be dropped quietly.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::board::BoardState;

pub trait BoardCell: Clone + 'static {
    fn try_update<R>(&self, f: impl FnOnce(&mut BoardState) -> R) -> Option<R>;

    fn try_read<R>(&self, f: impl FnOnce(&BoardState) -> R) -> Option<R>;

    fn is_alive(&self) -> bool {
        self.try_read(|_| ()).is_some()
    }
}

impl BoardCell for Rc<RefCell<BoardState>> {
    fn try_update<R>(&self, f: impl FnOnce(&mut BoardState) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }

    fn try_read<R>(&self, f: impl FnOnce(&BoardState) -> R) -> Option<R> {
        Some(f(&self.borrow()))
    }
}

/// Weak handle: dead once the owning `Rc` is dropped
impl BoardCell for Weak<RefCell<BoardState>> {
    fn try_update<R>(&self, f: impl FnOnce(&mut BoardState) -> R) -> Option<R> {
        self.upgrade().map(|board| f(&mut board.borrow_mut()))
    }

    fn try_read<R>(&self, f: impl FnOnce(&BoardState) -> R) -> Option<R> {
        self.upgrade().map(|board| f(&board.borrow()))
    }
}
