// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A write-once slot for the asynchronously resolved trigger icon.
//!
//! The tooltip core never loads images. At mount it hands an [`IconResolver`]
//! to [`Host::resolve_icon`](crate::host::Host::resolve_icon) and keeps the
//! matching [`IconSlot`], which reads as "not yet resolved" until the host
//! fulfils the resolver. A resolver dropped without being fulfilled leaves
//! the slot empty for good.
//!
//! ```
//! use understory_tooltip::icon::IconSlot;
//!
//! let (slot, resolver) = IconSlot::<&str>::pending();
//! assert!(!slot.is_resolved());
//! resolver.resolve("info.svg");
//! assert_eq!(slot.get(), Some("info.svg"));
//! ```

use alloc::rc::{Rc, Weak};
use core::cell::RefCell;
use core::fmt;

/// Read side of an icon resolution.
pub struct IconSlot<R> {
    cell: Rc<RefCell<Option<R>>>,
}

/// Write side of an icon resolution, consumed on use.
pub struct IconResolver<R> {
    cell: Weak<RefCell<Option<R>>>,
}

impl<R> IconSlot<R> {
    /// Create an empty slot and the resolver that fills it.
    pub fn pending() -> (Self, IconResolver<R>) {
        let cell = Rc::new(RefCell::new(None));
        let resolver = IconResolver {
            cell: Rc::downgrade(&cell),
        };
        (Self { cell }, resolver)
    }

    /// Whether the icon has been resolved.
    pub fn is_resolved(&self) -> bool {
        self.cell.borrow().is_some()
    }
}

impl<R: Clone> IconSlot<R> {
    /// The resolved icon, if available.
    pub fn get(&self) -> Option<R> {
        self.cell.borrow().clone()
    }
}

impl<R> IconResolver<R> {
    /// Fill the slot. Has no effect once the slot (and its tooltip) is gone.
    pub fn resolve(self, icon: R) {
        if let Some(cell) = self.cell.upgrade() {
            *cell.borrow_mut() = Some(icon);
        }
    }
}

impl<R> fmt::Debug for IconSlot<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IconSlot")
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

impl<R> fmt::Debug for IconResolver<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IconResolver")
            .field("attached", &(self.cell.strong_count() > 0))
            .finish()
    }
}
