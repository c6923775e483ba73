//! List items: shared value cells with a weak back-reference to their list.
//!
//! # Design
//!
//! An [`Item`] is a handle to reference-counted storage (`Rc<..>`); cloning
//! it yields another handle to the **same** cell. The owning list holds one
//! handle per position, callers may hold more.
//!
//! The back-reference to the owner is a `Weak`, so ownership only ever flows
//! list -> item. The item never attaches or detaches itself; the engine sets
//! and clears the back-reference as it moves items in and out of sequences.
//!
//! # Invariants
//!
//! 1. An item is referenced by at most one list, and that list is the one
//!    its back-reference points to.
//! 2. An item with no live back-reference belongs to no list.
//! 3. Setting a value the kind considers the same as the current one is a
//!    no-op (no write-back).

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::error::ListError;
use crate::kind::ListKind;
use crate::list::{List, ListCore};

struct ItemCell<K: ListKind> {
    value: RefCell<K::Value>,
    owner: RefCell<Weak<ListCore<K>>>,
}

/// A single list value with an optional owner.
pub struct Item<K: ListKind> {
    cell: Rc<ItemCell<K>>,
}

// Manual Clone: shares the same Rc.
impl<K: ListKind> Clone for Item<K> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<K: ListKind> fmt::Debug for Item<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("kind", &K::ITEM_KIND)
            .field("value", &*self.cell.value.borrow())
            .field("owned", &!self.is_detached())
            .finish()
    }
}

impl<K: ListKind> Item<K> {
    /// Create a detached item.
    ///
    /// The value is validated when the item is inserted into a list.
    #[must_use]
    pub fn new(value: K::Value) -> Self {
        Self {
            cell: Rc::new(ItemCell {
                value: RefCell::new(value),
                owner: RefCell::new(Weak::new()),
            }),
        }
    }

    /// Clone of the current value.
    #[must_use]
    pub fn value(&self) -> K::Value {
        self.cell.value.borrow().clone()
    }

    /// Access the current value by reference without cloning.
    pub fn with_value<R>(&self, f: impl FnOnce(&K::Value) -> R) -> R {
        f(&self.cell.value.borrow())
    }

    /// Replace the value in place and refresh the owner's attribute text.
    ///
    /// Fails without changing anything if the value does not validate or if
    /// the owning list is read-only.
    pub fn set_value(&self, value: K::Value) -> Result<(), ListError> {
        K::validate(&value)?;
        if let Some(owner) = self.owner() {
            owner.check_writable()?;
        }
        {
            let mut current = self.cell.value.borrow_mut();
            if K::same_value(&*current, &value) {
                return Ok(());
            }
            *current = value;
        }
        self.notify_owner_changed();
        Ok(())
    }

    /// The list this item currently belongs to.
    #[must_use]
    pub fn owner(&self) -> Option<List<K>> {
        self.cell.owner.borrow().upgrade().map(List::from_core)
    }

    /// Whether this item is currently held by `list`.
    #[must_use]
    pub fn is_owned_by(&self, list: &List<K>) -> bool {
        self.cell
            .owner
            .borrow()
            .upgrade()
            .is_some_and(|core| list.is_core(&core))
    }

    /// Whether this item belongs to no list.
    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.cell.owner.borrow().strong_count() == 0
    }

    /// Whether both handles refer to the same item.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }

    pub(crate) fn set_owner(&self, owner: &Weak<ListCore<K>>) {
        *self.cell.owner.borrow_mut() = Weak::clone(owner);
    }

    pub(crate) fn clear_owner(&self) {
        *self.cell.owner.borrow_mut() = Weak::new();
    }

    /// Forward an in-place edit to the owner; no-op when detached.
    fn notify_owner_changed(&self) {
        let owner = self.cell.owner.borrow().upgrade();
        if let Some(core) = owner {
            core.item_changed();
        }
    }
}
