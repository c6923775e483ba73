//! The attribute-backed list engine.
//!
//! # Design
//!
//! A [`List`] keeps an ordered sequence of [`Item`]s coherent with one
//! attribute of an [`AttributeHost`]. The sequence lives in an explicit
//! two-state value:
//!
//! ```text
//!            invalidate()                     read / mutate
//!   Valid(items) ─────────────▶ Stale ──────────────────────────▶ Valid(items')
//!        ▲                        │  parse error: stays Stale        │
//!        └──── mutate + write-back ◀──────────────────────────────────┘
//! ```
//!
//! - **Read path**: a stale list fetches the host text, tokenizes it into a
//!   side buffer, and only then swaps a complete new sequence in. A parse
//!   failure leaves it `Stale` so a later fix-and-retry works.
//! - **Write path**: every mutation re-serializes the in-memory sequence and
//!   hands it to the host. The list stays valid; nothing is reparsed.
//!
//! # Invariants
//!
//! 1. Every item in a valid sequence has its back-reference set to this list.
//!    Invalidating, clearing, removing, or replacing detaches items first.
//! 2. When valid, serializing the sequence yields the host's attribute text
//!    (token-for-token).
//! 3. Valid indices are `0..len`; `insert_item_before` clamps instead of
//!    failing.
//! 4. An item moving between lists is detached from its old owner strictly
//!    before it is attached to the new one.
//! 5. No `RefCell` borrow of list state is held while calling the host or
//!    another list.
//!
//! # Failure Modes
//!
//! | Failure | Behavior |
//! |---------|----------|
//! | Host dropped | Reads see empty text; write-back is discarded |
//! | Parse error on read | `Parse` returned, list stays `Stale` |
//! | Mutation on read-only list | `NoModificationAllowed`, nothing changes |
//! | Re-entrant access from a host callback | Not supported; host writes are sinks |

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::dynamic::DynList;
use crate::error::ListError;
use crate::item::Item;
use crate::kind::{ListKind, ValueBuilder};
use crate::node::{AttributeBinding, AttributeHost};

/// Construction options for a [`List`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    /// Separator written between items. `None` uses the kind's default.
    pub separator: Option<&'static str>,
    /// Reject all mutations (the animated view of an attribute).
    pub read_only: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ListOptions {
    /// Default separator, writable.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            separator: None,
            read_only: false,
        }
    }

    /// Write `separator` between items instead of the kind's default.
    #[must_use]
    pub const fn separator(mut self, separator: &'static str) -> Self {
        self.separator = Some(separator);
        self
    }

    /// Reject every mutation when `read_only` is set.
    #[must_use]
    pub const fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }
}

enum ListState<K: ListKind> {
    Stale,
    Valid(Vec<Item<K>>),
}

pub(crate) struct ListCore<K: ListKind> {
    state: RefCell<ListState<K>>,
    host: Weak<dyn AttributeHost>,
    attribute: String,
    separator: &'static str,
    read_only: bool,
    reparses: Cell<u64>,
    this: Weak<ListCore<K>>,
}

/// A typed list synchronized with one attribute of its host.
///
/// Cloning a `List` creates another handle to the **same** list.
pub struct List<K: ListKind> {
    core: Rc<ListCore<K>>,
}

// Manual Clone: shares the same Rc.
impl<K: ListKind> Clone for List<K> {
    fn clone(&self) -> Self {
        Self {
            core: Rc::clone(&self.core),
        }
    }
}

impl<K: ListKind> fmt::Debug for List<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = match &*self.core.state.borrow() {
            ListState::Valid(items) => Some(items.len()),
            ListState::Stale => None,
        };
        f.debug_struct("List")
            .field("kind", &K::ITEM_KIND)
            .field("attribute", &self.core.attribute)
            .field("len", &len)
            .field("read_only", &self.core.read_only)
            .finish()
    }
}

impl<K: ListKind> List<K> {
    /// Bind a new, stale list to `attribute` on `host`.
    ///
    /// Nothing is parsed until the first read.
    #[must_use]
    pub fn new(host: Weak<dyn AttributeHost>, attribute: impl Into<String>) -> Self {
        Self::with_options(host, attribute, ListOptions::new())
    }

    /// Like [`new`](Self::new), with a custom separator or read-only flag.
    #[must_use]
    pub fn with_options(
        host: Weak<dyn AttributeHost>,
        attribute: impl Into<String>,
        options: ListOptions,
    ) -> Self {
        let attribute = attribute.into();
        let core = Rc::new_cyclic(|this| ListCore {
            state: RefCell::new(ListState::Stale),
            host,
            attribute,
            separator: options.separator.unwrap_or(K::SEPARATOR),
            read_only: options.read_only,
            reparses: Cell::new(0),
            this: Weak::clone(this),
        });
        Self { core }
    }

    pub(crate) fn from_core(core: Rc<ListCore<K>>) -> Self {
        Self { core }
    }

    pub(crate) fn is_core(&self, core: &Rc<ListCore<K>>) -> bool {
        Rc::ptr_eq(&self.core, core)
    }

    pub(crate) fn binding(&self) -> Rc<dyn AttributeBinding> {
        Rc::clone(&self.core) as Rc<dyn AttributeBinding>
    }

    /// Name of the bound attribute.
    #[must_use]
    pub fn attribute(&self) -> &str {
        &self.core.attribute
    }

    /// Separator written between items on write-back.
    #[must_use]
    pub fn separator(&self) -> &'static str {
        self.core.separator
    }

    /// Whether every mutation fails with `NoModificationAllowed`.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.core.read_only
    }

    /// Whether the in-memory sequence is currently in sync with the host.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(*self.core.state.borrow(), ListState::Valid(_))
    }

    /// Number of parses attempted so far (successful or not).
    #[must_use]
    pub fn reparse_count(&self) -> u64 {
        self.core.reparses.get()
    }

    /// Whether both handles refer to the same list.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
    }

    // ---------------------------------------------------------------------
    // Read operations
    // ---------------------------------------------------------------------

    /// Number of items.
    pub fn len(&self) -> Result<usize, ListError> {
        self.core.read(|items| items.len())
    }

    /// Whether the list has no items (parses first if stale).
    pub fn is_empty(&self) -> Result<bool, ListError> {
        self.core.read(|items| items.is_empty())
    }

    /// Alias of [`len`](Self::len) using the DOM name.
    pub fn number_of_items(&self) -> Result<usize, ListError> {
        self.len()
    }

    /// The item at `index`.
    pub fn get_item(&self, index: usize) -> Result<Item<K>, ListError> {
        self.core.read(|items| {
            items
                .get(index)
                .cloned()
                .ok_or_else(|| ListError::index_out_of_bounds(index, items.len()))
        })?
    }

    /// Snapshot of the current items.
    pub fn items(&self) -> Result<Vec<Item<K>>, ListError> {
        self.core.read(<[Item<K>]>::to_vec)
    }

    /// Snapshot of the current values.
    pub fn values(&self) -> Result<Vec<K::Value>, ListError> {
        self.core
            .read(|items| items.iter().map(Item::value).collect())
    }

    /// The serialized form of the current sequence.
    pub fn value_as_string(&self) -> Result<String, ListError> {
        let separator = self.core.separator;
        self.core.read(|items| serialize(items, separator))
    }

    // ---------------------------------------------------------------------
    // Mutators
    // ---------------------------------------------------------------------

    /// Replace the whole list with `item`.
    pub fn initialize(&self, item: Item<K>) -> Result<Item<K>, ListError> {
        self.check_insertable(&item)?;
        self.release_from_other_owner(&item);
        let previous = self.core.state.replace(ListState::Stale);
        if let ListState::Valid(old) = previous {
            old.iter()
                .filter(|old| !old.ptr_eq(&item))
                .for_each(Item::clear_owner);
        }
        item.set_owner(&self.core.this);
        self.core
            .state
            .replace(ListState::Valid(vec![item.clone()]));
        self.core.write_back();
        Ok(item)
    }

    /// Remove every item.
    pub fn clear(&self) -> Result<(), ListError> {
        self.check_writable()?;
        let previous = self.core.state.replace(ListState::Valid(Vec::new()));
        if let ListState::Valid(old) = previous {
            old.iter().for_each(Item::clear_owner);
        }
        self.core.write_back();
        Ok(())
    }

    /// Insert `item` before the item at `index`.
    ///
    /// `index <= 0` inserts at the head and `index >= len` at the tail; this
    /// never fails with an index error. If `item` is already in this list it
    /// is moved, and `index` refers to the position before the move.
    pub fn insert_item_before(&self, item: Item<K>, index: isize) -> Result<Item<K>, ListError> {
        self.check_insertable(&item)?;
        self.core.read(|_| ())?;
        self.release_from_other_owner(&item);
        self.core.mutate(|items| {
            let mut index = usize::try_from(index).unwrap_or(0).min(items.len());
            if let Some(pos) = take_item(items, &item) {
                if pos < index {
                    index -= 1;
                }
            }
            item.set_owner(&self.core.this);
            items.insert(index, item.clone());
            Ok(())
        })?;
        self.core.write_back();
        Ok(item)
    }

    /// Put `item` at `index`, detaching the item previously there.
    pub fn replace_item(&self, item: Item<K>, index: usize) -> Result<Item<K>, ListError> {
        self.check_insertable(&item)?;
        let len = self.len()?;
        if index >= len {
            return Err(ListError::index_out_of_bounds(index, len));
        }
        self.release_from_other_owner(&item);
        self.core.mutate(|items| {
            let mut index = index;
            if let Some(pos) = position(items, &item) {
                if pos == index {
                    return Ok(());
                }
                items.remove(pos);
                if pos < index {
                    index -= 1;
                }
            }
            let old = std::mem::replace(&mut items[index], item.clone());
            old.clear_owner();
            item.set_owner(&self.core.this);
            Ok(())
        })?;
        self.core.write_back();
        Ok(item)
    }

    /// Remove and return the item at `index`.
    pub fn remove_item(&self, index: usize) -> Result<Item<K>, ListError> {
        self.check_writable()?;
        let removed = self.core.mutate(|items| {
            if index >= items.len() {
                return Err(ListError::index_out_of_bounds(index, items.len()));
            }
            let item = items.remove(index);
            item.clear_owner();
            Ok(item)
        })?;
        self.core.write_back();
        Ok(removed)
    }

    /// Add `item` at the end.
    pub fn append_item(&self, item: Item<K>) -> Result<Item<K>, ListError> {
        self.check_insertable(&item)?;
        self.core.read(|_| ())?;
        self.release_from_other_owner(&item);
        self.core.mutate(|items| {
            take_item(items, &item);
            item.set_owner(&self.core.this);
            items.push(item.clone());
            Ok(())
        })?;
        self.core.write_back();
        Ok(item)
    }

    /// Mark the list stale; the next read reparses the host text.
    pub fn invalidate(&self) {
        self.core.mark_stale();
    }

    // ---------------------------------------------------------------------
    // Helpers
    // ---------------------------------------------------------------------

    pub(crate) fn check_writable(&self) -> Result<(), ListError> {
        if self.core.read_only {
            return Err(ListError::read_only(&self.core.attribute));
        }
        Ok(())
    }

    /// Every check an incoming item must pass before anything is mutated.
    fn check_insertable(&self, item: &Item<K>) -> Result<(), ListError> {
        self.check_writable()?;
        item.with_value(K::validate)?;
        match item.owner() {
            Some(owner) if !owner.ptr_eq(self) => owner.check_writable(),
            _ => Ok(()),
        }
    }

    /// Detach `item` from a different list, refreshing that list's text.
    fn release_from_other_owner(&self, item: &Item<K>) {
        let Some(owner) = item.owner() else {
            return;
        };
        if owner.ptr_eq(self) {
            return;
        }
        let detached = owner.core.mutate(|items| Ok(take_item(items, item)));
        item.clear_owner();
        if matches!(detached, Ok(Some(_))) {
            owner.core.write_back();
        }
    }
}

impl<K: ListKind> ListCore<K> {
    /// Run `f` over a valid sequence, reparsing first if stale.
    fn read<R>(&self, f: impl FnOnce(&[Item<K>]) -> R) -> Result<R, ListError> {
        self.revalidate()?;
        match &*self.state.borrow() {
            ListState::Valid(items) => Ok(f(items)),
            ListState::Stale => Ok(f(&[])),
        }
    }

    /// Run `f` over a valid sequence with mutable access.
    ///
    /// Items are moved out for the duration of `f` and put back afterwards,
    /// including when `f` fails.
    fn mutate<R>(
        &self,
        f: impl FnOnce(&mut Vec<Item<K>>) -> Result<R, ListError>,
    ) -> Result<R, ListError> {
        self.revalidate()?;
        let mut items = match self.state.replace(ListState::Stale) {
            ListState::Valid(items) => items,
            ListState::Stale => Vec::new(),
        };
        let result = f(&mut items);
        self.state.replace(ListState::Valid(items));
        result
    }

    /// `Stale -> Valid` by parsing the host text into a fresh sequence.
    fn revalidate(&self) -> Result<(), ListError> {
        if matches!(*self.state.borrow(), ListState::Valid(_)) {
            return Ok(());
        }
        let text = self
            .host
            .upgrade()
            .and_then(|host| host.attribute_text(&self.attribute))
            .unwrap_or_default();
        self.reparses.set(self.reparses.get() + 1);

        let mut builder = ValueBuilder::new();
        let parsed = K::parse(&text, &mut builder);
        let values = match (parsed, builder.finish()) {
            (Ok(()), Some(values)) => values,
            (Ok(()), None) => Vec::new(),
            (Err(err), _) => {
                tracing::warn!(
                    attribute = %self.attribute,
                    error = %err,
                    "attribute text failed to parse; list left stale"
                );
                return Err(ListError::parse(&self.attribute, err));
            }
        };

        let items: Vec<Item<K>> = values
            .into_iter()
            .map(|value| {
                let item = Item::new(value);
                item.set_owner(&self.this);
                item
            })
            .collect();
        tracing::trace!(
            attribute = %self.attribute,
            items = items.len(),
            "list revalidated from attribute text"
        );
        self.state.replace(ListState::Valid(items));
        Ok(())
    }

    fn mark_stale(&self) {
        if let ListState::Valid(items) = self.state.replace(ListState::Stale) {
            items.iter().for_each(Item::clear_owner);
            tracing::trace!(attribute = %self.attribute, "list invalidated");
        }
    }

    /// An owned item's value was edited in place.
    pub(crate) fn item_changed(&self) {
        self.write_back();
    }

    /// Serialize the sequence and push it to the host.
    fn write_back(&self) {
        let text = match &*self.state.borrow() {
            ListState::Valid(items) => serialize(items, self.separator),
            ListState::Stale => return,
        };
        match self.host.upgrade() {
            Some(host) => {
                tracing::debug!(
                    attribute = %self.attribute,
                    bytes = text.len(),
                    "list written back"
                );
                host.write_back(&self.attribute, &text);
            }
            None => {
                tracing::debug!(attribute = %self.attribute, "host dropped; write-back discarded");
            }
        }
    }
}

impl<K: ListKind> AttributeBinding for ListCore<K> {
    fn invalidate(&self) {
        self.mark_stale();
    }

    fn item_kind(&self) -> &'static str {
        K::ITEM_KIND
    }

    fn into_any(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }

    fn to_dyn_list(self: Rc<Self>) -> Box<dyn DynList> {
        Box::new(List::from_core(self))
    }
}

fn serialize<K: ListKind>(items: &[Item<K>], separator: &str) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        item.with_value(|value| K::format(value, &mut out));
    }
    out
}

fn position<K: ListKind>(items: &[Item<K>], item: &Item<K>) -> Option<usize> {
    items.iter().position(|candidate| candidate.ptr_eq(item))
}

/// Remove `item` from `items` if present, returning where it was.
fn take_item<K: ListKind>(items: &mut Vec<Item<K>>, item: &Item<K>) -> Option<usize> {
    let pos = position(items, item)?;
    items.remove(pos);
    Some(pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ListErrorKind;
    use crate::node::Element;
    use crate::number_list::{NumberItem, NumberList};
    use tracing_test::traced_test;

    fn list_with(text: &str) -> (Element, NumberList) {
        let element = Element::new("feFuncR");
        element.set_attribute("tableValues", text);
        let list = element.number_list("tableValues").unwrap();
        (element, list)
    }

    #[test]
    fn starts_stale_and_parses_on_first_read() {
        let (_element, list) = list_with("1 2 3");
        assert!(!list.is_valid());
        assert_eq!(list.reparse_count(), 0);
        assert_eq!(list.len().unwrap(), 3);
        assert!(list.is_valid());
        assert_eq!(list.reparse_count(), 1);
        assert_eq!(list.len().unwrap(), 3);
        assert_eq!(list.reparse_count(), 1);
    }

    #[test]
    fn parsed_items_are_owned() {
        let (_element, list) = list_with("1 2");
        for item in list.items().unwrap() {
            assert!(item.is_owned_by(&list));
        }
    }

    #[test]
    fn remove_detaches() {
        let (element, list) = list_with("1 2 3");
        let removed = list.remove_item(1).unwrap();
        assert!(removed.is_detached());
        assert_eq!(removed.value(), 2.0);
        assert_eq!(element.get_attribute("tableValues").as_deref(), Some("1 3"));
    }

    #[test]
    fn replace_detaches_old_item() {
        let (element, list) = list_with("1 2 3");
        let old = list.get_item(0).unwrap();
        let new = list.replace_item(NumberItem::new(7.0), 0).unwrap();
        assert!(old.is_detached());
        assert!(new.is_owned_by(&list));
        assert_eq!(element.get_attribute("tableValues").as_deref(), Some("7 2 3"));
    }

    #[test]
    fn replace_with_item_from_same_list_moves_it() {
        let (element, list) = list_with("1 2 3");
        let first = list.get_item(0).unwrap();
        list.replace_item(first.clone(), 2).unwrap();
        assert_eq!(element.get_attribute("tableValues").as_deref(), Some("2 1"));
        assert!(first.is_owned_by(&list));

        list.replace_item(first.clone(), 1).unwrap();
        assert_eq!(list.value_as_string().unwrap(), "2 1");
    }

    #[test]
    fn insert_moves_within_same_list() {
        let (element, list) = list_with("1 2 3 4");
        let first = list.get_item(0).unwrap();
        list.insert_item_before(first.clone(), 3).unwrap();
        assert_eq!(element.get_attribute("tableValues").as_deref(), Some("2 3 1 4"));

        let last = list.get_item(3).unwrap();
        list.insert_item_before(last, 0).unwrap();
        assert_eq!(list.value_as_string().unwrap(), "4 2 3 1");
        assert_eq!(list.len().unwrap(), 4);
    }

    #[test]
    fn append_existing_item_moves_to_tail() {
        let (_element, list) = list_with("1 2 3");
        let first = list.get_item(0).unwrap();
        list.append_item(first).unwrap();
        assert_eq!(list.value_as_string().unwrap(), "2 3 1");
    }

    #[test]
    fn invalidate_detaches_and_defers_parse() {
        let (element, list) = list_with("1 2");
        let item = list.get_item(0).unwrap();
        list.invalidate();
        assert!(item.is_detached());
        assert_eq!(list.reparse_count(), 1);

        // Editing a detached item does not touch the attribute.
        item.set_value(9.0).unwrap();
        assert_eq!(element.get_attribute("tableValues").as_deref(), Some("1 2"));
    }

    #[test]
    fn item_edit_writes_back_without_reparse() {
        let (element, list) = list_with("1 2 3");
        let item = list.get_item(1).unwrap();
        item.set_value(5.5).unwrap();
        assert_eq!(element.get_attribute("tableValues").as_deref(), Some("1 5.5 3"));
        assert_eq!(list.reparse_count(), 1);
        assert!(list.is_valid());
    }

    #[test]
    fn clear_empties_and_writes_empty_text() {
        let (element, list) = list_with("1 2 3");
        let item = list.get_item(0).unwrap();
        list.clear().unwrap();
        assert!(item.is_detached());
        assert_eq!(list.len().unwrap(), 0);
        assert_eq!(element.get_attribute("tableValues").as_deref(), Some(""));
    }

    #[test]
    fn clear_on_stale_list_skips_parse() {
        let (_element, list) = list_with("not numbers");
        list.clear().unwrap();
        assert_eq!(list.reparse_count(), 0);
        assert_eq!(list.value_as_string().unwrap(), "");
    }

    #[test]
    fn initialize_keeps_item_if_already_present() {
        let (_element, list) = list_with("1 2 3");
        let middle = list.get_item(1).unwrap();
        let others = [list.get_item(0).unwrap(), list.get_item(2).unwrap()];
        list.initialize(middle.clone()).unwrap();
        assert!(middle.is_owned_by(&list));
        assert!(others.iter().all(Item::is_detached));
        assert_eq!(list.value_as_string().unwrap(), "2");
    }

    #[test]
    fn remove_out_of_range_leaves_list_valid() {
        let (_element, list) = list_with("1");
        let err = list.remove_item(1).unwrap_err();
        assert_eq!(err.kind(), ListErrorKind::IndexSize);
        assert!(list.is_valid());
        assert_eq!(list.len().unwrap(), 1);
    }

    #[test]
    fn invalid_value_is_rejected_before_mutation() {
        let (element, list) = list_with("1 2");
        let err = list.append_item(NumberItem::new(f32::NAN)).unwrap_err();
        assert_eq!(err.kind(), ListErrorKind::InvalidValue);
        assert_eq!(list.len().unwrap(), 2);
        assert_eq!(element.get_attribute("tableValues").as_deref(), Some("1 2"));
    }

    #[test]
    fn dropped_host_reads_empty_and_discards_writes() {
        let (element, list) = list_with("1 2");
        drop(element);
        assert_eq!(list.len().unwrap(), 0);
        list.append_item(NumberItem::new(1.0)).unwrap();
        assert_eq!(list.value_as_string().unwrap(), "1");
    }

    #[test]
    fn debug_shows_state() {
        let (_element, list) = list_with("1 2");
        let dbg = format!("{list:?}");
        assert!(dbg.contains("tableValues"));
        assert!(dbg.contains("None"));
        list.len().unwrap();
        assert!(format!("{list:?}").contains("Some(2)"));
    }

    #[traced_test]
    #[test]
    fn parse_failure_is_logged() {
        let (_element, list) = list_with("1 two");
        let err = list.len().unwrap_err();
        assert_eq!(err.kind(), ListErrorKind::Parse);
        assert!(!list.is_valid());
        assert!(logs_contain("list left stale"));
    }
}
