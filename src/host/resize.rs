use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

/// Identifies one resize subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Default)]
struct ListenerTable {
    next_id: u64,
    active: BTreeSet<ListenerId>,
}

/// Per-host registry of resize listeners.
///
/// Listeners are owned by [`ResizeSubscription`] guards; the registry only tracks which ids are
/// live so that notifications reach exactly the current subscribers.
#[derive(Clone, Debug, Default)]
pub struct ResizeRegistry {
    table: Rc<RefCell<ListenerTable>>,
}

impl ResizeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self) -> ResizeSubscription {
        let mut table = self.table.borrow_mut();
        let id = ListenerId(table.next_id);
        table.next_id += 1;
        table.active.insert(id);
        ResizeSubscription {
            id,
            table: Rc::downgrade(&self.table),
        }
    }

    /// Live listener ids in subscription order.
    pub fn listeners(&self) -> Vec<ListenerId> {
        self.table.borrow().active.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.table.borrow().active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Scoped resize registration. Unregisters on drop.
#[derive(Debug)]
pub struct ResizeSubscription {
    id: ListenerId,
    table: Weak<RefCell<ListenerTable>>,
}

impl ResizeSubscription {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Whether the registry still knows this subscription.
    pub fn is_active(&self) -> bool {
        self.table
            .upgrade()
            .is_some_and(|t| t.borrow().active.contains(&self.id))
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        if let Some(table) = self.table.upgrade() {
            table.borrow_mut().active.remove(&self.id);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/resize.rs"]
mod tests;
