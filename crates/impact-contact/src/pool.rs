//! Per-step scratch storage for contact records.
//!
//! The pool is a bump allocator over a `Vec<Contact>`: `reset` rewinds the
//! cursor at the start of every step and `next` hands out the record under
//! it, growing the backing vector only when the cursor runs off the end.
//! Handles from an earlier step must not be dereferenced; after a reset
//! they either miss or name a record reused this step.

use tracing::debug;

use crate::contact::{Contact, ContactHandle};

/// Bump-allocated contact records, reused every step.
#[derive(Clone, Debug, Default)]
pub struct ContactPool {
    contacts: Vec<Contact>,
    cursor: usize,
}

impl ContactPool {
    /// Create a pool with `capacity` records pre-allocated.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            contacts: vec![Contact::EMPTY; capacity],
            cursor: 0,
        }
    }

    /// Rewind the cursor. Backing storage is kept.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Hand out the next record, cleared, growing the pool if exhausted.
    pub fn next(&mut self) -> (ContactHandle, &mut Contact) {
        if self.cursor == self.contacts.len() {
            self.contacts.push(Contact::EMPTY);
            debug!(contacts = self.contacts.len(), "contact pool grew");
        }
        let index = self.cursor;
        self.cursor += 1;
        let contact = &mut self.contacts[index];
        contact.reset();
        (ContactHandle(index as u32), contact)
    }

    /// Record behind `handle`, if it was handed out this step.
    pub fn get(&self, handle: ContactHandle) -> Option<&Contact> {
        if handle.index() < self.cursor {
            self.contacts.get(handle.index())
        } else {
            None
        }
    }

    /// Records handed out since the last reset.
    pub(crate) fn used(&self) -> usize {
        self.cursor
    }

    /// Records allocated in total. Never shrinks.
    pub fn capacity(&self) -> usize {
        self.contacts.len()
    }
}
