// Bounded secondary-particle bank.
//
// Each sampling task (one history, one thread or lane) owns its bank, so a
// successful reservation is exclusive by construction. Capacity exhaustion
// is reported to the caller, never hidden: a dropped photon is a physics
// bug, and the surrounding system re-drives failed tracks in a later pass.

use crate::particle::Secondary;

/// Fixed-capacity stack of secondaries produced during transport.
#[derive(Debug, Clone)]
pub struct SecondaryBank {
    secondaries: Vec<Secondary>,
    capacity: usize,
}

impl SecondaryBank {
    pub fn with_capacity(capacity: usize) -> Self {
        SecondaryBank {
            secondaries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Reserve one slot and hand out exclusive access to it, or `None` when
    /// the bank is full. The slot holds a placeholder until the caller
    /// fills it.
    pub fn try_reserve(&mut self) -> Option<&mut Secondary> {
        if self.secondaries.len() >= self.capacity {
            return None;
        }
        self.secondaries.push(Secondary::unassigned());
        self.secondaries.last_mut()
    }

    /// Take the most recently banked secondary for transport.
    pub fn pop(&mut self) -> Option<Secondary> {
        self.secondaries.pop()
    }

    /// Roll back the most recent reservation (caller abandoned the
    /// interaction after it spawned).
    pub fn discard_last(&mut self) -> Option<Secondary> {
        self.secondaries.pop()
    }

    pub fn len(&self) -> usize {
        self.secondaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secondaries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of reservations that can still succeed.
    pub fn remaining(&self) -> usize {
        self.capacity - self.secondaries.len()
    }

    pub fn clear(&mut self) {
        self.secondaries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Secondary> {
        self.secondaries.iter()
    }
}
