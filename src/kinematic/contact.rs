//! Contacts reported by the environment and the fixed-capacity buffer that
//! holds them.

use crate::constants::HIT_BUFFER_CAPACITY;
use bevy::math::Vec2;

/// One surface touched by a shape cast.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Contact {
    /// Outward surface normal of the obstacle (points back toward the body).
    pub normal: Vec2,
    /// Distance travelled along the cast direction before touching.
    pub distance: f32,
}

impl Contact {
    pub fn new(normal: Vec2, distance: f32) -> Self {
        Self { normal, distance }
    }
}

/// Stack-allocated contact list with a hard cap of [`HIT_BUFFER_CAPACITY`].
///
/// Reused across resolve calls so a step never allocates.  Pushing into a
/// full buffer drops the contact: truncation is a known limitation, not an
/// error.
#[derive(Debug, Clone)]
pub struct ContactBuffer {
    contacts: [Contact; HIT_BUFFER_CAPACITY],
    len: usize,
}

impl Default for ContactBuffer {
    fn default() -> Self {
        Self {
            contacts: [Contact::default(); HIT_BUFFER_CAPACITY],
            len: 0,
        }
    }
}

impl ContactBuffer {
    pub const CAPACITY: usize = HIT_BUFFER_CAPACITY;

    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Append a contact.  Returns `false` (and keeps the buffer unchanged)
    /// when already full.
    pub fn push(&mut self, contact: Contact) -> bool {
        if self.is_full() {
            return false;
        }
        self.contacts[self.len] = contact;
        self.len += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == Self::CAPACITY
    }

    /// Contacts in the order the provider reported them.
    pub fn iter(&self) -> impl Iterator<Item = &Contact> {
        self.contacts[..self.len].iter()
    }

    pub fn as_slice(&self) -> &[Contact] {
        &self.contacts[..self.len]
    }
}

/// Environment query used by the mover.
///
/// Sweeps the body's shape from `origin` along the unit vector `direction`
/// for up to `max_distance` and appends every surface touched to `hits`.
/// The buffer is cleared by the caller beforehand.  Implementors bind the
/// shape and the layer filter themselves.  Returns the number of contacts
/// written.
pub trait ShapeCaster {
    fn cast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        hits: &mut ContactBuffer,
    ) -> usize;
}
