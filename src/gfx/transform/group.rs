//! # Transformable Groups
//!
//! A [`TransformableGroup`] is a virtual transform "handle" standing in for a
//! set of member objects. Editing the handle and then calling
//! [`TransformableGroup::update`] distributes the edit to every member.
//!
//! ## Accumulation policy
//!
//! - **One member**: the handle mirrors the member. `update` overwrites the
//!   member's position, rotation and scale with the handle's values.
//! - **Several members**: the handle is a relative control that rests at
//!   identity. `update` adds the handle's position and rotation offsets and its
//!   `scale - 1` offset to every member, then snaps the handle back to identity.
//!
//! In both cases a second `update` without an intervening edit changes nothing.
//!
//! ## Ownership
//!
//! The group only records [`ObjectId`]s. The owner of the objects passes its
//! [`TransformStore`] in whenever members have to be read or written, so a
//! group can never keep an object alive or reach into freed storage. Ids that
//! no longer resolve are skipped with a warning.

use std::collections::BTreeSet;

use log::{debug, warn};

use super::transformable::{ObjectId, Transform, TransformStore, Transformable};
use crate::error::{Result, StagehandError};

#[derive(Debug, Clone, Default)]
pub struct TransformableGroup {
    /// The editable handle
    transform: Transform,
    /// Handle state after the last structural change or applied edit
    baseline: Transform,
    members: BTreeSet<ObjectId>,
}

impl TransformableGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a member and resynchronises the handle
    ///
    /// Fails with [`StagehandError::NotFound`] if `store` has no object under
    /// `id`. Adding an id that is already a member only resynchronises.
    pub fn add(&mut self, id: ObjectId, store: &impl TransformStore) -> Result<()> {
        if store.transform(id).is_none() {
            return Err(StagehandError::NotFound(id));
        }
        self.members.insert(id);
        debug!("Group: added {} ({} members)", id, self.members.len());
        self.sync(store);
        Ok(())
    }

    /// Unregisters a member and resynchronises the handle
    pub fn remove(&mut self, id: ObjectId, store: &impl TransformStore) -> Result<()> {
        if !self.members.remove(&id) {
            return Err(StagehandError::NotFound(id));
        }
        debug!("Group: removed {} ({} members)", id, self.members.len());
        self.sync(store);
        Ok(())
    }

    /// Drops every member and resets the handle to identity
    pub fn clear(&mut self) {
        self.members.clear();
        self.reset_handle();
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.members.contains(&id)
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member ids in ascending order
    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.members.iter().copied()
    }

    /// The state the handle returns to once an edit has been applied
    pub fn baseline(&self) -> &Transform {
        &self.baseline
    }

    /// True if the handle was edited since the last [`update`](Self::update)
    pub fn has_pending_edit(&self) -> bool {
        self.transform.position != self.baseline.position
            || self.transform.rotation != self.baseline.rotation
            || self.transform.scale != self.baseline.scale
    }

    /// Re-reads the handle from the members, discarding any pending edit
    ///
    /// With exactly one member the handle takes that member's transform;
    /// otherwise it resets to identity. Call this after members were moved by
    /// something other than this group.
    pub fn sync(&mut self, store: &impl TransformStore) {
        if self.members.len() != 1 {
            self.reset_handle();
            return;
        }

        let Some(id) = self.members.first().copied() else {
            return;
        };
        match store.transform(id) {
            Some(member) => {
                self.transform.position = member.position;
                self.transform.rotation = member.rotation;
                self.transform.scale = member.scale;
                self.baseline = self.transform;
            }
            None => {
                warn!("Group: member {} no longer exists, resetting handle", id);
                self.reset_handle();
            }
        }
    }

    /// Pushes the pending handle edit to the members
    ///
    /// Returns how many members were written. Must be called once per edit of
    /// the handle: skipping a call drops the edit, while extra calls are no-ops.
    pub fn update(&mut self, store: &mut impl TransformStore) -> usize {
        if !self.has_pending_edit() {
            return 0;
        }

        if self.members.len() == 1 {
            return self.overwrite_single(store);
        }

        let delta_position = self.transform.position - self.baseline.position;
        let delta_rotation = self.transform.rotation - self.baseline.rotation;
        let delta_scale = self.transform.scale - self.baseline.scale;

        let mut written = 0;
        for &id in &self.members {
            let Some(member) = store.transform_mut(id) else {
                warn!("Group: skipping stale member {}", id);
                continue;
            };
            member.position += delta_position;
            member.rotation += delta_rotation;
            member.scale += delta_scale;
            written += 1;
        }

        self.reset_handle();
        written
    }

    fn overwrite_single(&mut self, store: &mut impl TransformStore) -> usize {
        let Some(id) = self.members.first().copied() else {
            return 0;
        };
        let Some(member) = store.transform_mut(id) else {
            warn!("Group: skipping stale member {}", id);
            self.baseline = self.transform;
            return 0;
        };

        member.position = self.transform.position;
        member.rotation = self.transform.rotation;
        member.scale = self.transform.scale;
        self.baseline = self.transform;
        1
    }

    fn reset_handle(&mut self) {
        let origin = self.transform.origin;
        self.transform = Transform::identity();
        self.transform.origin = origin;
        self.baseline = self.transform;
    }
}

impl Transformable for TransformableGroup {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}
