//! The three-tier instance cache used while resolving beans.
//!
//! - **ready**: fully constructed and populated instances. Terminal.
//! - **early**: instances handed out while their owner is still being populated.
//! - **factory**: freshly constructed, not yet populated instances, present only
//!   while construction is in flight and nobody has asked for them yet.
//!
//! Plus the in-creation set. An identity lives in at most one of
//! {ready, early, factory}; an identity in creation may also have an early or
//! factory entry, never a ready one.

use crate::descriptor::Instance;
use std::collections::{HashMap, HashSet};
use tracing::trace;

#[derive(Debug, Default)]
pub(crate) struct InstanceCache {
  ready: HashMap<String, Instance>,
  early: HashMap<String, Instance>,
  factories: HashMap<String, Instance>,
  in_creation: HashSet<String>,
}

impl InstanceCache {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  pub(crate) fn get_ready(&self, id: &str) -> Option<&Instance> {
    self.ready.get(id)
  }

  /// Returns an early reference for an identity that is still being created.
  ///
  /// A factory entry is promoted into the early tier the first time it is
  /// requested with `allow_early`; later calls hit the early tier directly.
  pub(crate) fn get_early_or_factory(&mut self, id: &str, allow_early: bool) -> Option<Instance> {
    if self.ready.contains_key(id) || !self.in_creation.contains(id) {
      return None;
    }
    if let Some(early) = self.early.get(id) {
      trace!(bean = id, "early reference cache hit");
      return Some(early.clone());
    }
    if !allow_early {
      return None;
    }
    let promoted = self.factories.remove(id)?;
    trace!(bean = id, "promoting factory entry to early reference");
    self.early.insert(id.to_string(), promoted.clone());
    Some(promoted)
  }

  /// Records a finished instance and drops every transient trace of it.
  pub(crate) fn commit_ready(&mut self, id: &str, instance: Instance) {
    self.factories.remove(id);
    self.early.remove(id);
    self.in_creation.remove(id);
    self.ready.insert(id.to_string(), instance);
  }

  /// Marks `id` as in creation. Returns `false` if it already was.
  pub(crate) fn start_creation(&mut self, id: &str) -> bool {
    self.in_creation.insert(id.to_string())
  }

  #[cfg(test)]
  pub(crate) fn is_in_creation(&self, id: &str) -> bool {
    self.in_creation.contains(id)
  }

  /// Makes a not-yet-populated instance discoverable to recursive resolution.
  pub(crate) fn publish_factory(&mut self, id: &str, instance: Instance) {
    if self.ready.contains_key(id) {
      return;
    }
    self.factories.insert(id.to_string(), instance);
    self.early.remove(id);
  }

  /// Seeds a pre-built instance directly into the ready tier.
  pub(crate) fn seed_ready(&mut self, id: String, instance: Instance) {
    self.ready.insert(id, instance);
  }

  /// Consumes the cache, yielding the ready tier.
  ///
  /// Only meaningful once nothing is left in creation.
  pub(crate) fn into_ready(self) -> HashMap<String, Instance> {
    debug_assert!(self.in_creation.is_empty());
    self.ready
  }
}
