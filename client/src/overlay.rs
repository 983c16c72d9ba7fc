//! Optimistic list state.
//!
//! [`PendingOverlay`] keeps what the server has confirmed apart from what
//! the user has just done. Views render [`PendingOverlay::visible`]; server
//! responses either promote a pending change into the confirmed list or
//! drop it. Pending state never overwrites confirmed state.
//!
//! A reload may be answered after local changes were already confirmed.
//! Those changes are replayed over the reloaded list, so a stale response
//! neither hides a saved item nor brings back a deleted one.

use std::collections::{BTreeMap, BTreeSet};

use uuid::Uuid;

use crate::error::{StateError, StateResult};
use crate::models::Entity;

/// Inserts `item`, replacing any existing entry with the same id in place.
/// New items go first.
pub fn upsert<T: Entity>(items: &mut Vec<T>, item: T) {
    match items.iter().position(|existing| existing.id() == item.id()) {
        Some(index) => items[index] = item,
        None => items.insert(0, item),
    }
}

/// Issued by [`PendingOverlay::begin_reload`], handed back with the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReloadMark(u64);

/// A server acknowledgement, kept until a reload issued after it lands.
#[derive(Debug, Clone)]
enum Settled<T> {
    Saved(T),
    Removed(String),
}

/// Confirmed items plus not-yet-acknowledged local changes.
#[derive(Debug, Clone)]
pub struct PendingOverlay<T> {
    confirmed: Vec<T>,
    /// Temporary key, item. Newest first.
    creates: Vec<(String, T)>,
    updates: BTreeMap<String, T>,
    removals: BTreeSet<String>,
    epoch: u64,
    /// Oldest first.
    settled: Vec<(u64, Settled<T>)>,
}

impl<T> Default for PendingOverlay<T> {
    fn default() -> Self {
        Self {
            confirmed: Vec::new(),
            creates: Vec::new(),
            updates: BTreeMap::new(),
            removals: BTreeSet::new(),
            epoch: 0,
            settled: Vec::new(),
        }
    }
}

impl<T: Entity + Clone> PendingOverlay<T> {
    pub fn new(confirmed: Vec<T>) -> Self {
        Self { confirmed, ..Self::default() }
    }

    /// Call when a reload request is sent.
    pub fn begin_reload(&mut self) -> ReloadMark {
        self.epoch += 1;
        ReloadMark(self.epoch)
    }

    /// Replaces the confirmed list with a reload answered for `mark`.
    ///
    /// Pending changes survive. Saves and removals confirmed after `mark`
    /// was issued are replayed on top; older ones are already reflected in
    /// `items` and are forgotten.
    pub fn finish_reload(&mut self, mark: ReloadMark, items: Vec<T>) {
        self.settled.retain(|(epoch, _)| *epoch >= mark.0);

        let mut confirmed = items;
        for (_, settled) in &self.settled {
            match settled {
                Settled::Saved(item) => upsert(&mut confirmed, item.clone()),
                Settled::Removed(id) => confirmed.retain(|item| item.id() != id),
            }
        }
        if !self.settled.is_empty() {
            log::debug!("replayed {} local confirmation(s) over a reload", self.settled.len());
        }
        self.confirmed = confirmed;
    }

    fn settle(&mut self, settled: Settled<T>) {
        self.settled.push((self.epoch, settled));
    }

    pub fn confirmed(&self) -> &[T] {
        &self.confirmed
    }

    /// What the user should see.
    pub fn visible(&self) -> Vec<&T> {
        let created = self.creates.iter().map(|(_, item)| item);
        let existing = self
            .confirmed
            .iter()
            .filter(|item| !self.removals.contains(item.id()))
            .map(|item| self.updates.get(item.id()).unwrap_or(item));
        created.chain(existing).collect()
    }

    /// Owned copy of [`visible`](Self::visible), for list pipelines.
    pub fn snapshot(&self) -> Vec<T> {
        self.visible().into_iter().cloned().collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.creates.is_empty() || !self.updates.is_empty() || !self.removals.is_empty()
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.creates.iter().any(|(key, _)| key == id)
            || self.updates.contains_key(id)
            || self.removals.contains(id)
    }

    // =========================================================================
    // Create
    // =========================================================================

    /// Shows `item` right away. Returns the key to resolve it with.
    pub fn begin_create(&mut self, item: T) -> String {
        let key = format!("tmp-{}", Uuid::new_v4());
        self.creates.insert(0, (key.clone(), item));
        key
    }

    /// Like [`begin_create`](Self::begin_create) for items that carry the
    /// temporary key as their id.
    pub fn begin_create_with(&mut self, make: impl FnOnce(&str) -> T) -> String {
        let key = format!("tmp-{}", Uuid::new_v4());
        let item = make(&key);
        self.creates.insert(0, (key.clone(), item));
        key
    }

    /// Swaps the placeholder for the saved entity.
    pub fn confirm_create(&mut self, key: &str, saved: T) -> StateResult<()> {
        self.take_create(key)?;
        self.settle(Settled::Saved(saved.clone()));
        upsert(&mut self.confirmed, saved);
        Ok(())
    }

    /// Drops the placeholder and hands it back.
    pub fn fail_create(&mut self, key: &str) -> StateResult<T> {
        self.take_create(key)
    }

    fn take_create(&mut self, key: &str) -> StateResult<T> {
        let index = self
            .creates
            .iter()
            .position(|(k, _)| k == key)
            .ok_or_else(|| StateError::UnknownPending(key.to_string()))?;
        Ok(self.creates.remove(index).1)
    }

    // =========================================================================
    // Update
    // =========================================================================

    /// Shows the edited copy in place of the confirmed one.
    pub fn begin_update(&mut self, edited: T) -> StateResult<()> {
        let id = edited.id().to_string();
        if !self.confirmed.iter().any(|item| item.id() == id) {
            return Err(StateError::NotFound(id));
        }
        self.updates.insert(id, edited);
        Ok(())
    }

    pub fn confirm_update(&mut self, saved: T) -> StateResult<()> {
        self.updates
            .remove(saved.id())
            .ok_or_else(|| StateError::UnknownPending(saved.id().to_string()))?;
        self.settle(Settled::Saved(saved.clone()));
        upsert(&mut self.confirmed, saved);
        Ok(())
    }

    /// Reverts to the confirmed copy.
    pub fn fail_update(&mut self, id: &str) -> StateResult<T> {
        self.updates.remove(id).ok_or_else(|| StateError::UnknownPending(id.to_string()))
    }

    // =========================================================================
    // Remove
    // =========================================================================

    /// Hides a confirmed item.
    pub fn begin_remove(&mut self, id: &str) -> StateResult<()> {
        if !self.confirmed.iter().any(|item| item.id() == id) {
            return Err(StateError::NotFound(id.to_string()));
        }
        self.removals.insert(id.to_string());
        Ok(())
    }

    pub fn confirm_remove(&mut self, id: &str) -> StateResult<()> {
        if !self.removals.remove(id) {
            return Err(StateError::UnknownPending(id.to_string()));
        }
        self.confirmed.retain(|item| item.id() != id);
        self.updates.remove(id);
        self.settle(Settled::Removed(id.to_string()));
        Ok(())
    }

    /// Brings the hidden item back.
    pub fn fail_remove(&mut self, id: &str) -> StateResult<()> {
        if self.removals.remove(id) {
            Ok(())
        } else {
            Err(StateError::UnknownPending(id.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
        title: String,
    }

    impl Entity for Item {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn item(id: &str, title: &str) -> Item {
        Item { id: id.into(), title: title.into() }
    }

    fn titles(overlay: &PendingOverlay<Item>) -> Vec<String> {
        overlay.visible().iter().map(|i| i.title.clone()).collect()
    }

    #[test]
    fn test_upsert_replaces_or_prepends() {
        let mut items = vec![item("1", "a")];
        upsert(&mut items, item("1", "b"));
        upsert(&mut items, item("2", "c"));
        assert_eq!(items, vec![item("2", "c"), item("1", "b")]);
    }

    #[test]
    fn test_create_confirmed() {
        let mut overlay = PendingOverlay::new(vec![item("1", "Старый")]);
        let key = overlay.begin_create(item("", "Новый"));
        assert_eq!(titles(&overlay), vec!["Новый", "Старый"]);
        assert!(overlay.is_pending(&key));

        overlay.confirm_create(&key, item("2", "Новый")).unwrap();
        assert!(!overlay.has_pending());
        assert_eq!(overlay.confirmed().len(), 2);
        assert_eq!(overlay.confirmed()[0].id, "2");
    }

    #[test]
    fn test_create_with_temporary_id_is_pending() {
        let mut overlay = PendingOverlay::new(vec![item("a", "Старый")]);
        let key = overlay.begin_create_with(|key| item(key, "Новый"));

        assert!(key.starts_with("tmp-"));
        assert_eq!(overlay.visible()[0].id(), key);
        assert!(overlay.is_pending(&key));
        assert!(!overlay.is_pending("a"));
    }

    #[test]
    fn test_create_failed_is_discarded() {
        let mut overlay = PendingOverlay::new(vec![item("1", "Старый")]);
        let key = overlay.begin_create(item("", "Новый"));
        let dropped = overlay.fail_create(&key).unwrap();
        assert_eq!(dropped.title, "Новый");
        assert_eq!(titles(&overlay), vec!["Старый"]);
        assert_eq!(overlay.fail_create(&key), Err(StateError::UnknownPending(key)));
    }

    #[test]
    fn test_update_never_overwrites_confirmed() {
        let mut overlay = PendingOverlay::new(vec![item("1", "До")]);
        overlay.begin_update(item("1", "После")).unwrap();
        assert_eq!(titles(&overlay), vec!["После"]);
        assert_eq!(overlay.confirmed()[0].title, "До");

        overlay.fail_update("1").unwrap();
        assert_eq!(titles(&overlay), vec!["До"]);
        assert_eq!(overlay.begin_update(item("9", "x")), Err(StateError::NotFound("9".into())));
    }

    #[test]
    fn test_remove_restored_on_failure() {
        let mut overlay = PendingOverlay::new(vec![item("1", "a"), item("2", "b")]);
        overlay.begin_remove("1").unwrap();
        assert_eq!(titles(&overlay), vec!["b"]);

        overlay.fail_remove("1").unwrap();
        assert_eq!(titles(&overlay), vec!["a", "b"]);

        overlay.begin_remove("1").unwrap();
        overlay.confirm_remove("1").unwrap();
        assert_eq!(overlay.confirmed(), &[item("2", "b")]);
    }

    #[test]
    fn test_reload_keeps_pending() {
        let mut overlay = PendingOverlay::new(Vec::new());
        let reload = overlay.begin_reload();
        overlay.begin_create(item("", "Черновик"));
        overlay.finish_reload(reload, vec![item("1", "С сервера")]);
        assert_eq!(titles(&overlay), vec!["Черновик", "С сервера"]);
    }

    #[test]
    fn test_late_reload_keeps_saved_item() {
        let mut overlay = PendingOverlay::new(Vec::new());
        let reload = overlay.begin_reload();

        let key = overlay.begin_create(item("", "Новый"));
        overlay.confirm_create(&key, item("c-new", "Новый")).unwrap();
        overlay.finish_reload(reload, vec![item("c-old", "Старый")]);

        let ids: Vec<&str> = overlay.visible().iter().map(|i| i.id()).collect();
        assert_eq!(ids, vec!["c-new", "c-old"]);
    }

    #[test]
    fn test_late_reload_keeps_edits_and_removals() {
        let mut overlay = PendingOverlay::new(vec![item("1", "До"), item("2", "Удаляемый")]);
        let reload = overlay.begin_reload();

        overlay.begin_update(item("1", "После")).unwrap();
        overlay.confirm_update(item("1", "После")).unwrap();
        overlay.begin_remove("2").unwrap();
        overlay.confirm_remove("2").unwrap();

        overlay.finish_reload(reload, vec![item("1", "До"), item("2", "Удаляемый")]);
        assert_eq!(titles(&overlay), vec!["После"]);
    }

    #[test]
    fn test_fresh_reload_is_server_truth() {
        let mut overlay = PendingOverlay::new(Vec::new());
        let key = overlay.begin_create(item("", "Новый"));
        overlay.confirm_create(&key, item("c-new", "Новый")).unwrap();

        // Issued after the save, so the server list already accounts for it
        let reload = overlay.begin_reload();
        overlay.finish_reload(reload, vec![item("c-old", "Старый")]);
        assert_eq!(titles(&overlay), vec!["Старый"]);

        let again = overlay.begin_reload();
        overlay.finish_reload(again, vec![item("c-old", "Старый")]);
        assert_eq!(titles(&overlay), vec!["Старый"]);
    }
}
