//! The namespace differ: what must be added, removed, or updated.

use loctree_core::NamespaceContent;

/// Per-namespace difference between local reference content and its remote
/// counterpart. The three key sets are disjoint by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diff {
    /// Present locally, absent remotely.
    pub to_add: Vec<String>,
    /// Present on both sides with differing values.
    pub to_update: Vec<String>,
    /// Present remotely, absent locally.
    pub to_remove: Vec<String>,
}

impl Diff {
    /// Pure, total: never fails, callers pass empty maps for absent sides.
    pub fn between(local: &NamespaceContent, remote: &NamespaceContent) -> Diff {
        let mut diff = Diff::default();
        for (key, value) in local {
            match remote.get(key) {
                None => diff.to_add.push(key.clone()),
                Some(remote_value) if remote_value != value => diff.to_update.push(key.clone()),
                Some(_) => {}
            }
        }
        for key in remote.keys() {
            if !local.contains_key(key) {
                diff.to_remove.push(key.clone());
            }
        }
        diff
    }

    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_update.is_empty() && self.to_remove.is_empty()
    }

    /// Whether the diff changes the key set (additions or removals). Value
    /// updates alone are not structural.
    pub fn is_structural(&self) -> bool {
        !self.to_add.is_empty() || !self.to_remove.is_empty()
    }
}
