use crate::io::kv::KvStore;

/// Durable slot holding the last signed-in identity.
pub const USER_KEY: &str = "wedding_planner_user";

/// Normalize a self-declared display name into a storage partition key:
/// trimmed, lower-cased, whitespace runs collapsed to underscores.
/// Returns `None` for a blank name.
pub fn normalize_identity(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut out = String::with_capacity(trimmed.len());
    let mut in_gap = false;
    for c in trimmed.chars() {
        if c.is_whitespace() {
            if !in_gap {
                out.push('_');
                in_gap = true;
            }
        } else {
            for lower in c.to_lowercase() {
                out.push(lower);
            }
            in_gap = false;
        }
    }
    Some(out)
}

/// The current identity plus its durable slot.
///
/// The identity is a self-declared display name, not a credential; it only
/// selects which storage partition the synced collections read and write.
#[derive(Debug, Clone, Default)]
pub struct IdentityProvider {
    current: Option<String>,
}

impl IdentityProvider {
    /// Restore the last signed-in identity from the store.
    pub fn load(store: &dyn KvStore) -> Self {
        IdentityProvider {
            current: store.get(USER_KEY),
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Normalize and persist a new identity. Blank names are rejected and
    /// leave the current identity unchanged. Returns the new identity.
    pub fn sign_in(&mut self, store: &mut dyn KvStore, raw: &str) -> Option<String> {
        let identity = normalize_identity(raw)?;
        self.current = Some(identity.clone());
        if let Err(e) = store.set(USER_KEY, &identity) {
            tracing::warn!(error = %e, "could not persist identity; it will not survive restart");
        }
        Some(identity)
    }

    /// Clear the identity and its durable slot.
    pub fn sign_out(&mut self, store: &mut dyn KvStore) {
        self.current = None;
        if let Err(e) = store.remove(USER_KEY) {
            tracing::warn!(error = %e, "could not clear identity slot");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::kv::MemoryStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(normalize_identity("  Sam Lee "), Some("sam_lee".into()));
        assert_eq!(normalize_identity("RILEY"), Some("riley".into()));
        assert_eq!(
            normalize_identity("a \t b\n c"),
            Some("a_b_c".to_string())
        );
        assert_eq!(normalize_identity("   "), None);
        assert_eq!(normalize_identity(""), None);
    }

    #[test]
    fn sign_in_persists_and_sign_out_clears() {
        let mut store = MemoryStore::new();
        let mut identity = IdentityProvider::default();

        assert_eq!(
            identity.sign_in(&mut store, "Sam Lee"),
            Some("sam_lee".to_string())
        );
        assert_eq!(store.get(USER_KEY).as_deref(), Some("sam_lee"));

        // Survives a reload
        let restored = IdentityProvider::load(&store);
        assert_eq!(restored.current(), Some("sam_lee"));

        identity.sign_out(&mut store);
        assert_eq!(identity.current(), None);
        assert!(store.get(USER_KEY).is_none());
    }

    #[test]
    fn blank_sign_in_is_rejected() {
        let mut store = MemoryStore::new();
        let mut identity = IdentityProvider::default();
        identity.sign_in(&mut store, "sam");

        assert_eq!(identity.sign_in(&mut store, "   "), None);
        assert_eq!(identity.current(), Some("sam"));
    }
}
