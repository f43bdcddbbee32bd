//! Element identity.
//!
//! Ids combine a process-wide monotonic counter with a random UUID fragment,
//! so an id is never reissued within a process and ids from different
//! sessions are unlikely to collide when designs are merged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Identifier of an element, unique within a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Issue a new id. Only element creation paths call this.
    pub(crate) fn fresh() -> Self {
        let seq = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let random = Uuid::new_v4().simple().to_string();
        Self(format!("el-{}-{}", seq, &random[..8]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ElementId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fresh_ids_are_unique() {
        let ids: HashSet<_> = (0..1000).map(|_| ElementId::fresh()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = ElementId::from("el-7-abcdef12");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""el-7-abcdef12""#);
    }
}
