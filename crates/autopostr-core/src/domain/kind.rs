use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which of the two post collections a record lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    Scheduled,
    Planned,
}

/// Identity of a post across both collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostRef {
    pub kind: PostKind,
    pub id: Uuid,
}

impl PostRef {
    pub fn scheduled(id: Uuid) -> Self {
        Self {
            kind: PostKind::Scheduled,
            id,
        }
    }

    pub fn planned(id: Uuid) -> Self {
        Self {
            kind: PostKind::Planned,
            id,
        }
    }
}
