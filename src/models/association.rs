use serde::{Deserialize, Serialize};

use super::Record;

/// Minimal projection of the other side of an association, as echoed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationRef {
    pub id: i64,
    #[serde(default)]
    pub nome: String,
}

impl Record for AssociationRef {
    fn id(&self) -> i64 {
        self.id
    }

    fn nome(&self) -> &str {
        &self.nome
    }
}

/// Association stub sent in create/update bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRef {
    pub id: i64,
}

impl IdRef {
    pub fn from_ids(ids: &[i64]) -> Vec<IdRef> {
        ids.iter().map(|&id| IdRef { id }).collect()
    }
}
