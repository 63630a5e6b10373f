//! Node converter collaborator.
//!
//! Resolves constant RDF terms to the persistent identifiers of their
//! nodes-table rows.

use crate::ast::Value;
use crate::error::{Result, TranslateError};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt::Debug;

/// Handle to a persisted node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    pub id: i64,
}

/// Resolves RDF terms to node identifiers.
pub trait NodeConverter: Debug + Send + Sync {
    fn convert(&self, value: &Value) -> Result<NodeHandle>;
}

/// Thread-safe in-memory id allocator.
///
/// Known terms keep their id; unknown terms get the next id on first use.
#[derive(Debug)]
pub struct InMemoryNodeConverter {
    state: Mutex<State>,
}

#[derive(Debug)]
struct State {
    ids: HashMap<Value, i64>,
    next_id: i64,
}

impl Default for InMemoryNodeConverter {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl InMemoryNodeConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate ids from `first_id` upwards.
    pub fn starting_at(first_id: i64) -> Self {
        Self {
            state: Mutex::new(State {
                ids: HashMap::new(),
                next_id: first_id,
            }),
        }
    }

    /// Pin `value` to `id`.
    pub fn with_node(self, value: Value, id: i64) -> Self {
        {
            let mut state = self.state.lock();
            state.ids.insert(value, id);
            if id >= state.next_id {
                state.next_id = id + 1;
            }
        }
        self
    }

    pub fn len(&self) -> usize {
        self.state.lock().ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NodeConverter for InMemoryNodeConverter {
    fn convert(&self, value: &Value) -> Result<NodeHandle> {
        let mut state = self.state.lock();
        if let Some(&id) = state.ids.get(value) {
            return Ok(NodeHandle { id });
        }
        let id = state.next_id;
        state.next_id = id
            .checked_add(1)
            .ok_or_else(|| TranslateError::node_conversion(value.string_value(), "node ids exhausted"))?;
        state.ids.insert(value.clone(), id);
        Ok(NodeHandle { id })
    }
}
