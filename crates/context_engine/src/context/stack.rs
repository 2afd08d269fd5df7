//! Ordered stack of context handles

use super::{ContextError, ContextKey};

/// Bottom-to-top list of active contexts. The last element is current.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextStack {
    keys: Vec<ContextKey>,
}

impl ContextStack {
    /// Create an empty stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `key` unless it is already on the stack.
    ///
    /// Returns whether the stack changed.
    pub fn enter(&mut self, key: ContextKey) -> bool {
        if self.contains(key) {
            return false;
        }
        self.keys.push(key);
        true
    }

    /// Remove `key` wherever it sits
    pub fn exit(&mut self, key: ContextKey) -> Result<(), ContextError> {
        let index = self
            .keys
            .iter()
            .position(|&k| k == key)
            .ok_or(ContextError::NotOnStack(key))?;
        self.keys.remove(index);
        Ok(())
    }

    /// Topmost key
    pub fn current(&self) -> Option<ContextKey> {
        self.keys.last().copied()
    }

    /// Whether `key` is on the stack
    pub fn contains(&self, key: ContextKey) -> bool {
        self.keys.contains(&key)
    }

    /// Keys bottom to top
    pub fn keys(&self) -> &[ContextKey] {
        &self.keys
    }

    /// Stack depth
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no context is active
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
