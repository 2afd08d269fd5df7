//! Stack access handed to a context while it advances

use super::{Context, ContextError, ContextKey, ContextStack};
use crate::input::InputActionStates;
use slotmap::SlotMap;

/// Handle through which the advancing context reads input and pushes or pops
/// contexts.
///
/// Changes apply immediately, so a context that exits itself is gone before
/// this frame's render pass.
pub struct ContextControl<'a> {
    this: ContextKey,
    stack: &'a mut ContextStack,
    registry: &'a SlotMap<ContextKey, Option<Box<dyn Context>>>,
    input: &'a InputActionStates,
}

impl<'a> ContextControl<'a> {
    pub(super) fn new(
        this: ContextKey,
        stack: &'a mut ContextStack,
        registry: &'a SlotMap<ContextKey, Option<Box<dyn Context>>>,
        input: &'a InputActionStates,
    ) -> Self {
        Self {
            this,
            stack,
            registry,
            input,
        }
    }

    /// Key of the context being advanced
    pub fn this(&self) -> ContextKey {
        self.this
    }

    /// This frame's semantic input
    pub fn input(&self) -> &InputActionStates {
        self.input
    }

    /// Push a registered context if it is not already active.
    ///
    /// Returns whether the stack changed.
    pub fn enter(&mut self, key: ContextKey) -> Result<bool, ContextError> {
        if !self.registry.contains_key(key) {
            return Err(ContextError::UnknownContext(key));
        }
        let pushed = self.stack.enter(key);
        if pushed {
            log::debug!("Context {:?} entered {:?}", self.this, key);
        }
        Ok(pushed)
    }

    /// Remove a context from the stack
    pub fn exit(&mut self, key: ContextKey) -> Result<(), ContextError> {
        self.stack.exit(key)?;
        log::debug!("Context {:?} exited {:?}", self.this, key);
        Ok(())
    }

    /// Remove the advancing context from the stack
    pub fn exit_self(&mut self) -> Result<(), ContextError> {
        self.exit(self.this)
    }

    /// Empty the stack, top first
    pub fn exit_all(&mut self) {
        while let Some(key) = self.stack.current() {
            // current() came from the stack, so exit cannot fail
            let _ = self.stack.exit(key);
        }
        log::debug!("Context {:?} cleared the stack", self.this);
    }

    /// Whether `key` is on the stack
    pub fn is_active(&self, key: ContextKey) -> bool {
        self.stack.contains(key)
    }

    /// Current top of the stack
    pub fn current(&self) -> Option<ContextKey> {
        self.stack.current()
    }

    /// Stack contents, bottom to top
    pub fn stack(&self) -> &[ContextKey] {
        self.stack.keys()
    }
}
