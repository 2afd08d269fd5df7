//! Context stack management
//!
//! A context is one logical screen or mode: gameplay, a pause menu, a dialog.
//! Contexts are registered once in an arena and addressed by [`ContextKey`];
//! the stack holds keys only, so membership and removal are by identity.
//!
//! ## Frame flow
//!
//! ```text
//! ContextManager::tick(dt)
//!      ↓
//! advance(top)  ── may enter/exit contexts through ContextControl
//!      ↓
//! compare top before/after → context_changed_last_frame
//!      ↓
//! render from the last opaque context up to the top
//! ```

mod control;
mod manager;
mod stack;

pub use control::ContextControl;
pub use manager::{ContextManager, InputFocus};
pub use stack::ContextStack;

use crate::render::RenderTarget;
use thiserror::Error;

slotmap::new_key_type! {
    /// Stable handle to a registered context
    pub struct ContextKey;
}

/// A stackable screen or mode
pub trait Context {
    /// Short label used in log output
    fn name(&self) -> &str {
        "context"
    }

    /// Run one frame of logic. Only the topmost context is advanced.
    ///
    /// `control` gives read access to this frame's semantic input and lets
    /// the context enter or exit contexts, including itself.
    fn advance(&mut self, delta_time: f32, control: &mut ContextControl<'_>);

    /// Draw this context's layer
    fn render(&self, surface: &mut dyn RenderTarget);

    /// Whether this context fully covers everything beneath it
    fn is_opaque(&self) -> bool;

    /// Whether this context wants discrete menu navigation instead of
    /// continuous movement
    fn is_menu(&self) -> bool;
}

/// Context stack errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// The key was never registered, or was unregistered
    #[error("Unknown context: {0:?}")]
    UnknownContext(ContextKey),

    /// Tried to exit a context that is not on the stack
    #[error("Context is not on the stack: {0:?}")]
    NotOnStack(ContextKey),

    /// Tried to unregister a context that is still on the stack
    #[error("Context is still on the stack: {0:?}")]
    StillOnStack(ContextKey),
}
