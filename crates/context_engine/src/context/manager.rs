//! Context Manager - owns every context and drives the active one

use super::{Context, ContextControl, ContextError, ContextKey, ContextStack};
use crate::input::InputActionStates;
use crate::render::{Color, RecordingSurface, RenderTarget};
use slotmap::SlotMap;

/// What the input manager needs to know about the stack each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputFocus {
    /// The top of the stack changed during the previous tick
    pub context_changed_last_frame: bool,
    /// The current context wants menu navigation. False on an empty stack.
    pub in_menu: bool,
}

/// Context Manager
///
/// Contexts live in an arena so they can stay registered while off the stack
/// (a menu that keeps its cursor between openings, say). Only the topmost
/// context is advanced each tick; every context from the last opaque one
/// upward is rendered, bottom first.
pub struct ContextManager<S = RecordingSurface> {
    /// Registered contexts. A slot is `None` only while its context advances.
    contexts: SlotMap<ContextKey, Option<Box<dyn Context>>>,

    stack: ContextStack,

    /// Render target, if the host bound one
    surface: Option<S>,

    /// Clear colour applied before contexts draw
    background: Color,

    context_changed_last_frame: bool,
    time_since_last_switch: f32,
}

impl<S: RenderTarget> ContextManager<S> {
    /// Create an empty manager with a white background
    pub fn new() -> Self {
        Self::with_background(Color::WHITE)
    }

    /// Create an empty manager with a custom clear colour
    pub fn with_background(background: Color) -> Self {
        Self {
            contexts: SlotMap::with_key(),
            stack: ContextStack::new(),
            surface: None,
            background,
            context_changed_last_frame: false,
            time_since_last_switch: 0.0,
        }
    }

    /// Register a context; it is not entered
    pub fn register<C: Context + 'static>(&mut self, context: C) -> ContextKey {
        self.register_boxed(Box::new(context))
    }

    /// Register an already boxed context
    pub fn register_boxed(&mut self, context: Box<dyn Context>) -> ContextKey {
        let name = context.name().to_string();
        let key = self.contexts.insert(Some(context));
        log::debug!("Registered context '{}' as {:?}", name, key);
        key
    }

    /// Remove a context from the arena and hand it back.
    ///
    /// It must be off the stack first.
    pub fn unregister(&mut self, key: ContextKey) -> Result<Box<dyn Context>, ContextError> {
        if self.stack.contains(key) {
            return Err(ContextError::StillOnStack(key));
        }
        match self.contexts.remove(key) {
            Some(Some(context)) => {
                log::debug!("Unregistered context '{}' ({:?})", context.name(), key);
                Ok(context)
            }
            _ => Err(ContextError::UnknownContext(key)),
        }
    }

    /// Borrow a registered context
    pub fn get(&self, key: ContextKey) -> Option<&dyn Context> {
        self.contexts.get(key).and_then(|slot| slot.as_deref())
    }

    /// Mutably borrow a registered context
    pub fn get_mut(&mut self, key: ContextKey) -> Option<&mut (dyn Context + 'static)> {
        self.contexts.get_mut(key).and_then(|slot| slot.as_deref_mut())
    }

    /// Push a registered context unless it is already on the stack.
    ///
    /// Returns whether the stack changed.
    pub fn enter(&mut self, key: ContextKey) -> Result<bool, ContextError> {
        if !self.contexts.contains_key(key) {
            return Err(ContextError::UnknownContext(key));
        }
        let pushed = self.stack.enter(key);
        if pushed {
            log::debug!("Entered context {:?} (depth {})", key, self.stack.len());
        }
        Ok(pushed)
    }

    /// Remove a context from the stack by identity
    pub fn exit(&mut self, key: ContextKey) -> Result<(), ContextError> {
        self.stack.exit(key)?;
        log::debug!("Exited context {:?} (depth {})", key, self.stack.len());
        Ok(())
    }

    /// Key of the topmost context
    pub fn current(&self) -> Option<ContextKey> {
        self.stack.current()
    }

    /// The topmost context itself
    pub fn current_context(&self) -> Option<&dyn Context> {
        self.current().and_then(|key| self.get(key))
    }

    /// Stack contents, bottom to top
    pub fn stack(&self) -> &[ContextKey] {
        self.stack.keys()
    }

    /// Whether no context is active
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Number of registered contexts, on the stack or not
    pub fn registered_count(&self) -> usize {
        self.contexts.len()
    }

    /// Bind the render target
    pub fn bind_surface(&mut self, surface: S) {
        self.surface = Some(surface);
    }

    /// Unbind and return the render target
    pub fn unbind_surface(&mut self) -> Option<S> {
        self.surface.take()
    }

    /// Bound render target
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Bound render target, mutably (for presenting)
    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Whether the top of the stack changed during the last tick
    pub fn context_changed_last_frame(&self) -> bool {
        self.context_changed_last_frame
    }

    /// Seconds since the top of the stack last changed
    pub fn time_since_last_switch(&self) -> f32 {
        self.time_since_last_switch
    }

    /// Snapshot consumed by [`InputManager::update`](crate::input::InputManager::update)
    pub fn input_focus(&self) -> InputFocus {
        InputFocus {
            context_changed_last_frame: self.context_changed_last_frame,
            in_menu: self.current_context().is_some_and(|context| context.is_menu()),
        }
    }

    /// Contexts the next render pass draws: the last opaque context and
    /// everything above it, bottom first. With no opaque context, the whole
    /// stack.
    pub fn visible_contexts(&self) -> &[ContextKey] {
        let keys = self.stack.keys();
        &keys[self.render_start()..]
    }

    /// Run one frame: advance the current context, track switches, render.
    pub fn tick(&mut self, delta_time: f32, input: &InputActionStates) {
        let Some(before) = self.stack.current() else {
            return;
        };

        self.advance(before, delta_time, input);

        self.context_changed_last_frame = self.stack.current() != Some(before);
        if self.context_changed_last_frame {
            log::debug!(
                "Context switched {:?} -> {:?} after {:.3}s",
                before,
                self.stack.current(),
                self.time_since_last_switch + delta_time
            );
            self.time_since_last_switch = 0.0;
        } else {
            self.time_since_last_switch += delta_time;
        }

        self.render();
    }

    fn advance(&mut self, key: ContextKey, delta_time: f32, input: &InputActionStates) {
        let Some(mut context) = self.contexts.get_mut(key).and_then(Option::take) else {
            log::warn!("Context {:?} is on the stack but not registered", key);
            return;
        };

        {
            let mut control = ContextControl::new(key, &mut self.stack, &self.contexts, input);
            context.advance(delta_time, &mut control);
        }

        if let Some(slot) = self.contexts.get_mut(key) {
            *slot = Some(context);
        }
    }

    fn render_start(&self) -> usize {
        self.stack
            .keys()
            .iter()
            .rposition(|&key| self.get(key).is_some_and(|context| context.is_opaque()))
            .unwrap_or(0)
    }

    fn render(&mut self) {
        let start = self.render_start();
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        surface.clear(self.background);
        for &key in &self.stack.keys()[start..] {
            if let Some(Some(context)) = self.contexts.get(key) {
                log::trace!("Rendering context '{}' ({:?})", context.name(), key);
                context.render(&mut *surface);
            }
        }
    }
}

impl<S: RenderTarget> Default for ContextManager<S> {
    fn default() -> Self {
        Self::new()
    }
}
