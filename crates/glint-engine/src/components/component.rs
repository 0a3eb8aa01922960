use std::any::Any;

use crate::components::game_object::GameObject;
use crate::core::context::Context;

/// Uniform downcast access for trait objects. Blanket-implemented, so
/// component types only write their lifecycle hooks.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Lifecycle hook set for everything attachable to a GameObject.
///
/// Hooks receive the owning object and the engine context explicitly; no
/// component stores either. `init` runs exactly once, right after the
/// component is attached. While one of an object's hooks is executing, that
/// component is absent from its owner's lookup table, so a component must
/// not expect to find itself through `owner`.
pub trait Component: AsAny + 'static {
    /// Attach-time setup: resolve siblings, register with services.
    fn init(&mut self, _owner: &mut GameObject, _ctx: &mut Context) {}

    fn handle_input(&mut self, _owner: &mut GameObject, _ctx: &mut Context) {}

    fn update(&mut self, _dt: f32, _owner: &mut GameObject, _ctx: &mut Context) {}

    fn render(&mut self, _owner: &mut GameObject, _ctx: &mut Context) {}

    /// Detach-time teardown: undo whatever `init` registered.
    /// Runs exactly once before the component is dropped.
    fn clean(&mut self, _owner: &mut GameObject, _ctx: &mut Context) {}
}
