use crate::core::context::Context;
use crate::core::scene::Scene;

/// One queued scene transition. Requests overwrite each other, so at most
/// one is waiting at any time; see the `request_*` methods on
/// [`Context`](crate::core::context::Context).
pub enum SceneAction {
    None,
    Push(Scene),
    Pop,
    Replace(Scene),
}

/// Last-in-first-out stack of scenes.
///
/// Input and update reach the top scene only; render walks the whole stack
/// bottom-up so lower scenes stay visible under overlays. Transitions are
/// never applied mid-pass: the queued action is drained from the context
/// and applied right after the top scene's update, which lets a scene
/// request its own replacement while it is still running.
pub struct SceneManager {
    stack: Vec<Scene>,
}

impl SceneManager {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Initialize (when needed) and push a scene now. Bootstrap path; game
    /// code inside a pass uses the context requests instead.
    pub fn push(&mut self, mut scene: Scene, ctx: &mut Context) {
        log::debug!("scene stack: push '{}'", scene.name());
        if !scene.is_initialized() {
            scene.init(ctx);
        }
        self.stack.push(scene);
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn top(&self) -> Option<&Scene> {
        self.stack.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Scene> {
        self.stack.last_mut()
    }

    /// Fan input to the top scene.
    pub fn handle_input(&mut self, ctx: &mut Context) {
        if let Some(top) = self.stack.last_mut() {
            top.handle_input(ctx);
        }
    }

    /// Update the top scene, then apply the queued transition, if any.
    pub fn update(&mut self, dt: f32, ctx: &mut Context) {
        if let Some(top) = self.stack.last_mut() {
            top.update(dt, ctx);
        }
        match ctx.take_scene_action() {
            SceneAction::None => {}
            SceneAction::Push(scene) => self.push(scene, ctx),
            SceneAction::Pop => self.pop(ctx),
            SceneAction::Replace(scene) => self.replace(scene, ctx),
        }
    }

    /// Render every scene, bottom of the stack first.
    pub fn render(&mut self, ctx: &mut Context) {
        for scene in &mut self.stack {
            scene.render(ctx);
        }
    }

    /// Clean every scene, top of the stack first. The stack ends up empty.
    pub fn shutdown(&mut self, ctx: &mut Context) {
        log::debug!("scene stack: shutdown, cleaning {} scene(s)", self.stack.len());
        while let Some(mut scene) = self.stack.pop() {
            scene.clean(ctx);
        }
    }

    fn pop(&mut self, ctx: &mut Context) {
        match self.stack.pop() {
            Some(mut scene) => {
                log::debug!("scene stack: pop '{}'", scene.name());
                scene.clean(ctx);
            }
            None => log::warn!("scene stack: pop on an empty stack"),
        }
    }

    /// Full-stack replace: every scene is cleaned, then the new one starts.
    fn replace(&mut self, scene: Scene, ctx: &mut Context) {
        for mut old in std::mem::take(&mut self.stack) {
            log::debug!("scene stack: replace cleans '{}'", old.name());
            old.clean(ctx);
        }
        self.push(scene, ctx);
    }
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new()
    }
}
