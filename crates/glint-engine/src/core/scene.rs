use crate::components::game_object::{GameObject, ObjectId};
use crate::core::context::Context;

/// Game-facing callbacks for one scene.
///
/// The engine drives the passes; a hook adds the game's behavior at the
/// edges of each pass. Spawn objects in `on_init`, read input or steer
/// objects in the others. Every method defaults to a no-op.
pub trait SceneHook {
    fn on_init(&mut self, _scene: &mut Scene, _ctx: &mut Context) {}

    fn on_handle_input(&mut self, _scene: &mut Scene, _ctx: &mut Context) {}

    /// Runs after the object update sweep, before deferred additions splice.
    fn on_update(&mut self, _dt: f32, _scene: &mut Scene, _ctx: &mut Context) {}

    /// Runs last in the render pass, after registered sprites are drawn.
    fn on_render(&mut self, _scene: &mut Scene, _ctx: &mut Context) {}

    /// Runs before the scene's objects are cleaned.
    fn on_clean(&mut self, _scene: &mut Scene, _ctx: &mut Context) {}
}

/// One layer of the scene stack: a set of live objects plus a hook.
///
/// `add_object` goes live at once; `safe_add_object` defers to the end of
/// the next update pass. Removal mirrors that: `remove_object` cleans and
/// erases now, `safe_remove_object` flags and the next input or update
/// sweep erases. Passes on an uninitialized scene are no-ops.
pub struct Scene {
    name: String,
    objects: Vec<GameObject>,
    /// Deferred additions, spliced at `init` and after each update pass.
    pending: Vec<GameObject>,
    initialized: bool,
    hook: Option<Box<dyn SceneHook>>,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: Vec::with_capacity(32),
            pending: Vec::new(),
            initialized: false,
            hook: None,
        }
    }

    pub fn with_hook(mut self, hook: impl SceneHook + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Add an object to the live vector immediately.
    pub fn add_object(&mut self, object: GameObject) -> ObjectId {
        let id = object.id();
        self.objects.push(object);
        id
    }

    /// Queue an object; it joins the live vector at `init` or at the end of
    /// the next update pass, never in the middle of one.
    pub fn safe_add_object(&mut self, object: GameObject) -> ObjectId {
        let id = object.id();
        self.pending.push(object);
        id
    }

    /// Clean and erase an object now. Warns and returns false when the id
    /// is not in the live vector.
    pub fn remove_object(&mut self, id: ObjectId, ctx: &mut Context) -> bool {
        let Some(index) = self.objects.iter().position(|o| o.id() == id) else {
            log::warn!("remove_object: scene '{}' has no object {}", self.name, id.0);
            return false;
        };
        let mut object = self.objects.remove(index);
        object.clean(ctx);
        true
    }

    /// Flag an object; the next input or update sweep cleans and erases it.
    pub fn safe_remove_object(&mut self, id: ObjectId) -> bool {
        match self.objects.iter_mut().find(|o| o.id() == id) {
            Some(object) => {
                object.set_need_remove(true);
                true
            }
            None => {
                log::warn!(
                    "safe_remove_object: scene '{}' has no object {}",
                    self.name,
                    id.0
                );
                false
            }
        }
    }

    pub fn objects(&self) -> &[GameObject] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut [GameObject] {
        &mut self.objects
    }

    pub fn find_object_by_id(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    pub fn find_object_by_id_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.iter_mut().find(|o| o.id() == id)
    }

    /// First live object with this name, if any.
    pub fn find_object_by_name(&self, name: &str) -> Option<&GameObject> {
        self.objects.iter().find(|o| o.name() == name)
    }

    pub fn find_object_by_name_mut(&mut self, name: &str) -> Option<&mut GameObject> {
        self.objects.iter_mut().find(|o| o.name() == name)
    }

    /// Number of live objects; deferred additions do not count yet.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Run the hook's setup and make queued objects live. Calling twice is
    /// a warned no-op; a cleaned scene can be initialized again.
    pub fn init(&mut self, ctx: &mut Context) {
        if self.initialized {
            log::warn!("init: scene '{}' is already initialized", self.name);
            return;
        }
        self.initialized = true;
        log::debug!("init: scene '{}'", self.name);
        if let Some(mut hook) = self.hook.take() {
            hook.on_init(self, ctx);
            self.hook = Some(hook);
        }
        self.objects.append(&mut self.pending);
    }

    /// Sweep out flagged objects, fan input to the rest, run the hook.
    pub fn handle_input(&mut self, ctx: &mut Context) {
        if !self.initialized {
            return;
        }
        let mut i = 0;
        while i < self.objects.len() {
            if self.objects[i].need_remove() {
                self.sweep_out(i, ctx);
                continue;
            }
            self.objects[i].handle_input(ctx);
            i += 1;
        }
        if let Some(mut hook) = self.hook.take() {
            hook.on_handle_input(self, ctx);
            self.hook = Some(hook);
        }
    }

    /// Sweep out flagged objects, update the rest, run the hook, then splice
    /// in the deferred additions.
    pub fn update(&mut self, dt: f32, ctx: &mut Context) {
        if !self.initialized {
            return;
        }
        let mut i = 0;
        while i < self.objects.len() {
            if self.objects[i].need_remove() {
                self.sweep_out(i, ctx);
                continue;
            }
            self.objects[i].update(dt, ctx);
            i += 1;
        }
        if let Some(mut hook) = self.hook.take() {
            hook.on_update(dt, self, ctx);
            self.hook = Some(hook);
        }
        self.objects.append(&mut self.pending);
    }

    /// Object render hooks first (background layers), then the registered
    /// sprites of this scene, then the scene hook (overlays).
    pub fn render(&mut self, ctx: &mut Context) {
        if !self.initialized {
            return;
        }
        for object in &mut self.objects {
            object.render(ctx);
        }
        ctx.render_sprites(&self.objects);
        if let Some(mut hook) = self.hook.take() {
            hook.on_render(self, ctx);
            self.hook = Some(hook);
        }
    }

    /// Tear down every object, deferred additions included, and return the
    /// scene to the uninitialized state. Safe to call more than once.
    pub fn clean(&mut self, ctx: &mut Context) {
        if let Some(mut hook) = self.hook.take() {
            hook.on_clean(self, ctx);
            self.hook = Some(hook);
        }
        for mut object in std::mem::take(&mut self.objects) {
            object.clean(ctx);
        }
        for mut object in std::mem::take(&mut self.pending) {
            object.clean(ctx);
        }
        self.initialized = false;
    }

    fn sweep_out(&mut self, index: usize, ctx: &mut Context) {
        let mut object = self.objects.remove(index);
        log::debug!("sweep: removing object '{}'", object.name());
        object.clean(ctx);
    }
}
