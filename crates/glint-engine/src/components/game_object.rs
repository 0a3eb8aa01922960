use std::any::TypeId;
use std::collections::HashMap;

use crate::components::component::Component;
use crate::core::context::Context;

/// Stable identity of a GameObject, unique per Context for the lifetime of
/// the session. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub u32);

struct Slot {
    type_id: TypeId,
    // Vacated (None) while the component's own hook runs, and after removal
    // until the next compaction.
    component: Option<Box<dyn Component>>,
}

/// A named bag of components, at most one per concrete component type.
///
/// Components are stored in registration order for deterministic hook
/// fan-out, with a type-keyed index for O(1) lookup. Hooks run with their
/// component temporarily moved out of its slot, which lets a running hook
/// call back into this object (add, remove, or query siblings) without
/// aliasing it.
pub struct GameObject {
    id: ObjectId,
    name: String,
    tag: String,
    slots: Vec<Slot>,
    index: HashMap<TypeId, usize>,
    need_remove: bool,
    dirty: bool,
}

impl GameObject {
    pub fn new(ctx: &mut Context, name: impl Into<String>) -> Self {
        Self {
            id: ctx.alloc_object_id(),
            name: name.into(),
            tag: String::new(),
            slots: Vec::new(),
            index: HashMap::new(),
            need_remove: false,
            dirty: false,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = tag.into();
    }

    /// Marked objects are cleaned and erased by the owning scene's next
    /// update/input pass.
    pub fn need_remove(&self) -> bool {
        self.need_remove
    }

    pub fn set_need_remove(&mut self, need_remove: bool) {
        self.need_remove = need_remove;
    }

    /// Attach `component` unless one of its type is already present, then
    /// run its `init`. Idempotent: on a repeat call the existing instance
    /// wins and the argument is dropped without `init` running again.
    ///
    /// Returns the attached singleton. `None` only when the slot for `T` is
    /// vacated because a hook of `T` itself is currently executing.
    pub fn add_component<T: Component>(
        &mut self,
        component: T,
        ctx: &mut Context,
    ) -> Option<&mut T> {
        let type_id = TypeId::of::<T>();
        let slot = match self.index.get(&type_id) {
            Some(&slot) => slot,
            None => {
                let slot = self.slots.len();
                self.slots.push(Slot {
                    type_id,
                    component: None,
                });
                self.index.insert(type_id, slot);
                log::trace!(
                    "attach {} to '{}'",
                    std::any::type_name::<T>(),
                    self.name
                );
                let mut boxed: Box<dyn Component> = Box::new(component);
                boxed.init(self, ctx);
                // An attach in progress always completes, even if init
                // issued a removal of its own type.
                self.index.insert(type_id, slot);
                self.slots[slot].component = Some(boxed);
                slot
            }
        };
        self.slots[slot]
            .component
            .as_deref_mut()
            .and_then(|c| c.as_any_mut().downcast_mut::<T>())
    }

    /// O(1) typed lookup. `None` when absent or mid-hook (see trait docs).
    pub fn get_component<T: Component>(&self) -> Option<&T> {
        let &slot = self.index.get(&TypeId::of::<T>())?;
        self.slots[slot]
            .component
            .as_deref()
            .and_then(|c| c.as_any().downcast_ref::<T>())
    }

    pub fn get_component_mut<T: Component>(&mut self) -> Option<&mut T> {
        let &slot = self.index.get(&TypeId::of::<T>())?;
        self.slots[slot]
            .component
            .as_deref_mut()
            .and_then(|c| c.as_any_mut().downcast_mut::<T>())
    }

    pub fn has_component<T: Component>(&self) -> bool {
        self.index.contains_key(&TypeId::of::<T>())
    }

    /// Run the component's `clean` and drop it. Removing an absent type
    /// warns and returns false. If the removed component's own hook is
    /// currently executing, its `clean` runs when the hook returns.
    pub fn remove_component<T: Component>(&mut self, ctx: &mut Context) -> bool {
        let type_id = TypeId::of::<T>();
        let Some(slot) = self.index.remove(&type_id) else {
            log::warn!(
                "remove_component: {} not present on '{}'",
                std::any::type_name::<T>(),
                self.name
            );
            return false;
        };
        self.dirty = true;
        if let Some(mut component) = self.slots[slot].component.take() {
            component.clean(self, ctx);
        }
        true
    }

    pub fn component_count(&self) -> usize {
        self.index.len()
    }

    pub fn update(&mut self, dt: f32, ctx: &mut Context) {
        let mut i = 0;
        while i < self.slots.len() {
            let type_id = self.slots[i].type_id;
            if let Some(mut component) = self.slots[i].component.take() {
                component.update(dt, self, ctx);
                self.restore_slot(i, type_id, component, ctx);
            }
            i += 1;
        }
        self.compact_slots();
    }

    pub fn handle_input(&mut self, ctx: &mut Context) {
        let mut i = 0;
        while i < self.slots.len() {
            let type_id = self.slots[i].type_id;
            if let Some(mut component) = self.slots[i].component.take() {
                component.handle_input(self, ctx);
                self.restore_slot(i, type_id, component, ctx);
            }
            i += 1;
        }
        self.compact_slots();
    }

    pub fn render(&mut self, ctx: &mut Context) {
        let mut i = 0;
        while i < self.slots.len() {
            let type_id = self.slots[i].type_id;
            if let Some(mut component) = self.slots[i].component.take() {
                component.render(self, ctx);
                self.restore_slot(i, type_id, component, ctx);
            }
            i += 1;
        }
        self.compact_slots();
    }

    /// Tear down every component in registration order and empty the object.
    pub fn clean(&mut self, ctx: &mut Context) {
        let mut i = 0;
        while i < self.slots.len() {
            let type_id = self.slots[i].type_id;
            if let Some(mut component) = self.slots[i].component.take() {
                self.index.remove(&type_id);
                component.clean(self, ctx);
            }
            i += 1;
        }
        self.slots.clear();
        self.index.clear();
        self.dirty = false;
    }

    fn restore_slot(
        &mut self,
        slot: usize,
        type_id: TypeId,
        mut component: Box<dyn Component>,
        ctx: &mut Context,
    ) {
        if self.index.get(&type_id) == Some(&slot) {
            self.slots[slot].component = Some(component);
        } else {
            // The hook removed its own component; finish the teardown the
            // remover could not perform.
            component.clean(self, ctx);
        }
    }

    fn compact_slots(&mut self) {
        if !self.dirty {
            return;
        }
        self.dirty = false;
        self.slots.retain(|slot| slot.component.is_some());
        self.index.clear();
        for (i, slot) in self.slots.iter().enumerate() {
            self.index.insert(slot.type_id, i);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::components::transform::TransformComponent;
    use crate::test_support::test_context;

    struct Counter {
        inits: u32,
        updates: u32,
    }

    impl Counter {
        fn new() -> Self {
            Self {
                inits: 0,
                updates: 0,
            }
        }
    }

    impl Component for Counter {
        fn init(&mut self, _owner: &mut GameObject, _ctx: &mut Context) {
            self.inits += 1;
        }

        fn update(&mut self, _dt: f32, _owner: &mut GameObject, _ctx: &mut Context) {
            self.updates += 1;
        }
    }

    // Records whether Counter had already run when this component updated.
    struct OrderTracker {
        counter_ran_first: Option<bool>,
    }

    impl Component for OrderTracker {
        fn update(&mut self, _dt: f32, owner: &mut GameObject, _ctx: &mut Context) {
            let ran = owner
                .get_component::<Counter>()
                .map(|c| c.updates > 0)
                .unwrap_or(false);
            self.counter_ran_first = Some(ran);
        }
    }

    struct SelfRemover;

    impl Component for SelfRemover {
        fn update(&mut self, _dt: f32, owner: &mut GameObject, ctx: &mut Context) {
            owner.remove_component::<SelfRemover>(ctx);
        }
    }

    #[test]
    fn add_component_is_idempotent_and_returns_the_same_instance() {
        let (mut ctx, _log) = test_context();
        let mut object = GameObject::new(&mut ctx, "test");

        let first = object
            .add_component(Counter::new(), &mut ctx)
            .map(|c| c as *const Counter);
        let second = object
            .add_component(Counter::new(), &mut ctx)
            .map(|c| c as *const Counter);
        assert_eq!(first, second);
        assert!(first.is_some());

        // The second argument was dropped without running init.
        assert_eq!(object.get_component::<Counter>().unwrap().inits, 1);
        assert_eq!(object.component_count(), 1);
    }

    #[test]
    fn get_component_returns_none_when_absent() {
        let (mut ctx, _log) = test_context();
        let object = GameObject::new(&mut ctx, "empty");
        assert!(object.get_component::<Counter>().is_none());
        assert!(!object.has_component::<Counter>());
    }

    #[test]
    fn name_and_tag_are_settable() {
        let (mut ctx, _log) = test_context();
        let mut object = GameObject::new(&mut ctx, "crate").with_tag("pickup");
        assert_eq!(object.name(), "crate");
        assert_eq!(object.tag(), "pickup");

        object.set_name("barrel");
        object.set_tag("obstacle");
        assert_eq!(object.name(), "barrel");
        assert_eq!(object.tag(), "obstacle");
    }

    #[test]
    fn remove_component_runs_clean_and_drops() {
        let (mut ctx, _log) = test_context();
        let mut object = GameObject::new(&mut ctx, "test");
        object.add_component(TransformComponent::default(), &mut ctx);
        assert!(object.remove_component::<TransformComponent>(&mut ctx));
        assert!(!object.has_component::<TransformComponent>());
        assert!(!object.remove_component::<TransformComponent>(&mut ctx));
    }

    #[test]
    fn hooks_fan_out_in_registration_order() {
        let (mut ctx, _log) = test_context();
        let mut object = GameObject::new(&mut ctx, "ordered");
        object.add_component(Counter::new(), &mut ctx);
        object.add_component(
            OrderTracker {
                counter_ran_first: None,
            },
            &mut ctx,
        );

        object.update(0.016, &mut ctx);

        let tracker = object.get_component::<OrderTracker>().unwrap();
        assert_eq!(tracker.counter_ran_first, Some(true));
        assert_eq!(object.get_component::<Counter>().unwrap().updates, 1);
    }

    #[test]
    fn a_component_may_remove_itself_mid_update() {
        let (mut ctx, _log) = test_context();
        let mut object = GameObject::new(&mut ctx, "suicidal");
        object.add_component(SelfRemover, &mut ctx);
        object.add_component(Counter::new(), &mut ctx);

        object.update(0.016, &mut ctx);

        assert!(!object.has_component::<SelfRemover>());
        // The sibling still ran and the table stayed consistent.
        assert_eq!(object.get_component::<Counter>().unwrap().updates, 1);
        assert_eq!(object.component_count(), 1);

        object.update(0.016, &mut ctx);
        assert_eq!(object.get_component::<Counter>().unwrap().updates, 2);
    }

    #[test]
    fn clean_empties_the_object() {
        let (mut ctx, _log) = test_context();
        let mut object = GameObject::new(&mut ctx, "test");
        object.add_component(TransformComponent::new(Vec2::ZERO), &mut ctx);
        object.add_component(Counter::new(), &mut ctx);
        object.clean(&mut ctx);
        assert_eq!(object.component_count(), 0);
        assert!(object.get_component::<Counter>().is_none());
    }

    #[test]
    fn object_ids_are_unique_per_context() {
        let (mut ctx, _log) = test_context();
        let a = GameObject::new(&mut ctx, "a");
        let b = GameObject::new(&mut ctx, "b");
        assert_ne!(a.id(), b.id());
    }
}
