//=========================================================================
// Scene Graph
//=========================================================================
//
// Reference host: an ordered table of live objects with attached
// components, a play-mode flag, and a deferred command queue.
//
// Objects are stored in a BTreeMap keyed by mint order, so scene queries
// resolve deterministically ("lowest id wins"). Destroy and persist are
// scheduled through the command queue and applied at tick boundaries;
// structural mutation (spawn/attach) is immediate.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::TypeId;
use std::collections::BTreeMap;

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::command::{CommandQueue, SceneCommand};
use crate::core::error::SceneError;
use crate::core::host::SceneHost;
use crate::core::object::{Component, ObjectId};
use crate::core::singleton::SingletonRegistry;

//=== SceneObject =========================================================

/// A live container object and its attached components.
///
/// At most one component per type per object; the persistent flag marks
/// objects that survive scene transitions. The debug name, when present,
/// is surfaced in diagnostics instead of the numeric id.
pub struct SceneObject {
    name: Option<String>,
    components: Vec<(TypeId, Box<dyn Component>)>,
    persistent: bool,
}

impl SceneObject {
    fn new() -> Self {
        Self {
            name: None,
            components: Vec::new(),
            persistent: false,
        }
    }

    fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::new()
        }
    }

    /// The object's debug name, if one was authored at spawn time.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether this object survives scene transitions.
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    /// Whether a component of the given type is attached.
    pub fn has_component(&self, component: TypeId) -> bool {
        self.components.iter().any(|(ty, _)| *ty == component)
    }

    fn component(&self, component: TypeId) -> Option<&dyn Component> {
        self.components
            .iter()
            .find(|(ty, _)| *ty == component)
            .map(|(_, c)| c.as_ref())
    }

    fn component_mut(&mut self, component: TypeId) -> Option<&mut dyn Component> {
        self.components
            .iter_mut()
            .find(|(ty, _)| *ty == component)
            .map(|(_, c)| c.as_mut())
    }
}

//=== SceneGraph ==========================================================

/// The live collection of currently-instantiated objects.
///
/// Implements [`SceneHost`], so the singleton lifecycle can run directly
/// against it. Ids are minted in ascending order and never reused within
/// a process.
///
/// # Example
///
/// ```
/// # use scene_singleton::prelude::*;
/// # use std::any::Any;
/// # #[derive(Default)]
/// # struct InputRouter;
/// # impl Component for InputRouter {
/// #     fn as_any(&self) -> &dyn Any { self }
/// #     fn as_any_mut(&mut self) -> &mut dyn Any { self }
/// # }
/// let mut graph = SceneGraph::new();
/// let object = graph.spawn_with(Box::new(InputRouter));
///
/// assert!(graph.is_alive(object));
/// assert!(graph.component::<InputRouter>(object).is_some());
/// ```
pub struct SceneGraph {
    objects: BTreeMap<ObjectId, SceneObject>,
    next_id: u64,
    playing: bool,
    commands: CommandQueue,
}

impl SceneGraph {
    //--- Construction -----------------------------------------------------

    /// Creates an empty graph in live execution (play) mode.
    pub fn new() -> Self {
        Self {
            objects: BTreeMap::new(),
            next_id: 1,
            playing: true,
            commands: CommandQueue::new(),
        }
    }

    /// Creates an empty graph in editor-inspection mode: lifecycle
    /// activation performs no mutation against it.
    pub fn in_editor() -> Self {
        Self {
            playing: false,
            ..Self::new()
        }
    }

    //--- Structural Mutation ----------------------------------------------

    fn insert(&mut self, object: SceneObject) -> ObjectId {
        let id = ObjectId::from_raw(self.next_id);
        self.next_id += 1;
        self.objects.insert(id, object);
        id
    }

    /// Instantiates a new bare container object.
    pub fn spawn(&mut self) -> ObjectId {
        let id = self.insert(SceneObject::new());

        debug!("Spawned object {}", id);
        id
    }

    /// Instantiates a new bare container object with a debug name.
    pub fn spawn_named(&mut self, name: &str) -> ObjectId {
        let id = self.insert(SceneObject::named(name));

        debug!("Spawned object {} ({})", id, name);
        id
    }

    /// Instantiates a new container object with a component attached.
    pub fn spawn_with(&mut self, component: Box<dyn Component>) -> ObjectId {
        let id = self.spawn();

        if let Some(object) = self.objects.get_mut(&id) {
            object.components.push((component.as_any().type_id(), component));
        }

        id
    }

    /// Attaches a component to a live object.
    ///
    /// Fails when the object is not alive or already carries a component
    /// of the same type.
    pub fn attach(
        &mut self,
        object: ObjectId,
        component: Box<dyn Component>,
    ) -> Result<(), SceneError> {
        let ty = component.as_any().type_id();

        let entry = self
            .objects
            .get_mut(&object)
            .ok_or(SceneError::UnknownObject(object))?;

        if entry.has_component(ty) {
            return Err(SceneError::DuplicateComponent {
                object,
                component: ty,
            });
        }

        entry.components.push((ty, component));
        Ok(())
    }

    //--- Deferred Mutation ------------------------------------------------

    /// Schedules an object for removal at the next tick boundary.
    ///
    /// Only needs a shared borrow, so removal can be scheduled while the
    /// graph is being iterated. Scheduling a dead id is a no-op.
    pub fn destroy(&self, object: ObjectId) {
        self.commands.push(SceneCommand::Destroy(object));
    }

    /// Schedules an object to be marked persistent at the next tick
    /// boundary. Persistent objects survive [`SceneGraph::begin_transition`].
    pub fn persist(&self, object: ObjectId) {
        self.commands.push(SceneCommand::Persist(object));
    }

    /// Applies all pending commands in FIFO order.
    ///
    /// Returns the number of commands that had an effect; commands
    /// against dead objects are dropped with a debug log.
    pub fn flush_commands(&mut self) -> usize {
        let mut applied = 0;

        for command in self.commands.drain() {
            match command {
                SceneCommand::Destroy(id) => {
                    if self.objects.remove(&id).is_some() {
                        debug!("Destroyed object {}", id);
                        applied += 1;
                    } else {
                        debug!("Ignoring destroy for dead object {}", id);
                    }
                }
                SceneCommand::Persist(id) => match self.objects.get_mut(&id) {
                    Some(object) => {
                        object.persistent = true;
                        applied += 1;
                    }
                    None => debug!("Ignoring persist for dead object {}", id),
                },
            }
        }

        applied
    }

    //--- Scene Transition -------------------------------------------------

    /// Performs a scene transition: pending commands are applied, then
    /// every non-persistent object is removed.
    ///
    /// Returns the number of objects removed. Singleton slots pointing
    /// at removed objects go stale; the next activation resolves them
    /// afresh.
    pub fn begin_transition(&mut self) -> usize {
        self.flush_commands();

        let before = self.objects.len();
        self.objects.retain(|_, object| object.persistent);
        let removed = before - self.objects.len();

        info!(
            "Scene transition removed {} object(s), kept {}",
            removed,
            self.objects.len()
        );
        removed
    }

    //--- Queries ----------------------------------------------------------

    /// Whether the id refers to a live object.
    pub fn is_alive(&self, object: ObjectId) -> bool {
        self.objects.contains_key(&object)
    }

    /// Whether the graph is in live execution mode.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// The live object behind an id.
    pub fn object(&self, object: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&object)
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the graph holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The lowest-id live object carrying a component of the given type.
    pub fn find_object_with(&self, component: TypeId) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, object)| object.has_component(component))
            .map(|(id, _)| *id)
    }

    /// Typed borrow of a component attached to a live object.
    pub fn component<T: Component>(&self, object: ObjectId) -> Option<&T> {
        self.objects
            .get(&object)?
            .component(TypeId::of::<T>())?
            .as_any()
            .downcast_ref::<T>()
    }

    /// Typed mutable borrow of a component attached to a live object.
    pub fn component_mut<T: Component>(&mut self, object: ObjectId) -> Option<&mut T> {
        self.objects
            .get_mut(&object)?
            .component_mut(TypeId::of::<T>())?
            .as_any_mut()
            .downcast_mut::<T>()
    }

    /// Resolves the registry's current singleton instance of `T` to a
    /// typed component borrow.
    ///
    /// `None` when no instance is cached, the accessor is masked by
    /// teardown, or the cached object is no longer alive.
    pub fn resolve<'a, T: Component>(&'a self, registry: &SingletonRegistry) -> Option<&'a T> {
        let instance = registry.instance_of::<T>()?;
        self.component::<T>(instance)
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

//=== SceneHost Implementation ============================================

impl SceneHost for SceneGraph {
    fn is_playing(&self) -> bool {
        SceneGraph::is_playing(self)
    }

    fn find_object_with(&self, component: TypeId) -> Option<ObjectId> {
        SceneGraph::find_object_with(self, component)
    }

    fn spawn_with(&mut self, component: Box<dyn Component>) -> ObjectId {
        SceneGraph::spawn_with(self, component)
    }

    fn destroy(&mut self, object: ObjectId) {
        SceneGraph::destroy(self, object)
    }

    fn persist(&mut self, object: ObjectId) {
        SceneGraph::persist(self, object)
    }

    fn is_alive(&self, object: ObjectId) -> bool {
        SceneGraph::is_alive(self, object)
    }

    fn object_name(&self, object: ObjectId) -> Option<String> {
        self.objects.get(&object)?.name().map(str::to_string)
    }
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::singleton::{Activation, Singleton, SingletonConfig};
    use std::any::Any;

    // Mock types for testing
    #[derive(Default)]
    struct Director {
        volume: u32,
    }

    impl Component for Director {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[derive(Default)]
    struct Telemetry;

    impl Component for Telemetry {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    //--- Structural Tests -------------------------------------------------

    #[test]
    fn spawn_and_attach_roundtrip() {
        let mut graph = SceneGraph::new();
        let object = graph.spawn();

        graph
            .attach(object, Box::new(Director { volume: 3 }))
            .expect("attach to a fresh object succeeds");

        assert_eq!(graph.component::<Director>(object).unwrap().volume, 3);

        graph.component_mut::<Director>(object).unwrap().volume = 9;
        assert_eq!(graph.component::<Director>(object).unwrap().volume, 9);
    }

    #[test]
    fn named_spawn_exposes_its_name() {
        let mut graph = SceneGraph::new();
        let named = graph.spawn_named("AudioRoot");
        let bare = graph.spawn();

        assert_eq!(graph.object(named).unwrap().name(), Some("AudioRoot"));
        assert_eq!(graph.object(bare).unwrap().name(), None);

        // The name is surfaced through the host capability set too.
        assert_eq!(
            SceneHost::object_name(&graph, named),
            Some("AudioRoot".to_string())
        );
        assert_eq!(SceneHost::object_name(&graph, bare), None);
    }

    #[test]
    fn attach_to_dead_object_is_rejected() {
        let mut graph = SceneGraph::new();
        let object = graph.spawn();
        graph.destroy(object);
        graph.flush_commands();

        let result = graph.attach(object, Box::new(Director::default()));
        assert_eq!(result, Err(SceneError::UnknownObject(object)));
    }

    #[test]
    fn attaching_a_second_component_of_one_type_is_rejected() {
        let mut graph = SceneGraph::new();
        let object = graph.spawn_with(Box::new(Director::default()));

        let result = graph.attach(object, Box::new(Director::default()));
        assert_eq!(
            result,
            Err(SceneError::DuplicateComponent {
                object,
                component: TypeId::of::<Director>(),
            })
        );
    }

    #[test]
    fn scene_query_prefers_the_lowest_id() {
        let mut graph = SceneGraph::new();
        let first = graph.spawn_with(Box::new(Director::default()));
        let _second = graph.spawn_with(Box::new(Director::default()));

        assert_eq!(graph.find_object_with(TypeId::of::<Director>()), Some(first));
        assert_eq!(graph.find_object_with(TypeId::of::<Telemetry>()), None);
    }

    //--- Deferred Command Tests -------------------------------------------

    #[test]
    fn destroy_is_deferred_until_flush() {
        let mut graph = SceneGraph::new();
        let object = graph.spawn();

        graph.destroy(object);
        assert!(graph.is_alive(object));

        assert_eq!(graph.flush_commands(), 1);
        assert!(!graph.is_alive(object));
    }

    #[test]
    fn redundant_destroy_is_dropped() {
        let mut graph = SceneGraph::new();
        let object = graph.spawn();

        graph.destroy(object);
        graph.destroy(object);

        // Only the first removal has an effect.
        assert_eq!(graph.flush_commands(), 1);
        assert!(graph.is_empty());
    }

    #[test]
    fn persist_against_dead_object_is_dropped() {
        let mut graph = SceneGraph::new();
        let object = graph.spawn();
        graph.destroy(object);
        graph.persist(object);

        // Destroy queued first wins; the persist finds nothing.
        assert_eq!(graph.flush_commands(), 1);
    }

    //--- Transition Tests -------------------------------------------------

    #[test]
    fn transition_removes_only_non_persistent_objects() {
        let mut graph = SceneGraph::new();
        let keeper = graph.spawn_with(Box::new(Director::default()));
        let ephemeral = graph.spawn_with(Box::new(Telemetry));

        graph.persist(keeper);
        let removed = graph.begin_transition();

        assert_eq!(removed, 1);
        assert!(graph.is_alive(keeper));
        assert!(graph.object(keeper).unwrap().is_persistent());
        assert!(!graph.is_alive(ephemeral));
    }

    //--- Mode Tests -------------------------------------------------------

    #[test]
    fn editor_graph_reports_not_playing() {
        let graph = SceneGraph::in_editor();
        assert!(!graph.is_playing());
        assert!(SceneGraph::new().is_playing());
    }

    //--- Lifecycle Integration Tests --------------------------------------

    #[test]
    fn claim_then_duplicate_then_teardown() {
        let mut graph = SceneGraph::new();
        let mut registry = SingletonRegistry::new();
        let anchor = Singleton::<Director>::new();

        // Activate A in an empty scene: A becomes the instance.
        let a = graph.spawn_with(Box::new(Director::default()));
        assert_eq!(
            anchor.awake(&mut registry, &mut graph, a),
            Activation::Adopted(a)
        );
        assert_eq!(registry.instance_of::<Director>(), Some(a));

        // Activate B: B is destroyed, A keeps the role.
        let b = graph.spawn_with(Box::new(Director::default()));
        assert_eq!(
            anchor.awake(&mut registry, &mut graph, b),
            Activation::DuplicateDestroyed
        );
        graph.flush_commands();
        assert!(!graph.is_alive(b));
        assert_eq!(registry.instance_of::<Director>(), Some(a));
        assert_eq!(graph.resolve::<Director>(&registry).unwrap().volume, 0);

        // Teardown masks the accessor.
        registry.notify_quit();
        assert_eq!(registry.instance_of::<Director>(), None);
        assert!(graph.resolve::<Director>(&registry).is_none());
    }

    #[test]
    fn named_duplicate_is_still_destroyed() {
        let mut graph = SceneGraph::new();
        let mut registry = SingletonRegistry::new();
        let anchor = Singleton::<Director>::new();

        let first = graph.spawn_with(Box::new(Director::default()));
        anchor.awake(&mut registry, &mut graph, first);

        let imposter = graph.spawn_named("DirectorCopy");
        graph
            .attach(imposter, Box::new(Director::default()))
            .expect("attach to a fresh object succeeds");

        assert_eq!(
            anchor.awake(&mut registry, &mut graph, imposter),
            Activation::DuplicateDestroyed
        );
        graph.flush_commands();

        assert!(!graph.is_alive(imposter));
        assert_eq!(registry.instance_of::<Director>(), Some(first));
    }

    #[test]
    fn persistent_singleton_survives_a_scene_transition() {
        let mut graph = SceneGraph::new();
        let mut registry = SingletonRegistry::new();
        let anchor = Singleton::<Director>::with_config(SingletonConfig {
            persist_across_transitions: true,
            ..SingletonConfig::new()
        });

        let instance = graph.spawn_with(Box::new(Director::default()));
        anchor.awake(&mut registry, &mut graph, instance);

        let bystander = graph.spawn_with(Box::new(Telemetry));
        graph.begin_transition();

        assert!(graph.is_alive(instance));
        assert!(!graph.is_alive(bystander));
        assert_eq!(registry.instance_of::<Director>(), Some(instance));
    }

    #[test]
    fn role_is_reclaimed_after_a_transition_drops_the_instance() {
        let mut graph = SceneGraph::new();
        let mut registry = SingletonRegistry::new();
        let anchor = Singleton::<Director>::new();

        let first = graph.spawn_with(Box::new(Director::default()));
        anchor.awake(&mut registry, &mut graph, first);

        // Nothing was marked persistent, so the instance is swept away.
        graph.begin_transition();
        assert!(!graph.is_alive(first));

        let second = graph.spawn_with(Box::new(Director::default()));
        assert_eq!(
            anchor.awake(&mut registry, &mut graph, second),
            Activation::Adopted(second)
        );
        assert_eq!(registry.instance_of::<Director>(), Some(second));
    }

    #[test]
    fn on_demand_creation_runs_against_the_graph() {
        let mut graph = SceneGraph::new();
        let mut registry = SingletonRegistry::new();
        let anchor = Singleton::<Director>::with_config(SingletonConfig {
            create_if_absent: true,
            ..SingletonConfig::new()
        });

        // Activation for an id the graph never minted: nothing resolves
        // in the scene, so a fresh object is created and adopted.
        let outcome = anchor.awake(&mut registry, &mut graph, ObjectId::from_raw(1000));

        let instance = registry.instance_of::<Director>().expect("instance created");
        assert_eq!(outcome, Activation::Created(instance));
        assert!(graph.component::<Director>(instance).is_some());
    }
}
