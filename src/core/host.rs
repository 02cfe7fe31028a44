//=========================================================================
// Host Capability Interface
//=========================================================================
//
// Contract between the singleton lifecycle logic and the host runtime.
//
// The lifecycle never touches a scene graph directly; it goes through
// this capability set so any runtime (or a test double) can slot in.
// Diagnostics are not part of the contract: they flow through the `log`
// facade and the consumer picks the sink.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::TypeId;

//=== Internal Dependencies ===============================================

use crate::core::object::{Component, ObjectId};

//=== SceneHost ===========================================================

/// Capabilities a host runtime provides to the singleton lifecycle.
///
/// All methods are invoked synchronously from host-driven lifecycle
/// callbacks on a single thread; implementations do not need any
/// internal synchronization. Hosts mint their own ids with
/// [`ObjectId::from_raw`].
///
/// # Example
///
/// A minimal out-of-crate host:
///
/// ```
/// use scene_singleton::{Component, ObjectId, SceneHost};
/// use std::any::TypeId;
///
/// #[derive(Default)]
/// struct HeadlessHost {
///     next_id: u64,
///     live: Vec<ObjectId>,
/// }
///
/// impl SceneHost for HeadlessHost {
///     fn is_playing(&self) -> bool {
///         true
///     }
///     fn find_object_with(&self, _component: TypeId) -> Option<ObjectId> {
///         None
///     }
///     fn spawn_with(&mut self, _component: Box<dyn Component>) -> ObjectId {
///         self.next_id += 1;
///         let id = ObjectId::from_raw(self.next_id);
///         self.live.push(id);
///         id
///     }
///     fn destroy(&mut self, object: ObjectId) {
///         self.live.retain(|id| *id != object);
///     }
///     fn persist(&mut self, _object: ObjectId) {}
///     fn is_alive(&self, object: ObjectId) -> bool {
///         self.live.contains(&object)
///     }
/// }
/// ```
pub trait SceneHost {
    /// Whether the host is in live execution rather than editor
    /// inspection. Activation performs no mutation when this is false.
    fn is_playing(&self) -> bool;

    /// Scene-graph query: a live object carrying a component of the given
    /// type, or `None`. When several match, the tie-break is host-defined.
    fn find_object_with(&self, component: TypeId) -> Option<ObjectId>;

    /// Instantiates a new bare container object, attaches the given
    /// component to it, and returns the new object's id.
    fn spawn_with(&mut self, component: Box<dyn Component>) -> ObjectId;

    /// Schedules an object for removal from the live scene graph. The
    /// removal may be deferred to a tick boundary; scheduling a dead or
    /// already-scheduled id is a no-op.
    fn destroy(&mut self, object: ObjectId);

    /// Marks an object to survive scene transitions that would otherwise
    /// remove it.
    fn persist(&mut self, object: ObjectId);

    /// Whether the id refers to an object still present in the live
    /// scene graph.
    fn is_alive(&self, object: ObjectId) -> bool;

    /// Host-authored debug name for an object, used in diagnostics such
    /// as the duplicate warning. Hosts without object names can rely on
    /// the default.
    fn object_name(&self, object: ObjectId) -> Option<String> {
        let _ = object;
        None
    }
}
