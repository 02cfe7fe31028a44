//=========================================================================
// Singleton Registry
//=========================================================================
//
// Explicit registry replacing per-type static state: one instance slot
// per component type plus a process-wide quitting flag.
//
// Single-writer discipline: slots are written only from inside
// host-invoked lifecycle callbacks (see `Singleton::awake`), and the
// quitting flag only from the host's teardown notification. The accessor
// is a pure read.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::TypeId;
use std::collections::HashMap;

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::object::{Component, ObjectId};

//=== Singleton Registry ==================================================

/// Instance slots for singleton components, keyed by component type.
///
/// A slot holds the id of the object currently playing the singleton
/// role for its type. The slot is a cache of identity, not ownership:
/// the host's object graph owns the object, and a slot can go stale when
/// the host removes it. Staleness is detected by liveness checks during
/// activation and masked globally once teardown begins.
///
/// # Example
///
/// ```
/// # use scene_singleton::prelude::*;
/// # use std::any::Any;
/// # #[derive(Default)]
/// # struct SaveDirector;
/// # impl Component for SaveDirector {
/// #     fn as_any(&self) -> &dyn Any { self }
/// #     fn as_any_mut(&mut self) -> &mut dyn Any { self }
/// # }
/// let registry = SingletonRegistry::new();
/// assert_eq!(registry.instance_of::<SaveDirector>(), None);
/// ```
pub struct SingletonRegistry {
    slots: HashMap<TypeId, ObjectId>,
    quitting: bool,
}

impl SingletonRegistry {
    //--- Construction -----------------------------------------------------

    /// Creates an empty registry with the quitting flag unset.
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            quitting: false,
        }
    }

    //--- Accessor ---------------------------------------------------------

    /// Returns the current singleton instance for `T`, if any.
    ///
    /// Pure read, no side effects. Returns `None` unconditionally once
    /// the teardown notification has been observed, even if a slot is
    /// still populated internally: during teardown the underlying object
    /// may already be in an unsafe-to-use state. Otherwise returns the
    /// cached id, which is `None` until some object of the type has
    /// activated (or been created on demand).
    pub fn instance_of<T: Component>(&self) -> Option<ObjectId> {
        if self.quitting {
            return None;
        }

        self.slots.get(&TypeId::of::<T>()).copied()
    }

    //--- Teardown ---------------------------------------------------------

    /// Records the host's application-quit notification.
    ///
    /// Sets the quitting flag true; no other state is touched. The flag
    /// is never reset; a registry assumes a single-use process lifetime
    /// (one startup, one shutdown).
    pub fn notify_quit(&mut self) {
        debug!("Application quit observed; singleton access is now masked");
        self.quitting = true;
    }

    /// Whether the teardown notification has been observed.
    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    //--- Internal Slot Access ---------------------------------------------

    // Raw slot read, unmasked by the quitting flag. Activation needs the
    // cached id even during teardown-adjacent states to run its liveness
    // checks.
    pub(crate) fn slot(&self, component: TypeId) -> Option<ObjectId> {
        self.slots.get(&component).copied()
    }

    // Claims the slot for `object`. At most one id per type: callers
    // only invoke this after the duplicate check in `Singleton::awake`.
    pub(crate) fn adopt(&mut self, component: TypeId, object: ObjectId) {
        self.slots.insert(component, object);
    }
}

impl Default for SingletonRegistry {
    fn default() -> Self {
        Self::new()
    }
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;

    // Mock types for testing
    struct Director;

    impl Component for Director {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    struct Spawner;

    impl Component for Spawner {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn obj(raw: u64) -> ObjectId {
        ObjectId::from_raw(raw)
    }

    //--- Accessor Tests ---------------------------------------------------

    #[test]
    fn empty_registry_reports_no_instance() {
        let registry = SingletonRegistry::new();
        assert_eq!(registry.instance_of::<Director>(), None);
    }

    #[test]
    fn adopted_instance_is_visible() {
        let mut registry = SingletonRegistry::new();
        registry.adopt(TypeId::of::<Director>(), obj(1));

        assert_eq!(registry.instance_of::<Director>(), Some(obj(1)));
    }

    #[test]
    fn slots_are_isolated_per_type() {
        let mut registry = SingletonRegistry::new();
        registry.adopt(TypeId::of::<Director>(), obj(1));
        registry.adopt(TypeId::of::<Spawner>(), obj(2));

        assert_eq!(registry.instance_of::<Director>(), Some(obj(1)));
        assert_eq!(registry.instance_of::<Spawner>(), Some(obj(2)));
    }

    #[test]
    fn repeated_reads_are_idempotent() {
        let mut registry = SingletonRegistry::new();
        registry.adopt(TypeId::of::<Director>(), obj(7));

        let first = registry.instance_of::<Director>();
        let second = registry.instance_of::<Director>();
        let third = registry.instance_of::<Director>();

        assert_eq!(first, Some(obj(7)));
        assert_eq!(first, second);
        assert_eq!(second, third);
    }

    //--- Teardown Tests ---------------------------------------------------

    #[test]
    fn quit_masks_populated_slot() {
        let mut registry = SingletonRegistry::new();
        registry.adopt(TypeId::of::<Director>(), obj(1));

        registry.notify_quit();

        // The slot is still populated internally but the accessor masks it.
        assert!(registry.is_quitting());
        assert_eq!(registry.instance_of::<Director>(), None);
        assert_eq!(registry.slot(TypeId::of::<Director>()), Some(obj(1)));
    }

    #[test]
    fn quit_flag_is_never_reset() {
        let mut registry = SingletonRegistry::new();
        registry.notify_quit();
        registry.notify_quit();

        assert!(registry.is_quitting());
        assert_eq!(registry.instance_of::<Director>(), None);
    }
}
