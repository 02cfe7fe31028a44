//=========================================================================
// Object Identity & Component Capability
//=========================================================================
//
// Defines how scene objects are identified and what a component must
// provide to participate in the singleton lifecycle.
//
// `ObjectId` is an opaque handle minted by the host. It is never reused
// within a process, so a stale id held by the registry can be detected
// with a liveness query instead of dangling.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

//=== ObjectId ============================================================

/// Opaque identity of a scene object (container).
///
/// Ids are minted by the host in ascending order and never reused. The
/// `Ord` impl gives hosts a deterministic tie-break ("lowest id wins")
/// when a scene query matches more than one object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Creates an id from a raw counter value.
    ///
    /// Ids are minted host-side: a runtime implementing
    /// [`SceneHost`](crate::core::host::SceneHost) wraps its own counter
    /// values here. Raw values must not be reused within a process.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//=== Component ===========================================================

/// Capability interface for types attachable to a scene object.
///
/// Replaces the host-engine base-class bound: anything with `Any`-backed
/// identity that can be stored behind a trait object qualifies. The
/// `as_any` accessors allow typed retrieval through `Box<dyn Component>`.
///
/// # Example
///
/// ```
/// use scene_singleton::Component;
/// use std::any::Any;
///
/// #[derive(Default)]
/// struct GameClock {
///     ticks: u64,
/// }
///
/// impl Component for GameClock {
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
///     fn as_any_mut(&mut self) -> &mut dyn Any {
///         self
///     }
/// }
/// ```
pub trait Component: Any {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::TypeId;

    struct Marker;

    impl Component for Marker {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn object_ids_are_ordered_by_mint_order() {
        let first = ObjectId::from_raw(1);
        let second = ObjectId::from_raw(2);

        assert!(first < second);
        assert_ne!(first, second);
    }

    #[test]
    fn object_id_displays_with_hash_prefix() {
        assert_eq!(ObjectId::from_raw(42).to_string(), "#42");
    }

    #[test]
    fn component_type_identity_survives_erasure() {
        let boxed: Box<dyn Component> = Box::new(Marker);

        assert_eq!(boxed.as_any().type_id(), TypeId::of::<Marker>());
        assert!(boxed.as_any().downcast_ref::<Marker>().is_some());
    }
}
