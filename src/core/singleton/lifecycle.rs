//=========================================================================
// Singleton Lifecycle
//=========================================================================
//
// Per-object activation protocol for singleton components.
//
// Runs once per object at activation ("awake") time, in fixed order:
//   Step A: verify/claim the singleton identity (destroy duplicates)
//   Step B: optional on-demand creation (`create_if_absent`)
//   Step C: optional persistence marking (`persist_across_transitions`)
//
// Failure semantics: duplicates are destroyed and logged at warning
// level; an unresolvable slot is logged at warning level and left empty.
// Nothing on this path is a hard error and nothing is propagated; the
// protocol is callback-driven, not request/response.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::{type_name, TypeId};
use std::marker::PhantomData;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::host::SceneHost;
use crate::core::object::{Component, ObjectId};
use crate::core::singleton::SingletonRegistry;

//=== SingletonConfig =====================================================

/// Per-object configuration for the activation protocol.
///
/// Both flags default to false. They are authored per object instance
/// (the property-sheet equivalent), not per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SingletonConfig {
    /// When true and activation resolves no instance, a new container
    /// object is instantiated with a fresh component and adopted.
    pub create_if_absent: bool,

    /// When true and activation resolves an instance, that instance's
    /// object is marked to survive scene transitions.
    pub persist_across_transitions: bool,
}

impl SingletonConfig {
    /// Creates a config with both flags unset.
    pub fn new() -> Self {
        Self::default()
    }
}

//=== Activation ==========================================================

/// Outcome of one activation of a singleton component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// An existing object (this one, a discovered one, or an earlier
    /// claim) holds the singleton role.
    Adopted(ObjectId),

    /// No object resolved, so a new one was created on demand.
    Created(ObjectId),

    /// This object was a duplicate and has been scheduled for removal.
    DuplicateDestroyed,

    /// Host is not in live execution; nothing was mutated.
    Skipped,

    /// No object resolved and on-demand creation is disabled; the slot
    /// stays empty.
    Unresolved,
}

//=== Singleton ===========================================================

/// Activation anchor enforcing at most one live instance of `T`.
///
/// One anchor belongs to each object that participates in the singleton
/// pattern for `T`; the host invokes [`Singleton::awake`] exactly once
/// when that object becomes live, and [`SingletonRegistry::notify_quit`]
/// once at application teardown. Between those callbacks, consumers read
/// the current instance with [`SingletonRegistry::instance_of`].
///
/// # Example
///
/// ```
/// # use scene_singleton::prelude::*;
/// # use std::any::Any;
/// # #[derive(Default)]
/// # struct MusicDirector;
/// # impl Component for MusicDirector {
/// #     fn as_any(&self) -> &dyn Any { self }
/// #     fn as_any_mut(&mut self) -> &mut dyn Any { self }
/// # }
/// let mut graph = SceneGraph::new();
/// let mut registry = SingletonRegistry::new();
///
/// let anchor = Singleton::<MusicDirector>::with_config(SingletonConfig {
///     persist_across_transitions: true,
///     ..SingletonConfig::new()
/// });
///
/// let object = graph.spawn_with(Box::new(MusicDirector));
/// anchor.awake(&mut registry, &mut graph, object);
///
/// assert_eq!(registry.instance_of::<MusicDirector>(), Some(object));
/// ```
pub struct Singleton<T: Component> {
    config: SingletonConfig,
    marker: PhantomData<T>,
}

impl<T: Component> Singleton<T> {
    //--- Construction -----------------------------------------------------

    /// Creates an anchor with default configuration (no creation, no
    /// persistence).
    pub fn new() -> Self {
        Self::with_config(SingletonConfig::new())
    }

    /// Creates an anchor with the given per-object configuration.
    pub fn with_config(config: SingletonConfig) -> Self {
        Self {
            config,
            marker: PhantomData,
        }
    }

    /// This anchor's configuration.
    pub fn config(&self) -> SingletonConfig {
        self.config
    }
}

impl<T: Component + Default> Singleton<T> {
    //--- Activation -------------------------------------------------------

    /// Runs the activation protocol for `object`, which carries `T`.
    ///
    /// Invoked once per object when the host brings it live. `object` is
    /// the id of the activating component's container.
    ///
    /// The `Default` bound exists for the on-demand creation step; it is
    /// exercised only when `create_if_absent` is set and no instance
    /// resolves during verification.
    pub fn awake(
        &self,
        registry: &mut SingletonRegistry,
        host: &mut dyn SceneHost,
        object: ObjectId,
    ) -> Activation {
        // Editor inspection never mutates singleton state.
        if !host.is_playing() {
            debug!(
                "Skipping {} singleton activation outside live execution",
                type_name::<T>()
            );
            return Activation::Skipped;
        }

        let component = TypeId::of::<T>();

        //--- Step A: verify/claim ------------------------------------------

        if let Some(current) = registry.slot(component) {
            if host.is_alive(current) {
                if current != object {
                    let label = host
                        .object_name(object)
                        .unwrap_or_else(|| object.to_string());
                    warn!(
                        "Additional {} singleton activated in {}; destroying it",
                        type_name::<T>(),
                        label
                    );
                    host.destroy(object);
                    return Activation::DuplicateDestroyed;
                }

                // Re-activation of the object already holding the role.
                self.mark_persistent(registry, host, component);
                return Activation::Adopted(current);
            }
            // Stale slot: the previous claimant is gone, resolve afresh.
        }

        let adopted = if let Some(found) = host.find_object_with(component) {
            debug!(
                "Adopted existing {} singleton on object {}",
                type_name::<T>(),
                found
            );
            Some(found)
        } else if host.is_alive(object) {
            debug!(
                "Object {} claimed the {} singleton role",
                object,
                type_name::<T>()
            );
            Some(object)
        } else {
            warn!("Singleton object not found for {}", type_name::<T>());
            None
        };

        if let Some(instance) = adopted {
            registry.adopt(component, instance);
        }

        //--- Step B: on-demand creation ------------------------------------

        let outcome = match adopted {
            Some(instance) => Activation::Adopted(instance),
            None if self.config.create_if_absent => {
                let created = host.spawn_with(Box::new(T::default()));
                registry.adopt(component, created);
                info!(
                    "Created singleton object {} for {}",
                    created,
                    type_name::<T>()
                );
                Activation::Created(created)
            }
            None => return Activation::Unresolved,
        };

        //--- Step C: persistence marking -----------------------------------

        self.mark_persistent(registry, host, component);

        outcome
    }

    // Marks the resolved instance's object to survive scene transitions.
    // No-op unless the flag is set and the slot holds a live object.
    fn mark_persistent(
        &self,
        registry: &SingletonRegistry,
        host: &mut dyn SceneHost,
        component: TypeId,
    ) {
        if !self.config.persist_across_transitions {
            return;
        }

        if let Some(instance) = registry.slot(component) {
            if host.is_alive(instance) {
                debug!("Marked singleton object {} as persistent", instance);
                host.persist(instance);
            }
        }
    }
}

impl<T: Component> Default for Singleton<T> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Tests ===============================================================
