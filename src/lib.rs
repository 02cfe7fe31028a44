//=========================================================================
// Scene Singleton — Library Root
//
// This crate defines the public API surface of the scene_singleton crate:
// singleton lifecycle enforcement for engine-managed scene objects.
//
// Responsibilities:
// - Expose the singleton registry and activation anchor (`SingletonRegistry`,
//   `Singleton`)
// - Expose the host capability contract (`SceneHost`) that a runtime
//   implements so the lifecycle logic stays host-agnostic
// - Ship a concrete reference host (`SceneGraph`) for tests and small
//   consumers
//
// Typical usage:
// ```
// use scene_singleton::prelude::*;
// use std::any::Any;
//
// #[derive(Default)]
// struct AudioDirector;
//
// impl Component for AudioDirector {
//     fn as_any(&self) -> &dyn Any {
//         self
//     }
//     fn as_any_mut(&mut self) -> &mut dyn Any {
//         self
//     }
// }
//
// let mut graph = SceneGraph::new();
// let mut registry = SingletonRegistry::new();
//
// let object = graph.spawn_with(Box::new(AudioDirector));
// Singleton::<AudioDirector>::new().awake(&mut registry, &mut graph, object);
//
// assert_eq!(registry.instance_of::<AudioDirector>(), Some(object));
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains all lifecycle logic and the reference host. It is
// exposed publicly for engine-level extensibility, but normal application
// code will mostly use the re-exports below or the prelude.
//
pub mod core;
pub mod prelude;

//--- Public Exports ------------------------------------------------------
//
// Re-exports the main entry points so users can simply
// `use scene_singleton::{SingletonRegistry, Singleton};` without having
// to know the internal module structure.
//
pub use crate::core::host::SceneHost;
pub use crate::core::object::{Component, ObjectId};
pub use crate::core::scene::SceneGraph;
pub use crate::core::singleton::{Activation, Singleton, SingletonConfig, SingletonRegistry};
