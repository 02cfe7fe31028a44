//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use scene_singleton::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Object identity and component capability
pub use crate::core::object::{Component, ObjectId};

// Host capability contract
pub use crate::core::host::SceneHost;

// Singleton system
pub use crate::core::singleton::{Activation, Singleton, SingletonConfig, SingletonRegistry};

// Reference host
pub use crate::core::error::SceneError;
pub use crate::core::scene::{SceneGraph, SceneObject};
