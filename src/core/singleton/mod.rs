//=========================================================================
// Singleton System
//=========================================================================
//
// Enforces at most one logical instance per component type.
//
// Architecture:
//   SingletonRegistry: instance slots + quitting flag (the shared state)
//   Singleton<T>: per-object activation anchor (the lifecycle protocol)
//
//=========================================================================

//=== Module Declarations =================================================

mod lifecycle;
mod registry;

//=== Public API ==========================================================

pub use lifecycle::{Activation, Singleton, SingletonConfig};
pub use registry::SingletonRegistry;
