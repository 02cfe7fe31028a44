//=========================================================================
// Scene Host
//=========================================================================
//
// Concrete reference implementation of the host capability set.
//
// Architecture:
//   SceneGraph: ordered object table + play-mode flag (the live scene)
//   CommandQueue: deferred destroy/persist commands, applied at tick
//   boundaries
//
//=========================================================================

//=== Module Declarations =================================================

mod command;
mod graph;

//=== Public API ==========================================================

pub use graph::{SceneGraph, SceneObject};
