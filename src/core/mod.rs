//=========================================================================
// Core Systems
//
// Central module for the singleton lifecycle machinery and the reference
// host it runs against.
//
// Responsibilities:
// - Define object identity and the component capability (`object`)
// - Define the host capability contract (`host`)
// - Enforce the singleton access pattern (`singleton`)
// - Provide a concrete scene graph host for tests and small consumers
//   (`scene`)
//
// Notes:
// All state mutation happens synchronously inside host-invoked lifecycle
// callbacks on a single thread. There is no locking and no cross-thread
// traffic anywhere in this module tree.
//
//=========================================================================

pub mod error;
pub mod host;
pub mod object;
pub mod scene;
pub mod singleton;
