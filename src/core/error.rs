//=========================================================================
// Scene Errors
//=========================================================================
//
// Error types for host-side graph mutation.
//
// The singleton activation path itself has no caller-facing error
// channel (failures there are diagnostics only); these errors cover the
// reference host's structural operations such as attaching components.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::TypeId;

//=== Internal Dependencies ===============================================

use crate::core::object::ObjectId;

//=== SceneError ==========================================================

/// Structural errors from scene graph mutation.
#[derive(Debug, PartialEq, Eq)]
pub enum SceneError {
    /// The object id does not refer to a live object.
    UnknownObject(ObjectId),

    /// The object already carries a component of this type.
    DuplicateComponent {
        object: ObjectId,
        component: TypeId,
    },
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownObject(id) => write!(f, "Object {} is not alive", id),
            Self::DuplicateComponent { object, component } => write!(
                f,
                "Object {} already carries a component of type {:?}",
                object, component
            ),
        }
    }
}

impl std::error::Error for SceneError {}
