//=========================================================================
// Scene Command Queue
//=========================================================================
//
// Queue for deferred scene-graph mutations.
//
// Lifecycle callbacks schedule destroy/persist commands here during
// updates; the graph drains the queue at tick boundaries. The channel
// keeps scheduling available behind a shared borrow, so callbacks can
// queue commands while the graph is being iterated.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender};

//=== Internal Dependencies ===============================================

use crate::core::object::ObjectId;

//=== SceneCommand ========================================================

/// Deferred mutations applied at the next tick boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SceneCommand {
    /// Remove the object from the live scene graph.
    Destroy(ObjectId),

    /// Mark the object to survive scene transitions.
    Persist(ObjectId),
}

//=== CommandQueue ========================================================

/// Unbounded in-thread queue of pending scene commands.
///
/// Both endpoints stay inside the graph; `push` only needs a shared
/// borrow and `drain` empties the queue in FIFO order.
pub(crate) struct CommandQueue {
    sender: Sender<SceneCommand>,
    receiver: Receiver<SceneCommand>,
}

impl CommandQueue {
    /// Creates an empty queue.
    pub(crate) fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// Schedules a command for the next drain.
    pub(crate) fn push(&self, command: SceneCommand) {
        // Both endpoints live in the same struct, so the channel cannot
        // be disconnected while `self` exists.
        let _ = self.sender.send(command);
    }

    /// Takes all pending commands in FIFO order, leaving the queue empty.
    pub(crate) fn drain(&self) -> Vec<SceneCommand> {
        let mut commands = Vec::new();

        while let Ok(command) = self.receiver.try_recv() {
            commands.push(command);
        }

        commands
    }
}

//=== Tests ===============================================================
