//! Glue between [`crate::host::LocalQueue`] and the engine: the cooperative
//! stand-in for a real UI event loop.

use crate::host::LocalQueue;

use super::ChartEngine;

/// Run one scheduled pass per queued token. With coalescing intact there is
/// at most one token, so this executes at most one pass per drain under
/// normal operation.
pub fn drain(queue: &LocalQueue, engine: &mut ChartEngine) {
    while queue.take() {
        engine.run_scheduled_pass();
    }
}
