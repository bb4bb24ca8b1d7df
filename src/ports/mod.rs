// Ports - Interface definitions the batch core consumes

use crate::error::MovpressResult;
use std::path::Path;

/// Port for moving files to a recoverable trash location
pub trait TrashBin: Send + Sync {
    /// Move the file at `path` to the trash. A reported failure must
    /// propagate, never be silently ignored.
    fn discard(&self, path: &Path) -> MovpressResult<()>;
}

/// Port for progress rendering
///
/// Purely presentational: implementations accept numeric position updates
/// and file-level start/finish events. Positions are not guaranteed
/// monotonic and must be applied as absolute values, not maxima.
pub trait ProgressSink: Send + Sync {
    /// A file's encode is starting. `total_seconds` is `None` when the
    /// duration is unknown or zero, in which case positions are raw counts
    /// rather than seconds.
    fn on_file_start(&self, name: &str, total_seconds: Option<f64>);

    /// New position within the current file (seconds, or a count in
    /// indeterminate mode).
    fn on_position(&self, position: f64);

    /// The current file finished encoding successfully.
    fn on_file_done(&self);

    /// The whole batch finished.
    fn on_batch_done(&self, converted: usize);
}
