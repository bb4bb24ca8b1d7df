//! Trash adapter backed by the platform recycle bin

use std::path::Path;
use tracing::debug;

use crate::error::{MovpressError, MovpressResult};
use crate::ports::TrashBin;

/// Moves files to the operating system trash so deletion stays recoverable
pub struct SystemTrash;

impl TrashBin for SystemTrash {
    fn discard(&self, path: &Path) -> MovpressResult<()> {
        debug!("Trashing {}", path.display());
        trash::delete(path).map_err(|source| MovpressError::Deletion {
            path: path.display().to_string(),
            source,
        })
    }
}
