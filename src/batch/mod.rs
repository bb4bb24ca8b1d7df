//! Sequential batch scheduling over a source directory

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::adapters::{ConsoleProgress, SystemTrash};
use crate::engine::{EncodeProfile, EncodeSession, SessionOutcome};
use crate::error::{MovpressError, MovpressResult};
use crate::ports::{ProgressSink, TrashBin};
use crate::probe::DurationProbe;
use crate::signals::ActiveProcessSet;

/// File extension selected for re-encoding
const VIDEO_EXTENSION: &str = "mov";

/// Output subdirectory created inside the source directory
const OUTPUT_DIR_NAME: &str = "videoOutput";

/// Counters for one finished batch
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchSummary {
    /// Files discovered in the source directory
    pub discovered: usize,
    /// Files encoded and trashed successfully
    pub converted: usize,
}

/// Drives the batch: one encode session at a time, source trashed on
/// success, fail-fast on the first error
pub struct BatchRunner {
    source_dir: PathBuf,
    probe: DurationProbe,
    profile: EncodeProfile,
    processes: ActiveProcessSet,
    trash: Box<dyn TrashBin>,
    sink: Box<dyn ProgressSink>,
}

impl BatchRunner {
    /// Create a runner with the production adapters (system trash, console
    /// progress, `ffmpeg`/`ffprobe` from `PATH`)
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            probe: DurationProbe::new(),
            profile: EncodeProfile::default(),
            processes: ActiveProcessSet::new(),
            trash: Box::new(SystemTrash),
            sink: Box::new(ConsoleProgress::new()),
        }
    }

    /// Replace the duration probe
    pub fn with_probe(mut self, probe: DurationProbe) -> Self {
        self.probe = probe;
        self
    }

    /// Replace the encoder profile
    pub fn with_profile(mut self, profile: EncodeProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Share a process registry with the signal coordinator
    pub fn with_processes(mut self, processes: ActiveProcessSet) -> Self {
        self.processes = processes;
        self
    }

    /// Replace the trash collaborator
    pub fn with_trash(mut self, trash: Box<dyn TrashBin>) -> Self {
        self.trash = trash;
        self
    }

    /// Replace the progress renderer
    pub fn with_sink(mut self, sink: Box<dyn ProgressSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Run the whole batch to completion, cancellation, or first error.
    ///
    /// Whatever way the run unwinds, any still-active encoder subprocess is
    /// terminated before the result propagates.
    pub fn run(&self) -> MovpressResult<BatchSummary> {
        let result = self.run_inner();
        if result.is_err() {
            self.processes.terminate_all();
        }
        result
    }

    fn run_inner(&self) -> MovpressResult<BatchSummary> {
        if !self.source_dir.is_dir() {
            return Err(MovpressError::SourceDirNotFound {
                path: self.source_dir.display().to_string(),
            });
        }

        let output_dir = self.source_dir.join(OUTPUT_DIR_NAME);
        fs::create_dir_all(&output_dir)?;

        let files = discover_videos(&self.source_dir)?;
        info!("Found {} file(s) to convert", files.len());

        let mut summary = BatchSummary {
            discovered: files.len(),
            converted: 0,
        };

        for input in &files {
            if self.processes.is_cancelled() {
                return Err(MovpressError::Cancelled);
            }

            let total_seconds = self.probe.duration_seconds(input)?;

            // An interrupt can land while the probe blocks, when the
            // process registry is empty; re-check before launching the
            // session so no encoder starts after cancellation.
            if self.processes.is_cancelled() {
                return Err(MovpressError::Cancelled);
            }

            if total_seconds == 0.0 {
                warn!(
                    "Zero duration reported for {}; progress will be count-only",
                    input.display()
                );
            }

            let session = EncodeSession::new(&self.profile, &self.processes);
            match session.run(input, &output_dir, Some(total_seconds), self.sink.as_ref())? {
                SessionOutcome::Completed => {
                    self.trash.discard(input)?;
                    summary.converted += 1;
                }
                SessionOutcome::Cancelled => return Err(MovpressError::Cancelled),
            }
        }

        self.sink.on_batch_done(summary.converted);
        Ok(summary)
    }
}

/// List the `.mov` files directly inside `dir`, sorted ascending by path
/// for a deterministic processing order.
pub fn discover_videos(dir: &Path) -> MovpressResult<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == VIDEO_EXTENSION))
        .collect();
    files.sort();
    Ok(files)
}
