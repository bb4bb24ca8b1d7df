//! One external encoder subprocess per input file

use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use crate::engine::progress::{ParsedLine, ProgressParser};
use crate::engine::EncodeProfile;
use crate::error::{MovpressError, MovpressResult};
use crate::ports::ProgressSink;
use crate::signals::ActiveProcessSet;

/// Terminal outcome of one encode session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Encoder exited 0; the caller may now request deletion of the source
    Completed,
    /// Interrupted while running; the source is untouched and any partial
    /// output file is left in place
    Cancelled,
}

/// Owns one encoder subprocess for one input file
///
/// Launches the encoder, streams its diagnostic output line by line,
/// routes status lines to the progress sink and buffers the rest, then
/// converts the exit status into an outcome. The session never deletes
/// the source file; that is the runner's decision.
pub struct EncodeSession<'a> {
    profile: &'a EncodeProfile,
    processes: &'a ActiveProcessSet,
    parser: ProgressParser,
}

impl<'a> EncodeSession<'a> {
    pub fn new(profile: &'a EncodeProfile, processes: &'a ActiveProcessSet) -> Self {
        Self {
            profile,
            processes,
            parser: ProgressParser::new(),
        }
    }

    /// Run the encoder to completion for `input`, writing to
    /// `output_dir/<input file name>`.
    ///
    /// A `total_seconds` of zero or `None` degrades the progress display to
    /// count-only mode rather than failing. Positions may regress between
    /// updates; they are forwarded as-is.
    pub fn run(
        &self,
        input: &Path,
        output_dir: &Path,
        total_seconds: Option<f64>,
        sink: &dyn ProgressSink,
    ) -> MovpressResult<SessionOutcome> {
        let file_name = input.file_name().ok_or_else(|| MovpressError::Session {
            message: format!("input has no file name: {}", input.display()),
        })?;
        let output = output_dir.join(file_name);

        // Last cooperative check before the subprocess exists; a kill pass
        // that already ran against the registry cannot reach a process
        // spawned after it.
        if self.processes.is_cancelled() {
            return Ok(SessionOutcome::Cancelled);
        }

        info!("Encoding {} -> {}", input.display(), output.display());

        let mut child = self
            .profile
            .to_command(input, &output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;

        let stderr = child.stderr.take().ok_or_else(|| MovpressError::Session {
            message: "encoder stderr was not captured".to_string(),
        })?;

        // Register before the first read so an interrupt arriving
        // mid-launch can still reach the process.
        let handle = Arc::new(Mutex::new(child));
        self.processes.register(Arc::clone(&handle));

        let total = total_seconds.filter(|t| *t > 0.0);
        sink.on_file_start(&file_name.to_string_lossy(), total);

        let mut diagnostics = String::new();
        for line in BufReader::new(stderr).lines() {
            let line = line?;
            match self.parser.parse_line(&line) {
                ParsedLine::Progress(update) => {
                    let position = match total {
                        Some(_) => update.time_seconds,
                        None => update.frame.map(|f| f as f64),
                    };
                    match position {
                        Some(position) => sink.on_position(position),
                        None => debug!("Skipping status line without a usable position"),
                    }
                }
                ParsedLine::Diagnostic(text) => {
                    diagnostics.push_str(&text);
                    diagnostics.push('\n');
                }
            }
        }

        // Stream closed; reap the process. The interrupt handler may be
        // waiting on the same handle, in which case this blocks until it
        // finishes and then observes the stored status.
        let status = match handle.lock() {
            Ok(mut child) => child.wait()?,
            Err(_) => {
                return Err(MovpressError::Session {
                    message: "encoder process handle lock poisoned".to_string(),
                })
            }
        };

        if status.success() {
            sink.on_file_done();
            debug!("Encoder finished cleanly for {}", input.display());
            Ok(SessionOutcome::Completed)
        } else if self.processes.is_cancelled() {
            Ok(SessionOutcome::Cancelled)
        } else {
            Err(MovpressError::Encode {
                path: input.display().to_string(),
                exit_code: status.code(),
                diagnostics,
            })
        }
    }
}
