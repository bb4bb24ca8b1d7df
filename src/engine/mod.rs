//! Core encoding engine: subprocess lifecycle and progress parsing

use std::path::{Path, PathBuf};
use std::process::Command;

pub mod progress;
pub mod session;

pub use progress::{ParsedLine, ProgressParser, ProgressUpdate};
pub use session::{EncodeSession, SessionOutcome};

/// Fixed encoder invocation profile
///
/// One profile per run: video re-encode to the configured codec, audio
/// passthrough implied, output path is `output_dir/<input file name>`.
#[derive(Debug, Clone)]
pub struct EncodeProfile {
    /// Encoder executable
    pub program: PathBuf,
    /// Target video codec
    pub video_codec: String,
    /// Speed/quality preset
    pub preset: String,
    /// Container-compatibility codec tag
    pub codec_tag: String,
}

impl Default for EncodeProfile {
    fn default() -> Self {
        Self {
            program: PathBuf::from("ffmpeg"),
            video_codec: "libx265".to_string(),
            preset: "veryfast".to_string(),
            codec_tag: "hvc1".to_string(),
        }
    }
}

impl EncodeProfile {
    /// Use a different encoder executable
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Build the encoder command for one input/output pair
    pub fn to_command(&self, input: &Path, output: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg("-nostdin")
            .arg("-y")
            .arg("-i")
            .arg(input)
            .arg("-c:v")
            .arg(&self.video_codec)
            .arg("-preset")
            .arg(&self.preset)
            .arg("-tag:v")
            .arg(&self.codec_tag)
            .arg(output);
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn default_profile_targets_hevc() {
        let profile = EncodeProfile::default();
        assert_eq!(profile.video_codec, "libx265");
        assert_eq!(profile.preset, "veryfast");
        assert_eq!(profile.codec_tag, "hvc1");
    }

    #[test]
    fn command_places_output_last() {
        let profile = EncodeProfile::default();
        let command = profile.to_command(Path::new("in.mov"), Path::new("out/in.mov"));
        let args: Vec<&OsStr> = command.get_args().collect();
        assert_eq!(args.last(), Some(&OsStr::new("out/in.mov")));
        assert!(args.contains(&OsStr::new("libx265")));
        assert!(args.contains(&OsStr::new("-tag:v")));
    }
}
