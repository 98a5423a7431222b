//! External raw decoding.

use crate::error::DevelopError;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// How often a running decoder is polled for exit
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Turns a raw camera file into intermediate image bytes that a
/// [`FormatConverter`](super::FormatConverter) can read.
pub trait RawDecoder: Send + Sync {
    fn decode(&self, raw_path: &Path) -> Result<Vec<u8>, DevelopError>;
}

/// Configuration for the external decoder process
#[derive(Debug, Clone)]
pub struct DecoderConfig {
    /// Program to run
    pub program: String,
    /// Arguments placed before the raw file path
    pub args: Vec<String>,
    /// Hard limit on a single invocation
    pub timeout: Duration,
}

impl Default for DecoderConfig {
    /// `dcraw -c -e <raw>`: write the embedded camera preview to stdout
    fn default() -> Self {
        Self {
            program: "dcraw".to_string(),
            args: vec!["-c".to_string(), "-e".to_string()],
            timeout: Duration::from_secs(120),
        }
    }
}

/// Runs an external decoder and captures its standard output
#[derive(Debug, Clone, Default)]
pub struct CommandDecoder {
    config: DecoderConfig,
}

impl CommandDecoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }
}

impl RawDecoder for CommandDecoder {
    fn decode(&self, raw_path: &Path) -> Result<Vec<u8>, DevelopError> {
        let program = &self.config.program;
        let io_error = |source| DevelopError::Io {
            path: raw_path.to_path_buf(),
            source,
        };

        let mut child = Command::new(program)
            .args(&self.config.args)
            .arg(raw_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| DevelopError::ToolUnavailable {
                program: program.clone(),
                source,
            })?;

        // Drain both pipes on their own threads so a chatty child can't
        // block on a full pipe while we wait for it.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let deadline = Instant::now() + self.config.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    tracing::warn!(
                        program = %program,
                        path = %raw_path.display(),
                        timeout = ?self.config.timeout,
                        "Raw decoder timed out"
                    );
                    return Err(DevelopError::TimedOut {
                        program: program.clone(),
                        path: raw_path.to_path_buf(),
                        timeout: self.config.timeout,
                    });
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(source) => {
                    let _ = child.kill();
                    return Err(io_error(source));
                }
            }
        };

        let output = collect(stdout).map_err(io_error)?;
        let stderr = collect(stderr).unwrap_or_default();

        if !status.success() {
            return Err(DevelopError::ToolFailed {
                program: program.clone(),
                path: raw_path.to_path_buf(),
                status,
                stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
            });
        }

        if output.is_empty() {
            return Err(DevelopError::EmptyOutput {
                program: program.clone(),
                path: raw_path.to_path_buf(),
            });
        }

        Ok(output)
    }
}

fn drain<R>(pipe: Option<R>) -> JoinHandle<std::io::Result<Vec<u8>>>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buffer)?;
        }
        Ok(buffer)
    })
}

fn collect(handle: JoinHandle<std::io::Result<Vec<u8>>>) -> std::io::Result<Vec<u8>> {
    handle
        .join()
        .unwrap_or_else(|_| Err(std::io::Error::other("pipe reader panicked")))
}
