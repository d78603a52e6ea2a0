use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use tempfile::TempPath;

use super::{TokenizeError, TokenizedLine, Tokenizer};
use crate::engine::config::TokenizerConfig;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Runs an external tokenizer process once per batch.
///
/// Purpose: Delegates PTB tokenization to a black-box tool (CoreNLP by default).
/// The batch is written to a temporary file whose path is appended as the last
/// argument; tokens are read from the tool's stdout, one line per input line.
/// The temporary file is removed when the call returns, on every path.
#[derive(Debug, Clone)]
pub struct ExternalTokenizer {
    program: String,
    args: Vec<String>,
    workdir: Option<PathBuf>,
    timeout: Duration,
}

impl ExternalTokenizer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            workdir: None,
            timeout: TokenizerConfig::default().timeout(),
        }
    }

    pub fn from_config(config: &TokenizerConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            workdir: config.workdir.clone(),
            timeout: config.timeout(),
        }
    }

    /// Run the tool from `dir`; the temporary input file is created there too.
    pub fn with_workdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(dir.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn write_input(&self, text: &str) -> Result<TempPath, TokenizeError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("labeltok-").suffix(".txt");

        let mut file = match &self.workdir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(TokenizeError::TempFile)?;

        // Every sentence, including an empty last one, ends with a newline.
        file.write_all(text.as_bytes())
            .map_err(TokenizeError::TempFile)?;
        file.write_all(b"\n").map_err(TokenizeError::TempFile)?;
        file.flush().map_err(TokenizeError::TempFile)?;

        // Close the handle so the tool can open the file everywhere; the path
        // still deletes the file on drop.
        Ok(file.into_temp_path())
    }

    /// Path handed to the tool. Relative to the workdir when one is set.
    fn input_arg<'a>(&self, path: &'a Path) -> &'a Path {
        match (&self.workdir, path.file_name()) {
            (Some(_), Some(name)) => Path::new(name),
            _ => path,
        }
    }

    fn run(&self, input: &Path) -> Result<String, TokenizeError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(self.input_arg(input))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }

        tracing::debug!(program = %self.program, args = ?self.args, input = %input.display(), "spawning tokenizer");
        let started = Instant::now();
        let deadline = started + self.timeout;

        let mut child = cmd.spawn().map_err(|source| TokenizeError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = self.wait(&mut child, deadline)?;

        // Anything the tool left behind may still hold the pipes open.
        let stdout = self.collect(&stdout, deadline)?;
        let stderr = String::from_utf8_lossy(&self.collect(&stderr, deadline)?).into_owned();

        tracing::info!(
            program = %self.program,
            elapsed_ms = started.elapsed().as_millis() as u64,
            stderr_bytes = stderr.len(),
            "tokenizer finished"
        );

        if !status.success() {
            return Err(TokenizeError::Exited {
                program: self.program.clone(),
                status,
                stderr: stderr.trim().to_string(),
            });
        }

        if !stderr.trim().is_empty() {
            tracing::debug!(stderr = %stderr.trim(), "tokenizer stderr");
        }

        Ok(String::from_utf8(stdout)?)
    }

    /// Block until the child exits, killing it once the deadline passes.
    fn wait(&self, child: &mut Child, deadline: Instant) -> Result<ExitStatus, TokenizeError> {
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => {}
                Err(err) => {
                    reap(child);
                    return Err(TokenizeError::Io(err));
                }
            }

            if Instant::now() >= deadline {
                tracing::warn!(program = %self.program, timeout = ?self.timeout, "killing tokenizer");
                reap(child);
                // Reader threads are left detached: a grandchild may still hold the pipes.
                return Err(self.timed_out());
            }

            thread::sleep(POLL_INTERVAL);
        }
    }

    /// Receive a drained pipe, giving up at the deadline.
    fn collect(&self, pipe: &PipeOutput, deadline: Instant) -> Result<Vec<u8>, TokenizeError> {
        let remaining = deadline.saturating_duration_since(Instant::now());

        match pipe.recv_timeout(remaining) {
            Ok(bytes) => bytes.map_err(TokenizeError::Io),
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!(program = %self.program, timeout = ?self.timeout, "tokenizer output still open");
                Err(self.timed_out())
            }
            Err(RecvTimeoutError::Disconnected) => Err(TokenizeError::Io(std::io::Error::other(
                "pipe reader thread panicked",
            ))),
        }
    }

    fn timed_out(&self) -> TokenizeError {
        TokenizeError::Timeout {
            program: self.program.clone(),
            timeout: self.timeout,
        }
    }
}

impl Tokenizer for ExternalTokenizer {
    fn name(&self) -> &str {
        &self.program
    }

    fn tokenize(&self, text: &str) -> Result<Vec<TokenizedLine>, TokenizeError> {
        let input = self.write_input(text)?;
        let stdout = self.run(&input)?;
        Ok(split_output(&stdout))
    }
}

/// Split tool stdout into lines, ignoring one trailing newline.
pub fn split_output(stdout: &str) -> Vec<TokenizedLine> {
    if stdout.is_empty() {
        return Vec::new();
    }

    let body = stdout.strip_suffix('\n').unwrap_or(stdout);
    body.split('\n').map(TokenizedLine::from_raw).collect()
}

type PipeOutput = Receiver<std::io::Result<Vec<u8>>>;

/// Read a pipe to the end on a helper thread.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> PipeOutput {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let result = match pipe {
            Some(mut pipe) => pipe.read_to_end(&mut buf).map(|_| buf),
            None => Ok(buf),
        };
        let _ = tx.send(result);
    });
    rx
}

fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}
