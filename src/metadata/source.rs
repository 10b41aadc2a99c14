use std::io::{ErrorKind, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crate::config::{MAX_TIMEOUT_SECS, MetadataSettings};
use crate::error::QueryError;

/// A queryable metadata index.
///
/// Implementations return the raw textual dump for the requested fields.
/// Transport problems are reported as errors; interpreting them is up to the
/// caller.
pub trait MetadataSource {
    fn query(&self, path: &Path, fields: &[&str]) -> Result<String, QueryError>;
}

impl<S: MetadataSource + ?Sized> MetadataSource for &S {
    fn query(&self, path: &Path, fields: &[&str]) -> Result<String, QueryError> {
        (**self).query(path, fields)
    }
}

/// Queries the Spotlight index through `mdls -name F ... <path>`.
#[derive(Debug, Clone)]
pub struct MdlsSource {
    command: String,
    timeout: Duration,
}

impl MdlsSource {
    pub fn new(settings: &MetadataSettings) -> Self {
        Self {
            command: settings.command.clone(),
            timeout: Duration::from_secs(settings.timeout_secs.clamp(1, MAX_TIMEOUT_SECS)),
        }
    }

    /// Whether the configured command can be started at all. The started
    /// process is killed right away.
    pub fn is_available(&self) -> bool {
        match Command::new(&self.command)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(mut child) => {
                let _ = child.kill();
                let _ = child.wait();
                true
            }
            Err(e) => e.kind() != ErrorKind::NotFound,
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl MetadataSource for MdlsSource {
    fn query(&self, path: &Path, fields: &[&str]) -> Result<String, QueryError> {
        let mut cmd = Command::new(&self.command);
        for field in fields {
            cmd.arg("-name").arg(field);
        }
        let mut child = cmd
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(QueryError::Spawn)?;

        let deadline = Instant::now() + self.timeout;

        // Drain stdout on a helper thread so a chatty child can't block on a full pipe
        // while we wait on the clock.
        let mut stdout = child.stdout.take().ok_or(QueryError::EmptyOutput)?;
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut buf = Vec::new();
            let res = stdout.read_to_end(&mut buf).map(|_| buf);
            let _ = tx.send(res);
        });

        let output = match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
            Ok(Ok(buf)) => buf,
            Ok(Err(e)) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(QueryError::Read(e));
            }
            Err(_) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(QueryError::Timeout(self.timeout));
            }
        };

        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() < deadline => thread::sleep(Duration::from_millis(10)),
                Ok(None) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(QueryError::Timeout(self.timeout));
                }
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(QueryError::Wait(e));
                }
            }
        };

        if !status.success() {
            return Err(QueryError::Status(status.code()));
        }

        let text = String::from_utf8_lossy(&output).into_owned();
        if text.trim().is_empty() {
            return Err(QueryError::EmptyOutput);
        }
        Ok(text)
    }
}
