// src/transfer/engine.rs
//! Chunked file sender.
//!
//! One chunk is read and transmitted per call, so a transfer never blocks the
//! event loop for longer than a single bounded read. `start_send` sends the
//! first chunk and arms the periodic task; every tick after that sends the
//! next one. A read shorter than the chunk size is the last chunk.

use log::{debug, info, warn};

use super::{
    channel::{MessageChannel, MessageKind},
    sched::{PeriodicTask, TaskPriority},
};
use crate::{
    config::{TransferSettings, CHUNK_MAX_SIZE},
    error::{FilesError, Result},
    fs::{path_basename, FileHandle, FileSystem},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferState {
    Idle,
    Sending,
}

/// What a successful engine step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferEvent {
    /// First chunk sent; more follow on the next ticks.
    Started { name: String, percent: Option<u8> },
    /// A full chunk was sent.
    Progress { percent: Option<u8> },
    /// The terminal (short) chunk was sent and the file closed.
    Completed { name: String },
}

/// The file being sent. Dropping it closes the handle.
struct OpenTransfer<H> {
    handle: H,
    path: String,
    /// Chunk size fixed for the whole transfer, since the receiver frames by it
    chunk_size: usize,
}

pub struct TransferEngine<H: FileHandle> {
    settings: TransferSettings,
    open: Option<OpenTransfer<H>>,
    task: PeriodicTask,
    buf: Vec<u8>,
    chunks_sent: u64,
}

impl<H: FileHandle> TransferEngine<H> {
    /// Create an idle engine. The periodic task is allocated here, switched off.
    pub fn new(settings: TransferSettings) -> Self {
        Self {
            task: PeriodicTask::new(settings.chunk_delay(), TaskPriority::Off),
            settings,
            open: None,
            buf: vec![0; CHUNK_MAX_SIZE],
            chunks_sent: 0,
        }
    }

    pub fn settings(&self) -> &TransferSettings {
        &self.settings
    }

    /// Settings changes apply from the next transfer on.
    pub fn settings_mut(&mut self) -> &mut TransferSettings {
        &mut self.settings
    }

    pub fn in_progress(&self) -> bool {
        self.open.is_some()
    }

    pub fn state(&self) -> TransferState {
        if self.in_progress() {
            TransferState::Sending
        } else {
            TransferState::Idle
        }
    }

    /// Path of the file being sent.
    pub fn current_path(&self) -> Option<&str> {
        self.open.as_ref().map(|o| o.path.as_str())
    }

    pub fn task(&self) -> &PeriodicTask {
        &self.task
    }

    /// Chunks transmitted by the current or last transfer.
    pub fn chunks_sent(&self) -> u64 {
        self.chunks_sent
    }

    /// Open `path`, send its first chunk and arm the periodic task.
    ///
    /// Rejected with [`FilesError::TransferBusy`] while a transfer runs; the
    /// running transfer is not touched. A file that fits in one chunk
    /// completes right here.
    pub fn start_send<F>(
        &mut self,
        fs: &F,
        path: &str,
        channel: &mut dyn MessageChannel,
    ) -> Result<TransferEvent>
    where
        F: FileSystem<File = H>,
    {
        if self.in_progress() {
            return Err(FilesError::TransferBusy);
        }

        let mut handle = fs.open(path).map_err(|source| FilesError::FileOpenError {
            path: path.to_string(),
            source,
        })?;

        let chunk_size = self.settings.chunk_size();
        let n = handle
            .read(&mut self.buf[..chunk_size])
            .map_err(|source| FilesError::ReadError {
                path: path.to_string(),
                source,
            })?;

        channel
            .send(MessageKind::Text, &self.buf[..n])
            .map_err(|e| FilesError::SendAborted {
                reason: e.to_string(),
            })?;
        self.chunks_sent = 1;

        let name = path_basename(path).to_string();
        if n < chunk_size {
            info!("sent {path} in a single chunk of {n} B");
            return Ok(TransferEvent::Completed { name });
        }

        let percent = progress(&mut handle);
        self.open = Some(OpenTransfer {
            handle,
            path: path.to_string(),
            chunk_size,
        });

        self.task.set_period(self.settings.chunk_delay());
        self.task.reset();
        self.task.set_priority(TaskPriority::High);

        info!(
            "sending {path}: {chunk_size} B chunks every {} ms",
            self.settings.chunk_delay_ms()
        );
        Ok(TransferEvent::Started { name, percent })
    }

    /// Send the next chunk. Does nothing (returns `Ok(None)`) when idle.
    pub fn on_tick(&mut self, channel: &mut dyn MessageChannel) -> Result<Option<TransferEvent>> {
        let Some(open) = self.open.as_mut() else {
            return Ok(None);
        };

        let chunk_size = open.chunk_size;
        let read = open.handle.read(&mut self.buf[..chunk_size]);
        let n = match read {
            Ok(n) => n,
            Err(e) => {
                warn!("reading {} failed: {e}", open.path);
                self.finish();
                return Err(FilesError::SendAborted {
                    reason: e.to_string(),
                });
            }
        };

        if let Err(e) = channel.send(MessageKind::Text, &self.buf[..n]) {
            warn!("channel refused chunk of {}: {e}", open.path);
            self.finish();
            return Err(FilesError::SendAborted {
                reason: e.to_string(),
            });
        }
        self.chunks_sent += 1;

        if n < chunk_size {
            let name = path_basename(&open.path).to_string();
            info!("sent {} in {} chunks", open.path, self.chunks_sent);
            self.finish();
            return Ok(Some(TransferEvent::Completed { name }));
        }

        let percent = progress(&mut open.handle);
        debug!("chunk {} of {} sent ({:?}%)", self.chunks_sent, open.path, percent);
        Ok(Some(TransferEvent::Progress { percent }))
    }

    /// Run one tick if the periodic task is due at `now`.
    pub fn poll(
        &mut self,
        now: std::time::Instant,
        channel: &mut dyn MessageChannel,
    ) -> Result<Option<TransferEvent>> {
        if self.task.poll(now) {
            self.on_tick(channel)
        } else {
            Ok(None)
        }
    }

    /// Drop a running transfer without a final chunk. Returns true if one was running.
    pub fn cancel(&mut self) -> bool {
        match self.open.as_ref() {
            Some(open) => {
                info!("cancelled sending {}", open.path);
                self.finish();
                true
            }
            None => false,
        }
    }

    fn finish(&mut self) {
        self.open = None;
        self.task.set_priority(TaskPriority::Off);
    }
}

/// Read position as a percentage of the file size.
fn progress<H: FileHandle>(handle: &mut H) -> Option<u8> {
    let size = handle.size().ok()?;
    let pos = handle.tell().ok()?;
    if size == 0 {
        return Some(100);
    }
    Some((pos.saturating_mul(100) / size).min(100) as u8)
}
