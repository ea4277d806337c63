//! The capture loop: acquire, validate, decode, emit, repeat.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, error, info, trace};

use super::datalink::EthernetHeader;
use crate::engine::constants::ethertype_name;
use crate::engine::context::CaptureConfig;
use crate::engine::error::{CaptureError, DecodeError};
use crate::packet::FrameBuffer;
use crate::sink::OutputSink;
use crate::source::{Acquire, FrameSource};

/// Cooperative stop flag, checked before every acquisition.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// The shared flag, for code that has to set it without holding a token
    /// (a signal handler).
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Cancelled,
    SourceExhausted,
    LimitReached,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureStats {
    /// Frames handed over by the source, decoded or not.
    pub frames: u64,
    pub decoded: u64,
    pub truncated: u64,
    /// Waits that ended without a frame.
    pub idle: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureSummary {
    pub reason: StopReason,
    pub stats: CaptureStats,
}

/// What a single iteration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Emitted,
    Skipped(DecodeError),
    Idle,
    Exhausted,
}

pub struct CaptureLoop<S, O> {
    source: S,
    sink: O,
    buffer: FrameBuffer,
    config: CaptureConfig,
    cancel: CancelToken,
    stats: CaptureStats,
}

impl<S: FrameSource, O: OutputSink> CaptureLoop<S, O> {
    pub fn new(source: S, sink: O, config: CaptureConfig) -> Self {
        Self {
            source,
            sink,
            buffer: FrameBuffer::new(),
            config,
            cancel: CancelToken::new(),
            stats: CaptureStats::default(),
        }
    }

    /// Replaces the default 64 KiB buffer.
    pub fn with_buffer(mut self, buffer: FrameBuffer) -> Self {
        self.buffer = buffer;
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn stats(&self) -> CaptureStats {
        self.stats
    }

    pub fn into_parts(self) -> (S, O) {
        (self.source, self.sink)
    }

    /// Runs one acquire/decode/emit iteration.
    ///
    /// Errors returned from here are fatal; a short frame comes back as
    /// `Step::Skipped` instead.
    pub fn step(&mut self) -> Result<Step, CaptureError> {
        let acquired = self
            .source
            .acquire(self.buffer.writable())
            .map_err(CaptureError::AcquisitionFailed)?;

        let len = match acquired {
            Acquire::Frame(len) => len,
            Acquire::Idle => {
                self.stats.idle += 1;
                return Ok(Step::Idle);
            }
            Acquire::Exhausted => return Ok(Step::Exhausted),
        };

        self.buffer.commit(len)?;
        self.stats.frames += 1;

        let frame = self.buffer.frame();
        let header = match EthernetHeader::parse(frame) {
            Ok(header) => header,
            Err(err) => {
                self.stats.truncated += 1;
                debug!("skipping frame: {}", err);
                return Ok(Step::Skipped(err));
            }
        };

        let record = header.to_record(frame.len());
        trace!(
            "frame {} bytes, type 0x{:04x} ({})",
            record.length,
            record.protocol,
            ethertype_name(record.protocol)
        );
        self.sink.emit(&record, frame)?;
        self.stats.decoded += 1;

        Ok(Step::Emitted)
    }

    /// Loops until cancelled, the source runs dry, the record limit is hit,
    /// or a fatal error occurs.
    pub fn run(&mut self) -> Result<CaptureSummary, CaptureError> {
        info!("capture started");

        let reason = loop {
            if self.cancel.is_cancelled() {
                break StopReason::Cancelled;
            }
            let decoded = self.stats.decoded;
            if self.config.max_records.is_some_and(|limit| decoded >= limit) {
                break StopReason::LimitReached;
            }

            match self.step() {
                Ok(Step::Exhausted) => break StopReason::SourceExhausted,
                Ok(_) => {}
                Err(err) => {
                    error!("capture stopped: {}", err);
                    return Err(err);
                }
            }
        };

        info!(
            "capture stopped ({:?}): {} frames, {} decoded, {} truncated, {} idle",
            reason,
            self.stats.frames,
            self.stats.decoded,
            self.stats.truncated,
            self.stats.idle
        );
        Ok(CaptureSummary {
            reason,
            stats: self.stats,
        })
    }
}
