use crate::engine::{CaptureError, FRAME_BUFFER_CAPACITY};

/// Fixed-capacity storage that one frame at a time is written into.
///
/// The storage is allocated once; `len` tracks how much of it belongs to the
/// current frame, so bytes left over from an earlier, longer frame are never
/// visible through [`FrameBuffer::frame`].
#[derive(Debug)]
pub struct FrameBuffer {
    storage: Box<[u8]>,
    len: usize,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::with_capacity(FRAME_BUFFER_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: vec![0u8; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Hands out the whole storage for the next acquisition and forgets the
    /// previous frame.
    pub fn writable(&mut self) -> &mut [u8] {
        self.len = 0;
        &mut self.storage
    }

    /// Records how many bytes the source wrote.
    pub fn commit(&mut self, len: usize) -> Result<(), CaptureError> {
        if len > self.storage.len() {
            return Err(CaptureError::LengthViolation {
                reported: len,
                capacity: self.storage.len(),
            });
        }
        self.len = len;
        Ok(())
    }

    /// The bytes of the current frame.
    pub fn frame(&self) -> &[u8] {
        &self.storage[..self.len]
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
