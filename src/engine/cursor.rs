/// Bounds-checked reader over a borrowed byte window.
///
/// Every read either returns data from inside the window or `None`; nothing
/// is ever reinterpreted in place.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn read_exact(&mut self, len: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(len)?;
        let out = self.data.get(self.pos..end)?;
        self.pos = end;
        Some(out)
    }

    /// Borrows the next `N` bytes as a fixed-size array without copying.
    pub fn read_array<const N: usize>(&mut self) -> Option<&'a [u8; N]> {
        let bytes = self.read_exact(N)?;
        bytes.try_into().ok()
    }

    pub fn read_u32(&mut self, little_endian: bool) -> Option<u32> {
        let bytes = *self.read_array::<4>()?;
        Some(if little_endian {
            u32::from_le_bytes(bytes)
        } else {
            u32::from_be_bytes(bytes)
        })
    }

    pub fn read_u16(&mut self, little_endian: bool) -> Option<u16> {
        let bytes = *self.read_array::<2>()?;
        Some(if little_endian {
            u16::from_le_bytes(bytes)
        } else {
            u16::from_be_bytes(bytes)
        })
    }
}
