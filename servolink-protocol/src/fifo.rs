//! Fixed-capacity circular byte buffer
//!
//! One instance carries inbound bytes (interrupt → foreground) and another
//! carries outbound bytes (foreground → interrupt). Writes are rejected when
//! the buffer is full and reads are rejected when it is empty; nothing is
//! ever overwritten.
//!
//! There is no internal locking. Each FIFO has exactly one producer and one
//! consumer, and the owner of the FIFO is responsible for serialising access
//! between the two execution contexts.

/// Circular buffer of `N` bytes
#[derive(Debug, Clone)]
pub struct ByteFifo<const N: usize> {
    buf: [u8; N],
    /// Next slot to read
    read: usize,
    /// Next slot to write
    write: usize,
    /// Bytes currently stored, always in `0..=N`
    len: usize,
}

impl<const N: usize> Default for ByteFifo<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ByteFifo<N> {
    /// Create an empty FIFO
    pub const fn new() -> Self {
        Self {
            buf: [0; N],
            read: 0,
            write: 0,
            len: 0,
        }
    }

    /// Total number of bytes the FIFO can hold
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Bytes that can be written without overwriting unread data
    pub fn write_space(&self) -> usize {
        N - self.len
    }

    /// Bytes currently available to read
    pub fn read_size(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Append a byte at the write cursor
    ///
    /// Returns the byte back as `Err` if the FIFO is full; the FIFO is left
    /// untouched in that case.
    pub fn put(&mut self, byte: u8) -> Result<(), u8> {
        if self.is_full() {
            return Err(byte);
        }
        self.buf[self.write] = byte;
        self.write = (self.write + 1) % N;
        self.len += 1;
        Ok(())
    }

    /// Remove the byte at the read cursor
    ///
    /// Returns `None` if the FIFO is empty.
    pub fn get(&mut self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }
        let byte = self.buf[self.read];
        self.read = (self.read + 1) % N;
        self.len -= 1;
        Some(byte)
    }

    /// Append all of `bytes`, or nothing at all
    ///
    /// Returns false (and writes nothing) if there is not enough space for
    /// the whole slice.
    pub fn put_all(&mut self, bytes: &[u8]) -> bool {
        if bytes.len() > self.write_space() {
            return false;
        }
        for &byte in bytes {
            // Space was checked above
            let _ = self.put(byte);
        }
        true
    }

    /// Remove exactly `K` bytes, or nothing at all
    ///
    /// Returns `None` (and consumes nothing) if fewer than `K` bytes are
    /// stored.
    pub fn take<const K: usize>(&mut self) -> Option<[u8; K]> {
        if self.len < K {
            return None;
        }
        let mut out = [0u8; K];
        for slot in out.iter_mut() {
            *slot = self.get()?;
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_fifo_is_empty() {
        let fifo: ByteFifo<21> = ByteFifo::new();
        assert_eq!(fifo.capacity(), 21);
        assert_eq!(fifo.read_size(), 0);
        assert_eq!(fifo.write_space(), 21);
        assert!(fifo.is_empty());
    }

    #[test]
    fn test_put_get_preserves_order() {
        let mut fifo: ByteFifo<4> = ByteFifo::new();
        fifo.put(1).unwrap();
        fifo.put(2).unwrap();
        fifo.put(3).unwrap();

        assert_eq!(fifo.get(), Some(1));
        assert_eq!(fifo.get(), Some(2));
        assert_eq!(fifo.get(), Some(3));
        assert_eq!(fifo.get(), None);
    }

    #[test]
    fn test_put_rejected_when_full() {
        let mut fifo: ByteFifo<2> = ByteFifo::new();
        fifo.put(0x10).unwrap();
        fifo.put(0x20).unwrap();

        assert!(fifo.is_full());
        assert_eq!(fifo.put(0x30), Err(0x30));

        // Rejected write must not clobber stored data
        assert_eq!(fifo.get(), Some(0x10));
        assert_eq!(fifo.get(), Some(0x20));
    }

    #[test]
    fn test_cursors_wrap_around() {
        let mut fifo: ByteFifo<3> = ByteFifo::new();
        for round in 0..10u8 {
            fifo.put(round).unwrap();
            fifo.put(round.wrapping_add(100)).unwrap();
            assert_eq!(fifo.get(), Some(round));
            assert_eq!(fifo.get(), Some(round.wrapping_add(100)));
            assert_eq!(fifo.read_size() + fifo.write_space(), fifo.capacity());
        }
    }

    #[test]
    fn test_put_all_is_all_or_nothing() {
        let mut fifo: ByteFifo<6> = ByteFifo::new();
        assert!(fifo.put_all(&[1, 2, 3, 4]));
        assert!(!fifo.put_all(&[5, 6, 7]));
        assert_eq!(fifo.read_size(), 4);
        assert!(fifo.put_all(&[5, 6]));
        assert!(fifo.is_full());
    }

    #[test]
    fn test_take_is_all_or_nothing() {
        let mut fifo: ByteFifo<8> = ByteFifo::new();
        fifo.put_all(&[9, 8, 7]);

        assert_eq!(fifo.take::<5>(), None);
        assert_eq!(fifo.read_size(), 3);

        fifo.put_all(&[6, 5]);
        assert_eq!(fifo.take::<5>(), Some([9, 8, 7, 6, 5]));
        assert!(fifo.is_empty());
    }
}
