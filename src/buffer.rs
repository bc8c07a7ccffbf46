use core::borrow::BorrowMut;
use core::cmp::min;

/// Linear byte store with separate read and write cursors.
///
/// Bytes are appended at `tail` and consumed from `head`. Consumed space at the
/// front is reclaimed by [ByteBuffer::compact] once the tail hits the end.
pub struct ByteBuffer<T: BorrowMut<[u8]>> {
    inner: T,
    head: usize, // next byte to consume
    tail: usize, // next free byte
}

impl<T: BorrowMut<[u8]>> ByteBuffer<T> {
    pub fn new(inner: T) -> ByteBuffer<T> {
        ByteBuffer {
            inner,
            head: 0,
            tail: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn unread(&self) -> &[u8] {
        &self.inner.borrow()[self.head..self.tail]
    }

    pub fn free(&self) -> usize {
        self.capacity() - self.tail
    }

    /// Appends as much of `data` as fits, returns the number of bytes stored
    pub fn push(&mut self, data: &[u8]) -> usize {
        if self.free() < data.len() {
            self.compact();
        }
        let count = min(self.free(), data.len());
        let tail = self.tail;
        self.inner.borrow_mut()[tail..tail + count].copy_from_slice(&data[..count]);
        self.tail += count;
        debug_assert!(self.tail <= self.capacity());
        count
    }

    /// Marks up to `count` unread bytes as consumed
    pub fn consume(&mut self, count: usize) {
        self.head += min(count, self.tail - self.head);
        debug_assert!(self.head <= self.tail);
        if self.head == self.tail {
            self.clear();
        }
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
    }

    fn compact(&mut self) {
        if self.head == 0 {
            return;
        }
        let (head, tail) = (self.head, self.tail);
        self.inner.borrow_mut().copy_within(head..tail, 0);
        self.tail -= head;
        self.head = 0;
    }
}

#[cfg(test)]
mod tests {
    use crate::buffer::ByteBuffer;

    const DATA: &[u8] = b"0123456789";

    #[test]
    fn push_when_space_available() {
        let mut buf = ByteBuffer::new([0u8; 8]);
        assert_eq!(5, buf.push(&DATA[..5]));
        assert_eq!(b"01234", buf.unread());
        assert_eq!(3, buf.free());
    }

    #[test]
    fn push_truncates_when_full() {
        let mut buf = ByteBuffer::new([0u8; 4]);
        assert_eq!(4, buf.push(DATA));
        assert_eq!(b"0123", buf.unread());
        assert_eq!(0, buf.push(b"x"));
    }

    #[test]
    fn push_compacts_consumed_space() {
        let mut buf = ByteBuffer::new([0u8; 10]);
        assert_eq!(8, buf.push(&DATA[..8]));
        buf.consume(7);
        assert_eq!(b"7", buf.unread());
        assert_eq!(2, buf.free());

        assert_eq!(5, buf.push(b"abcde"));
        assert_eq!(b"7abcde", buf.unread());
        assert_eq!(4, buf.free());
    }

    #[test]
    fn consume_everything_resets_cursors() {
        let mut buf = ByteBuffer::new([0u8; 10]);
        assert_eq!(10, buf.push(DATA));
        assert_eq!(0, buf.free());

        buf.consume(usize::MAX);
        assert!(buf.unread().is_empty());
        assert_eq!(10, buf.free());

        assert_eq!(10, buf.push(DATA));
        assert_eq!(DATA, buf.unread());
    }
}
