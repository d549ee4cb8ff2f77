// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{CodecError, ErrorKind};

/// A read cursor over a borrowed byte buffer.
#[derive(Debug, Clone)]
pub struct Input<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Input<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Number of bytes consumed so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// The unread tail of the buffer.
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.offset..]
    }

    pub fn read_byte(&mut self) -> Result<u8, CodecError> {
        let bytes = self.read_bytes(1)?;
        Ok(bytes[0])
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], CodecError> {
        if len > self.remaining() {
            return Err(self.error(ErrorKind::TruncatedInput {
                needed: len,
                available: self.remaining(),
            }));
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// An error positioned at the current offset.
    pub fn error(&self, kind: ErrorKind) -> CodecError {
        CodecError::new(kind, self.offset)
    }

    /// An error positioned at an earlier offset, typically the start of the current item.
    pub fn error_at(&self, offset: usize, kind: ErrorKind) -> CodecError {
        CodecError::new(kind, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_advance_offset() {
        let data = [1u8, 2, 3, 4];
        let mut input = Input::new(&data);
        assert_eq!(input.read_byte().unwrap(), 1);
        assert_eq!(input.read_bytes(2).unwrap(), &[2, 3]);
        assert_eq!(input.offset(), 3);
        assert_eq!(input.remaining(), 1);
        assert_eq!(input.rest(), &[4]);
    }

    #[test]
    fn test_truncated_read_does_not_advance() {
        let data = [1u8, 2];
        let mut input = Input::new(&data);
        input.read_byte().unwrap();

        let err = input.read_array::<4>().unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::TruncatedInput {
                needed: 4,
                available: 1
            }
        );
        assert_eq!(err.offset, 1);
        assert_eq!(input.offset(), 1);
    }
}
