//! Guest command buffer
//!
//! Each guest thread owns a fixed 0x100-byte IPC area. The kernel
//! collaborator copies it in before dispatch and out again afterwards.

use alloc::format;
use core::mem::size_of;
use static_assertions::const_assert_eq;

use crate::error::{self, Result};
use crate::ipc::header::CommandHeader;

/// Number of 32-bit words in a command buffer
pub const COMMAND_BUFFER_WORDS: usize = 64;

/// Fixed-size guest command buffer
#[derive(Clone, PartialEq, Eq)]
#[repr(C)]
pub struct CommandBuffer {
    words: [u32; COMMAND_BUFFER_WORDS],
}

const_assert_eq!(size_of::<CommandBuffer>(), 0x100);

impl CommandBuffer {
    /// Creates a zeroed buffer
    pub const fn new() -> Self {
        Self {
            words: [0; COMMAND_BUFFER_WORDS],
        }
    }

    /// Creates a buffer whose leading words are `words`, zero after that
    pub fn from_words(words: &[u32]) -> Result<Self> {
        if words.len() > COMMAND_BUFFER_WORDS {
            return Err(error::invalid_argument(&format!(
                "{} words do not fit in a {}-word command buffer",
                words.len(),
                COMMAND_BUFFER_WORDS
            )));
        }
        let mut buffer = Self::new();
        buffer.words[..words.len()].copy_from_slice(words);
        Ok(buffer)
    }

    /// Header word
    pub fn header(&self) -> CommandHeader {
        CommandHeader::from_raw(self.words[0])
    }

    /// Word at `index`, if inside the buffer
    pub fn word(&self, index: usize) -> Option<u32> {
        self.words.get(index).copied()
    }

    /// All words
    pub fn as_words(&self) -> &[u32; COMMAND_BUFFER_WORDS] {
        &self.words
    }

    /// All words, mutable
    pub fn as_words_mut(&mut self) -> &mut [u32; COMMAND_BUFFER_WORDS] {
        &mut self.words
    }

    /// Zeroes every word
    pub fn clear(&mut self) {
        self.words = [0; COMMAND_BUFFER_WORDS];
    }
}

impl Default for CommandBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for CommandBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // Trailing zero words are noise.
        let used = self
            .words
            .iter()
            .rposition(|&w| w != 0)
            .map_or(0, |last| last + 1);
        f.debug_struct("CommandBuffer")
            .field("header", &self.header())
            .field("words", &&self.words[..used])
            .finish()
    }
}
