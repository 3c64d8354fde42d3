//! Decoded IPC requests and responses
//!
//! Requests are decoded out of a [`CommandBuffer`] before dispatch; handlers
//! return an [`IpcResponse`] that the dispatcher encodes back into the same
//! buffer.

use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::ipc::buffer::{COMMAND_BUFFER_WORDS, CommandBuffer};
use crate::ipc::header::{CommandHeader, CommandId, MAX_PARAM_COUNT};
use crate::ipc::result::ResultCode;

/// A guest request: header plus its parameter words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpcRequest {
    header: CommandHeader,
    /// Normal words followed by translate words
    params: Vec<u32>,
}

impl IpcRequest {
    /// Decodes the request held in `buffer`
    ///
    /// Fails with [`Error::MalformedHeader`] when the header announces more
    /// parameter words than the buffer holds.
    pub fn decode(buffer: &CommandBuffer) -> Result<Self> {
        let header = buffer.header();
        let count = header.param_words();
        if 1 + count > COMMAND_BUFFER_WORDS {
            return Err(Error::MalformedHeader(header.raw()));
        }
        Ok(Self {
            header,
            params: buffer.as_words()[1..=count].to_vec(),
        })
    }

    /// Decodes a request from its leading words; missing words read as zero
    pub fn from_words(words: &[u32]) -> Result<Self> {
        Self::decode(&CommandBuffer::from_words(words)?)
    }

    /// Request header
    pub fn header(&self) -> CommandHeader {
        self.header
    }

    /// Identifier used for handler lookup
    pub fn command_id(&self) -> CommandId {
        self.header.raw()
    }

    /// All parameter words
    pub fn params(&self) -> &[u32] {
        &self.params
    }

    /// Normal parameter words
    pub fn normal_params(&self) -> &[u32] {
        &self.params[..self.header.normal_params() as usize]
    }

    /// Translate parameter words
    pub fn translate_params(&self) -> &[u32] {
        &self.params[self.header.normal_params() as usize..]
    }

    /// Cursor over the parameter words
    pub fn parser(&self) -> RequestParser<'_> {
        RequestParser {
            request: self,
            normal_pos: 0,
            translate_pos: 0,
        }
    }
}

/// Sequential reader over a request's parameters
#[derive(Debug)]
pub struct RequestParser<'a> {
    request: &'a IpcRequest,
    normal_pos: usize,
    translate_pos: usize,
}

impl RequestParser<'_> {
    /// Next normal word
    pub fn pop_u32(&mut self) -> Result<u32> {
        let word = self
            .request
            .normal_params()
            .get(self.normal_pos)
            .copied()
            .ok_or(Error::MissingParameter {
                index: self.normal_pos,
            })?;
        self.normal_pos += 1;
        Ok(word)
    }

    /// Next two normal words, low word first
    pub fn pop_u64(&mut self) -> Result<u64> {
        let low = self.pop_u32()? as u64;
        let high = self.pop_u32()? as u64;
        Ok(low | (high << 32))
    }

    /// Next normal word read as a byte-sized boolean
    pub fn pop_bool(&mut self) -> Result<bool> {
        Ok(self.pop_u32()? & 0xFF != 0)
    }

    /// Next translate word, uninterpreted
    pub fn pop_translate(&mut self) -> Result<u32> {
        let normal = self.request.normal_params().len();
        let word = self
            .request
            .translate_params()
            .get(self.translate_pos)
            .copied()
            .ok_or(Error::MissingParameter {
                index: normal + self.translate_pos,
            })?;
        self.translate_pos += 1;
        Ok(word)
    }

    /// Normal words not yet read
    pub fn remaining_normal(&self) -> usize {
        self.request.normal_params().len() - self.normal_pos
    }
}

/// A response ready to be written back to the guest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpcResponse {
    command_id: u16,
    result: ResultCode,
    payload: Vec<u32>,
    translate: Vec<u32>,
}

impl IpcResponse {
    /// Creates an empty response carrying `result`
    pub fn new(command_id: u16, result: ResultCode) -> Self {
        Self {
            command_id,
            result,
            payload: Vec::new(),
            translate: Vec::new(),
        }
    }

    /// Creates an empty success response
    pub fn success(command_id: u16) -> Self {
        Self::new(command_id, ResultCode::SUCCESS)
    }

    /// Creates an error response: header, result code, nothing else
    pub fn error(command_id: u16, result: ResultCode) -> Self {
        Self::new(command_id, result)
    }

    /// Appends a normal word
    pub fn with_word(mut self, word: u32) -> Self {
        self.payload.push(word);
        self
    }

    /// Appends a 64-bit value as two normal words, low word first
    pub fn with_u64(self, value: u64) -> Self {
        self.with_word(value as u32).with_word((value >> 32) as u32)
    }

    /// Appends a translate word
    pub fn with_translate(mut self, word: u32) -> Self {
        self.translate.push(word);
        self
    }

    /// Appends a normal word in place
    pub fn push(&mut self, word: u32) {
        self.payload.push(word);
    }

    /// Command id echoed in the response header
    pub fn command_id(&self) -> u16 {
        self.command_id
    }

    /// Result code
    pub fn result(&self) -> ResultCode {
        self.result
    }

    /// Normal words after the result code
    pub fn payload(&self) -> &[u32] {
        &self.payload
    }

    /// Translate words
    pub fn translate(&self) -> &[u32] {
        &self.translate
    }

    /// Header word for this response
    ///
    /// Fails when either parameter count exceeds what the header's 6-bit
    /// fields can carry.
    pub fn header(&self) -> Result<CommandHeader> {
        let normal = 1 + self.payload.len();
        let translate = self.translate.len();
        if normal > MAX_PARAM_COUNT as usize || translate > MAX_PARAM_COUNT as usize {
            return Err(Error::ResponseOverflow {
                words: self.word_count(),
            });
        }
        Ok(CommandHeader::new(self.command_id, normal as u32, translate as u32))
    }

    /// Buffer words this response occupies, header included
    pub fn word_count(&self) -> usize {
        2 + self.payload.len() + self.translate.len()
    }

    /// Writes the response into `buffer`, zeroing every word after it
    pub fn encode_into(&self, buffer: &mut CommandBuffer) -> Result<()> {
        let header = self.header()?;
        let words = self.word_count();
        if words > COMMAND_BUFFER_WORDS {
            return Err(Error::ResponseOverflow { words });
        }

        buffer.clear();
        let out = buffer.as_words_mut();
        out[0] = header.raw();
        out[1] = self.result.raw();
        let payload_end = 2 + self.payload.len();
        out[2..payload_end].copy_from_slice(&self.payload);
        out[payload_end..words].copy_from_slice(&self.translate);
        Ok(())
    }

    /// Reads a response back out of `buffer`
    ///
    /// A response header must announce at least one normal word, the result
    /// code.
    pub fn decode(buffer: &CommandBuffer) -> Result<Self> {
        let header = buffer.header();
        let normal = header.normal_params() as usize;
        let translate = header.translate_params() as usize;
        if normal == 0 || 1 + normal + translate > COMMAND_BUFFER_WORDS {
            return Err(Error::MalformedHeader(header.raw()));
        }
        let words = buffer.as_words();
        let payload_end = 1 + normal;
        Ok(Self {
            command_id: header.command_id(),
            result: ResultCode::from_raw(words[1]),
            payload: words[2..payload_end].to_vec(),
            translate: words[payload_end..payload_end + translate].to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_decode_request() {
        let request = IpcRequest::from_words(&[0x000D_0082, 10, 20, 30, 40]).unwrap();
        assert_eq!(request.command_id(), 0x000D_0082);
        assert_eq!(request.normal_params(), &[10, 20]);
        assert_eq!(request.translate_params(), &[30, 40]);
    }

    #[test]
    fn test_decode_malformed() {
        // 63 normal + 63 translate words cannot fit after the header
        let raw = CommandHeader::new(0x0001, 63, 63).raw();
        let err = IpcRequest::from_words(&[raw]).unwrap_err();
        assert_eq!(err, Error::MalformedHeader(raw));
    }

    #[test]
    fn test_parser() {
        let request = IpcRequest::from_words(&[0x0001_00C1, 7, 0x2, 0x1, 0xABCD]).unwrap();
        let mut parser = request.parser();
        assert_eq!(parser.pop_u32().unwrap(), 7);
        assert_eq!(parser.pop_u64().unwrap(), 0x0000_0001_0000_0002);
        assert_eq!(parser.remaining_normal(), 0);
        assert_eq!(
            parser.pop_u32().unwrap_err(),
            Error::MissingParameter { index: 3 }
        );
        assert_eq!(parser.pop_translate().unwrap(), 0xABCD);
        assert_eq!(
            parser.pop_translate().unwrap_err(),
            Error::MissingParameter { index: 4 }
        );
    }

    #[test]
    fn test_pop_bool() {
        let request = IpcRequest::from_words(&[0x0001_0080, 0x100, 0x1]).unwrap();
        let mut parser = request.parser();
        assert!(!parser.pop_bool().unwrap());
        assert!(parser.pop_bool().unwrap());
    }

    #[test]
    fn test_encode_response() {
        let response = IpcResponse::success(0x000E).with_word(10).with_translate(0x20);
        let mut buffer = CommandBuffer::from_words(&[0xFFFF_FFFF; 8]).unwrap();
        response.encode_into(&mut buffer).unwrap();
        assert_eq!(buffer.header().raw(), 0x000E_0081);
        assert_eq!(&buffer.as_words()[..5], &[0x000E_0081, 0, 10, 0x20, 0]);
        assert!(buffer.as_words()[4..].iter().all(|&w| w == 0));
        assert_eq!(IpcResponse::decode(&buffer).unwrap(), response);
    }

    #[test]
    fn test_error_response_layout() {
        let response = IpcResponse::error(0x000D, ResultCode::NOT_IMPLEMENTED);
        let mut buffer = CommandBuffer::new();
        response.encode_into(&mut buffer).unwrap();
        assert_eq!(buffer.as_words()[0], 0x000D_0040);
        assert_eq!(buffer.as_words()[1], 0xD8C0_03F4);
        assert!(buffer.as_words()[2..].iter().all(|&w| w == 0));
    }

    #[test]
    fn test_encode_overflow() {
        let mut response = IpcResponse::success(0x0001);
        for word in 0..63 {
            response.push(word);
        }
        let mut buffer = CommandBuffer::new();
        assert_eq!(
            response.encode_into(&mut buffer).unwrap_err(),
            Error::ResponseOverflow { words: 65 }
        );
    }

    #[test]
    fn test_response_header_counts() {
        let mut response = IpcResponse::success(0x0001);
        for word in 0..62 {
            response.push(word);
        }
        assert_eq!(response.header().unwrap(), CommandHeader::new(0x0001, 63, 0));

        // A 64th normal word no longer fits in the 6-bit count
        response.push(62);
        assert_eq!(
            response.header().unwrap_err(),
            Error::ResponseOverflow { words: 65 }
        );

        let mut response = IpcResponse::success(0x0001);
        for word in 0..64 {
            response = response.with_translate(word);
        }
        assert!(response.header().is_err());
    }

    #[test]
    fn test_u64_payload() {
        let response = IpcResponse::success(0x0002).with_u64(0x1122_3344_5566_7788);
        assert_eq!(response.payload(), &vec![0x5566_7788, 0x1122_3344][..]);
    }
}
