//! Dispatch diagnostics
//!
//! Every request the dispatcher cannot service produces a [`Diagnostic`]
//! naming the service, the identifier and, when the table knows it, the
//! command's display name. Diagnostics are for host-side developers only.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hle_api::config::ReportFlags;
use hle_api::ipc::{CommandId, ResultCode};

use crate::core::traits::DiagnosticSink;

/// Why a request produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Identifier registered without a handler
    Unimplemented,
    /// Identifier not in the service's table
    Unknown,
    /// Header announces more parameter words than the buffer holds
    Malformed,
    /// Handler returned an error result code
    HandlerFailed(ResultCode),
    /// Handler response did not fit in the command buffer
    ResponseOverflow,
}

impl DiagnosticKind {
    /// Report flag that gates this kind
    pub fn report_flag(self) -> ReportFlags {
        match self {
            DiagnosticKind::Unimplemented => ReportFlags::UNIMPLEMENTED,
            DiagnosticKind::Unknown => ReportFlags::UNKNOWN,
            DiagnosticKind::Malformed => ReportFlags::MALFORMED,
            DiagnosticKind::HandlerFailed(_) => ReportFlags::HANDLER_FAILED,
            DiagnosticKind::ResponseOverflow => ReportFlags::RESPONSE_OVERFLOW,
        }
    }
}

/// Diagnostic record for one failed dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Service the request was addressed to
    pub service: String,
    /// Raw command identifier from the request header
    pub command: CommandId,
    /// Display name of the descriptor, if the identifier is registered
    pub name: Option<&'static str>,
    /// What went wrong
    pub kind: DiagnosticKind,
    /// Parameter words following the header; empty when capture is off
    pub params: Vec<u32>,
}

impl Diagnostic {
    fn write_function(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name {
            Some(name) => write!(f, "function '{}'", name),
            None => write!(f, "function '{:#010x}'", self.command),
        }
    }

    fn write_cmd_buf(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "port='{}' cmd_buf={{[0]={:#x}", self.service, self.command)?;
        for (i, word) in self.params.iter().enumerate() {
            write!(f, ", [{}]={:#x}", i + 1, word)?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DiagnosticKind::Unimplemented | DiagnosticKind::Unknown => {
                write!(f, "unknown / unimplemented ")?;
            }
            DiagnosticKind::Malformed => write!(f, "malformed header for ")?,
            DiagnosticKind::HandlerFailed(result) => {
                write!(f, "handler failed with {} in ", result)?;
            }
            DiagnosticKind::ResponseOverflow => write!(f, "response overflow in ")?,
        }
        self.write_function(f)?;
        write!(f, ": ")?;
        self.write_cmd_buf(f)
    }
}

/// Sink that writes diagnostics through the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn record(&self, diagnostic: &Diagnostic) {
        match diagnostic.kind {
            DiagnosticKind::HandlerFailed(_) => {
                hle_warn!("{}", diagnostic);
            }
            _ => {
                hle_error!("{}", diagnostic);
            }
        }
    }
}

/// Sink that drops every diagnostic
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn record(&self, _diagnostic: &Diagnostic) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn test_unimplemented_display() {
        let diagnostic = Diagnostic {
            service: "nwm::CEC".to_string(),
            command: 0x000D_0082,
            name: Some("SendProbeRequest"),
            kind: DiagnosticKind::Unimplemented,
            params: vec![1, 2, 0x20, 0x30],
        };

        assert_eq!(
            format!("{}", diagnostic),
            "unknown / unimplemented function 'SendProbeRequest': \
             port='nwm::CEC' cmd_buf={[0]=0xd0082, [1]=0x1, [2]=0x2, [3]=0x20, [4]=0x30}"
        );
    }

    #[test]
    fn test_unknown_display() {
        let diagnostic = Diagnostic {
            service: "nwm::CEC".to_string(),
            command: 0x0001_0000,
            name: None,
            kind: DiagnosticKind::Unknown,
            params: vec![],
        };

        assert_eq!(
            format!("{}", diagnostic),
            "unknown / unimplemented function '0x00010000': port='nwm::CEC' cmd_buf={[0]=0x10000}"
        );
    }

    #[test]
    fn test_report_flags() {
        assert_eq!(DiagnosticKind::Unknown.report_flag(), ReportFlags::UNKNOWN);
        assert_eq!(
            DiagnosticKind::HandlerFailed(ResultCode::NOT_IMPLEMENTED).report_flag(),
            ReportFlags::HANDLER_FAILED
        );
    }
}
