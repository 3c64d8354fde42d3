//! Dispatch configuration

use crate::ipc::result::ResultCode;

bitflags::bitflags! {
    /// Which dispatch outcomes are reported to the diagnostic sink
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ReportFlags: u32 {
        /// Command declared without a handler
        const UNIMPLEMENTED = 0b00000001;
        /// Command identifier not in the service's table
        const UNKNOWN = 0b00000010;
        /// Header parameter counts overflow the command buffer
        const MALFORMED = 0b00000100;
        /// Handler returned an error result code
        const HANDLER_FAILED = 0b00001000;
        /// Handler response did not fit in the command buffer
        const RESPONSE_OVERFLOW = 0b00010000;
    }
}

impl Default for ReportFlags {
    fn default() -> Self {
        ReportFlags::all()
    }
}

/// Default number of (service, identifier) pairs tracked in the failure table
pub const DEFAULT_FAILURE_CAPACITY: usize = 256;

/// Dispatcher configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Result code written for unknown and unimplemented commands
    pub failure_result: ResultCode,
    /// Outcomes forwarded to the diagnostic sink
    pub report: ReportFlags,
    /// Copy the request's parameter words into each diagnostic
    pub capture_params: bool,
    /// Trace every successfully handled command
    pub trace_handled: bool,
    /// Distinct (service, identifier) pairs kept in the per-command failure
    /// table; failures past this are only counted
    pub failure_capacity: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            failure_result: ResultCode::NOT_IMPLEMENTED,
            report: ReportFlags::default(),
            capture_params: true,
            trace_handled: false,
            failure_capacity: DEFAULT_FAILURE_CAPACITY,
        }
    }
}

impl DispatchConfig {
    /// Set the failure result code
    pub fn with_failure_result(mut self, result: ResultCode) -> Self {
        self.failure_result = result;
        self
    }

    /// Set the reported outcomes
    pub fn with_report(mut self, report: ReportFlags) -> Self {
        self.report = report;
        self
    }

    /// Set whether parameter words are captured
    pub fn with_capture_params(mut self, capture: bool) -> Self {
        self.capture_params = capture;
        self
    }

    /// Set whether handled commands are traced
    pub fn with_trace_handled(mut self, trace: bool) -> Self {
        self.trace_handled = trace;
        self
    }

    /// Set the failure table capacity
    pub fn with_failure_capacity(mut self, capacity: usize) -> Self {
        self.failure_capacity = capacity;
        self
    }
}
