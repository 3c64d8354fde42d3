//! Command dispatcher
//!
//! This module provides the IPC dispatch mechanism. A request either reaches
//! its handler, or the guest gets the standardized failure response: the
//! request's command id in a header announcing one normal word, the failure
//! result code, and zeroes everywhere else. Nothing guest-visible ever
//! propagates out of a dispatch.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, Ordering};

use hle_api::config::DispatchConfig;
use hle_api::error::{self, Result};
use hle_api::ipc::{CommandBuffer, CommandHeader, CommandId, IpcRequest, IpcResponse, ResultCode};
use spin::Mutex;

use super::descriptor::Handler;
use super::traits::{DiagnosticSink, ServiceLookup};
use crate::diagnostics::{Diagnostic, DiagnosticKind, LogSink};
use crate::service::Service;

/// How a dispatch ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Handler ran and its response was delivered
    Handled,
    /// Handler ran and returned an error result code
    HandlerFailed(ResultCode),
    /// Identifier registered without a handler
    Unimplemented,
    /// Identifier not in the service's table
    Unknown,
    /// Header parameter counts overflow the command buffer
    Malformed,
    /// Handler response did not fit in the command buffer
    ResponseOverflow,
}

impl DispatchOutcome {
    /// Returns true if the handler's response reached the guest
    pub fn is_delivered(&self) -> bool {
        matches!(self, DispatchOutcome::Handled | DispatchOutcome::HandlerFailed(_))
    }
}

/// Snapshot of the dispatch statistics
///
/// Counters are read one at a time, so a snapshot taken during concurrent
/// dispatch may be off by the requests in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Total number of requests
    pub total_requests: u64,
    /// Requests handled successfully
    pub handled: u64,
    /// Requests whose handler returned an error result
    pub handler_failures: u64,
    /// Requests for commands without a handler
    pub unimplemented: u64,
    /// Requests for unregistered identifiers
    pub unknown: u64,
    /// Requests with a malformed header
    pub malformed: u64,
    /// Responses that did not fit in the command buffer
    pub response_overflows: u64,
    /// Failures for pairs that did not fit in the failure table
    pub untracked_failures: u64,
    /// Failed requests by service, then identifier
    pub failures_by_command: BTreeMap<String, BTreeMap<CommandId, u64>>,
}

impl DispatchStats {
    /// Requests that did not reach a working handler
    pub fn failed_requests(&self) -> u64 {
        self.total_requests.saturating_sub(self.handled)
    }

    /// Tracked failures for one (service, identifier) pair
    pub fn failures_for(&self, service: &str, id: CommandId) -> u64 {
        self.failures_by_command
            .get(service)
            .and_then(|commands| commands.get(&id))
            .copied()
            .unwrap_or(0)
    }

    /// Number of (service, identifier) pairs in the failure table
    pub fn tracked_commands(&self) -> usize {
        self.failures_by_command.values().map(BTreeMap::len).sum()
    }
}

#[derive(Debug, Default)]
struct Counters {
    total_requests: AtomicU64,
    handled: AtomicU64,
    handler_failures: AtomicU64,
    unimplemented: AtomicU64,
    unknown: AtomicU64,
    malformed: AtomicU64,
    response_overflows: AtomicU64,
    untracked_failures: AtomicU64,
}

impl Counters {
    fn all(&self) -> [&AtomicU64; 8] {
        [
            &self.total_requests,
            &self.handled,
            &self.handler_failures,
            &self.unimplemented,
            &self.unknown,
            &self.malformed,
            &self.response_overflows,
            &self.untracked_failures,
        ]
    }

    fn outcome(&self, outcome: DispatchOutcome) -> &AtomicU64 {
        match outcome {
            DispatchOutcome::Handled => &self.handled,
            DispatchOutcome::HandlerFailed(_) => &self.handler_failures,
            DispatchOutcome::Unimplemented => &self.unimplemented,
            DispatchOutcome::Unknown => &self.unknown,
            DispatchOutcome::Malformed => &self.malformed,
            DispatchOutcome::ResponseOverflow => &self.response_overflows,
        }
    }
}

/// Per-command failure counts, bounded by the configured capacity
#[derive(Debug)]
struct FailureTable {
    entries: BTreeMap<String, BTreeMap<CommandId, u64>>,
    len: usize,
    capacity: usize,
}

impl FailureTable {
    fn new(capacity: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            len: 0,
            capacity,
        }
    }

    /// Count one failure; false if the pair is new and the table is full
    fn record(&mut self, service: &str, id: CommandId) -> bool {
        if let Some(count) = self.entries.get_mut(service).and_then(|c| c.get_mut(&id)) {
            *count += 1;
            return true;
        }
        if self.len >= self.capacity {
            return false;
        }

        match self.entries.get_mut(service) {
            Some(commands) => {
                commands.insert(id, 1);
            }
            None => {
                let mut commands = BTreeMap::new();
                commands.insert(id, 1);
                self.entries.insert(service.to_string(), commands);
            }
        }
        self.len += 1;
        true
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.len = 0;
    }
}

/// IPC command dispatcher
pub struct Dispatcher {
    config: DispatchConfig,
    sink: Box<dyn DiagnosticSink>,
    counters: Counters,
    /// Only taken for failed requests, never held while a handler runs
    failures: Mutex<FailureTable>,
}

impl Dispatcher {
    /// Create a new dispatcher
    pub fn new(config: DispatchConfig, sink: Box<dyn DiagnosticSink>) -> Self {
        let failures = Mutex::new(FailureTable::new(config.failure_capacity));
        Self {
            config,
            sink,
            counters: Counters::default(),
            failures,
        }
    }

    /// Dispatcher configuration
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Dispatch a decoded request to `service`
    ///
    /// A present handler's response is returned exactly as produced. Unknown
    /// and unimplemented commands yield the standardized failure response.
    pub fn dispatch(&self, service: &Service, request: &IpcRequest) -> IpcResponse {
        let (response, outcome) = self.resolve(service, request);
        self.record(service.name(), request.command_id(), outcome);
        response
    }

    /// Dispatch the request held in `buffer`, writing the response in place
    pub fn dispatch_raw(&self, service: &Service, buffer: &mut CommandBuffer) -> DispatchOutcome {
        let request = match IpcRequest::decode(buffer) {
            Ok(request) => request,
            Err(_) => {
                let header = buffer.header();
                self.report(service.name(), header.raw(), None, DiagnosticKind::Malformed, &[]);
                self.write_failure(header, buffer);
                self.record(service.name(), header.raw(), DispatchOutcome::Malformed);
                return DispatchOutcome::Malformed;
            }
        };

        let (response, mut outcome) = self.resolve(service, &request);
        if response.encode_into(buffer).is_err() {
            let name = service.lookup(request.command_id()).map(|d| d.name());
            self.report(
                service.name(),
                request.command_id(),
                name,
                DiagnosticKind::ResponseOverflow,
                request.params(),
            );
            self.write_failure(request.header(), buffer);
            outcome = DispatchOutcome::ResponseOverflow;
        }

        self.record(service.name(), request.command_id(), outcome);
        outcome
    }

    /// Resolve `name` through `services`, then dispatch the buffer to it
    ///
    /// Only the service lookup can fail; it is a host-side error since the
    /// kernel only opens sessions to registered services.
    pub fn dispatch_to<L>(
        &self,
        services: &L,
        name: &str,
        buffer: &mut CommandBuffer,
    ) -> Result<DispatchOutcome>
    where
        L: ServiceLookup + ?Sized,
    {
        let service = services
            .service(name)
            .ok_or_else(|| error::service_not_found(name))?;
        Ok(self.dispatch_raw(service, buffer))
    }

    /// Snapshot of the dispatch statistics
    pub fn stats(&self) -> DispatchStats {
        let load = |counter: &AtomicU64| counter.load(Ordering::Relaxed);
        let counters = &self.counters;
        DispatchStats {
            total_requests: load(&counters.total_requests),
            handled: load(&counters.handled),
            handler_failures: load(&counters.handler_failures),
            unimplemented: load(&counters.unimplemented),
            unknown: load(&counters.unknown),
            malformed: load(&counters.malformed),
            response_overflows: load(&counters.response_overflows),
            untracked_failures: load(&counters.untracked_failures),
            failures_by_command: self.failures.lock().entries.clone(),
        }
    }

    /// Reset the dispatch statistics
    pub fn reset_stats(&self) {
        let mut failures = self.failures.lock();
        failures.clear();
        for counter in self.counters.all() {
            counter.store(0, Ordering::Relaxed);
        }
    }

    fn resolve(&self, service: &Service, request: &IpcRequest) -> (IpcResponse, DispatchOutcome) {
        let id = request.command_id();
        let command_id = request.header().command_id();

        let descriptor = match service.lookup(id) {
            Some(descriptor) => descriptor,
            None => {
                self.report(service.name(), id, None, DiagnosticKind::Unknown, request.params());
                return (self.failure_response(command_id), DispatchOutcome::Unknown);
            }
        };

        let handler = match descriptor.handler() {
            Handler::Implemented(handler) => handler,
            Handler::Unimplemented => {
                self.report(
                    service.name(),
                    id,
                    Some(descriptor.name()),
                    DiagnosticKind::Unimplemented,
                    request.params(),
                );
                return (self.failure_response(command_id), DispatchOutcome::Unimplemented);
            }
        };

        match handler.handle(request) {
            Ok(response) => {
                if self.config.trace_handled {
                    hle_trace!(
                        "{}: {} -> {}",
                        service.name(),
                        descriptor.name(),
                        response.result()
                    );
                }
                (response, DispatchOutcome::Handled)
            }
            Err(result) => {
                self.report(
                    service.name(),
                    id,
                    Some(descriptor.name()),
                    DiagnosticKind::HandlerFailed(result),
                    request.params(),
                );
                (IpcResponse::error(command_id, result), DispatchOutcome::HandlerFailed(result))
            }
        }
    }

    fn failure_response(&self, command_id: u16) -> IpcResponse {
        IpcResponse::error(command_id, self.config.failure_result)
    }

    fn write_failure(&self, header: CommandHeader, buffer: &mut CommandBuffer) {
        buffer.clear();
        let words = buffer.as_words_mut();
        words[0] = CommandHeader::new(header.command_id(), 1, 0).raw();
        words[1] = self.config.failure_result.raw();
    }

    fn report(
        &self,
        service: &str,
        command: CommandId,
        name: Option<&'static str>,
        kind: DiagnosticKind,
        params: &[u32],
    ) {
        if !self.config.report.contains(kind.report_flag()) {
            return;
        }
        let params = if self.config.capture_params {
            params.to_vec()
        } else {
            Vec::new()
        };
        self.sink.record(&Diagnostic {
            service: service.to_string(),
            command,
            name,
            kind,
            params,
        });
    }

    fn record(&self, service: &str, id: CommandId, outcome: DispatchOutcome) {
        self.counters.total_requests.fetch_add(1, Ordering::Relaxed);
        self.counters.outcome(outcome).fetch_add(1, Ordering::Relaxed);
        if outcome == DispatchOutcome::Handled {
            return;
        }
        if !self.failures.lock().record(service, id) {
            self.counters.untracked_failures.fetch_add(1, Ordering::Relaxed);
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DispatchConfig::default(), Box::new(LogSink))
    }
}

impl core::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::descriptor::CommandDescriptor;
    use crate::core::traits::HandlerResult;
    use crate::diagnostics::NullSink;
    use alloc::vec;

    fn double(request: &IpcRequest) -> HandlerResult {
        let value = request
            .parser()
            .pop_u32()
            .map_err(|_| ResultCode::NOT_IMPLEMENTED)?;
        Ok(IpcResponse::success(request.header().command_id()).with_word(value * 2))
    }

    fn test_service() -> Service {
        Service::new(
            "test::SRV",
            vec![
                CommandDescriptor::unimplemented(0x000D_0082, "SendProbeRequest"),
                CommandDescriptor::new(0x000E_0040, double, "Double"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_dispatcher() {
        let dispatcher = Dispatcher::new(DispatchConfig::default(), Box::new(NullSink));
        let service = test_service();

        let mut buffer = CommandBuffer::from_words(&[0x000E_0040, 5]).unwrap();
        assert_eq!(dispatcher.dispatch_raw(&service, &mut buffer), DispatchOutcome::Handled);
        assert_eq!(&buffer.as_words()[..3], &[0x000E_0080, 0, 10]);

        let mut buffer = CommandBuffer::from_words(&[0x000D_0082, 1, 2, 3, 4]).unwrap();
        assert_eq!(dispatcher.dispatch_raw(&service, &mut buffer), DispatchOutcome::Unimplemented);
        assert_eq!(&buffer.as_words()[..2], &[0x000D_0040, 0xD8C0_03F4]);
        assert!(buffer.as_words()[2..].iter().all(|&w| w == 0));

        let stats = dispatcher.stats();
        assert_eq!(stats.total_requests, 2);
        assert_eq!(stats.handled, 1);
        assert_eq!(stats.unimplemented, 1);
        assert_eq!(stats.failures_for("test::SRV", 0x000D_0082), 1);
        assert_eq!(stats.tracked_commands(), 1);
    }

    #[test]
    fn test_malformed_header() {
        let dispatcher = Dispatcher::new(DispatchConfig::default(), Box::new(NullSink));
        let service = test_service();

        let raw = CommandHeader::new(0x000E, 63, 63).raw();
        let mut buffer = CommandBuffer::from_words(&[raw, 5]).unwrap();
        assert_eq!(dispatcher.dispatch_raw(&service, &mut buffer), DispatchOutcome::Malformed);
        assert_eq!(&buffer.as_words()[..3], &[0x000E_0040, 0xD8C0_03F4, 0]);
        assert_eq!(dispatcher.stats().malformed, 1);
    }

    #[test]
    fn test_handler_failure() {
        let dispatcher = Dispatcher::new(DispatchConfig::default(), Box::new(NullSink));
        // Header announces no parameter word, so the handler cannot pop one
        let service = Service::new(
            "test::SRV",
            vec![CommandDescriptor::new(0x000E_0000, double, "Double")],
        )
        .unwrap();

        let mut buffer = CommandBuffer::from_words(&[0x000E_0000]).unwrap();
        assert_eq!(
            dispatcher.dispatch_raw(&service, &mut buffer),
            DispatchOutcome::HandlerFailed(ResultCode::NOT_IMPLEMENTED)
        );
        assert_eq!(&buffer.as_words()[..2], &[0x000E_0040, 0xD8C0_03F4]);
        assert_eq!(dispatcher.stats().handler_failures, 1);
    }

    #[test]
    fn test_reset_stats() {
        let dispatcher = Dispatcher::default();
        let service = test_service();
        let request = IpcRequest::from_words(&[0x0001_0000]).unwrap();
        dispatcher.dispatch(&service, &request);
        assert_eq!(dispatcher.stats().unknown, 1);
        dispatcher.reset_stats();
        assert_eq!(dispatcher.stats(), DispatchStats::default());
    }

    #[test]
    fn test_failure_table_capacity() {
        let mut table = FailureTable::new(2);
        assert!(table.record("test::SRV", 0x0001_0000));
        assert!(table.record("test::SRV", 0x0002_0000));
        assert!(!table.record("test::SRV", 0x0003_0000));
        assert!(!table.record("test::OTH", 0x0001_0000));

        // Pairs already tracked keep counting once the table is full
        assert!(table.record("test::SRV", 0x0001_0000));
        assert_eq!(table.len, 2);
        assert_eq!(table.entries["test::SRV"][&0x0001_0000], 2);
        assert!(!table.entries.contains_key("test::OTH"));
    }

    #[test]
    fn test_untracked_failures() {
        let config = DispatchConfig::default().with_failure_capacity(3);
        let dispatcher = Dispatcher::new(config, Box::new(NullSink));
        let service = test_service();

        for id in 0..10u32 {
            let request = IpcRequest::from_words(&[(id + 0x100) << 16]).unwrap();
            dispatcher.dispatch(&service, &request);
        }

        let stats = dispatcher.stats();
        assert_eq!(stats.unknown, 10);
        assert_eq!(stats.tracked_commands(), 3);
        assert_eq!(stats.untracked_failures, 7);
        assert_eq!(stats.failed_requests(), 10);
    }
}
