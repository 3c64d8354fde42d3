//! Service tests

use std::sync::{Arc, Mutex};

use hle_api::config::DispatchConfig;
use hle_api::ipc::{CommandBuffer, CommandHeader, IpcRequest, IpcResponse, ResultCode};
use hle_api::Error;
use hle_ipc::{
    CommandDescriptor, Diagnostic, DiagnosticKind, DiagnosticSink, DispatchOutcome, Dispatcher,
    HandlerResult, Service,
};
use hle_services::{install_nwm_services, ServiceManager};

#[derive(Clone, Default)]
struct RecordingSink {
    records: Arc<Mutex<Vec<Diagnostic>>>,
}

impl DiagnosticSink for RecordingSink {
    fn record(&self, diagnostic: &Diagnostic) {
        self.records.lock().unwrap().push(diagnostic.clone());
    }
}

fn nwm_manager() -> ServiceManager {
    let mut manager = ServiceManager::new();
    install_nwm_services(&mut manager).unwrap();
    manager
}

#[test]
fn test_every_declared_command_fails_by_name() {
    let manager = nwm_manager();
    let sink = RecordingSink::default();
    let dispatcher = Dispatcher::new(DispatchConfig::default(), Box::new(sink.clone()));

    let mut expected = Vec::new();
    for service in manager.iter() {
        for descriptor in service.table() {
            let mut buffer = CommandBuffer::from_words(&[descriptor.id()]).unwrap();
            let outcome = dispatcher
                .dispatch_to(&manager, service.name(), &mut buffer)
                .unwrap();

            assert_eq!(outcome, DispatchOutcome::Unimplemented);
            let command_id = CommandHeader::from_raw(descriptor.id()).command_id();
            assert_eq!(buffer.word(0), Some(CommandHeader::new(command_id, 1, 0).raw()));
            assert_eq!(buffer.word(1), Some(ResultCode::NOT_IMPLEMENTED.raw()));
            assert!(buffer.as_words()[2..].iter().all(|&w| w == 0));
            expected.push((service.name().to_string(), descriptor.name()));
        }
    }

    let records = sink.records.lock().unwrap();
    let named: Vec<_> = records
        .iter()
        .map(|d| (d.service.clone(), d.name.unwrap()))
        .collect();
    assert_eq!(named, expected);
    assert_eq!(named.len(), 5);
    assert!(records.iter().all(|d| d.kind == DiagnosticKind::Unimplemented));
}

#[test]
fn test_send_probe_request_scenario() {
    let manager = nwm_manager();
    let sink = RecordingSink::default();
    let dispatcher = Dispatcher::new(DispatchConfig::default(), Box::new(sink.clone()));

    let mut buffer = CommandBuffer::from_words(&[0x000D_0082, 0xAA, 0xBB, 0xCC, 0xDD]).unwrap();
    let outcome = dispatcher.dispatch_to(&manager, "nwm::CEC", &mut buffer).unwrap();
    assert_eq!(outcome, DispatchOutcome::Unimplemented);
    assert_eq!(&buffer.as_words()[..3], &[0x000D_0040, 0xD8C0_03F4, 0]);

    let records = sink.records.lock().unwrap();
    assert_eq!(
        records[0].to_string(),
        "unknown / unimplemented function 'SendProbeRequest': \
         port='nwm::CEC' cmd_buf={[0]=0xd0082, [1]=0xaa, [2]=0xbb, [3]=0xcc, [4]=0xdd}"
    );
}

#[test]
fn test_unknown_service() {
    let manager = nwm_manager();
    let dispatcher = Dispatcher::default();
    let mut buffer = CommandBuffer::from_words(&[0x0001_0000]).unwrap();

    let err = dispatcher
        .dispatch_to(&manager, "nwm::SOC", &mut buffer)
        .unwrap_err();
    assert_eq!(err, Error::ServiceNotFound("nwm::SOC".into()));
    // Buffer untouched when no service was resolved
    assert_eq!(buffer.word(0), Some(0x0001_0000));
    assert_eq!(dispatcher.stats().total_requests, 0);
}

#[test]
fn test_registered_handler_through_manager() {
    let mut manager = nwm_manager();
    manager
        .register(
            Service::new(
                "test:DBL",
                vec![CommandDescriptor::new(
                    0x000E_0040,
                    |request: &IpcRequest| -> HandlerResult {
                        let value = request
                            .parser()
                            .pop_u32()
                            .map_err(|_| ResultCode::NOT_IMPLEMENTED)?;
                        Ok(IpcResponse::success(0x000E).with_word(value * 2))
                    },
                    "Double",
                )],
            )
            .unwrap(),
        )
        .unwrap();

    let dispatcher = Dispatcher::default();
    let mut buffer = CommandBuffer::from_words(&[0x000E_0040, 5]).unwrap();
    let outcome = dispatcher.dispatch_to(&manager, "test:DBL", &mut buffer).unwrap();
    assert_eq!(outcome, DispatchOutcome::Handled);
    assert_eq!(&buffer.as_words()[..3], &[0x000E_0080, 0, 10]);
}

#[test]
fn test_shared_service_handle() {
    let manager = nwm_manager();
    let service = manager.get("nwm::INF").unwrap();
    assert_eq!(Arc::strong_count(&service), 2);

    let dispatcher = Dispatcher::default();
    let mut buffer = CommandBuffer::from_words(&[0x0008_0302, 1, 2, 3]).unwrap();
    assert_eq!(
        service.handle_sync_request(&dispatcher, &mut buffer),
        DispatchOutcome::Unimplemented
    );
    assert_eq!(buffer.word(0), Some(0x0008_0040));
}

#[test]
fn test_invalid_service_name() {
    assert_eq!(
        Service::new("nwm::CEC1", vec![]).unwrap_err(),
        Error::InvalidServiceName("nwm::CEC1".into())
    );
}
