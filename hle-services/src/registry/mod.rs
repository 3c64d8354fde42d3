//! Service registry
//!
//! This module provides the service manager: the explicit registry that maps
//! service names to services. There is no global instance; the embedding
//! emulator owns one and hands it to the dispatcher.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;

use hle_api::error::{Error, Result};
use hle_ipc::{Service, ServiceLookup};

use crate::manifest::ServiceManifest;

/// Service manager
#[derive(Debug, Default)]
pub struct ServiceManager {
    /// Registered services, ordered by name
    services: BTreeMap<String, Arc<Service>>,
}

impl ServiceManager {
    /// Create an empty service manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service
    ///
    /// Fails if a service with the same name is already registered.
    pub fn register(&mut self, service: Service) -> Result<Arc<Service>> {
        if self.services.contains_key(service.name()) {
            return Err(Error::DuplicateService(service.name().to_string()));
        }

        let service = Arc::new(service);
        self.services
            .insert(service.name().to_string(), Arc::clone(&service));
        hle_info!(
            "service '{}' registered ({} commands)",
            service.name(),
            service.table().len()
        );
        Ok(service)
    }

    /// Get a service by name
    pub fn get(&self, name: &str) -> Option<Arc<Service>> {
        self.services.get(name).cloned()
    }

    /// Check whether `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.services.contains_key(name)
    }

    /// Number of registered services
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Returns true if no service is registered
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Registered service names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.services.keys().map(String::as_str).collect()
    }

    /// Iterate over the registered services in name order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Service>> {
        self.services.values()
    }

    /// Registration surface of every service, in name order
    pub fn manifest(&self) -> Vec<ServiceManifest> {
        self.services
            .values()
            .map(|service| ServiceManifest::from_service(service))
            .collect()
    }
}

impl ServiceLookup for ServiceManager {
    fn service(&self, name: &str) -> Option<&Service> {
        self.services.get(name).map(|service| service.as_ref())
    }
}
