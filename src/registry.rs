// Static service id -> selector mapping, built once at startup and shared read-only.

use std::collections::HashMap;

use crate::error::StatusError;
use crate::models::ServiceDescriptor;

#[derive(Debug, Clone, Default)]
pub struct ServiceRegistry {
    services: Vec<ServiceDescriptor>,
    by_id: HashMap<String, usize>,
}

impl ServiceRegistry {
    /// Builds the registry. Later duplicates of an id are rejected.
    pub fn new(services: Vec<ServiceDescriptor>) -> anyhow::Result<Self> {
        let mut by_id = HashMap::with_capacity(services.len());
        for (i, s) in services.iter().enumerate() {
            anyhow::ensure!(!s.id.is_empty(), "service id must be non-empty");
            anyhow::ensure!(
                !s.selector.is_empty(),
                "service {} has an empty selector",
                s.id
            );
            anyhow::ensure!(
                by_id.insert(s.id.clone(), i).is_none(),
                "duplicate service id: {}",
                s.id
            );
        }
        Ok(Self { services, by_id })
    }

    pub fn resolve(&self, id: &str) -> Result<&ServiceDescriptor, StatusError> {
        self.by_id
            .get(id)
            .map(|&i| &self.services[i])
            .ok_or_else(|| StatusError::UnknownService(id.to_string()))
    }

    /// Descriptors in configuration order.
    pub fn services(&self) -> &[ServiceDescriptor] {
        &self.services
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
