//! Per-domain device registry.
//!
//! Each domain has its own slice of handles, kept in registration order.
//! Lookups are linear scans: a node hosts tens of devices, not thousands.
//! Registration takes the write lock; lookups clone the handle out under
//! the read lock so no lock is held while a device runs a command.

use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use nodeweb_domain::domain::Domain;
use nodeweb_domain::error::ValidationError;

use crate::handle::DeviceHandle;

/// Domain-keyed table of device handles.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    slices: RwLock<[Vec<DeviceHandle>; Domain::COUNT]>,
}

impl DeviceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a device to its domain's slice.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::EmptyId`] if the device id is empty.
    /// - [`ValidationError::DuplicateId`] if the domain already holds that id.
    pub fn register(&self, handle: DeviceHandle) -> Result<(), ValidationError> {
        if handle.id().is_empty() {
            return Err(ValidationError::EmptyId);
        }

        let domain = handle.domain();
        let mut slices = self
            .slices
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let slice = &mut slices[domain.index()];
        if slice.iter().any(|existing| existing.id() == handle.id()) {
            return Err(ValidationError::DuplicateId {
                domain,
                id: handle.id().to_string(),
            });
        }

        tracing::info!(%domain, id = handle.id(), "registered device");
        slice.push(handle);
        Ok(())
    }

    /// Find the device registered as `id` in `domain`.
    #[must_use]
    pub fn find(&self, domain: Domain, id: &str) -> Option<DeviceHandle> {
        self.read()[domain.index()]
            .iter()
            .find(|handle| handle.id() == id)
            .cloned()
    }

    /// Devices of one domain, in registration order.
    #[must_use]
    pub fn list(&self, domain: Domain) -> Vec<DeviceHandle> {
        self.read()[domain.index()].clone()
    }

    /// Every device: domains in [`Domain::ALL`] order, then registration order.
    #[must_use]
    pub fn all(&self) -> Vec<DeviceHandle> {
        self.read().iter().flatten().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> RwLockReadGuard<'_, [Vec<DeviceHandle>; Domain::COUNT]> {
        self.slices.read().unwrap_or_else(PoisonError::into_inner)
    }
}
