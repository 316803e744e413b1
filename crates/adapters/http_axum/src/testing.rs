//! In-memory fakes shared by the handler tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use devconf_app::event_bus::InProcessEventBus;
use devconf_app::ports::{DeviceRepository, StoredDevice, Version};
use devconf_app::services::device_service::DeviceService;
use devconf_domain::device::Device;
use devconf_domain::error::{ConflictError, DevConfError};
use devconf_domain::id::DeviceId;

use crate::state::AppState;

#[derive(Default)]
pub struct InMemoryDeviceRepo {
    store: Mutex<HashMap<DeviceId, StoredDevice>>,
}

impl DeviceRepository for InMemoryDeviceRepo {
    fn find_by_id(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<StoredDevice>, DevConfError>> + Send {
        let result = self.store.lock().unwrap().get(id).cloned();
        async { Ok(result) }
    }

    fn save(
        &self,
        device: Device,
        expected: Option<Version>,
    ) -> impl Future<Output = Result<StoredDevice, DevConfError>> + Send {
        let mut store = self.store.lock().unwrap();
        let current = store.get(device.id()).map(|stored| stored.version);
        let result = if current == expected {
            let stored = StoredDevice {
                version: expected.map_or_else(Version::initial, Version::next),
                device,
            };
            store.insert(stored.device.id().clone(), stored.clone());
            Ok(stored)
        } else {
            Err(ConflictError {
                device_id: device.id().clone(),
            }
            .into())
        };
        async { result }
    }
}

pub type TestState = AppState<InMemoryDeviceRepo, Arc<InProcessEventBus>>;

pub fn test_state() -> TestState {
    let bus = Arc::new(InProcessEventBus::new(16));
    AppState::new(
        DeviceService::new(InMemoryDeviceRepo::default(), Arc::clone(&bus)),
        bus,
    )
}
