//! Device group settings, minus the table view

use super::device::{decode_device_list, DeviceRemovalType, RemovalPrompt, SyncDevice};
use log::{error, info, warn};

/// Header above the device rows
pub const DEVICES_HEADER: &str = "DEVICES";

/// Label of the button row below the devices
pub const ADD_ANOTHER_DEVICE: &str = "Add Another Device";

/// The sync service the settings screen talks to
pub trait SyncService {
    /// Code words of the sync chain this app belongs to
    fn sync_code(&self) -> String;
    fn join_sync_group(&self, code_words: &str);
    fn set_sync_enabled(&self, enabled: bool);
    fn leave_sync_group(&self);
    /// JSON array of devices, `None` when the service has nothing to give
    fn device_list_json(&self) -> Option<String>;
}

/// A row of the settings list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsRow {
    /// A device, by its display name
    Device(String),
    AddAnotherDevice,
}

impl SettingsRow {
    /// Text shown on the row
    pub fn label(&self) -> &str {
        match self {
            SettingsRow::Device(name) => name,
            SettingsRow::AddAnotherDevice => ADD_ANOTHER_DEVICE,
        }
    }
}

/// Device rows followed by the button row. Unnamed devices are listed
/// without a label.
pub fn settings_rows(devices: &[SyncDevice]) -> Vec<SettingsRow> {
    devices
        .iter()
        .map(|d| SettingsRow::Device(d.display_name().unwrap_or_default()))
        .chain(std::iter::once(SettingsRow::AddAnotherDevice))
        .collect()
}

/// Outcome of tapping "remove" on a device
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalRequest {
    /// No device at that row
    None,
    /// Removal needs network access
    NoConnection,
    Confirm {
        kind: DeviceRemovalType,
        prompt: RemovalPrompt,
    },
}

/// What a confirmed removal did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalAction {
    /// This app left the sync group; the caller should navigate back
    LeftSyncGroup,
    /// Another device was asked to be removed
    RemoveDevice(String),
}

pub struct SyncSettings<S: SyncService> {
    service: S,
    devices: Vec<SyncDevice>,
    /// Set once pairing finished; the user has to tap Done to go back
    pub disable_back_button: bool,
}

impl<S: SyncService> SyncSettings<S> {
    /// Join the group with this app's sync code, enable sync and load devices
    pub fn open(service: S) -> Self {
        let code_words = service.sync_code();
        service.join_sync_group(&code_words);
        service.set_sync_enabled(true);

        let mut settings = Self {
            service,
            devices: Vec::new(),
            disable_back_button: false,
        };
        settings.refresh();
        settings
    }

    /// Reload the device list from the service. A list that cannot be
    /// fetched or decoded leaves the screen with no devices.
    pub fn refresh(&mut self) {
        let json = self.service.device_list_json();
        self.devices = decode_device_list(json.as_deref());
        info!("Sync group has {} device(s)", self.devices.len());
    }

    pub fn devices(&self) -> &[SyncDevice] {
        &self.devices
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn rows(&self) -> Vec<SettingsRow> {
        if self.devices.is_empty() {
            error!("No sync devices to configure.");
        }
        settings_rows(&self.devices)
    }

    pub fn request_removal(&self, index: usize, has_connectivity: bool) -> RemovalRequest {
        let Some(device) = self.devices.get(index) else {
            return RemovalRequest::None;
        };
        if !has_connectivity {
            return RemovalRequest::NoConnection;
        }

        let kind = DeviceRemovalType::classify(&self.devices, device);
        RemovalRequest::Confirm {
            kind,
            prompt: RemovalPrompt::for_device(kind, device),
        }
    }

    /// Carry out a removal the user confirmed
    pub fn confirm_removal(&mut self, kind: DeviceRemovalType, device: &SyncDevice) -> RemovalAction {
        if kind.leaves_group() {
            self.leave_this_device()
        } else {
            // The service has no call for dropping a single device yet
            warn!(
                "Removing device {} from the sync chain is not supported by the sync service",
                device.id
            );
            RemovalAction::RemoveDevice(device.id.clone())
        }
    }

    /// The plain "remove this device" action
    pub fn leave_this_device(&mut self) -> RemovalAction {
        info!("Leaving sync group");
        self.service.leave_sync_group();
        self.devices.clear();
        RemovalAction::LeftSyncGroup
    }
}
