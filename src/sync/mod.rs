pub mod device;
pub mod settings;

pub use device::{decode_device_list, DeviceRemovalType, RemovalPrompt, SyncDevice};
pub use settings::{
    settings_rows, RemovalAction, RemovalRequest, SettingsRow, SyncService, SyncSettings,
};
