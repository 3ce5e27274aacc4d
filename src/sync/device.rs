use serde::{Deserialize, Serialize};
use std::fmt;

/// Suffix appended to the name of the device the app is running on
pub const THIS_DEVICE_SUFFIX: &str = "This Device";

/// Name used in prompts when a device has none
pub const DEFAULT_DEVICE_NAME: &str = "Device";

/// One entry of the sync service's device list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SyncDevice {
    pub chrome_version: String,
    pub has_sharing_info: bool,
    pub id: String,
    pub is_current_device: bool,
    /// Seconds since the Unix epoch
    pub last_updated_timestamp: f64,
    pub name: Option<String>,
    pub os: String,
    pub send_tab_to_self_receiving_enabled: bool,
    #[serde(rename = "type")]
    pub device_type: String,
}

impl SyncDevice {
    /// Name as listed in the device group, `None` for unnamed devices
    pub fn display_name(&self) -> Option<String> {
        let name = self.name.as_deref()?;
        if self.is_current_device {
            Some(format!("{} ({})", name, THIS_DEVICE_SUFFIX))
        } else {
            Some(name.to_string())
        }
    }

    fn prompt_name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_DEVICE_NAME)
    }
}

/// Decode the device list JSON handed out by the sync service.
///
/// A missing or malformed list is logged and treated as empty.
pub fn decode_device_list(json: Option<&str>) -> Vec<SyncDevice> {
    let Some(json) = json else {
        log::error!("Something went wrong while retrieving Sync Devices..");
        return Vec::new();
    };

    match serde_json::from_str::<Vec<SyncDevice>>(json) {
        Ok(devices) => devices,
        Err(e) => {
            log::error!("Failed to decode sync device list: {}", e);
            Vec::new()
        }
    }
}

/// Which removal flow applies to a selected device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceRemovalType {
    /// The selected device is the only one in the group
    LastDeviceLeft,
    /// The selected device is the one the app runs on
    CurrentDevice,
    OtherDevice,
}

impl DeviceRemovalType {
    pub fn classify(devices: &[SyncDevice], selected: &SyncDevice) -> Self {
        if devices.len() == 1 {
            DeviceRemovalType::LastDeviceLeft
        } else if selected.is_current_device {
            DeviceRemovalType::CurrentDevice
        } else {
            DeviceRemovalType::OtherDevice
        }
    }

    /// Whether confirming this removal makes the app leave the sync group
    pub fn leaves_group(&self) -> bool {
        matches!(
            self,
            DeviceRemovalType::LastDeviceLeft | DeviceRemovalType::CurrentDevice
        )
    }
}

impl fmt::Display for DeviceRemovalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceRemovalType::LastDeviceLeft => write!(f, "last device left"),
            DeviceRemovalType::CurrentDevice => write!(f, "current device"),
            DeviceRemovalType::OtherDevice => write!(f, "other device"),
        }
    }
}

/// Text of the confirmation shown before removing a device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalPrompt {
    pub title: String,
    pub message: String,
    pub remove_button: String,
    pub cancel_button: String,
}

impl RemovalPrompt {
    pub fn for_device(kind: DeviceRemovalType, device: &SyncDevice) -> Self {
        let name = device.prompt_name();
        let (title, message, remove_button) = match kind {
            DeviceRemovalType::LastDeviceLeft => (
                format!("Remove {} and delete sync chain?", name),
                "This is the last device in the sync chain. Removing it will delete the sync chain."
                    .to_string(),
                "Delete Sync Chain",
            ),
            DeviceRemovalType::CurrentDevice => (
                format!("Remove {} ({})?", name, THIS_DEVICE_SUFFIX),
                "Local data on this device will be kept, but it will stop syncing with the other devices in the chain."
                    .to_string(),
                "Remove Device",
            ),
            DeviceRemovalType::OtherDevice => (
                format!("Remove {}?", name),
                "Removing the device from the sync chain will not clear its local data."
                    .to_string(),
                "Remove Device",
            ),
        };

        Self {
            title,
            message,
            remove_button: remove_button.to_string(),
            cancel_button: "Cancel".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn device(id: &str, name: Option<&str>, current: bool) -> SyncDevice {
        SyncDevice {
            chrome_version: "90.1.24.82".to_string(),
            has_sharing_info: false,
            id: id.to_string(),
            is_current_device: current,
            last_updated_timestamp: 1_620_000_000.0,
            name: name.map(|n| n.to_string()),
            os: "iOS".to_string(),
            send_tab_to_self_receiving_enabled: false,
            device_type: "mobile".to_string(),
        }
    }

    const DEVICE_LIST_JSON: &str = r#"[
        {
            "chromeVersion": "90.1.24.82",
            "hasSharingInfo": false,
            "id": "a1",
            "isCurrentDevice": true,
            "lastUpdatedTimestamp": 1620000000.5,
            "name": "iPhone",
            "os": "iOS",
            "sendTabToSelfReceivingEnabled": true,
            "type": "mobile"
        },
        {
            "chromeVersion": "90.1.24.82",
            "hasSharingInfo": true,
            "id": "b2",
            "isCurrentDevice": false,
            "lastUpdatedTimestamp": 1620000100,
            "os": "Mac OS X",
            "sendTabToSelfReceivingEnabled": false,
            "type": "desktop"
        }
    ]"#;

    #[test]
    fn test_decode_device_list() {
        let devices = decode_device_list(Some(DEVICE_LIST_JSON));

        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].id, "a1");
        assert!(devices[0].is_current_device);
        assert_eq!(devices[0].device_type, "mobile");
        assert_eq!(devices[1].name, None);
        assert_eq!(devices[1].last_updated_timestamp, 1_620_000_100.0);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("{not json"))]
    #[case(Some(r#"[{"id": "missing-fields"}]"#))]
    fn test_decode_device_list_failures_are_empty(#[case] json: Option<&str>) {
        assert!(decode_device_list(json).is_empty());
    }

    #[rstest]
    #[case(Some("iPhone"), true, Some("iPhone (This Device)"))]
    #[case(Some("MacBook"), false, Some("MacBook"))]
    #[case(None, true, None)]
    fn test_display_name(
        #[case] name: Option<&str>,
        #[case] current: bool,
        #[case] expected: Option<&str>,
    ) {
        let d = device("x", name, current);
        assert_eq!(d.display_name().as_deref(), expected);
    }

    #[test]
    fn test_classify_last_device_left() {
        let only = device("a", Some("iPhone"), true);
        let devices = vec![only.clone()];
        assert_eq!(
            DeviceRemovalType::classify(&devices, &only),
            DeviceRemovalType::LastDeviceLeft
        );
    }

    #[test]
    fn test_classify_current_and_other() {
        let current = device("a", Some("iPhone"), true);
        let other = device("b", Some("MacBook"), false);
        let devices = vec![current.clone(), other.clone()];

        assert_eq!(
            DeviceRemovalType::classify(&devices, &current),
            DeviceRemovalType::CurrentDevice
        );
        assert_eq!(
            DeviceRemovalType::classify(&devices, &other),
            DeviceRemovalType::OtherDevice
        );
        assert!(DeviceRemovalType::CurrentDevice.leaves_group());
        assert!(!DeviceRemovalType::OtherDevice.leaves_group());
    }

    #[rstest]
    #[case(DeviceRemovalType::LastDeviceLeft, Some("iPad"), "Remove iPad and delete sync chain?", "Delete Sync Chain")]
    #[case(DeviceRemovalType::CurrentDevice, Some("iPad"), "Remove iPad (This Device)?", "Remove Device")]
    #[case(DeviceRemovalType::OtherDevice, Some("iPad"), "Remove iPad?", "Remove Device")]
    #[case(DeviceRemovalType::OtherDevice, None, "Remove Device?", "Remove Device")]
    fn test_removal_prompt(
        #[case] kind: DeviceRemovalType,
        #[case] name: Option<&str>,
        #[case] title: &str,
        #[case] button: &str,
    ) {
        let prompt = RemovalPrompt::for_device(kind, &device("x", name, false));
        assert_eq!(prompt.title, title);
        assert_eq!(prompt.remove_button, button);
        assert_eq!(prompt.cancel_button, "Cancel");
        assert!(!prompt.message.is_empty());
    }
}
