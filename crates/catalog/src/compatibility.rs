//! Device eSIM-compatibility lookups.

use serde::{Deserialize, Serialize};

/// One device row of the compatibility table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCompatibility {
    pub brand: String,
    pub model: String,
    pub os_type: String,
    pub is_supported: Option<bool>,
    pub notes: Option<String>,
}

impl DeviceCompatibility {
    pub fn is_supported(&self) -> bool {
        self.is_supported.unwrap_or(false)
    }
}

/// In-memory view over the fetched compatibility rows.
#[derive(Debug, Clone, Default)]
pub struct CompatibilityList {
    devices: Vec<DeviceCompatibility>,
}

impl CompatibilityList {
    pub fn new(devices: Vec<DeviceCompatibility>) -> Self {
        Self { devices }
    }

    /// Exact brand+model lookup, case-insensitive.
    pub fn lookup(&self, brand: &str, model: &str) -> Option<&DeviceCompatibility> {
        self.devices.iter().find(|d| {
            d.brand.eq_ignore_ascii_case(brand) && d.model.eq_ignore_ascii_case(model)
        })
    }

    /// All supported devices of a brand, for the picker list.
    pub fn supported_by_brand(&self, brand: &str) -> Vec<&DeviceCompatibility> {
        self.devices
            .iter()
            .filter(|d| d.is_supported() && d.brand.eq_ignore_ascii_case(brand))
            .collect()
    }
}
