use serde::{Deserialize, Serialize};
use std::fmt;

/// One named preference attribute. The set is closed and the declaration
/// order below is the canonical ask/render order shared by the dialogue
/// policy and the query builder.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Brand,
    Ram,
    Processor,
    GpuBrand,
    StorageCapacity,
    StorageType,
    Price,
    ScreenSize,
    BatteryLife,
    Weight,
    Os,
    Audio,
    KeyboardFeatures,
    Material,
    WebcamQuality,
    Connectivity,
    Purpose,
}

impl Slot {
    /// Every slot in canonical order.
    pub const ALL: [Slot; 17] = [
        Slot::Brand,
        Slot::Ram,
        Slot::Processor,
        Slot::GpuBrand,
        Slot::StorageCapacity,
        Slot::StorageType,
        Slot::Price,
        Slot::ScreenSize,
        Slot::BatteryLife,
        Slot::Weight,
        Slot::Os,
        Slot::Audio,
        Slot::KeyboardFeatures,
        Slot::Material,
        Slot::WebcamQuality,
        Slot::Connectivity,
        Slot::Purpose,
    ];

    /// Lower-case wire key, e.g. `storage_capacity`.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Slot::Brand => "brand",
            Slot::Ram => "ram",
            Slot::Processor => "processor",
            Slot::GpuBrand => "gpu_brand",
            Slot::StorageCapacity => "storage_capacity",
            Slot::StorageType => "storage_type",
            Slot::Price => "price",
            Slot::ScreenSize => "screen_size",
            Slot::BatteryLife => "battery_life",
            Slot::Weight => "weight",
            Slot::Os => "os",
            Slot::Audio => "audio",
            Slot::KeyboardFeatures => "keyboard_features",
            Slot::Material => "material",
            Slot::WebcamQuality => "webcam_quality",
            Slot::Connectivity => "connectivity",
            Slot::Purpose => "purpose",
        }
    }

    /// Human-readable label: underscores become spaces, first letter
    /// capitalized (`Storage capacity`).
    #[must_use]
    pub fn label(self) -> String {
        let spaced = self.key().replace('_', " ");
        let mut chars = spaced.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => spaced,
        }
    }

    /// Parse a case-normalized key. Accepts the looser terms the
    /// text-generation service tends to answer with (`budget`, `storage`,
    /// `graphics card`, ...) so real answers are not dropped by the closed
    /// enum.
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        let normalized = key.trim().to_lowercase().replace([' ', '-'], "_");
        let slot = match normalized.as_str() {
            "brand" => Slot::Brand,
            "ram" | "memory" => Slot::Ram,
            "processor" | "cpu" => Slot::Processor,
            "gpu_brand" | "gpu" | "graphics" | "graphics_card" => Slot::GpuBrand,
            "storage_capacity" | "storage" => Slot::StorageCapacity,
            "storage_type" => Slot::StorageType,
            "price" | "budget" => Slot::Price,
            "screen_size" | "display" => Slot::ScreenSize,
            "battery_life" | "battery" => Slot::BatteryLife,
            "weight" => Slot::Weight,
            "os" | "operating_system" => Slot::Os,
            "audio" | "sound" => Slot::Audio,
            "keyboard_features" | "keyboard" => Slot::KeyboardFeatures,
            "material" => Slot::Material,
            "webcam_quality" | "webcam" | "camera" => Slot::WebcamQuality,
            "connectivity" => Slot::Connectivity,
            "purpose" | "use_case" => Slot::Purpose,
            _ => return None,
        };
        Some(slot)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn canonical_order_starts_with_brand_then_ram() {
        assert_eq!(Slot::ALL[0], Slot::Brand);
        assert_eq!(Slot::ALL[1], Slot::Ram);
        assert_eq!(Slot::ALL[16], Slot::Purpose);
    }

    #[test]
    fn key_roundtrips_through_parse() {
        for slot in Slot::ALL {
            assert_eq!(Slot::parse(slot.key()), Some(slot));
        }
    }

    #[test]
    fn parse_accepts_service_aliases() {
        assert_eq!(Slot::parse("Budget"), Some(Slot::Price));
        assert_eq!(Slot::parse("graphics card"), Some(Slot::GpuBrand));
        assert_eq!(Slot::parse("storage"), Some(Slot::StorageCapacity));
        assert_eq!(Slot::parse("operating system"), Some(Slot::Os));
        assert_eq!(Slot::parse("flux capacitor"), None);
    }

    #[test]
    fn label_capitalizes_and_spaces() {
        assert_eq!(Slot::StorageCapacity.label(), "Storage capacity");
        assert_eq!(Slot::Ram.label(), "Ram");
    }

    #[test]
    fn serde_uses_snake_case_keys() {
        let json = serde_json::to_string(&Slot::GpuBrand).unwrap();
        assert_eq!(json, "\"gpu_brand\"");
    }
}
