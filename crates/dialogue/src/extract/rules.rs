use crate::error::Result;
use crate::extract::PreferenceExtractor;
use crate::preferences::PreferenceState;
use crate::slots::Slot;
use async_trait::async_trait;

const BRANDS: [&str; 12] = [
    "dell",
    "lenovo",
    "hp",
    "asus",
    "acer",
    "apple",
    "microsoft",
    "samsung",
    "msi",
    "lg",
    "razer",
    "huawei",
];

const PROCESSORS: [&str; 9] = [
    "i3", "i5", "i7", "i9", "ryzen", "amd", "intel", "m1", "m2",
];

const GPUS: [&str; 6] = ["nvidia", "amd", "intel", "rtx", "gtx", "vega"];

const OPERATING_SYSTEMS: [&str; 5] = ["windows", "macos", "linux", "ubuntu", "chromeos"];

const MATERIALS: [&str; 3] = ["aluminum", "plastic", "carbon"];

const KEYBOARD_FEATURES: [&str; 2] = ["backlit", "rgb"];

/// Keyword-matching extractor. Runs entirely locally: the utterance is
/// lowercased, split into tokens, and scanned for the known attribute
/// vocabularies. Coarse by design; the service-backed extractor exists for
/// everything this one cannot phrase-match.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedExtractor;

#[async_trait]
impl PreferenceExtractor for RuleBasedExtractor {
    async fn extract(&self, utterance: &str, prior: &PreferenceState) -> Result<PreferenceState> {
        Ok(apply_rules(utterance, prior))
    }
}

fn apply_rules(utterance: &str, prior: &PreferenceState) -> PreferenceState {
    let text = utterance.to_lowercase();
    let words: Vec<&str> = text
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric() && c != '$' && c != '"'))
        .filter(|word| !word.is_empty())
        .collect();
    let mut state = prior.clone();

    if text.contains("brand") || BRANDS.iter().any(|brand| words.contains(brand)) {
        if let Some(brand) = words.iter().find(|word| BRANDS.contains(word)) {
            state.set(Slot::Brand, capitalize(brand));
        }
    }

    if text.contains("ram") {
        if let Some(ram) = words.iter().find(|word| word.contains("gb")) {
            state.set(Slot::Ram, *ram);
        }
    }

    if text.contains("processor") || text.contains("cpu") {
        if let Some(cpu) = words.iter().find(|word| PROCESSORS.contains(word)) {
            state.set(Slot::Processor, capitalize(cpu));
        }
    }

    if text.contains("gpu") || text.contains("graphics") {
        if let Some(gpu) = words.iter().find(|word| GPUS.contains(word)) {
            state.set(Slot::GpuBrand, capitalize(gpu));
        }
    }

    if text.contains("storage") || text.contains("hard drive") {
        if let Some(capacity) = words
            .iter()
            .find(|word| word.contains("gb") || word.contains("tb"))
        {
            state.set(Slot::StorageCapacity, *capacity);
        }
    }

    if text.contains("ssd") {
        state.set(Slot::StorageType, "SSD");
    } else if text.contains("hdd") {
        state.set(Slot::StorageType, "HDD");
    }

    if text.contains("budget") || text.contains("price") {
        if let Some(price) = words
            .iter()
            .find(|word| word.contains('$') || word.chars().all(|c| c.is_ascii_digit()))
        {
            state.set(Slot::Price, *price);
        }
    }

    if text.contains("screen size") || text.contains("display") {
        if let Some(size) = screen_size(&words) {
            state.set(Slot::ScreenSize, size);
        }
    }

    if text.contains("battery") {
        if text.contains("long") || text.contains("good") {
            state.set(Slot::BatteryLife, "long-lasting");
        } else if let Some(battery) = words
            .iter()
            .find(|word| word.contains("hour") || word.contains("hrs"))
        {
            state.set(Slot::BatteryLife, *battery);
        }
    }

    if text.contains("light") {
        state.set(Slot::Weight, "lightweight");
    }

    if words.contains(&"os") || text.contains("operating system") {
        if let Some(os) = words.iter().find(|word| OPERATING_SYSTEMS.contains(word)) {
            state.set(Slot::Os, capitalize(os));
        }
    }

    if (text.contains("audio") || text.contains("sound")) && text.contains("high-quality") {
        state.set(Slot::Audio, "high-quality audio");
    }

    if text.contains("keyboard") {
        if let Some(feature) = words.iter().find(|word| KEYBOARD_FEATURES.contains(word)) {
            state.set(Slot::KeyboardFeatures, *feature);
        }
    }

    if text.contains("material") {
        if let Some(material) = words.iter().find(|word| MATERIALS.contains(word)) {
            state.set(Slot::Material, capitalize(material));
        }
    }

    if (text.contains("webcam") || text.contains("camera")) && text.contains("hd") {
        state.set(Slot::WebcamQuality, "HD or Full HD");
    }

    if text.contains("connectivity") || text.contains("wifi") || text.contains("bluetooth") {
        if text.contains("wifi 6") {
            state.set(Slot::Connectivity, "Wi-Fi 6");
        } else if text.contains("bluetooth") {
            state.set(Slot::Connectivity, "Bluetooth");
        }
    }

    if text.contains("purpose") || text.contains("use") {
        if text.contains("gaming") {
            state.set(Slot::Purpose, "Gaming");
        } else if text.contains("work") {
            state.set(Slot::Purpose, "Work");
        } else if text.contains("general use") || text.contains("everyday") {
            state.set(Slot::Purpose, "General Use");
        }
    }

    state
}

/// A number followed by "inch"/"inches", or a token carrying the unit (or a
/// trailing double quote) directly.
fn screen_size(words: &[&str]) -> Option<String> {
    for (i, word) in words.iter().enumerate() {
        if word.contains("inch") || word.contains('"') {
            let cleaned = word.trim_matches('"').replace("inches", "").replace("inch", "");
            let cleaned = cleaned.trim();
            if !cleaned.is_empty() {
                return Some(cleaned.to_string());
            }
        } else if word.chars().all(|c| c.is_ascii_digit() || c == '.')
            && word.chars().any(|c| c.is_ascii_digit())
        {
            if let Some(next) = words.get(i + 1) {
                if next.contains("inch") {
                    return Some((*word).to_string());
                }
            }
        }
    }
    None
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
