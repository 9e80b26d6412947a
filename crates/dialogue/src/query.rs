use crate::preferences::PreferenceState;
use crate::slots::Slot;

/// Render collected preferences into the free-text retrieval query.
///
/// Slots are visited in the fixed canonical order with a fixed phrase
/// template each, so the output depends only on which slots are filled,
/// never on insertion order. Absent slots contribute nothing. Storage is
/// the one combined fragment: capacity and type render together when both
/// are present.
#[must_use]
pub fn render_query(preferences: &PreferenceState) -> String {
    let mut parts: Vec<String> = Vec::new();
    let get = |slot: Slot| preferences.get(slot);

    if let Some(brand) = get(Slot::Brand) {
        parts.push(format!("{brand} laptop"));
    }
    if let Some(ram) = get(Slot::Ram) {
        parts.push(format!("{ram} RAM"));
    }
    if let Some(processor) = get(Slot::Processor) {
        parts.push(format!("{processor} processor"));
    }
    if let Some(gpu) = get(Slot::GpuBrand) {
        parts.push(format!("{gpu} GPU"));
    }
    match (get(Slot::StorageCapacity), get(Slot::StorageType)) {
        (Some(capacity), Some(kind)) => parts.push(format!("{capacity} {kind}")),
        (Some(capacity), None) => parts.push(format!("{capacity} storage")),
        (None, Some(kind)) => parts.push(kind.to_string()),
        (None, None) => {}
    }
    if let Some(price) = get(Slot::Price) {
        parts.push(format!("within {price} budget"));
    }
    if let Some(size) = get(Slot::ScreenSize) {
        parts.push(format!("{size} screen size"));
    }
    if let Some(battery) = get(Slot::BatteryLife) {
        parts.push(format!("{battery} battery life"));
    }
    if let Some(weight) = get(Slot::Weight) {
        parts.push(format!("{weight} weight"));
    }
    if let Some(os) = get(Slot::Os) {
        parts.push(format!("{os} operating system"));
    }
    if let Some(audio) = get(Slot::Audio) {
        parts.push(format!("{audio} audio"));
    }
    if let Some(keyboard) = get(Slot::KeyboardFeatures) {
        parts.push(format!("{keyboard} keyboard"));
    }
    if let Some(material) = get(Slot::Material) {
        parts.push(format!("{material} material"));
    }
    if let Some(webcam) = get(Slot::WebcamQuality) {
        parts.push(format!("{webcam} webcam"));
    }
    if let Some(connectivity) = get(Slot::Connectivity) {
        parts.push(format!("{connectivity} connectivity"));
    }
    if let Some(purpose) = get(Slot::Purpose) {
        parts.push(format!("for {purpose}"));
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_fixed_templates_in_canonical_order() {
        let mut prefs = PreferenceState::new();
        prefs.set(Slot::Purpose, "Gaming");
        prefs.set(Slot::Brand, "Asus");
        prefs.set(Slot::Ram, "32GB");
        prefs.set(Slot::Price, "$2000");

        assert_eq!(
            render_query(&prefs),
            "Asus laptop 32GB RAM within $2000 budget for Gaming"
        );
    }

    #[test]
    fn output_is_independent_of_insertion_order() {
        let mut forward = PreferenceState::new();
        forward.set(Slot::Brand, "Dell");
        forward.set(Slot::GpuBrand, "Nvidia");
        forward.set(Slot::Os, "Windows");

        let mut reverse = PreferenceState::new();
        reverse.set(Slot::Os, "Windows");
        reverse.set(Slot::GpuBrand, "Nvidia");
        reverse.set(Slot::Brand, "Dell");

        assert_eq!(render_query(&forward), render_query(&reverse));
    }

    #[test]
    fn storage_capacity_and_type_render_together() {
        let mut prefs = PreferenceState::new();
        prefs.set(Slot::StorageCapacity, "1TB");
        prefs.set(Slot::StorageType, "SSD");
        assert_eq!(render_query(&prefs), "1TB SSD");

        let mut capacity_only = PreferenceState::new();
        capacity_only.set(Slot::StorageCapacity, "1TB");
        assert_eq!(render_query(&capacity_only), "1TB storage");
    }

    #[test]
    fn empty_state_renders_empty_query() {
        assert_eq!(render_query(&PreferenceState::new()), "");
    }
}
