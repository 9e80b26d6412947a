/// Display-ready recommendation derived from one surviving hit.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub title: String,
    pub descriptions: Vec<String>,
    pub specs: Vec<String>,
    pub distance: f32,
}

impl Recommendation {
    /// Parse the stored combined representation,
    /// `<title> ['<d1>', '<d2>'] ['<s1>', ...]`, into its three parts.
    /// Text that does not split into exactly title plus two bracket groups
    /// degrades to title-only rather than failing.
    #[must_use]
    pub fn from_stored(combined_text: &str, distance: f32) -> Self {
        let (title, descriptions, specs) = match split_stored(combined_text) {
            Some(parts) => parts,
            None => (combined_text.trim().to_string(), Vec::new(), Vec::new()),
        };
        Self {
            title,
            descriptions,
            specs,
            distance,
        }
    }

    /// Human-readable block: title line, descriptions joined by spaces,
    /// specs joined by commas behind a `Specifications:` prefix.
    #[must_use]
    pub fn display_block(&self) -> String {
        let mut formatted = format!("{}\n", self.title);
        if !self.descriptions.is_empty() {
            formatted.push_str(&self.descriptions.join(" "));
            formatted.push(' ');
        }
        if !self.specs.is_empty() {
            formatted.push_str("Specifications: ");
            formatted.push_str(&self.specs.join(", "));
            formatted.push('.');
        }
        formatted.trim().to_string()
    }
}

fn split_stored(text: &str) -> Option<(String, Vec<String>, Vec<String>)> {
    let open = text.find('[')?;
    let title = text[..open].trim();
    if title.is_empty() {
        return None;
    }

    let (descriptions, rest) = bracket_group(text[open..].trim())?;
    let (specs, tail) = bracket_group(rest.trim_start())?;
    if !tail.trim().is_empty() {
        return None;
    }

    Some((title.to_string(), fragments(descriptions), fragments(specs)))
}

/// Split off one leading `[...]` group. Fragments never contain `]` in the
/// cleaned catalog export, so the first closing bracket ends the group.
fn bracket_group(text: &str) -> Option<(&str, &str)> {
    let rest = text.strip_prefix('[')?;
    let close = rest.find(']')?;
    Some((&rest[..close], &rest[close + 1..]))
}

fn fragments(group: &str) -> Vec<String> {
    let group = group.trim();
    if group.is_empty() {
        return Vec::new();
    }
    group
        .split("', '")
        .map(|fragment| fragment.trim().trim_matches('\'').to_string())
        .filter(|fragment| !fragment.is_empty())
        .collect()
}
