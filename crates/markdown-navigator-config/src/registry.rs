//! Runtime-extensible lists of labelled values.
//!
//! Some settings (the target languages offered by a translation service, for
//! example) are only known once a remote service answers, so they cannot be
//! a compiled enum. A [`LabeledRegistry`] holds such a list and can be
//! refreshed at any time.

/// One entry in a [`LabeledRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabeledValue {
    pub value: usize,
    pub label: String,
}

/// An ordered list of labelled values; the first entry is the default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabeledRegistry {
    values: Vec<LabeledValue>,
}

impl LabeledRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with `labels`, numbering them in order.
    ///
    /// With `add_empty`, an entry with an empty label is placed first so that
    /// "nothing selected" is the default.
    pub fn update_values<I, S>(&mut self, labels: I, add_empty: bool)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let empty = add_empty.then(String::new);
        self.values = empty
            .into_iter()
            .chain(labels.into_iter().map(Into::into))
            .enumerate()
            .map(|(value, label)| LabeledValue { value, label })
            .collect();
    }

    pub fn default_value(&self) -> Option<&LabeledValue> {
        self.values.first()
    }

    pub fn by_label(&self, label: &str) -> Option<&LabeledValue> {
        self.values.iter().find(|v| v.label == label)
    }

    pub fn by_value(&self, value: usize) -> Option<&LabeledValue> {
        self.values.iter().find(|v| v.value == value)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.values.iter().map(|v| v.label.as_str()).collect()
    }

    /// Labels minus the excluded ones, for filling a picker.
    pub fn labels_excluding(&self, exclude: &[&str]) -> Vec<&str> {
        self.labels()
            .into_iter()
            .filter(|label| !exclude.contains(label))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn update_replaces_values() {
        let mut registry = LabeledRegistry::new();
        registry.update_values(["en", "de"], false);
        registry.update_values(["fr", "ja", "ru"], false);

        assert_eq!(registry.labels(), vec!["fr", "ja", "ru"]);
        assert_eq!(registry.by_label("ja").map(|v| v.value), Some(1));
    }

    #[test]
    fn empty_entry_becomes_default() {
        let mut registry = LabeledRegistry::new();
        registry.update_values(["en"], true);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.default_value().unwrap().label, "");
        assert_eq!(registry.by_value(1).unwrap().label, "en");
    }

    #[test]
    fn exclusion_filters_labels() {
        let mut registry = LabeledRegistry::new();
        registry.update_values(["en", "de", "fr"], false);
        assert_eq!(registry.labels_excluding(&["de"]), vec!["en", "fr"]);
    }

    #[test]
    fn empty_registry_has_no_default() {
        assert!(LabeledRegistry::new().default_value().is_none());
        assert!(LabeledRegistry::new().is_empty());
    }
}
