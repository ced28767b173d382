use crate::catalog::normalize::bare_footprint;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Case-insensitive attribute bag attached to a component.
///
/// Keys are folded once at construction; the original spelling is kept so
/// output can show the field the way the designer typed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<Field>,
    index: HashMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Field {
    name: String,
    value: String,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field. Values are trimmed. When a key differing only in case
    /// already holds a non-empty value, the earlier value is kept.
    pub fn insert(&mut self, name: impl Into<String>, value: impl AsRef<str>) {
        let name = name.into();
        let value = value.as_ref().trim().to_string();
        let key = name.trim().to_lowercase();

        match self.index.get(&key) {
            Some(&i) => {
                if self.entries[i].value.is_empty() && !value.is_empty() {
                    self.entries[i].value = value;
                }
            }
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(Field { name, value });
            }
        }
    }

    /// Case-insensitive lookup. Returns the stored value even when empty.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.index
            .get(&name.trim().to_lowercase())
            .map(|&i| self.entries[i].value.as_str())
    }

    /// Value of the first alias (in alias order) that is present and non-empty.
    pub fn first_of(&self, aliases: &[&str]) -> Option<&str> {
        aliases
            .iter()
            .filter_map(|alias| self.get(alias))
            .find(|value| !value.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fields in insertion order, with original key spelling.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|f| (f.name.as_str(), f.value.as_str()))
    }
}

impl<K: Into<String>, V: AsRef<str>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Serialize for FieldMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldMap {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // serde_json keeps object order only with `preserve_order`; sort for a stable result.
        let raw: HashMap<String, serde_json::Value> = HashMap::deserialize(deserializer)?;
        let mut pairs: Vec<(String, String)> = raw
            .into_iter()
            .filter_map(|(name, value)| field_text(&name, value).map(|text| (name, text)))
            .collect();
        pairs.sort();
        Ok(pairs.into_iter().collect())
    }
}

/// Attribute value as text. Scalars are stringified, `null` is empty and
/// nested arrays or objects are dropped.
fn field_text(name: &str, value: serde_json::Value) -> Option<String> {
    use serde_json::Value;
    match value {
        Value::String(s) => Some(s),
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => {
            tracing::debug!("Skipping non-scalar field {}", name);
            None
        }
    }
}

/// One schematic symbol instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub reference: String, // R5, C1, U3
    pub value: String,     // 10k, 100nF
    pub footprint: String, // Resistor_SMD:R_0402_1005Metric
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fields: FieldMap,
}

impl ComponentRecord {
    pub fn new(
        reference: impl Into<String>,
        value: impl Into<String>,
        footprint: impl Into<String>,
    ) -> Self {
        Self {
            reference: reference.into(),
            value: value.into(),
            footprint: footprint.into(),
            description: String::new(),
            fields: FieldMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl AsRef<str>) -> Self {
        self.fields.insert(name, value);
        self
    }

    /// Footprint without its `Library:` prefix.
    pub fn footprint_name(&self) -> &str {
        bare_footprint(&self.footprint)
    }

    /// Leading letters of the reference designator (`R` for `R12`).
    pub fn reference_prefix(&self) -> String {
        self.reference
            .chars()
            .take_while(|c| c.is_alphabetic())
            .collect()
    }
}
