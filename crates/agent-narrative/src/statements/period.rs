//! Period-keyed record maps

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// Records keyed by fiscal period label, in upstream order
///
/// Serializes as a JSON object whose keys appear in insertion order.
/// Inserting a label that is already present replaces its record in place.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodMap<R> {
    entries: Vec<(String, R)>,
}

impl<R> Default for PeriodMap<R> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<R> PeriodMap<R> {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any record under the same label
    pub fn insert(&mut self, label: impl Into<String>, record: R) {
        let label = label.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, slot)) => *slot = record,
            None => self.entries.push((label, record)),
        }
    }

    /// Get the record for a label
    pub fn get(&self, label: &str) -> Option<&R> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, record)| record)
    }

    /// Period labels in order
    pub fn labels(&self) -> Vec<&str> {
        self.iter().map(|(label, _)| label).collect()
    }

    /// Iterate over `(label, record)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &R)> {
        self.entries.iter().map(|(label, record)| (label.as_str(), record))
    }

    /// Number of periods
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no periods
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<R: Serialize> Serialize for PeriodMap<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (label, record) in self.iter() {
            map.serialize_entry(label, record)?;
        }
        map.end()
    }
}

impl<'de, R: Deserialize<'de>> Deserialize<'de> for PeriodMap<R> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PeriodMapVisitor<R>(PhantomData<R>);

        impl<'de, R: Deserialize<'de>> Visitor<'de> for PeriodMapVisitor<R> {
            type Value = PeriodMap<R>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object keyed by period label")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = PeriodMap::new();
                while let Some((label, record)) = access.next_entry::<String, R>()? {
                    map.insert(label, record);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(PeriodMapVisitor(PhantomData))
    }
}

/// Label for the entry at `index`: its date, or `Year {index}` when missing
pub fn period_label(date: Option<String>, index: usize) -> String {
    date.filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| format!("Year {index}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_keeps_order_and_replaces() {
        let mut map = PeriodMap::new();
        map.insert("2024", 1);
        map.insert("2023", 2);
        map.insert("2024", 3);

        assert_eq!(map.len(), 2);
        assert_eq!(map.labels(), vec!["2024", "2023"]);
        assert_eq!(map.get("2024"), Some(&3));
        assert_eq!(map.get("2022"), None);

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![("2024", &3), ("2023", &2)]);
    }

    #[test]
    fn test_serializes_in_insertion_order() {
        let mut map = PeriodMap::new();
        map.insert("2024-09-28", 1);
        map.insert("2020-09-26", 2);

        let text = serde_json::to_string(&map).unwrap();
        assert_eq!(text, r#"{"2024-09-28":1,"2020-09-26":2}"#);
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let mut map = PeriodMap::new();
        map.insert("b", json!({"x": 1}));
        map.insert("a", json!({"x": null}));

        let text = serde_json::to_string(&map).unwrap();
        let back: PeriodMap<serde_json::Value> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, map);
        assert_eq!(back.labels(), vec!["b", "a"]);
    }

    #[test]
    fn test_rejects_non_object() {
        let result: Result<PeriodMap<i32>, _> = serde_json::from_str("[1, 2]");
        assert!(result.is_err());
    }

    #[test]
    fn test_period_label() {
        assert_eq!(period_label(Some("2023-12-31".to_string()), 0), "2023-12-31");
        assert_eq!(period_label(None, 2), "Year 2");
        assert_eq!(period_label(Some(String::new()), 4), "Year 4");
    }
}
