//! Per-attribute distinct values of a record sequence

use std::collections::BTreeSet;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::index::SizeHints;
use crate::record::{Attribute, AttributeValue, RecordSequence, ATTRIBUTE_COUNT};

/// Distinct values of every attribute across one sequence, in value order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domains {
    sets: [BTreeSet<AttributeValue>; ATTRIBUTE_COUNT],
}

impl Default for Domains {
    fn default() -> Self {
        Self {
            sets: std::array::from_fn(|_| BTreeSet::new()),
        }
    }
}

impl Domains {
    /// Collects domains in a single pass over `records`
    pub fn collect(records: &RecordSequence) -> Self {
        let mut domains = Self::default();
        for record in records {
            for attribute in Attribute::ALL {
                domains.sets[attribute.position()].insert(record.value(attribute));
            }
        }
        domains
    }

    /// Distinct values of one attribute
    pub fn get(&self, attribute: Attribute) -> &BTreeSet<AttributeValue> {
        &self.sets[attribute.position()]
    }

    /// Number of distinct values of one attribute
    pub fn count(&self, attribute: Attribute) -> usize {
        self.get(attribute).len()
    }

    /// True when choosing a value of `attribute` would still narrow the set
    pub fn is_selectable(&self, attribute: Attribute) -> bool {
        self.count(attribute) > 1
    }

    /// Distinct-value counts, shaped for sizing attribute indexes
    pub fn size_hints(&self) -> SizeHints {
        SizeHints::new(std::array::from_fn(|position| self.sets[position].len()))
    }

    /// Iterates `(attribute, values)` in canonical attribute order
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, &BTreeSet<AttributeValue>)> {
        Attribute::ALL.iter().map(move |&attribute| (attribute, self.get(attribute)))
    }
}

impl Serialize for Domains {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ATTRIBUTE_COUNT))?;
        for (attribute, values) in self.iter() {
            map.serialize_entry(attribute.name(), values)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Record, RecordFields, RecordRef};
    use chrono::{NaiveDate, NaiveTime};

    fn make_record(code: &str, day: u32, size: i64) -> RecordRef {
        Record::new(RecordFields {
            module: "Module".to_string(),
            module_code: code.to_string(),
            cohort: "FT_2023".to_string(),
            course: "BSc".to_string(),
            full_part: "FT".to_string(),
            session: "LEC".to_string(),
            activity_date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            duration: "1:00".to_string(),
            location: "B101".to_string(),
            size,
            lecturer: "Dr Smith".to_string(),
            zone: "A".to_string(),
        })
        .into_ref()
    }

    fn sample() -> RecordSequence {
        vec![
            make_record("IP", 1, 40),
            make_record("DCNG", 2, 9),
            make_record("IP", 3, 40),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_empty_sequence_has_empty_domains() {
        let domains = Domains::collect(&RecordSequence::new());
        for (_, values) in domains.iter() {
            assert!(values.is_empty());
        }
        assert_eq!(domains.size_hints(), SizeHints::uniform(0));
    }

    #[test]
    fn test_collect_distinct_sorted_values() {
        let domains = Domains::collect(&sample());

        let codes: Vec<_> = domains.get(Attribute::ModuleCode).iter().cloned().collect();
        assert_eq!(codes, vec![AttributeValue::from("DCNG"), AttributeValue::from("IP")]);

        let sizes: Vec<_> = domains.get(Attribute::Size).iter().cloned().collect();
        assert_eq!(sizes, vec![AttributeValue::Integer(9), AttributeValue::Integer(40)]);

        assert_eq!(domains.count(Attribute::ActivityDate), 3);
        assert_eq!(domains.count(Attribute::Zone), 1);
    }

    #[test]
    fn test_is_selectable() {
        let domains = Domains::collect(&sample());
        assert!(domains.is_selectable(Attribute::ModuleCode));
        assert!(!domains.is_selectable(Attribute::Zone));
    }

    #[test]
    fn test_size_hints_match_counts() {
        let domains = Domains::collect(&sample());
        let hints = domains.size_hints();
        for attribute in Attribute::ALL {
            assert_eq!(hints.get(attribute), domains.count(attribute));
        }
    }

    #[test]
    fn test_serialize_keyed_by_attribute_name() {
        let json = serde_json::to_value(Domains::collect(&sample())).unwrap();
        assert_eq!(json["moduleCode"], serde_json::json!(["DCNG", "IP"]));
        assert_eq!(json["size"], serde_json::json!([9, 40]));
        assert_eq!(json["activityDate"][0], "2024-01-01");
        assert_eq!(json.as_object().unwrap().len(), ATTRIBUTE_COUNT);
    }
}
