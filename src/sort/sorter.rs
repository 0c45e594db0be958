//! Stable top-down merge sort over a linked record sequence
//!
//! The sequence's nodes are relinked in place: no record is cloned and no
//! node is allocated. Recursion depth is O(log n).

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::record::{Attribute, Link, RecordSequence};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Attribute plus direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub attribute: Attribute,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Ascending on `attribute`
    pub fn asc(attribute: Attribute) -> Self {
        Self {
            attribute,
            direction: SortDirection::Asc,
        }
    }

    /// Descending on `attribute`
    pub fn desc(attribute: Attribute) -> Self {
        Self {
            attribute,
            direction: SortDirection::Desc,
        }
    }
}

/// Sorts according to `spec`: ascending merge sort, then a reversal for
/// descending order.
///
/// Descending output is the exact reverse of ascending output, so records
/// with equal keys appear in reverse input order.
pub fn sort_sequence(sequence: RecordSequence, spec: SortSpec) -> RecordSequence {
    let sorted = merge_sort(sequence, spec.attribute);
    match spec.direction {
        SortDirection::Asc => sorted,
        SortDirection::Desc => reverse(sorted),
    }
}

/// Stable ascending sort by `attribute`'s natural ordering
pub fn merge_sort(sequence: RecordSequence, attribute: Attribute) -> RecordSequence {
    let (mut links, head, len) = sequence.into_links();
    let head = sort_chain(&mut links, head, attribute);
    RecordSequence::from_links(links, head, len)
}

/// Reverses sequence order in O(n)
pub fn reverse(sequence: RecordSequence) -> RecordSequence {
    let (mut links, head, len) = sequence.into_links();

    let mut reversed = None;
    let mut cursor = head;
    while let Some(index) = cursor {
        cursor = links[index].next;
        links[index].next = reversed;
        reversed = Some(index);
    }

    RecordSequence::from_links(links, reversed, len)
}

fn sort_chain(links: &mut [Link], head: Option<usize>, attribute: Attribute) -> Option<usize> {
    // Empty and single-node chains are already sorted
    let first = match head {
        Some(index) if links[index].next.is_some() => index,
        _ => return head,
    };

    let mid = midpoint(links, first);
    let right = links[mid].next.take();

    let left = sort_chain(links, Some(first), attribute);
    let right = sort_chain(links, right, attribute);
    merge(links, left, right, attribute)
}

/// Last node of the left half: slow pointer advances once per two fast steps
fn midpoint(links: &[Link], head: usize) -> usize {
    let mut slow = head;
    let mut fast = head;

    while let Some(leap) = links[fast].next.and_then(|step| links[step].next) {
        fast = leap;
        if let Some(next) = links[slow].next {
            slow = next;
        }
    }

    slow
}

fn merge(
    links: &mut [Link],
    mut left: Option<usize>,
    mut right: Option<usize>,
    attribute: Attribute,
) -> Option<usize> {
    let mut head = None;
    let mut tail: Option<usize> = None;

    while let (Some(l), Some(r)) = (left, right) {
        // Right wins only when strictly smaller; ties keep left first
        let taken = if links[r].record.compare_by(&links[l].record, attribute) == Ordering::Less {
            right = links[r].next;
            r
        } else {
            left = links[l].next;
            l
        };

        match tail {
            Some(t) => links[t].next = Some(taken),
            None => head = Some(taken),
        }
        tail = Some(taken);
    }

    let rest = left.or(right);
    match tail {
        Some(t) => links[t].next = rest,
        None => head = rest,
    }

    head
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Record, RecordFields, RecordRef};
    use chrono::{NaiveDate, NaiveTime};

    fn make_record(lecturer: &str, size: i64, tag: &str) -> RecordRef {
        Record::new(RecordFields {
            module: "Module".to_string(),
            module_code: tag.to_string(),
            cohort: "FT_2023".to_string(),
            course: "BSc".to_string(),
            full_part: "FT".to_string(),
            session: "LEC".to_string(),
            activity_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            duration: "1:00".to_string(),
            location: "B101".to_string(),
            size,
            lecturer: lecturer.to_string(),
            zone: "A".to_string(),
        })
        .into_ref()
    }

    fn tags(sequence: &RecordSequence) -> Vec<String> {
        sequence.iter().map(|r| r.module_code().to_string()).collect()
    }

    fn sequence(records: Vec<RecordRef>) -> RecordSequence {
        records.into_iter().collect()
    }

    #[test]
    fn test_sort_empty_and_single() {
        let empty = merge_sort(RecordSequence::new(), Attribute::Lecturer);
        assert!(empty.is_empty());

        let single = merge_sort(sequence(vec![make_record("Ann", 1, "a")]), Attribute::Lecturer);
        assert_eq!(tags(&single), vec!["a"]);
    }

    #[test]
    fn test_sort_ascending_text() {
        let input = sequence(vec![
            make_record("Cat", 1, "c"),
            make_record("Ann", 1, "a"),
            make_record("Dan", 1, "d"),
            make_record("Ben", 1, "b"),
        ]);

        let sorted = merge_sort(input, Attribute::Lecturer);
        assert_eq!(tags(&sorted), vec!["a", "b", "c", "d"]);
        assert_eq!(sorted.len(), 4);
        assert_eq!(sorted.last().unwrap().module_code(), "d");
    }

    #[test]
    fn test_sort_numeric_not_lexicographic() {
        let input = sequence(vec![
            make_record("Ann", 100, "hundred"),
            make_record("Ann", 9, "nine"),
            make_record("Ann", 20, "twenty"),
        ]);

        let sorted = merge_sort(input, Attribute::Size);
        assert_eq!(tags(&sorted), vec!["nine", "twenty", "hundred"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let input = sequence(vec![
            make_record("Ben", 1, "b1"),
            make_record("Ann", 1, "a1"),
            make_record("Ben", 1, "b2"),
            make_record("Ann", 1, "a2"),
            make_record("Ben", 1, "b3"),
        ]);

        let sorted = merge_sort(input, Attribute::Lecturer);
        assert_eq!(tags(&sorted), vec!["a1", "a2", "b1", "b2", "b3"]);
    }

    #[test]
    fn test_descending_is_reverse_of_ascending() {
        let records = vec![
            make_record("Cat", 1, "c"),
            make_record("Ann", 1, "a"),
            make_record("Ben", 1, "b"),
            make_record("Ann", 1, "a2"),
        ];

        let asc = sort_sequence(sequence(records.clone()), SortSpec::asc(Attribute::Lecturer));
        let desc = sort_sequence(sequence(records), SortSpec::desc(Attribute::Lecturer));

        let mut expected = tags(&asc);
        expected.reverse();
        assert_eq!(tags(&desc), expected);
    }

    #[test]
    fn test_reverse() {
        let reversed = reverse(sequence(vec![
            make_record("Ann", 1, "a"),
            make_record("Ann", 1, "b"),
            make_record("Ann", 1, "c"),
        ]));
        assert_eq!(tags(&reversed), vec!["c", "b", "a"]);
        assert_eq!(reversed.last().unwrap().module_code(), "a");
        assert!(reverse(RecordSequence::new()).is_empty());
    }

    #[test]
    fn test_sorted_sequence_accepts_appends() {
        let mut sorted = merge_sort(
            sequence(vec![make_record("Ben", 1, "b"), make_record("Ann", 1, "a")]),
            Attribute::Lecturer,
        );
        sorted.push(make_record("Cat", 1, "c"));
        assert_eq!(tags(&sorted), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_large_input_matches_std_stable_sort() {
        let records: Vec<RecordRef> = (0..257)
            .map(|i| make_record(&format!("L{}", (i * 37) % 11), 1, &format!("t{}", i)))
            .collect();

        let mut expected = records.clone();
        expected.sort_by(|a, b| a.compare_by(b, Attribute::Lecturer));

        let sorted = merge_sort(sequence(records), Attribute::Lecturer);
        assert_eq!(sorted.to_vec(), expected);
    }
}
