//! Ordered, singly-linked record sequence
//!
//! Nodes live in an arena (`Vec<Link>`) and point at their successor by
//! index. Appending is O(1) through the tail index. The sort engine relinks
//! nodes in place, so the arena order and the sequence order may diverge;
//! iteration always follows the links from `head`.
//!
//! The sequence handle never doubles as a traversal cursor: walking is done
//! by `Iter`, which owns its own position.

use std::fmt;

use super::record::{Record, RecordRef};

/// One node: a record and the index of the next node
#[derive(Debug, Clone)]
pub(crate) struct Link {
    pub(crate) record: RecordRef,
    pub(crate) next: Option<usize>,
}

/// Ordered collection of shared records
#[derive(Clone, Default)]
pub struct RecordSequence {
    links: Vec<Link>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl RecordSequence {
    /// Creates an empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty sequence with room for `capacity` records
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            links: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Appends a record at the end. O(1).
    pub fn push(&mut self, record: RecordRef) {
        let index = self.links.len();
        self.links.push(Link { record, next: None });

        match self.tail {
            Some(tail) => self.links[tail].next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len += 1;
    }

    /// Number of records in sequence order
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the sequence holds no records
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// First record, if any
    pub fn first(&self) -> Option<&RecordRef> {
        self.head.map(|index| &self.links[index].record)
    }

    /// Last record, if any
    pub fn last(&self) -> Option<&RecordRef> {
        self.tail.map(|index| &self.links[index].record)
    }

    /// Linear membership test by record value
    pub fn contains(&self, record: &Record) -> bool {
        self.iter().any(|candidate| **candidate == *record)
    }

    /// Forward iterator in sequence order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            links: &self.links,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// Copies the record handles into a vector, in sequence order
    pub fn to_vec(&self) -> Vec<RecordRef> {
        self.iter().cloned().collect()
    }

    /// Takes the arena apart for in-place relinking
    pub(crate) fn into_links(self) -> (Vec<Link>, Option<usize>, usize) {
        (self.links, self.head, self.len)
    }

    /// Reassembles a sequence from relinked nodes.
    ///
    /// `head` must start a chain of exactly `len` nodes. The tail is found
    /// by walking the chain once.
    pub(crate) fn from_links(links: Vec<Link>, head: Option<usize>, len: usize) -> Self {
        let mut tail = head;
        while let Some(next) = tail.and_then(|index| links[index].next) {
            tail = Some(next);
        }

        Self {
            links,
            head,
            tail,
            len,
        }
    }
}

impl PartialEq for RecordSequence {
    /// Same records in the same order
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl Eq for RecordSequence {}

impl fmt::Debug for RecordSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl FromIterator<RecordRef> for RecordSequence {
    fn from_iter<I: IntoIterator<Item = RecordRef>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut sequence = RecordSequence::with_capacity(iter.size_hint().0);
        for record in iter {
            sequence.push(record);
        }
        sequence
    }
}

impl Extend<RecordRef> for RecordSequence {
    fn extend<I: IntoIterator<Item = RecordRef>>(&mut self, iter: I) {
        for record in iter {
            self.push(record);
        }
    }
}

impl<'a> IntoIterator for &'a RecordSequence {
    type Item = &'a RecordRef;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Traversal cursor over a `RecordSequence`
pub struct Iter<'a> {
    links: &'a [Link],
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a RecordRef;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let link = &self.links[index];
        self.cursor = link.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&link.record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}
