use smallvec::SmallVec;

/// Half-open range of document positions, `from < to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextSpan {
    from: usize,
    to: usize,
}

impl TextSpan {
    /// Returns `None` for empty or inverted ranges.
    pub fn new(from: usize, to: usize) -> Option<Self> {
        (to > from).then_some(Self { from, to })
    }

    pub fn from(&self) -> usize {
        self.from
    }

    pub fn to(&self) -> usize {
        self.to
    }

    pub fn len(&self) -> usize {
        self.to - self.from
    }

    /// Always `false`: spans are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether the span lies inside a document of `doc_len` positions.
    pub fn fits(&self, doc_len: usize) -> bool {
        self.to <= doc_len
    }

    pub fn overlaps(&self, other: &TextSpan) -> bool {
        self.from < other.to && other.from < self.to
    }

    /// Maps the span through an edit. `None` if the edit removed any of it.
    pub fn map_through(&self, change: &DocChange) -> Option<TextSpan> {
        let mut from = self.from as i64;
        let mut to = self.to as i64;

        for r in &change.ranges {
            let removed = r.to_a.saturating_sub(r.from_a);
            let delta = r.inserted_len() as i64 - removed as i64;

            if r.to_a <= self.from {
                from += delta;
                to += delta;
            } else if r.from_a >= self.to {
                // edits are sorted; nothing further can touch us
                break;
            } else if removed == 0 {
                // pure insertion strictly inside the span
                to += delta;
            } else {
                return None;
            }
        }

        if from < 0 {
            return None;
        }
        TextSpan::new(from as usize, to as usize)
    }
}

impl From<TextSpan> for std::ops::Range<usize> {
    fn from(s: TextSpan) -> Self {
        s.from..s.to
    }
}

/// One replaced region of an edit.
///
/// `from_a..to_a` is in pre-edit coordinates, `from_b..to_b` in post-edit
/// coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChangedRange {
    pub from_a: usize,
    pub to_a: usize,
    pub from_b: usize,
    pub to_b: usize,
}

impl ChangedRange {
    pub fn insertion(at: usize, len: usize) -> Self {
        Self {
            from_a: at,
            to_a: at,
            from_b: at,
            to_b: at + len,
        }
    }

    pub fn deletion(from: usize, to: usize) -> Self {
        Self {
            from_a: from,
            to_a: to,
            from_b: from,
            to_b: from,
        }
    }

    pub fn inserted_len(&self) -> usize {
        self.to_b.saturating_sub(self.from_b)
    }

    /// The inserted text's span in post-edit coordinates, if anything was
    /// inserted.
    pub fn inserted(&self) -> Option<TextSpan> {
        TextSpan::new(self.from_b, self.to_b)
    }
}

/// A single host edit: the replaced ranges plus the resulting document
/// version and length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocChange {
    pub version: u64,
    pub doc_len: usize,
    /// Sorted ascending, non-overlapping.
    pub ranges: SmallVec<[ChangedRange; 2]>,
}

impl DocChange {
    pub fn new(version: u64, doc_len: usize, ranges: impl IntoIterator<Item = ChangedRange>) -> Self {
        let mut ranges: SmallVec<[ChangedRange; 2]> = ranges.into_iter().collect();
        ranges.sort_by_key(|r| r.from_a);
        Self {
            version,
            doc_len,
            ranges,
        }
    }

    /// Single insertion of `len` positions at `at`.
    pub fn insertion(version: u64, doc_len: usize, at: usize, len: usize) -> Self {
        Self::new(version, doc_len, [ChangedRange::insertion(at, len)])
    }

    /// Single deletion of `from..to`.
    pub fn deletion(version: u64, doc_len: usize, from: usize, to: usize) -> Self {
        Self::new(version, doc_len, [ChangedRange::deletion(from, to)])
    }

    pub fn inserted_spans(&self) -> impl Iterator<Item = TextSpan> + '_ {
        self.ranges.iter().filter_map(ChangedRange::inserted)
    }
}

/// What the host's document looks like at paint time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct DocumentBounds {
    pub doc_len: usize,
    pub version: u64,
}
