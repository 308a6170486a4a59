use std::fmt::Display;

use anyhow::ensure;
use serde::{Deserialize, Serialize};

use super::typedef::PosType;

/// Inclusive `[start, end]` range on the root sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    start: PosType,
    end:   PosType,
}

impl Span {
    /// Creates a new `Span`.
    pub fn new(
        start: PosType,
        end: PosType,
    ) -> Self {
        assert!(
            start <= end,
            "Start position must be less than or equal to end position"
        );
        Self { start, end }
    }

    /// Creates a new `Span`, failing instead of panicking on reversed bounds.
    pub fn try_new(
        start: PosType,
        end: PosType,
    ) -> anyhow::Result<Self> {
        ensure!(
            start <= end,
            "Span start {} is past its end {}",
            start,
            end
        );
        Ok(Self { start, end })
    }

    /// Converts half-open `[start, end)` parser coordinates into an inclusive
    /// span.
    pub fn from_half_open(
        start: PosType,
        end: PosType,
    ) -> anyhow::Result<Self> {
        ensure!(
            start < end,
            "Empty or reversed interval [{}, {})",
            start,
            end
        );
        Ok(Self {
            start,
            end: end - 1,
        })
    }

    /// Returns the start position.
    pub fn start(&self) -> PosType {
        self.start
    }

    /// Returns the end position (inclusive).
    pub fn end(&self) -> PosType {
        self.end
    }

    /// Returns the length of the span as `end - start`.
    ///
    /// A single-base span therefore has length 0. Lengths are only ever
    /// compared against each other, so the convention is applied uniformly.
    pub fn length(&self) -> PosType {
        self.end - self.start
    }

    /// Checks if `other` lies entirely within this span.
    pub fn contains(
        &self,
        other: &Self,
    ) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    /// Checks if the two spans share at least one position.
    pub fn overlaps(
        &self,
        other: &Self,
    ) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Half-open byte range covered by the span.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end + 1
    }
}

impl Display for Span {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
