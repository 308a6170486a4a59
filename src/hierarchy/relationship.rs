use std::fmt::Display;

use anyhow::{bail, ensure};

use crate::data_structs::Span;

/// Position of one span relative to another.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug)]
pub enum Relationship {
    /// Strictly shorter and contained in the other span.
    Child,
    /// Same span.
    Equal,
    /// Strictly longer and containing the other span.
    Parent,
    /// Overlapping, neither contains the other.
    Partial,
    /// Entirely to the left.
    Before,
    /// Entirely to the right.
    After,
}

impl Relationship {
    /// Relationship seen from the other span.
    pub fn inverse(self) -> Self {
        match self {
            Relationship::Child => Relationship::Parent,
            Relationship::Parent => Relationship::Child,
            Relationship::Before => Relationship::After,
            Relationship::After => Relationship::Before,
            Relationship::Equal => Relationship::Equal,
            Relationship::Partial => Relationship::Partial,
        }
    }
}

impl Display for Relationship {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        let name = match self {
            Relationship::Child => "child",
            Relationship::Equal => "equal",
            Relationship::Parent => "parent",
            Relationship::Partial => "partial",
            Relationship::Before => "before",
            Relationship::After => "after",
        };
        write!(f, "{}", name)
    }
}

/// Classifies `a` relative to `b`.
///
/// Checks run in a fixed precedence: containment (by length), equality,
/// partial overlap, then ordering. Well-formed spans always match one of
/// them; an error means the coordinates are corrupted.
pub fn classify(
    a: &Span,
    b: &Span,
) -> anyhow::Result<Relationship> {
    ensure!(
        a.start() <= a.end() && b.start() <= b.end(),
        "Can not classify reversed spans {} and {}",
        a,
        b
    );
    let (a_len, b_len) = (a.length(), b.length());

    if a_len < b_len && b.contains(a) {
        return Ok(Relationship::Child);
    }
    if a_len == b_len && a == b {
        return Ok(Relationship::Equal);
    }
    if a_len > b_len && a.contains(b) {
        return Ok(Relationship::Parent);
    }
    if (a.start() <= b.start() && a.end() >= b.start())
        || (a.start() <= b.end() && a.end() >= b.end())
    {
        return Ok(Relationship::Partial);
    }
    if a.end() < b.start() {
        return Ok(Relationship::Before);
    }
    if a.start() > b.end() {
        return Ok(Relationship::After);
    }
    bail!("Spans {} and {} have no valid relationship", a, b)
}
