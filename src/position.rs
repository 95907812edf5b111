use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
/// The 1-based line and column of a code point.
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The position of the first character of any input.
    pub fn origin() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {} column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A source span, or `Unknown` when no span information is available.
///
/// Ordering is by uncertainty: any known span compares less than `Unknown`,
/// and among known spans the one covering less source compares less.
/// [merge](Location::merge) produces the smallest span containing both
/// operands, treating `Unknown` as the identity.
pub enum Location {
    Unknown,
    Span { start: Position, end: Position },
}

impl Location {
    /// A zero-width span at one position.
    pub fn at(position: Position) -> Self {
        Location::Span {
            start: position,
            end: position,
        }
    }

    pub fn span(start: Position, end: Position) -> Self {
        Location::Span { start, end }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Location::Span { .. })
    }

    pub fn start(&self) -> Option<Position> {
        match self {
            Location::Unknown => None,
            Location::Span { start, .. } => Some(*start),
        }
    }

    pub fn end(&self) -> Option<Position> {
        match self {
            Location::Unknown => None,
            Location::Span { end, .. } => Some(*end),
        }
    }

    /// Replace the start of a known span; turns `Unknown` into a zero-width
    /// span at the given position.
    pub fn with_start(self, position: Position) -> Self {
        match self {
            Location::Unknown => Location::at(position),
            Location::Span { end, .. } => Location::Span {
                start: position,
                end: std::cmp::max(position, end),
            },
        }
    }

    /// The smallest span containing both locations.
    pub fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Location::Unknown, loc) | (loc, Location::Unknown) => loc,
            (
                Location::Span { start: s1, end: e1 },
                Location::Span { start: s2, end: e2 },
            ) => Location::Span {
                start: std::cmp::min(s1, s2),
                end: std::cmp::max(e1, e2),
            },
        }
    }

    fn extent(&self) -> Option<(usize, usize)> {
        match self {
            Location::Unknown => None,
            Location::Span { start, end } => {
                let lines = end.line.saturating_sub(start.line);
                let columns = if lines == 0 {
                    end.column.saturating_sub(start.column)
                } else {
                    end.column
                };
                Some((lines, columns))
            }
        }
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.extent(), other.extent()) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.start().cmp(&other.start())),
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Unknown => write!(f, "unknown location"),
            Location::Span { start, end } if start == end => write!(f, "{}", start),
            Location::Span { start, end } => write!(f, "{} to {}", start, end),
        }
    }
}

#[cfg(test)]
mod __tests__ {
    use super::{Location, Position};

    #[test]
    fn known_spans_come_before_unknown() {
        let span = Location::at(Position::new(3, 9));
        assert!(span < Location::Unknown);
        assert!(Location::Unknown > span);
    }

    #[test]
    fn smaller_spans_come_first() {
        let narrow = Location::span(Position::new(1, 1), Position::new(1, 4));
        let wide = Location::span(Position::new(1, 1), Position::new(2, 2));
        assert!(narrow < wide);
    }

    #[test]
    fn merge_covers_both_operands() {
        let a = Location::span(Position::new(1, 4), Position::new(1, 9));
        let b = Location::span(Position::new(1, 1), Position::new(1, 6));
        let merged = a.merge(b);
        assert_eq!(
            merged,
            Location::span(Position::new(1, 1), Position::new(1, 9))
        );
        assert_eq!(a.merge(Location::Unknown), a);
    }
}
