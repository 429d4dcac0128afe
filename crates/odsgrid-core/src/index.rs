//! Index selectors for addressing children of a spreadsheet node
//!
//! One [`Index`] addresses one level of nesting (tables of a spreadsheet, rows
//! of a table, cells of a row). A path of indices walks down the levels, see
//! [`crate::view::Indexable::select`].

use crate::error::{Error, Result};
use std::fmt;
use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo};

/// A selector for the children of one node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Index {
    /// A single child; negative values count back from the last child
    Position(isize),
    /// A run of children
    Slice(Slice),
    /// A textual key, interpreted by the level it is applied to
    ///
    /// Spreadsheets read it as a table name, tables as a cell address ("B3") or
    /// range ("A1:C5"), rows as column letters ("B") or a column span ("B:D").
    Name(String),
}

impl Index {
    /// Shorthand for [`Index::Name`]
    pub fn name<S: Into<String>>(name: S) -> Self {
        Index::Name(name.into())
    }

    /// Shorthand for [`Index::Slice`]
    pub fn slice(start: Option<isize>, stop: Option<isize>, step: Option<isize>) -> Self {
        Index::Slice(Slice::new(start, stop, step))
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Index::Position(i) => write!(f, "{}", i),
            Index::Slice(s) => write!(f, "{}", s),
            Index::Name(n) => write!(f, "{:?}", n),
        }
    }
}

impl From<isize> for Index {
    fn from(i: isize) -> Self {
        Index::Position(i)
    }
}

impl From<i32> for Index {
    fn from(i: i32) -> Self {
        Index::Position(i as isize)
    }
}

impl From<usize> for Index {
    fn from(i: usize) -> Self {
        Index::Position(i as isize)
    }
}

impl From<&str> for Index {
    fn from(s: &str) -> Self {
        Index::Name(s.to_string())
    }
}

impl From<String> for Index {
    fn from(s: String) -> Self {
        Index::Name(s)
    }
}

impl From<Slice> for Index {
    fn from(s: Slice) -> Self {
        Index::Slice(s)
    }
}

impl From<Range<isize>> for Index {
    fn from(r: Range<isize>) -> Self {
        Index::Slice(Slice::new(Some(r.start), Some(r.end), None))
    }
}

impl From<RangeInclusive<isize>> for Index {
    fn from(r: RangeInclusive<isize>) -> Self {
        let (start, end) = r.into_inner();
        // `..=-1` means "through the last child"
        let stop = match end {
            -1 => None,
            end => end.checked_add(1),
        };
        Index::Slice(Slice::new(Some(start), stop, None))
    }
}

impl From<RangeFrom<isize>> for Index {
    fn from(r: RangeFrom<isize>) -> Self {
        Index::Slice(Slice::new(Some(r.start), None, None))
    }
}

impl From<RangeTo<isize>> for Index {
    fn from(r: RangeTo<isize>) -> Self {
        Index::Slice(Slice::new(None, Some(r.end), None))
    }
}

impl From<RangeFull> for Index {
    fn from(_: RangeFull) -> Self {
        Index::Slice(Slice::full())
    }
}

/// A slice with optional bounds and step, following the usual sequence-slice
/// rules: negative bounds count from the end, out-of-range bounds clamp, and a
/// negative step walks backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slice {
    pub start: Option<isize>,
    pub stop: Option<isize>,
    pub step: Option<isize>,
}

impl Slice {
    pub fn new(start: Option<isize>, stop: Option<isize>, step: Option<isize>) -> Self {
        Self { start, stop, step }
    }

    /// Every child, in order
    pub fn full() -> Self {
        Self::default()
    }

    /// Children `start..stop` with a step of one
    pub fn range(start: usize, stop: usize) -> Self {
        Self::new(Some(start as isize), Some(stop as isize), None)
    }

    /// Resolve against a sequence of `len` children, giving concrete positions
    pub fn indices(&self, len: usize) -> Result<Vec<usize>> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(Error::ZeroStep);
        }

        let len = len as isize;
        let (lower, upper) = if step < 0 { (-1, len - 1) } else { (0, len) };

        let clamp = |bound: Option<isize>, default: isize| match bound {
            None => default,
            Some(b) if b < 0 => (b + len).max(lower),
            Some(b) => b.min(upper),
        };

        let start = clamp(self.start, if step < 0 { upper } else { lower });
        let stop = clamp(self.stop, if step < 0 { lower } else { upper });

        let mut out = Vec::new();
        let mut next = Some(start);
        while let Some(i) = next {
            let in_bounds = if step > 0 { i < stop } else { i > stop };
            if !in_bounds {
                break;
            }
            out.push(i as usize);
            next = i.checked_add(step);
        }
        Ok(out)
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let part = |v: Option<isize>| v.map(|v| v.to_string()).unwrap_or_default();
        write!(f, "{}:{}", part(self.start), part(self.stop))?;
        if let Some(step) = self.step {
            write!(f, ":{}", step)?;
        }
        Ok(())
    }
}

/// Resolve a possibly negative position against `len` children
pub(crate) fn resolve_position(index: isize, len: usize, element: &'static str) -> Result<usize> {
    let resolved = if index < 0 {
        index + len as isize
    } else {
        index
    };
    if resolved < 0 || resolved >= len as isize {
        return Err(Error::IndexOutOfRange {
            index,
            len,
            element,
        });
    }
    Ok(resolved as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_slice_defaults() {
        assert_eq!(Slice::full().indices(4).unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(Slice::full().indices(0).unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn test_slice_bounds_clamp() {
        assert_eq!(Slice::range(1, 3).indices(5).unwrap(), vec![1, 2]);
        assert_eq!(Slice::range(3, 100).indices(5).unwrap(), vec![3, 4]);
        assert_eq!(Slice::range(10, 20).indices(5).unwrap(), Vec::<usize>::new());
        assert_eq!(
            Slice::new(Some(-2), None, None).indices(5).unwrap(),
            vec![3, 4]
        );
        assert_eq!(
            Slice::new(Some(-100), Some(2), None).indices(5).unwrap(),
            vec![0, 1]
        );
    }

    #[test]
    fn test_slice_steps() {
        assert_eq!(
            Slice::new(None, None, Some(2)).indices(5).unwrap(),
            vec![0, 2, 4]
        );
        assert_eq!(
            Slice::new(None, None, Some(-1)).indices(4).unwrap(),
            vec![3, 2, 1, 0]
        );
        assert_eq!(
            Slice::new(Some(3), Some(0), Some(-2)).indices(5).unwrap(),
            vec![3, 1]
        );
        assert_eq!(Slice::new(None, None, Some(0)).indices(5), Err(Error::ZeroStep));
    }

    #[test]
    fn test_slice_huge_steps_stop_after_first() {
        assert_eq!(
            Slice::new(Some(1), None, Some(isize::MAX)).indices(5).unwrap(),
            vec![1]
        );
        assert_eq!(
            Slice::new(Some(3), None, Some(isize::MIN)).indices(5).unwrap(),
            vec![3]
        );
        assert_eq!(
            Slice::new(Some(isize::MIN), Some(isize::MAX), None)
                .indices(3)
                .unwrap(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_index_conversions() {
        assert_eq!(Index::from(2i32), Index::Position(2));
        assert_eq!(Index::from(-1isize), Index::Position(-1));
        assert_eq!(Index::from("B3"), Index::Name("B3".into()));
        assert_eq!(Index::from(1isize..3), Index::Slice(Slice::range(1, 3)));
        assert_eq!(
            Index::from(1isize..=2),
            Index::Slice(Slice::new(Some(1), Some(3), None))
        );
        assert_eq!(
            Index::from(-2isize..=-1),
            Index::Slice(Slice::new(Some(-2), None, None))
        );
        assert_eq!(
            Index::from(0isize..=isize::MAX),
            Index::Slice(Slice::new(Some(0), None, None))
        );
        assert_eq!(Index::from(..), Index::Slice(Slice::full()));
        assert_eq!(
            Index::from(..2isize),
            Index::Slice(Slice::new(None, Some(2), None))
        );
    }

    #[test]
    fn test_resolve_position() {
        assert_eq!(resolve_position(0, 3, "row").unwrap(), 0);
        assert_eq!(resolve_position(-1, 3, "row").unwrap(), 2);
        assert_eq!(resolve_position(-3, 3, "row").unwrap(), 0);
        assert!(resolve_position(3, 3, "row").is_err());
        assert!(resolve_position(-4, 3, "row").is_err());
        assert!(resolve_position(0, 0, "row").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Index::from(1isize..3).to_string(), "1:3");
        assert_eq!(Index::slice(None, None, Some(-1)).to_string(), "::-1");
        assert_eq!(Index::from("A1").to_string(), "\"A1\"");
    }
}
