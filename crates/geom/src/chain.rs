use crate::Point;

use core::iter::FusedIterator;

/// Iterates over the points of a single contour within a store holding the
/// points of several contours.
///
/// Only the points whose `chain` matches the filter are yielded, in store
/// order. The iterator borrows the store and never copies it. It stops at an
/// explicit `end` position, which can be used to restrict it to a range of
/// the store.
///
/// The iterator is always positioned on the next matching point (or on
/// `end`), so two iterators are equal when they read the same store, with the
/// same filter, and would yield the same remaining points.
#[derive(Clone, Debug)]
pub struct ChainIter<'l> {
    points: &'l [Point],
    pos: usize,
    end: usize,
    chain: u32,
}

/// Iterates over the points of `chain` in `points`.
#[inline]
pub fn chain_iter(points: &[Point], chain: u32) -> ChainIter {
    ChainIter::new(points, chain)
}

impl<'l> ChainIter<'l> {
    pub fn new(points: &'l [Point], chain: u32) -> Self {
        Self::with_range(points, 0, points.len(), chain)
    }

    /// Only considers the points in `start..end`.
    pub fn with_range(points: &'l [Point], start: usize, end: usize, chain: u32) -> Self {
        let end = end.min(points.len());
        let mut iter = ChainIter {
            points,
            pos: start.min(end),
            end,
            chain,
        };
        iter.skip_filtered();

        iter
    }

    /// Store offset of the next point, or the end position.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    #[inline]
    pub fn chain(&self) -> u32 {
        self.chain
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.pos == self.end
    }

    fn skip_filtered(&mut self) {
        while self.pos < self.end && self.points[self.pos].chain != self.chain {
            self.pos += 1;
        }
    }
}

impl<'l> Iterator for ChainIter<'l> {
    type Item = &'l Point;

    fn next(&mut self) -> Option<&'l Point> {
        if self.pos >= self.end {
            return None;
        }

        let p = &self.points[self.pos];
        self.pos += 1;
        self.skip_filtered();

        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.pos;
        (remaining.min(1), Some(remaining))
    }
}

impl<'l> FusedIterator for ChainIter<'l> {}

impl<'l> PartialEq for ChainIter<'l> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.points, other.points)
            && self.pos == other.pos
            && self.end == other.end
            && self.chain == other.chain
    }
}

#[cfg(test)]
use crate::point;
#[cfg(test)]
use alloc::vec::Vec;

#[cfg(test)]
fn store() -> Vec<Point> {
    let chains = [0, 1, 1, 0, 2, 0, 1];
    chains
        .iter()
        .enumerate()
        .map(|(i, &chain)| point(i as i32, 0).with_chain(chain))
        .collect()
}

#[test]
fn filters_one_chain() {
    let points = store();

    let xs: Vec<i32> = chain_iter(&points, 0).map(|p| p.x()).collect();
    assert_eq!(xs, [0, 3, 5]);

    let xs: Vec<i32> = chain_iter(&points, 1).map(|p| p.x()).collect();
    assert_eq!(xs, [1, 2, 6]);

    assert_eq!(chain_iter(&points, 7).count(), 0);
    assert!(chain_iter(&points, 7).is_done());
}

#[test]
fn range_and_end_sentinel() {
    let points = store();

    let mut iter = ChainIter::with_range(&points, 1, 5, 0);
    assert_eq!(iter.position(), 3);
    assert_eq!(iter.next().map(|p| p.x()), Some(3));
    assert_eq!(iter.position(), 5);
    assert!(iter.is_done());
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next(), None);
}

#[test]
fn equality() {
    let points = store();
    let other = store();

    let mut a = chain_iter(&points, 1);
    let b = chain_iter(&points, 1);
    assert_eq!(a, b);
    assert_eq!(a, a.clone());

    // Same position, different filter.
    assert_ne!(
        ChainIter::with_range(&points, 7, 7, 0),
        ChainIter::with_range(&points, 7, 7, 2)
    );
    // Same content, different store.
    assert_ne!(chain_iter(&points, 1), chain_iter(&other, 1));

    a.next();
    assert_ne!(a, b);
    let mut c = b.clone();
    c.next();
    assert_eq!(a, c);
}
