//! Bounded position history for each body
//!
//! A trail is a FIFO of recent positions, most recent last. Its capacity is
//! not stored: every push receives the current maximum length, so lowering
//! the limit only takes effect at the next push.

use std::collections::VecDeque;

use serde::Serialize;

use super::states::NVec3;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Trail {
    points: VecDeque<NVec3>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `p` and evict from the front until at most `max_len` remain
    pub fn push(&mut self, p: NVec3, max_len: usize) {
        self.points.push_back(p);
        while self.points.len() > max_len {
            self.points.pop_front();
        }
    }

    /// Same as [`Trail::push`] but leaves `self` untouched
    pub fn pushed(&self, p: NVec3, max_len: usize) -> Self {
        let mut next = self.clone();
        next.push(p, max_len);
        next
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&NVec3> {
        self.points.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NVec3> {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64) -> NVec3 {
        NVec3::new(x, 0.0, 0.0)
    }

    #[test]
    fn evicts_oldest_first() {
        let mut trail = Trail::new();
        for i in 0..5 {
            trail.push(p(i as f64), 3);
        }
        let xs: Vec<f64> = trail.iter().map(|q| q.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn pushed_does_not_mutate_original() {
        let mut trail = Trail::new();
        trail.push(p(1.0), 10);
        let next = trail.pushed(p(2.0), 10);
        assert_eq!(trail.len(), 1);
        assert_eq!(next.len(), 2);
        assert_eq!(next.last(), Some(&p(2.0)));
    }

    #[test]
    fn shrinking_limit_truncates_on_next_push() {
        let mut trail = Trail::new();
        for i in 0..10 {
            trail.push(p(i as f64), 10);
        }
        assert_eq!(trail.len(), 10);

        // nothing happens until the next push
        trail.push(p(10.0), 4);
        assert_eq!(trail.len(), 4);
        assert_eq!(trail.iter().next(), Some(&p(7.0)));
        assert_eq!(trail.last(), Some(&p(10.0)));
    }
}
