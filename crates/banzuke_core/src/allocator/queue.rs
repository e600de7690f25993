//! Sorted candidate queue consumed through an explicit cursor.

use crate::draft::ScoredCandidate;

/// Candidates in draft order. Entries are taken either in order from the
/// cursor or by predicate (floor fill); a taken slot becomes `None` and the
/// cursor skips it.
pub(crate) struct CandidateQueue {
    entries: Vec<Option<ScoredCandidate>>,
    cursor: usize,
    remaining: usize,
}

impl CandidateQueue {
    pub fn new(mut candidates: Vec<ScoredCandidate>) -> Self {
        candidates.sort_by(ScoredCandidate::draft_order);
        let remaining = candidates.len();
        Self { entries: candidates.into_iter().map(Some).collect(), cursor: 0, remaining }
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    fn advance(&mut self) {
        while self.cursor < self.entries.len() && self.entries[self.cursor].is_none() {
            self.cursor += 1;
        }
    }

    pub fn take_next(&mut self) -> Option<ScoredCandidate> {
        self.advance();
        let taken = self.entries.get_mut(self.cursor)?.take();
        if taken.is_some() {
            self.remaining -= 1;
        }
        taken
    }

    /// Highest-ordered remaining candidate satisfying `accept`.
    pub fn take_first_where<F>(&mut self, accept: F) -> Option<ScoredCandidate>
    where
        F: Fn(&ScoredCandidate) -> bool,
    {
        self.advance();
        let index = (self.cursor..self.entries.len())
            .find(|&i| self.entries[i].as_ref().is_some_and(&accept))?;
        let taken = self.entries[index].take();
        self.remaining -= 1;
        taken
    }

    pub fn take_up_to(&mut self, n: usize) -> Vec<ScoredCandidate> {
        let mut out = Vec::with_capacity(n.min(self.remaining()));
        while out.len() < n {
            match self.take_next() {
                Some(c) => out.push(c),
                None => break,
            }
        }
        out
    }

    pub fn drain_rest(&mut self) -> Vec<ScoredCandidate> {
        let rest: Vec<ScoredCandidate> = self.entries[self.cursor..].iter_mut().filter_map(Option::take).collect();
        self.cursor = self.entries.len();
        self.remaining = 0;
        rest
    }
}
