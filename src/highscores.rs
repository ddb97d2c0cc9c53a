//! Session leaderboard and medals
//!
//! Kept in memory only; tracks the top 10 rounds of the current process.

use serde::{Deserialize, Serialize};

use crate::sim::RoundResult;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Medal awarded on the game-over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Medal {
    Bronze,
    Silver,
    Gold,
}

impl Medal {
    /// Bronze from 5, silver from 10, gold from 20
    pub fn for_score(score: u32) -> Option<Self> {
        match score {
            20.. => Some(Medal::Gold),
            10..=19 => Some(Medal::Silver),
            5..=9 => Some(Medal::Bronze),
            _ => None,
        }
    }
}

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    pub stars: u32,
    /// Ticks survived
    pub ticks: u64,
    /// Round number within the session
    pub round: u32,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Record a finished round. Returns the rank achieved (1-indexed) or None
    /// if it didn't qualify.
    pub fn record(&mut self, result: &RoundResult, round: u32) -> Option<usize> {
        if !self.qualifies(result.score) {
            return None;
        }

        let entry = HighScoreEntry {
            score: result.score,
            stars: result.stars,
            ticks: result.ticks,
            round,
        };

        // Sorted descending by score; ties keep the earlier round first
        let pos = self.entries.iter().position(|e| result.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);
        log::info!("Round {} placed #{} with {}", round, rank, result.score);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::CrashCause;

    fn result(score: u32) -> RoundResult {
        RoundResult {
            score,
            stars: score / 5,
            ticks: 600,
            cause: CrashCause::Ground,
            medal: Medal::for_score(score),
        }
    }

    #[test]
    fn test_medal_thresholds() {
        assert_eq!(Medal::for_score(4), None);
        assert_eq!(Medal::for_score(5), Some(Medal::Bronze));
        assert_eq!(Medal::for_score(9), Some(Medal::Bronze));
        assert_eq!(Medal::for_score(10), Some(Medal::Silver));
        assert_eq!(Medal::for_score(19), Some(Medal::Silver));
        assert_eq!(Medal::for_score(20), Some(Medal::Gold));
        assert_eq!(Medal::for_score(300), Some(Medal::Gold));
    }

    #[test]
    fn test_zero_never_qualifies() {
        let mut scores = HighScores::new();
        assert_eq!(scores.record(&result(0), 1), None);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_ranks_sorted_descending() {
        let mut scores = HighScores::new();
        assert_eq!(scores.record(&result(10), 1), Some(1));
        assert_eq!(scores.record(&result(30), 2), Some(1));
        assert_eq!(scores.record(&result(20), 3), Some(2));
        assert_eq!(scores.record(&result(20), 4), Some(3));
        let order: Vec<_> = scores.entries.iter().map(|e| (e.score, e.round)).collect();
        assert_eq!(order, vec![(30, 2), (20, 3), (20, 4), (10, 1)]);
        assert_eq!(scores.top_score(), Some(30));
    }

    #[test]
    fn test_board_is_capped() {
        let mut scores = HighScores::new();
        for i in 1..=15 {
            scores.record(&result(i), i);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(6));
        assert!(!scores.qualifies(6));
        assert!(scores.qualifies(7));
    }
}
