//! Goal tracking - a small fixed set of per-session objectives.
//!
//! Each session carries three goals: cumulative score reached, cumulative
//! lines cleared, cumulative pieces placed. Progress only ever moves toward
//! the target and clamps there; updates after completion are no-ops.
//!
//! Category matching is a fixed keyword association on the goal description
//! ("points" / "lines" / "pieces"), which is also how saved goal triples are
//! re-associated after a load. It is deliberately not a rule engine.

use serde::{Deserialize, Serialize};

/// The fixed progress categories a placement can feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GoalCategory {
    /// Cumulative score.
    Points,
    /// Cumulative lines cleared.
    Lines,
    /// Cumulative pieces placed.
    Pieces,
}

impl GoalCategory {
    /// The description keyword this category matches.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            GoalCategory::Points => "points",
            GoalCategory::Lines => "lines",
            GoalCategory::Pieces => "pieces",
        }
    }
}

/// One session objective.
///
/// Serializes as the `{description, target, progress}` triple the snapshot
/// wire format requires.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// Display text; also carries the category keyword.
    pub description: String,

    /// Progress value at which the goal is complete.
    pub target: u32,

    /// Current progress, always in `0..=target`.
    pub progress: u32,
}

impl Goal {
    /// Create a goal with zero progress.
    #[must_use]
    pub fn new(description: impl Into<String>, target: u32) -> Self {
        Self {
            description: description.into(),
            target,
            progress: 0,
        }
    }

    /// Check whether progress has reached the target.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.progress >= self.target
    }

    /// Does this goal listen to the given category?
    #[must_use]
    pub fn matches(&self, category: GoalCategory) -> bool {
        self.description.contains(category.keyword())
    }

    /// Advance progress, clamped at the target.
    fn advance(&mut self, amount: u32) {
        self.progress = self.progress.saturating_add(amount).min(self.target);
    }
}

/// Tracks all goals for one session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoalTracker {
    goals: Vec<Goal>,
}

impl GoalTracker {
    /// The standard session goals.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            goals: vec![
                Goal::new("Reach 100 points", 100),
                Goal::new("Complete 10 lines", 10),
                Goal::new("Place 20 pieces", 20),
            ],
        }
    }

    /// Rebuild a tracker from saved goal triples.
    #[must_use]
    pub fn from_goals(goals: Vec<Goal>) -> Self {
        Self { goals }
    }

    /// The tracked goals.
    #[must_use]
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// Clone the goals for a snapshot.
    #[must_use]
    pub fn to_goals(&self) -> Vec<Goal> {
        self.goals.clone()
    }

    /// Feed `amount` into every goal matching the category.
    ///
    /// Goals already at target are unaffected.
    pub fn update_progress(&mut self, category: GoalCategory, amount: u32) {
        for goal in self.goals.iter_mut().filter(|g| g.matches(category)) {
            goal.advance(amount);
        }
    }

    /// Reset every goal to zero progress.
    pub fn reset(&mut self) {
        for goal in &mut self.goals {
            goal.progress = 0;
        }
    }

    /// Iterate over completed goals.
    pub fn completed(&self) -> impl Iterator<Item = &Goal> {
        self.goals.iter().filter(|g| g.is_completed())
    }

    /// Check whether every goal is complete.
    #[must_use]
    pub fn all_completed(&self) -> bool {
        self.goals.iter().all(Goal::is_completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_goals() {
        let tracker = GoalTracker::standard();

        assert_eq!(tracker.goals().len(), 3);
        assert!(tracker.goals()[0].matches(GoalCategory::Points));
        assert!(tracker.goals()[1].matches(GoalCategory::Lines));
        assert!(tracker.goals()[2].matches(GoalCategory::Pieces));
        assert!(!tracker.all_completed());
    }

    #[test]
    fn test_update_targets_matching_goal_only() {
        let mut tracker = GoalTracker::standard();

        tracker.update_progress(GoalCategory::Pieces, 5);

        assert_eq!(tracker.goals()[0].progress, 0);
        assert_eq!(tracker.goals()[1].progress, 0);
        assert_eq!(tracker.goals()[2].progress, 5);
    }

    #[test]
    fn test_progress_clamps_at_target() {
        let mut tracker = GoalTracker::standard();

        tracker.update_progress(GoalCategory::Lines, 7);
        tracker.update_progress(GoalCategory::Lines, 7);

        let lines = &tracker.goals()[1];
        assert_eq!(lines.progress, 10);
        assert!(lines.is_completed());

        // Idempotent once complete.
        tracker.update_progress(GoalCategory::Lines, 100);
        assert_eq!(tracker.goals()[1].progress, 10);
    }

    #[test]
    fn test_reset() {
        let mut tracker = GoalTracker::standard();
        tracker.update_progress(GoalCategory::Points, 50);
        tracker.update_progress(GoalCategory::Pieces, 3);

        tracker.reset();

        assert!(tracker.goals().iter().all(|g| g.progress == 0));
    }

    #[test]
    fn test_all_completed() {
        let mut tracker = GoalTracker::standard();
        tracker.update_progress(GoalCategory::Points, 100);
        tracker.update_progress(GoalCategory::Lines, 10);
        assert!(!tracker.all_completed());
        assert_eq!(tracker.completed().count(), 2);

        tracker.update_progress(GoalCategory::Pieces, 20);
        assert!(tracker.all_completed());
    }

    #[test]
    fn test_from_goals_reassociates_by_keyword() {
        let saved = vec![
            Goal {
                description: "Reach 100 points".into(),
                target: 100,
                progress: 42,
            },
            Goal {
                description: "Complete 10 lines".into(),
                target: 10,
                progress: 10,
            },
        ];
        let mut tracker = GoalTracker::from_goals(saved);

        tracker.update_progress(GoalCategory::Points, 8);
        assert_eq!(tracker.goals()[0].progress, 50);
        // Already-complete goal stays clamped.
        tracker.update_progress(GoalCategory::Lines, 3);
        assert_eq!(tracker.goals()[1].progress, 10);
    }

    #[test]
    fn test_goal_serde_triple() {
        let goal = Goal {
            description: "Complete 10 lines".into(),
            target: 10,
            progress: 4,
        };
        let json = serde_json::to_string(&goal).unwrap();
        assert_eq!(
            json,
            r#"{"description":"Complete 10 lines","target":10,"progress":4}"#
        );

        let back: Goal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, goal);
    }
}
