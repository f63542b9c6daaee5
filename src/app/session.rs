// app/session.rs

use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Victory,
    Defeat,
    /// Neither hero is dead when the match reports over. Usually the end
    /// screen raced the life totals.
    Draw,
}

impl MatchOutcome {
    /// Decides the outcome from both heroes' remaining life.
    pub fn from_life(local: i32, opponent: i32) -> Self {
        if opponent <= 0 {
            MatchOutcome::Victory
        } else if local <= 0 {
            MatchOutcome::Defeat
        } else {
            MatchOutcome::Draw
        }
    }

    pub fn banner(self) -> &'static str {
        match self {
            MatchOutcome::Victory => "Victory!",
            MatchOutcome::Defeat => "Defeat...",
            MatchOutcome::Draw => "Draw..?",
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchRecord {
    pub outcome: MatchOutcome,
    pub finished_at: DateTime<Local>,
}

/// Results of every match finished since the bot started.
#[derive(Debug, Default, Clone)]
pub struct Session {
    records: Vec<MatchRecord>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: MatchOutcome) -> &MatchRecord {
        self.records.push(MatchRecord {
            outcome,
            finished_at: Local::now(),
        });
        &self.records[self.records.len() - 1]
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn count(&self, outcome: MatchOutcome) -> usize {
        self.records.iter().filter(|r| r.outcome == outcome).count()
    }

    pub fn last(&self) -> Option<&MatchRecord> {
        self.records.last()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} matches: {} won, {} lost, {} drawn",
            self.records.len(),
            self.count(MatchOutcome::Victory),
            self.count(MatchOutcome::Defeat),
            self.count(MatchOutcome::Draw)
        )
    }
}
