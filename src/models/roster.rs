//! Participant roster
//!
//! The ordered, duplicate-free list of people who share expenses. The roster
//! is the denominator of the equal share, so its order also fixes the order in
//! which participants are reported.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered set of unique participant labels
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Roster(Vec<String>);

impl Roster {
    /// Build a roster, trimming labels and rejecting blanks and duplicates
    pub fn new<I, S>(labels: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut roster = Self::default();
        for label in labels {
            roster.push(label)?;
        }
        Ok(roster)
    }

    /// Append a participant to the end of the roster
    pub fn push(&mut self, label: impl Into<String>) -> Result<(), RosterError> {
        let label = label.into().trim().to_string();
        if label.is_empty() {
            return Err(RosterError::BlankLabel);
        }
        if let Some(existing) = self.resolve(&label) {
            return Err(RosterError::Duplicate(existing.to_string()));
        }
        self.0.push(label);
        Ok(())
    }

    /// Remove a participant, returning the roster's spelling of the label
    pub fn remove(&mut self, label: &str) -> Option<String> {
        let index = self.position(label)?;
        Some(self.0.remove(index))
    }

    /// Find the roster's spelling of a label (case-insensitive)
    pub fn resolve(&self, label: &str) -> Option<&str> {
        self.position(label).map(|i| self.0[i].as_str())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.position(label).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    fn position(&self, label: &str) -> Option<usize> {
        let label = label.trim();
        self.0.iter().position(|l| l.eq_ignore_ascii_case(label))
    }
}

impl TryFrom<Vec<String>> for Roster {
    type Error = RosterError;

    fn try_from(labels: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(labels)
    }
}

impl From<Roster> for Vec<String> {
    fn from(roster: Roster) -> Self {
        roster.0
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Roster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

/// Errors raised while building a roster
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    BlankLabel,
    Duplicate(String),
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankLabel => write!(f, "Participant name cannot be blank"),
            Self::Duplicate(label) => write!(f, "Participant listed twice: {}", label),
        }
    }
}

impl std::error::Error for RosterError {}
