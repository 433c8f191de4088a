//! Participant service
//!
//! Manages the roster stored in `config.json`. Roster changes are saved
//! immediately and audit-logged.

use crate::audit::AuditEvent;
use crate::config::Settings;
use crate::error::{MessbookError, MessbookResult};
use crate::models::{Roster, RosterError};
use crate::storage::Storage;

/// Service for roster management
pub struct ParticipantService<'a> {
    storage: &'a Storage,
    settings: &'a mut Settings,
}

impl<'a> ParticipantService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a mut Settings) -> Self {
        Self { storage, settings }
    }

    /// The current roster, in order
    pub fn list(&self) -> &Roster {
        self.settings.roster()
    }

    /// Add a participant to the end of the roster
    pub fn add(&mut self, name: &str) -> MessbookResult<String> {
        let before = self.settings.participants.clone();

        self.settings.participants.push(name).map_err(|e| match e {
            RosterError::BlankLabel => MessbookError::Validation(e.to_string()),
            RosterError::Duplicate(existing) => MessbookError::Duplicate {
                entity_type: "Participant",
                identifier: existing,
            },
        })?;
        let added = name.trim().to_string();

        if let Err(e) = self.settings.save(self.storage.paths()) {
            self.settings.participants = before;
            return Err(e);
        }

        self.storage.record(AuditEvent::ParticipantAdded {
            name: added.clone(),
        })?;

        tracing::info!(participant = %added, "added participant");
        Ok(added)
    }

    /// Remove a participant from the roster
    ///
    /// Refused while the participant still has recorded expenses, since those
    /// would silently drop out of every summary.
    pub fn remove(&mut self, name: &str) -> MessbookResult<String> {
        let label = self
            .settings
            .roster()
            .resolve(name)
            .map(str::to_string)
            .ok_or_else(|| MessbookError::participant_not_found(name.trim()))?;

        let recorded = self.storage.expenses.get_by_participant(&label)?.len();
        if recorded > 0 {
            return Err(MessbookError::Validation(format!(
                "{} still has {} recorded expense(s); delete or reassign them first",
                label, recorded
            )));
        }

        let before = self.settings.participants.clone();
        self.settings.participants.remove(&label);

        if let Err(e) = self.settings.save(self.storage.paths()) {
            self.settings.participants = before;
            return Err(e);
        }

        self.storage.record(AuditEvent::ParticipantRemoved {
            name: label.clone(),
        })?;

        tracing::info!(participant = %label, "removed participant");
        Ok(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MessbookPaths;
    use crate::models::{Expense, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = MessbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_add_participants() {
        let (_temp_dir, storage) = create_test_storage();
        let mut settings = Settings::default();
        let mut service = ParticipantService::new(&storage, &mut settings);

        service.add("Akash").unwrap();
        service.add("  Suman ").unwrap();

        let names: Vec<_> = service.list().iter().collect();
        assert_eq!(names, vec!["Akash", "Suman"]);

        // Persisted
        let reloaded = Settings::load_or_create(storage.paths()).unwrap();
        assert_eq!(reloaded.roster().len(), 2);

        let audit = storage.audit().entries().unwrap();
        assert_eq!(audit.len(), 2);
        assert_eq!(
            audit[1].event,
            AuditEvent::ParticipantAdded {
                name: "Suman".into()
            }
        );
    }

    #[test]
    fn test_add_rejects_blank_and_duplicate() {
        let (_temp_dir, storage) = create_test_storage();
        let mut settings = Settings::default();
        let mut service = ParticipantService::new(&storage, &mut settings);

        service.add("Akash").unwrap();

        assert!(service.add("   ").unwrap_err().is_validation());
        assert!(matches!(
            service.add("AKASH").unwrap_err(),
            MessbookError::Duplicate { .. }
        ));
        assert_eq!(service.list().len(), 1);
    }

    #[test]
    fn test_remove_participant() {
        let (_temp_dir, storage) = create_test_storage();
        let mut settings = Settings::default();
        let mut service = ParticipantService::new(&storage, &mut settings);

        service.add("Akash").unwrap();
        service.add("Suman").unwrap();

        assert_eq!(service.remove("suman").unwrap(), "Suman");
        assert!(service.remove("Nobody").unwrap_err().is_not_found());

        let audit = storage.audit().latest(1).unwrap();
        assert_eq!(
            audit[0].event,
            AuditEvent::ParticipantRemoved {
                name: "Suman".into()
            }
        );
    }

    #[test]
    fn test_remove_refused_with_expenses() {
        let (_temp_dir, storage) = create_test_storage();
        let mut settings = Settings::default();
        let mut service = ParticipantService::new(&storage, &mut settings);

        service.add("Akash").unwrap();
        storage
            .expenses
            .upsert(Expense::new(
                "Akash",
                "Rice",
                Money::from_cents(45000),
                NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            ))
            .unwrap();

        assert!(service.remove("Akash").unwrap_err().is_validation());
        assert!(service.list().contains("Akash"));
    }
}
