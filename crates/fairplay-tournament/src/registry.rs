//! Isolated tournaments keyed by environment id.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::info;

use fairplay_core::{FairplayError, Result, Schedule};

use crate::tournament::Tournament;

/// Map from environment id to its own [`Tournament`].
///
/// Each tournament sits behind its own mutex, so writers to different
/// environments never contend and no state is shared between them.
///
/// # Example
///
/// ```
/// use fairplay_core::{Court, Round, Schedule, ScheduleMetadata};
/// use fairplay_tournament::TournamentRegistry;
///
/// let schedule = Schedule::new(
///     ScheduleMetadata::default(),
///     vec![Round::new(1, vec![Court::from_ids([1, 2, 3, 4])], vec![])],
/// );
/// let registry = TournamentRegistry::new();
/// registry.create("morning", schedule.clone()).unwrap();
/// registry.create("evening", schedule).unwrap();
///
/// registry
///     .with_tournament("morning", |t| t.submit_score(1, 1, 11, 3))
///     .unwrap()
///     .unwrap();
///
/// let evening = registry.get("evening").unwrap();
/// assert_eq!(evening.lock().unwrap().standings().result_count(), 0);
/// ```
#[derive(Debug, Default)]
pub struct TournamentRegistry {
    environments: RwLock<HashMap<String, Arc<Mutex<Tournament>>>>,
}

impl TournamentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tournament for a new environment id.
    ///
    /// # Errors
    ///
    /// Fails if the schedule is malformed or the id is already taken.
    pub fn create(&self, id: impl Into<String>, schedule: Schedule) -> Result<Arc<Mutex<Tournament>>> {
        let id = id.into();
        let tournament = Arc::new(Mutex::new(Tournament::new(schedule)?));

        let mut environments = self
            .environments
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if environments.contains_key(&id) {
            return Err(FairplayError::InvalidState(format!(
                "environment '{id}' already exists"
            )));
        }
        environments.insert(id.clone(), Arc::clone(&tournament));
        info!(event = "environment_created", environment = %id);
        Ok(tournament)
    }

    pub fn get(&self, id: &str) -> Option<Arc<Mutex<Tournament>>> {
        self.environments
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Runs `f` with exclusive access to one environment's tournament.
    ///
    /// Returns `None` if the environment does not exist.
    pub fn with_tournament<T>(&self, id: &str, f: impl FnOnce(&mut Tournament) -> T) -> Option<T> {
        let tournament = self.get(id)?;
        let mut guard = tournament.lock().unwrap_or_else(PoisonError::into_inner);
        Some(f(&mut guard))
    }

    pub fn remove(&self, id: &str) -> Option<Arc<Mutex<Tournament>>> {
        let removed = self
            .environments
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
        if removed.is_some() {
            info!(event = "environment_removed", environment = %id);
        }
        removed
    }

    /// Environment ids in ascending order.
    pub fn environment_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .environments
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.environments
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairplay_test::{five_player_schedule, reference_schedule};
    use rayon::prelude::*;

    #[test]
    fn test_duplicate_environment_rejected() {
        let registry = TournamentRegistry::new();
        registry.create("a", reference_schedule()).unwrap();

        let err = registry.create("a", reference_schedule()).unwrap_err();
        assert!(matches!(err, FairplayError::InvalidState(_)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_environments_are_isolated() {
        let registry = TournamentRegistry::new();
        registry.create("a", five_player_schedule()).unwrap();
        registry.create("b", five_player_schedule()).unwrap();

        registry
            .with_tournament("a", |t| {
                t.submit_score(1, 1, 11, 5)?;
                t.advance_round()
            })
            .unwrap()
            .unwrap();

        let b = registry
            .with_tournament("b", |t| (t.current_round(), t.standings().result_count()))
            .unwrap();
        assert_eq!(b, (1, 0));

        let a = registry
            .with_tournament("a", |t| (t.current_round(), t.standings().result_count()))
            .unwrap();
        assert_eq!(a, (2, 1));
    }

    #[test]
    fn test_missing_environment() {
        let registry = TournamentRegistry::new();
        assert!(registry.get("nope").is_none());
        assert!(registry.with_tournament("nope", |t| t.current_round()).is_none());
        assert!(registry.remove("nope").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_remove_and_list() {
        let registry = TournamentRegistry::new();
        for id in ["c", "a", "b"] {
            registry.create(id, five_player_schedule()).unwrap();
        }
        assert_eq!(registry.environment_ids(), vec!["a", "b", "c"]);

        assert!(registry.remove("b").is_some());
        assert_eq!(registry.environment_ids(), vec!["a", "c"]);
    }

    #[test]
    fn test_concurrent_writers_on_separate_environments() {
        let registry = TournamentRegistry::new();
        let ids: Vec<String> = (0..8).map(|i| format!("env-{i}")).collect();
        for id in &ids {
            registry.create(id.clone(), reference_schedule()).unwrap();
        }

        ids.par_iter().for_each(|id| {
            registry
                .with_tournament(id, |t| t.submit_round(1, &[(11, 2); 5]))
                .unwrap()
                .unwrap();
        });

        for id in &ids {
            let count = registry
                .with_tournament(id, |t| t.standings().result_count())
                .unwrap();
            assert_eq!(count, 5);
        }
    }
}
