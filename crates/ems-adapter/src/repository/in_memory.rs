//! In-Memory Repository Implementation
//!
//! Simple in-memory implementation of the employee store.
//! Useful for testing and development.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use ems_domain::model::employee::{Employee, EmployeeId};
use ems_domain::repository::employee_repository::{EmployeeRepository, RepositoryError};

/// Rows plus the id sequence, guarded by one lock so that assigning an id
/// and inserting the row happen atomically.
#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<EmployeeId, Employee>,
}

/// In-memory Employee Repository
///
/// Thread-safe implementation using RwLock. Clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEmployeeRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryEmployeeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Table>, RepositoryError> {
        self.table
            .read()
            .map_err(|_| RepositoryError::persistence("Failed to acquire read lock"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Table>, RepositoryError> {
        self.table
            .write()
            .map_err(|_| RepositoryError::persistence("Failed to acquire write lock"))
    }
}

impl EmployeeRepository for InMemoryEmployeeRepository {
    fn find_all(&self) -> Result<Vec<Employee>, RepositoryError> {
        let table = self.read()?;
        Ok(table.rows.values().cloned().collect())
    }

    fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        let table = self.read()?;
        Ok(table.rows.get(&id).cloned())
    }

    fn save(&self, employee: Employee) -> Result<Employee, RepositoryError> {
        let mut table = self.write()?;
        let id = match employee.id() {
            Some(id) => {
                // Keep the sequence ahead of explicitly supplied ids
                table.last_id = table.last_id.max(id.value());
                id
            }
            None => {
                table.last_id += 1;
                EmployeeId::new(table.last_id)
            }
        };
        let employee = employee.with_id(id);
        table.rows.insert(id, employee.clone());
        Ok(employee)
    }

    fn update(&self, employee: Employee) -> Result<Option<Employee>, RepositoryError> {
        let Some(id) = employee.id() else {
            return Ok(None);
        };
        let mut table = self.write()?;
        let Some(row) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        *row = employee.clone();
        Ok(Some(employee))
    }

    fn delete(&self, employee: &Employee) -> Result<(), RepositoryError> {
        let Some(id) = employee.id() else {
            return Ok(());
        };
        let mut table = self.write()?;
        table.rows.remove(&id);
        Ok(())
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.read()?.rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn john() -> Employee {
        Employee::new("John", "Doe", "john.doe@example.com")
    }

    #[test]
    fn test_save_then_find_by_id() {
        let repo = InMemoryEmployeeRepository::new();

        let saved = repo.save(john()).unwrap();
        let id = saved.id().expect("saved employee has an id");

        assert_eq!(repo.find_by_id(id).unwrap(), Some(saved));
    }

    #[test]
    fn test_find_all_returns_every_saved_record() {
        let repo = InMemoryEmployeeRepository::new();

        let saved: Vec<Employee> = ["Ann", "Bob", "Cid"]
            .iter()
            .map(|name| {
                repo.save(Employee::new(*name, "Smith", format!("{name}@example.com")))
                    .unwrap()
            })
            .collect();

        assert_eq!(repo.find_all().unwrap(), saved);
        assert_eq!(repo.count().unwrap(), 3);
    }

    #[test]
    fn test_save_with_id_overwrites() {
        let repo = InMemoryEmployeeRepository::new();
        let mut saved = repo.save(john()).unwrap();

        saved.apply_details("Johnny", "Doe", "johnny@example.com");
        let resaved = repo.save(saved.clone()).unwrap();

        assert_eq!(resaved, saved);
        assert_eq!(repo.find_all().unwrap(), vec![saved]);
    }

    #[test]
    fn test_update_never_inserts() {
        let repo = InMemoryEmployeeRepository::new();
        let mut saved = repo.save(john()).unwrap();
        saved.apply_details("Johnny", "Doe", "johnny@example.com");

        assert_eq!(repo.update(saved.clone()).unwrap(), Some(saved.clone()));
        assert_eq!(repo.find_all().unwrap(), vec![saved.clone()]);

        repo.delete(&saved).unwrap();
        assert_eq!(repo.update(saved).unwrap(), None);
        assert_eq!(repo.update(john()).unwrap(), None);
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let repo = InMemoryEmployeeRepository::new();

        let first = repo.save(john()).unwrap();
        repo.delete(&first).unwrap();
        let second = repo.save(john()).unwrap();

        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_sequence_skips_explicit_ids() {
        let repo = InMemoryEmployeeRepository::new();

        repo.save(john().with_id(EmployeeId::new(10))).unwrap();
        let next = repo.save(john()).unwrap();

        assert_eq!(next.id(), Some(EmployeeId::new(11)));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let repo = InMemoryEmployeeRepository::new();
        let saved = repo.save(john()).unwrap();
        let id = saved.id().unwrap();

        repo.delete(&saved).unwrap();
        repo.delete(&saved).unwrap();
        repo.delete(&john()).unwrap();

        assert_eq!(repo.find_by_id(id).unwrap(), None);
    }

    #[test]
    fn test_clones_share_state() {
        let repo = InMemoryEmployeeRepository::new();
        let other = repo.clone();

        let saved = repo.save(john()).unwrap();

        assert_eq!(other.find_by_id(saved.id().unwrap()).unwrap(), Some(saved));
    }

    #[test]
    fn test_concurrent_inserts_get_distinct_ids() {
        let repo = InMemoryEmployeeRepository::new();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = repo.clone();
                thread::spawn(move || {
                    (0..25)
                        .map(|_| repo.save(john()).unwrap().id().unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<EmployeeId> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort();
        ids.dedup();

        assert_eq!(ids.len(), 200);
        assert_eq!(repo.count().unwrap(), 200);
    }
}
