//! SQLite Repository Implementation
//!
//! Durable employee store backed by a single `employees` table whose
//! primary key is assigned by SQLite.
//!
//! # Invariants
//! - The schema exists before the repository is returned.
//! - `AUTOINCREMENT` keeps ids monotonic; deleted ids are never reused.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension, Row};
use thiserror::Error;
use tracing::{debug, info};

use ems_domain::model::employee::{Employee, EmployeeId};
use ems_domain::repository::employee_repository::{EmployeeRepository, RepositoryError};

const SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email_id TEXT NOT NULL
);";

const EMPLOYEE_SELECT_SQL: &str = "SELECT id, first_name, last_name, email_id FROM employees";

/// Errors raised while opening the database
#[derive(Debug, Error)]
pub enum SqliteError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// SQLite Employee Repository
///
/// One connection behind a mutex; every statement runs with the lock held,
/// which serializes writers.
#[derive(Debug)]
pub struct SqliteEmployeeRepository {
    conn: Mutex<Connection>,
}

impl SqliteEmployeeRepository {
    /// Open (or create) a database file and ensure the schema
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SqliteError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        info!(path = %path.display(), "Opened SQLite employee store");
        Self::bootstrap(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self, SqliteError> {
        let conn = Connection::open_in_memory()?;
        debug!("Opened in-memory SQLite employee store");
        Self::bootstrap(conn)
    }

    fn bootstrap(conn: Connection) -> Result<Self, SqliteError> {
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, RepositoryError> {
        self.conn
            .lock()
            .map_err(|_| RepositoryError::persistence("Failed to acquire connection lock"))
    }
}

fn db_error(err: rusqlite::Error) -> RepositoryError {
    RepositoryError::persistence(err.to_string())
}

fn row_to_employee(row: &Row<'_>) -> rusqlite::Result<Employee> {
    let id: i64 = row.get(0)?;
    let first_name: String = row.get(1)?;
    let last_name: String = row.get(2)?;
    let email_id: String = row.get(3)?;
    Ok(Employee::new(first_name, last_name, email_id).with_id(EmployeeId::new(id)))
}

impl EmployeeRepository for SqliteEmployeeRepository {
    fn find_all(&self) -> Result<Vec<Employee>, RepositoryError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} ORDER BY id"))
            .map_err(db_error)?;
        let rows = stmt.query_map([], row_to_employee).map_err(db_error)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(db_error)
    }

    fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        let conn = self.lock()?;
        conn.query_row(
            &format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1"),
            params![id.value()],
            row_to_employee,
        )
        .optional()
        .map_err(db_error)
    }

    fn save(&self, employee: Employee) -> Result<Employee, RepositoryError> {
        let conn = self.lock()?;
        match employee.id() {
            None => {
                conn.execute(
                    "INSERT INTO employees (first_name, last_name, email_id) VALUES (?1, ?2, ?3)",
                    params![employee.first_name(), employee.last_name(), employee.email_id()],
                )
                .map_err(db_error)?;
                let id = EmployeeId::new(conn.last_insert_rowid());
                debug!(%id, "Inserted employee");
                Ok(employee.with_id(id))
            }
            Some(id) => {
                conn.execute(
                    "INSERT INTO employees (id, first_name, last_name, email_id)
                     VALUES (?1, ?2, ?3, ?4)
                     ON CONFLICT(id) DO UPDATE SET
                        first_name = excluded.first_name,
                        last_name = excluded.last_name,
                        email_id = excluded.email_id",
                    params![
                        id.value(),
                        employee.first_name(),
                        employee.last_name(),
                        employee.email_id()
                    ],
                )
                .map_err(db_error)?;
                debug!(%id, "Upserted employee");
                Ok(employee)
            }
        }
    }

    fn update(&self, employee: Employee) -> Result<Option<Employee>, RepositoryError> {
        let Some(id) = employee.id() else {
            return Ok(None);
        };
        let conn = self.lock()?;
        let changed = conn
            .execute(
                "UPDATE employees SET first_name = ?2, last_name = ?3, email_id = ?4 WHERE id = ?1",
                params![
                    id.value(),
                    employee.first_name(),
                    employee.last_name(),
                    employee.email_id()
                ],
            )
            .map_err(db_error)?;
        debug!(%id, changed, "Updated employee");
        Ok((changed > 0).then_some(employee))
    }

    fn delete(&self, employee: &Employee) -> Result<(), RepositoryError> {
        let Some(id) = employee.id() else {
            return Ok(());
        };
        let conn = self.lock()?;
        let removed = conn
            .execute("DELETE FROM employees WHERE id = ?1", params![id.value()])
            .map_err(db_error)?;
        debug!(%id, removed, "Deleted employee");
        Ok(())
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))
            .map_err(db_error)?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn john() -> Employee {
        Employee::new("John", "Doe", "john.doe@example.com")
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let repo = SqliteEmployeeRepository::open_in_memory().unwrap();

        let first = repo.save(john()).unwrap();
        let second = repo
            .save(Employee::new("Jane", "Roe", "jane.roe@example.com"))
            .unwrap();

        assert_eq!(first.id(), Some(EmployeeId::new(1)));
        assert_eq!(second.id(), Some(EmployeeId::new(2)));
        assert_eq!(repo.find_all().unwrap(), vec![first, second]);
    }

    #[test]
    fn test_find_by_id_round_trip() {
        let repo = SqliteEmployeeRepository::open_in_memory().unwrap();

        let saved = repo.save(john()).unwrap();

        assert_eq!(repo.find_by_id(saved.id().unwrap()).unwrap(), Some(saved));
        assert_eq!(repo.find_by_id(EmployeeId::new(99)).unwrap(), None);
    }

    #[test]
    fn test_update_replaces_row() {
        let repo = SqliteEmployeeRepository::open_in_memory().unwrap();
        let mut saved = repo.save(john()).unwrap();

        saved.apply_details("Johnny", "Doe", "johnny@example.com");
        repo.save(saved.clone()).unwrap();

        assert_eq!(repo.count().unwrap(), 1);
        assert_eq!(repo.find_by_id(saved.id().unwrap()).unwrap(), Some(saved));
    }

    #[test]
    fn test_update_missing_row_inserts_nothing() {
        let repo = SqliteEmployeeRepository::open_in_memory().unwrap();
        let mut saved = repo.save(john()).unwrap();
        saved.apply_details("Johnny", "Doe", "johnny@example.com");

        assert_eq!(repo.update(saved.clone()).unwrap(), Some(saved.clone()));
        assert_eq!(repo.find_by_id(saved.id().unwrap()).unwrap(), Some(saved.clone()));

        repo.delete(&saved).unwrap();
        assert_eq!(repo.update(saved).unwrap(), None);
        assert_eq!(
            repo.update(john().with_id(EmployeeId::new(42))).unwrap(),
            None
        );
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_delete_then_missing() {
        let repo = SqliteEmployeeRepository::open_in_memory().unwrap();
        let saved = repo.save(john()).unwrap();
        let id = saved.id().unwrap();

        repo.delete(&saved).unwrap();
        // second delete is a no-op
        repo.delete(&saved).unwrap();

        assert_eq!(repo.find_by_id(id).unwrap(), None);
        let next = repo.save(john()).unwrap();
        assert_ne!(next.id(), Some(id));
    }

    #[test]
    fn test_file_database_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ems.db");

        let saved = {
            let repo = SqliteEmployeeRepository::open(&path).unwrap();
            repo.save(john()).unwrap()
        };

        let reopened = SqliteEmployeeRepository::open(&path).unwrap();
        assert_eq!(reopened.find_all().unwrap(), vec![saved]);
    }

    #[test]
    fn test_open_invalid_path_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("ems.db");

        assert!(SqliteEmployeeRepository::open(&path).is_err());
    }
}
