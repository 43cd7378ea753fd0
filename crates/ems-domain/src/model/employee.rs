//! Employee - The single entity managed by EMS
//!
//! An Employee is an Entity: the `id` is assigned by the store on the
//! first save and never changes afterwards. Attributes may be rewritten
//! any number of times by re-saving.

/// Unique identifier for an Employee, assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EmployeeId(i64);

impl EmployeeId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for EmployeeId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Employee record
///
/// Equality is field-by-field: two values are equal only when the id and
/// every attribute match. A store round-trip must therefore reproduce the
/// exact record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    /// `None` until the store persists the record
    id: Option<EmployeeId>,
    first_name: String,
    last_name: String,
    /// Contact email, not required to be unique
    email_id: String,
}

impl Employee {
    /// Create a new, unsaved Employee
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email_id: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email_id: email_id.into(),
        }
    }

    /// Builder: attach a store-assigned id
    ///
    /// Only store implementations should call this; everything else
    /// receives ids from `save`.
    pub fn with_id(mut self, id: EmployeeId) -> Self {
        self.id = Some(id);
        self
    }

    // ========== Getters ==========

    pub fn id(&self) -> Option<EmployeeId> {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email_id(&self) -> &str {
        &self.email_id
    }

    // ========== Mutation ==========

    /// Overwrite every attribute, keeping the identity
    pub fn apply_details(
        &mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email_id: impl Into<String>,
    ) {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self.email_id = email_id.into();
    }
}
