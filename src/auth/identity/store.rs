//! Role stores
//!
//! [`RoleDirectory`] extends the read-only [`RoleStore`] with the writes the
//! user-management service needs. [`MemoryRoleStore`] backs tests and local
//! development; the database implementation lives in `storage::database`.

use super::resolver::RoleStore;
use super::types::RoleAssignment;
use crate::utils::error::{ConsoleError, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use uuid::Uuid;

const LAST_ADMIN_MESSAGE: &str = "Cannot demote or deactivate the last active admin";

/// Role store with the write operations used by user management
#[async_trait]
pub trait RoleDirectory: RoleStore {
    /// All assignments, ordered by email
    async fn list_assignments(&self) -> Result<Vec<RoleAssignment>>;

    /// Insert or replace an assignment
    async fn upsert_assignment(&self, assignment: RoleAssignment) -> Result<RoleAssignment>;

    /// Replace an existing assignment, failing with `NotFound` if absent
    async fn update_assignment(&self, assignment: RoleAssignment) -> Result<RoleAssignment>;

    /// Like [`RoleDirectory::update_assignment`], but fails with `Conflict`
    /// when the change would leave no active admin
    ///
    /// The admin count and the write must be atomic with respect to other
    /// calls on the same store.
    async fn update_assignment_keeping_admin(
        &self,
        assignment: RoleAssignment,
    ) -> Result<RoleAssignment>;

    /// Number of admins whose account is active
    async fn count_active_admins(&self) -> Result<u64>;
}

/// In-memory role store
#[derive(Debug, Default)]
pub struct MemoryRoleStore {
    assignments: DashMap<Uuid, RoleAssignment>,
    writes: Mutex<()>,
}

impl MemoryRoleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an assignment
    pub fn insert(&self, assignment: RoleAssignment) {
        self.assignments.insert(assignment.user_id, assignment);
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

#[async_trait]
impl RoleStore for MemoryRoleStore {
    async fn role_for_user(&self, user_id: Uuid) -> Result<Option<RoleAssignment>> {
        Ok(self.assignments.get(&user_id).map(|entry| entry.clone()))
    }
}

#[async_trait]
impl RoleDirectory for MemoryRoleStore {
    async fn list_assignments(&self) -> Result<Vec<RoleAssignment>> {
        let mut all: Vec<RoleAssignment> =
            self.assignments.iter().map(|entry| entry.clone()).collect();
        all.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(all)
    }

    async fn upsert_assignment(&self, assignment: RoleAssignment) -> Result<RoleAssignment> {
        let _writes = self.writes.lock();
        self.assignments
            .insert(assignment.user_id, assignment.clone());
        Ok(assignment)
    }

    async fn update_assignment(&self, assignment: RoleAssignment) -> Result<RoleAssignment> {
        let _writes = self.writes.lock();
        self.replace(assignment)
    }

    async fn update_assignment_keeping_admin(
        &self,
        assignment: RoleAssignment,
    ) -> Result<RoleAssignment> {
        let _writes = self.writes.lock();

        let target_is_active_admin = self
            .assignments
            .get(&assignment.user_id)
            .is_some_and(|entry| entry.is_active_admin());
        if target_is_active_admin && !assignment.is_active_admin() && self.active_admins() <= 1 {
            return Err(ConsoleError::conflict(LAST_ADMIN_MESSAGE));
        }

        self.replace(assignment)
    }

    async fn count_active_admins(&self) -> Result<u64> {
        Ok(self.active_admins())
    }
}

impl MemoryRoleStore {
    fn active_admins(&self) -> u64 {
        self.assignments
            .iter()
            .filter(|entry| entry.is_active_admin())
            .count() as u64
    }

    fn replace(&self, assignment: RoleAssignment) -> Result<RoleAssignment> {
        match self.assignments.get_mut(&assignment.user_id) {
            Some(mut entry) => {
                *entry = assignment.clone();
                Ok(assignment)
            }
            None => Err(ConsoleError::not_found(format!(
                "User not found: {}",
                assignment.user_id
            ))),
        }
    }
}
