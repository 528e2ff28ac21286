//! Database integration tests
//!
//! Role store and audit writer against a real in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::common::{TestDatabase, UserFactory};
    use crate::{assert_err, assert_ok};
    use console_guard::audit::{AuditCategory, AuditWriter, DatabaseAuditWriter, NewAuditEntry};
    use console_guard::auth::identity::{AccountStatus, RoleDirectory, RoleStore};
    use console_guard::{ConsoleError, Role};
    use serde_json::json;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_database_health_check() {
        let db = TestDatabase::new().await;
        assert_ok!(db.db().health_check().await);
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let db = TestDatabase::new().await;
        assert_ok!(db.db().migrate().await);
    }

    #[tokio::test]
    async fn test_role_assignment_round_trip() {
        let db = TestDatabase::new().await;
        let moderator = UserFactory::moderator();

        assert_ok!(db.db().upsert_role_assignment(&moderator).await);

        let found = assert_ok!(db.db().role_for_user(moderator.user_id).await).unwrap();
        assert_eq!(found.role, Role::Moderator);
        assert_eq!(found.status, AccountStatus::Active);
        assert_eq!(found.email, moderator.email);

        assert!(assert_ok!(db.db().role_for_user(Uuid::new_v4()).await).is_none());
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing_row() {
        let db = TestDatabase::new().await;
        let user = UserFactory::user();
        assert_ok!(db.db().upsert_role_assignment(&user).await);

        let mut promoted = user.clone();
        promoted.role = Role::Admin;
        assert_ok!(db.db().upsert_role_assignment(&promoted).await);

        let all = assert_ok!(db.db().list_assignments().await);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].role, Role::Admin);
    }

    #[tokio::test]
    async fn test_update_missing_assignment_is_not_found() {
        let db = TestDatabase::new().await;
        let err = assert_err!(db.db().update_role_assignment(&UserFactory::user()).await);
        assert!(matches!(err, ConsoleError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_and_count_active_admins() {
        let db = TestDatabase::new().await;
        let first = UserFactory::admin();
        let second = UserFactory::admin();
        assert_ok!(db.db().upsert_role_assignment(&first).await);
        assert_ok!(db.db().upsert_role_assignment(&second).await);
        assert_ok!(db.db().upsert_role_assignment(&UserFactory::suspended(Role::Admin)).await);
        assert_ok!(db.db().upsert_role_assignment(&UserFactory::moderator()).await);

        assert_eq!(assert_ok!(db.db().count_active_admins().await), 2);

        let demoted = second.clone().with_status(AccountStatus::Inactive);
        let updated = assert_ok!(db.db().update_assignment(demoted).await);
        assert_eq!(updated.status, AccountStatus::Inactive);
        assert_eq!(assert_ok!(db.db().count_active_admins().await), 1);
    }

    #[tokio::test]
    async fn test_last_active_admin_survives_guarded_update() {
        let db = TestDatabase::new().await;
        let admin = UserFactory::admin();
        assert_ok!(db.db().upsert_role_assignment(&admin).await);
        assert_ok!(db.db().upsert_role_assignment(&UserFactory::suspended(Role::Admin)).await);

        let mut demoted = admin.clone();
        demoted.role = Role::User;
        let err = assert_err!(db.db().update_assignment_keeping_admin(demoted).await);
        assert!(matches!(err, ConsoleError::Conflict(_)));

        let stored = assert_ok!(db.db().role_for_user(admin.user_id).await).unwrap();
        assert_eq!(stored.role, Role::Admin);
        assert_eq!(assert_ok!(db.db().count_active_admins().await), 1);
    }

    #[tokio::test]
    async fn test_concurrent_guarded_demotions_keep_one_admin() {
        let db = TestDatabase::new().await;
        let first = UserFactory::admin();
        let second = UserFactory::admin();
        assert_ok!(db.db().upsert_role_assignment(&first).await);
        assert_ok!(db.db().upsert_role_assignment(&second).await);

        let (a, b) = tokio::join!(
            db.db()
                .update_assignment_keeping_admin(first.clone().with_status(AccountStatus::Suspended)),
            db.db()
                .update_assignment_keeping_admin(second.clone().with_status(AccountStatus::Suspended)),
        );

        assert_eq!([a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count(), 1);
        assert!([a, b]
            .into_iter()
            .any(|r| matches!(r, Err(ConsoleError::Conflict(_)))));
        assert_eq!(assert_ok!(db.db().count_active_admins().await), 1);
    }

    #[tokio::test]
    async fn test_list_assignments_sorted_by_email() {
        let db = TestDatabase::new().await;
        for email in ["zoe@example.com", "adam@example.com", "mia@example.com"] {
            let mut assignment = UserFactory::user();
            assignment.email = email.to_string();
            assert_ok!(db.db().upsert_role_assignment(&assignment).await);
        }

        let emails: Vec<String> = assert_ok!(db.db().list_assignments().await)
            .into_iter()
            .map(|a| a.email)
            .collect();
        assert_eq!(emails, ["adam@example.com", "mia@example.com", "zoe@example.com"]);
    }

    #[tokio::test]
    async fn test_audit_writer_persists_entries() {
        let db = TestDatabase::new().await;
        let writer = DatabaseAuditWriter::new(db.db_arc());
        let actor = Uuid::new_v4();

        let first = assert_ok!(
            writer
                .write(NewAuditEntry::new(actor, "auth.login", AuditCategory::Auth))
                .await
        );
        let second = assert_ok!(
            writer
                .write(
                    NewAuditEntry::new(actor, "setting.updated", AuditCategory::Setting)
                        .resource("setting", "retention_days")
                        .changes(Some(json!(30)), Some(json!(90))),
                )
                .await
        );
        assert_ne!(first.id, second.id);

        let recent = assert_ok!(db.db().recent_audit_logs(10).await);
        assert_eq!(recent.len(), 2);
        let stored = recent.iter().find(|e| e.id == second.id).unwrap();
        assert_eq!(stored.category, AuditCategory::Setting);
        assert_eq!(stored.resource_id.as_deref(), Some("retention_days"));
        assert_eq!(stored.changes.as_ref().unwrap().after, Some(json!(90)));

        assert_eq!(assert_ok!(writer.recent(1).await).len(), 1);
    }
}
