//! View-state guards
//!
//! Read-only helpers for interactive consumers of `/api/auth/me`: a
//! [`UserState`] snapshot with derived flags, a watch channel that
//! re-publishes the snapshot whenever the identity fetch resolves or changes,
//! and declarative gates that pick between content and a fallback.
//!
//! These never decide policy on their own; every check goes through
//! [`evaluate`](super::evaluate).

use super::{Guard, Requirement, evaluate};
use crate::auth::identity::Identity;
use crate::auth::rbac::{Permission, Role};
use crate::core::RequestContext;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Body of `GET /api/auth/me`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub user: Option<Identity>,
    pub permissions: Vec<Permission>,
    pub is_admin: bool,
    pub is_moderator: bool,
}

impl CurrentUserResponse {
    pub fn from_identity(user: Option<Identity>) -> Self {
        let state = UserState::loaded(user);
        Self {
            permissions: state
                .user
                .as_ref()
                .map(|u| u.permissions().to_vec())
                .unwrap_or_default(),
            is_admin: state.is_admin(),
            is_moderator: state.is_moderator(),
            user: state.user,
        }
    }
}

/// Snapshot of the current-user fetch
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserState {
    pub user: Option<Identity>,
    pub loading: bool,
    pub error: Option<String>,
}

impl UserState {
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Default::default()
        }
    }

    pub fn loaded(user: Option<Identity>) -> Self {
        Self {
            user,
            loading: false,
            error: None,
        }
    }

    pub fn failed<S: Into<String>>(message: S) -> Self {
        Self {
            user: None,
            loading: false,
            error: Some(message.into()),
        }
    }

    /// Whether `requirement` holds; always false while loading or after an error
    pub fn allows(&self, requirement: Requirement) -> bool {
        if self.loading || self.error.is_some() {
            return false;
        }
        evaluate(self.user.as_ref(), requirement).is_allowed()
    }

    pub fn is_admin(&self) -> bool {
        self.allows(Requirement::MinimumRole(Role::Admin))
    }

    pub fn is_moderator(&self) -> bool {
        self.allows(Requirement::MinimumRole(Role::Moderator))
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.allows(Requirement::Permission(permission))
    }
}

impl From<CurrentUserResponse> for UserState {
    fn from(response: CurrentUserResponse) -> Self {
        Self::loaded(response.user)
    }
}

/// Writer side of the user-state channel
#[derive(Debug)]
pub struct AccessPublisher {
    tx: watch::Sender<UserState>,
}

/// Reader side of the user-state channel
#[derive(Debug, Clone)]
pub struct AccessWatch {
    rx: watch::Receiver<UserState>,
}

/// New channel, starting in the loading state
pub fn access_channel() -> (AccessPublisher, AccessWatch) {
    let (tx, rx) = watch::channel(UserState::loading());
    (AccessPublisher { tx }, AccessWatch { rx })
}

impl AccessPublisher {
    pub fn publish(&self, state: UserState) {
        self.tx.send_replace(state);
    }

    /// Publish the outcome of an identity fetch
    pub fn resolve(&self, result: Result<Option<Identity>, String>) {
        let state = match result {
            Ok(user) => UserState::loaded(user),
            Err(message) => UserState::failed(message),
        };
        self.publish(state);
    }

    /// Re-resolve the identity through `guard` and publish it
    pub async fn refresh(&self, guard: &Guard, ctx: &RequestContext) {
        self.publish(UserState::loading());
        let user = guard.current_user(ctx).await;
        self.publish(UserState::loaded(user));
    }
}

impl AccessWatch {
    /// Latest published state
    pub fn current(&self) -> UserState {
        self.rx.borrow().clone()
    }

    /// Wait for the next change; `None` once the publisher is gone
    pub async fn changed(&mut self) -> Option<UserState> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

/// Declarative gate over a [`UserState`]
pub trait AccessGate {
    fn requirement(&self) -> Requirement;

    /// `children` when the requirement holds, otherwise `fallback`
    fn render<T>(
        &self,
        state: &UserState,
        children: impl FnOnce() -> T,
        fallback: impl FnOnce() -> T,
    ) -> T {
        if state.allows(self.requirement()) {
            children()
        } else {
            fallback()
        }
    }
}

/// Renders its children only for holders of a permission
#[derive(Debug, Clone, Copy)]
pub struct PermissionGuard(pub Permission);

impl AccessGate for PermissionGuard {
    fn requirement(&self) -> Requirement {
        Requirement::Permission(self.0)
    }
}

/// Renders its children only for admins
#[derive(Debug, Clone, Copy, Default)]
pub struct AdminOnly;

impl AccessGate for AdminOnly {
    fn requirement(&self) -> Requirement {
        Requirement::MinimumRole(Role::Admin)
    }
}

/// Renders its children only for moderators and above
#[derive(Debug, Clone, Copy, Default)]
pub struct ModeratorOnly;

impl AccessGate for ModeratorOnly {
    fn requirement(&self) -> Requirement {
        Requirement::MinimumRole(Role::Moderator)
    }
}
