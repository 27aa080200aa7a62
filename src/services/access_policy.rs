// src/services/access_policy.rs
//! Who may do what. Every role check in the web layer goes through
//! [`authorize`].
use crate::{
    error::{AppError, AppResult},
    models::user::SessionUser,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<'a> {
    ListSubmissions,
    ListUsers,
    Export,
    ReadSubmission { owner_id: &'a str },
    Submit,
}

pub fn is_permitted(actor: &SessionUser, action: Action<'_>) -> bool {
    match action {
        Action::ListSubmissions | Action::ListUsers | Action::Export => actor.is_admin(),
        Action::ReadSubmission { owner_id } => actor.is_admin() || actor.id == owner_id,
        // Always applied to the caller's own record.
        Action::Submit => true,
    }
}

pub fn authorize(actor: &SessionUser, action: Action<'_>) -> AppResult<()> {
    if is_permitted(actor, action) {
        Ok(())
    } else {
        tracing::warn!("Access denied: '{}' ({}) attempted {:?}", actor.username, actor.role, action);
        Err(AppError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;

    fn actor(id: &str, role: Role) -> SessionUser {
        SessionUser {
            id: id.into(),
            username: id.into(),
            name: id.into(),
            role,
        }
    }

    #[test]
    fn admin_only_actions() {
        let admin = actor("a", Role::Admin);
        let student = actor("s", Role::Student);
        for action in [Action::ListSubmissions, Action::ListUsers, Action::Export] {
            assert!(authorize(&admin, action).is_ok());
            assert!(matches!(authorize(&student, action), Err(AppError::Forbidden)));
        }
    }

    #[test]
    fn submissions_are_readable_by_owner_or_admin() {
        let admin = actor("a", Role::Admin);
        let owner = actor("s1", Role::Student);
        let other = actor("s2", Role::Student);
        let read = Action::ReadSubmission { owner_id: "s1" };

        assert!(is_permitted(&admin, read));
        assert!(is_permitted(&owner, read));
        assert!(!is_permitted(&other, read));
    }

    #[test]
    fn anyone_authenticated_may_submit() {
        assert!(is_permitted(&actor("s", Role::Student), Action::Submit));
        assert!(is_permitted(&actor("a", Role::Admin), Action::Submit));
    }
}
