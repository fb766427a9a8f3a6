//! The one place that decides whether an account may lose admin rights,
//! disappear, or have its password replaced by someone else.

use thiserror::Error;

use crate::models::Collaborator;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("The primary admin account is protected")]
    ProtectedAccount,

    #[error("At least one administrator must remain")]
    LastAdminViolation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    Delete,
    ToggleAdmin,
    /// `by_owner` is true when the account holder resets their own password.
    ResetPassword { by_owner: bool },
}

/// Checks `action` on `target` against the current collaborator set.
pub fn check(
    collaborators: &[Collaborator],
    target: &Collaborator,
    action: AdminAction,
) -> Result<(), PolicyError> {
    let protected = match action {
        AdminAction::Delete | AdminAction::ToggleAdmin => true,
        AdminAction::ResetPassword { by_owner } => !by_owner,
    };
    if protected && target.is_primary_admin() {
        return Err(PolicyError::ProtectedAccount);
    }

    let removes_admin = target.is_admin
        && matches!(action, AdminAction::Delete | AdminAction::ToggleAdmin);
    if removes_admin && collaborators.iter().filter(|c| c.is_admin).count() <= 1 {
        return Err(PolicyError::LastAdminViolation);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CollaboratorId;
    use crate::models::CollaboratorStatus;

    fn account(id: &str, is_admin: bool) -> Collaborator {
        Collaborator {
            id: CollaboratorId::new(id),
            name: id.to_string(),
            email: format!("{id}@example.com"),
            password: "pw".to_string(),
            is_admin,
            status: CollaboratorStatus::Aprovado,
            must_change_password: false,
        }
    }

    #[test]
    fn primary_admin_cannot_be_deleted_or_demoted() {
        let primary = account("primary_admin_account", true);
        let other = account("colab_2", true);
        let all = vec![primary.clone(), other];

        assert_eq!(
            check(&all, &primary, AdminAction::Delete),
            Err(PolicyError::ProtectedAccount)
        );
        assert_eq!(
            check(&all, &primary, AdminAction::ToggleAdmin),
            Err(PolicyError::ProtectedAccount)
        );
    }

    #[test]
    fn primary_admin_password_only_resettable_by_owner() {
        let primary = account("primary_admin_account", true);
        let all = vec![primary.clone()];

        assert_eq!(
            check(&all, &primary, AdminAction::ResetPassword { by_owner: false }),
            Err(PolicyError::ProtectedAccount)
        );
        assert!(check(&all, &primary, AdminAction::ResetPassword { by_owner: true }).is_ok());
    }

    #[test]
    fn last_admin_is_floor_protected() {
        let admin = account("colab_1", true);
        let member = account("colab_2", false);
        let all = vec![admin.clone(), member.clone()];

        assert_eq!(
            check(&all, &admin, AdminAction::Delete),
            Err(PolicyError::LastAdminViolation)
        );
        assert_eq!(
            check(&all, &admin, AdminAction::ToggleAdmin),
            Err(PolicyError::LastAdminViolation)
        );
        assert!(check(&all, &member, AdminAction::ToggleAdmin).is_ok());
        assert!(check(&all, &member, AdminAction::Delete).is_ok());
    }

    #[test]
    fn one_of_two_admins_may_go() {
        let a = account("colab_1", true);
        let b = account("colab_2", true);
        let all = vec![a.clone(), b.clone()];

        assert!(check(&all, &a, AdminAction::Delete).is_ok());

        let remaining = vec![b.clone()];
        assert_eq!(
            check(&remaining, &b, AdminAction::Delete),
            Err(PolicyError::LastAdminViolation)
        );
    }
}
