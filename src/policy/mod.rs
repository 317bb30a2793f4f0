//! Ownership Policy
//!
//! Pure decision table for authorization scoping. Given the authenticated
//! requester, a resource class, and an action, `scope` answers which rows
//! are visible or mutable; `forced_owner` answers which owner value a
//! create must pin regardless of anything the client supplied.
//!
//! The policy never reads ambient request state: the requester is always
//! an explicit parameter, and repositories apply the returned `Scope` as
//! an explicit SQL predicate before any read or write.
//!
//! # Rules
//!
//! | class        | list         | read     | create owner | update/delete |
//! |--------------|--------------|----------|--------------|---------------|
//! | App          | Owned        | Owned    | forced       | Owned         |
//! | Plan         | Unscoped     | Unscoped | not forced   | Unscoped      |
//! | Subscription | OwnedActive  | Owned    | forced       | Owned         |
//!
//! Subscription `read` is deliberately wider than `list`: a soft-deleted
//! subscription stays fetchable by id for audit, it only drops out of
//! default listings. Ownership mismatches surface as `NotFound` at the
//! repository layer, never as a forbidden error.

use uuid::Uuid;

/// The three resource classes the policy knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceClass {
    App,
    Plan,
    Subscription,
}

/// The operations a request can perform on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Read,
    Create,
    Update,
    Delete,
}

/// The visible/mutable subset of rows for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Rows owned by the given user, regardless of active state
    Owned(Uuid),
    /// Rows owned by the given user that are still active
    OwnedActive(Uuid),
    /// All rows
    Unscoped,
}

impl Scope {
    /// Owner predicate, if any
    pub fn owner(&self) -> Option<Uuid> {
        match self {
            Self::Owned(id) | Self::OwnedActive(id) => Some(*id),
            Self::Unscoped => None,
        }
    }

    /// Whether the scope excludes soft-deleted rows
    pub fn active_only(&self) -> bool {
        matches!(self, Self::OwnedActive(_))
    }
}

/// Compute the row scope for (requester, resource class, action)
pub fn scope(requester: Uuid, class: ResourceClass, action: Action) -> Scope {
    match class {
        ResourceClass::Plan => Scope::Unscoped,
        ResourceClass::App => Scope::Owned(requester),
        ResourceClass::Subscription => match action {
            Action::List => Scope::OwnedActive(requester),
            // Soft-deleted rows stay reachable by direct reference,
            // and update/delete apply to the requester's rows in
            // either state.
            Action::Read | Action::Create | Action::Update | Action::Delete => {
                Scope::Owned(requester)
            }
        },
    }
}

/// Owner value a create must pin, overriding any client-supplied owner
///
/// `None` means the resource class carries no owner at all (plans).
pub fn forced_owner(requester: Uuid, class: ResourceClass) -> Option<Uuid> {
    match class {
        ResourceClass::App | ResourceClass::Subscription => Some(requester),
        ResourceClass::Plan => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> Uuid {
        Uuid::new_v4()
    }

    #[test]
    fn test_apps_are_owner_scoped_for_every_action() {
        let u = user();
        for action in [
            Action::List,
            Action::Read,
            Action::Create,
            Action::Update,
            Action::Delete,
        ] {
            assert_eq!(scope(u, ResourceClass::App, action), Scope::Owned(u));
        }
    }

    #[test]
    fn test_plans_are_globally_visible() {
        let u = user();
        for action in [
            Action::List,
            Action::Read,
            Action::Create,
            Action::Update,
            Action::Delete,
        ] {
            assert_eq!(scope(u, ResourceClass::Plan, action), Scope::Unscoped);
        }
    }

    #[test]
    fn test_subscription_list_hides_inactive_rows() {
        let u = user();
        let s = scope(u, ResourceClass::Subscription, Action::List);
        assert_eq!(s, Scope::OwnedActive(u));
        assert!(s.active_only());
        assert_eq!(s.owner(), Some(u));
    }

    #[test]
    fn test_subscription_read_includes_inactive_rows() {
        // A cancelled subscription must stay fetchable by id for audit.
        let u = user();
        let s = scope(u, ResourceClass::Subscription, Action::Read);
        assert_eq!(s, Scope::Owned(u));
        assert!(!s.active_only());
    }

    #[test]
    fn test_owner_is_forced_on_owned_resources() {
        let u = user();
        assert_eq!(forced_owner(u, ResourceClass::App), Some(u));
        assert_eq!(forced_owner(u, ResourceClass::Subscription), Some(u));
        assert_eq!(forced_owner(u, ResourceClass::Plan), None);
    }

    #[test]
    fn test_scopes_of_distinct_users_never_overlap() {
        let u1 = user();
        let u2 = user();
        let s1 = scope(u1, ResourceClass::App, Action::List);
        let s2 = scope(u2, ResourceClass::App, Action::List);
        assert_ne!(s1.owner(), s2.owner());
    }
}
