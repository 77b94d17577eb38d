//! Authorization checks
//!
//! Every function here is total and side-effect free: missing roles,
//! absent system-role lists, and unknown tags all resolve to the
//! least-privileged answer (false) instead of failing. The server enforces
//! the real authorization boundary; these checks only decide what the
//! client shows and enables.

use crate::models::{OrgRole, Permission, SystemRole, TeamRole, User};

/// Check the static organization-role permission table.
///
/// `None` means the caller holds no role in the organization and is granted
/// nothing.
pub fn has_permission(role: Option<OrgRole>, permission: Permission) -> bool {
    role.map(|r| r.permissions().contains(&permission))
        .unwrap_or(false)
}

/// Check the static team-role permission table.
pub fn has_team_permission(role: Option<TeamRole>, permission: Permission) -> bool {
    role.map(|r| r.permissions().contains(&permission))
        .unwrap_or(false)
}

/// Check whether a system-role tag is present in a user's global role list.
///
/// The list comes straight off a user payload and may be absent when the
/// object is only partially loaded.
pub fn has_system_role(roles: Option<&[String]>, role: &str) -> bool {
    roles
        .map(|tags| tags.iter().any(|tag| tag == role))
        .unwrap_or(false)
}

/// Check whether the user carries a global organization-head tag.
///
/// "Organization Head" and "Organization Admin" are treated as equivalent
/// here: both grant full administration over every organization.
pub fn is_organization_head(roles: Option<&[String]>) -> bool {
    has_system_role(roles, SystemRole::OrganizationHead.as_str())
        || has_system_role(roles, SystemRole::OrganizationAdmin.as_str())
}

/// Whether the caller may manage (add, remove, re-role) the members of the
/// current organization: Owner, Admin, or a global organization head.
pub fn can_manage_organization_members(
    role: Option<OrgRole>,
    system_roles: Option<&[String]>,
) -> bool {
    matches!(role, Some(OrgRole::Owner) | Some(OrgRole::Admin))
        || is_organization_head(system_roles)
}

/// Whether the caller may create, rename, or delete teams in the current
/// organization. Same gate as member management.
pub fn can_manage_teams(role: Option<OrgRole>, system_roles: Option<&[String]>) -> bool {
    matches!(role, Some(OrgRole::Owner) | Some(OrgRole::Admin))
        || is_organization_head(system_roles)
}

/// Whether the caller may view the member list of the current organization.
///
/// Currently the same gate as managing members; kept as its own function so
/// call sites read correctly and the two can diverge without touching them.
pub fn can_view_organization_members(
    role: Option<OrgRole>,
    system_roles: Option<&[String]>,
) -> bool {
    can_manage_organization_members(role, system_roles)
}

/// Check whether a user's global role list contains `role`.
///
/// A `None` role request is never satisfied: "no role asked for" is not
/// "has any role".
pub fn has_role(user: &User, role: Option<&str>) -> bool {
    match role {
        Some(role) => has_system_role(user.role_tags(), role),
        None => false,
    }
}
