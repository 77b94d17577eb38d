//! Role and permission models
//!
//! Roles come in two independent flavors: organization-scoped and
//! team-scoped. A user can hold a different role in every organization and
//! in every team. Global system roles are separate tags carried on the user
//! entity itself and can elevate capabilities regardless of the
//! organization-scoped role.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Role a member holds within one organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrgRole {
    /// Full control, including deleting the organization
    Owner,
    /// Day-to-day administration (members, teams)
    Admin,
    /// Regular member
    Member,
    /// Read-only invitee
    Guest,
}

impl OrgRole {
    /// Get all organization roles
    pub fn all() -> Vec<OrgRole> {
        vec![OrgRole::Owner, OrgRole::Admin, OrgRole::Member, OrgRole::Guest]
    }

    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OrgRole::Owner => "owner",
            OrgRole::Admin => "admin",
            OrgRole::Member => "member",
            OrgRole::Guest => "guest",
        }
    }

    /// Permissions granted by this role, per the static table
    pub fn permissions(&self) -> &'static HashSet<Permission> {
        static EMPTY: Lazy<HashSet<Permission>> = Lazy::new(HashSet::new);
        ORG_PERMISSIONS.get(self).unwrap_or(&EMPTY)
    }
}

impl std::fmt::Display for OrgRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrgRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "owner" => Ok(OrgRole::Owner),
            "admin" => Ok(OrgRole::Admin),
            "member" => Ok(OrgRole::Member),
            "guest" => Ok(OrgRole::Guest),
            _ => Err(format!("Invalid organization role: {}", s)),
        }
    }
}

/// Role a member holds within one team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamRole {
    /// Runs the team, manages its membership
    Lead,
    /// Regular member
    Member,
    /// Read-only invitee
    Guest,
}

impl TeamRole {
    /// Get all team roles
    pub fn all() -> Vec<TeamRole> {
        vec![TeamRole::Lead, TeamRole::Member, TeamRole::Guest]
    }

    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamRole::Lead => "lead",
            TeamRole::Member => "member",
            TeamRole::Guest => "guest",
        }
    }

    /// Permissions granted by this role, per the static table
    pub fn permissions(&self) -> &'static HashSet<Permission> {
        static EMPTY: Lazy<HashSet<Permission>> = Lazy::new(HashSet::new);
        TEAM_PERMISSIONS.get(self).unwrap_or(&EMPTY)
    }
}

impl std::fmt::Display for TeamRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TeamRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lead" => Ok(TeamRole::Lead),
            "member" => Ok(TeamRole::Member),
            "guest" => Ok(TeamRole::Guest),
            _ => Err(format!("Invalid team role: {}", s)),
        }
    }
}

/// Actions gated by role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    CreateOrganization,
    UpdateOrganization,
    DeleteOrganization,
    ManageOrganizationMembers,
    ViewOrganizationMembers,
    ManageTeams,
    ManageTeamMembers,
    ViewTeamMembers,
}

impl Permission {
    /// Get all permissions
    pub fn all() -> Vec<Permission> {
        vec![
            Permission::CreateOrganization,
            Permission::UpdateOrganization,
            Permission::DeleteOrganization,
            Permission::ManageOrganizationMembers,
            Permission::ViewOrganizationMembers,
            Permission::ManageTeams,
            Permission::ManageTeamMembers,
            Permission::ViewTeamMembers,
        ]
    }

    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::CreateOrganization => "create_organization",
            Permission::UpdateOrganization => "update_organization",
            Permission::DeleteOrganization => "delete_organization",
            Permission::ManageOrganizationMembers => "manage_organization_members",
            Permission::ViewOrganizationMembers => "view_organization_members",
            Permission::ManageTeams => "manage_teams",
            Permission::ManageTeamMembers => "manage_team_members",
            Permission::ViewTeamMembers => "view_team_members",
        }
    }
}

/// Static organization role → permission table.
///
/// Roles absent from the table grant nothing; lookup never fails.
static ORG_PERMISSIONS: Lazy<HashMap<OrgRole, HashSet<Permission>>> = Lazy::new(|| {
    let mut table = HashMap::new();

    table.insert(
        OrgRole::Owner,
        HashSet::from([
            Permission::CreateOrganization,
            Permission::UpdateOrganization,
            Permission::DeleteOrganization,
            Permission::ManageOrganizationMembers,
            Permission::ViewOrganizationMembers,
            Permission::ManageTeams,
            Permission::ManageTeamMembers,
            Permission::ViewTeamMembers,
        ]),
    );

    table.insert(
        OrgRole::Admin,
        HashSet::from([
            Permission::UpdateOrganization,
            Permission::ManageOrganizationMembers,
            Permission::ViewOrganizationMembers,
            Permission::ManageTeams,
            Permission::ManageTeamMembers,
            Permission::ViewTeamMembers,
        ]),
    );

    table.insert(
        OrgRole::Member,
        HashSet::from([
            Permission::ViewOrganizationMembers,
            Permission::ViewTeamMembers,
        ]),
    );

    table.insert(OrgRole::Guest, HashSet::new());

    table
});

/// Static team role → permission table.
static TEAM_PERMISSIONS: Lazy<HashMap<TeamRole, HashSet<Permission>>> = Lazy::new(|| {
    let mut table = HashMap::new();

    table.insert(
        TeamRole::Lead,
        HashSet::from([Permission::ManageTeamMembers, Permission::ViewTeamMembers]),
    );

    table.insert(
        TeamRole::Member,
        HashSet::from([Permission::ViewTeamMembers]),
    );

    table.insert(TeamRole::Guest, HashSet::new());

    table
});

/// Global system roles carried on the user entity
///
/// These are cross-organization tags: a support engineer tagged
/// "Organization Head" can administer any organization regardless of the
/// role they hold inside it. The backend owns this vocabulary; the variants
/// here are the tags this client knows how to interpret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemRole {
    OrganizationHead,
    OrganizationAdmin,
}

impl SystemRole {
    /// Get the canonical tag as it appears in `User::roles`
    pub fn as_str(&self) -> &'static str {
        match self {
            SystemRole::OrganizationHead => "Organization Head",
            SystemRole::OrganizationAdmin => "Organization Admin",
        }
    }

    /// Get all system roles this client interprets
    pub fn all() -> Vec<SystemRole> {
        vec![SystemRole::OrganizationHead, SystemRole::OrganizationAdmin]
    }
}

impl std::fmt::Display for SystemRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
