//! Authorization rule tests
//!
//! The fail-closed contracts, exercised through the public API.

use rstest::rstest;

use orgboard::models::{OrgRole, Permission};
use orgboard::services::authorization::{
    can_manage_organization_members, can_manage_teams, can_view_organization_members,
    has_permission, has_system_role, is_organization_head,
};

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn test_unmapped_pairs_are_denied() {
    // Closed world: everything outside the table is false
    assert!(!has_permission(
        Some(OrgRole::Guest),
        Permission::ViewOrganizationMembers
    ));
    assert!(!has_permission(
        Some(OrgRole::Member),
        Permission::ManageTeams
    ));
    for permission in Permission::all() {
        assert!(!has_permission(None, permission));
    }
}

#[rstest]
#[case(None, "X", false)]
#[case(Some(vec![]), "X", false)]
#[case(Some(vec!["X".to_string()]), "X", true)]
#[case(Some(vec!["X".to_string()]), "Y", false)]
fn test_has_system_role(
    #[case] roles: Option<Vec<String>>,
    #[case] wanted: &str,
    #[case] expected: bool,
) {
    assert_eq!(has_system_role(roles.as_deref(), wanted), expected);
}

#[rstest]
#[case(Some(vec!["Organization Head".to_string()]), true)]
#[case(Some(vec!["Organization Admin".to_string()]), true)]
#[case(Some(vec!["Something Else".to_string()]), false)]
#[case(None, false)]
fn test_is_organization_head(#[case] roles: Option<Vec<String>>, #[case] expected: bool) {
    assert_eq!(is_organization_head(roles.as_deref()), expected);
}

#[rstest]
#[case(None, Some(vec![]), false)]
#[case(None, None, false)]
#[case(Some(OrgRole::Owner), Some(vec![]), true)]
#[case(Some(OrgRole::Admin), None, true)]
#[case(Some(OrgRole::Member), Some(vec![]), false)]
#[case(Some(OrgRole::Member), Some(tags(&["Organization Head"])), true)]
#[case(Some(OrgRole::Guest), Some(tags(&["Organization Admin"])), true)]
fn test_can_manage_organization_members(
    #[case] role: Option<OrgRole>,
    #[case] roles: Option<Vec<String>>,
    #[case] expected: bool,
) {
    assert_eq!(
        can_manage_organization_members(role, roles.as_deref()),
        expected
    );
}

#[test]
fn test_view_and_manage_share_one_gate() {
    let role_cases = [
        None,
        Some(OrgRole::Owner),
        Some(OrgRole::Admin),
        Some(OrgRole::Member),
        Some(OrgRole::Guest),
    ];
    let tag_cases: [Option<Vec<String>>; 4] = [
        None,
        Some(vec![]),
        Some(tags(&["Organization Head"])),
        Some(tags(&["Unrelated"])),
    ];

    for role in role_cases {
        for tag_list in &tag_cases {
            assert_eq!(
                can_view_organization_members(role, tag_list.as_deref()),
                can_manage_organization_members(role, tag_list.as_deref()),
            );
            assert_eq!(
                can_manage_teams(role, tag_list.as_deref()),
                can_manage_organization_members(role, tag_list.as_deref()),
            );
        }
    }
}
