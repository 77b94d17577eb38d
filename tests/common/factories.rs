//! Test factories for entity data

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use fake::faker::company::en::{BsAdj, CompanyName};
use fake::Fake;

use orgboard::models::{Organization, Team};

static NEXT_ID: AtomicI64 = AtomicI64::new(1);

fn next_id() -> i64 {
    NEXT_ID.fetch_add(1, Ordering::SeqCst)
}

/// An organization with a unique id and a random name
pub fn organization() -> Organization {
    organization_with_id(next_id())
}

pub fn organization_with_id(id: i64) -> Organization {
    let now = Utc::now();
    Organization {
        id,
        name: CompanyName().fake(),
        created_at: now,
        updated_at: now,
    }
}

/// A team under `organization_id` with a unique id and a random name
pub fn team(organization_id: i64) -> Team {
    team_with_id(next_id(), organization_id)
}

pub fn team_with_id(id: i64, organization_id: i64) -> Team {
    let now = Utc::now();
    let adjective: String = BsAdj().fake();
    Team {
        id,
        organization_id,
        name: format!("{} team", adjective),
        created_at: now,
        updated_at: now,
    }
}
