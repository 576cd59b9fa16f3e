use chrono::NaiveDate;
use rusqlite::Connection;
use tracing::{info, instrument};

use super::require_identity;
use crate::db::identity_repo;
use crate::error::{KindredError, KindredResult};
use crate::model::{Id, Identity};
use crate::validation::{self, trim_optional};

#[instrument(skip(conn))]
pub fn register(conn: &Connection, name: &str, email: &str) -> KindredResult<Identity> {
    let name = validation::non_blank(name, "name")?;
    let email = validation::email(email, "email")?;

    if identity_repo::find_by_email(conn, &email)?.is_some() {
        return Err(KindredError::AlreadyExists {
            entity_type: "Identity".into(),
            identifier: email,
        });
    }

    let identity = Identity::create(name, email);
    identity_repo::insert(conn, &identity)?;
    info!(id = %identity.id, "identity registered");
    Ok(identity)
}

/// Patches the owner's own profile. `None` leaves a field alone;
/// `Some(None)` clears it.
#[instrument(skip(conn))]
pub fn update_profile(
    conn: &Connection,
    id: Id<Identity>,
    name: Option<&str>,
    bio: Option<Option<&str>>,
    location: Option<Option<&str>>,
    website: Option<Option<&str>>,
    birthday: Option<Option<NaiveDate>>,
) -> KindredResult<Identity> {
    let mut updated = require_identity(conn, id)?;

    if let Some(n) = name {
        updated.name = validation::non_blank(n, "name")?;
    }
    if let Some(b) = bio {
        updated.bio = trim_optional(b);
    }
    if let Some(l) = location {
        updated.location = trim_optional(l);
    }
    if let Some(w) = website {
        updated.website = validation::optional_website(w, "website")?;
    }
    if let Some(b) = birthday {
        updated.birthday = b;
    }

    identity_repo::update(conn, &updated)?;
    Ok(updated)
}

#[instrument(skip(conn))]
pub fn change_email(conn: &Connection, id: Id<Identity>, email: &str) -> KindredResult<Identity> {
    let mut updated = require_identity(conn, id)?;
    let email = validation::email(email, "email")?;

    if let Some(existing) = identity_repo::find_by_email(conn, &email)? {
        if existing.id != id {
            return Err(KindredError::AlreadyExists {
                entity_type: "Identity".into(),
                identifier: email,
            });
        }
    }

    updated.email = email;
    identity_repo::update(conn, &updated)?;
    Ok(updated)
}
