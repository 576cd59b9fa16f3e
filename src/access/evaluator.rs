use serde::Serialize;
use tracing::{debug, instrument, warn};

use super::lookup::ProfileLookups;
use crate::error::{KindredError, KindredResult};
use crate::model::{Id, Identity, PrivacyCategory, PrivacyLevel, PrivacyPolicy, Relationship};

/// What one viewer may see of one target. Recomputed per view, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewContext {
    pub viewer_id: Id<Identity>,
    pub target_id: Id<Identity>,
    pub can_view_profile: bool,
    pub can_view_posts: bool,
    pub can_view_contact: bool,
    /// Contact visibility narrowed by the owner's stranger setting.
    pub can_message: bool,
    pub can_view_bio: bool,
    pub can_view_relationships: bool,
    pub can_view_family: bool,
    pub relationship: Option<Relationship>,
    pub family_linked: bool,
}

impl ViewContext {
    /// An identity looking at itself sees everything but cannot message itself.
    pub fn owner(id: Id<Identity>) -> Self {
        Self {
            viewer_id: id,
            target_id: id,
            can_view_profile: true,
            can_view_posts: true,
            can_view_contact: true,
            can_message: false,
            can_view_bio: true,
            can_view_relationships: true,
            can_view_family: true,
            relationship: None,
            family_linked: false,
        }
    }

    /// Nothing visible. Use when an evaluation failed and the caller
    /// cannot show the difference between an error and a denial.
    pub fn denied(viewer_id: Id<Identity>, target_id: Id<Identity>) -> Self {
        Self {
            viewer_id,
            target_id,
            can_view_profile: false,
            can_view_posts: false,
            can_view_contact: false,
            can_message: false,
            can_view_bio: false,
            can_view_relationships: false,
            can_view_family: false,
            relationship: None,
            family_linked: false,
        }
    }

    pub fn can_view(&self, category: PrivacyCategory) -> bool {
        match category {
            PrivacyCategory::Profile => self.can_view_profile,
            PrivacyCategory::Posts => self.can_view_posts,
            PrivacyCategory::Contact => self.can_view_contact,
            PrivacyCategory::Bio => self.can_view_bio,
            PrivacyCategory::Relationships => self.can_view_relationships,
            PrivacyCategory::Family => self.can_view_family,
        }
    }

    pub fn is_owner(&self) -> bool {
        self.viewer_id == self.target_id
    }
}

/// Decides what `viewer` may see of `target`.
///
/// Fails with `Unauthenticated` when no viewer is logged in, `TargetNotFound`
/// when the target does not exist, and `LookupFailure` when any read fails.
/// There is no partial result.
#[instrument(skip_all, fields(viewer = ?viewer, target = %target))]
pub fn evaluate<L: ProfileLookups + ?Sized>(
    lookups: &L,
    viewer: Option<Id<Identity>>,
    target: Id<Identity>,
) -> KindredResult<ViewContext> {
    let viewer = viewer.ok_or(KindredError::Unauthenticated)?;

    if viewer == target {
        debug!("viewer is the owner");
        return Ok(ViewContext::owner(viewer));
    }

    let identity = fetch_target(lookups, target)?;
    decide(lookups, viewer, &identity)
}

/// Like [`evaluate`], but also hands back the unredacted target the decision
/// was made against, so callers redact the same record. The owner case
/// reads the target too.
#[instrument(skip_all, fields(viewer = ?viewer, target = %target))]
pub fn evaluate_with_target<L: ProfileLookups + ?Sized>(
    lookups: &L,
    viewer: Option<Id<Identity>>,
    target: Id<Identity>,
) -> KindredResult<(ViewContext, Identity)> {
    let viewer = viewer.ok_or(KindredError::Unauthenticated)?;
    let identity = fetch_target(lookups, target)?;

    let context = if viewer == target {
        ViewContext::owner(viewer)
    } else {
        decide(lookups, viewer, &identity)?
    };
    Ok((context, identity))
}

fn fetch_target<L: ProfileLookups + ?Sized>(
    lookups: &L,
    target: Id<Identity>,
) -> KindredResult<Identity> {
    lookups
        .get_identity(target)
        .map_err(|e| lookup_failed("identity", e))?
        .ok_or_else(|| KindredError::TargetNotFound {
            id: target.to_string(),
        })
}

fn decide<L: ProfileLookups + ?Sized>(
    lookups: &L,
    viewer: Id<Identity>,
    identity: &Identity,
) -> KindredResult<ViewContext> {
    let target = identity.id;
    let policy = lookups
        .get_privacy_policy(target)
        .map_err(|e| lookup_failed("privacy_policy", e))?
        .unwrap_or_else(|| {
            debug!("no stored privacy policy, using baseline");
            PrivacyPolicy::baseline(target)
        });

    let relationship = lookups
        .find_accepted_relationship(viewer, target)
        .map_err(|e| lookup_failed("relationship", e))?;

    let viewer_family = lookups
        .get_family_group(viewer)
        .map_err(|e| lookup_failed("family_group", e))?;
    let family_linked = identity.in_family(viewer_family);

    let connected = relationship.is_some();
    let visible =
        |category: PrivacyCategory| level_permits(policy.level(category), connected, family_linked);

    let contact_visible = visible(PrivacyCategory::Contact);
    let strangers_allowed = policy.allow_messages_from_strangers != Some(false);

    let context = ViewContext {
        viewer_id: viewer,
        target_id: target,
        can_view_profile: visible(PrivacyCategory::Profile),
        can_view_posts: visible(PrivacyCategory::Posts),
        can_view_contact: contact_visible,
        can_message: contact_visible && (strangers_allowed || connected),
        can_view_bio: visible(PrivacyCategory::Bio),
        can_view_relationships: visible(PrivacyCategory::Relationships),
        can_view_family: visible(PrivacyCategory::Family),
        relationship,
        family_linked,
    };

    debug!(
        connected,
        family_linked,
        profile = context.can_view_profile,
        posts = context.can_view_posts,
        message = context.can_message,
        "access evaluated"
    );
    Ok(context)
}

/// The visibility rule shared by every category.
pub fn level_permits(level: PrivacyLevel, connected: bool, family_linked: bool) -> bool {
    match level {
        PrivacyLevel::Public => true,
        PrivacyLevel::Relationships => connected,
        PrivacyLevel::Family => family_linked,
        PrivacyLevel::Private => false,
    }
}

fn lookup_failed(lookup: &'static str, source: KindredError) -> KindredError {
    warn!(lookup, error = %source, "profile lookup failed");
    KindredError::lookup(lookup, source)
}
