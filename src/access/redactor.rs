use super::evaluator::ViewContext;
use crate::model::{Identity, Post};

const EMAIL_MASK: &str = "@...";

/// Returns a copy of `identity` with every field the viewer may not see
/// removed. Name, id and creation time are always kept.
///
/// Applying it twice with the same context gives the same result as once.
pub fn redact_identity(identity: &Identity, ctx: &ViewContext) -> Identity {
    let mut view = identity.clone();

    if !ctx.can_view_bio {
        view.bio = None;
    }

    if !ctx.can_view_profile {
        view.location = None;
        view.website = None;
        view.birthday = None;
        view.email = mask_email(&identity.email);
    }

    if !ctx.can_view_relationships {
        view.relationship_labels = Vec::new();
    }

    if !ctx.can_view_family {
        view.family_id = None;
    }

    view
}

/// Keeps the local part only: `alice@example.com` becomes `alice@...`.
pub fn mask_email(email: &str) -> String {
    let local = email.split_once('@').map_or(email, |(local, _)| local);
    format!("{}{}", local, EMAIL_MASK)
}

/// The target's posts, newest first, or nothing when posts are hidden.
/// Posts by anyone other than the target are dropped.
pub fn filter_posts(posts: Vec<Post>, ctx: &ViewContext) -> Vec<Post> {
    if !ctx.can_view_posts {
        return Vec::new();
    }

    let mut visible: Vec<Post> = posts
        .into_iter()
        .filter(|p| p.author_id == ctx.target_id)
        .collect();
    visible.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    visible
}
