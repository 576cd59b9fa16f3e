use tracing::instrument;

use crate::access::{self, ProfileLookups, ViewContext};
use crate::error::{KindredError, KindredResult};
use crate::model::{Id, Identity, Post};

/// Everything a viewer is allowed to see on a target's profile page.
#[derive(Debug, Clone)]
pub struct ProfileView {
    pub identity: Identity,
    pub posts: Vec<Post>,
    pub access: ViewContext,
}

/// Evaluates access, redacts the identity, and loads posts only when the
/// posts category is visible.
#[instrument(skip_all, fields(target = %target))]
pub fn view_profile<L: ProfileLookups + ?Sized>(
    lookups: &L,
    viewer: Option<Id<Identity>>,
    target: Id<Identity>,
    post_limit: Option<usize>,
) -> KindredResult<ProfileView> {
    let (ctx, identity) = access::evaluate_with_target(lookups, viewer, target)?;

    let posts = if ctx.can_view_posts {
        let raw = lookups
            .list_posts_by_owner(target, post_limit)
            .map_err(|e| KindredError::lookup("posts", e))?;
        access::filter_posts(raw, &ctx)
    } else {
        Vec::new()
    };

    Ok(ProfileView {
        identity: access::redact_identity(&identity, &ctx),
        posts,
        access: ctx,
    })
}
