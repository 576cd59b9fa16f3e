use crate::cli::context::CLIContext;
use crate::model::*;
use crate::ops::*;
use crate::queries::profile_queries::{self, ProfileView};

const PROFILE_POST_LIMIT: usize = 10;

pub fn view(ctx: &CLIContext, args: &str) {
    let target = if args.is_empty() {
        match ctx.viewer() {
            Some(me) => me,
            None => {
                println!("Usage: view <name or email>");
                return;
            }
        }
    } else {
        match ctx.find_identity(args) {
            Some(identity) => identity,
            None => return,
        }
    };

    let lookups = ctx.lookups();
    match profile_queries::view_profile(&lookups, ctx.viewer_id(), target.id, Some(PROFILE_POST_LIMIT)) {
        Ok(view) => print!("{}", render(&view)),
        Err(e) => {
            ctx.print_error(&e);
            println!("Profile unavailable.");
        }
    }
}

/// Text rendering of a redacted profile. Hidden fields are omitted.
pub fn render(view: &ProfileView) -> String {
    let identity = &view.identity;
    let mut out = String::new();
    out.push('\n');
    out.push_str(&format!("{} <{}>\n", identity.name, identity.email));

    if let Some(bio) = &identity.bio {
        out.push_str(&format!("Bio: {}\n", bio));
    }
    if let Some(location) = &identity.location {
        out.push_str(&format!("Location: {}\n", location));
    }
    if let Some(website) = &identity.website {
        out.push_str(&format!("Website: {}\n", website));
    }
    if let Some(birthday) = identity.birthday {
        out.push_str(&format!("Birthday: {}\n", birthday.format("%B %-d, %Y")));
    }
    if !identity.relationship_labels.is_empty() {
        out.push_str(&format!("Relationships: {}\n", identity.relationship_labels.join(", ")));
    }
    if let Some(rel) = &view.access.relationship {
        out.push_str(&format!("Connected as: {}\n", rel.label));
    }
    if view.access.family_linked {
        out.push_str("Family: same as yours\n");
    }
    out.push_str(&format!("Member since: {}\n", identity.created_at.format("%Y-%m-%d")));

    if !view.access.is_owner() {
        let can = if view.access.can_message { "yes" } else { "no" };
        out.push_str(&format!("Can message: {}\n", can));
    }

    if view.access.can_view_posts {
        if view.posts.is_empty() {
            out.push_str("Posts: (none)\n");
        } else {
            out.push_str("Posts:\n");
            for post in &view.posts {
                out.push_str(&format!(
                    "  [{}] {}\n",
                    post.created_at.format("%Y-%m-%d %H:%M"),
                    post.content
                ));
            }
        }
    } else {
        out.push_str("Posts are private.\n");
    }
    out.push('\n');
    out
}

pub fn show_privacy(ctx: &CLIContext) {
    let Some(me) = ctx.require_viewer() else {
        return;
    };
    match privacy_ops::policy_for(&ctx.conn, me) {
        Ok(policy) => {
            println!();
            println!("Privacy settings:");
            for category in PrivacyCategory::ALL {
                println!("  {:<14} {}", category, policy.level(category));
            }
            let strangers = match policy.allow_messages_from_strangers {
                Some(false) => "no",
                _ => "yes",
            };
            println!("  {:<14} {}", "strangers", strangers);
            println!();
        }
        Err(e) => ctx.print_error(&e),
    }
}

/// `set-privacy <category> <level>`, or `set-privacy strangers yes|no`.
pub fn set_privacy(ctx: &CLIContext, args: &str) {
    let Some(me) = ctx.require_viewer() else {
        return;
    };
    let mut parts = args.split_whitespace();
    let (Some(category), Some(level)) = (parts.next(), parts.next()) else {
        println!("Usage: set-privacy <category> <level>");
        println!("  categories: profile, posts, contact, bio, relationships, family, strangers");
        println!("  levels: public, relationships, family, private (strangers: yes, no)");
        return;
    };

    if category.eq_ignore_ascii_case("strangers") {
        let allow = match level.to_lowercase().as_str() {
            "yes" | "true" => Some(true),
            "no" | "false" => Some(false),
            _ => {
                println!("Expected yes or no.");
                return;
            }
        };
        match privacy_ops::set_allow_messages_from_strangers(&ctx.conn, me, allow) {
            Ok(_) => println!("Updated."),
            Err(e) => ctx.print_error(&e),
        }
        return;
    }

    let category: PrivacyCategory = match category.parse() {
        Ok(c) => c,
        Err(e) => {
            println!("Error: {}", e);
            return;
        }
    };
    let level: PrivacyLevel = match level.parse() {
        Ok(l) => l,
        Err(e) => {
            println!("Error: {}", e);
            return;
        }
    };

    match privacy_ops::set_level(&ctx.conn, me, category, level) {
        Ok(_) => println!("{} is now visible to: {}", category, level),
        Err(e) => ctx.print_error(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::ViewContext;

    fn profile(access: ViewContext, identity: Identity, posts: Vec<Post>) -> ProfileView {
        ProfileView {
            identity,
            posts,
            access,
        }
    }

    #[test]
    fn render_omits_hidden_fields() {
        let identity = Identity::create("Alice".into(), "alice@...".into());
        let access = ViewContext::denied(Id::generate(), identity.id);
        let text = render(&profile(access, identity, Vec::new()));

        assert!(text.contains("Alice <alice@...>"));
        assert!(!text.contains("Bio:"));
        assert!(text.contains("Posts are private."));
        assert!(text.contains("Can message: no"));
    }

    #[test]
    fn render_owner_lists_posts() {
        let mut identity = Identity::create("Alice".into(), "alice@example.com".into());
        identity.bio = Some("Gardener".into());
        let post = Post::create(identity.id, "Hello".into());
        let access = ViewContext::owner(identity.id);
        let text = render(&profile(access, identity, vec![post]));

        assert!(text.contains("Bio: Gardener"));
        assert!(text.contains("Hello"));
        assert!(!text.contains("Can message"));
    }
}
