use crate::cli::context::CLIContext;
use crate::ops::*;
use crate::queries::*;

const FEED_LIMIT: usize = 20;

pub fn post(ctx: &CLIContext, args: &str) {
    let Some(me) = ctx.require_viewer() else {
        return;
    };
    let content = if !args.is_empty() {
        args.to_string()
    } else {
        match ctx.prompt("What's on your mind? ") {
            Some(s) => s,
            None => return,
        }
    };

    match post_ops::create_post(&ctx.conn, me, &content) {
        Ok(_) => println!("Posted."),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn feed(ctx: &CLIContext) {
    let Some(me) = ctx.require_viewer() else {
        return;
    };
    match post_queries::feed_for(&ctx.conn, me, FEED_LIMIT) {
        Ok(posts) if posts.is_empty() => println!("Nothing here yet."),
        Ok(posts) => {
            for post in &posts {
                println!(
                    "  [{}] {}: {}",
                    post.created_at.format("%Y-%m-%d %H:%M"),
                    ctx.name_of(post.author_id),
                    post.content
                );
            }
        }
        Err(e) => ctx.print_error(&e),
    }
}
