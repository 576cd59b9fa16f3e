use rusqlite::Connection;

use crate::cli::context::CLIContext;
use crate::error::KindredResult;
use crate::model::*;
use crate::ops::*;
use crate::queries::*;

pub fn connect(ctx: &CLIContext, args: &str) {
    let Some(me) = ctx.require_viewer() else {
        return;
    };
    if args.is_empty() {
        println!("Usage: connect <name or email>");
        return;
    }
    let Some(other) = ctx.find_identity(args) else {
        return;
    };
    let label = match ctx.prompt(&format!("What is {} to you? (e.g. Sister, Mentor): ", other.name)) {
        Some(s) if !s.is_empty() => s,
        _ => {
            println!("A label is required.");
            return;
        }
    };

    match relationship_ops::request(&ctx.conn, me, other.id, &label) {
        Ok(_) => println!("Request sent to {}.", other.name),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn requests(ctx: &CLIContext) {
    let Some(me) = ctx.require_viewer() else {
        return;
    };
    let pending = relationship_queries::pending_for(&ctx.conn, me).unwrap_or_default();
    if pending.is_empty() {
        println!("No pending requests.");
        return;
    }

    println!("Pending requests ({}):", pending.len());
    for rel in &pending {
        println!("  {} ({})", ctx.name_of(rel.from_id), rel.label);
    }
}

pub fn connections(ctx: &CLIContext) {
    let Some(me) = ctx.require_viewer() else {
        return;
    };
    let connections = relationship_queries::connections_of(&ctx.conn, me).unwrap_or_default();
    if connections.is_empty() {
        println!("No connections yet. Use 'connect <name>' to send a request.");
        return;
    }

    println!("Connections ({}):", connections.len());
    for (identity, label) in &connections {
        println!("  {} [{}]", identity.name, label);
    }
}

/// Shared by accept/reject/block: resolves the relationship with `args`
/// and applies `op` as the logged-in identity.
fn respond(
    ctx: &CLIContext,
    args: &str,
    usage: &str,
    done: &str,
    op: fn(&Connection, Id<Identity>, Id<Relationship>) -> KindredResult<Relationship>,
) {
    let Some(me) = ctx.require_viewer() else {
        return;
    };
    if args.is_empty() {
        println!("Usage: {} <name or email>", usage);
        return;
    }
    let Some(other) = ctx.find_identity(args) else {
        return;
    };

    // Prefer the most recent record with this person.
    let between = relationship_queries::between(&ctx.conn, me, other.id).unwrap_or_default();
    let Some(rel) = between
        .into_iter()
        .rev()
        .find(|r| matches!(r.status, RelationshipStatus::Pending | RelationshipStatus::Accepted))
    else {
        println!("No open relationship with {}.", other.name);
        return;
    };

    match op(&ctx.conn, me, rel.id) {
        Ok(_) => {
            ctx.refresh_viewer();
            println!("{} {}.", done, other.name);
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn accept(ctx: &CLIContext, args: &str) {
    respond(ctx, args, "accept", "Now connected with", relationship_ops::accept);
}

pub fn reject(ctx: &CLIContext, args: &str) {
    respond(ctx, args, "reject", "Rejected request from", relationship_ops::reject);
}

pub fn block(ctx: &CLIContext, args: &str) {
    respond(ctx, args, "block", "Blocked", relationship_ops::block);
}
