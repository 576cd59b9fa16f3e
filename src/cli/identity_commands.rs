use chrono::NaiveDate;

use crate::cli::context::CLIContext;
use crate::ops::*;
use crate::queries::*;

pub fn register(ctx: &CLIContext, args: &str) {
    let name = if !args.is_empty() {
        args.to_string()
    } else {
        match ctx.prompt("Display name: ") {
            Some(s) if !s.is_empty() => s,
            _ => {
                println!("Name cannot be empty.");
                return;
            }
        }
    };
    let Some(email) = ctx.prompt("Email: ") else {
        return;
    };

    match identity_ops::register(&ctx.conn, &name, &email) {
        Ok(identity) => {
            println!("Welcome, {}! You are now logged in.", identity.name);
            ctx.log_in(identity);
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn login(ctx: &CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: login <email or name>");
        return;
    }
    if let Some(identity) = ctx.find_identity(args) {
        println!("Logged in as {}", identity.name);
        ctx.log_in(identity);
    }
}

pub fn logout(ctx: &CLIContext) {
    match ctx.log_out() {
        Some(identity) => println!("Logged out {}", identity.name),
        None => println!("Nobody is logged in."),
    }
}

pub fn whoami(ctx: &CLIContext) {
    match ctx.viewer() {
        Some(identity) => println!("{} <{}>", identity.name, identity.email),
        None => println!("Nobody is logged in."),
    }
}

pub fn list(ctx: &CLIContext) {
    let identities = identity_queries::all_identities(&ctx.conn).unwrap_or_default();
    if identities.is_empty() {
        println!("No one has registered yet. Use 'register' to create an identity.");
        return;
    }

    println!("Members ({}):", identities.len());
    for identity in &identities {
        let marker = if Some(identity.id) == ctx.viewer_id() { " (you)" } else { "" };
        println!("  {}{}", identity.name, marker);
    }
}

/// Interactive edit of the logged-in identity's own profile. Enter keeps a
/// value, '-' clears it.
pub fn edit_profile(ctx: &CLIContext) {
    let Some(me) = ctx.viewer() else {
        ctx.require_viewer();
        return;
    };

    println!("Editing your profile (Enter keeps the current value, '-' clears it)");

    fn field(ctx: &CLIContext, label: &str, current: &Option<String>) -> Option<Option<String>> {
        let shown = current.as_deref().unwrap_or("(none)");
        match ctx.prompt(&format!("{} [{}]: ", label, shown))?.as_str() {
            "" => None,
            "-" => Some(None),
            value => Some(Some(value.to_string())),
        }
    }

    let bio = field(ctx, "Bio", &me.bio);
    let location = field(ctx, "Location", &me.location);
    let website = field(ctx, "Website", &me.website);
    let birthday = match field(ctx, "Birthday (YYYY-MM-DD)", &me.birthday.map(|d| d.to_string())) {
        None => None,
        Some(None) => Some(None),
        Some(Some(raw)) => match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
            Ok(date) => Some(Some(date)),
            Err(_) => {
                println!("Invalid date, birthday left unchanged.");
                None
            }
        },
    };

    let result = identity_ops::update_profile(
        &ctx.conn,
        me.id,
        None,
        bio.as_ref().map(|b| b.as_deref()),
        location.as_ref().map(|l| l.as_deref()),
        website.as_ref().map(|w| w.as_deref()),
        birthday,
    );

    match result {
        Ok(_) => {
            ctx.refresh_viewer();
            println!("Profile updated.");
        }
        Err(e) => ctx.print_error(&e),
    }
}
