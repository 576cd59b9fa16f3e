use crate::cli::context::CLIContext;
use crate::ops::*;
use crate::queries::*;

pub fn show(ctx: &CLIContext) {
    let Some(me) = ctx.require_viewer() else {
        return;
    };
    match family_queries::family_of(&ctx.conn, me) {
        Ok(Some(family)) => {
            println!();
            println!("Family: {}", family.name);
            println!("Created by: {}", ctx.name_of(family.created_by));
            let members = family_queries::members(&ctx.conn, family.id).unwrap_or_default();
            let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
            println!("Members: {}", names.join(", "));
            println!();
        }
        Ok(None) => println!("You are not in a family. Use 'family-create' or 'family-join'."),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn create(ctx: &CLIContext, args: &str) {
    let Some(me) = ctx.require_viewer() else {
        return;
    };
    let name = if !args.is_empty() {
        args.to_string()
    } else {
        match ctx.prompt("Family name: ") {
            Some(s) if !s.is_empty() => s,
            _ => {
                println!("Name cannot be empty.");
                return;
            }
        }
    };

    match family_ops::create_family(&ctx.conn, me, &name) {
        Ok(family) => {
            ctx.refresh_viewer();
            println!("Created family: {}", family.name);
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn join(ctx: &CLIContext, args: &str) {
    let Some(me) = ctx.require_viewer() else {
        return;
    };
    if args.is_empty() {
        println!("Usage: family-join <family name>");
        return;
    }
    let Some(family) = ctx.find_family(args) else {
        return;
    };

    match family_ops::join_family(&ctx.conn, me, family.id) {
        Ok(_) => {
            ctx.refresh_viewer();
            println!("Joined {}.", family.name);
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn leave(ctx: &CLIContext) {
    let Some(me) = ctx.require_viewer() else {
        return;
    };
    match family_ops::leave_family(&ctx.conn, me) {
        Ok(_) => {
            ctx.refresh_viewer();
            println!("You are no longer in a family.");
        }
        Err(e) => ctx.print_error(&e),
    }
}
