pub mod context;
pub mod identity_commands;
pub mod relationship_commands;
pub mod family_commands;
pub mod post_commands;
pub mod profile_commands;

use std::path::Path;
use rusqlite::Connection;
use tracing::{error, info};

use crate::db::schema;
use context::CLIContext;

/// Run the interactive REPL.
pub fn run(db_path: &Path) {
    println!("Kindred - chosen family profiles");
    println!("Type 'help' for commands, 'exit' to quit.");
    println!();

    let conn = match Connection::open(db_path) {
        Ok(c) => c,
        Err(e) => {
            error!(path = %db_path.display(), error = %e, "cannot open database");
            eprintln!("Error opening database: {}", e);
            return;
        }
    };

    if let Err(e) = schema::initialize(&conn) {
        eprintln!("Error initializing database: {}", e);
        return;
    }
    info!(path = %db_path.display(), "database ready");

    let ctx = CLIContext::new(conn);
    repl_loop(&ctx);
}

fn repl_loop(ctx: &CLIContext) {
    loop {
        let prompt = match ctx.viewer() {
            Some(me) => format!("{}> ", me.name),
            None => "> ".to_string(),
        };
        let input = match ctx.read_line(&prompt) {
            Some(s) => s,
            None => break,
        };

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let (command, args) = parse_command(input);

        match command {
            "help" | "?" => print_help(),
            "quit" | "exit" | "q" => break,

            // Identity
            "register" => identity_commands::register(ctx, args),
            "login" => identity_commands::login(ctx, args),
            "logout" => identity_commands::logout(ctx),
            "whoami" => identity_commands::whoami(ctx),
            "people" | "ls" => identity_commands::list(ctx),
            "edit-profile" => identity_commands::edit_profile(ctx),

            // Relationships
            "connect" => relationship_commands::connect(ctx, args),
            "requests" => relationship_commands::requests(ctx),
            "connections" => relationship_commands::connections(ctx),
            "accept" => relationship_commands::accept(ctx, args),
            "reject" => relationship_commands::reject(ctx, args),
            "block" => relationship_commands::block(ctx, args),

            // Family
            "family" => family_commands::show(ctx),
            "family-create" => family_commands::create(ctx, args),
            "family-join" => family_commands::join(ctx, args),
            "family-leave" => family_commands::leave(ctx),

            // Posts
            "post" => post_commands::post(ctx, args),
            "feed" => post_commands::feed(ctx),

            // Profiles and privacy
            "view" | "show" => profile_commands::view(ctx, args),
            "privacy" => profile_commands::show_privacy(ctx),
            "set-privacy" => profile_commands::set_privacy(ctx, args),

            _ => println!("Unknown command: {}. Type 'help' for commands.", command),
        }
    }
}

/// Split input into the command word and the rest of the line.
fn parse_command(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.find(|c: char| c == ' ' || c == '\t') {
        Some(pos) => (&input[..pos], input[pos..].trim()),
        None => (input, ""),
    }
}

fn print_help() {
    println!(r#"
COMMANDS:

  Identity:
    register [name]          Create an identity and log in
    login <email|name>       Act as an existing identity
    logout                   Stop acting as anyone
    whoami                   Show the logged-in identity
    people                   List all members
    edit-profile             Edit your bio, location, website, birthday

  Relationships:
    connect <name>           Send a connection request
    requests                 Show requests waiting for you
    connections              List your accepted connections
    accept <name>            Accept a request
    reject <name>            Reject a request
    block <name>             Block a request or connection

  Family:
    family                   Show your family
    family-create [name]     Create a family and join it
    family-join <name>       Join a family
    family-leave             Leave your family

  Posts:
    post [text]              Publish a post
    feed                     Posts from you and your connections

  Profiles & privacy:
    view [name]              View a profile as the logged-in identity
    privacy                  Show your privacy settings
    set-privacy <cat> <lvl>  Change who can see a category

  Other:
    help                     Show this help
    exit / quit / q          Exit"#);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_command_splits_first_word() {
        assert_eq!(parse_command("view  Alice Smith "), ("view", "Alice Smith"));
        assert_eq!(parse_command("feed"), ("feed", ""));
        assert_eq!(parse_command("post\thello"), ("post", "hello"));
    }
}
