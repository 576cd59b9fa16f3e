use rusqlite::Connection;
use std::cell::RefCell;
use std::io::{self, Write};

use crate::access::SqliteLookups;
use crate::error::KindredError;
use crate::model::*;
use crate::queries::*;

pub struct CLIContext {
    pub conn: Connection,
    viewer: RefCell<Option<Identity>>,
}

impl CLIContext {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            viewer: RefCell::new(None),
        }
    }

    pub fn lookups(&self) -> SqliteLookups<'_> {
        SqliteLookups::new(&self.conn)
    }

    /// The logged-in identity's id, if any.
    pub fn viewer_id(&self) -> Option<Id<Identity>> {
        self.viewer.borrow().as_ref().map(|i| i.id)
    }

    pub fn viewer(&self) -> Option<Identity> {
        self.viewer.borrow().clone()
    }

    pub fn log_in(&self, identity: Identity) {
        *self.viewer.borrow_mut() = Some(identity);
    }

    pub fn log_out(&self) -> Option<Identity> {
        self.viewer.borrow_mut().take()
    }

    /// The logged-in identity, or a printed hint when nobody is.
    pub fn require_viewer(&self) -> Option<Id<Identity>> {
        let id = self.viewer_id();
        if id.is_none() {
            self.print_error(&KindredError::Unauthenticated);
            println!("Use 'login <email>' or 'register' first.");
        }
        id
    }

    /// Reload the logged-in identity after it changed in the database.
    pub fn refresh_viewer(&self) {
        let Some(id) = self.viewer_id() else {
            return;
        };
        if let Ok(Some(identity)) = identity_queries::get_identity(&self.conn, id) {
            self.log_in(identity);
        }
    }

    /// Prompt and read a line from stdin. Returns None on EOF.
    pub fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        io::stdout().flush().ok();
        let mut buf = String::new();
        match io::stdin().read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => Some(buf.trim_end_matches('\n').trim_end_matches('\r').to_string()),
            Err(_) => None,
        }
    }

    /// Read a line, trimmed.
    pub fn prompt(&self, prompt: &str) -> Option<String> {
        self.read_line(prompt).map(|s| s.trim().to_string())
    }

    /// Find an identity by email or name query. Prints error if not found or ambiguous.
    pub fn find_identity(&self, args: &str) -> Option<Identity> {
        let query = args.trim();
        if query.is_empty() {
            return None;
        }

        if query.contains('@') {
            if let Ok(Some(identity)) = identity_queries::find_by_email(&self.conn, query) {
                return Some(identity);
            }
        }

        let matches = identity_queries::find_by_name(&self.conn, query).unwrap_or_default();
        match matches.len() {
            0 => {
                println!("No one found matching '{}'", query);
                None
            }
            1 => matches.into_iter().next(),
            _ => {
                if let Some(exact) = matches.iter().find(|i| i.name.eq_ignore_ascii_case(query)) {
                    return Some(exact.clone());
                }
                println!("Multiple matches found:");
                for i in &matches {
                    println!("  {}", i.name);
                }
                println!("Please be more specific, or use their email.");
                None
            }
        }
    }

    /// Find a family by name query.
    pub fn find_family(&self, args: &str) -> Option<Family> {
        let query = args.trim();
        if query.is_empty() {
            return None;
        }

        let matches = family_queries::find_by_name(&self.conn, query).unwrap_or_default();
        match matches.len() {
            0 => {
                println!("No family found matching '{}'", query);
                None
            }
            1 => matches.into_iter().next(),
            _ => {
                if let Some(exact) = matches.iter().find(|f| f.name.eq_ignore_ascii_case(query)) {
                    return Some(exact.clone());
                }
                println!("Multiple families match:");
                for f in &matches {
                    println!("  {}", f.name);
                }
                None
            }
        }
    }

    /// Name of an identity for display, falling back to its id.
    pub fn name_of(&self, id: Id<Identity>) -> String {
        identity_queries::get_identity(&self.conn, id)
            .ok()
            .flatten()
            .map(|i| i.name)
            .unwrap_or_else(|| id.to_string())
    }

    pub fn print_error(&self, e: &KindredError) {
        println!("Error: {}", e);
    }
}
