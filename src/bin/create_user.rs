use std::{
    error::Error,
    io::{self},
    path::Path,
    process::exit,
};

use clap::Parser;
use rusqlite::Connection;

use tagkeeper::{PasswordHash, Profile, ValidatedPassword, create_user, initialize_db};

/// A utility for adding a user who can log in to the tag service.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The name the user logs in with.
    #[arg(long)]
    username: String,

    /// One of RegisteredUser, Editor, UserAdmin or Administrator.
    #[arg(long, default_value_t = Profile::Administrator)]
    profile: Profile,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let db_path = Path::new(&args.db_path);
    validate_db_path(db_path);

    println!("Creating {} user {}", args.profile, args.username);

    let password_hash = match get_new_password_hash(&args.username) {
        Some(password_hash) => password_hash,
        None => return Ok(()),
    };

    let conn = Connection::open(db_path)?;
    initialize_db(&conn)?;

    match create_user(&args.username, password_hash, args.profile, &conn) {
        Ok(user) => {
            println!("Created user {} with ID {}", user.username, user.id.as_i64());
            Ok(())
        }
        Err(error) => {
            print_error(&error);
            exit(1);
        }
    }
}

fn validate_db_path(db_path: &Path) {
    match db_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            print_error("Database path must include a file extension (e.g., 'tags.db').");
            exit(1);
        }
    }
}

fn get_new_password_hash(username: &str) -> Option<PasswordHash> {
    loop {
        println!();

        let first_password = read_password("Enter a password: ")?;

        let validated_password = match ValidatedPassword::new(&first_password, username) {
            Ok(password) => password,
            Err(error) => {
                print_error(error);
                continue;
            }
        };

        let second_password = read_password("Enter the same password again: ")?;

        if first_password != second_password {
            print_error("Passwords must match, try again.");
            continue;
        }

        match PasswordHash::new(validated_password, PasswordHash::DEFAULT_COST) {
            Ok(password_hash) => return Some(password_hash),
            Err(error) => {
                print_error(format!("Could not hash password: {error}. Try again."));
                continue;
            }
        }
    }
}

/// Prompt for a password, returning `None` if stdin is closed or unreadable.
fn read_password(prompt: &str) -> Option<String> {
    match rpassword::prompt_password(prompt) {
        Ok(string) => Some(string),
        Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => None,
        Err(error) => {
            print_error(format!("Could not read password from stdin: {error}"));
            None
        }
    }
}

fn print_error(error: impl ToString) {
    eprintln!(
        "\x1b[31;1m{}\x1b[0m",
        capitalise_first_char(&error.to_string())
    )
}

fn capitalise_first_char(string: &str) -> String {
    let mut chars = string.chars();
    let Some(first) = chars.next() else {
        return String::with_capacity(0);
    };
    first.to_uppercase().chain(chars).collect()
}
