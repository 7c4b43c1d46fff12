//! Prints an Argon2 hash for `auth.basic_auth.password_hash`.
//!
//! The password is taken from the first argument, or read from stdin when no
//! argument is given.

use std::io::BufRead;

use tidings_service::auth::password::hash_password;

fn main() {
    let password = match std::env::args().nth(1) {
        Some(password) => password,
        None => {
            let mut line = String::new();
            if let Err(err) = std::io::stdin().lock().read_line(&mut line) {
                eprintln!("Failed to read password: {err}");
                std::process::exit(1);
            }
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    if password.is_empty() {
        eprintln!("Refusing to hash an empty password");
        std::process::exit(1);
    }

    match hash_password(&password) {
        Ok(hash) => println!("{hash}"),
        Err(err) => {
            eprintln!("Failed to hash password: {err}");
            std::process::exit(1);
        }
    }
}
