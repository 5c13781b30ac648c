//! Admin secret generator.
//!
//! Reads the admin secret from a TOML file, hashes it with a fresh random salt and
//! prints Rust constants ready to paste into firmware:
//!
//! ```toml
//! [admin]
//! secret = "correct horse"
//! ```
//!
//! ```bash
//! cargo run --features secretgen --bin sprig-shell-secretgen -- secret.toml
//! ```
//!
//! The secret file should never be committed to source control.

use serde::Deserialize;
use sprig_shell::auth::{PasswordHasher, Sha256Hasher};
use std::error::Error;
use std::process::exit;
use std::{env, fs};

#[derive(Debug, Deserialize)]
struct SecretFile {
    admin: AdminSection,
}

#[derive(Debug, Deserialize)]
struct AdminSection {
    secret: String,
}

fn main() {
    if let Err(e) = try_main() {
        eprintln!("error: {}", e);
        exit(1);
    }
}

fn try_main() -> Result<(), Box<dyn Error>> {
    let Some(path) = env::args().nth(1) else {
        print_help();
        return Ok(());
    };

    let content = fs::read_to_string(&path).map_err(|e| format!("cannot read {}: {}", path, e))?;
    let file: SecretFile = toml::from_str(&content)?;
    if file.admin.secret.is_empty() {
        return Err("admin secret must not be empty".into());
    }

    let mut salt = [0u8; 16];
    getrandom::fill(&mut salt).map_err(|e| format!("cannot generate salt: {}", e))?;
    let hash = Sha256Hasher::new().hash(&file.admin.secret, &salt);

    println!("// Generated by {}, do not edit", env!("CARGO_BIN_NAME"));
    println!("pub const ADMIN_SALT: [u8; 16] = {};", byte_array(&salt));
    println!("pub const ADMIN_HASH: [u8; 32] = {};", byte_array(&hash));
    Ok(())
}

fn byte_array(bytes: &[u8]) -> String {
    let items: Vec<String> = bytes.iter().map(|b| format!("0x{:02x}", b)).collect();
    format!("[{}]", items.join(", "))
}

fn print_help() {
    println!("{} - admin secret generator", env!("CARGO_BIN_NAME"));
    println!();
    println!("Usage:");
    println!("  {} <secret.toml>", env!("CARGO_BIN_NAME"));
    println!();
    println!("The file needs an [admin] table with a `secret` string.");
}
