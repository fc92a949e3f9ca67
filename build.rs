//! Build script for playstats.
//!
//! Copies `.env.example` into the local data directory
//! (`<data_local_dir>/playstats/.env.example`) so a configuration template is
//! available next to where `config::load_env` looks for `.env`.

use std::{env, fs, path::PathBuf};

/// Copies the configuration template.
///
/// Every failure only produces a cargo warning; the template is a
/// convenience and never blocks the build.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("playstats");
    if env_example_path.is_file() {
        let copied = fs::create_dir_all(&out_dir)
            .and_then(|_| fs::copy(&env_example_path, out_dir.join(".env.example")));
        if let Err(e) = copied {
            println!(
                "cargo:warning=could not copy .env.example to {}: {}",
                out_dir.display(),
                e
            );
        }
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
