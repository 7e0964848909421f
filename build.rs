#![allow(clippy::style)]


use std::env;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() -> std::io::Result<()> {
    let outdir = match std::env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };
    let outdir_path = PathBuf::from(outdir);

    write_default_precision(&outdir_path, "default_precision.rs")?;
    write_power_cache_size(&outdir_path, "power_cache_size.rs")?;
    Ok(())
}

/// Create default_precision.rs, containing definition of constant DEFAULT_PRECISION
fn write_default_precision(outdir_path: &Path, filename: &str) -> std::io::Result<()>
{
    let default_prec = env::var("RUST_BIGRADIX_DEFAULT_PRECISION")
        .map(|s| s.parse::<std::num::NonZeroU32>().expect("$RUST_BIGRADIX_DEFAULT_PRECISION must be an integer > 0"))
        .map(|nz_num| nz_num.into())
        .unwrap_or(34u32);

    let contents = format!("const DEFAULT_PRECISION: u64 = {default_prec};");
    write_if_changed(&outdir_path.join(filename), &contents)?;
    println!("cargo:rerun-if-env-changed={}", "RUST_BIGRADIX_DEFAULT_PRECISION");

    Ok(())
}

/// Create power_cache_size.rs, containing definition of constant POWER_CACHE_SIZE
fn write_power_cache_size(outdir_path: &Path, filename: &str) -> std::io::Result<()>
{
    let cache_size = env::var("RUST_BIGRADIX_POWER_CACHE_SIZE")
        .map(|s| s.parse::<std::num::NonZeroUsize>().expect("$RUST_BIGRADIX_POWER_CACHE_SIZE must be an integer > 0"))
        .map(|nz_num| nz_num.get())
        .unwrap_or(64usize);

    let contents = format!("const POWER_CACHE_SIZE: usize = {cache_size};");
    write_if_changed(&outdir_path.join(filename), &contents)?;
    println!("cargo:rerun-if-env-changed={}", "RUST_BIGRADIX_POWER_CACHE_SIZE");

    Ok(())
}

fn write_if_changed(path: &Path, contents: &str) -> std::io::Result<()> {
    // Rewriting the file if it already exists with the same contents
    // would force a rebuild.
    match std::fs::read_to_string(path) {
        Ok(existing_contents) if existing_contents == contents => {},
        _ => {
            let mut file = File::create(path)?;
            write!(file, "{contents}")?;
        }
    };

    println!("cargo:rerun-if-changed={}", path.display());
    Ok(())
}
