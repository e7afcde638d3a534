//! Lattice - render the marching-cubes demo scene to an image.
//!
//! Usage: lattice <output.ppm|output.png> [config.json]

mod config;
mod scene;

use std::env;
use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use lattice_renderer::render;

use crate::config::Config;
use crate::scene::build_scene;

fn check_output_format(path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("ppm") | Some("png") => Ok(()),
        _ => bail!(
            "Unsupported output format for {} (expected .ppm or .png)",
            path.display()
        ),
    }
}

fn usage(args: &[String]) -> String {
    let program = args.first().map_or("lattice", String::as_str);
    format!("Usage: {program} <output.ppm|output.png> [config.json]")
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("{}", usage(&args));
        std::process::exit(1);
    }

    let output = Path::new(&args[1]);
    check_output_format(output)?;

    let config = match args.get(2) {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let start = Instant::now();
    let scene = build_scene(&config)?;
    let image = render(&scene, &config.render);
    image
        .save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    log::info!("Done in {:?}", start.elapsed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format() {
        assert!(check_output_format(Path::new("out.ppm")).is_ok());
        assert!(check_output_format(Path::new("renders/out.PNG")).is_ok());
        assert!(check_output_format(Path::new("out.jpg")).is_err());
        assert!(check_output_format(Path::new("out")).is_err());
    }

    #[test]
    fn test_usage_names_the_program() {
        let args = vec!["./target/release/lattice".to_string()];
        assert!(usage(&args).starts_with("Usage: ./target/release/lattice <output"));
    }

    #[test]
    fn test_usage_without_argv() {
        assert!(usage(&[]).starts_with("Usage: lattice <output"));
    }
}
