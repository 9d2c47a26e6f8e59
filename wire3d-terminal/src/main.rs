/// wire3d - fly a camera around a wireframe mesh in the terminal
///
/// Usage: wire3d [MODEL.obj] [--config FILE] [--log FILE]
///
/// Without a model (or if it fails to load) a unit cube is shown.
/// Controls:
///   - W/S or Up/Down: Move toward / away from the target
///   - A/D or Left/Right: Strafe around the target
///   - Q/ESC: Quit
use anyhow::{bail, Context, Result};
use log::{info, warn};
use std::fs::File;
use std::path::{Path, PathBuf};
use wire3d_core::{Mesh, RenderConfig};

const DEFAULT_LOG: &str = "wire3d.log";

#[derive(Debug, Default)]
struct Args {
    model: Option<PathBuf>,
    config: Option<PathBuf>,
    log: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                parsed.config = Some(args.next().context("--config needs a file path")?.into());
            }
            "--log" => {
                parsed.log = Some(args.next().context("--log needs a file path")?.into());
            }
            flag if flag.starts_with("--") => bail!("unknown option {flag}"),
            _ if parsed.model.is_none() => parsed.model = Some(PathBuf::from(&arg)),
            _ => bail!("unexpected argument {arg}"),
        }
    }
    Ok(parsed)
}

/// Log to a file; the terminal belongs to the renderer.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn load_mesh(model: Option<&Path>) -> Mesh {
    let Some(path) = model else {
        info!("no model given, using the default cube");
        return Mesh::cube(0.0, 0.0, 0.0, 1.0);
    };
    match wire3d_core::load_obj(path) {
        Ok(load) => {
            info!(
                "loaded {}: {} vertices, {} triangles",
                path.display(),
                load.vertex_count,
                load.mesh.len()
            );
            if !load.skipped.is_empty() {
                eprintln!("{} malformed lines skipped (see log)", load.skipped.len());
            }
            load.mesh
        }
        Err(e) => {
            warn!("{e}, using the default cube");
            eprintln!("{e}\nFalling back to the default cube...");
            Mesh::cube(0.0, 0.0, 0.0, 1.0)
        }
    }
}

fn main() -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;
    let log_path = args.log.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_LOG));
    init_logging(&log_path)?;

    let config = match &args.config {
        Some(path) => RenderConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => RenderConfig::default(),
    };

    println!("wire3d - Loading...");
    let mesh = load_mesh(args.model.as_deref());

    println!("Starting wireframe renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    wire3d_terminal::run(mesh, &config)?;

    info!("exiting");
    println!("Thank you for using wire3d!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_args() {
        let parsed = args(&["teapot.obj", "--config", "w.toml", "--log", "out.log"]).unwrap();
        assert_eq!(parsed.model, Some(PathBuf::from("teapot.obj")));
        assert_eq!(parsed.config, Some(PathBuf::from("w.toml")));
        assert_eq!(parsed.log, Some(PathBuf::from("out.log")));

        assert!(args(&[]).unwrap().model.is_none());
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(args(&["--config"]).is_err());
        assert!(args(&["--verbose"]).is_err());
        assert!(args(&["a.obj", "b.obj"]).is_err());
    }
}
