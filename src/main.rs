//! Binary entry point for the orbit-cube viewer.

use std::path::PathBuf;
use std::process::ExitCode;

use orbit_cube::options::Options;
use orbit_cube::Viewer;

struct Args {
    mesh_path: Option<PathBuf>,
    options_path: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        mesh_path: None,
        options_path: None,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--options" => {
                let value = iter
                    .next()
                    .ok_or("--options requires a TOML file path")?;
                args.options_path = Some(PathBuf::from(value));
            }
            "--help" | "-h" => {
                return Err(
                    "Usage: orbit-cube [MESH.obj] [--options OPTIONS.toml]"
                        .to_owned(),
                );
            }
            _ if args.mesh_path.is_none() => {
                args.mesh_path = Some(PathBuf::from(arg));
            }
            _ => return Err(format!("unexpected argument: {arg}")),
        }
    }
    Ok(args)
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            log::error!("{message}");
            return ExitCode::FAILURE;
        }
    };

    let mut builder = Viewer::builder();
    if let Some(path) = &args.mesh_path {
        builder = builder.with_mesh_path(path);
    }
    if let Some(path) = &args.options_path {
        match Options::load(path) {
            Ok(options) => builder = builder.with_options(options),
            Err(e) => {
                log::error!("failed to load options: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    match builder.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
