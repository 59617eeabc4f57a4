// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Scale Invariant

use std::path::PathBuf;

use gridspec::{config_dir, deploy_defaults, CalculatedSpec, GridRequest, GridSpecs, LoadOptions, ResponsiveSpec};

const USAGE: &str = "usage:
  gridspec resolve <aspectRatio> <width> <height> <columns> <rows> [--dir DIR] [--density D]
  gridspec deploy [--dir DIR]";

struct Flags {
    dir: PathBuf,
    density: f32,
}

/// Split `--dir` / `--density` out of `args`, returning the positionals
fn parse_flags(args: &[String]) -> Result<(Vec<&str>, Flags), String> {
    let mut flags = Flags { dir: config_dir(), density: 1.0 };
    let mut positional = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--dir" => {
                let value = iter.next().ok_or("--dir needs a value")?;
                flags.dir = PathBuf::from(value);
            }
            "--density" => {
                let value = iter.next().ok_or("--density needs a value")?;
                flags.density = value
                    .parse()
                    .map_err(|_| format!("invalid density '{}'", value))?;
                if !(flags.density.is_finite() && flags.density > 0.0) {
                    return Err(format!("density must be positive, got {}", value));
                }
            }
            other if other.starts_with("--") => return Err(format!("unknown flag {}", other)),
            other => positional.push(other),
        }
    }

    Ok((positional, flags))
}

fn number<T: std::str::FromStr>(name: &str, text: &str) -> Result<T, String> {
    text.parse().map_err(|_| format!("invalid {} '{}'", name, text))
}

fn print_spec(label: &str, spec: &CalculatedSpec) {
    let source = spec.source();
    println!(
        "{:<16} {:<6} available={:<5} cells={:<2} [ratio<={} size<={}] {:?}",
        label,
        spec.axis(),
        spec.available_space(),
        spec.cell_count(),
        source.max_aspect_ratio,
        source.max_available_size,
        spec.sizes()
    );
}

fn run_resolve(args: &[String]) -> Result<(), String> {
    let (positional, flags) = parse_flags(args)?;
    let [ratio, width, height, columns, rows] = positional.as_slice() else {
        return Err(USAGE.to_string());
    };

    let request = GridRequest::new(
        number("aspect ratio", ratio)?,
        number("width", width)?,
        number("height", height)?,
        number("columns", columns)?,
        number("rows", rows)?,
    );

    let options = LoadOptions { density: flags.density };
    let specs = GridSpecs::load(&flags.dir, &options).map_err(|e| e.to_string())?;
    let grid = specs.resolve_grid(&request).map_err(|e| e.to_string())?;

    for (label, pair) in [
        ("workspace", &grid.workspace),
        ("all_apps", &grid.all_apps),
        ("folder", &grid.folder),
        ("hotseat", &grid.hotseat),
    ] {
        print_spec(label, &pair.width);
        print_spec(label, &pair.height);
    }
    print_spec("workspace_cell", &grid.workspace_cell);
    print_spec("all_apps_cell", &grid.all_apps_cell);

    Ok(())
}

fn run_deploy(args: &[String]) -> Result<(), String> {
    let (positional, flags) = parse_flags(args)?;
    if !positional.is_empty() {
        return Err(USAGE.to_string());
    }

    let written = deploy_defaults(&flags.dir).map_err(|e| e.to_string())?;
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.first().map(String::as_str) {
        Some("resolve") => run_resolve(&args[1..]),
        Some("deploy") => run_deploy(&args[1..]),
        _ => Err(USAGE.to_string()),
    };

    if let Err(message) = result {
        eprintln!("gridspec: {}", message);
        std::process::exit(1);
    }
}
