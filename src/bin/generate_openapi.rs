//! Writes the dashboard API's OpenAPI document.
//!
//! Usage:
//!   cargo run --bin generate_openapi                      # stdout
//!   cargo run --bin generate_openapi -- --output          # ./solar_sensor_dashboard.openapi.json
//!   cargo run --bin generate_openapi -- --output api.json

use std::{
    env, fs,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{bail, Context, Result};
use solar_sensor_dashboard::api::handlers::ApiDoc;
use utoipa::OpenApi;

const DEFAULT_OUTPUT: &str = "solar_sensor_dashboard.openapi.json";

#[derive(Debug, PartialEq)]
enum Target {
    Stdout,
    File(PathBuf),
}

fn parse_target(args: &[String]) -> Result<Target> {
    match args {
        [] => Ok(Target::Stdout),
        [flag] if flag == "--output" => Ok(Target::File(DEFAULT_OUTPUT.into())),
        [flag, path] if flag == "--output" => Ok(Target::File(path.into())),
        other => bail!("usage: generate_openapi [--output [PATH]], got {other:?}"),
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let target = parse_target(&args)?;

    let doc = ApiDoc::openapi();
    let json = doc
        .to_pretty_json()
        .context("failed to serialise OpenAPI document")?;

    match target {
        Target::File(path) => {
            fs::write(&path, &json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!(
                "OpenAPI document ({} paths) written to {}",
                doc.paths.paths.len(),
                path.display()
            );
        }
        Target::Stdout => {
            io::stdout()
                .write_all(json.as_bytes())
                .context("failed to write to stdout")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_args_prints_to_stdout() {
        assert_eq!(parse_target(&[]).unwrap(), Target::Stdout);
    }

    #[test]
    fn bare_output_flag_uses_project_file_name() {
        assert_eq!(
            parse_target(&args(&["--output"])).unwrap(),
            Target::File(DEFAULT_OUTPUT.into())
        );
    }

    #[test]
    fn output_flag_with_path() {
        assert_eq!(
            parse_target(&args(&["--output", "api.json"])).unwrap(),
            Target::File("api.json".into())
        );
    }

    #[test]
    fn unknown_args_error() {
        let err = parse_target(&args(&["--format", "yaml"])).unwrap_err();
        assert!(err.to_string().contains("usage"));
    }

    #[test]
    fn document_lists_every_reading_route() {
        let doc = ApiDoc::openapi();
        for path in ["/data", "/get_data", "/download", "/reset", "/health"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
