// src/cli.rs
use std::{env, path::{Path, PathBuf}};

use crate::config::options::{AppOptions, Source};
use crate::fetch::auth::terminal_attached;
use crate::runner::{self, Progress, RunSummary};

pub const HELP: &str = include_str!("cli_help.txt");

pub enum Mode {
    Run(AppOptions),
    Help,
}

/// Prints progress lines to stdout.
pub struct CliProgress;

impl Progress for CliProgress {
    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn file_written(&mut self, path: &Path) {
        println!("Wrote {}", path.display());
    }
}

pub fn detect_mode() -> Result<Mode, Box<dyn std::error::Error>> {
    let mut mode = parse_args(env::args().skip(1))?;
    if let Mode::Run(opts) = &mut mode {
        opts.fetch.interactive = terminal_attached();
    }
    Ok(mode)
}

pub fn run() -> Result<Option<RunSummary>, Box<dyn std::error::Error>> {
    match detect_mode()? {
        Mode::Help => {
            println!("{HELP}");
            Ok(None)
        }
        Mode::Run(opts) => runner::run(&opts, &mut CliProgress).map(Some),
    }
}

pub fn parse_args<I>(args: I) -> Result<Mode, Box<dyn std::error::Error>>
where
    I: IntoIterator<Item = String>,
{
    let mut opts = AppOptions::default();
    let mut positional: Option<String> = None;
    let mut args = args.into_iter();

    while let Some(a) = args.next() {
        match a.as_str() {
            "-s" | "--search" => {
                let v = args.next().ok_or("Missing value for --search")?;
                if v.is_empty() { return Err("Search text must not be empty".into()); }
                opts.fetch.search = v; }
            "-o" | "--out" => opts.export.out_dir = PathBuf::from(args.next().ok_or("Missing output directory")?),
            "--name" => {
                let v = args.next().ok_or("Missing value for --name")?;
                if v.is_empty() || v.contains(['/', '\\']) {
                    return Err(format!("Invalid file name: {:?}", v).into());
                }
                opts.export.file_stem = v; }
            "--credentials" => opts.fetch.credentials_path = PathBuf::from(args.next().ok_or("Missing credentials path")?),
            "--secrets" => opts.fetch.client_secrets_path = PathBuf::from(args.next().ok_or("Missing secrets path")?),
            "--port" => {
                let v: u16 = args.next().ok_or("Missing value for --port")?.parse()?;
                opts.fetch.redirect_port = v; }
            "--no-show" => opts.show = false,
            "-h" | "--help" => return Ok(Mode::Help),
            other if other.starts_with('-') && other.len() > 1 => {
                return Err(format!("Unknown arg: {}", other).into());
            }
            _ => {
                if positional.is_some() { return Err(format!("Unexpected extra argument: {}", a).into()); }
                positional = Some(a);
            }
        }
    }

    if let Some(p) = positional {
        opts.source = Source::Local(p);
    }
    Ok(Mode::Run(opts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Mode, Box<dyn std::error::Error>> {
        parse_args(args.iter().map(|a| s!(*a)))
    }

    fn opts(args: &[&str]) -> AppOptions {
        match parse(args).unwrap() {
            Mode::Run(o) => o,
            Mode::Help => panic!("expected run mode"),
        }
    }

    #[test]
    fn no_args_is_default_remote_run() {
        assert_eq!(opts(&[]), AppOptions::default());
    }

    #[test]
    fn flags_override_defaults() {
        let o = opts(&["-s", "Glucose log", "-o", "charts", "--name", "jan", "--port", "9000", "--no-show"]);
        assert_eq!(o.fetch.search, "Glucose log");
        assert_eq!(o.export.png_path(), PathBuf::from("charts").join("jan.png"));
        assert_eq!(o.fetch.redirect_port, 9000);
        assert!(!o.show);
        assert_eq!(o.source, Source::Remote);
    }

    #[test]
    fn positional_is_local_source() {
        let o = opts(&["export.html", "--no-show"]);
        assert_eq!(o.source, Source::Local(s!("export.html")));
    }

    #[test]
    fn bad_args_are_errors() {
        assert!(parse(&["--bogus"]).is_err());
        assert!(parse(&["--port", "http"]).is_err());
        assert!(parse(&["--search"]).is_err());
        assert!(parse(&["--search", ""]).is_err());
        assert!(parse(&["--name", "a/b"]).is_err());
        assert!(parse(&["a.html", "b.html"]).is_err());
    }

    #[test]
    fn help_short_circuits() {
        assert!(matches!(parse(&["--no-show", "-h", "--bogus"]).unwrap(), Mode::Help));
    }
}
