use std::ffi::OsString;
use std::io;
use std::{iter, process};

use anyhow::anyhow;

use topictool::commands::*;
use topictool::logger;
use topictool::terminal as term;

pub const NAME: &str = "topictool";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = "Manage topic labels on GitHub repositories in bulk";
pub const GIT_HEAD: &str = env!("GIT_HEAD");

pub const USAGE: &str = r#"
Usage

    topictool <command> <query> <topic>... [<option>...]

    Replaces, adds or removes topic labels on every GitHub repository
    matching a search query. A personal access token must be provided
    via the GH_ACCESS_TOKEN environment variable.

Commands

    replace             Replace all topics on matched repositories
    add                 Add topics to matched repositories
    rm                  Remove topics from matched repositories

    The search query syntax is owned by GitHub, see
    https://docs.github.com/en/rest/search#search-repositories

Options

    --version           Print version
    --help, -h          Print help
"#;

#[derive(Debug)]
enum Command {
    Other(Vec<OsString>),
    Help,
    Version,
}

fn main() {
    if let Some(level) = logger::env_level() {
        logger::init(level).ok();
    }

    match parse_args().map_err(Some).and_then(run) {
        Ok(_) => process::exit(0),
        Err(err) => {
            if let Some(err) = err {
                term::error(format!("Error: {NAME}: {err}"));
            }
            process::exit(1);
        }
    }
}

fn parse_args() -> anyhow::Result<Command> {
    use lexopt::prelude::*;

    let mut parser = lexopt::Parser::from_env();
    let mut command = None;

    while let Some(arg) = parser.next()? {
        match arg {
            Long("help") | Short('h') => {
                command = Some(Command::Help);
            }
            Long("version") => {
                command = Some(Command::Version);
            }
            Value(val) if command.is_none() => {
                let args = iter::once(val)
                    .chain(iter::from_fn(|| parser.value().ok()))
                    .collect();

                command = Some(Command::Other(args));
            }
            _ => return Err(anyhow!(arg.unexpected())),
        }
    }

    Ok(command.unwrap_or_else(|| Command::Other(vec![])))
}

/// Print the tool's version.
fn print_version(mut w: impl io::Write) -> anyhow::Result<()> {
    if VERSION.contains("-dev") {
        writeln!(w, "{NAME} {VERSION}+{GIT_HEAD}")?;
    } else {
        writeln!(w, "{NAME} {VERSION} ({GIT_HEAD})")?;
    }
    Ok(())
}

fn print_help() -> anyhow::Result<()> {
    print_version(&mut io::stdout())?;
    println!("{DESCRIPTION}");
    println!("{USAGE}");

    Ok(())
}

fn run(command: Command) -> Result<(), Option<anyhow::Error>> {
    match command {
        Command::Version => {
            print_version(&mut io::stdout())?;
        }
        Command::Help => {
            print_help()?;
        }
        Command::Other(args) => {
            let exe = args.first();

            if let Some(Some(exe)) = exe.map(|s| s.to_str()) {
                run_other(exe, &args[1..])?;
            } else {
                term::error(format!("Error: {NAME}: a command must be specified"));
                eprintln!("{USAGE}");
                return Err(None);
            }
        }
    }

    Ok(())
}

fn run_other(exe: &str, args: &[OsString]) -> Result<(), Option<anyhow::Error>> {
    match exe {
        "replace" => {
            term::run_command_args::<topic_replace::Options, _>(
                topic_replace::HELP,
                topic_replace::run,
                args.to_vec(),
            );
        }
        "add" => {
            term::run_command_args::<topic_add::Options, _>(
                topic_add::HELP,
                topic_add::run,
                args.to_vec(),
            );
        }
        "rm" => {
            term::run_command_args::<topic_rm::Options, _>(
                topic_rm::HELP,
                topic_rm::run,
                args.to_vec(),
            );
        }
        _ => {
            term::error(format!("Error: {NAME}: unknown command `{exe}`"));
            eprintln!("{USAGE}");
            return Err(None);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Ensure version output is consistent for consumption by third parties.
    #[test]
    fn test_version() {
        let mut buffer = Vec::new();
        print_version(&mut buffer).unwrap();
        let str = std::str::from_utf8(&buffer).unwrap();

        let mut strs = str.split(' ');
        assert_eq!(NAME, strs.next().unwrap_or_default(), "program name");

        let version = strs.next().unwrap_or_default();
        let core = version.split(['-', '+']).next().unwrap_or_default();
        assert_eq!(
            core.split('.')
                .filter(|v| v.parse::<u32>().is_ok())
                .count(),
            3,
            "semantic version"
        );
    }
}
