use std::ffi::OsString;
use std::io;

use anyhow::anyhow;
use nonempty::NonEmpty;

use crate::terminal as term;
use crate::terminal::args::{Args, Error, Help};
use crate::tool;

pub const HELP: Help = Help {
    name: "add",
    description: "Add topics to repositories matching a query",
    version: env!("CARGO_PKG_VERSION"),
    usage: r#"
Usage

    topictool add <query> <topic>... [<option>...]

    Adds the given topics to the existing ones, on every repository
    matching the search query. Topics already present are kept once.

Options

    --no-confirm        Do not ask for confirmation before updating
    --help              Print help
"#,
};

pub struct Options {
    pub query: String,
    pub topics: NonEmpty<String>,
    pub confirm: bool,
}

impl Args for Options {
    fn from_args(args: Vec<OsString>) -> anyhow::Result<(Self, Vec<OsString>)> {
        use lexopt::prelude::*;

        let mut parser = lexopt::Parser::from_args(args);
        let mut query: Option<String> = None;
        let mut topics: Vec<String> = Vec::new();
        let mut confirm = true;

        while let Some(arg) = parser.next()? {
            match arg {
                Long("no-confirm") => {
                    confirm = false;
                }
                Long("help") | Short('h') => {
                    return Err(Error::Help.into());
                }
                Value(val) if query.is_none() => {
                    query = Some(val.to_string_lossy().to_string());
                }
                Value(val) => {
                    topics.push(val.to_string_lossy().to_string());
                }
                _ => return Err(anyhow!(arg.unexpected())),
            }
        }

        Ok((
            Options {
                query: query.ok_or(Error::Usage)?,
                topics: NonEmpty::from_vec(topics).ok_or(Error::Usage)?,
                confirm,
            },
            vec![],
        ))
    }
}

pub fn run(options: Options, ctx: impl term::Context) -> anyhow::Result<()> {
    let client = ctx.client()?;
    let topics = options.topics.into_iter().collect::<Vec<_>>();

    tool::apply(
        &client,
        io::stdin(),
        tool::Operation::Add,
        &options.query,
        &topics,
        options.confirm,
    )?;
    term::blank();
    term::success("Done!");

    Ok(())
}
