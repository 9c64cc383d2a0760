use std::ffi::OsString;
use std::io;

use anyhow::anyhow;
use nonempty::NonEmpty;

use crate::terminal as term;
use crate::terminal::args::{Args, Error, Help};
use crate::tool;

pub const HELP: Help = Help {
    name: "replace",
    description: "Replace all topics on repositories matching a query",
    version: env!("CARGO_PKG_VERSION"),
    usage: r#"
Usage

    topictool replace <query> <topic>... [<option>...]

    Replaces all existing topics with the given ones, on every repository
    matching the search query.

Options

    --no-confirm        Do not ask for confirmation before updating
    --help              Print help
"#,
};

#[derive(Debug)]
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
        tool::Operation::Replace,
        &options.query,
        &topics,
        options.confirm,
    )?;
    term::blank();
    term::success("Done!");

    Ok(())
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn args(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_options_parsing() {
        let (options, unparsed) =
            Options::from_args(args(&["org:acme", "rust", "cli"])).unwrap();

        assert!(unparsed.is_empty());
        assert_eq!(options.query, "org:acme");
        assert!(options.confirm);
        assert_eq!(
            options.topics.into_iter().collect::<Vec<_>>(),
            vec!["rust", "cli"]
        );

        let (options, _) =
            Options::from_args(args(&["--no-confirm", "org:acme", "rust"])).unwrap();
        assert!(!options.confirm);
    }

    #[test]
    fn test_options_require_query_and_topics() {
        // Too few arguments print usage, like the other subcommands.
        for missing in [&[][..], &["org:acme"][..]] {
            let err = Options::from_args(args(missing)).unwrap_err();
            assert!(matches!(err.downcast_ref::<Error>(), Some(Error::Usage)));
        }
    }
}
