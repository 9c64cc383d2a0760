pub mod args;
pub use args::{Args, Error, Help};
pub mod format;
pub mod io;
pub use io::*;
pub mod spinner;
pub use spinner::{spinner, Spinner};
pub mod table;
pub use table::Table;

use std::ffi::OsString;
use std::process;

use crate::github;
use crate::tool;

/// Environment variable supplying the personal access token.
pub const GH_ACCESS_TOKEN: &str = "GH_ACCESS_TOKEN";

/// Context passed to all commands.
pub trait Context {
    /// Return an authenticated client for the hosting service, or an error
    /// if no credentials are configured.
    fn client(&self) -> Result<github::Client, anyhow::Error>;
}

/// A command that can be run.
pub trait Command<A: Args, C: Context> {
    /// Run the command, given arguments and a context.
    fn run(self, args: A, context: C) -> anyhow::Result<()>;
}

impl<F, A: Args, C: Context> Command<A, C> for F
where
    F: FnOnce(A, C) -> anyhow::Result<()>,
{
    fn run(self, args: A, context: C) -> anyhow::Result<()> {
        self(args, context)
    }
}

pub fn run_command_args<A, C>(help: Help, cmd: C, args: Vec<OsString>) -> !
where
    A: Args,
    C: Command<A, DefaultContext>,
{
    let options = match A::from_args(args) {
        Ok((opts, unparsed)) => {
            if let Err(err) = args::finish(unparsed) {
                io::error(err);
                process::exit(1);
            }
            opts
        }
        Err(err) => {
            let hint = match err.downcast_ref::<Error>() {
                Some(Error::Help) => {
                    help.print();
                    process::exit(0);
                }
                Some(Error::Usage) => {
                    io::usage(help.name, help.usage);
                    process::exit(1);
                }
                Some(Error::WithHint { hint, .. }) => Some(hint),
                None => None,
            };
            io::error(format!("topictool {}: {err}", help.name));

            if let Some(hint) = hint {
                io::hint(hint);
            }
            process::exit(1);
        }
    };

    match cmd.run(options, DefaultContext) {
        Ok(()) => process::exit(0),
        Err(err) => {
            fail(help.name, &err);
            process::exit(1);
        }
    }
}

/// Builds the client from the environment. Fails if no token is set.
pub struct DefaultContext;

impl Context for DefaultContext {
    fn client(&self) -> Result<github::Client, anyhow::Error> {
        match std::env::var(GH_ACCESS_TOKEN) {
            Ok(token) if !token.is_empty() => Ok(github::Client::new(token)),
            _ => Err(args::Error::WithHint {
                err: anyhow::anyhow!("no personal access token found in `{GH_ACCESS_TOKEN}`"),
                hint: "set the `GH_ACCESS_TOKEN` environment variable to a token with the `repo` scope.",
            }
            .into()),
        }
    }
}

pub fn fail(_name: &str, error: &anyhow::Error) {
    // A prompt abort is a normal cancellation, not worth alarming anyone.
    if is_abort(error) {
        io::info(format::dim("Operation aborted."));
        return;
    }

    let err = error.to_string();
    let err = err.trim_end();

    for line in err.lines() {
        io::error(line);
    }

    if let Some(Error::WithHint { hint, .. }) = error.downcast_ref::<Error>() {
        io::hint(hint);
    }
}

fn is_abort(error: &anyhow::Error) -> bool {
    match error.downcast_ref::<tool::Error>() {
        Some(tool::Error::Input(io::InputError::Aborted)) => true,
        _ => matches!(
            error.downcast_ref::<io::InputError>(),
            Some(io::InputError::Aborted)
        ),
    }
}
