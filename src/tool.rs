//! End-to-end orchestration of a topic edit: search, preview, confirm,
//! then one update call per matched repository.

use std::io::Read;

use crate::github;
use crate::terminal as term;
use crate::topics;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The search succeeded but returned no repositories.
    #[error("no repositories found matching query `{0}`")]
    NoMatches(String),
    #[error(transparent)]
    Remote(#[from] github::Error),
    #[error(transparent)]
    Input(#[from] term::io::InputError),
}

/// A topic-set edit applied to every repository matching a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Replace all existing topics with the given ones.
    Replace,
    /// Add the given topics to the existing ones.
    Add,
    /// Remove the given topics from the existing ones.
    Remove,
}

impl Operation {
    /// Desired end state of a repository's topics, deduplicated.
    pub fn desired(&self, existing: &[String], given: &[String]) -> Vec<String> {
        match self {
            Self::Replace => topics::dedup(given),
            Self::Add => topics::dedup(&[existing, given].concat()),
            Self::Remove => topics::dedup(&topics::difference(existing, given)),
        }
    }

    fn describe(&self, given: &[String], matches: usize) -> String {
        let labels = topics::join(given);

        match self {
            Self::Replace => {
                format!("Replace all topics with [{labels}] in {matches} repositories?")
            }
            Self::Add => format!("Add topics [{labels}] to {matches} repositories?"),
            Self::Remove => format!("Remove topics [{labels}] from {matches} repositories?"),
        }
    }
}

/// The calls the tool needs from the hosting service. Injected so tests
/// can substitute a fake.
pub trait Remote {
    fn search_repositories(&self, query: &str) -> Result<Vec<github::Repository>, github::Error>;

    fn replace_all_topics(
        &self,
        owner: &str,
        name: &str,
        topics: &[String],
    ) -> Result<Vec<String>, github::Error>;
}

impl Remote for github::Client {
    fn search_repositories(&self, query: &str) -> Result<Vec<github::Repository>, github::Error> {
        github::Client::search_repositories(self, query)
    }

    fn replace_all_topics(
        &self,
        owner: &str,
        name: &str,
        topics: &[String],
    ) -> Result<Vec<String>, github::Error> {
        github::Client::replace_all_topics(self, owner, name, topics)
    }
}

/// Run one end-to-end edit. With `confirm`, the operator is prompted on
/// `input` after the preview; answering "no" or quitting cancels the whole
/// operation. Every matched repository is updated; the first error aborts.
pub fn apply(
    remote: &impl Remote,
    input: impl Read,
    operation: Operation,
    query: &str,
    topics: &[String],
    confirm: bool,
) -> Result<(), Error> {
    let spinner = term::spinner(format!("Searching repositories matching `{query}`..."));
    let repositories = match remote.search_repositories(query) {
        Ok(repositories) => {
            spinner.clear();
            repositories
        }
        Err(err) => {
            spinner.failed();
            return Err(err.into());
        }
    };
    if repositories.is_empty() {
        return Err(Error::NoMatches(query.to_owned()));
    }
    log::debug!(target: "tool", "query `{query}` matched {} repositories", repositories.len());

    preview(&repositories);

    if confirm {
        term::blank();
        term::prompt(format!(
            "{} {}",
            term::format::bold(operation.describe(topics, repositories.len())),
            term::format::dim("[y/n/q]"),
        ));
    }
    if !term::ask_bool(input, true, !confirm)? {
        return Err(term::io::InputError::Aborted.into());
    }

    for repository in &repositories {
        let desired = operation.desired(&repository.topics, topics);
        let mut spinner = term::spinner(format!("Updating {}...", repository.full_name()));

        match remote.replace_all_topics(&repository.owner.login, &repository.name, &desired) {
            Ok(applied) => {
                spinner.message(format!(
                    "{}: topics set to [{}]",
                    repository.full_name(),
                    topics::join(&applied)
                ));
                spinner.finish();
            }
            Err(err) => {
                spinner.failed();
                return Err(err.into());
            }
        }
    }
    Ok(())
}

/// Render the preview table of matched repositories and their topics.
fn preview(repositories: &[github::Repository]) {
    let mut table = term::Table::<2>::default();

    table.push([
        term::format::bold("Repository Name").to_string(),
        term::format::bold("Topics").to_string(),
    ]);
    table.divider();

    for repository in repositories {
        table.push([repository.full_name(), topics::join(&repository.topics)]);
    }
    table.render();
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;
    use std::io::{self, Cursor};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::github::{Owner, Repository};

    #[derive(Default)]
    struct Fake {
        repositories: Vec<Repository>,
        updates: RefCell<Vec<(String, String, Vec<String>)>>,
        fail_updates: bool,
    }

    impl Remote for Fake {
        fn search_repositories(&self, _query: &str) -> Result<Vec<Repository>, github::Error> {
            Ok(self.repositories.clone())
        }

        fn replace_all_topics(
            &self,
            owner: &str,
            name: &str,
            topics: &[String],
        ) -> Result<Vec<String>, github::Error> {
            if self.fail_updates {
                return Err(github::Error::Response {
                    status: 403,
                    reason: "Forbidden".to_owned(),
                });
            }
            self.updates.borrow_mut().push((
                owner.to_owned(),
                name.to_owned(),
                topics.to_vec(),
            ));

            Ok(topics.to_vec())
        }
    }

    fn repository(owner: &str, name: &str, topics: &[&str]) -> Repository {
        Repository {
            name: name.to_owned(),
            owner: Owner {
                login: owner.to_owned(),
            },
            topics: strings(topics),
        }
    }

    fn strings(topics: &[&str]) -> Vec<String> {
        topics.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_desired_topics() {
        let existing = strings(&["rust", "cli"]);

        assert_eq!(
            Operation::Replace.desired(&existing, &strings(&["new", "new", "labels"])),
            strings(&["new", "labels"])
        );
        assert_eq!(
            Operation::Add.desired(&existing, &strings(&["tool", "rust"])),
            strings(&["rust", "cli", "tool"])
        );
        assert_eq!(
            Operation::Remove.desired(&existing, &strings(&["cli", "absent"])),
            strings(&["rust"])
        );
    }

    #[test]
    fn test_apply_updates_every_match() {
        let fake = Fake {
            repositories: vec![
                repository("acme", "one", &["old", "old"]),
                repository("acme", "two", &[]),
            ],
            ..Default::default()
        };

        apply(
            &fake,
            io::empty(),
            Operation::Replace,
            "org:acme",
            &strings(&["rust", "cli", "rust"]),
            false,
        )
        .unwrap();

        let updates = fake.updates.borrow();
        assert_eq!(updates.len(), 2);
        assert_eq!(
            updates[0],
            ("acme".into(), "one".into(), strings(&["rust", "cli"]))
        );
        assert_eq!(
            updates[1],
            ("acme".into(), "two".into(), strings(&["rust", "cli"]))
        );
    }

    #[test]
    fn test_apply_add_keeps_existing_topics() {
        let fake = Fake {
            repositories: vec![repository("acme", "one", &["rust"])],
            ..Default::default()
        };

        apply(
            &fake,
            io::empty(),
            Operation::Add,
            "org:acme",
            &strings(&["cli", "rust"]),
            false,
        )
        .unwrap();

        assert_eq!(fake.updates.borrow()[0].2, strings(&["rust", "cli"]));
    }

    #[test]
    fn test_apply_remove_subtracts_topics() {
        let fake = Fake {
            repositories: vec![repository("acme", "one", &["this", "is", "a", "test"])],
            ..Default::default()
        };

        apply(
            &fake,
            io::empty(),
            Operation::Remove,
            "org:acme",
            &strings(&["this", "a"]),
            false,
        )
        .unwrap();

        assert_eq!(fake.updates.borrow()[0].2, strings(&["is", "test"]));
    }

    #[test]
    fn test_apply_fails_with_no_matches_before_prompting() {
        let fake = Fake::default();

        for operation in [Operation::Replace, Operation::Add, Operation::Remove] {
            // `confirm` is on: reaching the prompt would read the empty
            // stream and cancel instead.
            let err = apply(
                &fake,
                io::empty(),
                operation,
                "org:acme",
                &strings(&["rust"]),
                true,
            )
            .unwrap_err();
            assert!(matches!(err, Error::NoMatches(ref q) if q == "org:acme"));
        }
        assert!(fake.updates.borrow().is_empty());
    }

    #[test]
    fn test_apply_proceeds_when_confirmed() {
        let fake = Fake {
            repositories: vec![repository("acme", "one", &[])],
            ..Default::default()
        };

        apply(
            &fake,
            Cursor::new("y\n"),
            Operation::Replace,
            "org:acme",
            &strings(&["rust"]),
            true,
        )
        .unwrap();

        assert_eq!(fake.updates.borrow().len(), 1);
    }

    #[test]
    fn test_apply_cancels_when_declined() {
        let fake = Fake {
            repositories: vec![repository("acme", "one", &[])],
            ..Default::default()
        };

        // Declining and quitting both cancel the whole operation.
        for answer in ["n\n", "q\n"] {
            let err = apply(
                &fake,
                Cursor::new(answer),
                Operation::Replace,
                "org:acme",
                &strings(&["rust"]),
                true,
            )
            .unwrap_err();

            assert!(matches!(
                err,
                Error::Input(term::io::InputError::Aborted)
            ));
        }
        assert!(fake.updates.borrow().is_empty());
    }

    #[test]
    fn test_apply_aborts_on_first_update_failure() {
        let fake = Fake {
            repositories: vec![
                repository("acme", "one", &[]),
                repository("acme", "two", &[]),
            ],
            fail_updates: true,
            ..Default::default()
        };

        let err = apply(
            &fake,
            io::empty(),
            Operation::Replace,
            "org:acme",
            &strings(&["rust"]),
            false,
        )
        .unwrap_err();

        assert!(matches!(err, Error::Remote(_)));
        assert!(fake.updates.borrow().is_empty());
    }
}
