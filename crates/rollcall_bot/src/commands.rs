//! Prefix command parsing.
//!
//! Parsing works on the message text after the prefix has been stripped.
//! Role mentions are read from the text itself (`<@&id>` tokens) rather
//! than the mention array, which does not preserve argument order.

use rollcall_error::{CommandError, CommandErrorKind, CommandResult};

/// A parsed operator command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Register a dashboard for a role in the invoking channel.
    Init {
        /// Role to track.
        role_id: u64,
    },
    /// Create a feat association.
    AddFeat {
        /// Tracked role the badge decorates.
        role_id: u64,
        /// Role whose holders receive the badge.
        feat_role_id: u64,
        /// Badge text or emoji.
        description: String,
    },
    /// Delete a feat association.
    RemoveFeat {
        /// Tracked role.
        role_id: u64,
        /// Badge role.
        feat_role_id: u64,
    },
    /// Show the feats registered for a role.
    ListFeat {
        /// Tracked role.
        role_id: u64,
    },
    /// Show usage text.
    Help,
}

impl Command {
    /// Parse the text after the command prefix.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] whose display text is suitable for
    /// showing to the invoking user. No state is touched on failure.
    pub fn parse(body: &str) -> CommandResult<Self> {
        let mut words = body.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CommandError::new(CommandErrorKind::Empty));
        };
        let rest: Vec<&str> = words.collect();

        match name {
            "init" => {
                let role_id = single_mention(&rest)?;
                Ok(Command::Init { role_id })
            }
            "add-feat" => {
                let (role_id, feat_role_id) = mention_pair(&rest)?;
                let description = rest[2..].join(" ");
                if description.is_empty() {
                    return Err(CommandError::new(CommandErrorKind::MissingDescription));
                }
                Ok(Command::AddFeat {
                    role_id,
                    feat_role_id,
                    description,
                })
            }
            "remove-feat" => {
                let (role_id, feat_role_id) = mention_pair(&rest)?;
                Ok(Command::RemoveFeat {
                    role_id,
                    feat_role_id,
                })
            }
            "list-feat" => {
                let role_id = single_mention(&rest)?;
                Ok(Command::ListFeat { role_id })
            }
            "help" => Ok(Command::Help),
            other => Err(CommandError::new(CommandErrorKind::UnknownCommand(
                other.to_string(),
            ))),
        }
    }
}

/// Static usage text, parameterized on the configured prefix.
pub fn usage(prefix: &str) -> String {
    format!(
        "Rollcall commands:\n\
         `{prefix} init @role` — track a role with a live dashboard in this channel\n\
         `{prefix} add-feat @tracked-role @feat-role <description>` — badge feat-role holders\n\
         `{prefix} remove-feat @tracked-role @feat-role` — drop a badge\n\
         `{prefix} list-feat @tracked-role` — show registered badges\n\
         `{prefix} help` — this text\n\
         React with the removal emoji on a dashboard message to stop tracking it."
    )
}

/// Parse a `<@&id>` role mention token.
fn role_mention(token: &str) -> Option<u64> {
    token
        .strip_prefix("<@&")?
        .strip_suffix('>')?
        .parse()
        .ok()
}

fn single_mention(rest: &[&str]) -> CommandResult<u64> {
    let found = rest.iter().filter_map(|t| role_mention(t)).count();
    match rest {
        [token] => role_mention(token).ok_or_else(|| {
            CommandError::new(CommandErrorKind::WrongMentionCount { expected: 1, found })
        }),
        _ => Err(CommandError::new(CommandErrorKind::WrongMentionCount {
            expected: 1,
            found,
        })),
    }
}

fn mention_pair(rest: &[&str]) -> CommandResult<(u64, u64)> {
    let first = rest.first().and_then(|t| role_mention(t));
    let second = rest.get(1).and_then(|t| role_mention(t));
    match (first, second) {
        (Some(role_id), Some(feat_role_id)) => Ok((role_id, feat_role_id)),
        (first, second) => Err(CommandError::new(CommandErrorKind::WrongMentionCount {
            expected: 2,
            found: usize::from(first.is_some()) + usize::from(second.is_some()),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcall_error::CommandErrorKind;

    #[test]
    fn parses_init() {
        let command = Command::parse("init <@&123>").expect("valid init");
        assert_eq!(command, Command::Init { role_id: 123 });
    }

    #[test]
    fn init_requires_exactly_one_mention() {
        let err = Command::parse("init").expect_err("no mention");
        assert_eq!(
            err.kind(),
            &CommandErrorKind::WrongMentionCount {
                expected: 1,
                found: 0
            }
        );

        let err = Command::parse("init <@&1> <@&2>").expect_err("two mentions");
        assert_eq!(
            err.kind(),
            &CommandErrorKind::WrongMentionCount {
                expected: 1,
                found: 2
            }
        );
    }

    #[test]
    fn init_rejects_plain_text_argument() {
        let err = Command::parse("init Raiders").expect_err("not a mention");
        assert_eq!(
            err.kind(),
            &CommandErrorKind::WrongMentionCount {
                expected: 1,
                found: 0
            }
        );
    }

    #[test]
    fn parses_add_feat_with_multiword_description() {
        let command = Command::parse("add-feat <@&1> <@&2> raid leader ⭐").expect("valid");
        assert_eq!(
            command,
            Command::AddFeat {
                role_id: 1,
                feat_role_id: 2,
                description: "raid leader ⭐".to_string(),
            }
        );
    }

    #[test]
    fn add_feat_requires_description() {
        let err = Command::parse("add-feat <@&1> <@&2>").expect_err("no description");
        assert_eq!(err.kind(), &CommandErrorKind::MissingDescription);
    }

    #[test]
    fn add_feat_requires_two_mentions() {
        let err = Command::parse("add-feat <@&1> star").expect_err("one mention");
        assert_eq!(
            err.kind(),
            &CommandErrorKind::WrongMentionCount {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn parses_remove_and_list() {
        assert_eq!(
            Command::parse("remove-feat <@&1> <@&2>").expect("valid"),
            Command::RemoveFeat {
                role_id: 1,
                feat_role_id: 2
            }
        );
        assert_eq!(
            Command::parse("list-feat <@&1>").expect("valid"),
            Command::ListFeat { role_id: 1 }
        );
    }

    #[test]
    fn parses_help_and_rejects_unknown() {
        assert_eq!(Command::parse("help").expect("valid"), Command::Help);
        let err = Command::parse("frobnicate").expect_err("unknown");
        assert_eq!(
            err.kind(),
            &CommandErrorKind::UnknownCommand("frobnicate".to_string())
        );
    }

    #[test]
    fn empty_body_is_an_error() {
        let err = Command::parse("   ").expect_err("empty");
        assert_eq!(err.kind(), &CommandErrorKind::Empty);
    }

    #[test]
    fn usage_names_every_command() {
        let text = usage("!rollcall");
        for command in ["init", "add-feat", "remove-feat", "list-feat", "help"] {
            assert!(text.contains(command), "usage should mention {command}");
        }
    }
}
