//! Clap adapter for navicfg.
//!
//! Compiled only with the `clap` Cargo feature (on by default). [`Cli`] is
//! the full argument surface of the `navicfg` binary. The only bridge to the
//! core is [`Command::into_action()`], which turns parsed arguments into a
//! framework-agnostic [`ConfigAction`](crate::ConfigAction); everything after
//! that goes through [`Session::handle()`](crate::Session::handle).

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::builder::{Navicfg, NavicfgBuilder};
use crate::error::NavicfgError;
use crate::session::Session;
use crate::types::{ConfigAction, SearchPath};

/// Edit a Navidrome configuration file.
#[derive(Debug, Parser)]
#[command(name = "navicfg", version)]
pub struct Cli {
    /// Config file to use instead of ./navidrome.toml. A malformed file is
    /// an error rather than being treated as empty.
    #[arg(short, long, global = true, conflicts_with = "platform")]
    pub file: Option<PathBuf>,

    /// Use navidrome.toml in the platform config directory.
    #[arg(long, global = true)]
    pub platform: bool,

    /// Refuse files that contain keys this tool does not edit.
    #[arg(long, global = true)]
    pub strict: bool,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// More log output (-v info, -vv debug). NAVICFG_LOG overrides this.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum Command {
    /// Show every setting grouped by section (the default).
    Show,
    /// Print every effective setting as `Key = value`.
    List,
    /// Show one setting with its documentation and default.
    Get {
        /// Setting name, any case (e.g. "port").
        key: String,
    },
    /// Change settings and save the whole file.
    Set {
        /// One or more `Key=value` assignments.
        #[arg(required = true, value_parser = parse_assignment)]
        assignments: Vec<(String, String)>,
    },
    /// Put a setting back to its default and save.
    Reset {
        /// Setting to reset.
        #[arg(required_unless_present = "all")]
        key: Option<String>,
        /// Reset every setting.
        #[arg(long, conflicts_with = "key")]
        all: bool,
    },
    /// Print the config file exactly as stored.
    Raw,
    /// Generate a commented template with every setting at its default.
    Gen {
        /// Write to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Walk through every setting interactively.
    Edit,
}

impl Command {
    /// Convert into a framework-agnostic `ConfigAction`. `Edit` has none:
    /// it needs a terminal and is driven by the binary.
    pub fn into_action(self) -> Option<ConfigAction> {
        Some(match self {
            Command::Show => ConfigAction::Show,
            Command::List => ConfigAction::List,
            Command::Get { key } => ConfigAction::Get { key },
            Command::Set { assignments } => ConfigAction::Set { assignments },
            Command::Reset { key, all } => ConfigAction::Reset {
                key: if all { None } else { key },
            },
            Command::Raw => ConfigAction::Raw,
            Command::Gen { output } => ConfigAction::Gen { output },
            Command::Edit => return None,
        })
    }
}

impl Cli {
    pub fn builder(&self) -> NavicfgBuilder {
        let builder = Navicfg::builder().strict(self.strict);
        if self.platform {
            builder.search_path(SearchPath::Platform)
        } else {
            builder
        }
    }

    /// Open the session the flags describe. `--file` counts as a file the
    /// user picked; otherwise the default location is opened leniently.
    pub fn open(&self) -> Result<Session, NavicfgError> {
        match &self.file {
            Some(path) => self.builder().open_file(path.clone()),
            None => self.builder().open(),
        }
    }
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected Key=value, got '{s}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    fn action(args: &[&str]) -> Option<ConfigAction> {
        parse(args).command.and_then(Command::into_action)
    }

    #[test]
    fn bare_invocation_has_no_command() {
        let cli = parse(&["navicfg"]);
        assert_eq!(cli.command, None);
        assert!(!cli.strict);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn parse_get() {
        assert_eq!(
            action(&["navicfg", "get", "port"]),
            Some(ConfigAction::Get { key: "port".into() })
        );
    }

    #[test]
    fn parse_set_multiple() {
        assert_eq!(
            action(&["navicfg", "set", "Port=4600", "ScanSchedule=@every 6h"]),
            Some(ConfigAction::Set {
                assignments: vec![
                    ("Port".into(), "4600".into()),
                    ("ScanSchedule".into(), "@every 6h".into()),
                ],
            })
        );
    }

    #[test]
    fn parse_set_keeps_equals_in_value() {
        assert_eq!(
            action(&["navicfg", "set", "MusicFolder=/srv/a=b"]),
            Some(ConfigAction::Set {
                assignments: vec![("MusicFolder".into(), "/srv/a=b".into())],
            })
        );
    }

    #[test]
    fn parse_set_empty_value_clears() {
        assert_eq!(
            action(&["navicfg", "set", "LogFile="]),
            Some(ConfigAction::Set {
                assignments: vec![("LogFile".into(), String::new())],
            })
        );
    }

    #[test]
    fn set_requires_assignment_syntax() {
        assert!(Cli::try_parse_from(["navicfg", "set", "Port"]).is_err());
        assert!(Cli::try_parse_from(["navicfg", "set"]).is_err());
    }

    #[test]
    fn parse_reset() {
        assert_eq!(
            action(&["navicfg", "reset", "Theme"]),
            Some(ConfigAction::Reset {
                key: Some("Theme".into())
            })
        );
        assert_eq!(
            action(&["navicfg", "reset", "--all"]),
            Some(ConfigAction::Reset { key: None })
        );
        assert!(Cli::try_parse_from(["navicfg", "reset"]).is_err());
    }

    #[test]
    fn parse_gen_with_output() {
        assert_eq!(
            action(&["navicfg", "gen", "-o", "out.toml"]),
            Some(ConfigAction::Gen {
                output: Some(PathBuf::from("out.toml"))
            })
        );
    }

    #[test]
    fn edit_has_no_action() {
        assert_eq!(action(&["navicfg", "edit"]), None);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["navicfg", "list", "--file", "/etc/nd.toml", "-vv", "--json"]);
        assert_eq!(cli.file, Some(PathBuf::from("/etc/nd.toml")));
        assert_eq!(cli.verbose, 2);
        assert!(cli.json);
    }

    #[test]
    fn file_conflicts_with_platform() {
        assert!(Cli::try_parse_from(["navicfg", "--file", "a.toml", "--platform"]).is_err());
    }

    #[test]
    fn invalid_subcommand_errors() {
        assert!(Cli::try_parse_from(["navicfg", "nope"]).is_err());
    }
}
