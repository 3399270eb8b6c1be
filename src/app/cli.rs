// SPDX-License-Identifier: MPL-2.0
//! Command line flags.

use std::ffi::OsString;
use std::path::PathBuf;

pub const HELP: &str = "\
gallery_lens - a local art gallery

USAGE:
  gallery_lens [OPTIONS] <COMMAND>

OPTIONS:
  --data-dir <DIR>      Directory holding the gallery collections
  --config-dir <DIR>    Directory holding settings.toml
  -h, --help            Print this help

COMMANDS:
  list                                    List artworks, newest first
  search <QUERY>                          Search titles, artists and tags
  upload <FILE> --title <T> [--artist <A>] [--tags <a,b>]
  delete <ID> [--force]                   Delete one of your artworks
  like <ID>                               Like or unlike an artwork
  comment <ID> <TEXT>                     Comment on an artwork
  profile [--name <N>] [--avatar <KEY>] [--svg]
  view <ID | #artwork/ID>                 Open the viewer; events are read from stdin
  download <ID> [--dir <DIR>]             Save the image to disk
  share <ID> --base <URL>                 Print a link that opens the artwork
";

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flags {
    /// Data directory override. Takes precedence over `GALLERY_LENS_DATA_DIR`.
    pub data_dir: Option<String>,
    /// Config directory override. Takes precedence over `GALLERY_LENS_CONFIG_DIR`.
    pub config_dir: Option<String>,
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    List,
    Search {
        query: String,
    },
    Upload {
        file: PathBuf,
        title: String,
        artist: String,
        tags: String,
    },
    Delete {
        id: String,
        force: bool,
    },
    Like {
        id: String,
    },
    Comment {
        id: String,
        text: String,
    },
    Profile {
        name: Option<String>,
        avatar: Option<String>,
        svg: bool,
    },
    View {
        target: String,
    },
    Download {
        id: String,
        dir: Option<PathBuf>,
    },
    Share {
        id: String,
        base: String,
    },
}

impl Flags {
    /// Parses the process arguments.
    pub fn from_env() -> Result<Self, pico_args::Error> {
        Self::parse(pico_args::Arguments::from_env())
    }

    /// Parses `args`. Options are taken first, so they may appear anywhere.
    pub fn parse(mut args: pico_args::Arguments) -> Result<Self, pico_args::Error> {
        let help = args.contains(["-h", "--help"]);
        let data_dir = args.opt_value_from_str("--data-dir")?;
        let config_dir = args.opt_value_from_str("--config-dir")?;

        let subcommand = args.subcommand()?;
        let command = match subcommand.as_deref() {
            _ if help => Command::Help,
            None | Some("help") => Command::Help,
            Some("list") => Command::List,
            Some("search") => Command::Search {
                query: join_free(args.finish()),
            },
            Some("upload") => {
                let title = args.value_from_str("--title")?;
                let artist = args.opt_value_from_str("--artist")?.unwrap_or_default();
                let tags = args.opt_value_from_str("--tags")?.unwrap_or_default();
                let file = args.free_from_str()?;
                Command::Upload {
                    file,
                    title,
                    artist,
                    tags,
                }
            }
            Some("delete") => {
                let force = args.contains("--force");
                Command::Delete {
                    id: args.free_from_str()?,
                    force,
                }
            }
            Some("like") => Command::Like {
                id: args.free_from_str()?,
            },
            Some("comment") => {
                let id = args.free_from_str()?;
                Command::Comment {
                    id,
                    text: join_free(args.finish()),
                }
            }
            Some("profile") => Command::Profile {
                name: args.opt_value_from_str("--name")?,
                avatar: args.opt_value_from_str("--avatar")?,
                svg: args.contains("--svg"),
            },
            Some("view") => Command::View {
                target: args.free_from_str()?,
            },
            Some("download") => {
                let dir = args.opt_value_from_str("--dir")?;
                Command::Download {
                    id: args.free_from_str()?,
                    dir,
                }
            }
            Some("share") => {
                let base = args.value_from_str("--base")?;
                Command::Share {
                    id: args.free_from_str()?,
                    base,
                }
            }
            Some(other) => {
                return Err(pico_args::Error::ArgumentParsingFailed {
                    cause: format!("unknown command '{other}'"),
                })
            }
        };

        Ok(Self {
            data_dir,
            config_dir,
            command,
        })
    }
}

fn join_free(rest: Vec<OsString>) -> String {
    rest.iter()
        .map(|arg| arg.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
