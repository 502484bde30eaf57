use std::ffi::OsString;

pub use clap::Parser;
use clap::{Args, Subcommand};

use crate::config::DEFAULT_PROFILE_NAME;
use crate::form::MemoryForm;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Profile name
    /// Optional. Profile to read the server from. Default is 'default'.
    /// If the profile is not configured, the local default server is used.
    #[clap(short = 'p', long, default_value = DEFAULT_PROFILE_NAME, help = "profile name")]
    profile: String,

    /// Server override
    /// Optional. Base URL used instead of the profile's server.
    #[clap(short = 's', long, help = "server base URL, overrides the profile")]
    server: Option<String>,

    /// Verbose mode
    /// Optional. Print verbose messages.
    #[clap(
        short = 'v',
        long,
        help = "Print verbose message",
        default_value = "false"
    )]
    verbose: bool,

    #[clap(subcommand)]
    command: ClapCommand,
}

#[derive(Subcommand, Debug)]
enum ClapCommand {
    /// Create a user (POST /api/users)
    Create(UserFields),
    /// List users (GET /api/users)
    List,
    /// Replace a user (PUT /api/users/{id})
    Update {
        id: String,
        #[clap(flatten)]
        fields: UserFields,
    },
    /// Partially update a user (PATCH /api/users/{id})
    Patch {
        id: String,
        #[clap(flatten)]
        fields: UserFields,
    },
    /// Delete a user (DELETE /api/users/{id})
    Delete { id: String },
}

/// Form fields; any flag left out is sent as an empty string
#[derive(Args, Debug, Clone, Default)]
struct UserFields {
    #[clap(long, help = "user name")]
    name: Option<String>,
    #[clap(long, help = "user email")]
    email: Option<String>,
    #[clap(long, help = "user password")]
    password: Option<String>,
}

impl UserFields {
    fn into_form(self) -> MemoryForm {
        MemoryForm::from_optional(self.name, self.email, self.password)
    }
}

/// Operation selected on the command line, with its form already filled in
#[derive(Debug, Clone)]
pub enum UserCommand {
    Create { form: MemoryForm },
    List,
    Update { id: String, form: MemoryForm },
    Patch { id: String, form: MemoryForm },
    Delete { id: String },
}

impl ClapCommand {
    fn into_user_command(self) -> UserCommand {
        match self {
            ClapCommand::Create(fields) => UserCommand::Create {
                form: fields.into_form(),
            },
            ClapCommand::List => UserCommand::List,
            ClapCommand::Update { id, fields } => UserCommand::Update {
                id,
                form: fields.into_form(),
            },
            ClapCommand::Patch { id, fields } => UserCommand::Patch {
                id,
                form: fields.into_form(),
            },
            ClapCommand::Delete { id } => UserCommand::Delete { id },
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    profile: String,
    server: Option<String>,
    verbose: bool,
    command: UserCommand,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        Self::from_clap(ClapArgs::parse())
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::from_clap(ClapArgs::parse_from(itr))
    }

    fn from_clap(args: ClapArgs) -> Self {
        Self {
            profile: args.profile,
            server: args.server,
            verbose: args.verbose,
            command: args.command.into_user_command(),
        }
    }

    pub fn profile(&self) -> &String {
        &self.profile
    }

    pub fn server(&self) -> Option<&str> {
        self.server.as_deref()
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn command(&self) -> &UserCommand {
        &self.command
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::form::{FormSource, EMAIL_FIELD, NAME_FIELD, PASSWORD_FIELD};

    #[test]
    fn test_parse_args_profile_only() {
        let args = CommandLineArgs::parse_from(["program", "--profile", "test", "list"]);
        assert_eq!(args.profile(), "test");
        assert!(!args.verbose());
        assert!(matches!(args.command(), UserCommand::List));
    }

    #[test]
    fn test_parse_args_short_flags() {
        let args = CommandLineArgs::parse_from([
            "program",
            "-p",
            "dev",
            "-v",
            "-s",
            "http://api.local",
            "list",
        ]);
        assert_eq!(args.profile(), "dev");
        assert!(args.verbose());
        assert_eq!(args.server(), Some("http://api.local"));
    }

    #[test]
    fn test_default_values() {
        let args = CommandLineArgs::parse_from(["program", "list"]);
        assert_eq!(args.profile(), "default");
        assert_eq!(args.server(), None);
        assert!(!args.verbose());
    }

    #[test]
    fn test_parse_create_fields() {
        let args = CommandLineArgs::parse_from([
            "program",
            "create",
            "--name",
            "Alice",
            "--email",
            "alice@example.com",
        ]);
        match args.command() {
            UserCommand::Create { form } => {
                assert_eq!(form.field(NAME_FIELD), Some("Alice".to_string()));
                assert_eq!(form.field(EMAIL_FIELD), Some("alice@example.com".to_string()));
                assert_eq!(form.field(PASSWORD_FIELD), None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_item_commands() {
        let args = CommandLineArgs::parse_from(["program", "patch", "42", "--password", "x"]);
        match args.command() {
            UserCommand::Patch { id, form } => {
                assert_eq!(id, "42");
                assert_eq!(form.field(PASSWORD_FIELD), Some("x".to_string()));
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let args = CommandLineArgs::parse_from(["program", "delete", "42"]);
        assert!(matches!(args.command(), UserCommand::Delete { id } if id == "42"));
    }
}
