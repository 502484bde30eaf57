//! # userline Main Entry Point
//!
//! Resolves the profile, runs one user operation and prints the result pane.

use anyhow::Result;
use tracing_subscriber::{filter::Directive, fmt::time::ChronoLocal, EnvFilter};
use userline::cmd_args::{CommandLineArgs, UserCommand};
use userline::config::{get_profile_path, LOG_LEVEL_ENV_VAR};
use userline::profile::{resolve_profile, IniProfileStore};
use userline::UserPanel;

/// Dependencies that are too chatty below `warn`
const NOISY_TARGETS: &[&str] = &[
    "reqwest",
    "hyper",
    "hyper_util",
    "h2",
    "tokio",
    "tokio_util",
    "tokio_rustls",
    "rustls",
    "rustls_pemfile",
    "tower",
];

#[tokio::main]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();
    init_tracing_subscriber(cmd_args.verbose());

    let profile_path = get_profile_path();
    tracing::debug!(
        "Loading profile '{}' from '{}'",
        cmd_args.profile(),
        profile_path
    );
    let store = IniProfileStore::new(&profile_path);
    let profile = resolve_profile(&store, cmd_args.profile(), cmd_args.server())?;

    let panel = UserPanel::from_profile(&profile)?;
    panel.on_ready();

    match cmd_args.command() {
        UserCommand::Create { form } => panel.create_user(form).await,
        UserCommand::List => panel.get_users().await,
        UserCommand::Update { id, form } => panel.update_user(id, form).await,
        UserCommand::Patch { id, form } => panel.patch_user(id, form).await,
        UserCommand::Delete { id } => panel.delete_user(id).await,
    };

    println!("{}", panel.display().render());
    Ok(())
}

fn init_tracing_subscriber(verbose: bool) {
    let mut filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_env(LOG_LEVEL_ENV_VAR)
    };
    for target in NOISY_TARGETS {
        if let Ok(directive) = format!("{target}=warn").parse::<Directive>() {
            filter = filter.add_directive(directive);
        }
    }

    // Ignore the error: a subscriber may already be installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::rfc_3339())
        .try_init();
}
