use clap::Parser;
use itrack::cli::{Cli, Commands};
use itrack::core::Config;
use miette::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let mut global = cli.global;

    let config = Config::load()?;
    init_tracing(&global.log_filter(&config));
    global.apply_config(&config);
    tracing::debug!(db = %global.database_path().display(), "resolved configuration");

    match cli.command {
        Commands::Init(args) => itrack::cli::commands::init::run(args, &global),
        Commands::Category(cmd) => itrack::cli::commands::category::run(cmd, &global),
        Commands::Type(cmd) => itrack::cli::commands::asset_type::run(cmd, &global),
        Commands::Location(cmd) => itrack::cli::commands::location::run(cmd, &global),
        Commands::Asset(cmd) => itrack::cli::commands::asset::run(cmd, &global),
        Commands::Completions(args) => itrack::cli::commands::completions::run(args),
    }
}

/// Diagnostics go to stderr so stdout stays clean for piping
fn init_tracing(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
