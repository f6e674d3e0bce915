use clap::error::ErrorKind;
use clap::{ArgAction, Args as ClapArgs, CommandFactory, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber;

#[derive(Debug, Clone)]
pub enum Command {
    Install {
        config_path: Option<String>,
        base_dir: Option<String>,
        show_progress: bool,
    },
    Status {
        config_path: Option<String>,
        base_dir: Option<String>,
        format: String,
    },
}

pub struct Args {
    pub command: Command,
    pub log_level: Level,
}

#[derive(Debug, Parser)]
#[command(
    name = "nlpfetch",
    version,
    author = "Nick Guletskii",
    about = "Download and unpack the Stanford parser and POS tagger, GloVe vectors and the SICK dataset"
)]
struct Cli {
    #[arg(
        short = 'v',
        long = "verbose",
        help = "Sets the level of verbosity",
        action = ArgAction::Count,
        global = true
    )]
    verbose: u8,

    #[command(flatten)]
    location: LocationArgs,

    #[arg(
        long = "quiet-progress",
        help = "Disables the download progress bar (install only)",
        global = true
    )]
    quiet_progress: bool,

    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Debug, Clone, ClapArgs)]
struct LocationArgs {
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Optional config file overriding the built-in resource list",
        global = true
    )]
    config: Option<String>,

    #[arg(
        short = 'b',
        long = "base-dir",
        value_name = "DIR",
        help = "Directory that lib/ and data/ are created in (default: config base_dir, then the current directory)",
        global = true
    )]
    base_dir: Option<String>,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Download and unpack every resource that is not installed yet (the default)
    Install,

    /// Show which resources are already installed
    Status {
        #[arg(
            short = 'f',
            long = "format",
            value_name = "FORMAT",
            help = "Output format: text or json",
            default_value = "text"
        )]
        format: String,
    },
}

pub fn parse_args() -> Args {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let command = into_command(cli).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy()
                .add_directive("hyper_util=warn".parse().unwrap()),
        )
        .init();

    Args { command, log_level }
}

fn into_command(cli: Cli) -> Result<Command, clap::Error> {
    let LocationArgs { config, base_dir } = cli.location;

    match cli.command.unwrap_or(CliCommand::Install) {
        CliCommand::Install => Ok(Command::Install {
            config_path: config,
            base_dir,
            show_progress: !cli.quiet_progress,
        }),
        CliCommand::Status { .. } if cli.quiet_progress => Err(Cli::command().error(
            ErrorKind::ArgumentConflict,
            "--quiet-progress only applies to the install command",
        )),
        CliCommand::Status { format } => Ok(Command::Status {
            config_path: config,
            base_dir,
            format,
        }),
    }
}
