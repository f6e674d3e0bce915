use nlpfetch_lib::cli::{ResolvedCommand, parse_args, resolve_command, run_install, run_status};
use nlpfetch_lib::error::NlpFetchError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), NlpFetchError> {
    color_eyre::install()?;

    let args = parse_args();
    let command = resolve_command(args.command)?;

    match command {
        ResolvedCommand::Install(params) => {
            run_install(params).await?;
        }
        ResolvedCommand::Status(params) => run_status(params)?,
    }

    Ok(())
}
