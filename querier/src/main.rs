use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use querier::{OutputFormat, Querier};
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};
use tse_core::SetupError;

#[derive(Parser)]
#[command(name = "querier")]
#[command(about = "Answer and/or keyword queries read from stdin", long_about = None)]
struct Args {
    /// Crawler output directory the index was built from
    corpus_dir: String,
    /// Index file written by the indexer
    index_file: String,
    /// Output format for result blocks
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => return fail(&anyhow::Error::new(SetupError::Usage(e.render().to_string()))),
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}

fn fail(err: &anyhow::Error) -> ExitCode {
    eprintln!("ERROR: {err:#}");
    let code = err.downcast_ref::<SetupError>().map_or(1, SetupError::exit_code);
    ExitCode::from(code as u8)
}

fn run(args: &Args) -> Result<()> {
    let querier = Querier::open(&args.corpus_dir, &args.index_file, args.format)?;
    let stdin = io::stdin();
    let prompt = stdin.is_terminal();
    querier.run(stdin.lock(), &mut io::stdout().lock(), &mut io::stderr().lock(), prompt)?;
    Ok(())
}
