// cmmtree: syntax tree dump and viewer for C--

use std::io;
use std::process::ExitCode;

use cmmtree::config::Cli;
use cmmtree::driver::Driver;
use cmmtree::parser::TokenStreamParser;
use cmmtree::{logging, ui};
use tracing::debug;

fn main() -> ExitCode {
    let cli = match Cli::parse_from_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // --help and --version are not usage errors
            if !err.use_stderr() {
                return ExitCode::SUCCESS;
            }
            eprintln!();
            eprintln!("Usage: cmmtree <filename>, e.g. cmmtree test.cmm");
            return ExitCode::from(1);
        }
    };

    if let Err(err) = logging::init() {
        eprintln!("Warning: logging disabled: {}", err);
    }

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            debug!(error = ?err, "run failed");
            eprintln!("Error: {}", err);
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let mut driver = Driver::new(TokenStreamParser::new(), cli.dump_config());
    let mut out = io::stdout().lock();

    let summary = if cli.view {
        driver.run_with(&cli.file, &mut out, |root| ui::view(root, cli.verbose))
    } else {
        driver.run(&cli.file, &mut out)
    }?;

    for diagnostic in &summary.diagnostics {
        eprintln!("{}", diagnostic);
    }

    // Parse errors are reported, not failures of the tool
    Ok(ExitCode::SUCCESS)
}
