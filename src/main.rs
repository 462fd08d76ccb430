mod cli;
mod commands;
mod formatting;
mod settings;

use std::process::ExitCode;

use commands::run_export;

#[tokio::main]
async fn main() -> ExitCode {
    run().await
}

async fn run() -> ExitCode {
    let raw_args: Vec<String> = std::env::args().collect();
    let args = cli::parse();

    run_export(
        &raw_args,
        args.config,
        args.verbose,
        args.source,
        args.source_type,
        args.output,
        args.page_format,
        args.print_background,
        args.cleanup_selector,
        args.chrome,
        args.nav_timeout,
        args.format,
        args.report,
    )
    .await
}
