// src/main.rs

use rerun::errors::RerunError;
use rerun::{cli, logging, run};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = run_main().await {
        if err.is_usage_error() {
            eprintln!("{err}");
        } else {
            eprintln!("rerun error: {err:?}");
        }
        std::process::exit(err.exit_code());
    }
}

async fn run_main() -> Result<(), RerunError> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args).await
}
