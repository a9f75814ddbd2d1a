use std::process::ExitCode;

use sql_dictionary::app;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    app::logging::init_logger();

    match app::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
