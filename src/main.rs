use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    match trainee_lookup::cli::run() {
        Ok(code) => code,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
