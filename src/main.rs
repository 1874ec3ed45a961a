use std::process::ExitCode;

fn main() -> ExitCode {
    match microbial_growth::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
