use std::process::ExitCode;

fn main() -> ExitCode {
    match tokencheck::cli::run() {
        Ok(code) => code,
        Err(err) => {
            tokencheck::ui::output::error(format!("{err:#}"));
            ExitCode::from(2)
        }
    }
}
