use std::process::ExitCode;

fn main() -> ExitCode {
    catexport::app::startup::startup()
}
