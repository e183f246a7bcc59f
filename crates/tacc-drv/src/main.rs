use std::process::ExitCode;

fn main() -> ExitCode {
    tacc_drv::run()
}
