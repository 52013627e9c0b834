use std::env;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let status = minefield::run(
        env::args_os(),
        io::stdin().lock(),
        io::stdout().lock(),
        io::stderr(),
    );
    ExitCode::from(status)
}
