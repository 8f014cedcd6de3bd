use std::process::ExitCode;

use markov_cli::{CharArgs, finish, init_logging, parse_args, run_chars};

fn main() -> ExitCode {
    let args: CharArgs = match parse_args() {
        Ok(args) => args,
        Err(code) => return code,
    };
    init_logging(args.common.verbose);
    finish(run_chars(&args))
}
