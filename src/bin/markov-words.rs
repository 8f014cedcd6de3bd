use std::process::ExitCode;

use markov_cli::{WordArgs, finish, init_logging, parse_args, run_words};

fn main() -> ExitCode {
    let args: WordArgs = match parse_args() {
        Ok(args) => args,
        Err(code) => return code,
    };
    init_logging(args.common.verbose);
    finish(run_words(&args))
}
