use anyhow::Result;
use code_assist::cli::{commands, parse_args, setup};

fn main() -> Result<()> {
    let cli = parse_args();
    setup::init_logging(cli.verbosity);
    commands::run(cli)
}
