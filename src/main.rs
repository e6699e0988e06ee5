use std::env;

use tuition::{cli, logging};

fn main() {
    dotenv::dotenv().ok();
    logging::init_logging();

    let args: Vec<String> = env::args().collect();
    std::process::exit(cli::run_with_args(&args));
}
