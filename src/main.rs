use std::env;
use std::path::Path;
use std::process;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        let cmd = args.first().map(String::as_str).unwrap_or("profplot");
        eprintln!("Usage: {cmd} <data-file>");
        process::exit(1);
    }

    profplot::run(Path::new(&args[1]))
}
