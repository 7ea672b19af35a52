use yarr::cli::run;
use yarr::cli::error::EXIT_INTERNAL_ERROR;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Command errors exit from inside the handlers; anything reaching here is
    // a system failure (ledger unreachable, stdin unreadable, ...)
    if let Err(e) = run() {
        eprintln!("Internal error: {}", e);
        let mut source = e.source();
        if source.is_some() {
            eprintln!("\nCaused by:");
            let mut indent = 1;
            while let Some(err) = source {
                eprintln!("{:indent$}  {}", "", err);
                source = err.source();
                indent += 1;
            }
        }
        std::process::exit(EXIT_INTERNAL_ERROR);
    }
}
