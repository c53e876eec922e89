fn main() {
    env_logger::init();

    if let Err(e) = golden_spirals::cli::run() {
        log::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
