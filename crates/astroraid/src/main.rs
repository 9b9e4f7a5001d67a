fn main() {
    env_logger::init();

    if let Err(e) = astroraid::run() {
        eprintln!("setup failed: {e:#}");
        std::process::exit(1);
    }
}
