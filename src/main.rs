fn main() {
    pretty_env_logger::init();

    if let Err(err) = voc_tools::run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
