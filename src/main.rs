fn main() {
    if let Err(err) = crosscheck::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
