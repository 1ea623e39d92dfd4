fn main() {
    if let Err(err) = bracket_layout::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
