fn main() {
    garimpo::cli::run();
}
