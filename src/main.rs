fn main() {
    open_desktop::app::cli::run();
}
