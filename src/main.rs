fn main() -> std::process::ExitCode {
    gtmkit::app::startup::startup()
}
