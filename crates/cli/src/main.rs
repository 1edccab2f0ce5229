fn main() -> Result<(), Box<dyn std::error::Error>> {
    vtscope_cli::run()
}
