use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    hookchat::cli::main()
}
