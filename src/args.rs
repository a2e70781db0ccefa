use clap::Parser;

#[derive(Debug, Parser)]
pub struct Args {
    /// Initial window width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,
    /// Initial window height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,
}
