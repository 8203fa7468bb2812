// ABOUTME: Version and banner text printed at REPL startup

pub const WELCOME_MESSAGE: &str = "Lissp Version 0.0.0.0.7";
pub const WELCOME_SUBTITLE: &str = "Press CTRL+C to exit";
