use clap::{Command, arg};

pub const KITS_CMD: &str = "kits";

pub fn create_kits_cli() -> Command {
    Command::new(KITS_CMD)
        .about("List kits in canonical order.")
        .arg(arg!(--bed "Print each kit's coverage file instead of its name"))
}
