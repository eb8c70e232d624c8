use clap::{Command, arg};

pub const QUERY_CMD: &str = "query";

pub fn create_query_cli() -> Command {
    Command::new(QUERY_CMD)
        .about("Look up variants by position or SNP name.")
        .arg_required_else_help(true)
        .arg(arg!(<QUERY> "A position or a SNP name"))
        .arg(arg!(--kits "Also list the kits that call each variant"))
}
