use clap::Command;

pub const MERGEUP_CMD: &str = "mergeup";

pub fn create_mergeup_cli() -> Command {
    Command::new(MERGEUP_CMD)
        .about("List clades whose markers are called by every kit of their parent, and so can merge into it.")
}
