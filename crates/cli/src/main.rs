//! Entry point for the command-line interface.
//! Delegates to dedicated modules for argument handling,
//! scanning logic and rule listing.

use nunitlint::args::{parse_cli, Commands, RulesCmd};
use nunitlint::rules::{list_rules, show_rule};
use nunitlint::scan::run_scan;

fn main() -> anyhow::Result<()> {
    let cli = parse_cli();
    match cli.command {
        Commands::Scan(args) => run_scan(args),
        Commands::Rules(RulesCmd::List) => list_rules(),
        Commands::Rules(RulesCmd::Show { id }) => show_rule(&id),
    }
}
