//! List rules command implementation.

use cstyle_core::RuleKind;
use cstyle_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<8} {:<16} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<8} {:<16} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!(
        "\nUnreadable inputs are reported as {} and never stop the run.",
        RuleKind::FileError
    );

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  cstyle --rules header,header-guard src/*.c");
    println!("  cstyle --rules CS001,CS004 --dir src");
}
