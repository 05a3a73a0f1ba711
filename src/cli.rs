// File: ./src/cli.rs
//! Shared command-line interface logic, like printing help.

pub fn print_help(binary_name: &str) {
    println!(
        "Todobridge v{} - Sync Markdown checklists with a todo.txt file",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} pull [--root <path>]     Rebuild the todo.txt file from the vault's checklists", binary_name);
    println!("    {} push [--root <path>]     Apply todo.txt edits back onto the vault's checklists", binary_name);
    println!("    {} --help                   Show this help message", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Vault root directory (default: current directory).");
    println!("    -v, --verbose         Enable debug logging.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("CONFIGURATION:");
    println!("    Reads <root>/.todobridge.toml when present. Configurable keys:");
    println!("    tag (default \"#todo\"), line_file (default \"todo.txt\"),");
    println!("    due_symbol, recurrence_symbol, priority_symbols.");
    println!();
    println!("NOTATIONS:");
    println!("    Checklist:  - [ ] Buy milk \u{1F4C5} 2024-01-10 \u{1F501} every week \u{23EB} #todo");
    println!("    Line file:  (A) Buy milk due:2024-01-10 rec:1w #todo");
}
