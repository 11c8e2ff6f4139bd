use colored::Colorize;

/// Print a pipeline step message; draft mode routes these to stderr so
/// standard output carries only the rendered news
pub fn status_message(message: &str, to_err: bool) {
    let line = format!("{} {}", "⏳".yellow(), message.bright_white());
    if to_err {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

/// Print a success message
pub fn success_message(message: &str) {
    println!("{} {}", "✅".green(), message.green());
}

/// Print an error message
pub fn error_message(message: &str) {
    eprintln!("{} {}", "❌".red(), message.red().bold());
}

/// Print a simple informational message
pub fn info_message(message: &str) {
    println!("{} {}", "ℹ️ ".blue(), message.blue());
}

/// Print a file path in a listing
pub fn file_entry(path: &std::path::Path) {
    println!("  {}", path.display());
}
