//! CLI output formatting utilities.

use crate::tools::Source;
use console::style;

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(msg: &str) {
        println!("  {} {}", style("*").cyan(), msg);
    }

    /// Print tool output followed by its citations.
    pub fn tool_result(text: &str, sources: &[Source]) {
        println!("{}", text);

        if !sources.is_empty() {
            Output::header("Sources");
            for source in sources {
                Output::source(source);
            }
        }
    }

    /// Print a single citation.
    pub fn source(source: &Source) {
        match &source.link {
            Some(link) => println!(
                "  {} {}\n    {}",
                style("*").cyan(),
                style(&source.text).bold(),
                style(link).dim()
            ),
            None => Output::list_item(&source.text),
        }
    }
}
