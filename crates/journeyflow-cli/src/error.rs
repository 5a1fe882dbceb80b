use colored::Colorize;

pub fn handle_error(err: anyhow::Error) -> ! {
    eprintln!("{} {:#}", "Error:".red().bold(), err);

    let msg = format!("{:#}", err).to_lowercase();

    if msg.contains("connection refused") || msg.contains("error sending request") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Check that the journey API is running, or point at it with:");
        eprintln!("  {} journeyflow --api-url http://host:port ...", "$".dimmed());
    }

    if msg.contains("http 404") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  List available journeys with:");
        eprintln!("  {} journeyflow journey list", "$".dimmed());
    }

    if msg.contains("has not been saved") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Save the journey first (`save` in the designer shell).");
    }

    std::process::exit(1);
}
