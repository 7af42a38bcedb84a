use colored::Colorize;
use std::io::{Result, Write};
use std::time::Duration;

/// Fixed-width banner rule used around every user-facing block.
pub const SEPARATOR: &str = "═════════════════════════════════════════════════════";

pub fn show_ascii_art(out: &mut impl Write, art: &str) -> Result<()> {
    writeln!(out, "{}", SEPARATOR.green().bold())?;
    writeln!(out)?;
    writeln!(out, "{}", art.red().bold())
}

pub fn show_quote(out: &mut impl Write, text: &str) -> Result<()> {
    writeln!(out, "{}", SEPARATOR.green().bold())?;
    writeln!(out)?;
    writeln!(out, "{}", text.green().italic())
}

pub fn show_chat_header(out: &mut impl Write) -> Result<()> {
    writeln!(out, "\n{}", SEPARATOR.green().bold())?;
    writeln!(out, "{}", "Mode: Chat".green().bold())?;
    writeln!(out, "{}", SEPARATOR.green().bold())?;
    writeln!(
        out,
        "{}",
        "Type 'EXIT@@' to kill programa at anytime!".blue().bold()
    )?;
    writeln!(out, "{}\n", SEPARATOR.green().bold())
}

pub fn show_interactive_header(out: &mut impl Write) -> Result<()> {
    writeln!(out, "\n{}", SEPARATOR.green().bold())?;
    writeln!(out, "{}", "Interactive Mode".green().bold())?;
    writeln!(out, "{}\n", SEPARATOR.green().bold())
}

pub fn show_programming_assist_banner(out: &mut impl Write) -> Result<()> {
    writeln!(out, "\n{}", "Mode: Programming Assist".green().bold())
}

pub fn show_user_prompt_label(out: &mut impl Write) -> Result<()> {
    write!(out, "{}\n -> ", "User Prompt:".red())
}

pub fn show_sending(out: &mut impl Write) -> Result<()> {
    writeln!(out, "\n{}", SEPARATOR.green().bold())?;
    writeln!(out, "{}", "Sending user input to ChatGPT...".yellow().bold())
}

pub fn show_latency(out: &mut impl Write, elapsed: Duration) -> Result<()> {
    writeln!(out, "{}", SEPARATOR.green().bold())?;
    writeln!(
        out,
        "{}",
        format!("Response time: {:.2} seconds", elapsed.as_secs_f64())
            .yellow()
            .bold()
    )
}

pub fn show_chat_response(out: &mut impl Write, text: &str) -> Result<()> {
    writeln!(out, "{}\n", SEPARATOR.green().bold())?;
    write!(out, "{}\n -> ", "ChatGPT:".green().bold())?;
    writeln!(out, "{}", text.blue().bold())?;
    writeln!(out, "\n{}\n", SEPARATOR.green().bold())
}

pub fn show_code_prompt_label(out: &mut impl Write, line_number: i64) -> Result<()> {
    write!(
        out,
        "\n{} ",
        format!("Code Line {line_number} Prompt:").cyan().bold()
    )
}

pub fn show_generated_line(out: &mut impl Write, line_number: i64, text: &str) -> Result<()> {
    writeln!(
        out,
        "{} {}",
        format!("Generated Code Line {line_number}:").yellow().bold(),
        text
    )
}

pub fn show_convo_exit(out: &mut impl Write) -> Result<()> {
    writeln!(out, "\n{}", "Exiting conversation mode...".red().bold())
}

pub fn show_program_exit(out: &mut impl Write) -> Result<()> {
    writeln!(out, "\n{}", "Exiting sentAI ChatGPT...".red().bold())
}
