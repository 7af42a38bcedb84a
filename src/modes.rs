use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::error;

use crate::display;
use crate::input;
use crate::session::{CompletionBackend, Session};

pub const EXIT_SENTINEL: &str = "EXIT@@";
pub const ERROR_RESPONSE: &str = "Error: Unable to get a response from ChatGPT.";

fn is_exit_command(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(EXIT_SENTINEL)
}

/// Interactive `-i` sub-loop: repeats until the user enters 1 or 2.
pub fn select_mode<R: BufRead, W: Write>(reader: &mut R, writer: &mut W) -> Result<i64> {
    loop {
        let mode = input::valid_integer(
            reader,
            writer,
            "Select mode (1 for chat, 2 for programming assist): ",
            "Invalid input. Please enter 1 or 2.",
        )
        .context("Failed to read mode selection")?;
        if mode == 1 || mode == 2 {
            return Ok(mode);
        }
        writeln!(
            writer,
            "Invalid mode. Please choose either 1 for chat or 2 for programming assist."
        )?;
    }
}

/// Unbounded prompt/response loop. Ends on the exit sentinel (trimmed,
/// case-insensitive) or end-of-input; every other line, empty included,
/// costs exactly one completion call.
pub async fn run_chat<B, R, W>(
    session: &mut Session<'_, B>,
    reader: &mut R,
    writer: &mut W,
) -> Result<()>
where
    B: CompletionBackend,
    R: BufRead,
    W: Write,
{
    display::show_chat_header(writer)?;

    loop {
        display::show_user_prompt_label(writer)?;
        writer.flush().context("Failed to flush output")?;

        let Some(prompt) = read_prompt_line(reader)? else {
            break;
        };
        if is_exit_command(&prompt) {
            display::show_convo_exit(writer)?;
            break;
        }

        display::show_sending(writer)?;
        match session.respond(&prompt).await {
            Ok(turn) => {
                display::show_latency(writer, turn.elapsed)?;
                display::show_chat_response(writer, &turn.text)?;
            }
            Err(err) => {
                error!(error = %format!("{err:#}"), "completion request failed");
                display::show_chat_response(writer, ERROR_RESPONSE)?;
            }
        }
    }

    Ok(())
}

/// Counted prompt/response loop: asks for an iteration count, then runs
/// exactly that many turns numbered from 1. A zero or negative count runs
/// nothing. No sentinel in this mode.
pub async fn run_programming_assist<B, R, W>(
    session: &mut Session<'_, B>,
    reader: &mut R,
    writer: &mut W,
) -> Result<()>
where
    B: CompletionBackend,
    R: BufRead,
    W: Write,
{
    let iterations = input::valid_integer(
        reader,
        writer,
        "\nHow many lines of code do you want to generate? ",
        input::INVALID_NUMBER_MESSAGE,
    )
    .context("Failed to read iteration count")?;

    for line_number in 1..=iterations {
        display::show_code_prompt_label(writer, line_number)?;
        writer.flush().context("Failed to flush output")?;

        let Some(prompt) = read_prompt_line(reader)? else {
            break;
        };

        display::show_sending(writer)?;
        match session.respond(&prompt).await {
            Ok(turn) => {
                display::show_latency(writer, turn.elapsed)?;
                display::show_generated_line(writer, line_number, &turn.text)?;
            }
            Err(err) => {
                error!(error = %format!("{err:#}"), "completion request failed");
                display::show_generated_line(writer, line_number, ERROR_RESPONSE)?;
            }
        }
    }

    Ok(())
}

/// Reads one line, stripped of its trailing newline but otherwise verbatim.
/// `None` means end-of-input.
fn read_prompt_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let read = reader.read_line(&mut line).context("Failed to read input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
