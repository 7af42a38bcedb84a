use std::io::{self, BufRead, Write};

pub const INVALID_NUMBER_MESSAGE: &str = "Invalid input. Please enter a valid number.";

/// Prompts until the input line parses as an integer. Unbounded retries;
/// end-of-input is the only other way out.
pub fn valid_integer<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    prompt: &str,
    error_message: &str,
) -> io::Result<i64> {
    loop {
        match read_trimmed_line(reader, writer, prompt)?.parse() {
            Ok(value) => return Ok(value),
            Err(_) => writeln!(writer, "{error_message}")?,
        }
    }
}

/// Float counterpart of [`valid_integer`].
pub fn valid_float<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    prompt: &str,
    error_message: &str,
) -> io::Result<f64> {
    loop {
        match read_trimmed_line(reader, writer, prompt)?.parse() {
            Ok(value) => return Ok(value),
            Err(_) => writeln!(writer, "{error_message}")?,
        }
    }
}

fn read_trimmed_line<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    prompt: &str,
) -> io::Result<String> {
    write!(writer, "{prompt}")?;
    writer.flush()?;

    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed while waiting for a number",
        ));
    }
    Ok(line.trim().to_string())
}
