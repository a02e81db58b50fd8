//! Operator prompts for the initial session parameters
//!
//! Plain line-oriented prompts, validated locally; invalid interval input
//! re-prompts until a usable value arrives.

use std::io::{BufRead, Write};

use crate::core::error::Result;
use crate::core::types::MAX_INTERVAL_HOURS;

/// Ask for the name of the process to supervise. Free text, trimmed.
pub fn prompt_process_name<R, W>(input: &mut R, output: &mut W) -> Result<String>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "Enter the name of the process you want to search for:")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Ask for the restart interval in whole hours.
///
/// Blank, non-numeric, zero, or out-of-range input re-prompts
/// indefinitely; only end of input aborts. Accepted values stay within
/// [`MAX_INTERVAL_HOURS`] so the schedule arithmetic downstream cannot
/// overflow.
pub fn prompt_interval_hours<R, W>(input: &mut R, output: &mut W) -> Result<u64>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "Enter the restart interval in hours:")?;
    output.flush()?;

    loop {
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
        }
        match line.trim().parse::<u64>() {
            Ok(hours) if (1..=MAX_INTERVAL_HOURS).contains(&hours) => return Ok(hours),
            _ => {
                writeln!(output, "Invalid input. Please enter a valid number.")?;
                output.flush()?;
            }
        }
    }
}
