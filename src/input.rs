//! Interactive seed URL input
//!
//! When no seed is passed on the command line the user is asked for one, and
//! asked again until the answer is a usable absolute http(s) URL.

use crate::url::parse_seed_url;
use std::io::{self, BufRead, Write};
use url::Url;

/// Prompt shown when asking for the seed URL
pub const SEED_PROMPT: &str = "Enter the URL of the website: ";

/// Reads a seed URL, re-prompting until a valid one is entered
///
/// # Arguments
///
/// * `input` - Where answers are read from (stdin in the binary)
/// * `output` - Where prompts and complaints are written
///
/// # Returns
///
/// * `Ok(Url)` - The first valid answer
/// * `Err(io::Error)` - Reading failed, or input ended before a valid URL
pub fn prompt_seed_url<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<Url> {
    let mut line = String::new();

    loop {
        write!(output, "{}", SEED_PROMPT)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input ended before a valid URL was entered",
            ));
        }

        match parse_seed_url(&line) {
            Ok(url) => return Ok(url),
            Err(e) => {
                tracing::debug!("Rejected seed input {:?}: {}", line.trim(), e);
                writeln!(output, "Invalid URL")?;
            }
        }
    }
}
