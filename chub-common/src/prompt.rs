//! Console prompts
//!
//! Generic over the reader/writer so the interactive loops can be driven by
//! tests. The tagger binary passes locked stdin/stdout.

use crate::filename::FrameRef;
use std::io::{self, BufRead, Write};

/// Ask a yes/no question until the answer is one of `y`, `yes`, `n`, `no`.
///
/// Case and surrounding whitespace are ignored. Running out of input is an
/// `UnexpectedEof` error.
pub fn yes_or_no<R: BufRead, W: Write>(
    question: &str,
    input: &mut R,
    output: &mut W,
) -> io::Result<bool> {
    loop {
        write!(output, "{}(y/n): ", question)?;
        output.flush()?;

        let answer = read_answer(input)?.to_lowercase();
        writeln!(output)?;

        match answer.as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => writeln!(output, "Input yes or no")?,
        }
    }
}

/// Ask for the film ID and then the frame ID of a scan
pub fn prompt_frame<R: BufRead, W: Write>(
    filename: &str,
    input: &mut R,
    output: &mut W,
) -> io::Result<FrameRef> {
    write!(output, "Enter film ID for {}: ", filename)?;
    output.flush()?;
    let film = read_answer(input)?;

    write!(output, "Enter frame ID for {}: ", film)?;
    output.flush()?;
    let frame = read_answer(input)?;

    Ok(FrameRef::new(film, frame))
}

/// Ask for a free-form value
pub fn prompt_line<R: BufRead, W: Write>(
    question: &str,
    input: &mut R,
    output: &mut W,
) -> io::Result<String> {
    write!(output, "{}: ", question)?;
    output.flush()?;
    read_answer(input)
}

fn read_answer<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no answer on input"));
    }
    Ok(line.trim().to_string())
}
