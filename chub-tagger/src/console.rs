//! Terminal implementation of [`Interaction`]

use crate::workflow::{Interaction, TagChanges};
use chub_common::prompt::{prompt_frame, yes_or_no};
use chub_common::FrameRef;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Prompts on a reader/writer pair, normally stdin/stdout
pub struct ConsoleInteraction<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleInteraction<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl ConsoleInteraction<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Interaction for ConsoleInteraction<R, W> {
    fn ask_frame(&mut self, filename: &str) -> io::Result<FrameRef> {
        prompt_frame(filename, &mut self.input, &mut self.output)
    }

    fn confirm_write(&mut self, image: &Path, changes: &TagChanges) -> io::Result<bool> {
        writeln!(self.output, "Proposed changes for {}:", image.display())?;
        write!(self.output, "{}", changes)?;
        yes_or_no("Write this metadata to the file?", &mut self.input, &mut self.output)
    }
}
