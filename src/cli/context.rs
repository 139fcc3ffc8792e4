use std::io::{self, BufRead, Write};

use crate::error::{CrmError, CrmResult};
use crate::model::ContactId;
use crate::ops::ContactService;
use crate::validation;

/// Everything a command needs: the service plus the console it talks to.
pub struct CLIContext<'a> {
    pub service: ContactService,
    input: Box<dyn BufRead + 'a>,
    out: Box<dyn Write + 'a>,
    err: Box<dyn Write + 'a>,
}

impl<'a> CLIContext<'a> {
    pub fn new(
        service: ContactService,
        input: Box<dyn BufRead + 'a>,
        out: Box<dyn Write + 'a>,
        err: Box<dyn Write + 'a>,
    ) -> Self {
        Self {
            service,
            input,
            out,
            err,
        }
    }

    /// Context wired to the process's standard streams.
    pub fn stdio(service: ContactService) -> CLIContext<'static> {
        CLIContext::new(
            service,
            Box::new(io::stdin().lock()),
            Box::new(io::stdout()),
            Box::new(io::stderr()),
        )
    }

    pub fn out(&mut self) -> &mut dyn Write {
        &mut *self.out
    }

    /// Prompt and read a line. End of input is an error.
    pub fn read_line(&mut self, prompt: &str) -> CrmResult<String> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(CrmError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "unexpected end of input",
            )));
        }
        Ok(buf.trim_end_matches('\n').trim_end_matches('\r').to_string())
    }

    /// Read a line, trimmed.
    pub fn prompt(&mut self, prompt: &str) -> CrmResult<String> {
        self.read_line(prompt).map(|s| s.trim().to_string())
    }

    /// Asks for an ID until a positive integer is entered. Blank lines are
    /// skipped silently, bad input is reported on the error stream.
    pub fn prompt_id(&mut self) -> CrmResult<ContactId> {
        loop {
            let line = self.prompt("ID: ")?;
            if line.is_empty() {
                continue;
            }
            match validation::contact_id(&line) {
                Ok(id) => return Ok(id),
                Err(e) => writeln!(self.err, "{}", e)?,
            }
        }
    }

    /// Uses the flag value when given and non-zero, otherwise prompts.
    pub fn resolve_id(&mut self, flag: Option<ContactId>) -> CrmResult<ContactId> {
        match flag {
            Some(id) if !id.is_unset() => Ok(id),
            _ => self.prompt_id(),
        }
    }
}
