//! Output plumbing shared by the commands
//!
//! Long output (`log`, `global-log`) goes through the `minus` pager when
//! stdout is a terminal and `NO_PAGER` is unset; everything else is written
//! straight to stdout.

use crate::config::Config;
use derive_new::new;
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::{self, Write};

/// `Write` adapter over the minus pager, which only accepts strings
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl PagerWriter {
    pub fn pager(&self) -> &Pager {
        &self.pager
    }
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s =
            std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(s).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Where a command's output goes
pub enum Output {
    Stdout,
    Paged(Pager),
}

impl Output {
    /// Page only when asked to and a human is watching
    pub fn select(config: &Config, wants_paging: bool) -> Self {
        if wants_paging && !config.no_pager() && io::stdout().is_terminal() {
            Output::Paged(Pager::new())
        } else {
            Output::Stdout
        }
    }

    pub fn writer(&self) -> Box<dyn Write> {
        match self {
            Output::Stdout => Box::new(io::stdout()),
            Output::Paged(pager) => Box::new(PagerWriter::new(pager.clone())),
        }
    }

    /// Hand the collected output to the pager, if any
    pub fn finish(self) -> anyhow::Result<()> {
        if let Output::Paged(pager) = self {
            minus::page_all(pager)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pager_writer_collects_utf8_text() {
        let pager = Pager::new();
        let mut writer = PagerWriter::new(pager.clone());

        assert_eq!(writer.write(b"===\n").unwrap(), 4);
        assert!(writer.write(&[0xff, 0xfe]).is_err());
    }

    #[test]
    fn disabled_paging_writes_to_stdout() {
        let config = Config::default();

        assert!(matches!(Output::select(&config, false), Output::Stdout));
    }
}
