use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// A place rendered output goes to. Every write replaces what was there.
pub trait OutputRegion: Send {
    fn replace(&mut self, content: &str) -> io::Result<()>;
}

/// Standard output. On a terminal the screen is cleared before each render,
/// otherwise renders are separated by a rule.
pub struct TerminalRegion {
    clear_screen: bool,
    renders: usize,
}

impl TerminalRegion {
    pub fn new(clear_screen: bool) -> Self {
        Self {
            clear_screen,
            renders: 0,
        }
    }
}

impl OutputRegion for TerminalRegion {
    fn replace(&mut self, content: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();

        if self.clear_screen {
            stdout.write_all(b"\x1b[2J\x1b[H")?;
        } else if self.renders > 0 {
            stdout.write_all(b"----\n")?;
        }

        stdout.write_all(content.as_bytes())?;
        stdout.flush()?;
        self.renders += 1;
        Ok(())
    }
}

/// Rewrites a file on every render
pub struct FileRegion {
    path: PathBuf,
}

impl FileRegion {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl OutputRegion for FileRegion {
    fn replace(&mut self, content: &str) -> io::Result<()> {
        std::fs::write(&self.path, content)?;
        tracing::debug!("Wrote {} bytes to {}", content.len(), self.path.display());
        Ok(())
    }
}

/// In-memory region; clones share the same buffer
#[derive(Clone, Default)]
pub struct MemoryRegion {
    content: Arc<Mutex<String>>,
}

impl MemoryRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> String {
        self.content
            .lock()
            .map(|c| c.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl OutputRegion for MemoryRegion {
    fn replace(&mut self, content: &str) -> io::Result<()> {
        let mut current = self
            .content
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        current.clear();
        current.push_str(content);
        Ok(())
    }
}
