use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use rerun::exec::TerminalControl;

/// Terminal double that counts `reclaim_foreground` calls.
#[derive(Debug, Default)]
pub struct RecordingTerminal {
    reclaims: AtomicUsize,
    fail: bool,
}

impl RecordingTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    /// A terminal whose reclaim always fails (e.g. stdin is not a tty).
    pub fn failing() -> Self {
        Self {
            reclaims: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn reclaims(&self) -> usize {
        self.reclaims.load(Ordering::SeqCst)
    }
}

impl TerminalControl for RecordingTerminal {
    fn reclaim_foreground(&self) -> anyhow::Result<()> {
        self.reclaims.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("not a terminal");
        }
        Ok(())
    }
}

/// `Write` sink shared between a runtime and the test inspecting it.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock().unwrap()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
