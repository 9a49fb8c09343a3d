use std::io;
use std::sync::{Mutex, MutexGuard};

static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);

fn lock() -> MutexGuard<'static, Option<Vec<String>>> {
    BUFFER.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Activate buffering. While active, log lines and `warn()` calls store
/// messages instead of printing to stderr.
pub fn activate() {
    *lock() = Some(Vec::new());
}

/// Deactivate buffering and return all collected messages.
pub fn drain() -> Vec<String> {
    lock().take().unwrap_or_default()
}

/// Write a warning message. If buffering is active the message is stored;
/// otherwise it is printed to stderr immediately.
pub fn warn(msg: String) {
    let mut guard = lock();
    if let Some(buf) = guard.as_mut() {
        buf.push(msg);
    } else {
        drop(guard);
        eprintln!("{}", msg);
    }
}

/// `io::Write` sink for the tracing subscriber that routes every
/// formatted event through [`warn`].
pub struct BufferedStderr;

impl io::Write for BufferedStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        let line = text.trim_end_matches('\n');
        if !line.is_empty() {
            warn(line.to_string());
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
