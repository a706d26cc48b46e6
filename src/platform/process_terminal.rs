//! Process-based terminal implementation.

#[cfg(unix)]
use std::collections::VecDeque;
use std::io;
#[cfg(unix)]
use std::thread::{self, JoinHandle};

use crate::core::key::Key;
use crate::core::terminal::Terminal;
#[cfg(unix)]
use crate::core::terminal::CLEAR_SCREEN;
#[cfg(unix)]
use crate::platform::stdin_buffer::StdinBuffer;

#[cfg(unix)]
use libc::{self, c_int};
#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

/// How long an incomplete escape sequence may wait for its tail.
#[cfg(unix)]
const ESCAPE_TIMEOUT_MS: i32 = 10;

#[cfg(unix)]
fn wait_writable(fd: c_int) -> io::Result<()> {
    let mut fds = libc::pollfd {
        fd,
        events: libc::POLLOUT,
        revents: 0,
    };
    loop {
        let result = unsafe { libc::poll(&mut fds, 1, -1) };
        if result < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return Err(err);
        }
        if result == 0 {
            continue;
        }
        if (fds.revents & libc::POLLOUT) != 0 {
            return Ok(());
        }

        return Err(io::Error::other(format!(
            "poll(POLLOUT) returned revents=0x{:x}",
            fds.revents
        )));
    }
}

#[cfg(unix)]
fn write_all_fd_with<FWrite, FWait>(
    fd: c_int,
    bytes: &[u8],
    mut write_once: FWrite,
    mut wait_writable: FWait,
) -> io::Result<()>
where
    FWrite: FnMut(c_int, &[u8]) -> io::Result<usize>,
    FWait: FnMut(c_int) -> io::Result<()>,
{
    let mut written = 0;
    while written < bytes.len() {
        match write_once(fd, &bytes[written..]) {
            Ok(0) => {
                return Err(io::Error::new(io::ErrorKind::WriteZero, "write returned 0"));
            }
            Ok(count) => {
                let remaining = bytes.len() - written;
                if count > remaining {
                    return Err(io::Error::other("write returned more bytes than requested"));
                }
                written += count;
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) if err.kind() == io::ErrorKind::WouldBlock => wait_writable(fd)?,
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

#[cfg(unix)]
fn write_fd(fd: c_int, data: &str) -> io::Result<()> {
    if data.is_empty() {
        return Ok(());
    }

    write_all_fd_with(
        fd,
        data.as_bytes(),
        |fd, buf| {
            let result = unsafe { libc::write(fd, buf.as_ptr() as *const libc::c_void, buf.len()) };
            if result < 0 {
                Err(io::Error::last_os_error())
            } else {
                Ok(result as usize)
            }
        },
        wait_writable,
    )
}

#[cfg(unix)]
fn read_fd(fd: c_int, buffer: &mut [u8]) -> io::Result<usize> {
    loop {
        let result = unsafe { libc::read(fd, buffer.as_mut_ptr() as *mut libc::c_void, buffer.len()) };
        if result >= 0 {
            return Ok(result as usize);
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(err);
        }
    }
}

#[cfg(unix)]
fn poll_readable(fd: c_int, timeout_ms: i32) -> bool {
    let mut fds = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };
    let result = unsafe { libc::poll(&mut fds, 1, timeout_ms) };
    result > 0 && (fds.revents & libc::POLLIN) != 0
}

#[cfg(unix)]
fn get_termios(fd: c_int) -> io::Result<libc::termios> {
    let mut termios = unsafe { std::mem::zeroed::<libc::termios>() };
    let result = unsafe { libc::tcgetattr(fd, &mut termios) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(termios)
}

#[cfg(unix)]
fn set_termios(fd: c_int, termios: &libc::termios) -> io::Result<()> {
    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, termios) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// Single-key input mode: no line buffering, no echo, one byte satisfies a read.
///
/// Output post-processing and signal generation stay enabled so `\n` still returns the carriage
/// and Ctrl+C still interrupts the process.
#[cfg(unix)]
fn single_key_mode(original: &libc::termios) -> libc::termios {
    let mut mode = *original;
    mode.c_lflag &= !(libc::ICANON | libc::ECHO);
    mode.c_cc[libc::VMIN] = 1;
    mode.c_cc[libc::VTIME] = 0;
    mode
}

/// Restores the saved terminal mode when the process is interrupted, then exits.
#[cfg(unix)]
struct SignalRestore {
    handle: signal_hook::iterator::Handle,
    thread: Option<JoinHandle<()>>,
}

#[cfg(unix)]
impl SignalRestore {
    fn install(fd: c_int, original: libc::termios) -> io::Result<Self> {
        let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP])?;
        let handle = signals.handle();
        let thread = thread::spawn(move || {
            if let Some(signal) = signals.forever().next() {
                let _ = set_termios(fd, &original);
                tracing::debug!(signal, "terminal restored after signal");
                std::process::exit(128 + signal);
            }
        });
        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

#[cfg(unix)]
impl Drop for SignalRestore {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Terminal backed by the process stdin/stdout.
#[cfg(unix)]
pub struct ProcessTerminal {
    stdin_fd: c_int,
    stdout_fd: c_int,
    original_termios: Option<libc::termios>,
    restore_on_signal: bool,
    signal_restore: Option<SignalRestore>,
    stdin_buffer: StdinBuffer,
    pending: VecDeque<Key>,
}

#[cfg(unix)]
impl ProcessTerminal {
    pub fn new() -> Self {
        Self {
            stdin_fd: libc::STDIN_FILENO,
            stdout_fd: libc::STDOUT_FILENO,
            original_termios: None,
            restore_on_signal: true,
            signal_restore: None,
            stdin_buffer: StdinBuffer::new(),
            pending: VecDeque::new(),
        }
    }

    fn enable_single_key_mode(&mut self) -> io::Result<()> {
        let original = match self.original_termios {
            Some(original) => original,
            None => {
                let original = get_termios(self.stdin_fd)?;
                self.original_termios = Some(original);
                original
            }
        };
        set_termios(self.stdin_fd, &single_key_mode(&original))?;

        if self.restore_on_signal && self.signal_restore.is_none() {
            self.signal_restore = Some(SignalRestore::install(self.stdin_fd, original)?);
        }
        Ok(())
    }

    fn restore_mode(&mut self) -> io::Result<()> {
        self.signal_restore = None;
        if let Some(original) = self.original_termios.as_ref() {
            set_termios(self.stdin_fd, original)?;
        }
        Ok(())
    }

    fn queue_sequences(&mut self, sequences: Vec<String>) {
        for sequence in sequences {
            match Key::parse(&sequence) {
                Some(key) => self.pending.push_back(key),
                None => tracing::debug!(?sequence, "ignoring unrecognised input sequence"),
            }
        }
    }
}

#[cfg(unix)]
impl Default for ProcessTerminal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
impl Terminal for ProcessTerminal {
    fn start(&mut self) -> io::Result<()> {
        self.pending.clear();
        self.enable_single_key_mode()
    }

    fn stop(&mut self) -> io::Result<()> {
        // Drop typed-ahead bytes so they do not leak into the shell.
        let _ = unsafe { libc::tcflush(self.stdin_fd, libc::TCIFLUSH) };
        self.pending.clear();
        self.restore_mode()
    }

    fn read_key(&mut self) -> io::Result<Key> {
        let mut chunk = [0u8; 256];
        loop {
            if let Some(key) = self.pending.pop_front() {
                return Ok(key);
            }

            let sequences = if !self.stdin_buffer.has_pending()
                || poll_readable(self.stdin_fd, ESCAPE_TIMEOUT_MS)
            {
                let read_len = read_fd(self.stdin_fd, &mut chunk)?;
                if read_len == 0 {
                    return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
                }
                self.stdin_buffer.process(&chunk[..read_len])
            } else {
                self.stdin_buffer.flush()
            };
            self.queue_sequences(sequences);
        }
    }

    fn write(&mut self, data: &str) {
        if let Err(err) = write_fd(self.stdout_fd, data) {
            tracing::error!(%err, "failed to write to terminal");
        }
    }

    fn clear(&mut self) {
        self.write(CLEAR_SCREEN);
    }
}

#[cfg(unix)]
impl Drop for ProcessTerminal {
    fn drop(&mut self) {
        let _ = self.restore_mode();
    }
}

/// Placeholder on platforms without termios; every operation reports `Unsupported`.
#[cfg(not(unix))]
pub struct ProcessTerminal;

#[cfg(not(unix))]
impl ProcessTerminal {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(not(unix))]
impl Default for ProcessTerminal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(unix))]
fn unsupported() -> io::Error {
    io::Error::new(
        io::ErrorKind::Unsupported,
        "ProcessTerminal is only supported on Unix platforms",
    )
}

#[cfg(not(unix))]
impl Terminal for ProcessTerminal {
    fn start(&mut self) -> io::Result<()> {
        Err(unsupported())
    }

    fn stop(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn read_key(&mut self) -> io::Result<Key> {
        Err(unsupported())
    }

    fn write(&mut self, data: &str) {
        use std::io::Write;
        let _ = io::stdout().write_all(data.as_bytes());
    }

    fn clear(&mut self) {}
}
