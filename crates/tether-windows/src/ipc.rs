//! Named-pipe transport between the CLI and the daemon.
//!
//! A connection carries newline-delimited JSON: one [`Command`] from the
//! client, then one [`Response`] from the daemon.

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::marker::PhantomData;
use std::os::windows::io::FromRawHandle;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tether_core::WindowResult;
use tether_core::ipc::{Command, PIPE_NAME, Response};
use windows::Win32::Foundation::{
    CloseHandle, DUPLICATE_SAME_ACCESS, DuplicateHandle, ERROR_NO_DATA, ERROR_PIPE_BUSY,
    ERROR_PIPE_CONNECTED, HANDLE, INVALID_HANDLE_VALUE,
};
use windows::Win32::Storage::FileSystem::{
    CreateFileW, FILE_SHARE_NONE, FlushFileBuffers, OPEN_EXISTING, PIPE_ACCESS_DUPLEX,
};
use windows::Win32::System::Pipes::{
    ConnectNamedPipe, CreateNamedPipeW, DisconnectNamedPipe, PIPE_READMODE_BYTE, PIPE_TYPE_BYTE,
    PIPE_UNLIMITED_INSTANCES, PIPE_WAIT, WaitNamedPipeW,
};
use windows::Win32::System::Threading::GetCurrentProcess;
use windows::core::HSTRING;

const GENERIC_READ_WRITE: u32 = 0x80000000 | 0x40000000;

const PIPE_BUFFER: u32 = 4096;

/// Longest message accepted in either direction, in bytes.
const MAX_MESSAGE: u64 = 64 * 1024;

/// How long a client waits for a busy pipe instance.
const BUSY_WAIT_MS: u32 = 2000;

/// Owns a raw handle and closes it on drop.
struct OwnedPipe(HANDLE);

impl Drop for OwnedPipe {
    fn drop(&mut self) {
        // SAFETY: the handle is owned exclusively by this value.
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

/// JSON lines over one connected pipe handle.
struct JsonLines {
    reader: BufReader<File>,
    writer: File,
}

impl JsonLines {
    fn over(handle: HANDLE) -> WindowResult<Self> {
        Ok(Self {
            reader: BufReader::new(duplicate_as_file(handle)?),
            writer: duplicate_as_file(handle)?,
        })
    }

    fn send<T: Serialize>(&mut self, message: &T) -> WindowResult<()> {
        let json = serde_json::to_string(message)?;
        writeln!(self.writer, "{json}")?;
        self.writer.flush()?;
        Ok(())
    }

    fn recv<T: DeserializeOwned>(&mut self) -> WindowResult<T> {
        let mut line = String::new();
        (&mut self.reader).take(MAX_MESSAGE).read_line(&mut line)?;

        if line.is_empty() {
            return Err("pipe closed before a message arrived".into());
        }
        if !line.ends_with('\n') && line.len() as u64 >= MAX_MESSAGE {
            return Err("message too long".into());
        }
        Ok(serde_json::from_str(line.trim())?)
    }
}

/// The daemon's end of the pipe. One instance serves clients one at a time.
pub struct PipeServer {
    pipe: OwnedPipe,
}

impl PipeServer {
    /// Creates the pipe instance without waiting for a client.
    pub fn create() -> WindowResult<Self> {
        let name = HSTRING::from(PIPE_NAME);

        // SAFETY: all arguments are valid; the result is checked below.
        let handle = unsafe {
            CreateNamedPipeW(
                &name,
                PIPE_ACCESS_DUPLEX,
                PIPE_TYPE_BYTE | PIPE_READMODE_BYTE | PIPE_WAIT,
                PIPE_UNLIMITED_INSTANCES,
                PIPE_BUFFER,
                PIPE_BUFFER,
                0,
                None,
            )
        };
        if handle == INVALID_HANDLE_VALUE {
            return Err("Failed to create named pipe".into());
        }

        Ok(Self {
            pipe: OwnedPipe(handle),
        })
    }

    /// Blocks until a client connects.
    pub fn accept(&self) -> WindowResult<Connection<'_>> {
        let handle = self.pipe.0;
        // SAFETY: ConnectNamedPipe blocks on a handle this server owns.
        if let Err(e) = unsafe { ConnectNamedPipe(handle, None) } {
            // A client that connected before the call is still a client.
            if e.code() != ERROR_PIPE_CONNECTED.to_hresult() {
                if e.code() == ERROR_NO_DATA.to_hresult() {
                    // SAFETY: frees the instance the client abandoned.
                    unsafe {
                        let _ = DisconnectNamedPipe(handle);
                    }
                }
                return Err(e.into());
            }
        }

        Ok(Connection {
            handle,
            lines: JsonLines::over(handle)?,
            _server: PhantomData,
        })
    }
}

/// One connected client. Dropping it disconnects the client so the
/// server can accept the next one.
pub struct Connection<'a> {
    handle: HANDLE,
    lines: JsonLines,
    // Ties the connection to the server owning `handle`.
    _server: PhantomData<&'a PipeServer>,
}

impl Connection<'_> {
    /// Reads the client's command.
    ///
    /// A malformed request is an error; the client can still be answered.
    pub fn read_command(&mut self) -> WindowResult<Command> {
        self.lines.recv()
    }

    /// Sends the response and waits until the client has read it.
    pub fn reply(mut self, response: &Response) -> WindowResult<()> {
        self.lines.send(response)?;
        // SAFETY: blocks until the client has drained the pipe, so the
        // disconnect in drop doesn't discard the response.
        unsafe {
            let _ = FlushFileBuffers(self.handle);
        }
        Ok(())
    }
}

impl Drop for Connection<'_> {
    fn drop(&mut self) {
        // SAFETY: the server outlives the connection.
        unsafe {
            let _ = DisconnectNamedPipe(self.handle);
        }
    }
}

/// Sends `command` to the daemon and waits for its response.
///
/// If every pipe instance is busy with another client, waits briefly for
/// one to free up and retries once.
pub fn send_command(command: &Command) -> WindowResult<Response> {
    let pipe = match open_pipe() {
        Ok(pipe) => pipe,
        Err(e) if e.code() == ERROR_PIPE_BUSY.to_hresult() => {
            let name = HSTRING::from(PIPE_NAME);
            // SAFETY: only waits for an instance to become available.
            if !unsafe { WaitNamedPipeW(&name, BUSY_WAIT_MS) }.as_bool() {
                return Err("daemon is busy".into());
            }
            open_pipe()?
        }
        Err(e) => return Err(e.into()),
    };

    let mut lines = JsonLines::over(pipe.0)?;
    lines.send(command)?;
    lines.recv()
}

fn open_pipe() -> windows::core::Result<OwnedPipe> {
    let name = HSTRING::from(PIPE_NAME);

    // SAFETY: opens an existing pipe as a client.
    let handle = unsafe {
        CreateFileW(
            &name,
            GENERIC_READ_WRITE,
            FILE_SHARE_NONE,
            None,
            OPEN_EXISTING,
            Default::default(),
            None,
        )?
    };

    Ok(OwnedPipe(handle))
}

/// Whether a daemon is listening.
///
/// Waits 1 ms for an instance instead of opening one, so the check
/// doesn't use up a connection.
pub fn is_daemon_running() -> bool {
    let name = HSTRING::from(PIPE_NAME);

    // SAFETY: only queries pipe availability.
    unsafe { WaitNamedPipeW(&name, 1).as_bool() }
}

/// Wraps a duplicate of `handle` as a `File` so reader, writer and the
/// original can each be closed independently.
fn duplicate_as_file(handle: HANDLE) -> WindowResult<File> {
    let mut dup = HANDLE::default();

    // SAFETY: the duplicate is owned by the returned File.
    unsafe {
        DuplicateHandle(
            GetCurrentProcess(),
            handle,
            GetCurrentProcess(),
            &mut dup,
            0,
            false,
            DUPLICATE_SAME_ACCESS,
        )?;

        Ok(File::from_raw_handle(dup.0))
    }
}
