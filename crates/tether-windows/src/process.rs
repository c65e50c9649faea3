use tether_core::WindowResult;
use windows::Win32::Foundation::{CloseHandle, HANDLE};
use windows::Win32::System::Threading::{
    OpenProcess, PROCESS_ACCESS_RIGHTS, PROCESS_NAME_WIN32, PROCESS_QUERY_LIMITED_INFORMATION,
    PROCESS_TERMINATE, QueryFullProcessImageNameW, TerminateProcess,
};
use windows::core::PWSTR;

/// RAII guard that closes a process handle on drop.
struct ProcessHandle(HANDLE);

impl ProcessHandle {
    fn open(access: PROCESS_ACCESS_RIGHTS, pid: u32) -> Option<Self> {
        // SAFETY: OpenProcess attempts to open an existing process and
        // fails cleanly if it doesn't exist or access is denied.
        unsafe { OpenProcess(access, false, pid) }.ok().map(Self)
    }
}

impl Drop for ProcessHandle {
    fn drop(&mut self) {
        // SAFETY: the guard owns this handle exclusively.
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

/// Checks whether a process with the given PID is still alive.
///
/// Uses `OpenProcess` with minimal access rights. If the handle can be
/// opened, the process exists. This is used to detect stale PID files
/// left behind when the daemon is killed without a clean shutdown.
pub fn is_process_alive(pid: u32) -> bool {
    ProcessHandle::open(PROCESS_QUERY_LIMITED_INFORMATION, pid).is_some()
}

/// Forcibly terminates a process. Returns whether it succeeded.
pub fn kill_process(pid: u32) -> bool {
    let Some(process) = ProcessHandle::open(PROCESS_TERMINATE, pid) else {
        return false;
    };
    // SAFETY: the handle was opened with PROCESS_TERMINATE.
    unsafe { TerminateProcess(process.0, 1) }.is_ok()
}

/// Returns the full executable path of a process.
///
/// `PROCESS_QUERY_LIMITED_INFORMATION` is enough here, so this also
/// works for most elevated processes.
pub fn exe_path(pid: u32) -> WindowResult<String> {
    let process = ProcessHandle::open(PROCESS_QUERY_LIMITED_INFORMATION, pid)
        .ok_or_else(|| format!("cannot open process {pid}"))?;

    let mut buffer = [0u16; 1024];
    let mut len = buffer.len() as u32;
    // SAFETY: `buffer` holds `len` UTF-16 units; the call writes at most
    // that many and updates `len` to the number written.
    unsafe {
        QueryFullProcessImageNameW(
            process.0,
            PROCESS_NAME_WIN32,
            PWSTR(buffer.as_mut_ptr()),
            &mut len,
        )?;
    }
    Ok(String::from_utf16_lossy(&buffer[..len as usize]))
}
