pub mod init;

#[cfg(windows)]
pub mod banner;
#[cfg(windows)]
pub mod control;
#[cfg(windows)]
pub mod daemon;
#[cfg(windows)]
pub mod debug;
#[cfg(windows)]
pub mod start;
#[cfg(windows)]
pub mod status;
#[cfg(windows)]
pub mod stop;
