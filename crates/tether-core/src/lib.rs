pub mod anchor;
pub mod attach;
pub mod config;
pub mod desktop;
pub mod event;
pub mod handle;
pub mod ipc;
pub mod locator;
pub mod log;
pub mod pid;
pub mod rect;
pub mod resize;
pub mod state;
pub mod timer;
pub mod window;

pub use anchor::{Anchor, Margins, Offset, calc_position};
pub use attach::{AttachManager, EngineSettings};
pub use config::{Config, Layout, Responsiveness};
pub use desktop::{Desktop, Observer, Subscription, TargetWindow};
pub use event::WindowEvent;
pub use handle::WindowHandle;
pub use ipc::{Command, PIPE_NAME, Response};
pub use rect::{Rect, Size};
pub use state::{AttachState, TargetInfo};
pub use window::{Window, WindowResult};
