//! Process-name matching and candidate ranking for the window locator.
//!
//! The platform crate does the enumeration; the decisions about which
//! windows match live here so they can be tested without a desktop.

use crate::WindowHandle;
use crate::desktop::TargetWindow;

const EXE_SUFFIX: &str = ".exe";

/// Reduces an executable name or path to a comparable stem.
///
/// Strips any directory and a trailing `.exe`, and lowercases the result,
/// so `C:\Apps\Code.exe`, `Code.exe` and `code` all become `code`. Other
/// dots are part of the name: `my.app` stays `my.app`.
pub fn normalize_process_name(name: &str) -> String {
    let file = name
        .trim()
        .rsplit(['\\', '/'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match file.strip_suffix(EXE_SUFFIX) {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => file,
    }
}

/// Returns whether the executable at `exe_path` is the configured process.
pub fn matches_process(exe_path: &str, configured: &str) -> bool {
    let wanted = normalize_process_name(configured);
    !wanted.is_empty() && normalize_process_name(exe_path) == wanted
}

/// Picks the best single candidate.
///
/// The OS foreground window wins when it is among the candidates;
/// otherwise the first candidate in enumeration order.
pub fn preferred(
    candidates: &[TargetWindow],
    foreground: Option<WindowHandle>,
) -> Option<&TargetWindow> {
    foreground
        .and_then(|fg| candidates.iter().find(|c| c.handle == fg))
        .or_else(|| candidates.first())
}

/// Reorders candidates so the [`preferred`] one comes first.
///
/// The rest keep their enumeration order.
pub fn rank(
    mut candidates: Vec<TargetWindow>,
    foreground: Option<WindowHandle>,
) -> Vec<TargetWindow> {
    let best = preferred(&candidates, foreground).map(|c| c.handle);
    if let Some(best) = best
        && let Some(pos) = candidates.iter().position(|c| c.handle == best)
    {
        candidates[..=pos].rotate_right(1);
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(raw: usize) -> TargetWindow {
        TargetWindow {
            handle: WindowHandle::from_raw(raw),
            process_id: 10,
            title: format!("window {raw}"),
            path: r"C:\Apps\Code.exe".into(),
        }
    }

    #[test]
    fn normalize_strips_directory_and_extension() {
        assert_eq!(normalize_process_name(r"C:\Apps\Code.exe"), "code");
        assert_eq!(normalize_process_name("/usr/bin/WindowsTerminal.EXE"), "windowsterminal");
        assert_eq!(normalize_process_name("code"), "code");
        assert_eq!(normalize_process_name("  Code.exe "), "code");
    }

    #[test]
    fn normalize_keeps_dotfiles_and_multi_dot_names() {
        assert_eq!(normalize_process_name(".hidden"), ".hidden");
        assert_eq!(normalize_process_name("my.app.exe"), "my.app");
        assert_eq!(normalize_process_name("my.app"), "my.app");
        assert_eq!(normalize_process_name(".exe"), ".exe");
    }

    #[test]
    fn dotted_configured_name_matches_its_executable() {
        assert!(matches_process(r"C:\x\my.app.exe", "my.app"));
        assert!(matches_process(r"C:\x\my.app.exe", "My.App.exe"));
        assert!(!matches_process(r"C:\x\my.exe", "my.app"));
    }

    #[test]
    fn matches_is_case_insensitive() {
        assert!(matches_process(r"C:\Apps\Code.exe", "code"));
        assert!(matches_process(r"C:\Apps\Code.exe", "CODE.EXE"));
        assert!(!matches_process(r"C:\Apps\Code.exe", "codex"));
        assert!(!matches_process(r"C:\Apps\Code.exe", ""));
    }

    #[test]
    fn preferred_picks_foreground_when_present() {
        // Arrange
        let candidates = vec![candidate(1), candidate(2), candidate(3)];

        // Act / Assert
        let fg = Some(WindowHandle::from_raw(2));
        assert_eq!(preferred(&candidates, fg).unwrap().handle.raw(), 2);

        let other = Some(WindowHandle::from_raw(99));
        assert_eq!(preferred(&candidates, other).unwrap().handle.raw(), 1);
        assert!(preferred(&[], fg).is_none());
    }

    #[test]
    fn rank_moves_foreground_first() {
        // Arrange
        let candidates = vec![candidate(1), candidate(2), candidate(3)];

        // Act
        let ranked = rank(candidates, Some(WindowHandle::from_raw(3)));

        // Assert
        let order: Vec<_> = ranked.iter().map(|c| c.handle.raw()).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }
}
