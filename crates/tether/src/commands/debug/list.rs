use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use tether_core::{Window, locator};

/// Lists visible top-level windows, optionally only those whose
/// executable matches `process`, the way the daemon would pick targets.
pub fn execute(process: Option<&str>) {
    let windows = match tether_windows::enumerate_windows() {
        Ok(windows) => windows,
        Err(e) => {
            eprintln!("Failed to enumerate windows: {e}");
            std::process::exit(1);
        }
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("HWND"),
            Cell::new("PID").set_alignment(CellAlignment::Right),
            Cell::new("Title"),
            Cell::new("Executable"),
            Cell::new("X").set_alignment(CellAlignment::Right),
            Cell::new("Y").set_alignment(CellAlignment::Right),
            Cell::new("Width").set_alignment(CellAlignment::Right),
            Cell::new("Height").set_alignment(CellAlignment::Right),
        ]);

    let mut count = 0;
    for window in &windows {
        let path = window.executable().unwrap_or_default();
        if let Some(name) = process
            && !locator::matches_process(&path, name)
        {
            continue;
        }

        let title = window.title();
        let pid = window.process_id().unwrap_or(0);
        let rect = window.bounds().unwrap_or(tether_core::Rect::new(0, 0, 0, 0));

        table.add_row(vec![
            Cell::new(window.handle()),
            Cell::new(pid).set_alignment(CellAlignment::Right),
            Cell::new(title),
            Cell::new(path),
            Cell::new(rect.x).set_alignment(CellAlignment::Right),
            Cell::new(rect.y).set_alignment(CellAlignment::Right),
            Cell::new(rect.width).set_alignment(CellAlignment::Right),
            Cell::new(rect.height).set_alignment(CellAlignment::Right),
        ]);
        count += 1;
    }

    println!("{table}");
    println!("\n{count} windows found");
}
