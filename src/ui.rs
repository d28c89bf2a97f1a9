//! Human-readable rendering of discovery results and build events

use std::path::Path;

use frappe_build::config::ConfigWarning;
use frappe_build::{BuildEvent, Unit};

pub fn print_config_warnings(warnings: &[ConfigWarning]) {
    for w in warnings {
        if let Some(line) = w.line {
            eprintln!("⚠ Unknown config key '{}' in {}:{}", w.path, w.file.display(), line);
        } else {
            eprintln!("⚠ Unknown config key '{}' in {}", w.path, w.file.display());
        }

        if let Some(suggestion) = &w.suggestion {
            eprintln!("   Did you mean '{}'?\n", suggestion);
        }
    }
}

/// Path relative to `root` when possible
fn short(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

pub fn render_units(units: &[Unit], root: &Path) -> String {
    let modules: Vec<_> = units.iter().filter_map(Unit::as_module).collect();
    let assets: Vec<_> = units
        .iter()
        .filter_map(|u| match u {
            Unit::Asset(a) => Some(a),
            Unit::Module(_) => None,
        })
        .collect();

    let mut out = String::new();
    if !modules.is_empty() {
        out.push_str(&format!("Found {} DocType(s) with TypeScript:\n", modules.len()));
        for unit in &modules {
            out.push_str(&format!(
                "  - {} ({} file(s)) -> {}\n",
                unit.name(),
                unit.source_files().len(),
                short(unit.output_file(), root)
            ));
        }
    }
    if !assets.is_empty() {
        out.push_str(&format!("Found {} public/ts folder(s):\n", assets.len()));
        for unit in &assets {
            out.push_str(&format!(
                "  - {} file(s) in {} -> {}\n",
                unit.source_files().len(),
                short(unit.source_dir(), root),
                short(unit.output_dir(), root)
            ));
        }
    }
    out
}

pub fn render_event(event: &BuildEvent, root: &Path) -> String {
    match event {
        BuildEvent::UnitStarted { label, files } => {
            format!("◆ Building {} ({} file(s))...\n", label, files)
        }
        BuildEvent::UnitBuilt { label, output } => {
            format!("  ✓ {} -> {}\n", label, short(Path::new(output), root))
        }
        BuildEvent::UnitFailed { label, message } => format!("  ✗ {}: {}\n", label, message),
        BuildEvent::WatchStarted { label, pid } => format!("◆ Watching {} (pid {})\n", label, pid),
        BuildEvent::ProcessExited { label, code } => match code {
            Some(code) => format!("⚠ {} exited with code {}\n", label, code),
            None => format!("⚠ {} was terminated\n", label),
        },
        BuildEvent::TypeCheckSkipped { config } => {
            format!("⚠ {} not found, skipping type-checking\n", config)
        }
        BuildEvent::TypeCheckStarted { config } => {
            format!("◆ Type-checking with {}\n", config)
        }
    }
}

/// Print one event to the right stream in the selected format
pub fn emit(event: &BuildEvent, command: &str, json: bool, root: &Path) {
    if json {
        println!("{}", event.to_json(command));
        return;
    }
    let rendered = render_event(event, root);
    match event {
        BuildEvent::UnitFailed { .. } | BuildEvent::ProcessExited { .. } => eprint!("{rendered}"),
        _ => print!("{rendered}"),
    }
}
