//! Keyboard shortcut registry and documentation.

use studyhub_core::ToolKind;

/// A keyboard shortcut definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        let mut shortcuts: Vec<Shortcut> = ToolKind::ALL
            .iter()
            .filter_map(|&tool| Some(Shortcut::new(tool_hotkey(tool)?, false, false, tool.label())))
            .collect();
        shortcuts.extend([
            Shortcut::new("Z", true, false, "Undo"),
            Shortcut::new("Z", true, true, "Redo"),
            Shortcut::new("Y", true, false, "Redo"),
            Shortcut::new("0", false, false, "Reset view"),
            Shortcut::new("Space+Drag", false, false, "Pan the board"),
            Shortcut::new("Wheel", false, false, "Zoom at cursor"),
            Shortcut::new("Enter", false, false, "Place text"),
            Shortcut::new("Escape", false, false, "Discard text"),
        ]);
        shortcuts
    }

    /// Render the shortcut table as printable text.
    pub fn table() -> String {
        let mut out = String::from("=== Keyboard Shortcuts ===\n");
        for shortcut in Self::all() {
            out.push_str(&format!("  {:20} {}\n", shortcut.format(), shortcut.description));
        }
        out
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n{}", Self::table());
    }
}

fn tool_hotkey(tool: ToolKind) -> Option<&'static str> {
    match tool {
        ToolKind::Pen => Some("P"),
        ToolKind::Highlight => Some("H"),
        ToolKind::Eraser => Some("E"),
        ToolKind::Text => Some("T"),
        ToolKind::Rect => Some("R"),
        ToolKind::Circle => Some("C"),
        ToolKind::Pan => None,
    }
}
