//! Debug visualization of a panel's record sequence.
//!
//! ```ignore
//! use inline_panel::debug::PanelTreeDebug;
//!
//! println!("{}", PanelTreeDebug::new().format(&panel));
//! ```
//!
//! produces something like:
//!
//! ```text
//! Inline panel 'items' (3 records, 2 active):
//! ├── items-0 #1 order=1
//! ├── items-1 (deleted) order=2
//! └── items-2 #2 order=3
//! ```

use std::fmt::Write as FmtWrite;

use crate::factory::RecordFactory;
use crate::panel::InlinePanel;
use crate::panels::PanelToggle;
use crate::record::{ChildControl, ChildRecord};

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to list deleted records.
    pub show_deleted: bool,
    /// Whether to show order values.
    pub show_orders: bool,
    /// Whether to show control states.
    pub show_controls: bool,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_deleted: true,
            show_orders: true,
            show_controls: false,
        }
    }
}

impl TreeFormatOptions {
    /// Options showing everything.
    pub fn detailed() -> Self {
        Self {
            show_controls: true,
            ..Default::default()
        }
    }

    /// Options for minimal output: active records and their ordinals only.
    pub fn minimal() -> Self {
        Self {
            show_deleted: false,
            show_orders: false,
            show_controls: false,
            ..Default::default()
        }
    }
}

/// Renders an [`InlinePanel`]'s records as a tree.
#[derive(Debug, Clone, Default)]
pub struct PanelTreeDebug {
    options: TreeFormatOptions,
}

impl PanelTreeDebug {
    /// Create a visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format the panel.
    pub fn format<F: RecordFactory, P: PanelToggle>(&self, panel: &InlinePanel<F, P>) -> String {
        let mut output = String::new();
        let _ = writeln!(
            output,
            "Inline panel '{}' ({} records, {} active):",
            panel.config().formset_prefix(),
            panel.len(),
            panel.active_count()
        );

        let shown: Vec<&ChildRecord> = panel
            .records()
            .filter(|record| self.options.show_deleted || record.is_active())
            .collect();

        if shown.is_empty() {
            output.push_str("  (empty)\n");
            return output;
        }

        let last = shown.len() - 1;
        for (i, record) in shown.into_iter().enumerate() {
            output.push_str(self.branch(i == last));
            self.format_record(record, &mut output);
            output.push('\n');
        }
        output
    }

    fn branch(&self, is_last: bool) -> &'static str {
        match (self.options.style, is_last) {
            (TreeStyle::Ascii, false) => "+-- ",
            (TreeStyle::Ascii, true) => "`-- ",
            (TreeStyle::Unicode, false) => "\u{251c}\u{2500}\u{2500} ",
            (TreeStyle::Unicode, true) => "\u{2514}\u{2500}\u{2500} ",
            (TreeStyle::Compact, _) => "- ",
        }
    }

    fn format_record(&self, record: &ChildRecord, output: &mut String) {
        output.push_str(record.prefix());
        if record.is_deleted() {
            output.push_str(" (deleted)");
        } else if let Some(ordinal) = record.ordinal() {
            let _ = write!(output, " #{ordinal}");
        }

        if self.options.show_orders {
            if let Some(order) = record.order() {
                let _ = write!(output, " order={order}");
            }
        }

        if self.options.show_controls {
            let flag = |control: ChildControl| {
                let control = record.control(control);
                match (control.is_bound(), control.is_enabled()) {
                    (false, _) => '-',
                    (true, true) => '+',
                    (true, false) => 'x',
                }
            };
            let _ = write!(
                output,
                " [del{} up{} down{}]",
                flag(ChildControl::Delete),
                flag(ChildControl::MoveUp),
                flag(ChildControl::MoveDown)
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PanelConfig, PanelOptions};
    use crate::factory::{RecordTemplate, TemplateFactory};
    use crate::form::FormFields;
    use crate::panels::CollapsiblePanels;
    use std::time::Duration;

    fn panel() -> InlinePanel<TemplateFactory, CollapsiblePanels> {
        let config = PanelConfig::new(
            PanelOptions::new("items")
                .with_can_order(true)
                .with_collapse_duration(Duration::ZERO),
        )
        .unwrap();
        let factory = TemplateFactory::new(&config, RecordTemplate::new());
        let mut panel =
            InlinePanel::new(config, FormFields::new(), Vec::new(), factory, CollapsiblePanels::new())
                .unwrap();
        for _ in 0..3 {
            panel.add_record().unwrap();
        }
        let middle = panel.record_id("items-1").unwrap();
        panel.delete_record(middle).unwrap();
        panel
    }

    #[test]
    fn test_format_default() {
        let output = PanelTreeDebug::new().format(&panel());
        assert!(output.starts_with("Inline panel 'items' (3 records, 2 active):"));
        assert!(output.contains("\u{251c}\u{2500}\u{2500} items-0 #1 order=1"));
        assert!(output.contains("items-1 (deleted) order=2"));
        assert!(output.contains("\u{2514}\u{2500}\u{2500} items-2 #2 order=3"));
    }

    #[test]
    fn test_format_minimal() {
        let output = PanelTreeDebug::with_options(TreeFormatOptions::minimal()).format(&panel());
        assert!(!output.contains("items-1"));
        assert!(!output.contains("order="));
        assert!(output.contains("items-2 #2"));
    }

    #[test]
    fn test_format_controls_ascii() {
        let options = TreeFormatOptions {
            style: TreeStyle::Ascii,
            ..TreeFormatOptions::detailed()
        };
        let output = PanelTreeDebug::with_options(options).format(&panel());
        assert!(output.contains("+-- items-0 #1 order=1 [del+ upx down+]"));
        assert!(output.contains("`-- items-2 #2 order=3 [del+ up+ downx]"));
    }
}
