//! Summary rendering shared by `resolve` and `inventory`.

use anyhow::{Context, Result};
use gateinv_core::inventory::InventorySummary;

/// Pretty JSON with a trailing newline.
pub fn render_summary(summary: &InventorySummary) -> Result<String> {
    let mut text = serde_json::to_string_pretty(summary).context("serialize summary")?;
    text.push('\n');
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_summary_renders_both_sections() {
        let text = render_summary(&InventorySummary::new()).unwrap();
        assert_eq!(text, "{\n  \"feature_gates\": {},\n  \"dynamic_configs\": {}\n}\n");
    }
}
