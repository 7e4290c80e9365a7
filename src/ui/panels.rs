use eframe::egui::{Color32, RichText, Ui};

use crate::state::CuratorState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Position, current file names, pairing warning and status message.
pub fn top_bar(ui: &mut Ui, state: &CuratorState) {
    ui.horizontal(|ui: &mut Ui| {
        let pairs = state.pairs();
        let Some(pair) = pairs.current() else {
            ui.label("No pairs left.");
            return;
        };

        ui.strong(format!("{} / {}", pairs.cursor() + 1, pairs.len()));
        ui.separator();
        ui.label(format!("{}  ↔  {}", pair.image, pair.mask));

        if !pair.stems_match() {
            ui.separator();
            ui.label(RichText::new("⚠ file names differ").color(Color32::YELLOW));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Bottom bar
// ---------------------------------------------------------------------------

pub fn key_hints(ui: &mut Ui, state: &CuratorState) {
    let remove = match state.cache() {
        Some(cache) => format!(
            "Space: move to {}",
            cache.images.parent().unwrap_or(&cache.images).display()
        ),
        None => "Space: delete".to_string(),
    };
    ui.horizontal(|ui: &mut Ui| {
        ui.label("→ next");
        ui.separator();
        ui.label("← previous");
        ui.separator();
        ui.label(RichText::new(remove).strong());
    });
}
