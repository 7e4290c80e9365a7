use eframe::egui::{self, Color32, Ui};

use crate::app::PairTextures;

// ---------------------------------------------------------------------------
// Side-by-side view (central panel)
// ---------------------------------------------------------------------------

/// Render the image on the left and its mask on the right.
pub fn pair_view(ui: &mut Ui, textures: &PairTextures) {
    ui.columns(2, |columns: &mut [Ui]| {
        panel(&mut columns[0], "Image", &textures.image);
        panel(&mut columns[1], "Mask", &textures.mask);
    });
}

fn panel(ui: &mut Ui, title: &str, texture: &Result<egui::TextureHandle, String>) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(title);
        ui.add_space(4.0);
        match texture {
            Ok(texture) => {
                // Scale to the panel, keeping the aspect ratio. No frame or axes.
                let sized = egui::load::SizedTexture::from_handle(texture);
                ui.add(
                    egui::Image::from_texture(sized)
                        .fit_to_exact_size(ui.available_size())
                        .maintain_aspect_ratio(true),
                );
            }
            Err(msg) => {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.colored_label(Color32::RED, format!("Cannot display: {msg}"));
                });
            }
        }
    });
}
