use std::path::Path;

use eframe::egui::{self, TextureHandle, TextureOptions};

use crate::data::raster;
use crate::state::{Command, CuratorState, Outcome};
use crate::ui::{panels, viewer};

// ---------------------------------------------------------------------------
// Textures of the displayed pair
// ---------------------------------------------------------------------------

/// Uploaded textures for the pair on screen, or the decode error per side.
pub struct PairTextures {
    pub image: Result<TextureHandle, String>,
    pub mask: Result<TextureHandle, String>,
}

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CuratorApp {
    pub state: CuratorState,
    /// `None` when the displayed pair changed and needs re-decoding.
    textures: Option<PairTextures>,
    /// Set once the last pair is removed; nothing is drawn afterwards.
    finished: bool,
}

impl CuratorApp {
    pub fn new(state: CuratorState) -> Self {
        Self {
            state,
            textures: None,
            finished: false,
        }
    }

    /// Apply queued commands in order, each to completion.
    fn dispatch(&mut self, ctx: &egui::Context, commands: &[Command]) {
        for &command in commands {
            match self.state.apply(command) {
                Outcome::Unchanged => {}
                Outcome::Moved | Outcome::Removed => self.textures = None,
                Outcome::Finished => {
                    self.finished = true;
                    self.textures = None;
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    return;
                }
            }
        }
    }

    fn load_textures(&mut self, ctx: &egui::Context) -> Option<PairTextures> {
        let (image_path, mask_path) = self.state.current_paths()?;
        let textures = PairTextures {
            image: upload(ctx, "image", &image_path),
            mask: upload(ctx, "mask", &mask_path),
        };

        for err in [&textures.image, &textures.mask]
            .into_iter()
            .filter_map(|t| t.as_ref().err())
        {
            self.state.report(format!("Error: {err}"));
        }

        if let Some(pair) = self.state.current() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(format!(
                "Mask Curator – {} ({}/{})",
                pair.image,
                self.state.pairs().cursor() + 1,
                self.state.pairs().len()
            )));
        }
        Some(textures)
    }
}

/// Decode `path` and upload it, turning a decode failure into a message.
fn upload(ctx: &egui::Context, name: &str, path: &Path) -> Result<TextureHandle, String> {
    match raster::decode(path) {
        Ok(img) => Ok(ctx.load_texture(name, img, TextureOptions::LINEAR)),
        Err(e) => {
            let e = anyhow::Error::from(e);
            log::error!("Failed to load {name}: {e:#}");
            Err(format!("{e:#}"))
        }
    }
}

/// Map a key press to a command. Held-down Space does not repeat a removal.
fn key_command(key: egui::Key, repeat: bool) -> Option<Command> {
    match key {
        egui::Key::ArrowRight => Some(Command::Advance),
        egui::Key::ArrowLeft => Some(Command::Retreat),
        egui::Key::Space if !repeat => Some(Command::Commit),
        _ => None,
    }
}

impl CuratorApp {
    /// One frame: handle key presses, then draw the current pair.
    fn show(&mut self, ctx: &egui::Context) {
        if self.finished {
            return;
        }

        let commands: Vec<Command> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        repeat,
                        ..
                    } => key_command(*key, *repeat),
                    _ => None,
                })
                .collect()
        });
        self.dispatch(ctx, &commands);
        if self.finished {
            return;
        }

        if self.textures.is_none() {
            self.textures = self.load_textures(ctx);
        }

        // ---- Top panel: position, file names, status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Bottom panel: key bindings ----
        egui::TopBottomPanel::bottom("key_hints").show(ctx, |ui| {
            panels::key_hints(ui, &self.state);
        });

        // ---- Central panel: image | mask ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(textures) = &self.textures {
                viewer::pair_view(ui, textures);
            }
        });
    }
}

impl eframe::App for CuratorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}
