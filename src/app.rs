use std::path::PathBuf;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::controller::Controller;
use crate::export;
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::style::{ToolConfig, ToolSnapshot};
use crate::texture_manager::TextureManager;

/// What survives a restart: the theme flag and the toolbar settings.
/// Pixels are never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct PersistedState {
    pub dark_mode: bool,
    pub tools: Option<ToolSnapshot>,
}

pub struct SketchApp {
    tools: Rc<ToolConfig>,
    controller: Controller,
    input: InputHandler,
    textures: TextureManager,
    export_path: PathBuf,
    dark_mode: bool,
    /// Outcome of the last Save, shown in the toolbar
    status: Option<String>,
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        let persisted: PersistedState = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        let app = Self::from_parts(settings, persisted);
        app.apply_theme(&cc.egui_ctx);
        app
    }

    /// Build the app without an egui context
    pub fn from_parts(settings: Settings, persisted: PersistedState) -> Self {
        let tools = Rc::new(settings.tool_config());
        if let Some(snapshot) = &persisted.tools {
            tools.restore(snapshot);
        }
        let controller = Controller::with_size(settings.canvas_width, settings.canvas_height, Rc::clone(&tools));
        log::info!(
            "Canvas {}x{}, tools {:?}",
            settings.canvas_width,
            settings.canvas_height,
            tools.snapshot()
        );

        Self {
            tools,
            controller,
            input: InputHandler::new(),
            textures: TextureManager::new(),
            export_path: settings.export_path,
            dark_mode: persisted.dark_mode,
            status: None,
        }
    }

    pub fn tools(&self) -> &Rc<ToolConfig> {
        &self.tools
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Split borrow for the canvas panel
    pub(crate) fn canvas_parts(&mut self) -> (&mut InputHandler, &mut TextureManager, &mut Controller) {
        (&mut self.input, &mut self.textures, &mut self.controller)
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.dark_mode = !self.dark_mode;
        log::info!("Dark mode: {}", self.dark_mode);
        self.apply_theme(ctx);
    }

    fn apply_theme(&self, ctx: &egui::Context) {
        let visuals = if self.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        ctx.set_visuals(visuals);
    }

    pub fn clear(&mut self) {
        self.controller.clear();
        self.status = None;
    }

    pub fn export_drawing(&mut self) {
        let result = export::save_png(self.controller.committed(), &self.export_path);
        self.status = Some(match result {
            Ok(()) => format!("Saved {}", self.export_path.display()),
            Err(err) => {
                log::error!("Export failed: {}", err);
                format!("Save failed: {err}")
            }
        });
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn persisted_state(&self) -> PersistedState {
        PersistedState {
            dark_mode: self.dark_mode,
            tools: Some(self.tools.snapshot()),
        }
    }
}

impl eframe::App for SketchApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.persisted_state());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
