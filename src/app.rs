use crate::host::MemoryHost;
use crate::options::PadOptions;
use crate::panels;
use crate::stroke::Stroke;
use crate::style::{self, Style};
use crate::widget::SignatureWidget;

/// What survives a restart: colors, pen tuning and the current signature.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct PersistedState {
    pub style: Style,
    pub options: PadOptions,
    pub strokes: Vec<Stroke>,
}

/// Environment variable holding a JSON `PadOptions` blob, read at startup on native
pub const OPTIONS_ENV_VAR: &str = "SIGNATURE_PAD_OPTIONS";

/// Signature pad next to a demo attachment table
pub struct SignatureApp {
    pub(crate) widget: SignatureWidget<MemoryHost>,
    pub(crate) host: MemoryHost,
    /// Text of the hex color fields in the toolbar
    pub(crate) pen_hex: String,
    pub(crate) background_hex: String,
    #[cfg(not(target_arch = "wasm32"))]
    pub(crate) download_dir: std::path::PathBuf,
}

impl SignatureApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let state = cc
            .storage
            .and_then(|storage| eframe::get_value::<PersistedState>(storage, eframe::APP_KEY))
            .unwrap_or_default();
        log::info!("Restored {} strokes from storage", state.strokes.len());

        #[cfg(not(target_arch = "wasm32"))]
        let state = PersistedState {
            options: options_override(std::env::var(OPTIONS_ENV_VAR).ok().as_deref())
                .unwrap_or(state.options),
            ..state
        };

        Self::with_state(MemoryHost::demo(), state)
    }

    pub fn with_state(host: MemoryHost, state: PersistedState) -> Self {
        let mut widget = SignatureWidget::new(host.clone(), state.style, state.options);
        if !state.strokes.is_empty() {
            widget.restore(state.strokes);
        }
        Self {
            widget,
            host,
            pen_hex: style::to_hex(state.style.pen_color),
            background_hex: style::to_hex(state.style.background_color),
            #[cfg(not(target_arch = "wasm32"))]
            download_dir: std::env::current_dir()
                .unwrap_or_else(|_| std::path::PathBuf::from(".")),
        }
    }

    pub fn persisted_state(&self) -> PersistedState {
        let pad = self.widget.pad();
        PersistedState {
            style: *pad.style(),
            options: *pad.options(),
            strokes: pad.to_data(),
        }
    }
}

/// Pen options from a JSON blob. Invalid JSON is logged and ignored.
pub fn options_override(json: Option<&str>) -> Option<PadOptions> {
    let json = json?;
    match PadOptions::from_json(json) {
        Ok(options) => {
            log::info!("Using pen options from {OPTIONS_ENV_VAR}");
            Some(options)
        }
        Err(err) => {
            log::warn!("Ignoring invalid {OPTIONS_ENV_VAR}: {err}");
            None
        }
    }
}

impl eframe::App for SignatureApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.persisted_state());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.widget.poll(ctx);

        panels::toolbar(self, ctx);
        panels::table_panel(self, ctx);
        panels::notice_panel(self, ctx);
        panels::canvas_panel(self, ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.widget.teardown();
    }
}
