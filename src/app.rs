use crate::config::{EditorConfig, SHAPES_KEY};
use crate::export;
use crate::hashed_state::{HashedStateStore, HashedValue, HistoryBackend};
use crate::input::{InputEvent, InputHandler, Viewport};
use crate::renderer::{canvas_document, preview_document, DocumentPainter, VectorDocument};
use crate::shape::Shape;
use crate::state::{DrawMode, DrawStateMachine};
use crate::util::time;

/// The polygon icon editor. All document state lives in the URL fragment
/// reached through `B`.
pub struct IconEditorApp<B: HistoryBackend> {
    config: EditorConfig,
    store: HashedStateStore<B>,
    shapes: HashedValue<Vec<Shape>>,
    machine: DrawStateMachine,
    input: InputHandler,
    document_painter: DocumentPainter,
    /// Canvas as last shown, hit-tested by the next frame's input
    canvas: VectorDocument,
    /// Outcome of the last export or copy action
    status: Option<String>,
}

impl<B: HistoryBackend> IconEditorApp<B> {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, backend: B, config: EditorConfig) -> Self {
        #[cfg(target_arch = "wasm32")]
        repaint_on_navigation(&cc.egui_ctx);
        #[cfg(not(target_arch = "wasm32"))]
        let _ = cc;

        Self::with_backend(backend, config)
    }

    /// Builds the editor without a window, loading shapes from the fragment.
    pub fn with_backend(backend: B, config: EditorConfig) -> Self {
        let mut store = HashedStateStore::new(backend, config.debounce);
        let mut shapes = HashedValue::new(SHAPES_KEY, Vec::new());
        shapes.refresh(&mut store);

        let mut machine = DrawStateMachine::new(config.close_distance);
        machine.resync(shapes.get());
        log::info!("Loaded {} shapes from the URL", shapes.get().len());

        let canvas = canvas_document(shapes.get(), machine.mode(), machine.cursor(), &config);
        Self {
            config,
            store,
            shapes,
            machine,
            input: InputHandler::new(),
            document_painter: DocumentPainter::new(),
            canvas,
            status: None,
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        self.shapes.get()
    }

    pub fn mode(&self) -> DrawMode {
        self.machine.mode()
    }

    pub fn store(&self) -> &HashedStateStore<B> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut HashedStateStore<B> {
        &mut self.store
    }

    /// Feeds pointer events through the state machine and stores every
    /// resulting collection. Returns whether the document changed.
    pub fn apply_events(&mut self, events: &[InputEvent], viewport: &dyn Viewport, now: f64) -> bool {
        let mut changed = false;
        for event in events {
            let Some(next) = self.machine.handle_event(event, self.shapes.get(), viewport) else {
                continue;
            };
            match self.shapes.set(&mut self.store, next, now) {
                Ok(()) => changed = true,
                Err(err) => log::error!("Failed to store shapes: {}", err),
            }
        }
        changed
    }

    /// Picks up outside navigation and commits a due write.
    pub fn sync(&mut self, now: f64) {
        if self.store.sync_external() {
            self.shapes.refresh(&mut self.store);
            self.machine.resync(self.shapes.get());
            log::info!("Reloaded {} shapes after navigation", self.shapes.get().len());
        }
        if let Err(err) = self.store.poll(now) {
            log::error!("Failed to write state to the URL: {}", err);
        }
    }

    pub fn preview(&self, size: u32) -> VectorDocument {
        preview_document(self.shapes.get(), size, &self.config)
    }

    fn export(&mut self, doc: &VectorDocument) {
        #[cfg(not(target_arch = "wasm32"))]
        let result = std::env::current_dir()
            .map_err(crate::error::ExportError::from)
            .and_then(|dir| export::save_png(doc, &dir))
            .map(|path| path.display().to_string());
        #[cfg(target_arch = "wasm32")]
        let result = export::download_png(doc);

        self.status = Some(match result {
            Ok(name) => format!("Saved {name}"),
            Err(err) => {
                log::warn!("Export failed: {}", err);
                format!("Download failed: {err}")
            }
        });
    }

    fn toolbar_ui(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Stateless Icon Designer");
            ui.separator();
            if ui.button("⏴ Back").clicked() {
                self.store.backend_mut().back();
            }
            if ui.button("Forward ⏵").clicked() {
                self.store.backend_mut().forward();
            }
            if ui.button("Copy link").clicked() {
                if let Err(err) = self.store.flush() {
                    log::error!("Failed to write state to the URL: {}", err);
                }
                ctx.copy_text(self.store.backend().href());
                self.status = Some("Link copied".to_owned());
            }
            if let Some(status) = &self.status {
                ui.label(status);
            }
        });
    }

    fn previews_ui(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let sizes = self.config.preview_sizes.clone();
        for size in sizes {
            let doc = self.preview(size);
            ui.heading(format!("{size}x{size}"));

            let side = size as f32;
            let (rect, _) = ui.allocate_exact_size(egui::vec2(side, side), egui::Sense::hover());
            self.document_painter.paint(ctx, ui.painter(), rect, &format!("preview-{size}"), &doc);

            ui.horizontal(|ui| {
                if ui.link("download").clicked() {
                    self.export(&doc);
                }
                if ui.link("copy SVG").clicked() {
                    ctx.copy_text(doc.to_svg());
                    self.status = Some(format!("SVG for {size}x{size} copied"));
                }
            });
            ui.add_space(8.0);
        }
    }

    fn canvas_ui(&mut self, ctx: &egui::Context, ui: &mut egui::Ui, now: f64) {
        ui.horizontal(|ui| {
            ui.heading("#Canvas");
            ui.label(self.machine.mode().label());
        });

        let side = self.config.canvas_size;
        let (response, painter) = ui.allocate_painter(egui::vec2(side, side), egui::Sense::click_and_drag());
        let rect = response.rect;

        let events = self.input.process_input(ctx, &self.canvas, &rect);
        self.apply_events(&events, &rect, now);

        self.canvas = canvas_document(
            self.shapes.get(),
            self.machine.mode(),
            self.machine.cursor(),
            &self.config,
        );
        self.document_painter.paint(ctx, &painter, rect, "canvas", &self.canvas);
    }
}

impl<B: HistoryBackend> eframe::App for IconEditorApp<B> {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = time::current_time_secs();
        self.sync(now);
        self.document_painter.begin_frame();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.toolbar_ui(ctx, ui));
        egui::SidePanel::right("previews")
            .resizable(false)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| self.previews_ui(ctx, ui));
            });
        egui::CentralPanel::default().show(ctx, |ui| self.canvas_ui(ctx, ui, now));

        // Wake up again to commit the debounced write
        if let Some(wait) = self.store.time_until_flush(now) {
            ctx.request_repaint_after(wait);
        }
    }
}

/// Browser navigation does not generate egui input, so ask for a frame
/// whenever the history changes.
#[cfg(target_arch = "wasm32")]
fn repaint_on_navigation(ctx: &egui::Context) {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast as _;

    let Some(window) = web_sys::window() else {
        return;
    };
    for event in ["popstate", "hashchange"] {
        let ctx = ctx.clone();
        let callback = Closure::<dyn FnMut()>::new(move || ctx.request_repaint());
        if let Err(err) = window.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
            log::warn!("Cannot listen for {}: {:?}", event, err);
        }
        callback.forget();
    }
}
