//! Interactive QR Lab session
//!
//! Owns the settings model, the current symbol and the damage simulator, and
//! sequences them: every settings write renders a new symbol, and anything
//! derived from the symbol is recomputed only after the renderer returns.
//! Observers register through [`QrLabSession::add_event_listener`] and are
//! called in registration order.

use std::time::Instant;

use image::RgbaImage;
use rand::Rng;
use tracing::{debug, info, warn};

use capacity::{CapacityEstimate, EncodingBreakdown};
use damage::{
    BrushInfo, BrushSize, DamageEstimate, DamageSimulator, MarkAddedResult, RandomDamageReport,
    paint_brush_preview, paint_damage_overlay,
};
use qrlab_config::{ContrastAdvice, LoadError, QrSettings, SetOutcome, SettingUpdate, SettingsModel};
use qrlab_render::{
    ExportArtifact, ExportError, RenderError, RenderRequest, RenderedSymbol, SymbolRenderer,
    export_current, now_millis,
};

use crate::notice::{NoticeKind, NoticeQueue};

/// Notice shown when the renderer rejects the current settings
pub const RENDER_FAILED_NOTICE: &str = "Error generating QR code";

/// Events emitted to session listeners
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A new symbol is in place
    SymbolRendered { width: u32, height: u32, modules: u32 },
    /// Rendering failed; the previous symbol (if any) is kept
    RenderFailed { message: String },
    /// A project document was applied
    ProjectLoaded,
    /// Marks changed or were reset
    DamageUpdated(DamageEstimate),
}

/// Learn-mode panel tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LearnTab {
    #[default]
    Anatomy,
    Damage,
    Data,
}

/// Learn-mode panel state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LearnState {
    pub active: bool,
    pub tab: LearnTab,
}

type Listener = Box<dyn FnMut(&SessionEvent)>;

/// A QR Lab session over a symbol renderer
pub struct QrLabSession<R: SymbolRenderer> {
    renderer: R,
    settings: SettingsModel,
    symbol: Option<RenderedSymbol>,
    /// Payload and pixel size the damage canvas was sized for
    damage_basis: Option<(String, u32)>,
    damage: DamageSimulator,
    brush: BrushSize,
    learn: LearnState,
    has_unsaved_changes: bool,
    notices: NoticeQueue,
    listeners: Vec<Listener>,
}

impl<R: SymbolRenderer> std::fmt::Debug for QrLabSession<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QrLabSession")
            .field("settings", self.settings.current())
            .field("has_symbol", &self.symbol.is_some())
            .field("mark_count", &self.damage.mark_count())
            .field("learn", &self.learn)
            .field("has_unsaved_changes", &self.has_unsaved_changes)
            .field("listener_count", &self.listeners.len())
            .finish()
    }
}

impl<R: SymbolRenderer> QrLabSession<R> {
    /// Create a session with default settings
    ///
    /// Nothing is rendered until [`QrLabSession::refresh`] is called.
    pub fn new(renderer: R) -> Self {
        Self::with_settings(renderer, SettingsModel::new())
    }

    /// Create a session over an existing settings model
    pub fn with_settings(renderer: R, settings: SettingsModel) -> Self {
        Self {
            renderer,
            settings,
            symbol: None,
            damage_basis: None,
            damage: DamageSimulator::new(),
            brush: BrushSize::default(),
            learn: LearnState::default(),
            has_unsaved_changes: false,
            notices: NoticeQueue::default(),
            listeners: Vec::new(),
        }
    }

    /// Register a listener called after every session event
    pub fn add_event_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&SessionEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn emit_event(&mut self, event: SessionEvent) {
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    fn emit_damage_updated(&mut self) {
        let estimate = self.damage_estimate();
        self.emit_event(SessionEvent::DamageUpdated(estimate));
    }

    /// Current settings
    pub fn settings(&self) -> &QrSettings {
        self.settings.current()
    }

    /// Current symbol, if one has rendered
    pub fn symbol(&self) -> Option<&RenderedSymbol> {
        self.symbol.as_ref()
    }

    pub fn damage(&self) -> &DamageSimulator {
        &self.damage
    }

    pub fn notices(&self) -> &NoticeQueue {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut NoticeQueue {
        &mut self.notices
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.has_unsaved_changes
    }

    pub fn learn_state(&self) -> LearnState {
        self.learn
    }

    /// Apply a user edit and re-render
    pub fn update(&mut self, update: SettingUpdate) -> SetOutcome {
        let outcome = self.settings.set(update);
        if outcome.is_stored() {
            self.has_unsaved_changes = true;
            // Failures are surfaced through a notice and a RenderFailed event
            let _ = self.refresh();
        }
        outcome
    }

    /// Render the current settings
    ///
    /// On success the symbol is replaced and, when the payload or pixel size
    /// differs from the one the marks were placed on, the damage simulator is
    /// reset to the new canvas. On failure the previous symbol and marks are
    /// kept.
    pub fn refresh(&mut self) -> Result<(), RenderError> {
        let request = RenderRequest::from_settings(self.settings.current());

        match self.renderer.render(&request) {
            Ok(symbol) => {
                let basis = (request.payload, request.width);
                let basis_changed = self.damage_basis.as_ref() != Some(&basis);
                if basis_changed {
                    self.damage.reset(symbol.display_width, symbol.display_height);
                    self.damage_basis = Some(basis);
                }

                let event = SessionEvent::SymbolRendered {
                    width: symbol.display_width,
                    height: symbol.display_height,
                    modules: symbol.modules,
                };
                debug!(
                    "QrLabSession::refresh: {}x{} symbol, {} modules",
                    symbol.display_width, symbol.display_height, symbol.modules
                );
                self.symbol = Some(symbol);
                self.emit_event(event);
                if basis_changed || self.damage_view_active() {
                    self.emit_damage_updated();
                }
                Ok(())
            }
            Err(err) => {
                warn!("QrLabSession::refresh: render failed: {}", err);
                self.notices
                    .push(NoticeKind::Error, RENDER_FAILED_NOTICE, Instant::now());
                self.emit_event(SessionEvent::RenderFailed {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Smallest version able to hold the current payload
    pub fn capacity(&self) -> CapacityEstimate {
        let settings = self.settings.current();
        capacity::estimate(settings.payload_len(), settings.error_correction)
    }

    /// Byte and bit breakdown of the current payload
    pub fn encoding_breakdown(&self) -> EncodingBreakdown {
        let settings = self.settings.current();
        EncodingBreakdown::for_payload(&settings.payload, settings.error_correction)
    }

    /// Damage figures at the current EC level
    pub fn damage_estimate(&self) -> DamageEstimate {
        self.damage.estimate(self.settings.current().error_correction)
    }

    /// Advisory contrast check for the current colors
    pub fn contrast_advice(&self) -> ContrastAdvice {
        let settings = self.settings.current();
        ContrastAdvice::for_pair(settings.foreground, settings.background)
    }

    pub fn brush(&self) -> BrushSize {
        self.brush
    }

    pub fn set_brush_size(&mut self, brush: BrushSize) {
        self.brush = brush;
    }

    /// Summary of the active brush on the current canvas
    pub fn brush_info(&self) -> BrushInfo {
        BrushInfo::new(self.brush, self.damage.canvas_area())
    }

    /// Place a mark with the active brush
    ///
    /// Coordinates are clamped onto the canvas. Returns `None` when there is
    /// no canvas to mark.
    pub fn add_damage_mark(&mut self, x: i64, y: i64) -> Option<MarkAddedResult> {
        let (width, height) = self.damage.canvas_size();
        if width == 0 || height == 0 {
            return None;
        }

        // Clamped into canvas bounds, which fit in u32
        let x = x.clamp(0, i64::from(width) - 1) as u32;
        let y = y.clamp(0, i64::from(height) - 1) as u32;
        let result = self.damage.add_mark(x, y, self.brush);
        if result.applied {
            self.emit_damage_updated();
        }
        Some(result)
    }

    /// Scatter random marks with the active brush
    pub fn add_random_damage<G: Rng>(&mut self, percentage: f64, rng: &mut G) -> RandomDamageReport {
        let report = self.damage.add_random_damage(percentage, self.brush, rng);
        self.emit_damage_updated();
        report
    }

    /// Remove all marks
    pub fn reset_damage(&mut self) {
        self.damage.clear();
        self.emit_damage_updated();
    }

    fn enter_damage_view(&mut self) {
        match &self.symbol {
            Some(symbol) => self.damage.reset(symbol.display_width, symbol.display_height),
            None => self.damage.clear(),
        }
        self.emit_damage_updated();
    }

    fn damage_view_active(&self) -> bool {
        self.learn.active && self.learn.tab == LearnTab::Damage
    }

    /// Show or hide the learn panel, returning the new state
    pub fn toggle_learn_mode(&mut self) -> bool {
        self.learn.active = !self.learn.active;
        info!("Learn mode {}", if self.learn.active { "on" } else { "off" });
        if self.damage_view_active() {
            self.enter_damage_view();
        }
        self.learn.active
    }

    /// Switch learn-panel tab; entering the damage tab starts from a clean canvas
    pub fn switch_tab(&mut self, tab: LearnTab) {
        self.learn.tab = tab;
        if tab == LearnTab::Damage {
            self.enter_damage_view();
        }
    }

    /// Symbol image with damage marks and an optional brush preview painted on
    pub fn damage_overlay(&self, preview_at: Option<(u32, u32)>) -> Option<RgbaImage> {
        let mut image = self.symbol.as_ref()?.image.clone();
        paint_damage_overlay(&mut image, self.damage.marks());
        if let Some((x, y)) = preview_at {
            paint_brush_preview(&mut image, x, y, self.brush);
        }
        Some(image)
    }

    /// Serialize the settings as a project document
    pub fn serialize_project(&mut self) -> Result<String, serde_json::Error> {
        let json = self.settings.to_project_json()?;
        self.has_unsaved_changes = false;
        Ok(json)
    }

    /// Apply a project document and re-render
    ///
    /// Malformed documents leave the session untouched. The settings are
    /// applied even when the following render fails.
    pub fn load_project(&mut self, json: &str) -> Result<Vec<SetOutcome>, LoadError> {
        let outcomes = self.settings.load_project_json(json)?;
        self.has_unsaved_changes = false;
        // A failed render has already pushed its own error notice
        if self.refresh().is_ok() {
            self.notices
                .push(NoticeKind::Success, "Project loaded", Instant::now());
        }
        self.emit_event(SessionEvent::ProjectLoaded);
        Ok(outcomes)
    }

    /// Encode the current symbol as a PNG download
    pub fn export(&mut self) -> Result<ExportArtifact, ExportError> {
        match export_current(self.symbol.as_ref(), now_millis()) {
            Ok(artifact) => {
                self.notices
                    .push(NoticeKind::Success, "QR Code downloaded!", Instant::now());
                Ok(artifact)
            }
            Err(err) => {
                self.notices
                    .push(NoticeKind::Error, err.to_string(), Instant::now());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use damage::Verdict;
    use qrlab_config::EcLevel;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Renderer producing a blank canvas of the requested size
    #[derive(Clone, Default)]
    struct StubRenderer {
        fail: Rc<Cell<bool>>,
        calls: Rc<Cell<usize>>,
    }

    impl SymbolRenderer for StubRenderer {
        fn render(&self, request: &RenderRequest) -> Result<RenderedSymbol, RenderError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail.get() {
                return Err(RenderError::Backend("payload too long".to_string()));
            }
            Ok(RenderedSymbol {
                display_width: request.width,
                display_height: request.height,
                modules: 25,
                image: RgbaImage::new(request.width, request.height),
            })
        }
    }

    fn session() -> (QrLabSession<StubRenderer>, StubRenderer) {
        let renderer = StubRenderer::default();
        let mut session = QrLabSession::new(renderer.clone());
        session.refresh().unwrap();
        (session, renderer)
    }

    fn record_events(session: &mut QrLabSession<StubRenderer>) -> Rc<RefCell<Vec<SessionEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        session.add_event_listener(move |event| sink.borrow_mut().push(event.clone()));
        events
    }

    #[test]
    fn test_refresh_sizes_damage_canvas() {
        let (session, _) = session();
        assert_eq!(session.damage().canvas_size(), (256, 256));
        assert_eq!(session.symbol().map(|s| s.display_width), Some(256));
        assert_eq!(session.brush_info().label(), "Medium (~9272 clicks for 25%)");
    }

    #[test]
    fn test_payload_change_clears_marks() {
        let (mut session, _) = session();
        session.add_damage_mark(50, 50);
        assert_eq!(session.damage().mark_count(), 1);

        session.update(SettingUpdate::Payload("hello".to_string()));
        assert_eq!(session.damage().mark_count(), 0);
        assert!(session.has_unsaved_changes());
    }

    #[test]
    fn test_size_change_resizes_canvas() {
        let (mut session, _) = session();
        session.add_damage_mark(10, 10);
        session.update(SettingUpdate::PixelSize(400));
        assert_eq!(session.damage().canvas_size(), (400, 400));
        assert_eq!(session.damage().mark_count(), 0);
    }

    #[test]
    fn test_color_and_level_changes_keep_marks() {
        let (mut session, _) = session();
        session.add_damage_mark(10, 10);
        session.update(SettingUpdate::ForegroundColor("#112233".to_string()));
        session.update(SettingUpdate::ErrorCorrection("H".to_string()));
        assert_eq!(session.damage().mark_count(), 1);
        assert_eq!(session.settings().error_correction, EcLevel::H);
    }

    #[test]
    fn test_rejected_update_does_not_render() {
        let (mut session, renderer) = session();
        let calls = renderer.calls.get();
        let outcome = session.update(SettingUpdate::ErrorCorrection("X".to_string()));
        assert!(!outcome.is_stored());
        assert_eq!(renderer.calls.get(), calls);
        assert!(!session.has_unsaved_changes());
    }

    #[test]
    fn test_render_failure_keeps_previous_symbol() {
        let (mut session, renderer) = session();
        session.add_damage_mark(20, 20);
        let events = record_events(&mut session);

        renderer.fail.set(true);
        session.update(SettingUpdate::PixelSize(500));

        assert_eq!(session.symbol().map(|s| s.display_width), Some(256));
        assert_eq!(session.damage().canvas_size(), (256, 256));
        assert_eq!(session.damage().mark_count(), 1);
        assert_eq!(
            session.notices().latest().map(|n| n.message.as_str()),
            Some(RENDER_FAILED_NOTICE)
        );
        assert!(matches!(
            events.borrow().as_slice(),
            [SessionEvent::RenderFailed { .. }]
        ));
    }

    #[test]
    fn test_listeners_run_after_render() {
        let (mut session, _) = session();
        let events = record_events(&mut session);

        session.update(SettingUpdate::PixelSize(300));

        let events = events.borrow();
        assert_eq!(
            events[0],
            SessionEvent::SymbolRendered {
                width: 300,
                height: 300,
                modules: 25
            }
        );
        assert!(matches!(events[1], SessionEvent::DamageUpdated(_)));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_level_change_in_damage_view_reports_new_verdict() {
        let (mut session, _) = session();
        session.update(SettingUpdate::PixelSize(100));
        session.toggle_learn_mode();
        session.switch_tab(LearnTab::Damage);
        session.set_brush_size(BrushSize::MAX);
        // 30 huge marks cover 2.12% of the canvas: fine at M, past 0.2 * 7 at L
        for i in 0..30 {
            session.add_damage_mark(i * 3, 50);
        }
        assert_eq!(session.damage_estimate().verdict, Verdict::LikelyScannable);

        let events = record_events(&mut session);
        session.update(SettingUpdate::ErrorCorrection("L".to_string()));

        let events = events.borrow();
        assert!(matches!(events[0], SessionEvent::SymbolRendered { .. }));
        match events.get(1) {
            Some(SessionEvent::DamageUpdated(estimate)) => {
                assert_eq!(estimate.verdict, Verdict::MayScan);
            }
            other => panic!("expected DamageUpdated, got {other:?}"),
        }
        assert_eq!(session.damage().mark_count(), 30);
    }

    #[test]
    fn test_level_change_outside_damage_view_skips_damage_event() {
        let (mut session, _) = session();
        let events = record_events(&mut session);
        session.update(SettingUpdate::ErrorCorrection("Q".to_string()));
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn test_load_with_failed_render_reports_only_the_error() {
        let (mut session, renderer) = session();
        renderer.fail.set(true);
        let outcomes = session
            .load_project(r#"{"target_url":"too long","settings":{"size":300}}"#)
            .unwrap();
        assert_eq!(outcomes.len(), 2);
        assert_eq!(session.settings().pixel_size, 300);
        assert_eq!(
            session.notices().latest().map(|n| n.message.as_str()),
            Some(RENDER_FAILED_NOTICE)
        );
    }

    #[test]
    fn test_mark_coordinates_are_clamped() {
        let (mut session, _) = session();
        assert!(session.add_damage_mark(-10, 9999).unwrap().applied);
        let mark = *session.damage().marks().next().unwrap();
        assert_eq!((mark.x, mark.y), (0, 255));
    }

    #[test]
    fn test_mark_without_canvas() {
        let mut session = QrLabSession::new(StubRenderer::default());
        assert!(session.add_damage_mark(5, 5).is_none());
    }

    #[test]
    fn test_entering_damage_tab_resets_marks() {
        let (mut session, _) = session();
        session.add_damage_mark(30, 30);
        session.switch_tab(LearnTab::Data);
        assert_eq!(session.damage().mark_count(), 1);

        session.switch_tab(LearnTab::Damage);
        assert_eq!(session.damage().mark_count(), 0);
        assert_eq!(session.learn_state().tab, LearnTab::Damage);
    }

    #[test]
    fn test_toggle_learn_mode() {
        let (mut session, _) = session();
        assert!(session.toggle_learn_mode());
        assert!(!session.toggle_learn_mode());
    }

    #[test]
    fn test_random_damage_verdict() {
        let (mut session, _) = session();
        let mut rng = StdRng::seed_from_u64(7);
        let report = session.add_random_damage(20.0, &mut rng);
        assert!(report.added > 0);
        let estimate = session.damage_estimate();
        assert!(estimate.percentage > 10.0);
        assert_eq!(estimate.verdict, Verdict::ProbablyUnscannable);

        session.reset_damage();
        assert_eq!(session.damage_estimate().verdict, Verdict::LikelyScannable);
    }

    #[test]
    fn test_project_round_trip_clears_unsaved() {
        let (mut session, _) = session();
        session.update(SettingUpdate::Payload("round trip".to_string()));
        session.update(SettingUpdate::BackgroundColor("#fafafa".to_string()));
        assert!(session.has_unsaved_changes());

        let json = session.serialize_project().unwrap();
        assert!(!session.has_unsaved_changes());

        let (mut other, _) = self::session();
        let events = record_events(&mut other);
        other.load_project(&json).unwrap();
        assert_eq!(other.settings(), session.settings());
        assert_eq!(events.borrow().last(), Some(&SessionEvent::ProjectLoaded));
    }

    #[test]
    fn test_malformed_project_leaves_session_untouched() {
        let (mut session, renderer) = session();
        session.update(SettingUpdate::Payload("keep".to_string()));
        let calls = renderer.calls.get();

        assert!(session.load_project("{not json").is_err());
        assert_eq!(session.settings().payload, "keep");
        assert!(session.has_unsaved_changes());
        assert_eq!(renderer.calls.get(), calls);
    }

    #[test]
    fn test_export_without_symbol() {
        let mut session = QrLabSession::new(StubRenderer::default());
        assert!(matches!(session.export(), Err(ExportError::NoSymbol)));
        assert_eq!(
            session.notices().latest().map(|n| n.message.as_str()),
            Some("No QR code to export")
        );
    }

    #[test]
    fn test_export_names_file() {
        let (mut session, _) = session();
        let artifact = session.export().unwrap();
        assert!(artifact.filename.starts_with("qrcode-"));
        assert!(artifact.filename.ends_with(".png"));
        assert_eq!(session.notices().latest().map(|n| n.kind), Some(NoticeKind::Success));
    }

    #[test]
    fn test_damage_overlay_paints_marks() {
        let (mut session, _) = session();
        session.add_damage_mark(100, 100);
        let image = session.damage_overlay(Some((10, 10))).unwrap();
        assert!(image.get_pixel(100, 100)[0] > 0);
        assert!(image.get_pixel(10, 10)[3] > 0);
    }
}
