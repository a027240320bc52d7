mod alert;
mod lifecycle;
mod state;
mod status_bar;
mod toast;
mod top_bar;

use self::alert::AlertState;
use self::state::AppState;
use self::toast::ToastManager;
use crate::models::drag::DragSession;
use crate::models::schedule::{Assignment, Position, ScheduleId};
use crate::models::settings::AppConfig;
use crate::services::assignment::{
    AssignOutcome, AssignmentController, AssignmentError, GestureState, Severity, SurfaceKind,
};
use crate::services::board::{Reconcile, ScheduleBoard, TimeSlotSource};
use crate::services::schedule_api::ScheduleApi;
use crate::ui_egui::drag::{paint_drag_ghost, pointer_released};
use crate::ui_egui::views::palette::GridPalette;
use crate::ui_egui::views::schedule_grid::render_schedule_grid;
use crate::ui_egui::views::status_panel::{render_status_panel, PanelInteraction};
use crate::ui_egui::views::{build_grid, GridInteraction};

pub struct ConsoleApp {
    config: AppConfig,
    /// None when the client could not be built; the UI stays up read-only.
    api: Option<Box<dyn ScheduleApi>>,
    board: Option<ScheduleBoard>,
    session: DragSession,
    gesture: GestureState,
    state: AppState,
    toast_manager: ToastManager,
    alert: AlertState,
}

impl eframe::App for ConsoleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_update(ctx);
    }
}

impl ConsoleApp {
    /// Build around an existing client; no network traffic until a load.
    pub fn with_api(config: AppConfig, api: Option<Box<dyn ScheduleApi>>) -> Self {
        let state = AppState::new(config.schedule.default_schedule_id.as_deref());
        Self {
            config,
            api,
            board: None,
            session: DragSession::new(),
            gesture: GestureState::default(),
            state,
            toast_manager: ToastManager::new(),
            alert: AlertState::new(),
        }
    }

    pub fn board(&self) -> Option<&ScheduleBoard> {
        self.board.as_ref()
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn surface(&self) -> SurfaceKind {
        self.state.surface
    }

    pub fn set_surface(&mut self, surface: SurfaceKind) {
        if self.state.surface != surface {
            self.session.clear();
            self.gesture.reset();
            self.state.surface = surface;
        }
    }

    fn handle_update(&mut self, ctx: &egui::Context) {
        let palette = GridPalette::from_visuals(&ctx.style().visuals);

        self.render_top_bar(ctx);
        self.render_status_bar(ctx);

        let surface = self.state.surface;
        let panel = if self.state.show_side_panel {
            egui::SidePanel::left("status_panel")
                .resizable(true)
                .default_width(220.0)
                .show(ctx, |ui| match &self.board {
                    Some(board) => render_status_panel(ui, board, surface, &self.session, &palette),
                    None => {
                        ui.label("No schedule loaded");
                        PanelInteraction::default()
                    }
                })
                .inner
        } else {
            PanelInteraction::default()
        };

        let grid = egui::CentralPanel::default()
            .show(ctx, |ui| match &self.board {
                Some(board) => {
                    let state = build_grid(board, surface);
                    render_schedule_grid(ui, &state, &self.session, &palette)
                }
                None => {
                    ui.centered_and_justified(|ui| {
                        ui.label("Enter a schedule id and press Load");
                    });
                    GridInteraction::default()
                }
            })
            .inner;

        self.process_interactions(ctx, panel, grid);

        paint_drag_ghost(ctx, &self.session, &palette);
        self.handle_alert(ctx);
        self.toast_manager.render(ctx, palette.is_dark);
    }

    fn process_interactions(
        &mut self,
        ctx: &egui::Context,
        panel: PanelInteraction,
        grid: GridInteraction,
    ) {
        // The alert is modal; nothing underneath reacts until it is dismissed.
        if self.alert.is_open() {
            if self.session.is_active() {
                self.on_drag_end();
            }
            return;
        }

        if let Some(entity) = panel.drag_started {
            self.on_drag_start(entity, None);
        }
        if let Some((entity, source)) = grid.drag_started {
            self.on_drag_start(entity, Some(source));
        }
        if let Some(position) = grid.hovered {
            self.on_drag_over(position);
        }

        if let Some(position) = grid.dropped_on {
            self.on_drop(position);
        } else if self.session.is_active() && pointer_released(ctx) {
            self.on_drag_end();
        }

        if let Some(position) = grid.remove_requested {
            self.on_remove(position);
        }
    }

    pub fn on_drag_start(&mut self, entity: Assignment, source: Option<Position>) {
        self.session.begin(entity, source);
        self.gesture.begin_drag();
    }

    pub fn on_drag_over(&mut self, position: Position) {
        self.session.hover(position);
    }

    /// Drag released outside any cell.
    pub fn on_drag_end(&mut self) {
        if self.session.take().is_some() {
            log::debug!("Drag ended without a drop");
        }
        self.gesture.cancel();
    }

    pub fn on_drop(&mut self, position: Position) {
        let Some(raw_payload) = self.session.active().map(|active| active.payload.to_json()) else {
            return;
        };
        let (Some(api), Some(board)) = (self.api.as_deref(), self.board.as_mut()) else {
            self.session.clear();
            self.gesture.reset();
            return;
        };

        self.gesture.start_request();
        let controller = AssignmentController::new(api, self.state.surface);
        let result = controller.assign(board, &mut self.session, &raw_payload, position);
        self.gesture.finish(&result);

        match result {
            Ok(AssignOutcome::Assigned) => self.toast_manager.success("Assigned"),
            Ok(AssignOutcome::Moved { .. }) => self.toast_manager.success("Moved"),
            Ok(AssignOutcome::Unchanged) => self.gesture.reset(),
            Err(err) => self.report(&err, "Assignment failed"),
        }
    }

    pub fn on_remove(&mut self, position: Position) {
        let (Some(api), Some(board)) = (self.api.as_deref(), self.board.as_mut()) else {
            return;
        };

        let controller = AssignmentController::new(api, self.state.surface);
        let result = controller.remove(board, position);
        self.gesture.finish(&result);

        match result {
            Ok(()) => self.toast_manager.success("Removed"),
            Err(err) => self.report(&err, "Removal failed"),
        }
    }

    pub fn load_schedule(&mut self) {
        let Some(id) = self.state.input.requested_id().map(ScheduleId::new) else {
            self.toast_manager.warning("Enter a schedule id first");
            return;
        };
        let Some(api) = self.api.as_deref() else {
            self.toast_manager.error("Schedule service is not configured");
            return;
        };

        let source = TimeSlotSource::from_settings(&self.config.schedule);
        match ScheduleBoard::load(api, id.clone(), source) {
            Ok(board) => {
                if let crate::services::slot_mapper::Readiness::NotReady(issues) = board.readiness() {
                    log::warn!("Schedule {} is not ready: {} issue(s)", id, issues.len());
                }
                self.session.clear();
                self.gesture.reset();
                self.state.input.load_error = None;
                self.board = Some(board);
                self.toast_manager.info(format!("Loaded schedule {}", id));
            }
            Err(err) => {
                log::error!("Failed to load schedule {}: {}", id, err);
                self.state.input.load_error = Some(err.to_string());
                self.toast_manager.error(format!("Failed to load schedule {}", id));
            }
        }
    }

    pub fn refresh_schedule(&mut self) {
        let (Some(api), Some(board)) = (self.api.as_deref(), self.board.as_mut()) else {
            return;
        };
        match board.reconcile(api) {
            Ok(()) => self.toast_manager.info("Schedule refreshed"),
            Err(err) => {
                log::warn!("Refresh of {} failed: {}", board.schedule_id(), err);
                self.toast_manager.error("Failed to refresh the schedule");
            }
        }
    }

    fn report(&mut self, err: &AssignmentError, title: &str) {
        match err.severity() {
            Severity::Silent => {}
            Severity::Notice => self.toast_manager.warning(err.user_message()),
            Severity::Alert => self.alert.raise(title, err.user_message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schedule::{
        EntityId, Field, MatrixRow, MatrixSlot, Part, PartId, PartMatrix, ScheduleSnapshot,
        SlotId, SpecialGroupAssignment,
    };
    use crate::services::schedule_api::{ApiError, MockScheduleApi};
    use chrono::NaiveTime;

    fn group() -> Assignment {
        Assignment::SpecialGroup(SpecialGroupAssignment {
            id: EntityId::from("g1"),
            name: "A조".to_string(),
            member_count: 3,
            color: None,
            is_active: true,
        })
    }

    fn snapshot() -> ScheduleSnapshot {
        ScheduleSnapshot {
            schedule_id: ScheduleId::from("7"),
            date: None,
            golf_course_name: None,
            fields: vec![Field {
                index: 0,
                display_name: "East".to_string(),
            }],
            parts: vec![PartMatrix {
                part: Part {
                    id: PartId::from("p1"),
                    part_number: 1,
                    name: "1부".to_string(),
                    start_time: NaiveTime::from_hms_opt(6, 0, 0),
                    end_time: NaiveTime::from_hms_opt(6, 10, 0),
                },
                rows: vec![MatrixRow {
                    time: "06:00".to_string(),
                    slots: vec![MatrixSlot {
                        field_number: 1,
                        slot_id: SlotId::from("s1"),
                        assignment: None,
                    }],
                }],
            }],
            available_caddies: Vec::new(),
            available_special_groups: Vec::new(),
        }
    }

    fn app_with(api: MockScheduleApi) -> ConsoleApp {
        let mut config = AppConfig::default();
        config.schedule.default_schedule_id = Some("7".to_string());
        ConsoleApp::with_api(config, Some(Box::new(api)))
    }

    #[test]
    fn test_drop_without_active_drag_is_ignored() {
        let mut api = MockScheduleApi::new();
        api.expect_fetch_schedule().returning(|_| Ok(snapshot()));
        api.expect_assign_to_slot().times(0);

        let mut app = app_with(api);
        app.load_schedule();
        app.on_drop(Position::new(0, 0, 1));
        assert_eq!(app.gesture(), &GestureState::Idle);
    }

    #[test]
    fn test_rejected_drop_raises_alert_and_clears_session() {
        let mut api = MockScheduleApi::new();
        api.expect_fetch_schedule().returning(|_| Ok(snapshot()));
        api.expect_assign_to_slot().times(1).returning(|_| {
            Err(ApiError::Rejected {
                status: 409,
                code: None,
                message: "conflict".to_string(),
            })
        });

        let mut app = app_with(api);
        app.load_schedule();
        app.on_drag_start(group(), None);
        app.on_drag_over(Position::new(0, 0, 1));
        app.on_drop(Position::new(0, 0, 1));

        assert!(!app.session().is_active());
        assert!(app.alert.is_open());
        assert!(matches!(app.gesture(), GestureState::Failed(_)));
    }

    #[test]
    fn test_drag_end_clears_without_network() {
        let mut api = MockScheduleApi::new();
        api.expect_fetch_schedule().returning(|_| Ok(snapshot()));
        api.expect_assign_to_slot().times(0);

        let mut app = app_with(api);
        app.load_schedule();
        app.on_drag_start(group(), None);
        app.on_drag_end();

        assert!(!app.session().is_active());
        assert_eq!(app.gesture(), &GestureState::Idle);
    }

    #[test]
    fn test_switching_surface_drops_active_drag() {
        let mut app = ConsoleApp::with_api(AppConfig::default(), None);
        app.on_drag_start(group(), None);
        app.set_surface(SurfaceKind::WorkSchedule);
        assert!(!app.session().is_active());
    }

    #[test]
    fn test_load_failure_is_recorded() {
        let mut api = MockScheduleApi::new();
        api.expect_fetch_schedule()
            .returning(|_| Err(ApiError::Network("refused".to_string())));

        let mut app = app_with(api);
        app.load_schedule();
        assert!(app.board().is_none());
        assert!(app.state.input.load_error.is_some());
    }
}
