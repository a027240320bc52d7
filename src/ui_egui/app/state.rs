use crate::services::assignment::SurfaceKind;

/// Input state for the top bar.
#[derive(Debug, Default)]
pub struct ScheduleInputState {
    pub schedule_id: String,
    /// Last load failure, shown until the next successful load.
    pub load_error: Option<String>,
}

impl ScheduleInputState {
    pub fn new(default_schedule_id: Option<&str>) -> Self {
        Self {
            schedule_id: default_schedule_id.unwrap_or_default().to_string(),
            load_error: None,
        }
    }

    /// Trimmed id, or None when the field is blank.
    pub fn requested_id(&self) -> Option<&str> {
        let id = self.schedule_id.trim();
        (!id.is_empty()).then_some(id)
    }
}

pub struct AppState {
    pub input: ScheduleInputState,
    pub surface: SurfaceKind,
    pub show_side_panel: bool,
}

impl AppState {
    pub fn new(default_schedule_id: Option<&str>) -> Self {
        Self {
            input: ScheduleInputState::new(default_schedule_id),
            surface: SurfaceKind::SpecialTeam,
            show_side_panel: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_id_trims_and_rejects_blank() {
        let mut input = ScheduleInputState::new(Some(" 42 "));
        assert_eq!(input.requested_id(), Some("42"));

        input.schedule_id = "   ".to_string();
        assert_eq!(input.requested_id(), None);
    }
}
