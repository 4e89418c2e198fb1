use crate::store::schema::Stats;

pub const VARIANT_COUNT: u8 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VariantStatus {
    NotSelected,
    Selected(u8),
    Running,
    Paused,
    Finished,
}

/// Mock-exam controller. It only tracks a status for the label and counts
/// finished variants; there is no countdown and no question sequencing.
#[derive(Clone, Debug)]
pub struct VariantController {
    status: VariantStatus,
    selected: Option<u8>,
}

impl Default for VariantController {
    fn default() -> Self {
        Self {
            status: VariantStatus::NotSelected,
            selected: None,
        }
    }
}

impl VariantController {
    pub fn status(&self) -> VariantStatus {
        self.status
    }

    pub fn selected(&self) -> Option<u8> {
        self.selected
    }

    /// Returns false for numbers outside `1..=VARIANT_COUNT`.
    pub fn select(&mut self, number: u8) -> bool {
        if !(1..=VARIANT_COUNT).contains(&number) {
            return false;
        }
        self.selected = Some(number);
        self.status = VariantStatus::Selected(number);
        true
    }

    pub fn start(&mut self) {
        self.status = VariantStatus::Running;
    }

    pub fn pause(&mut self) {
        self.status = VariantStatus::Paused;
    }

    /// Every call counts as one completed variant, early or not.
    pub fn finish(&mut self, stats: &mut Stats) {
        self.status = VariantStatus::Finished;
        stats.record_variant_finished();
    }

    /// Clock text for the timer label: the full allowance until finished.
    pub fn clock_text(&self, variant_minutes: u32) -> String {
        if self.status == VariantStatus::Finished {
            return format_clock(0);
        }
        format_clock(variant_minutes)
    }
}

pub fn format_clock(minutes: u32) -> String {
    format!("{:02}:{:02}:00", minutes / 60, minutes % 60)
}
