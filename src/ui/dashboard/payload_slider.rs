use egui::{Align2, FontId, RichText, Sense, Slider, SliderClamping, Ui, Vec2};

use super::config::AppConfig;
use crate::filter::PayloadRange;

const SLIDER_WIDTH: f32 = 520.;
const HANDLE_LABEL_WIDTH: f32 = 40.;

pub(crate) const PAYLOAD_MARKS: [(f64, &str); 5] = [
    (0., "0"),
    (2500., "2.5K"),
    (5000., "5k"),
    (7500., "7.5K"),
    (10000., "10k"),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Handle {
    Low,
    High,
}

/// Two linked sliders selecting an inclusive payload range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PayloadSlider {
    min: f64,
    max: f64,
    step: f64,
}

impl PayloadSlider {
    pub(crate) fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    pub(crate) fn from_config(config: &AppConfig) -> Self {
        Self::new(config.slider_min, config.slider_max, config.slider_step)
    }

    fn snap(&self, value: f64) -> f64 {
        let snapped = self.min + ((value - self.min) / self.step).round() * self.step;
        snapped.clamp(self.min, self.max)
    }

    /// Applies a move of one handle: the moved handle snaps to the step grid inside the
    /// slider bounds and drags the other handle along when they would cross.
    pub(crate) fn constrain(&self, range: PayloadRange, moved: Handle) -> PayloadRange {
        match moved {
            Handle::Low => {
                let low = self.snap(range.low);
                PayloadRange::new(low, range.high.max(low))
            }
            Handle::High => {
                let high = self.snap(range.high);
                PayloadRange::new(range.low.min(high), high)
            }
        }
    }

    /// Renders the sliders. Returns `true` if the range changed.
    ///
    /// Values are only snapped and clamped by [`Self::constrain`] once a handle moves, so
    /// an off-grid range is shown as-is until then.
    pub(crate) fn show(&self, ui: &mut Ui, range: &mut PayloadRange) -> bool {
        let mut low = range.low;
        let mut high = range.high;
        ui.spacing_mut().slider_width = SLIDER_WIDTH;

        let low_changed = ui
            .horizontal(|ui| {
                ui.add_sized([HANDLE_LABEL_WIDTH, 18.], egui::Label::new("Low"));
                ui.add(
                    Slider::new(&mut low, self.min..=self.max)
                        .step_by(self.step)
                        .clamping(SliderClamping::Never)
                        .suffix(" kg"),
                )
                .changed()
            })
            .inner;
        let high_changed = ui
            .horizontal(|ui| {
                ui.add_sized([HANDLE_LABEL_WIDTH, 18.], egui::Label::new("High"));
                ui.add(
                    Slider::new(&mut high, self.min..=self.max)
                        .step_by(self.step)
                        .clamping(SliderClamping::Never)
                        .suffix(" kg"),
                )
                .changed()
            })
            .inner;
        ui.horizontal(|ui| {
            ui.add_space(HANDLE_LABEL_WIDTH + ui.spacing().item_spacing.x);
            self.show_marks(ui);
        });

        let mut changed = false;
        if low_changed {
            *range = self.constrain(PayloadRange::new(low, range.high), Handle::Low);
            changed = true;
        }
        if high_changed {
            *range = self.constrain(PayloadRange::new(range.low, high), Handle::High);
            changed = true;
        }
        ui.label(
            RichText::new(format!(
                "Selected payload: {:.0} kg - {:.0} kg",
                range.low, range.high
            ))
            .small(),
        );
        changed
    }

    fn show_marks(&self, ui: &mut Ui) {
        let (rect, _) = ui.allocate_exact_size(Vec2::new(SLIDER_WIDTH, 14.), Sense::hover());
        let painter = ui.painter();
        let color = ui.visuals().weak_text_color();
        for (value, label) in PAYLOAD_MARKS {
            if value < self.min || value > self.max {
                continue;
            }
            let fraction = ((value - self.min) / (self.max - self.min)) as f32;
            let x = rect.left() + fraction * rect.width();
            painter.text(
                egui::pos2(x, rect.top()),
                Align2::CENTER_TOP,
                label,
                FontId::proportional(11.),
                color,
            );
        }
    }
}
