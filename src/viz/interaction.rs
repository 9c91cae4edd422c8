//! Pointer and toggle handling as plain functions over explicit state.
//!
//! Every handler takes the current state plus one event and returns the next
//! state; nothing here touches a rendering surface. Pointer coordinates are
//! plot-local pixels (origin at the top-left of the plotting area, margins
//! excluded).

use super::precipitation::PrecipitationChart;
use super::temperature::TemperatureChart;
use crate::models::{Series, Visibility};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Enter,
    Move { x: f64, y: f64 },
    Leave,
}

/// Hover marker state of the temperature chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverState {
    /// Marker group shown (pointer inside the plot).
    pub active: bool,
    /// Record the marker sits on, once the pointer has moved.
    pub index: Option<usize>,
}

impl HoverState {
    pub fn shown_index(&self) -> Option<usize> {
        if self.active { self.index } else { None }
    }
}

/// Offset of the bar tooltip from the pointer.
pub const BAR_TOOLTIP_OFFSET: (f64, f64) = (10.0, -28.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarRef {
    pub index: usize,
    pub series: Series,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarTooltip {
    pub bar: BarRef,
    /// Plot-local top-left corner of the tooltip box.
    pub x: f64,
    pub y: f64,
}

pub fn hover_temperature(
    chart: &TemperatureChart,
    state: HoverState,
    event: PointerEvent,
) -> HoverState {
    match event {
        PointerEvent::Enter => HoverState {
            active: true,
            ..state
        },
        PointerEvent::Move { x, .. } => {
            let day = chart.x_scale().invert(x);
            HoverState {
                active: true,
                index: chart.nearest_index(day),
            }
        }
        PointerEvent::Leave => HoverState {
            active: false,
            ..state
        },
    }
}

/// Tooltip for the visible bar under the pointer, if any.
pub fn hover_precipitation(
    chart: &PrecipitationChart,
    visibility: &Visibility,
    event: PointerEvent,
) -> Option<BarTooltip> {
    match event {
        PointerEvent::Move { x, y } => chart.bar_at(x, y, visibility).map(|bar| BarTooltip {
            bar,
            x: x + BAR_TOOLTIP_OFFSET.0,
            y: y + BAR_TOOLTIP_OFFSET.1,
        }),
        PointerEvent::Enter | PointerEvent::Leave => None,
    }
}

/// Set one series switch. Setting a switch to its current value is a no-op.
pub fn toggle(mut visibility: Visibility, series: Series, visible: bool) -> Visibility {
    visibility.set(series, visible);
    visibility
}

/// Interaction state of both charts together.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DashboardState {
    pub visibility: Visibility,
    pub temperature_hover: HoverState,
    pub precipitation_tooltip: Option<BarTooltip>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Temperature(PointerEvent),
    Precipitation(PointerEvent),
    Toggle(Series, bool),
}
