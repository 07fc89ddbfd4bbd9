//! Widget trait

use vitrine_animation::Millis;
use vitrine_platform::{Canvas, HostEvent};

use crate::context::WidgetContext;

/// A mounted page behavior
///
/// Widgets are driven by the runtime: host events are delivered through
/// [`Widget::handle_event`] and time moves forward through
/// [`Widget::advance`]. Before an event at time `t` is delivered the widget
/// has already been advanced to `t`, so timers scheduled while handling the
/// event are relative to the event time.
pub trait Widget {
    /// Stable name used in logs and diagnostics
    fn name(&self) -> &'static str;

    /// React to a host event
    fn handle_event(&mut self, cx: &mut WidgetContext<'_>, event: &HostEvent);

    /// Fire every timer due at or before `now`
    fn advance(&mut self, _cx: &mut WidgetContext<'_>, _now: Millis) {}

    /// Earliest pending timer deadline
    fn next_deadline(&self) -> Option<Millis> {
        None
    }

    /// Paint onto the background canvas
    fn draw(&self, _canvas: &mut dyn Canvas) {}
}
