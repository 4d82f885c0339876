//! Grid versus custom placement.

use super::record::{Offset, WidgetRecord};

/// Returns the custom offset of a dragged widget.
///
/// `None` means the caller should place the widget in its `gridArea` slot.
pub fn resolve(record: &WidgetRecord) -> Option<Offset> {
    let data = &record.position_data;
    data.custom_position.then_some(Offset {
        x: data.x,
        y: data.y,
    })
}
