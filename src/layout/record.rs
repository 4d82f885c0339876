//! Widget configuration records.
//!
//! A [`Configuration`] is the ordered list of [`WidgetRecord`]s, one per
//! widget kind. The serialized form is the JSON array stored in the
//! `widgetConfig` slot, with camelCase keys:
//!
//! ```json
//! [{"name":"Clock","selected":true,
//!   "positionData":{"gridArea":"a","customPosition":true,"x":120,"y":40}}]
//! ```
//!
//! Offsets are whole terminal cells. Fractional offsets in stored data are
//! rounded to the nearest cell on load.

use serde::{Deserialize, Deserializer, Serialize};

/// A resolved free-form offset, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset {
    /// Horizontal offset from the left edge of the widget area.
    pub x: i32,
    /// Vertical offset from the top edge of the widget area.
    pub y: i32,
}

/// Placement data for one widget.
///
/// `x` and `y` only mean something once `custom_position` is set; until
/// then the widget sits in its `grid_area` slot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionData {
    /// Token of the default grid slot (e.g. `"a"`).
    pub grid_area: String,
    /// Set once the user has dragged the widget.
    #[serde(default)]
    pub custom_position: bool,
    /// Horizontal offset, authoritative only with `custom_position`.
    #[serde(default, deserialize_with = "nearest_cell")]
    pub x: i32,
    /// Vertical offset, authoritative only with `custom_position`.
    #[serde(default, deserialize_with = "nearest_cell")]
    pub y: i32,
}

/// Reads any JSON number as a cell offset, rounding to the nearest cell.
/// Values beyond the `i32` range saturate.
fn nearest_cell<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    Ok(value.round() as i32)
}

impl PositionData {
    /// Grid-placed position data for the given slot.
    pub fn in_grid(grid_area: &str) -> Self {
        Self {
            grid_area: grid_area.to_string(),
            custom_position: false,
            x: 0,
            y: 0,
        }
    }
}

/// Selection and placement for one widget kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetRecord {
    /// Widget-kind key, unique within a configuration.
    pub name: String,
    /// Whether the widget is currently displayed.
    pub selected: bool,
    /// Grid slot and optional custom offset.
    pub position_data: PositionData,
}

impl WidgetRecord {
    /// Creates an unselected, grid-placed record.
    pub fn new(name: &str, grid_area: &str) -> Self {
        Self {
            name: name.to_string(),
            selected: false,
            position_data: PositionData::in_grid(grid_area),
        }
    }
}

/// Ordered sequence of widget records.
///
/// Order is insertion order from the default or stored data and never
/// changes during a session. Serializes transparently as a JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Configuration {
    records: Vec<WidgetRecord>,
}

impl Configuration {
    /// Wraps an ordered list of records.
    pub fn new(records: Vec<WidgetRecord>) -> Self {
        Self { records }
    }

    /// All records, in configuration order.
    pub fn records(&self) -> &[WidgetRecord] {
        &self.records
    }

    /// Finds the record for `name`.
    pub fn get(&self, name: &str) -> Option<&WidgetRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Returns `true` if a record named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over the records that are selected for display.
    pub fn selected(&self) -> impl Iterator<Item = &WidgetRecord> {
        self.records.iter().filter(|r| r.selected)
    }

    /// Builds the next configuration by passing every record through `f`.
    ///
    /// The receiver is left untouched; records are cloned into the result.
    pub(crate) fn map_records<F>(&self, f: F) -> Self
    where
        F: Fn(&WidgetRecord) -> WidgetRecord,
    {
        Self {
            records: self.records.iter().map(f).collect(),
        }
    }
}
