//! Bounded data preview for the rendering layer.

use smallvec::SmallVec;

use super::types::{ColumnChoice, ColumnProfile, Preview, RawTable, PREVIEW_ROWS};

/// At most [`PREVIEW_ROWS`] rows (the header or first data row plus five
/// more), the row accounting from the parse, and the selectable columns
/// with their current display names. Cheap enough to rebuild on every
/// header toggle; nothing here re-reads the file.
pub fn build_preview(table: &RawTable, profiles: &[ColumnProfile]) -> Preview {
    let mut sample: SmallVec<[Vec<String>; PREVIEW_ROWS]> = SmallVec::new();
    for row in table.rows.iter().take(PREVIEW_ROWS) {
        sample.push(row.clone());
    }

    Preview {
        total_rows: table.total_rows(),
        discarded_rows: table.discarded_rows,
        sample,
        viable_columns: profiles
            .iter()
            .filter(|profile| profile.is_viable)
            .map(|profile| ColumnChoice {
                index: profile.index,
                display_name: profile.display_name.clone(),
            })
            .collect(),
    }
}
