use crate::grid::{self, Cell, CellCoord, DimensionField, Dimensions, Mapping};

/// Reactive state behind the visualizer window.
///
/// Owns the raw text of the five inputs and everything derived from them.
/// `set_input` is the single mutation point for dimensions; it always
/// recomputes the full cell table and drops the hovered cell.
pub struct VisualizerSession {
    raw: [String; 5],
    dimensions: Dimensions,
    mapping: Mapping,
    hovered: Option<CellCoord>,
    /// Bumped on every recompute.
    generation: u64,
}

impl Default for VisualizerSession {
    fn default() -> Self {
        Self::from_raw_inputs(DimensionField::ALL.map(|f| f.default_value().to_string()))
    }
}

impl VisualizerSession {
    /// Seed the session from raw text, e.g. command-line values.
    pub fn from_raw_inputs(raw: [String; 5]) -> Self {
        let dimensions = Dimensions::from_raw([
            raw[0].as_str(),
            raw[1].as_str(),
            raw[2].as_str(),
            raw[3].as_str(),
            raw[4].as_str(),
        ]);
        let mapping = grid::compute(&dimensions);
        Self {
            raw,
            dimensions,
            mapping,
            hovered: None,
            generation: 0,
        }
    }

    pub fn raw_input(&self, field: DimensionField) -> &str {
        &self.raw[Self::slot(field)]
    }

    /// Mutable access for text widgets. Callers must follow an edit with
    /// [`Self::commit_input`].
    pub fn raw_input_mut(&mut self, field: DimensionField) -> &mut String {
        &mut self.raw[Self::slot(field)]
    }

    pub fn set_input(&mut self, field: DimensionField, raw: impl Into<String>) {
        self.raw[Self::slot(field)] = raw.into();
        self.commit_input(field);
    }

    /// Re-clamp after `field`'s raw text changed in place.
    pub fn commit_input(&mut self, field: DimensionField) {
        let previous = self.dimensions;
        self.recompute();
        if previous != self.dimensions {
            crate::log_info!(
                "{} -> {} ({} cells)",
                field.label(),
                self.dimensions.get(field),
                self.mapping.cells.len()
            );
        }
    }

    /// Restore every input to its default value.
    pub fn reset(&mut self) {
        self.raw = DimensionField::ALL.map(|f| f.default_value().to_string());
        self.recompute();
    }

    fn recompute(&mut self) {
        let r = &self.raw;
        self.dimensions = Dimensions::from_raw([
            r[0].as_str(),
            r[1].as_str(),
            r[2].as_str(),
            r[3].as_str(),
            r[4].as_str(),
        ]);
        self.mapping = grid::compute(&self.dimensions);
        self.hovered = None;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Changes whenever the cell table was rebuilt. Views use it to drop
    /// per-cell tracking that refers to the previous table.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    /// Pointer entered or keyboard focus landed on `coord`.
    pub fn hover(&mut self, coord: CellCoord) {
        if self.mapping.cell_at(coord).is_some() {
            self.hovered = Some(coord);
        }
    }

    /// Pointer left or focus moved away from `coord`.
    pub fn unhover(&mut self, coord: CellCoord) {
        if self.hovered == Some(coord) {
            self.hovered = None;
        }
    }

    pub fn hovered(&self) -> Option<CellCoord> {
        self.hovered
    }

    pub fn hovered_cell(&self) -> Option<&Cell> {
        self.hovered.and_then(|c| self.mapping.cell_at(c))
    }

    fn slot(field: DimensionField) -> usize {
        match field {
            DimensionField::GridDimX => 0,
            DimensionField::GridDimY => 1,
            DimensionField::BlockDimX => 2,
            DimensionField::BlockDimY => 3,
            DimensionField::ArrayLength => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_default_launch() {
        let s = VisualizerSession::default();
        assert_eq!(*s.dimensions(), Dimensions::default());
        assert_eq!(s.raw_input(DimensionField::ArrayLength), "96");
        assert_eq!(s.mapping().cells.len(), 192);
        assert!(s.hovered().is_none());
    }

    #[test]
    fn zero_length_falls_back_to_default() {
        let mut s = VisualizerSession::default();
        s.set_input(DimensionField::ArrayLength, "0");
        assert_eq!(s.dimensions().array_length, 96);
        assert_eq!(s.raw_input(DimensionField::ArrayLength), "0");
    }

    #[test]
    fn oversized_grid_is_clamped() {
        let mut s = VisualizerSession::default();
        s.set_input(DimensionField::GridDimX, "100");
        assert_eq!(s.dimensions().grid_dim_x, 10);
        assert_eq!(s.mapping().totals.total_columns, 80);
    }

    #[test]
    fn any_input_edit_clears_hover() {
        let mut s = VisualizerSession::default();
        s.hover(CellCoord::new(1, 1));
        assert!(s.hovered_cell().is_some());

        // Same clamped value, still an edit.
        s.set_input(DimensionField::GridDimY, "2");
        assert!(s.hovered().is_none());

        s.hover(CellCoord::new(1, 1));
        s.set_input(DimensionField::BlockDimX, "4");
        assert!(s.hovered().is_none());
    }

    #[test]
    fn every_edit_bumps_generation() {
        let mut s = VisualizerSession::default();
        let g0 = s.generation();
        s.set_input(DimensionField::GridDimX, "3");
        assert_ne!(s.generation(), g0);
        let g1 = s.generation();
        s.hover(CellCoord::new(0, 0));
        assert_eq!(s.generation(), g1);
    }

    #[test]
    fn unhover_only_clears_matching_cell() {
        let mut s = VisualizerSession::default();
        s.hover(CellCoord::new(2, 3));
        s.unhover(CellCoord::new(0, 0));
        assert_eq!(s.hovered(), Some(CellCoord::new(2, 3)));
        s.unhover(CellCoord::new(2, 3));
        assert!(s.hovered().is_none());
    }

    #[test]
    fn hover_outside_matrix_is_ignored() {
        let mut s = VisualizerSession::default();
        s.hover(CellCoord::new(50, 0));
        assert!(s.hovered().is_none());
    }

    #[test]
    fn in_place_edit_then_commit() {
        let mut s = VisualizerSession::default();
        s.raw_input_mut(DimensionField::BlockDimY).push('0');
        s.commit_input(DimensionField::BlockDimY);
        // "40" clamps to 32
        assert_eq!(s.dimensions().block_dim_y, 32);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut s = VisualizerSession::from_raw_inputs([
            "1".into(),
            "1".into(),
            "1".into(),
            "1".into(),
            "1".into(),
        ]);
        assert_eq!(s.mapping().cells.len(), 1);
        s.hover(CellCoord::new(0, 0));
        s.reset();
        assert_eq!(*s.dimensions(), Dimensions::default());
        assert!(s.hovered().is_none());
    }
}
