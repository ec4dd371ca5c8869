use crate::layout::margins::PlotArea;

/// Row-major grid of equally sized panels covering the canvas.
#[derive(Debug, Clone)]
pub struct PanelGrid {
    pub rows: usize,
    pub cols: usize,
    cells: Vec<PlotArea>,
}

impl PanelGrid {
    pub fn new(width: f64, height: f64, rows: usize, cols: usize) -> crate::Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(crate::RenderError::Layout(format!(
                "panel grid needs at least one row and column, got {rows}x{cols}"
            )));
        }
        let cell_w = width / cols as f64;
        let cell_h = height / rows as f64;
        let cells = (0..rows)
            .flat_map(|r| {
                (0..cols).map(move |c| {
                    PlotArea::manual(c as f64 * cell_w, r as f64 * cell_h, cell_w, cell_h)
                })
            })
            .collect();
        Ok(Self { rows, cols, cells })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, index: usize) -> Option<&PlotArea> {
        self.cells.get(index)
    }
}
