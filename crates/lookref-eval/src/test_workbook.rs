//! crates/lookref-eval/src/test_workbook.rs
//! ----------------------------------------
//! Lightweight in-memory workbook for unit/prop tests.
use lookref_common::{
    AddressStyle, CellAddress, ExcelError, ExcelErrorKind, LiteralValue, Reference,
    parse_a1_cell, parse_reference,
};
use rustc_hash::FxHashMap;

use crate::config::EvalConfig;
use crate::traits::{FunctionContext, Grid};

type V = LiteralValue;
type CellKey = (u32, u32); // 1-based (row, col)

#[derive(Default, Clone)]
struct Sheet {
    cells: FxHashMap<CellKey, V>,
}

impl Sheet {
    /// Last populated `(row, col)`; `(0, 0)` for an empty sheet.
    fn used_extent(&self) -> (u32, u32) {
        self.cells
            .keys()
            .fold((0, 0), |(mr, mc), &(r, c)| (mr.max(r), mc.max(c)))
    }
}

#[derive(Clone)]
pub struct TestWorkbook {
    sheets: FxHashMap<String, Sheet>,
    current_sheet: String,
    current_cell: Option<CellAddress>,
    config: EvalConfig,
}

impl Default for TestWorkbook {
    fn default() -> Self {
        Self {
            sheets: FxHashMap::default(),
            current_sheet: "Sheet1".to_string(),
            current_cell: None,
            config: EvalConfig::default(),
        }
    }
}

impl TestWorkbook {
    /* ─────────────── constructors ─────────────── */
    pub fn new() -> Self {
        Self::default()
    }

    /* ─────────────── cell helpers ─────────────── */
    pub fn with_cell<S: Into<String>>(mut self, sheet: S, row: u32, col: u32, v: V) -> Self {
        let sh = self.sheets.entry(sheet.into()).or_default();
        sh.cells.insert((row, col), v);
        self
    }

    pub fn with_cell_a1<S: Into<String>, A: AsRef<str>>(self, sheet: S, a1: A, v: V) -> Self {
        let coord = parse_a1_cell(a1.as_ref()).expect("bad A1 ref in with_cell_a1");
        self.with_cell(sheet, coord.row(), coord.col(), v)
    }

    pub fn with_range<S: Into<String>>(
        mut self,
        sheet: S,
        row: u32,
        col: u32,
        data: Vec<Vec<V>>,
    ) -> Self {
        let sh = self.sheets.entry(sheet.into()).or_default();
        for (r_off, r) in data.into_iter().enumerate() {
            for (c_off, v) in r.into_iter().enumerate() {
                sh.cells.insert((row + r_off as u32, col + c_off as u32), v);
            }
        }
        self
    }

    /* ─────────────── caller position ──────────── */
    pub fn with_current_sheet<S: Into<String>>(mut self, sheet: S) -> Self {
        self.current_sheet = sheet.into();
        self
    }

    /// Place the calling formula at `a1` on the current sheet.
    pub fn with_current_cell<A: AsRef<str>>(mut self, a1: A) -> Self {
        let coord = parse_a1_cell(a1.as_ref()).expect("bad A1 ref in with_current_cell");
        self.current_cell = Some(CellAddress::new(Some(self.current_sheet.clone()), coord));
        self
    }

    pub fn with_config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    /* ─────────────── reference shortcut ───────── */
    /// Parse A1 text into a reference on the current sheet (unless qualified).
    pub fn reference(&self, a1: &str) -> Reference {
        parse_reference(a1, AddressStyle::A1, None)
            .expect("bad A1 ref in reference")
            .with_default_sheet(&self.current_sheet)
    }

    /// `Ok(None)` for the current sheet before anything was written to it.
    fn sheet(&self, name: Option<&str>) -> Result<Option<&Sheet>, ExcelError> {
        let name = name.unwrap_or(&self.current_sheet);
        match self.sheets.get(name) {
            Some(sh) => Ok(Some(sh)),
            None if name == self.current_sheet => Ok(None),
            None => Err(ExcelError::new(ExcelErrorKind::Ref)
                .with_message(format!("no sheet named {name:?}"))),
        }
    }
}

/* ─────────────────────── trait impls ─────────────────────── */
impl FunctionContext for TestWorkbook {
    fn current_sheet(&self) -> &str {
        &self.current_sheet
    }

    fn current_cell(&self) -> Option<CellAddress> {
        self.current_cell.clone()
    }

    fn config(&self) -> &EvalConfig {
        &self.config
    }

    fn resolve_cell(&self, cell: &CellAddress) -> Result<V, ExcelError> {
        Ok(self
            .sheet(cell.sheet.as_deref())?
            .and_then(|sh| sh.cells.get(&(cell.row(), cell.col())).cloned())
            .unwrap_or(V::Empty))
    }

    fn resolve_range(&self, reference: &Reference) -> Result<Grid, ExcelError> {
        let sh = self.sheet(reference.sheet())?;
        let (used_row, used_col) = sh.map_or((0, 0), Sheet::used_extent);
        let (sr, sc) = (reference.top_left().row(), reference.top_left().col());
        let (mut er, mut ec) = (sr + reference.height() - 1, sc + reference.width() - 1);
        // Entire rows/columns stop at the used extent.
        if let Reference::Range(r) = reference {
            if r.is_entire_columns() {
                er = er.min(used_row);
            }
            if r.is_entire_rows() {
                ec = ec.min(used_col);
            }
        }
        let mut data = Vec::with_capacity(er.saturating_sub(sr) as usize + 1);
        for r in sr..=er {
            let mut row_vec = Vec::with_capacity(ec.saturating_sub(sc) as usize + 1);
            for c in sc..=ec {
                row_vec.push(
                    sh.and_then(|sh| sh.cells.get(&(r, c)).cloned())
                        .unwrap_or(V::Empty),
                );
            }
            data.push(row_vec);
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::CalcValue;

    #[test]
    fn unpopulated_cells_read_blank() {
        let wb = TestWorkbook::new().with_cell_a1("Sheet1", "B2", V::Int(1));
        assert_eq!(wb.resolve_value(&wb.reference("B2")), CalcValue::Scalar(V::Int(1)));
        assert_eq!(wb.resolve_value(&wb.reference("Z9")), CalcValue::Scalar(V::Empty));
        assert_eq!(
            wb.resolve_range(&wb.reference("A1:B2")),
            Ok(vec![vec![V::Empty, V::Empty], vec![V::Empty, V::Int(1)]])
        );
    }

    #[test]
    fn entire_columns_stop_at_used_rows() {
        let wb = TestWorkbook::new()
            .with_cell_a1("Sheet1", "A3", V::Int(3))
            .with_cell_a1("Sheet1", "C1", V::Int(9));
        let grid = wb.resolve_range(&wb.reference("A:A")).unwrap();
        assert_eq!(grid, vec![vec![V::Empty], vec![V::Empty], vec![V::Int(3)]]);
        let grid = wb.resolve_range(&wb.reference("1:1")).unwrap();
        assert_eq!(grid, vec![vec![V::Empty, V::Empty, V::Int(9)]]);
    }

    #[test]
    fn unknown_sheets_are_ref_errors() {
        let wb = TestWorkbook::new();
        let err = wb.resolve_range(&wb.reference("Nope!A1:A2")).unwrap_err();
        assert_eq!(err.kind, ExcelErrorKind::Ref);
        assert_eq!(wb.resolve_range(&wb.reference("A1")), Ok(vec![vec![V::Empty]]));
    }
}
