//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for engine integration tests.

#![allow(dead_code)]

use datasheet_engine::{
    Axis, CellFormat, CellValue, Color, Command, OrderedInterval, Region, Result, Sheet, UndoStack,
};

/// A sheet plus the history that edits it.
pub struct TestHarness {
    pub sheet: Sheet,
    pub history: UndoStack,
}

impl TestHarness {
    /// Create a new harness with an empty sheet of the given size.
    pub fn new(num_rows: u32, num_cols: u32) -> Self {
        TestHarness {
            sheet: Sheet::new(num_rows, num_cols),
            history: UndoStack::new(),
        }
    }

    /// A 12x6 sheet with a header row, five data rows, row and column
    /// formats, one per-cell override and two merges.
    pub fn with_sample_data() -> Self {
        let mut harness = Self::new(12, 6);
        harness.populate_sample_data();
        harness
    }

    fn populate_sample_data(&mut self) {
        let sheet = &mut self.sheet;

        // Header row (row 0)
        for (col, title) in ["Name", "Age", "City", "Salary", "Active"].iter().enumerate() {
            sheet
                .set_cell_value_impl(0, col as u32, Some(CellValue::from(*title)))
                .unwrap();
        }

        let rows = [
            ("Alice", 30.0, "New York", 75000.0, true),
            ("Bob", 25.0, "Los Angeles", 65000.0, true),
            ("Charlie", 35.0, "Chicago", 85000.0, false),
            ("Diana", 28.0, "Houston", 70000.0, true),
            ("Eve", 32.0, "Phoenix", 80000.0, true),
        ];
        for (i, (name, age, city, salary, active)) in rows.iter().enumerate() {
            let row = i as u32 + 1;
            sheet.set_cell_value_impl(row, 0, Some(CellValue::from(*name))).unwrap();
            sheet.set_cell_value_impl(row, 1, Some(CellValue::from(*age))).unwrap();
            sheet.set_cell_value_impl(row, 2, Some(CellValue::from(*city))).unwrap();
            sheet.set_cell_value_impl(row, 3, Some(CellValue::from(*salary))).unwrap();
            sheet.set_cell_value_impl(row, 4, Some(CellValue::from(*active))).unwrap();
        }

        sheet
            .axis_formats_mut(Axis::Row)
            .add(OrderedInterval::new(0, 0, header_format()));
        sheet
            .axis_formats_mut(Axis::Row)
            .add(OrderedInterval::new(2, 5, band_format()));
        sheet
            .axis_formats_mut(Axis::Column)
            .add(OrderedInterval::new(3, 3, money_format()));
        sheet.set_cell_format(3, 2, Some(CellFormat::new().with_italic(true))).unwrap();

        sheet.add_merge_impl(Region::new(7, 0, 9, 2)).unwrap();
        sheet.add_merge_impl(Region::new(1, 5, 3, 5)).unwrap();
        sheet.take_events();
    }

    /// Execute a command through the history.
    pub fn run(&mut self, command: Command) -> Result<()> {
        self.history.execute(&mut self.sheet, command)
    }

    pub fn undo(&mut self) -> Result<String> {
        self.history.undo(&mut self.sheet)
    }

    pub fn redo(&mut self) -> Result<String> {
        self.history.redo(&mut self.sheet)
    }

    pub fn value(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.sheet.get_value(row, col)
    }

    /// (start, end) of every stored interval on `axis`, in storage order.
    pub fn interval_bounds(&self, axis: Axis) -> Vec<(u32, u32)> {
        self.sheet.axis_formats(axis).iter().map(|i| (i.start, i.end)).collect()
    }

    pub fn merge_regions(&self) -> Vec<Region> {
        self.sheet.merges().iter().map(|m| m.region).collect()
    }
}

pub fn header_format() -> CellFormat {
    CellFormat::new()
        .with_bold(true)
        .with_background(Color::new(220, 220, 220))
}

pub fn band_format() -> CellFormat {
    CellFormat::new().with_background(Color::new(240, 248, 255))
}

pub fn money_format() -> CellFormat {
    CellFormat::new().with_number_format("$#,##0.00")
}
