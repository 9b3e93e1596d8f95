//! Tabular plan output
//!
//! One row per resource. List-valued cells are JSON arrays so the file can be
//! loaded back without a custom list syntax.

use crate::PlanSink;
use resource_planner_common::{ResourcePlan, ResourceRecord, Result};
use serde::Serialize;
use std::io::Write;

/// Column order of the tabular plan
pub const PLAN_COLUMNS: [&str; 9] = [
    "resource_name",
    "type",
    "class_methods",
    "object_methods",
    "chain_resource_name",
    "additional_methods",
    "raw_actions",
    "resource_status_chain",
    "resource_states",
];

/// Writes the plan as CSV with a header row
pub struct CsvSink<W: Write> {
    writer: W,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_row<S: AsRef<str>>(&mut self, cells: &[S]) -> Result<()> {
        let line = cells
            .iter()
            .map(|cell| quote(cell.as_ref()))
            .collect::<Vec<_>>()
            .join(",");
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }
}

impl<W: Write> PlanSink for CsvSink<W> {
    fn accept(&mut self, plan: &ResourcePlan) -> Result<()> {
        self.write_row(&PLAN_COLUMNS)?;
        for record in &plan.resources {
            let cells = record_cells(record)?;
            self.write_row(&cells)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

fn record_cells(record: &ResourceRecord) -> Result<Vec<String>> {
    Ok(vec![
        record.resource_name.clone(),
        record.resource_type.clone(),
        json_cell(&record.class_methods)?,
        json_cell(&record.object_methods)?,
        json_cell(&record.chain_resource_name)?,
        json_cell(&record.additional_methods)?,
        json_cell(&record.raw_actions)?,
        json_cell(&record.resource_status_chain)?,
        json_cell(&record.resource_states)?,
    ])
}

fn json_cell<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// RFC 4180 field quoting
fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
