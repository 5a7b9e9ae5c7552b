//! CSV export of report rows
//!
//! The reporting engine produces grouped labels and totals or flat
//! movement listings; this service renders them into downloadable CSV.
//! Spreadsheet styling is out of scope.

use crate::error::{AppError, AppResult};
use crate::services::ledger::MovementView;
use crate::services::reporting::{
    CategoryStockValue, GroupedTotal, ProductExitAverage, SectorCategoryPivot,
};

/// Renders report rows to CSV
#[derive(Clone, Default)]
pub struct ExportService;

fn csv_error(e: impl std::fmt::Display) -> AppError {
    AppError::Internal(format!("CSV rendering failed: {}", e))
}

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// Consumption-by-sector rows as CSV
    pub fn consumption_csv(&self, rows: &[GroupedTotal]) -> AppResult<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["sector", "total_consumed"]).map_err(csv_error)?;
        for row in rows {
            writer
                .write_record([row.label.as_str(), &row.total.to_string()])
                .map_err(csv_error)?;
        }
        writer.into_inner().map_err(csv_error)
    }

    /// Sector-by-category pivot rows as CSV
    pub fn pivot_csv(&self, rows: &[SectorCategoryPivot]) -> AppResult<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(["sector", "category", "total_consumed"])
            .map_err(csv_error)?;
        for row in rows {
            writer
                .write_record([
                    row.sector.as_str(),
                    row.category.as_str(),
                    &row.total.to_string(),
                ])
                .map_err(csv_error)?;
        }
        writer.into_inner().map_err(csv_error)
    }

    /// Average exit quantity rows as CSV
    pub fn averages_csv(&self, rows: &[ProductExitAverage]) -> AppResult<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(["product", "average_exit_quantity", "exit_count"])
            .map_err(csv_error)?;
        for row in rows {
            writer
                .write_record([
                    row.product_name.as_str(),
                    &row.average_quantity.round_dp(2).to_string(),
                    &row.exit_count.to_string(),
                ])
                .map_err(csv_error)?;
        }
        writer.into_inner().map_err(csv_error)
    }

    /// Valued stock rows as CSV
    pub fn valued_stock_csv(&self, rows: &[CategoryStockValue]) -> AppResult<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(["category", "stock_value"])
            .map_err(csv_error)?;
        for row in rows {
            writer
                .write_record([row.category.as_str(), &row.total_value.to_string()])
                .map_err(csv_error)?;
        }
        writer.into_inner().map_err(csv_error)
    }

    /// Flat movement listing as CSV
    pub fn movements_csv(&self, rows: &[MovementView]) -> AppResult<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record([
                "date",
                "kind",
                "product",
                "quantity",
                "supplier",
                "sector",
                "registered_by",
            ])
            .map_err(csv_error)?;
        for row in rows {
            writer
                .write_record([
                    &row.moved_on.to_string(),
                    row.kind.as_str(),
                    row.product_name.as_str(),
                    &row.quantity.to_string(),
                    row.supplier_name.as_deref().unwrap_or(""),
                    row.sector_name.as_deref().unwrap_or(""),
                    row.user_name.as_str(),
                ])
                .map_err(csv_error)?;
        }
        writer.into_inner().map_err(csv_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consumption_csv_shape() {
        let rows = vec![
            GroupedTotal {
                label: "Maintenance".to_string(),
                total: 42,
            },
            GroupedTotal {
                label: "Front Desk".to_string(),
                total: 7,
            },
        ];

        let bytes = ExportService::new().consumption_csv(&rows).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "sector,total_consumed");
        assert_eq!(lines[1], "Maintenance,42");
        assert_eq!(lines[2], "Front Desk,7");
    }

    #[test]
    fn test_csv_quotes_embedded_commas() {
        let rows = vec![GroupedTotal {
            label: "Cleaning, general".to_string(),
            total: 3,
        }];

        let bytes = ExportService::new().consumption_csv(&rows).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains("\"Cleaning, general\",3"));
    }
}
