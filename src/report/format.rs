use crate::core::result::{ReconciliationResult, ReportRow, SideValues};
use crate::core::types::ReportFilter;

/// Header of every exported report
pub const REPORT_HEADER: [&str; 12] = [
    "ORIGIN",
    "DEST",
    "SYS_CODE",
    "Service REG",
    "Tarif REG",
    "sla form REG",
    "sla thru REG",
    "SERVICE",
    "TARIF",
    "SLA_FORM",
    "SLA_THRU",
    "Keterangan",
];

/// Select the report rows a filter accepts, in IT file order.
#[must_use]
pub fn filter_rows(result: &ReconciliationResult, filter: ReportFilter) -> Vec<&ReportRow> {
    result.rows(filter).collect()
}

/// Render the rows of `result` selected by `filter` as comma-delimited text.
#[must_use]
pub fn format_report(result: &ReconciliationResult, filter: ReportFilter) -> String {
    format_rows(result.rows(filter))
}

/// Render report rows as comma-delimited text with the fixed 12-column header.
///
/// The label is wrapped in double quotes because it may contain commas. Master
/// columns of a row without master data are left empty.
pub fn format_rows<'a>(rows: impl IntoIterator<Item = &'a ReportRow>) -> String {
    let mut out = REPORT_HEADER.join(",");
    out.push('\n');

    for row in rows {
        let master = row
            .master
            .as_ref()
            .map_or_else(|| ",,,".to_string(), side_cells);
        out.push_str(&format!(
            "{},{},{},{},{},\"{}\"\n",
            row.origin,
            row.dest,
            row.sys_code,
            master,
            side_cells(&row.it),
            row.keterangan
        ));
    }

    out
}

fn side_cells(side: &SideValues) -> String {
    format!(
        "{},{},{},{}",
        side.service, side.tarif, side.sla_form, side.sla_thru
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::engine::reconcile;
    use crate::parsing::table::parse_table_text;

    const IT: &str = "ORIGIN,DEST,SYS_CODE,SERVICE,TARIF,SLA_FORM,SLA_THRU
DJJ10000,AMI10000,DJJ10000AMI10000,REG23,59000,3,5
MES10612,AMI10010,MES10612AMI10010,REG23,62000,3,6
XXX10000,YYY10000,XXX10000YYY10000,REG23,1000,1,2
AAA10000,BBB10000,AAA10000BBB10000,YES19,1000,1,2
";

    const MASTER: &str = "ORIGIN,DEST,SYS_CODE,Service REG,Tarif REG,sla form REG,sla thru REG
DJJ10000,AMI10000,DJJ10000AMI10000,REG23,59000,3,5
MES10612,AMI10010,MES10612AMI10010,REG23,60000,3,5
AAA10000,BBB10000,AAA10000BBB10000,REG23,1000,1,2
";

    #[test]
    fn test_format_header_and_rows() {
        let result = reconcile(IT, MASTER);
        let text = format_report(&result, ReportFilter::All);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "ORIGIN,DEST,SYS_CODE,Service REG,Tarif REG,sla form REG,sla thru REG,SERVICE,TARIF,SLA_FORM,SLA_THRU,Keterangan"
        );
        assert_eq!(lines.len(), 5);
        assert!(text.ends_with(",\"Tidak sesuai : Service\"\n"));
        assert_eq!(
            lines[1],
            "DJJ10000,AMI10000,DJJ10000AMI10000,REG23,59000,3,5,REG23,59000,3,5,\"Sesuai\""
        );
        assert_eq!(
            lines[3],
            "XXX10000,YYY10000,XXX10000YYY10000,,,,,REG23,1000,1,2,\"Tidak sesuai : Data Master tidak ditemukan\""
        );
    }

    #[test]
    fn test_matched_only_reparses_to_sesuai() {
        let result = reconcile(IT, MASTER);
        let text = format_report(&result, ReportFilter::Matched);
        let records = parse_table_text(&text, ',');
        assert_eq!(records.len(), 1);
        assert!(records.iter().all(|r| r.get("Keterangan") == "Sesuai"));
    }

    #[test]
    fn test_mismatched_only_is_complement() {
        let result = reconcile(IT, MASTER);
        let text = format_report(&result, ReportFilter::Mismatched);
        let records = parse_table_text(&text, ',');
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.get("Keterangan") != "Sesuai"));

        let keys: Vec<&str> = records.iter().map(|r| r.key()).collect();
        assert_eq!(
            keys,
            vec!["MES10612AMI10010", "XXX10000YYY10000", "AAA10000BBB10000"]
        );
        assert_eq!(records[2].get("Keterangan"), "Tidak sesuai : Service");
    }

    #[test]
    fn test_filter_rows_is_pure() {
        let result = reconcile(IT, MASTER);
        let before = result.clone();
        let matched = filter_rows(&result, ReportFilter::Matched).len();
        let mismatched = filter_rows(&result, ReportFilter::Mismatched).len();
        assert_eq!(matched + mismatched, result.full_report.len());
        assert_eq!(result, before);
    }

    #[test]
    fn test_format_empty_result() {
        let text = format_report(&ReconciliationResult::default(), ReportFilter::All);
        assert_eq!(text.lines().count(), 1);
    }
}
