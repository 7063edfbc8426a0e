//! Reads the configured simulation end time from a scenario's `.sumocfg`.

use std::path::Path;

use crate::artifacts::records::scan_records;

/// Value of the first `<end value="..."/>` element, or `None` when the file
/// is missing or carries no parseable end time. Scoring treats a missing end
/// time as an incomplete run.
pub fn parse_end_time(path: &Path) -> Option<f64> {
    scan_records(path, &["end"])
        .first()
        .and_then(|record| record.num("value"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::records::scan_records_str;

    #[test]
    fn end_element_is_found_inside_time_block() {
        let raw = r#"<configuration>
    <time>
        <begin value="0"/>
        <end value="500"/>
    </time>
</configuration>"#;
        let records = scan_records_str(raw, &["end"]);
        assert_eq!(records.first().and_then(|r| r.num("value")), Some(500.0));
    }

    #[test]
    fn missing_file_has_no_end_time() {
        assert_eq!(parse_end_time(Path::new("/nonexistent/cross.sumocfg")), None);
    }
}
