//! Plain-text rendering of the aggregation reports.
//!
//! Each report is a title line followed by one indented `key value` line per
//! group, in the order the store returned them.

use ev_insights_store::{MakeCount, MakeRange, YearCount};

const KEY_WIDTH: usize = 26;

pub fn render_make_counts(rows: &[MakeCount]) -> String {
    render("Popular makes:", rows, |r| {
        format!("  {:<KEY_WIDTH$} {:>10}", r.make, r.vehicles)
    })
}

pub fn render_make_ranges(rows: &[MakeRange]) -> String {
    render("Average electric range by make:", rows, |r| {
        format!("  {:<KEY_WIDTH$} {:>10.2}", r.make, r.mean_range)
    })
}

pub fn render_year_counts(rows: &[YearCount]) -> String {
    render("Vehicle counts by model year:", rows, |r| {
        format!("  {:<KEY_WIDTH$} {:>10}", r.model_year, r.vehicles)
    })
}

fn render<T>(
    title: &str,
    rows: &[T],
    line: impl Fn(&T) -> String,
) -> String {
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    for row in rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_counts_layout() {
        let text = render_make_counts(&[
            MakeCount {
                make: "TESLA".into(),
                vehicles: 2,
            },
            MakeCount {
                make: "KIA".into(),
                vehicles: 1,
            },
        ]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Popular makes:");
        assert_eq!(lines[1], format!("  {:<26} {:>10}", "TESLA", 2));
        assert_eq!(lines[2], format!("  {:<26} {:>10}", "KIA", 1));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn ranges_use_two_decimals() {
        let text = render_make_ranges(&[MakeRange {
            make: "TESLA".into(),
            mean_range: 125.0,
        }]);
        assert!(text.starts_with("Average electric range by make:\n"));
        assert!(text.contains("TESLA"));
        assert!(text.trim_end().ends_with("125.00"));
    }

    #[test]
    fn year_counts_layout() {
        let text = render_year_counts(&[YearCount {
            model_year: 2020,
            vehicles: 2,
        }]);
        assert_eq!(
            text,
            format!("Vehicle counts by model year:\n  {:<26} {:>10}\n", 2020, 2)
        );
    }

    #[test]
    fn empty_report_prints_only_title() {
        assert_eq!(render_make_counts(&[]), "Popular makes:\n");
        assert_eq!(render_year_counts(&[]), "Vehicle counts by model year:\n");
    }
}
