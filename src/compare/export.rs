//! CSV export of ranked comparison results. Each row carries the UTC
//! generation stamp so exported sheets are self-dating.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::compare::ranking::RankedBuildResult;

const HEADER: [&str; 10] = [
    "rank",
    "label",
    "weapon",
    "rounds",
    "hits",
    "crits",
    "dps_mean",
    "dps_stdev",
    "dpr",
    "generated_at",
];

/// Write ranked rows as CSV to any writer. One row per result, header first.
pub fn write_comparison_csv<W: Write>(
    writer: W,
    results: &[RankedBuildResult],
) -> Result<(), csv::Error> {
    let generated_at = chrono::Utc::now()
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string();
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;
    for ranked in results {
        let result = &ranked.result;
        csv_writer.write_record([
            ranked.rank.to_string(),
            result.label.clone(),
            result.weapon.clone(),
            result.rounds.to_string(),
            result.hits.to_string(),
            result.crits.to_string(),
            format!("{:.6}", result.summary.dps_mean),
            format!("{:.6}", result.summary.dps_stdev),
            format!("{:.6}", result.summary.dpr),
            generated_at.clone(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write ranked rows to a file path.
pub fn export_comparison_csv(
    path: impl AsRef<Path>,
    results: &[RankedBuildResult],
) -> Result<(), csv::Error> {
    let file = File::create(path)?;
    write_comparison_csv(file, results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::stats::DamageSummary;
    use crate::compare::ComparisonResult;

    fn ranked(label: &str, rank: usize) -> RankedBuildResult {
        RankedBuildResult {
            rank,
            result: ComparisonResult {
                label: label.to_string(),
                weapon: "scythe".to_string(),
                rounds: 1000,
                hits: 2800,
                crits: 300,
                illegal_dual_wield: false,
                summary: DamageSummary {
                    dps_mean: 12.5,
                    dps_stdev: 3.25,
                    dpr: 75.0,
                },
            },
        }
    }

    #[test]
    fn csv_has_header_and_one_row_per_result() {
        let mut buffer = Vec::new();
        write_comparison_csv(&mut buffer, &[ranked("a", 1), ranked("b", 2)]).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("rank,label,weapon"));
        assert!(lines[1].starts_with("1,a,scythe,1000,2800,300,12.5"));
    }

    #[test]
    fn rows_carry_a_utc_stamp() {
        let mut buffer = Vec::new();
        write_comparison_csv(&mut buffer, &[ranked("a", 1)]).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.lines().nth(1).unwrap().ends_with('Z'));
    }
}
