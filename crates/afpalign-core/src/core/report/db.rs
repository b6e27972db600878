use super::format::java_scientific;
use crate::core::models::algorithm::Algorithm;
use crate::core::models::result::AlignmentResult;

/// One tab-separated database-search hit line, trailing tab and newline included.
///
/// Only plain CE prints its Z-score in fixed notation; every other method uses scientific
/// notation here, side-chain CE included.
pub fn db_search_line(result: &AlignmentResult) -> String {
    let significance = match result.algorithm() {
        Algorithm::Ce => format!("{:.2}", result.significance()),
        _ => java_scientific(result.significance(), 2),
    };
    format!(
        "{}\t{}\t{:.2}\t{}\t{:.2}\t{}\t{}\t{}\t{}\t\n",
        result.name1(),
        result.name2(),
        result.score(),
        significance,
        result.total_rmsd(),
        result.len1(),
        result.len2(),
        result.similarity1(),
        result.similarity2()
    )
}
