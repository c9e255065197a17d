/// Check if the residue carries a side chain that is positively charged at pH 7.0.
///
/// Histidine is counted as positive, matching the residue-level heuristics.
pub fn is_pos_ionizable(res_name: &str) -> bool {
    matches!(res_name, "ARG" | "LYS" | "HIS")
}

/// Check if the residue carries a side chain that is negatively charged at pH 7.0.
pub fn is_neg_ionizable(res_name: &str) -> bool {
    matches!(res_name, "ASP" | "GLU")
}

/// Check if the two residues form a positive/negative pair, in either order.
pub fn is_ionic_pair(res1: &str, res2: &str) -> bool {
    (is_pos_ionizable(res1) && is_neg_ionizable(res2))
        || (is_pos_ionizable(res2) && is_neg_ionizable(res1))
}
