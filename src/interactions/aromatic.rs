use super::ionic::is_pos_ionizable;

/// Check if the residue has an aromatic ring in its side chain.
pub fn is_aromatic(res_name: &str) -> bool {
    matches!(res_name, "PHE" | "TYR" | "TRP" | "HIS")
}

/// A cation next to an aromatic ring, in either order.
pub fn is_cation_pi_pair(res1: &str, res2: &str) -> bool {
    (is_pos_ionizable(res1) && is_aromatic(res2)) || (is_pos_ionizable(res2) && is_aromatic(res1))
}

/// Two aromatic rings.
pub fn is_pi_pair(res1: &str, res2: &str) -> bool {
    is_aromatic(res1) && is_aromatic(res2)
}
