/// Largest separation counted as a hydrophobic contact.
pub const HYDROPHOBIC_CONTACT_DIST: f64 = 5.0;

/// Check if the residue belongs to the hydrophobic category.
pub fn is_hydrophobic(res_name: &str) -> bool {
    matches!(
        res_name,
        "ALA" | "VAL" | "ILE" | "LEU" | "MET" | "PHE" | "TYR" | "TRP" | "CYS" | "PRO"
    )
}

/// Check if two hydrophobic residues are within [`HYDROPHOBIC_CONTACT_DIST`].
pub fn is_hydrophobic_contact(res1: &str, res2: &str, distance: f64) -> bool {
    is_hydrophobic(res1) && is_hydrophobic(res2) && distance < HYDROPHOBIC_CONTACT_DIST
}
