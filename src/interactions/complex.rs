use super::aromatic::{is_cation_pi_pair, is_pi_pair};
use super::hydrophobic::is_hydrophobic_contact;
use super::ionic::is_ionic_pair;
use super::structs::{ClassifiedInteraction, Interaction};
use crate::residues::residue_code;

/// Pairs farther apart than this are never classified.
pub const INTERACTION_CUTOFF: f64 = 8.0;
/// Largest CYS-CYS separation counted as a disulfide bond.
pub const DISULFIDE_DIST: f64 = 3.0;
/// Largest separation for the close contact fallback.
pub const CLOSE_CONTACT_DIST: f64 = 4.0;

/// Classify a residue pair from its labels and distance.
///
/// Only the first whitespace-delimited token of each label is used, upper-cased,
/// as the three-letter residue code. Rules are checked in order and the first
/// match wins, so a CYS pair at 2.5 Å is a disulfide bond even though it also
/// qualifies as a hydrophobic contact.
pub fn classify(label1: &str, label2: &str, distance: f64) -> Option<ClassifiedInteraction> {
    classify_codes(&residue_code(label1), &residue_code(label2), distance).map(Into::into)
}

/// Same as [`classify`], for already-normalized residue codes.
pub fn classify_codes(res1: &str, res2: &str, distance: f64) -> Option<Interaction> {
    if distance > INTERACTION_CUTOFF {
        return None;
    }

    if res1 == "CYS" && res2 == "CYS" && distance < DISULFIDE_DIST {
        Some(Interaction::DisulfideBond)
    } else if is_ionic_pair(res1, res2) {
        Some(Interaction::SaltBridge)
    } else if is_cation_pi_pair(res1, res2) {
        Some(Interaction::CationPi)
    } else if is_pi_pair(res1, res2) {
        Some(Interaction::PiStacking)
    } else if is_hydrophobic_contact(res1, res2, distance) {
        Some(Interaction::HydrophobicContact)
    } else if distance < CLOSE_CONTACT_DIST {
        Some(Interaction::CloseContact)
    } else {
        None
    }
}
