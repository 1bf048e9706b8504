//! Candidate underwriting requirements per carrier and line of business.
//!
//! Used only by the add flow to seed a new policy's checklist; derivation,
//! filtering and sorting are independent of this data. The exhaustive match
//! makes a new carrier or policy type a compile-visible change site.

use super::policy::{Carrier, PolicyType};

/// A selectable checklist item: name plus a short description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub description: &'static str,
}

const fn entry(name: &'static str, description: &'static str) -> CatalogEntry {
    CatalogEntry { name, description }
}

const SIGNED_APPLICATION: CatalogEntry =
    entry("Signed Application", "E-signed or wet-signed application.");
const ESIGNED_APPLICATION: CatalogEntry =
    entry("Signed Application", "E-signed application is required.");

/// Requirements any carrier may ask for, independent of line of business.
pub const COMMON: &[CatalogEntry] = &[
    entry("Application", "General policy application document."),
    entry(
        "Driver Exclusion",
        "Form to exclude a household member or driver.",
    ),
    entry(
        "Draft Form",
        "Authorization for electronic funds transfer (EFT).",
    ),
    entry(
        "Prior Insurance",
        "Proof of prior insurance coverage (e.g., declarations page).",
    ),
    entry("Other", "A non-standard or miscellaneous requirement."),
];

const NATIONWIDE_AUTO: &[CatalogEntry] = &[
    SIGNED_APPLICATION,
    entry(
        "Prior Proof of Insurance",
        "Declarations page from previous carrier.",
    ),
    entry(
        "Driver's License Photos",
        "Photos of all listed drivers' licenses.",
    ),
    entry("Signed Draft Form", "If policy is paid via EFT/bank draft."),
    entry("VIN Verification", "For full coverage on older vehicles."),
    entry(
        "Good Student Proof",
        "For drivers eligible for good student discount.",
    ),
];

const NATIONWIDE_HOME: &[CatalogEntry] = &[
    SIGNED_APPLICATION,
    entry(
        "Signed Amendments",
        "Any signed endorsements or policy changes.",
    ),
    entry("4-Point Inspection", "For homes older than 30 years."),
    entry("Wind Mitigation Report", "For potential windstorm discounts."),
    entry(
        "Alarm Certificate",
        "If central station alarm discount is applied.",
    ),
    entry(
        "Property Photos",
        "Front, back, and both sides of the dwelling.",
    ),
    entry(
        "Proof of Updates",
        "Documentation for updated roof, electrical, plumbing.",
    ),
];

const NATIONWIDE_UMBRELLA: &[CatalogEntry] = &[
    SIGNED_APPLICATION,
    entry(
        "Underlying Policy Declarations",
        "Proof of underlying auto and home policies.",
    ),
];

const PROGRESSIVE_AUTO: &[CatalogEntry] = &[
    ESIGNED_APPLICATION,
    entry("Payment Confirmation", "Proof of down payment."),
    entry("Driver Exclusion Form", "If excluding a household member."),
];

const PROGRESSIVE_HOME: &[CatalogEntry] = &[
    ESIGNED_APPLICATION,
    entry(
        "Inspection Photos",
        "Photos may be requested by underwriting.",
    ),
];

const TRAVELERS_AUTO: &[CatalogEntry] = &[
    SIGNED_APPLICATION,
    entry("VIN Verification", "Photo of vehicle VIN plate."),
];

const TRAVELERS_HOME: &[CatalogEntry] = &[
    SIGNED_APPLICATION,
    entry(
        "Alarm Certificate",
        "For monitored security system discount.",
    ),
    entry(
        "Roof Age Documentation",
        "Proof of roof replacement if newer than dwelling.",
    ),
    entry("Jewelry Appraisal", "For scheduling high-value jewelry."),
];

const SIGNED_ONLY: &[CatalogEntry] = &[SIGNED_APPLICATION];
const ESIGNED_ONLY: &[CatalogEntry] = &[ESIGNED_APPLICATION];

/// The carrier-specific candidate list for one line of business.
#[must_use]
pub const fn carrier_requirements(carrier: Carrier, ty: PolicyType) -> &'static [CatalogEntry] {
    match (carrier, ty) {
        (Carrier::Nationwide, PolicyType::Auto) => NATIONWIDE_AUTO,
        (Carrier::Nationwide, PolicyType::Home) => NATIONWIDE_HOME,
        (Carrier::Nationwide, PolicyType::Umbrella) => NATIONWIDE_UMBRELLA,
        (Carrier::Progressive, PolicyType::Auto) => PROGRESSIVE_AUTO,
        (Carrier::Progressive, PolicyType::Home) => PROGRESSIVE_HOME,
        (Carrier::Travelers, PolicyType::Auto) => TRAVELERS_AUTO,
        (Carrier::Travelers, PolicyType::Home) => TRAVELERS_HOME,
        (Carrier::Nationwide, PolicyType::Renters) => SIGNED_ONLY,
        (Carrier::Progressive | Carrier::Travelers, PolicyType::Renters) => ESIGNED_ONLY,
        (Carrier::Progressive | Carrier::Travelers, PolicyType::Umbrella) => SIGNED_ONLY,
        // The remaining carriers only ask for a signed application up front.
        (
            Carrier::NationalGeneral | Carrier::NcGrange | Carrier::AlamanceFarmers
            | Carrier::Foremost,
            PolicyType::Renters,
        ) => ESIGNED_ONLY,
        (
            Carrier::NationalGeneral | Carrier::NcGrange | Carrier::AlamanceFarmers
            | Carrier::Foremost,
            PolicyType::Auto | PolicyType::Home | PolicyType::Umbrella,
        ) => SIGNED_ONLY,
    }
}

/// Every candidate for the add-flow picker: the carrier-specific list merged
/// with [`COMMON`], deduplicated by name (carrier entries win) and sorted
/// alphabetically for presentation.
#[must_use]
pub fn selectable(carrier: Carrier, ty: PolicyType) -> Vec<CatalogEntry> {
    let mut entries: Vec<CatalogEntry> = carrier_requirements(carrier, ty).to_vec();
    for common in COMMON {
        if !entries.iter().any(|e| e.name == common.name) {
            entries.push(*common);
        }
    }
    entries.sort_by_key(|e| e.name);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_combination_has_a_signed_application() {
        for carrier in Carrier::ALL {
            for ty in [
                PolicyType::Auto,
                PolicyType::Home,
                PolicyType::Renters,
                PolicyType::Umbrella,
            ] {
                let entries = carrier_requirements(carrier, ty);
                assert!(
                    entries.iter().any(|e| e.name == "Signed Application"),
                    "{carrier} {ty} has no signed application"
                );
            }
        }
    }

    #[test]
    fn selectable_is_sorted_and_deduplicated() {
        let entries = selectable(Carrier::Nationwide, PolicyType::Auto);
        let names: Vec<_> = entries.iter().map(|e| e.name).collect();

        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);

        let mut unique = names.clone();
        unique.dedup();
        assert_eq!(names, unique);
    }

    #[test]
    fn selectable_merges_the_common_list() {
        let entries = selectable(Carrier::Foremost, PolicyType::Renters);
        assert!(entries.iter().any(|e| e.name == "Draft Form"));
        assert!(entries.iter().any(|e| e.name == "Other"));
        assert!(entries.iter().any(|e| e.name == "Signed Application"));
    }
}
