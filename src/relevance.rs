//! Relevance validation for candidate listings.
//!
//! Permissive row-scraping picks up navigation links, promos, and sponsored
//! items for unrelated calibers. This module decides whether a candidate's
//! display name actually matches the requested component and search value.

use crate::criteria::Component;

/// Generic site-navigation fragments that get misidentified as products.
const JUNK_NAMES: &[&str] = &["products", "deals", "search", "login", "register", "cart"];

/// Substrings marking storewide promos rather than listings.
const JUNK_SUBSTRINGS: &[&str] = &["storewide", "off site"];

/// Primer attribute tokens that must agree between search value and name.
const PRIMER_TOKENS: &[&str] = &["small", "large", "pistol", "rifle", "209"];

/// A caliber family: when its trigger matches the search value, the name must
/// contain at least one of the required tokens.
struct CaliberFamily {
    trigger: fn(&str) -> bool,
    required: &'static [&'static str],
}

/// Priority-ordered caliber families. The first family whose trigger matches
/// the search value governs; later families are never consulted, even when
/// their triggers would also match (first-match-wins, not cumulative).
const CALIBER_FAMILIES: &[CaliberFamily] = &[
    CaliberFamily { trigger: |v| v.contains("9mm"), required: &["9mm", "luger"] },
    CaliberFamily { trigger: |v| v.contains("45") && v.contains("acp"), required: &["45", "acp"] },
    CaliberFamily { trigger: |v| v.contains("223") || v.contains("5.56"), required: &["223", "5.56"] },
    CaliberFamily { trigger: |v| v.contains("308"), required: &["308", "7.62"] },
    CaliberFamily { trigger: |v| v.contains("6.5"), required: &["6.5", "creedmoor"] },
    CaliberFamily { trigger: |v| v.contains("300"), required: &["300", "blackout"] },
];

/// Returns true if the candidate name matches the search criteria.
///
/// Pure predicate, case-insensitive. A non-match is a regular `false`, never
/// an error.
pub fn is_relevant(name: &str, component: Component, search_value: &str) -> bool {
    let name = name.to_lowercase();
    let value = search_value.to_lowercase();

    if is_junk(&name) {
        return false;
    }

    match component {
        Component::Primers => primer_match(&name, &value),
        Component::Powder => powder_match(&name, &value),
        Component::Bullets | Component::Brass | Component::LoadedAmmo => {
            caliber_match(&name, &value)
        }
    }
}

fn is_junk(name: &str) -> bool {
    if JUNK_NAMES.contains(&name) {
        return true;
    }
    JUNK_SUBSTRINGS.iter().any(|junk| name.contains(junk))
}

/// Strict attribute matching: size/type mismatches are the main false-positive
/// source for primers and must be eliminated exactly.
fn primer_match(name: &str, value: &str) -> bool {
    for token in PRIMER_TOKENS {
        if value.contains(token) && !name.contains(token) {
            return false;
        }
    }

    // Cross-exclusions: a pistol search must not surface rifle or shotshell
    // primers, and vice versa.
    if value.contains("pistol") && (name.contains("rifle") || name.contains("209")) {
        return false;
    }
    if value.contains("rifle") && (name.contains("pistol") || name.contains("209")) {
        return false;
    }

    true
}

/// Powder names are proper nouns ("Varget"); the whole search value must
/// appear in the name.
fn powder_match(name: &str, value: &str) -> bool {
    name.contains(value)
}

/// Caliber matching for bullets, brass, and loaded ammo. If no family's
/// trigger matches the search value, no caliber restriction applies.
fn caliber_match(name: &str, value: &str) -> bool {
    for family in CALIBER_FAMILIES {
        if (family.trigger)(value) {
            return family.required.iter().any(|token| name.contains(token));
        }
    }
    true
}
