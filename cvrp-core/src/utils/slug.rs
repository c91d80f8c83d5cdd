#[cfg(test)]
#[path = "../../tests/unit/utils/slug_test.rs"]
mod slug_test;

use rustc_hash::FxHashSet;

/// Normalizes a name to a lowercase identifier: alphanumeric runs survive,
/// everything else collapses into single dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());

    for ch in name.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

/// Derives stable unique identifiers from entity names, in input order.
///
/// Identifiers are meant to be generated once per model build and used as join
/// keys everywhere else: a normalized name which collides with an earlier one
/// gets a deterministic numeric suffix instead of silently aliasing it.
pub fn derive_identifiers<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut taken = FxHashSet::default();

    names
        .map(|name| {
            let slug = slugify(name);
            let base = if slug.is_empty() { "unnamed".to_string() } else { slug };

            let mut candidate = base.clone();
            let mut suffix = 2;
            while !taken.insert(candidate.clone()) {
                candidate = format!("{base}-{suffix}");
                suffix += 1;
            }

            candidate
        })
        .collect()
}
