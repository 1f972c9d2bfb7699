//! Feature color resolution
//!
//! Colors are resolved once at feature build time and carried as a feature
//! property, so the surface never needs a data-driven style expression
//! beyond reading that property.

/// Fixed palette color for a locality
///
/// Unrecognized localities (including the `"Unknown"` default) share one
/// gray so they remain visible without claiming a region color.
pub fn locality_color(locality: &str) -> &'static str {
    match locality {
        "WOE" => "#1d4ed8",
        "Glouc" => "#16a34a",
        "S&M" => "#f59e0b",
        "Central" => "#dc2626",
        _ => "#6b7280",
    }
}

/// Stable per-surveyor color derived from the name
///
/// Hashes UTF-16 code units with wrapping i32 arithmetic, then maps the hash
/// onto the hue circle. The same name always yields the same color, and the
/// hash is kept bit-compatible with historic exports that recorded colors.
pub fn surveyor_color(name: &str) -> String {
    let mut hash: i32 = 0;
    for unit in name.encode_utf16() {
        hash = (unit as i32).wrapping_add((hash << 5).wrapping_sub(hash));
    }
    format!("hsl({}, 90%, 65%)", hash.rem_euclid(360))
}
