//! Deterministic default colors for boards and labels.
//!
//! Maps a name to a color from a fixed palette using a simple hash, so a
//! board created without a color always gets the same one.

/// Palette of 16 dark accent colors (6-char hex without `#`)
const PALETTE: &[&str] = &[
    "312e81", // indigo
    "1e3a8a", // blue
    "064e3b", // emerald
    "7f1d1d", // red
    "581c87", // purple
    "7c2d12", // orange
    "134e4a", // teal
    "881337", // rose
    "164e63", // cyan
    "9a3412", // burnt orange
    "14532d", // green
    "4c1d95", // violet
    "78350f", // amber
    "701a75", // fuchsia
    "1e40af", // royal blue
    "065f46", // pine
];

/// Return a deterministic color for a name
pub fn auto_color(name: &str) -> &'static str {
    let hash = fnv1a(name);
    PALETTE[(hash as usize) % PALETTE.len()]
}

/// FNV-1a hash (32-bit) for short strings.
fn fnv1a(s: &str) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    for byte in s.bytes() {
        hash ^= byte as u32;
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}
