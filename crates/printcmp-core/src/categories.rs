//! Controlled category vocabulary and human labels for format and finish
//! values.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    /// URL-safe identifier used by clients.
    pub slug: &'static str,
    /// Value stored in the catalog's `category` column.
    pub name: &'static str,
}

pub const CATEGORIES: &[Category] = &[
    Category { slug: "tarjetas", name: "Tarjetas" },
    Category { slug: "papel-carta", name: "Hojas" },
    Category { slug: "sobres", name: "Sobres" },
    Category { slug: "flyers", name: "Flyers" },
    Category { slug: "dipticos", name: "Dipticos" },
    Category { slug: "carteles", name: "Carteles" },
    Category { slug: "carpetas", name: "Carpetas" },
    Category { slug: "roll-up", name: "Roll Up" },
];

const FOLDERS: &str = "Carpetas";

/// Maps a slug or a stored name (any case) to the stored category name.
///
/// Input outside the known vocabulary is returned trimmed so categories
/// added to the catalog later keep working.
#[must_use]
pub fn resolve_category(input: &str) -> String {
    let trimmed = input.trim();
    CATEGORIES
        .iter()
        .find(|c| c.slug.eq_ignore_ascii_case(trimmed) || c.name.eq_ignore_ascii_case(trimmed))
        .map_or_else(|| trimmed.to_string(), |c| c.name.to_string())
}

/// Folder type is a facet only for the folders category.
#[must_use]
pub fn is_folders(category: &str) -> bool {
    category.trim().eq_ignore_ascii_case(FOLDERS)
}

/// Human label for a format code, e.g. `("Sobres", "210x105")` →
/// `"DL (210×105 mm)"`. Unknown codes label as themselves.
#[must_use]
pub fn format_label(category: &str, format: &str) -> String {
    let label = match (category, format) {
        ("Tarjetas", "85x55") => Some("85×55 mm"),
        ("Hojas" | "Flyers" | "Dipticos" | "Carpetas", "210x297") => Some("A4 (210×297 mm)"),
        ("Sobres" | "Flyers" | "Dipticos", "210x105") => Some("DL (210×105 mm)"),
        ("Sobres", "330x229") => Some("C4 (330×229 mm)"),
        ("Flyers" | "Dipticos", "210x148") => Some("A5 (210×148 mm)"),
        ("Carteles", "297x420") => Some("A3 (297×420 mm)"),
        ("Carteles", "700x1000") => Some("B1 (700×1000 mm)"),
        ("Roll Up", "850x2000") => Some("850×2000 mm"),
        ("Roll Up", "1000x2000") => Some("1000×2000 mm"),
        _ => None,
    };
    label.map_or_else(|| format.to_string(), ToOwned::to_owned)
}

/// Display label for a stored finish. Lower-case window and frame finishes
/// get a capital; anything else labels as itself.
#[must_use]
pub fn finish_label(finish: &str) -> String {
    let label = match finish {
        "Sin plastificar" => "Sin plastificar",
        "Plastificado mate" => "Plastificado mate",
        "Plastificado brillo" => "Plastificado brillo",
        "con ventana" => "Con ventana",
        "sin ventana" => "Sin ventana",
        "estructura incluida" => "Estructura incluida",
        other => other,
    };
    label.to_string()
}
