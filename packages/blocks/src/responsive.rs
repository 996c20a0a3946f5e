use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Viewport class a render call targets. Presentation-only: supplied
/// fresh on every render, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewport {
    Desktop,
    Tablet,
    Mobile,
}

impl Viewport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Viewport::Desktop => "desktop",
            Viewport::Tablet => "tablet",
            Viewport::Mobile => "mobile",
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::Desktop
    }
}

impl FromStr for Viewport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "desktop" => Ok(Viewport::Desktop),
            "tablet" => Ok(Viewport::Tablet),
            "mobile" => Ok(Viewport::Mobile),
            other => Err(format!("unknown viewport: {other}")),
        }
    }
}

impl std::fmt::Display for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Largest column count any block may declare.
pub const MAX_COLUMNS: u8 = 5;

/// Concrete layout for one grid block at one viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedGrid {
    pub columns: u8,
    pub class: &'static str,
}

/// Translate a declared column count into the effective layout for a
/// viewport: mobile collapses to one column, tablet caps at two, desktop
/// honors the declaration. Shared by every grid-rendering block so the
/// breakpoint math exists in exactly one place.
pub fn resolve(declared: u8, viewport: Viewport) -> ResolvedGrid {
    let declared = declared.clamp(1, MAX_COLUMNS);

    let columns = match viewport {
        Viewport::Mobile => 1,
        Viewport::Tablet => declared.min(2),
        Viewport::Desktop => declared,
    };

    ResolvedGrid {
        columns,
        class: grid_class(columns),
    }
}

fn grid_class(columns: u8) -> &'static str {
    match columns {
        1 => "grid-cols-1",
        2 => "grid-cols-1 md:grid-cols-2",
        3 => "grid-cols-1 md:grid-cols-2 lg:grid-cols-3",
        4 => "grid-cols-1 md:grid-cols-2 lg:grid-cols-4",
        _ => "grid-cols-1 md:grid-cols-2 lg:grid-cols-5",
    }
}
