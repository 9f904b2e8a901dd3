pub const MOODS: &[&str] = &[
    "Calm",
    "Cozy",
    "Mysterious",
    "Ethereal",
    "Melancholy",
    "Dreamy",
    "Intimate",
    "Playful",
    "Futuristic",
    "Vintage",
    "Clinical",
    "Soothing",
];

pub const LIGHTING_STYLES: &[&str] = &[
    "Natural Light (Day)",
    "Candlelight",
    "Neon Glow",
    "Soft Studio Light",
    "Dim Ambient",
    "Backlit",
    "Cinematic",
    "Moonlight",
];

pub mod camera {
    pub const MOVEMENTS: &[&str] = &[
        "Static",
        "Slow Pan",
        "Slow Zoom In",
        "Slow Zoom Out",
        "Dolly",
        "Handheld",
        "Orbit",
        "Tracking Shot",
    ];

    pub const ANGLES: &[&str] = &[
        "Eye-level",
        "Low Angle",
        "High Angle",
        "Dutch Angle",
        "Close-up",
        "Wide Shot",
        "Macro",
        "Point of View (POV)",
    ];

    pub const FOCUS: &[&str] = &[
        "Soft Focus",
        "Deep Focus",
        "Rack Focus",
        "Shallow Depth of Field",
    ];
}

pub const VISUAL_EFFECTS: &[&str] = &[
    "Soft Glow",
    "Fog",
    "Muted Tones",
    "Film Grain",
    "Lens Flare",
    "Dust Particles",
    "Bokeh",
    "Chromatic Aberration",
    "Light Leaks",
    "Bloom",
    "Vignette",
    "Iridescence",
    "Translucence",
];

pub mod sound {
    pub const PRIMARY: &[&str] = &[
        "Tapping",
        "Crinkling",
        "White Noise",
        "Humming",
        "Brushing",
        "Liquid Sounds",
        "Rain",
        "Fireplace",
        "Wind",
        "Ocean Waves",
        "Forest Ambience",
        "Keyboard Typing",
        "None",
    ];

    pub const SECONDARY: &[&str] = &[
        "Soft Speaking",
        "Whispering",
        "Mouth Sounds (inaudible)",
        "Fabric Rustling",
        "Wood Creaks",
        "Thunder",
        "Birds Chirping",
        "Pages Turning",
        "Ticking Clock",
        "Purring Cat",
    ];

    pub const QUALITIES: &[&str] = &[
        "High-Fidelity (Binaural)",
        "Lo-fi",
        "Muffled",
        "Crisp",
        "Reverberant",
        "Spacious",
    ];
}

pub const ASMR_TRIGGERS: &[&str] = &[
    "Tapping",
    "Scratching",
    "Brushing",
    "Crinkling",
    "Whispering",
    "Personal Attention",
    "Typing",
    "Liquid Sounds",
    "Sticky Sounds",
    "Soft Speaking",
    "Slicing",
    "Squishing",
    "Layered Sounds",
];

pub const CORE_MATERIALS: &[&str] = &[
    "Wood", "Glass", "Metal", "Plastic", "Fabric", "Paper", "Leather", "Stone", "Liquid", "Skin",
    "Gel", "Silicone", "Foam",
];

pub const PACING_OPTIONS: &[&str] = &[
    "Slow and deliberate",
    "Rhythmic and repetitive",
    "Gentle and continuous",
    "Varied with pauses",
    "Quick and crisp",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectKind {
    Single,
    Multi,
}

/// One option set as presented to the user (and to the suggestion prompt).
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    /// camelCase form-state key the set feeds.
    pub key: &'static str,
    pub label: &'static str,
    pub kind: SelectKind,
    pub options: &'static [&'static str],
}

pub const ENTRIES: &[CatalogEntry] = &[
    CatalogEntry {
        key: "moods",
        label: "Mood",
        kind: SelectKind::Multi,
        options: MOODS,
    },
    CatalogEntry {
        key: "pacing",
        label: "Pacing & Rhythm",
        kind: SelectKind::Single,
        options: PACING_OPTIONS,
    },
    CatalogEntry {
        key: "asmrTriggers",
        label: "Primary ASMR Triggers",
        kind: SelectKind::Multi,
        options: ASMR_TRIGGERS,
    },
    CatalogEntry {
        key: "materials",
        label: "Core Materials",
        kind: SelectKind::Multi,
        options: CORE_MATERIALS,
    },
    CatalogEntry {
        key: "lighting",
        label: "Lighting Style",
        kind: SelectKind::Single,
        options: LIGHTING_STYLES,
    },
    CatalogEntry {
        key: "cameraMovement",
        label: "Camera Movement",
        kind: SelectKind::Single,
        options: camera::MOVEMENTS,
    },
    CatalogEntry {
        key: "cameraAngle",
        label: "Camera Angle",
        kind: SelectKind::Single,
        options: camera::ANGLES,
    },
    CatalogEntry {
        key: "cameraFocus",
        label: "Camera Focus",
        kind: SelectKind::Single,
        options: camera::FOCUS,
    },
    CatalogEntry {
        key: "visualEffects",
        label: "Visual Effects",
        kind: SelectKind::Multi,
        options: VISUAL_EFFECTS,
    },
    CatalogEntry {
        key: "soundscapePrimary",
        label: "Primary Sound",
        kind: SelectKind::Single,
        options: sound::PRIMARY,
    },
    CatalogEntry {
        key: "soundscapeSecondary",
        label: "Secondary Sounds",
        kind: SelectKind::Multi,
        options: sound::SECONDARY,
    },
    CatalogEntry {
        key: "soundscapeQuality",
        label: "Sound Quality",
        kind: SelectKind::Single,
        options: sound::QUALITIES,
    },
];

/// Head of a single-select set. Every set is non-empty.
pub fn default_of(options: &'static [&'static str]) -> &'static str {
    options.first().copied().unwrap_or_default()
}

pub fn contains(options: &[&str], value: &str) -> bool {
    options.iter().any(|o| *o == value)
}

pub fn entry(key: &str) -> Option<&'static CatalogEntry> {
    ENTRIES.iter().find(|e| e.key == key)
}

/// Compact `key (single|multi): a | b | c` listing, one set per line.
pub fn describe() -> String {
    ENTRIES
        .iter()
        .map(|e| {
            let kind = match e.kind {
                SelectKind::Single => "single",
                SelectKind::Multi => "multi",
            };
            format!("{} ({kind}): {}", e.key, e.options.join(" | "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
