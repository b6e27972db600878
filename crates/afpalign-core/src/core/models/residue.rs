use phf::{Map, phf_map};

/// Placeholder code for residues whose three-letter name is not recognized.
pub const UNKNOWN_RESIDUE_CODE: char = 'X';

static ONE_LETTER_CODES: Map<&'static str, char> = phf_map! {
    "ALA" => 'A', "ARG" => 'R', "ASN" => 'N', "ASP" => 'D', "CYS" => 'C',
    "GLN" => 'Q', "GLU" => 'E', "GLY" => 'G', "HIS" => 'H', "ILE" => 'I',
    "LEU" => 'L', "LYS" => 'K', "MET" => 'M', "PHE" => 'F', "PRO" => 'P',
    "SER" => 'S', "THR" => 'T', "TRP" => 'W', "TYR" => 'Y', "VAL" => 'V',
    "HSE" => 'H', "HSD" => 'H', "HSP" => 'H', "HID" => 'H', "HIE" => 'H', "HIP" => 'H',
    "MSE" => 'M', "SEC" => 'U', "PYL" => 'O', "ASX" => 'B', "GLX" => 'Z',
};

static THREE_LETTER_NAMES: Map<char, &'static str> = phf_map! {
    'A' => "ALA", 'R' => "ARG", 'N' => "ASN", 'D' => "ASP", 'C' => "CYS",
    'Q' => "GLN", 'E' => "GLU", 'G' => "GLY", 'H' => "HIS", 'I' => "ILE",
    'L' => "LEU", 'K' => "LYS", 'M' => "MET", 'F' => "PHE", 'P' => "PRO",
    'S' => "SER", 'T' => "THR", 'W' => "TRP", 'Y' => "TYR", 'V' => "VAL",
    'U' => "SEC", 'O' => "PYL", 'B' => "ASX", 'Z' => "GLX",
};

// Conservative substitution groups used for the similarity percentage.
static SIMILARITY_GROUP: Map<char, u8> = phf_map! {
    'I' => 1, 'L' => 1, 'V' => 1, 'M' => 1,
    'F' => 2, 'Y' => 2, 'W' => 2,
    'K' => 3, 'R' => 3, 'H' => 3,
    'D' => 4, 'E' => 4, 'B' => 4, 'Z' => 4,
    'N' => 5, 'Q' => 5,
    'S' => 6, 'T' => 6,
    'A' => 7, 'G' => 7,
};

/// One residue of a Cα trace as the caller labels it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidueLabel {
    /// One-letter amino acid code.
    pub code: char,
    /// Author residue number including any insertion code (e.g. `"57A"`).
    pub number: String,
}

impl ResidueLabel {
    pub fn new(code: char, number: impl Into<String>) -> Self {
        Self {
            code,
            number: number.into(),
        }
    }
}

pub fn one_letter_code(residue_name: &str) -> char {
    ONE_LETTER_CODES
        .get(residue_name.trim().to_ascii_uppercase().as_str())
        .copied()
        .unwrap_or(UNKNOWN_RESIDUE_CODE)
}

/// Canonical three-letter name of a one-letter code; `UNK` when unknown.
pub fn three_letter_name(code: char) -> &'static str {
    THREE_LETTER_NAMES
        .get(&code.to_ascii_uppercase())
        .copied()
        .unwrap_or("UNK")
}

pub fn is_identical(a: char, b: char) -> bool {
    a != UNKNOWN_RESIDUE_CODE && a.eq_ignore_ascii_case(&b)
}

pub fn is_similar(a: char, b: char) -> bool {
    if is_identical(a, b) {
        return true;
    }
    match (
        SIMILARITY_GROUP.get(&a.to_ascii_uppercase()),
        SIMILARITY_GROUP.get(&b.to_ascii_uppercase()),
    ) {
        (Some(ga), Some(gb)) => ga == gb,
        _ => false,
    }
}
