// Static element reference data for the bremsstrahlung tables.
// The Seltzer-Berger compilation covers neutral atoms with Z = 1-99, so the
// tables here stop at einsteinium.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Highest atomic number with a tabulated scaled DCS data file.
pub const MAX_TABULATED_Z: u32 = 99;

/// Element symbols indexed by atomic number minus one (Z = 1..=99).
pub const ELEMENT_SYMBOLS: [&str; 99] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", // 1-10
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar", "K", "Ca", // 11-20
    "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", // 21-30
    "Ga", "Ge", "As", "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", // 31-40
    "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn", // 41-50
    "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", // 51-60
    "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", // 61-70
    "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", // 71-80
    "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", // 81-90
    "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", // 91-99
];

/// Map from element symbol to atomic number, derived from
/// [`ELEMENT_SYMBOLS`] so the two can never disagree.
pub static ATOMIC_NUMBERS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    ELEMENT_SYMBOLS
        .iter()
        .enumerate()
        .map(|(i, &symbol)| (symbol, i as u32 + 1))
        .collect()
});

/// Look up the symbol for an atomic number, or `None` outside the tabulated
/// range [1, 99].
pub fn atomic_symbol(atomic_number: u32) -> Option<&'static str> {
    if atomic_number == 0 || atomic_number > MAX_TABULATED_Z {
        return None;
    }
    Some(ELEMENT_SYMBOLS[atomic_number as usize - 1])
}
