//! Atomic number to element symbol mapping.
//!
//! The table is closed: it covers exactly the elements that appear in the
//! aqueous-cluster systems this toolbox was built for. An atomic number
//! outside the table is a hard error rather than a placeholder symbol, so a
//! typo in a log file cannot silently propagate into synthesized inputs.
//! Extend the table by editing it here, not by patching at runtime.

use crate::error::{Result, ToolboxError};

/// Supported (atomic number, symbol) pairs.
const ELEMENT_TABLE: &[(u32, &str)] = &[
    (1, "H"),
    (6, "C"),
    (7, "N"),
    (8, "O"),
    (11, "Na"),
    (16, "S"),
    (17, "Cl"),
];

/// Returns the element symbol for an atomic number.
///
/// # Errors
///
/// Returns [`ToolboxError::UnsupportedElement`] for any atomic number not in
/// the table.
///
/// # Examples
///
/// ```
/// use dft_toolbox::elements::element_symbol;
///
/// assert_eq!(element_symbol(8).unwrap(), "O");
/// assert!(element_symbol(92).is_err());
/// ```
pub fn element_symbol(atomic_number: u32) -> Result<&'static str> {
    ELEMENT_TABLE
        .iter()
        .find(|(num, _)| *num == atomic_number)
        .map(|(_, sym)| *sym)
        .ok_or(ToolboxError::UnsupportedElement { atomic_number })
}
