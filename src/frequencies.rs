//! Harmonic frequency extraction from Gaussian frequency jobs.

use crate::error::Result;
use crate::logfile::LogDocument;

/// Extracts the harmonic frequencies (cm^-1) from a frequency-calculation
/// log, flattened in mode order.
///
/// Combined opt+freq jobs print the frequency section in the second internal
/// job; the document is first narrowed past the Link1 boundary when present.
/// The "Harmonic frequencies (cm**-1)" marker itself is required; the
/// section ends at "Thermochemistry".
///
/// # Errors
///
/// [`crate::error::ToolboxError::SectionNotFound`] when the log contains no
/// frequency section, [`crate::error::ToolboxError::Malformed`] for an
/// undecodable frequency value.
pub fn harmonic_frequencies(doc: &LogDocument) -> Result<Vec<f64>> {
    let section = doc
        .view()
        .after_or_here("Link1:  Proceeding to internal job step number  2", 0)
        .after("Harmonic frequencies (cm**-1)", 4)
        .ok_or_else(|| doc.missing("Harmonic frequencies (cm**-1)"))?
        .until_or_here("Thermochemistry", 0);

    let mut freqs = Vec::new();
    for (offset, line) in section.lines().iter().enumerate() {
        if !line.contains("Frequencies") {
            continue;
        }
        // " Frequencies --   1614.4225   3684.2453   3783.2621"
        for token in line.split_whitespace().skip(2) {
            let value: f64 = token
                .parse()
                .map_err(|_| doc.malformed(section.start_line() + offset, "frequency value"))?;
            freqs.push(value);
        }
    }
    Ok(freqs)
}
