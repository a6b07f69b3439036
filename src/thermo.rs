//! NASA polynomial thermochemistry.
//!
//! A NASA polynomial represents Cp(T), H(T) and S(T) of one species as a
//! 7-coefficient piecewise fit: a 5-term polynomial for the heat capacity
//! plus two integration constants (a6 for the enthalpy, a7 for the entropy).
//! Arkane's `thermo()` output writes these fits in CHEMKIN format, bracketed
//! by "THERM"/"END", four lines per species with 15-character fixed-width
//! coefficient fields.
//!
//! All values are in kcal/mol or kcal/(mol*K).

use crate::error::{Result, ToolboxError};
use crate::logfile::LogDocument;
use std::path::Path;

/// Gas constant in kcal/(mol*K).
pub const GAS_CONSTANT: f64 = 0.0019872042586408316;

/// Thermochemical state functions of one species at one temperature.
///
/// Computed on demand by direct evaluation; never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermoResult {
    /// Heat capacity Cp, kcal/(mol*K).
    pub cp: f64,
    /// Enthalpy H, kcal/mol.
    pub h: f64,
    /// Entropy S, kcal/(mol*K).
    pub s: f64,
    /// Gibbs free energy G = H - T*S, kcal/mol.
    pub g: f64,
}

/// Evaluates the thermochemistry of a 7-coefficient NASA polynomial set at
/// one temperature.
///
/// Cp comes from the 5-term polynomial directly; H and S from its closed
/// form antiderivatives with a6 and a7 as the integration constants; G from
/// H - T*S. Everything is scaled by [`GAS_CONSTANT`].
pub fn calc_thermo_nasa(coeffs: &[f64; 7], temp: f64) -> ThermoResult {
    let cp = (coeffs[0]
        + temp * coeffs[1]
        + temp.powi(2) * coeffs[2]
        + temp.powi(3) * coeffs[3]
        + temp.powi(4) * coeffs[4])
        * GAS_CONSTANT;
    let h = (coeffs[0] * temp
        + temp.powi(2) / 2.0 * coeffs[1]
        + temp.powi(3) / 3.0 * coeffs[2]
        + temp.powi(4) / 4.0 * coeffs[3]
        + temp.powi(5) / 5.0 * coeffs[4]
        + coeffs[5])
        * GAS_CONSTANT;
    let s = (coeffs[0] * temp.ln()
        + temp * coeffs[1]
        + temp.powi(2) * (coeffs[2] / 2.0)
        + temp.powi(3) * (coeffs[3] / 3.0)
        + temp.powi(4) * (coeffs[4] / 4.0)
        + coeffs[6])
        * GAS_CONSTANT;
    ThermoResult {
        cp,
        h,
        s,
        g: h - temp * s,
    }
}

/// Piecewise NASA polynomial fit for one species.
#[derive(Debug, Clone, PartialEq)]
pub struct NasaPolynomial {
    /// Species name from the CHEMKIN header line.
    pub name: String,
    /// Coefficient set valid from `t_low` to `t_mid`.
    pub low: [f64; 7],
    /// Coefficient set valid from `t_mid` to `t_high`.
    pub high: [f64; 7],
    /// Lower bound of the fitted range, K.
    pub t_low: f64,
    /// Boundary between the two sets, K.
    pub t_mid: f64,
    /// Upper bound of the fitted range, K.
    pub t_high: f64,
}

impl NasaPolynomial {
    /// Selects the coefficient set covering `temp`: the low set on
    /// `[t_low, t_mid]`, the high set on `(t_mid, t_high]`.
    ///
    /// Returns `None` outside `[t_low, t_high]`; the caller owes the error
    /// its file context.
    pub fn coefficients_at(&self, temp: f64) -> Option<&[f64; 7]> {
        if temp >= self.t_low && temp <= self.t_mid {
            Some(&self.low)
        } else if temp > self.t_mid && temp <= self.t_high {
            Some(&self.high)
        } else {
            None
        }
    }
}

/// Width of one coefficient field in a CHEMKIN record line.
const FIELD_WIDTH: usize = 15;

fn coefficient_fields(
    doc: &LogDocument,
    line_idx: usize,
    line: &str,
    count: usize,
) -> Result<Vec<f64>> {
    let mut values = Vec::with_capacity(count);
    for j in 0..count {
        let start = j * FIELD_WIDTH;
        let end = start + FIELD_WIDTH;
        let field = line
            .get(start..end)
            .ok_or_else(|| doc.malformed(line_idx, format!("coefficient field {} missing", j + 1)))?;
        let value: f64 = field
            .trim()
            .parse()
            .map_err(|_| doc.malformed(line_idx, format!("coefficient field {:?}", field.trim())))?;
        values.push(value);
    }
    Ok(values)
}

fn seven(values: Vec<f64>) -> [f64; 7] {
    let mut out = [0.0; 7];
    out.copy_from_slice(&values);
    out
}

/// Parses the NASA polynomials of every species in a CHEMKIN `chem.inp` file
/// written by Arkane.
///
/// The "THERM" line and its two default-temperature lines are skipped; the
/// section ends two lines before "END". Each species occupies four lines:
/// header (name ... t_low t_high t_mid), then 15-character coefficient
/// fields: five high-set fields, two high + three low, four low.
///
/// # Errors
///
/// [`ToolboxError::SectionNotFound`] without a THERM/END bracket,
/// [`ToolboxError::Malformed`] for short records or undecodable fields.
pub fn read_chemkin(path: &Path) -> Result<Vec<NasaPolynomial>> {
    let doc = LogDocument::read(path)?;
    parse_chemkin(&doc)
}

fn parse_chemkin(doc: &LogDocument) -> Result<Vec<NasaPolynomial>> {
    let section = doc
        .view()
        .after("THERM", 3)
        .ok_or_else(|| doc.missing("THERM"))?;
    let section = section
        .until("END", 2)
        .ok_or_else(|| doc.missing("END"))?;

    // Record lines with their document indices, blank lines dropped.
    let records: Vec<(usize, &String)> = section
        .lines()
        .iter()
        .enumerate()
        .map(|(offset, line)| (section.start_line() + offset, line))
        .filter(|(_, line)| !line.trim().is_empty())
        .collect();

    if records.len() % 4 != 0 {
        return Err(doc.malformed(
            section.start_line(),
            format!("{} thermo lines is not a multiple of 4", records.len()),
        ));
    }

    let mut polynomials = Vec::with_capacity(records.len() / 4);
    for chunk in records.chunks(4) {
        let (header_idx, header) = chunk[0];
        let name = header
            .split_whitespace()
            .next()
            .ok_or_else(|| doc.malformed(header_idx, "species header"))?
            .to_string();

        let tokens: Vec<&str> = header.split_whitespace().collect();
        if tokens.len() < 4 {
            return Err(doc.malformed(header_idx, "species header temperatures"));
        }
        let temp_token = |back: usize| -> Result<f64> {
            tokens[tokens.len() - back]
                .parse()
                .map_err(|_| doc.malformed(header_idx, "boundary temperature"))
        };
        let t_low = temp_token(4)?;
        let t_high = temp_token(3)?;
        let t_mid = temp_token(2)?;

        let (l1_idx, l1) = chunk[1];
        let (l2_idx, l2) = chunk[2];
        let (l3_idx, l3) = chunk[3];

        let mut high = coefficient_fields(doc, l1_idx, l1, 5)?;
        high.extend(coefficient_fields(doc, l2_idx, l2, 2)?);

        let low_tail = coefficient_fields(doc, l2_idx, l2, 5)?[2..].to_vec();
        let mut low = low_tail;
        low.extend(coefficient_fields(doc, l3_idx, l3, 4)?);

        polynomials.push(NasaPolynomial {
            name,
            low: seven(low),
            high: seven(high),
            t_low,
            t_mid,
            t_high,
        });
    }
    Ok(polynomials)
}

/// Evaluates Cp, H, S and G for every species of an Arkane `chem.inp` file
/// at one temperature.
///
/// A temperature outside any species' fitted range aborts the whole batch
/// with [`ToolboxError::TemperatureOutOfRange`]; no partial result is
/// returned.
pub fn calc_thermo_arkane(path: &Path, temperature: f64) -> Result<Vec<(String, ThermoResult)>> {
    let polynomials = read_chemkin(path)?;
    let mut output = Vec::with_capacity(polynomials.len());
    for poly in polynomials {
        let coeffs =
            poly.coefficients_at(temperature)
                .ok_or_else(|| ToolboxError::TemperatureOutOfRange {
                    file: path.display().to_string(),
                    molecule: poly.name.clone(),
                    temperature,
                })?;
        output.push((poly.name.clone(), calc_thermo_nasa(coeffs, temperature)));
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calc_thermo_nasa_constant_cp() {
        // Only a1 set: Cp = a1*R at any T, H = a1*R*T, S = a1*R*ln(T).
        let coeffs = [3.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let t = 500.0;
        let thermo = calc_thermo_nasa(&coeffs, t);
        assert!((thermo.cp - 3.5 * GAS_CONSTANT).abs() < 1e-14);
        assert!((thermo.h - 3.5 * GAS_CONSTANT * t).abs() < 1e-12);
        assert!((thermo.s - 3.5 * GAS_CONSTANT * t.ln()).abs() < 1e-14);
        assert!((thermo.g - (thermo.h - t * thermo.s)).abs() < 1e-12);
    }

    #[test]
    fn test_coefficient_set_selection() {
        let poly = NasaPolynomial {
            name: "X".to_string(),
            low: [1.0; 7],
            high: [2.0; 7],
            t_low: 300.0,
            t_mid: 1000.0,
            t_high: 3000.0,
        };
        assert_eq!(poly.coefficients_at(300.0), Some(&[1.0; 7]));
        assert_eq!(poly.coefficients_at(1000.0), Some(&[1.0; 7]));
        assert_eq!(poly.coefficients_at(1000.1), Some(&[2.0; 7]));
        assert_eq!(poly.coefficients_at(3000.0), Some(&[2.0; 7]));
        assert_eq!(poly.coefficients_at(299.9), None);
        assert_eq!(poly.coefficients_at(3000.1), None);
    }
}
