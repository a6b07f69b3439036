use dft_toolbox::thermo::{calc_thermo_arkane, calc_thermo_nasa, read_chemkin, GAS_CONSTANT};
use dft_toolbox::ToolboxError;
use std::fs;
use std::path::PathBuf;

// GRI-Mech 3.0 water fit; the two sets meet at 1000 K.
const H2O_HIGH: [f64; 7] = [
    2.67214561E+00,
    3.05629289E-03,
    -8.73026011E-07,
    1.20099639E-10,
    -6.39161787E-15,
    -2.98992090E+04,
    6.86281681E+00,
];
const H2O_LOW: [f64; 7] = [
    3.38684249E+00,
    3.47498246E-03,
    -6.35469633E-06,
    6.96858127E-09,
    -2.50658847E-12,
    -3.02081133E+04,
    2.59023285E+00,
];

/// Concatenates 15-character fixed-width coefficient fields and the
/// CHEMKIN line-number column.
fn record_line(coeffs: &[f64], line_no: u32) -> String {
    let mut line = String::new();
    for c in coeffs {
        line.push_str(&format!("{:>15}", format!("{:.8E}", c)));
    }
    while line.len() < 79 {
        line.push(' ');
    }
    format!("{}{}\n", line, line_no)
}

fn species_record(name: &str, low: &[f64; 7], high: &[f64; 7], t: (f64, f64, f64)) -> String {
    let (t_low, t_mid, t_high) = t;
    let mut text = format!(
        "{:<24}H   2O   1          G {:>10.3} {:>10.3} {:>8.2}      1\n",
        name, t_low, t_high, t_mid
    );
    text.push_str(&record_line(&high[0..5], 2));
    let mut mixed = high[5..7].to_vec();
    mixed.extend_from_slice(&low[0..3]);
    text.push_str(&record_line(&mixed, 3));
    text.push_str(&record_line(&low[3..7], 4));
    text
}

fn write_chem_inp(records: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chem.inp");
    let content = format!(
        "THERM ALL\n   300.000  1000.000  5000.000\n\n{}\n\nEND\n",
        records
    );
    fs::write(&path, content).unwrap();
    (dir, path)
}

#[test]
fn test_read_chemkin_single_species() {
    let records = species_record("H2O", &H2O_LOW, &H2O_HIGH, (300.0, 1000.0, 5000.0));
    let (_dir, path) = write_chem_inp(&records);

    let polys = read_chemkin(&path).unwrap();
    assert_eq!(polys.len(), 1);
    let poly = &polys[0];
    assert_eq!(poly.name, "H2O");
    assert_eq!(poly.t_low, 300.0);
    assert_eq!(poly.t_mid, 1000.0);
    assert_eq!(poly.t_high, 5000.0);
    for k in 0..7 {
        assert!((poly.low[k] - H2O_LOW[k]).abs() < 1e-12);
        assert!((poly.high[k] - H2O_HIGH[k]).abs() < 1e-12);
    }
}

#[test]
fn test_cp_continuity_at_set_boundary() {
    let records = species_record("H2O", &H2O_LOW, &H2O_HIGH, (300.0, 1000.0, 5000.0));
    let (_dir, path) = write_chem_inp(&records);
    let poly = &read_chemkin(&path).unwrap()[0];

    let t_mid = poly.t_mid;
    let cp_low = calc_thermo_nasa(&poly.low, t_mid).cp;
    let cp_high = calc_thermo_nasa(&poly.high, t_mid).cp;
    assert!(
        (cp_low - cp_high).abs() < 1e-5,
        "Cp discontinuous at the set boundary: {} vs {}",
        cp_low,
        cp_high
    );

    // Selection flips from the low to the high set just past the boundary.
    assert_eq!(poly.coefficients_at(t_mid), Some(&poly.low));
    assert_eq!(poly.coefficients_at(t_mid + 1e-6), Some(&poly.high));
}

#[test]
fn test_thermo_evaluation_at_room_temperature() {
    let records = species_record("H2O", &H2O_LOW, &H2O_HIGH, (200.0, 1000.0, 5000.0));
    let (_dir, path) = write_chem_inp(&records);

    let results = calc_thermo_arkane(&path, 298.15).unwrap();
    assert_eq!(results.len(), 1);
    let (name, thermo) = &results[0];
    assert_eq!(name, "H2O");
    // Gas-phase water: Cp about 8 cal/(mol K), H dominated by the enthalpy
    // of formation offset.
    assert!((thermo.cp - 8.0e-3).abs() < 1.0e-3);
    assert!(thermo.h < -50.0);
    assert!(thermo.s > 0.0);
    assert!((thermo.g - (thermo.h - 298.15 * thermo.s)).abs() < 1e-10);
}

#[test]
fn test_out_of_range_temperature_aborts_batch() {
    // Second species has a narrower fitted range; evaluating past it kills
    // the whole batch even though the first species covers the temperature.
    let mut records = species_record("H2O", &H2O_LOW, &H2O_HIGH, (300.0, 1000.0, 5000.0));
    records.push_str(&species_record(
        "H2Onarrow",
        &H2O_LOW,
        &H2O_HIGH,
        (300.0, 1000.0, 2000.0),
    ));
    let (_dir, path) = write_chem_inp(&records);

    let err = calc_thermo_arkane(&path, 3000.0).unwrap_err();
    match err {
        ToolboxError::TemperatureOutOfRange {
            molecule,
            temperature,
            ..
        } => {
            assert_eq!(molecule, "H2Onarrow");
            assert_eq!(temperature, 3000.0);
        }
        other => panic!("expected TemperatureOutOfRange, got {}", other),
    }

    // Both species evaluate fine inside the shared range.
    assert_eq!(calc_thermo_arkane(&path, 500.0).unwrap().len(), 2);
}

#[test]
fn test_single_sample_boltzmann_average_of_thermo() {
    // Ensemble plumbing over NASA output: one conformer comes back exactly.
    let records = species_record("H2O", &H2O_LOW, &H2O_HIGH, (200.0, 1000.0, 5000.0));
    let (_dir, path) = write_chem_inp(&records);
    let (_, thermo) = &calc_thermo_arkane(&path, 298.15).unwrap()[0];

    let beta = 1.0 / (GAS_CONSTANT * 298.15);
    let avg = dft_toolbox::boltzmann::boltzmann_g(&[thermo.g], &[beta]).unwrap();
    assert_eq!(avg, thermo.g);
}
