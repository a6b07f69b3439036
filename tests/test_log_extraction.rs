use dft_toolbox::distance::distance_matrix;
use dft_toolbox::geometry::{extract_coordinates, format_atom_line};
use dft_toolbox::logfile::{LogDocument, SourceFormat};
use std::fs;
use std::io::Write;

/// Pairwise distance used to build the synthetic table; any symmetric
/// function of the indices works.
fn synthetic_distance(i: usize, j: usize) -> f64 {
    if i == j {
        0.0
    } else {
        let (a, b) = (i.min(j) as f64, i.max(j) as f64);
        (b - a) * 0.5 + 0.01 * (a + 1.0) * (b + 1.0)
    }
}

/// Builds a converged 13-atom log: orientation table plus the distance
/// matrix split over ceil(13/5) = 3 lower-triangular blocks.
fn thirteen_atom_log() -> String {
    let n = 13;
    let mut text = String::from(
        " Optimization complete.\n\
         ---------------------------------------------------------------------\n\
                                  Input orientation:\n\
         ---------------------------------------------------------------------\n\
         Center     Atomic      Atomic             Coordinates (Angstroms)\n\
         Number     Number       Type             X           Y           Z\n\
         ---------------------------------------------------------------------\n",
    );
    for i in 0..n {
        // Alternate O/H atoms; coordinates just need to be decodable.
        let z = if i % 2 == 0 { 8 } else { 1 };
        text.push_str(&format!(
            "    {:>3}        {:>3}           0       {:>9.5}   {:>9.5}   {:>9.5}\n",
            i + 1,
            z,
            i as f64 * 0.1,
            -(i as f64) * 0.2,
            0.33333
        ));
    }
    text.push_str(
        " ---------------------------------------------------------------------\n\
                             Distance matrix (angstroms):\n",
    );
    for block in 0..3 {
        let base = block * 5;
        let cols_end = (base + 5).min(n);
        // Column header of the block.
        text.push_str("          ");
        for j in base..cols_end {
            text.push_str(&format!("{:>11}", j + 1));
        }
        text.push('\n');
        for row in base..n {
            let symbol = if row % 2 == 0 { "O" } else { "H" };
            text.push_str(&format!("  {:>4}  {:<2}", row + 1, symbol));
            for j in base..cols_end.min(row + 1) {
                text.push_str(&format!("{:>11.6}", synthetic_distance(row, j)));
            }
            text.push('\n');
        }
    }
    text.push_str(" Stoichiometry    O7H6\n Normal termination of Gaussian\n");
    text
}

#[test]
fn test_thirteen_atom_three_block_reconstruction() {
    let doc = LogDocument::from_text("<13atoms>", &thirteen_atom_log());
    let matrix = distance_matrix(&doc).unwrap();
    assert_eq!(matrix.nrows(), 13);
    assert_eq!(matrix.ncols(), 13);
    for i in 0..13 {
        // Zero diagonal, exact.
        assert_eq!(matrix[(i, i)], 0.0);
        for j in 0..13 {
            // Symmetric, and equal to the synthetic input to the written
            // six-decimal precision.
            assert_eq!(matrix[(i, j)], matrix[(j, i)]);
            let expected = (synthetic_distance(i, j) * 1e6).round() / 1e6;
            assert!(
                (matrix[(i, j)] - expected).abs() < 1e-12,
                "mismatch at ({}, {})",
                i,
                j
            );
        }
    }
}

#[test]
fn test_no_header_tokens_leak_into_matrix() {
    // Column headers are whole numbers >= 1; every reconstructed
    // off-diagonal value here is below 10, so a leaked row/column index of
    // 10+ would show up as an out-of-place magnitude.
    let doc = LogDocument::from_text("<13atoms>", &thirteen_atom_log());
    let matrix = distance_matrix(&doc).unwrap();
    let max_expected = (0..13)
        .flat_map(|i| (0..13).map(move |j| synthetic_distance(i, j)))
        .fold(0.0f64, f64::max);
    for value in matrix.iter() {
        assert!(*value <= max_expected);
    }
}

#[test]
fn test_coordinates_round_trip_to_written_precision() {
    let doc = LogDocument::from_text("<13atoms>", &thirteen_atom_log());
    let geometry = extract_coordinates(&doc, SourceFormat::CalculationLog).unwrap();
    assert_eq!(geometry.num_atoms, 13);
    for (i, atom) in geometry.atoms().enumerate() {
        assert_eq!(atom.symbol, if i % 2 == 0 { "O" } else { "H" });
        let line = format_atom_line(atom.symbol, atom.position);
        // Five-decimal re-serialization reproduces the embedded floats.
        assert!(line.contains(&format!("{:.5}", i as f64 * 0.1)));
        assert!(line.contains("0.33333"));
    }
}

#[test]
fn test_extraction_from_file_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sim001.log");
    let mut file = fs::File::create(&path).unwrap();
    write!(file, "{}", thirteen_atom_log()).unwrap();

    let doc = LogDocument::read(&path).unwrap();
    let geometry = extract_coordinates(&doc, SourceFormat::CalculationLog).unwrap();
    assert_eq!(geometry.num_atoms, 13);

    let missing = LogDocument::read(&dir.path().join("nope.log"));
    let err = missing.unwrap_err();
    assert!(err.to_string().contains("nope.log"));
}
