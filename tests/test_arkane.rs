use dft_toolbox::arkane::{create_arkane_input, LevelOfTheory, SpeciesSpec};
use std::fs;

const FREQ_LOG: &str = "\
 Full point group                 C2V
 Rotational symmetry number  2.
 Harmonic frequencies (cm**-1), IR intensities (KM/Mole)
";

fn bundled_lot() -> LevelOfTheory {
    LevelOfTheory {
        method: Some("B3LYP".to_string()),
        basis: Some("aug-cc-pVDZ".to_string()),
    }
}

#[test]
fn test_composite_input_accumulates_species() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("sim000_freq.log"), FREQ_LOG).unwrap();
    fs::write(dir.path().join("sim001_freq.log"), FREQ_LOG).unwrap();

    let first = SpeciesSpec::new("sim000", "sim000_freq.log");
    let mut second = SpeciesSpec::new("sim001", "sim001_freq.log");
    second.pcm_log = Some("sim001_PCM.log".to_string());
    second.spin_multiplicity = 2;

    create_arkane_input(dir.path(), &first, &bundled_lot()).unwrap();
    create_arkane_input(dir.path(), &second, &bundled_lot()).unwrap();

    // Header is written exactly once, then one stanza per species.
    let input = fs::read_to_string(dir.path().join("input.py")).unwrap();
    assert_eq!(input.matches("LevelOfTheory").count(), 1);
    assert_eq!(input.matches("atomEnergies = {").count(), 1);
    assert!(input.contains("species('sim000', 'sim000.py')"));
    assert!(input.contains("thermo('sim000', 'NASA')"));
    assert!(input.contains("species('sim001', 'sim001.py')"));
    let header_at = input.find("LevelOfTheory").unwrap();
    let first_species_at = input.find("species('sim000'").unwrap();
    assert!(header_at < first_species_at);

    // Species descriptors carry the symmetry from the log and the energy
    // redirection for the PCM variant.
    let sim000 = fs::read_to_string(dir.path().join("sim000.py")).unwrap();
    assert!(sim000.contains("externalSymmetry = 2"));
    assert!(sim000.contains("energy = Log('sim000_freq.log')"));

    let sim001 = fs::read_to_string(dir.path().join("sim001.py")).unwrap();
    assert!(sim001.contains("spinMultiplicity = 2"));
    assert!(sim001.contains("energy = Log('sim001_PCM.log')"));
    assert!(sim001.contains("frequencies = Log('sim001_freq.log')"));
}

#[test]
fn test_missing_frequency_log_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let spec = SpeciesSpec::new("ghost", "ghost_freq.log");
    let err = create_arkane_input(dir.path(), &spec, &bundled_lot()).unwrap_err();
    assert!(err.to_string().contains("ghost_freq.log"));
}
