//! dft-toolbox command-line interface.
//!
//! Thin dispatch over the library: each subcommand reads one or two files,
//! runs the corresponding extraction or synthesis routine, and prints the
//! result. See `dft-toolbox --help` for the command list.

use dft_toolbox::gaussian::{create_g16_input, ChargeSpin};
use dft_toolbox::geometry::{extract_coordinates, format_atom_line, wrap_trajectory};
use dft_toolbox::logfile::{LogDocument, SourceFormat};
use dft_toolbox::settings::SettingsManager;
use dft_toolbox::slurm::{create_slurm_script, SlurmJob};
use dft_toolbox::{arkane, distance, frequencies, help, population, solvation, thermo};
use std::env;
use std::path::Path;
use std::process;

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .target(env_logger::Target::Stdout)
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        help::print_global_help();
        process::exit(1);
    }

    let command = args[1].as_str();
    if command == "--help" || command == "-h" {
        help::print_global_help();
        return;
    }
    if args.iter().skip(2).any(|a| a == "--help" || a == "-h") {
        help::print_command_help(command);
        return;
    }

    let result = match command {
        "coords" => run_coords(&args[2..]),
        "distances" => run_distances(&args[2..]),
        "freqs" => run_freqs(&args[2..]),
        "charges" => run_charges(&args[2..]),
        "moments" => run_moments(&args[2..]),
        "dgsolv" => run_dgsolv(&args[2..]),
        "thermo" => run_thermo(&args[2..]),
        "geninput" => run_geninput(&args[2..]),
        "arkane" => run_arkane(&args[2..]),
        "wrap" => run_wrap(&args[2..]),
        "config" => run_config(),
        _ => {
            eprintln!("Error: unknown command: {}", command);
            help::print_global_help();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Resolves the coordinate source format of `path` once, at the boundary.
fn source_format(path: &Path) -> Result<SourceFormat, Box<dyn std::error::Error>> {
    SourceFormat::from_extension(path).ok_or_else(|| {
        format!(
            "unsupported coordinate source: {} (expected .xyz, .log or .out)",
            path.display()
        )
        .into()
    })
}

fn require<'a>(args: &'a [String], idx: usize, what: &str) -> Result<&'a str, Box<dyn std::error::Error>> {
    args.get(idx)
        .map(|s| s.as_str())
        .ok_or_else(|| format!("missing argument: {}", what).into())
}

fn run_coords(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(require(args, 0, "coordinate file")?);
    let format = source_format(path)?;
    let doc = LogDocument::read(path)?;
    let geometry = extract_coordinates(&doc, format)?;
    for atom in geometry.atoms() {
        println!("{}", format_atom_line(atom.symbol, atom.position));
    }
    Ok(())
}

fn run_distances(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(require(args, 0, "log file")?);
    let doc = LogDocument::read(path)?;
    let matrix = distance::distance_matrix(&doc)?;
    let n = matrix.nrows();
    print!("      ");
    for j in 0..n {
        print!("{:>10}", j + 1);
    }
    println!();
    for i in 0..n {
        print!("{:>6}", i + 1);
        for j in 0..n {
            print!("{:>10.6}", matrix[(i, j)]);
        }
        println!();
    }
    Ok(())
}

fn run_freqs(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(require(args, 0, "log file")?);
    let doc = LogDocument::read(path)?;
    for freq in frequencies::harmonic_frequencies(&doc)? {
        println!("{:>12.4}", freq);
    }
    Ok(())
}

fn run_charges(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(require(args, 0, "log file")?);
    let doc = LogDocument::read(path)?;
    for pc in population::nbo_charges(&doc)? {
        println!("{:<8} {:>10.5}", pc.atom, pc.charge);
    }
    Ok(())
}

fn run_moments(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(require(args, 0, "log file")?);
    let doc = LogDocument::read(path)?;
    let moments = population::multipole_moments(&doc, population::MomentOrigin::CenterOfCharge)?;
    println!("Dipole moment:     {:>10.4} Debye", moments.dipole);
    println!("Quadrupole moment: {:>10.4} Debye*Angstrom", moments.quadrupole);
    Ok(())
}

fn run_dgsolv(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(require(args, 0, "PCM log file")?);
    let doc = LogDocument::read(path)?;
    let dg = solvation::pcm_solvation_energy(&doc)?;
    println!("DeltaG (solv) = {:.2} kcal/mol", dg);
    Ok(())
}

fn run_thermo(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(require(args, 0, "chem.inp file")?);
    let temperature: f64 = match args.get(1) {
        Some(t) => t.parse().map_err(|_| format!("invalid temperature: {}", t))?,
        None => 298.15,
    };
    let results = thermo::calc_thermo_arkane(path, temperature)?;
    println!(
        "{:<16} {:>14} {:>14} {:>14} {:>14}",
        "Species", "Cp", "H", "S", "G"
    );
    for (name, t) in results {
        println!(
            "{:<16} {:>14.6} {:>14.4} {:>14.6} {:>14.4}",
            name, t.cp, t.h, t.s, t.g
        );
    }
    Ok(())
}

fn run_geninput(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let job = Path::new(require(args, 0, "job name")?);
    let coord_path = Path::new(require(args, 1, "coordinate file")?);
    let gas_route = require(args, 2, "gas-phase route section")?;
    let pcm_route = require(args, 3, "PCM route section")?;

    let format = source_format(coord_path)?;
    let doc = LogDocument::read(coord_path)?;
    let geometry = extract_coordinates(&doc, format)?;

    let settings = SettingsManager::load()?;
    let charge: i32 = match args.get(4) {
        Some(c) => c.parse().map_err(|_| format!("invalid charge: {}", c))?,
        None => settings.synthesis().charge,
    };
    let spin_multiplicity: u32 = match args.get(5) {
        Some(m) => m
            .parse()
            .map_err(|_| format!("invalid spin multiplicity: {}", m))?,
        None => settings.synthesis().spin_multiplicity,
    };
    let cs = ChargeSpin {
        charge,
        spin_multiplicity,
    };

    let (gas, pcm) = create_g16_input(job, gas_route, pcm_route, &geometry, cs)?;
    let mut slurm = SlurmJob::new(
        job,
        settings.hpc().nodes,
        &settings.hpc().partition,
        settings.hpc().mem_gb,
    );
    slurm.time = settings.hpc().time.clone();
    let script = create_slurm_script(job, &slurm)?;

    println!("Created:");
    println!("  {}", gas.display());
    println!("  {}", pcm.display());
    println!("  {}", script.display());
    Ok(())
}

fn run_arkane(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let name = require(args, 0, "species name")?;
    let freq_log = require(args, 1, "frequency log")?;

    let mut spec = arkane::SpeciesSpec::new(name, freq_log);
    spec.pcm_log = args.get(2).cloned();

    // The bundled level of theory; edit input.py afterwards for others.
    let lot = arkane::LevelOfTheory {
        method: Some("B3LYP".to_string()),
        basis: Some("aug-cc-pVDZ".to_string()),
    };
    let input = arkane::create_arkane_input(Path::new("."), &spec, &lot)?;
    println!("Appended species '{}' to {}", name, input.display());
    Ok(())
}

fn run_wrap(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(require(args, 0, "trajectory file")?);
    let box_size: f64 = require(args, 1, "box size")?
        .parse()
        .map_err(|_| "invalid box size")?;
    let cutoff: f64 = require(args, 2, "wrap cutoff")?
        .parse()
        .map_err(|_| "invalid wrap cutoff")?;
    wrap_trajectory(path, box_size, cutoff)?;
    println!("Wrapped coordinates in {}", path.display());
    Ok(())
}

fn run_config() -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new("dft_toolbox.cfg");
    if path.exists() {
        return Err("dft_toolbox.cfg already exists; remove it first".into());
    }
    SettingsManager::create_template(path)?;
    println!("Settings template written to dft_toolbox.cfg");
    Ok(())
}
