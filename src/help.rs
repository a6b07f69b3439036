//! Built-in help text for the command-line interface.

/// Prints the global help overview.
pub fn print_global_help() {
    println!("dft-toolbox - post-processing for Gaussian 16 / Arkane workflows");
    println!("================================================================");
    println!();
    println!("USAGE:");
    println!("  dft-toolbox <command> [arguments]");
    println!();
    println!("EXTRACTION COMMANDS:");
    println!("  coords <file>             Print the atom records of a converged log");
    println!("                            or an .xyz trajectory frame");
    println!("  distances <file>          Print the reconstructed interatomic");
    println!("                            distance matrix of a log");
    println!("  freqs <file>              Print harmonic frequencies (cm**-1)");
    println!("  charges <file>            Print NBO natural charges");
    println!("  moments <file>            Print dipole/quadrupole moments from NBO");
    println!("                            charges (center of charge origin)");
    println!("  dgsolv <file>             Print the PCM solvation free energy");
    println!();
    println!("THERMOCHEMISTRY COMMANDS:");
    println!("  thermo <chem.inp> [T]     Evaluate Cp, H, S, G for every species at");
    println!("                            temperature T (default 298.15 K)");
    println!();
    println!("SYNTHESIS COMMANDS:");
    println!("  geninput <job> <coords> <gas_route> <pcm_route> [charge] [mult]");
    println!("                            Write <job>_gas.com, <job>_PCM.com and");
    println!("                            <job>.slurm from a coordinate source");
    println!("  arkane <name> <freq_log> [pcm_log]");
    println!("                            Write the species descriptor and append to");
    println!("                            the composite Arkane input.py");
    println!("  wrap <file.xyz> <box> <cutoff>");
    println!("                            Wrap trajectory coordinates in place");
    println!("  config                    Write a dft_toolbox.cfg settings template");
    println!();
    println!("Use 'dft-toolbox <command> --help' for details on one command.");
}

/// Prints detailed help for one command; falls back to the overview for
/// unknown names.
pub fn print_command_help(command: &str) {
    match command {
        "geninput" => {
            println!("dft-toolbox geninput <job> <coords> <gas_route> <pcm_route> [charge] [mult]");
            println!();
            println!("Creates the two-stage Gaussian job pair plus its SLURM script.");
            println!();
            println!("  <job>        Job path without extension; names every output");
            println!("  <coords>     Coordinate source: .xyz frame, or .log/.out of a");
            println!("               converged optimization");
            println!("  <gas_route>  Route keywords for the gas-phase opt/freq stage");
            println!("               (everything after '# ')");
            println!("  <pcm_route>  Route keywords for the PCM stage; the implicit");
            println!("               solvent block and geom=check are appended when");
            println!("               missing");
            println!();
            println!("Charge and multiplicity default to the dft_toolbox.cfg values;");
            println!("cluster resources always come from there (see 'dft-toolbox");
            println!("config').");
        }
        "thermo" => {
            println!("dft-toolbox thermo <chem.inp> [temperature]");
            println!();
            println!("Reads the THERM/END section of an Arkane chem.inp file and");
            println!("evaluates Cp, H, S and G of every species at the given");
            println!("temperature (kcal/mol units, default 298.15 K).");
            println!();
            println!("A temperature outside a species' fitted range aborts the whole");
            println!("evaluation.");
        }
        "arkane" => {
            println!("dft-toolbox arkane <name> <freq_log> [pcm_log]");
            println!();
            println!("Writes <name>.py for the species and appends a species/thermo");
            println!("stanza to input.py in the current directory, creating it with a");
            println!("level-of-theory header on first use. When <pcm_log> is given its");
            println!("energy is used in place of the gas-phase one.");
        }
        _ => print_global_help(),
    }
}
