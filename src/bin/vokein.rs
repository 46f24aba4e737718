use std::process;

fn main() {
    match lata::cli::run_registry("vokein", lata::registry::nameu::registry()) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
