use expense_tracker::{
    cli::{run_cli, RunOutcome},
    init,
};

fn main() {
    init();

    match run_cli() {
        Ok(RunOutcome::Success) => {}
        Ok(RunOutcome::CommandFailed) => std::process::exit(1),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
