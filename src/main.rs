use std::time::Instant;

use log::info;

use tour_opt_core::{Result, SolverOptions, input, interrupt, logging, output};

fn main() -> Result<()> {
    let now = Instant::now();
    let options = SolverOptions::from_args()?;
    logging::init_logger(&options)?;
    info!("options: {options}");

    let cities = input::read_cities(options.input_path())?;
    info!("input: n={}", cities.len());

    let cancel = interrupt::install_interrupt_hook();
    let solver = options
        .solver()?
        .with_termination(options.termination().with_cancel_flag(cancel));
    let result = solver.solve(&cities)?;

    output::write_tour_to(&result, options.output_path().as_deref())?;

    info!(
        "output: n={} initial={} final={} rounds={} stop={} time={:.2}s",
        result.order().len(),
        result.initial_length,
        result.final_length,
        result.stats.rounds,
        result
            .stats
            .stop
            .map_or_else(|| "none".to_string(), |stop| stop.to_string()),
        now.elapsed().as_secs_f32()
    );

    Ok(())
}
