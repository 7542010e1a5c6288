use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use particle_life::{ParticleSystem, SimulationConfig, StepParams};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Parser, Debug)]
#[command(about = "Run a headless particle life simulation")]
struct Args {
    /// YAML config file; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to run
    #[arg(short, long)]
    steps: Option<usize>,

    /// Seed for matrix and particle generation
    #[arg(long)]
    seed: Option<u64>,

    /// Interaction radius
    #[arg(short, long)]
    radius: Option<f32>,

    /// Log stats every N ticks
    #[arg(long)]
    report_every: Option<usize>,
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    if let Some(steps) = args.steps {
        config.steps = steps;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(radius) = args.radius {
        config.physics.radius = radius;
    }
    if let Some(report_every) = args.report_every {
        config.report_every = report_every;
    }

    config.validate()?;
    Ok(config)
}

// Owns the simulation and plays the role of the frame loop.
struct Runner {
    system: ParticleSystem,
    params: StepParams,
    rng: StdRng,
    step_time: Duration,
    steps_timed: u32,
}

impl Runner {
    fn new(config: &SimulationConfig) -> Result<Self> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let system = ParticleSystem::new(
            config.num_particles,
            config.num_types,
            config.width,
            config.height,
            &mut rng,
        )?;

        Ok(Self {
            system,
            params: config.physics,
            rng,
            step_time: Duration::ZERO,
            steps_timed: 0,
        })
    }

    fn tick(&mut self) -> Result<()> {
        let start = Instant::now();
        self.system.step_with(&self.params)?;
        self.step_time += start.elapsed();
        self.steps_timed += 1;
        Ok(())
    }

    fn report(&mut self, tick: usize) {
        let mean_step = if self.steps_timed == 0 {
            Duration::ZERO
        } else {
            self.step_time / self.steps_timed
        };
        log::info!(
            "tick {tick}: mean speed {:.3}, types {:?}, step {:.3}ms",
            self.system.mean_speed(),
            self.system.type_counts(),
            mean_step.as_secs_f64() * 1000.0,
        );
        self.step_time = Duration::ZERO;
        self.steps_timed = 0;
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    log::info!(
        "Starting particle life: {} particles, {} types, {}x{}",
        config.num_particles,
        config.num_types,
        config.width,
        config.height,
    );

    let mut runner = Runner::new(&config)?;
    for tick in 1..=config.steps {
        runner.tick()?;

        if config.reset_every.is_some_and(|n| tick % n == 0) {
            runner.system.reset(&mut runner.rng);
            log::info!("tick {tick}: reset particles");
        }
        if tick % config.report_every == 0 {
            runner.report(tick);
        }
    }

    log::info!("Finished {} ticks", config.steps);
    Ok(())
}
