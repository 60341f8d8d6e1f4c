//! Run configuration and its command line.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::{
    aberth::{DEFAULT_MAX_ITERATIONS, DEFAULT_THRESHOLD},
    render::{
        params::{DEFAULT_FALLOFF_DISTANCE_SCALE, DEFAULT_FALLOFF_DIVISOR, DEFAULT_FALLOFF_NUMERATOR},
        Falloff, Resolution,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Compute shader through wgpu
    Gpu,
    /// Rayon over the host's cores
    Cpu,
}

/// Everything a run needs, independent of where it came from.
#[derive(Clone, Debug)]
pub struct Config {
    /// Degrees `1..degrees` are drawn.
    pub degrees: usize,
    pub scale: f32,
    pub resolution: Resolution,
    pub backend: Backend,
    pub max_iterations: usize,
    pub threshold: f64,
    pub falloff: Falloff,
    pub threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            degrees: 15,
            scale: 3.0,
            resolution: Resolution::new(4096, 2160),
            backend: Backend::Gpu,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            threshold: DEFAULT_THRESHOLD,
            falloff: Falloff::default(),
            threads: num_cpus::get(),
        }
    }
}

/// Plot the roots of Littlewood polynomials
#[derive(Parser, Debug)]
#[command(name = "littlewood-roots")]
#[command(about = "Render the roots of every Littlewood polynomial up to a degree", long_about = None)]
pub struct Args {
    /// Draw degrees 1 to DEGREES - 1
    #[arg(short = 'n', long, default_value_t = 15)]
    pub degrees: usize,

    /// Half the height of the plotted region of the complex plane
    #[arg(short, long, default_value_t = 3.0)]
    pub scale: f32,

    /// Image width in pixels
    #[arg(long, default_value_t = 4096)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 2160)]
    pub height: u32,

    /// Where to write the image
    #[arg(short, long, default_value = "out.png")]
    pub output: PathBuf,

    #[arg(short, long, value_enum, default_value_t = Backend::Gpu)]
    pub backend: Backend,

    /// Aberth iteration cap per polynomial
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub max_iterations: usize,

    /// Aberth convergence threshold
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,

    /// k in intensity = k / (c * distance)
    #[arg(long, default_value_t = DEFAULT_FALLOFF_NUMERATOR)]
    pub falloff_numerator: f32,

    /// c in intensity = k / (c * distance)
    #[arg(long, default_value_t = DEFAULT_FALLOFF_DISTANCE_SCALE)]
    pub falloff_distance_scale: f32,

    /// Colour channels are intensity * colour / divisor
    #[arg(long, default_value_t = DEFAULT_FALLOFF_DIVISOR)]
    pub falloff_divisor: f32,

    /// Solver threads (defaults to the number of CPUs)
    #[arg(short, long)]
    pub threads: Option<usize>,
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        Self {
            degrees: args.degrees,
            scale: args.scale,
            resolution: Resolution::new(args.width, args.height),
            backend: args.backend,
            max_iterations: args.max_iterations,
            threshold: args.threshold,
            falloff: Falloff::new(
                args.falloff_numerator,
                args.falloff_distance_scale,
                args.falloff_divisor,
            ),
            threads: args.threads.unwrap_or_else(num_cpus::get),
        }
    }
}
