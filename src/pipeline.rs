//! One run from degree 1 to the final raster.

use std::time::Instant;

use log::{debug, info};
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::{
    aberth::AberthSolver,
    accumulate::accumulate_roots,
    colour::degree_colour,
    compositor::Compositor,
    config::{Backend, Config},
    error::Result,
    raster::Raster,
    render::{CpuRenderer, FieldRenderer, GpuRenderer, RenderContext},
};

/// Solves, renders and blends degrees `1..config.degrees`.
///
/// Each degree is finished, rendered and blended before the next one is
/// solved. Any error aborts the whole run.
pub fn run(config: &Config) -> Result<Raster> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;
    debug!("solving on {} threads", pool.current_num_threads());

    match config.backend {
        Backend::Gpu => {
            let context = RenderContext::new()?;
            info!("rendering on {}", context.adapter_info().name);
            let mut renderer = GpuRenderer::new(&context, config.resolution, config.falloff)?;
            let raster = render_degrees(config, &pool, &mut renderer, &context);
            renderer.destroy();
            raster
        }
        Backend::Cpu => {
            let mut renderer = CpuRenderer::new(config.resolution, config.falloff);
            render_degrees(config, &pool, &mut renderer, &pool)
        }
    }
}

pub fn render_degrees<R: FieldRenderer>(
    config: &Config,
    pool: &ThreadPool,
    renderer: &mut R,
    context: &R::Context,
) -> Result<Raster> {
    let solver = AberthSolver::new(config.max_iterations, config.threshold);
    let mut compositor = Compositor::new(renderer.resolution());

    for degree in 1..config.degrees {
        info!("finding roots of degree {}", degree);
        let start = Instant::now();
        let roots = pool.install(|| accumulate_roots(degree, &solver))?;
        info!("solved degree {} in {}ms", degree, start.elapsed().as_millis());

        let colour = degree_colour(degree, config.degrees);
        let start = Instant::now();
        let layer = renderer.render(context, &roots, colour, config.scale)?;
        info!(
            "rendered {} roots in {}ms",
            roots.len(),
            start.elapsed().as_millis()
        );

        compositor.blend(&layer)?;
    }

    Ok(compositor.finish())
}
