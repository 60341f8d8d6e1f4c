use littlewood_roots::{
    accumulate_roots,
    compositor::CHANNEL_MAX,
    config::{Backend, Config},
    pipeline,
    render::{CpuRenderer, Falloff, FieldRenderer, Resolution},
    AberthSolver, Compositor, RootSet,
};
use rayon::ThreadPoolBuilder;

fn small_config() -> Config {
    Config {
        degrees: 5,
        scale: 2.0,
        resolution: Resolution::new(48, 27),
        backend: Backend::Cpu,
        threads: 2,
        ..Config::default()
    }
}

#[test]
fn cpu_run_lights_up_the_unit_circle() {
    let config = small_config();
    let raster = pipeline::run(&config).unwrap();
    assert_eq!(raster.resolution(), config.resolution);

    // Littlewood roots cluster around |z| = 1, the origin has none nearby
    let [width, height] = [config.resolution.width, config.resolution.height];
    let centre = raster.pixel(width / 2, height / 2);
    let on_circle = raster
        .pixels()
        .iter()
        .map(|p| p[0] + p[1] + p[2])
        .fold(0.0, f32::max);
    assert!(on_circle > centre[0] + centre[1] + centre[2]);

    for pixel in raster.pixels() {
        assert_eq!(pixel[3], CHANNEL_MAX);
        assert!(pixel.iter().all(|c| (0.0..=CHANNEL_MAX).contains(c)));
    }
}

#[test]
fn single_degree_run_is_black() {
    let config = Config {
        degrees: 1,
        ..small_config()
    };
    let raster = pipeline::run(&config).unwrap();
    assert!(raster.pixels().iter().all(|p| *p == [0.0, 0.0, 0.0, 1.0]));
}

#[test]
fn empty_layer_leaves_accumulation_unchanged() {
    let pool = ThreadPoolBuilder::new().num_threads(2).build().unwrap();
    let resolution = Resolution::new(33, 17);
    let mut renderer = CpuRenderer::new(resolution, Falloff::default());
    let mut compositor = Compositor::new(resolution);

    let roots = accumulate_roots(3, &AberthSolver::default()).unwrap();
    let layer = renderer.render(&pool, &roots, [0.4, 0.3, 0.2, 1.0], 2.0).unwrap();
    compositor.blend(&layer).unwrap();
    let before = compositor.raster().clone();

    let empty = renderer
        .render(&pool, &RootSet::new(), [1.0; 4], 2.0)
        .unwrap();
    compositor.blend(&empty).unwrap();
    assert_eq!(compositor.finish(), before);
}

#[test]
fn saved_image_is_eight_bit_rgba() {
    let raster = pipeline::run(&small_config()).unwrap();
    let path = std::env::temp_dir().join(format!("littlewood-roots-{}.png", std::process::id()));
    raster.save(&path).unwrap();

    let decoded = image::open(&path).unwrap().to_rgba8();
    std::fs::remove_file(&path).ok();
    assert_eq!(decoded.dimensions(), (48, 27));
    assert_eq!(decoded, raster.to_rgba8());
}
