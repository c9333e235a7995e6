mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Args;
use log::{debug, info, LevelFilter};
use lumen_math::DVec3;
use lumen_renderer::{render, Camera, Color, PointLight, RenderConfig, Scene, Sphere};
use std::time::Instant;

/// Spheres of the demo room: three feature spheres inside six huge walls.
fn build_spheres() -> Result<Vec<Sphere>> {
    let walls = [
        (DVec3::new(-1000.0, 0.0, 0.0), 940.0, Color::new(0.0, 1.0, 1.0)),
        (DVec3::new(1000.0, 0.0, 0.0), 940.0, Color::new(1.0, 1.0, 0.0)),
        (DVec3::new(0.0, 1000.0, 0.0), 940.0, Color::new(1.0, 0.0, 0.0)),
        (DVec3::new(0.0, -1000.0, 0.0), 990.0, Color::new(0.0, 0.0, 1.0)),
        (DVec3::new(0.0, 0.0, 1000.0), 940.0, Color::new(0.0, 1.0, 0.0)),
        (DVec3::new(0.0, 0.0, -1000.0), 940.0, Color::new(1.0, 0.0, 1.0)),
    ];

    let mut spheres = vec![
        Sphere::builder()
            .center(DVec3::new(-25.0, 0.0, 0.0))
            .radius(10.0)
            .mirror(true)
            .build()?,
        Sphere::builder()
            .center(DVec3::new(25.0, 0.0, 0.0))
            .radius(10.0)
            .color(Color::new(1.0, 0.0, 0.0))
            .build()?,
        Sphere::builder()
            .center(DVec3::ZERO)
            .radius(10.0)
            .refractive_index(1.5)
            .build()?,
    ];

    for (center, radius, color) in walls {
        spheres.push(Sphere::builder().center(center).radius(radius).color(color).build()?);
    }

    Ok(spheres)
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::from(args.log_level))
        .init();

    let mut config = match &args.config {
        Some(path) => RenderConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => RenderConfig::default(),
    };
    args.apply(&mut config);
    config.validate().context("Invalid render configuration")?;

    let spheres = build_spheres().context("Failed to build demo scene")?;
    let light = PointLight::new(DVec3::new(-10.0, 20.0, 40.0), 5e9);

    let mut scene = Scene::with_config(config.trace.clone());
    for sphere in &spheres {
        scene.add_surface(sphere);
    }
    scene.add_light(&light);
    info!(
        "Scene: {} surfaces, {} lights",
        scene.surface_count(),
        scene.light_count()
    );
    debug!("Trace settings: {:?}", scene.config());

    let mut camera = Camera::new()
        .with_resolution(config.width, config.height)
        .with_position(DVec3::new(0.0, 0.0, 55.0), DVec3::ZERO, DVec3::Y)
        .with_fov(75.0);
    camera.initialize();

    let start = Instant::now();
    let image = render(&camera, &scene, &config).context("Render failed")?;

    image
        .save(&args.output, config.gamma)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!(
        "Saved {} in {:.2?}",
        args.output.display(),
        start.elapsed()
    );
    Ok(())
}
