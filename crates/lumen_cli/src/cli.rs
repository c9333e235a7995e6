use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lumen_renderer::RenderConfig;
use std::path::PathBuf;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "lumen")]
#[command(about = "Render the demo sphere room with recursive Monte Carlo light transport")]
pub struct Args {
    /// JSON render configuration; flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output image path (format follows the extension)
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Jittered camera rays per pixel
    #[arg(short = 's', long)]
    pub samples: Option<u32>,

    /// Seed for the per-bucket generators
    #[arg(long)]
    pub seed: Option<u64>,

    /// Maximum recursion depth
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Disable the diffuse indirect bounce
    #[arg(long)]
    pub no_indirect: bool,

    /// Disable stochastic Fresnel mixing at glass
    #[arg(long)]
    pub no_fresnel: bool,

    /// Trace one centered ray per pixel
    #[arg(long)]
    pub no_antialiasing: bool,

    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply command line overrides on top of `config`.
    pub fn apply(&self, config: &mut RenderConfig) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(samples) = self.samples {
            config.antialiasing_samples = samples;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(max_depth) = self.max_depth {
            config.trace.max_depth = max_depth;
        }
        if self.no_indirect {
            config.trace.enable_indirect_lighting = false;
        }
        if self.no_fresnel {
            config.trace.enable_fresnel = false;
        }
        if self.no_antialiasing {
            config.enable_antialiasing = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "lumen",
            "--width",
            "64",
            "--samples",
            "8",
            "--no-fresnel",
            "--log-level",
            "debug",
        ]);

        let mut config = RenderConfig::default();
        args.apply(&mut config);

        assert_eq!(config.width, 64);
        assert_eq!(config.height, 512);
        assert_eq!(config.antialiasing_samples, 8);
        assert!(!config.trace.enable_fresnel);
        assert!(config.trace.enable_indirect_lighting);
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
    }
}
