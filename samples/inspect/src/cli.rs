use nalgebra::{Scalar, Scale3, Vector3};

use std::str::FromStr;

use facetport::{channel::MAX_CHANNELS, MaterialMode};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum LogFormat {
    Compact,
    Full,
    Pretty,
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Compact => f.write_str("compact"),
            LogFormat::Full => f.write_str("full"),
            LogFormat::Pretty => f.write_str("pretty"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

/// Procedural source meshes to convert.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum Demo {
    /// A unit cube built from one strip per side, with normals and one UV set
    Cube,
    /// A grid of triangle fans with vertex colors and two UV sets
    Grid,
    /// A hexagonal prism with polygonal caps and quad sides
    Prism,
    /// A single triangle referencing more UV sets than there are map channels
    Crowded,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum Materials {
    /// Use material tags as host ids
    Source,
    /// Number material tags from 1 in order of first use
    Remap,
}

impl From<Materials> for MaterialMode {
    fn from(value: Materials) -> Self {
        match value {
            Materials::Source => MaterialMode::Source,
            Materials::Remap => MaterialMode::Remap,
        }
    }
}

#[derive(Debug, clap::Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Logging output filters; comma-separated
    #[arg(
        short,
        long,
        default_value = "warn,facetport=info,inspect=info",
        env = "INSPECT_LOG_FILTER"
    )]
    pub log_filter: String,
    /// Logging output format
    #[arg(long, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
    /// How material tags become host material ids
    #[arg(long, value_enum, default_value_t = Materials::Source)]
    pub materials: Materials,
    /// The highest map channel UV/color sets may occupy
    #[arg(short, long, default_value_t = MAX_CHANNELS)]
    pub channel_limit: usize,
    /// Scaling applied to each source mesh before conversion
    #[arg(short, long, default_value = "1,1,1", value_parser = parse_scale3::<f32>, value_name = "X,Y,Z")]
    pub mesh_scale: Scale3<f32>,
    /// Meshes to convert
    #[arg(value_enum, num_args = 1.., default_values_t = [Demo::Cube, Demo::Grid, Demo::Prism, Demo::Crowded])]
    pub demos: Vec<Demo>,
}

fn parse_vec3<R: FromStr>(
    s: &str,
) -> Result<Vector3<R>, Box<dyn std::error::Error + Send + Sync + 'static>>
where
    <R as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    let mut split = s.trim().split(',');
    let mut next = || split.next().ok_or("expected 3 comma-separated components");
    let x = R::from_str(next()?)?;
    let y = R::from_str(next()?)?;
    let z = R::from_str(next()?)?;
    Ok(nalgebra::vector![x, y, z])
}

fn parse_scale3<R: FromStr + Scalar>(
    s: &str,
) -> Result<Scale3<R>, Box<dyn std::error::Error + Send + Sync + 'static>>
where
    <R as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    parse_vec3::<R>(s).map(Scale3::from)
}

/// Set up pretty log output
pub(crate) fn initialize_tracing(log_filter: &str, log_format: LogFormat) {
    let tsub = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::OffsetTime::new(
            time::UtcOffset::current_local_offset().unwrap_or_else(|e| {
                tracing::warn!("couldn't get local time offset: {:?}", e);
                time::UtcOffset::UTC
            }),
            time::macros::format_description!("[hour]:[minute]:[second]"),
        ))
        .with_env_filter(log_filter);

    match log_format {
        LogFormat::Compact => tsub.compact().init(),
        LogFormat::Full => tsub.init(),
        LogFormat::Pretty => tsub.pretty().init(),
        LogFormat::Json => tsub.json().init(),
    }
}
